//! Target endpoint configuration.

use std::time::Duration;

/// Where and how write requests are sent.
///
/// All values are fixed for the lifetime of a run. The base URL and
/// resource path are validated when the client is constructed. No
/// `Debug` impl: the config carries the credential pair.
#[derive(Clone)]
pub struct TargetConfig {
    pub(crate) base_url: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) resource: String,
    pub(crate) origin: String,
    pub(crate) max_sockets: usize,
    pub(crate) timeout: Option<Duration>,
}

impl TargetConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> TargetConfigBuilder {
        TargetConfigBuilder::new()
    }
}

/// Builder for target configuration.
pub struct TargetConfigBuilder {
    base_url: String,
    username: String,
    password: String,
    resource: String,
    origin: String,
    max_sockets: usize,
    timeout: Option<Duration>,
}

impl TargetConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            resource: String::new(),
            origin: String::new(),
            max_sockets: 100,
            timeout: None,
        }
    }

    /// Sets the base URL of the target gateway.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the basic auth username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the basic auth password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Sets the resource path writes are POSTed to, relative to the base URL.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Sets the origin identifier sent as the `from` query parameter.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the maximum number of pooled sockets.
    ///
    /// Independent of the dispatcher's concurrency ceiling; typically at
    /// least as large.
    ///
    /// Default: 100
    pub fn max_sockets(mut self, max_sockets: usize) -> Self {
        self.max_sockets = max_sockets;
        self
    }

    /// Sets the per-request timeout.
    ///
    /// A request that times out resolves to a failed outcome. If unset,
    /// requests wait indefinitely.
    /// Default: None
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> TargetConfig {
        TargetConfig {
            base_url: self.base_url,
            username: self.username,
            password: self.password,
            resource: self.resource,
            origin: self.origin,
            max_sockets: self.max_sockets,
            timeout: self.timeout,
        }
    }
}

impl Default for TargetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
