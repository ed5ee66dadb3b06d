//! The write client: one authenticated POST per sequence number.

use crate::config::TargetConfig;
use crate::error::ClientError;
use futures::FutureExt;
use reqwest::{Client, Url};
use serde::Serialize;
use surge_core::{BoxError, Outcome, OutcomeFuture, RequestIssuer};
use tracing::debug;

/// Query parameter carrying the configured origin identifier.
const ORIGIN_PARAM: &str = "from";
/// Query parameter requesting fire-and-forget processing from the server.
const SYNC_PARAM: &str = "sync";
/// The payload value is the sequence number modulo this base.
const PAYLOAD_MODULUS: u64 = 100;

#[derive(Serialize)]
struct WritePayload {
    x: u64,
}

/// Issues write requests over a shared connection pool.
///
/// Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct WriteClient {
    http: Client,
    endpoint: Url,
    config: TargetConfig,
}

impl std::fmt::Debug for WriteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl WriteClient {
    /// Builds the underlying HTTP client and resolves the target endpoint.
    pub fn new(config: TargetConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder().pool_max_idle_per_host(config.max_sockets);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let raw = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.resource.trim_start_matches('/')
        );
        let endpoint =
            Url::parse(&raw).map_err(|source| ClientError::InvalidUrl { url: raw, source })?;

        debug!(%endpoint, max_sockets = config.max_sockets, "write client ready");
        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    /// The fully resolved endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl RequestIssuer for WriteClient {
    fn issue(&self, seq: u64) -> Result<OutcomeFuture, BoxError> {
        let request = self
            .http
            .post(self.endpoint.clone())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .query(&[
                (ORIGIN_PARAM, self.config.origin.as_str()),
                (SYNC_PARAM, "false"),
            ])
            .json(&WritePayload {
                x: seq % PAYLOAD_MODULUS,
            })
            .build()
            .map_err(ClientError::Transport)?;

        let http = self.http.clone();
        Ok(async move {
            match http.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        Outcome::Pass {
                            status: status.as_u16(),
                        }
                    } else {
                        let message = match response.text().await {
                            Ok(body) if !body.is_empty() => body,
                            _ => status
                                .canonical_reason()
                                .unwrap_or("request failed")
                                .to_string(),
                        };
                        Outcome::Fail {
                            status: Some(status.as_u16()),
                            message,
                        }
                    }
                }
                Err(err) => Outcome::Fail {
                    status: err.status().map(|s| s.as_u16()),
                    message: err.to_string(),
                },
            }
        }
        .boxed())
    }
}
