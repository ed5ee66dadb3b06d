//! surge: issue a fixed budget of authenticated POST requests against a
//! remote endpoint, keeping at most a fixed number in flight.
//!
//! ```bash
//! surge --base-url https://gateway.example.com \
//!       --username app --password s3cret \
//!       --resource instances/abc123/set \
//!       --origin wallet-1 \
//!       --total 10000 --concurrency 100
//! ```
//!
//! One line is printed per resolved request (`PASS - <N> [<status>]` or
//! `FAIL - <N> [<status>]: <message>`); diagnostics go to stderr via
//! `RUST_LOG`.

use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use surge_core::{Dispatcher, DispatcherConfig, DrainPolicy, Report, RunSummary};
use surge_http::{TargetConfig, WriteClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "surge",
    version,
    about = "Bounded-concurrency HTTP write load generator"
)]
struct Args {
    /// Base URL of the target gateway.
    #[arg(long, env = "SURGE_BASE_URL")]
    base_url: String,

    /// Basic auth username.
    #[arg(long, env = "SURGE_USERNAME")]
    username: String,

    /// Basic auth password.
    #[arg(long, env = "SURGE_PASSWORD", hide_env_values = true)]
    password: String,

    /// Resource path writes are POSTed to, relative to the base URL.
    #[arg(long, env = "SURGE_RESOURCE")]
    resource: String,

    /// Origin identifier sent as the `from` query parameter.
    #[arg(long, env = "SURGE_ORIGIN")]
    origin: String,

    /// Total number of requests to issue.
    #[arg(long, default_value_t = 10_000)]
    total: u64,

    /// Maximum number of requests in flight at once.
    #[arg(long, default_value_t = 100)]
    concurrency: usize,

    /// Maximum sockets kept in the connection pool.
    #[arg(long, default_value_t = 100)]
    max_sockets: usize,

    /// Per-request timeout in seconds (no timeout when omitted).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Exit as soon as the budget is admitted instead of waiting for
    /// requests still in flight.
    #[arg(long)]
    no_drain: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] surge_core::ConfigError),
    #[error(transparent)]
    Client(#[from] surge_http::ClientError),
    #[error(transparent)]
    Dispatch(#[from] surge_core::DispatchError),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok(summary) => {
            info!(
                admitted = summary.admitted,
                passed = summary.passed,
                failed = summary.failed,
                abandoned = summary.abandoned,
                "run complete"
            );
            println!(
                "{} admitted, {} passed, {} failed, {} abandoned",
                summary.admitted, summary.passed, summary.failed, summary.abandoned
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<RunSummary, CliError> {
    let mut target = TargetConfig::builder()
        .base_url(args.base_url)
        .username(args.username)
        .password(args.password)
        .resource(args.resource)
        .origin(args.origin)
        .max_sockets(args.max_sockets);
    if let Some(secs) = args.timeout_secs {
        target = target.timeout(Duration::from_secs(secs));
    }
    let client = WriteClient::new(target.build())?;

    let drain = if args.no_drain {
        DrainPolicy::Abandon
    } else {
        DrainPolicy::AwaitAll
    };

    let config = DispatcherConfig::builder()
        .total_requests(args.total)
        .max_in_flight(args.concurrency)
        .drain(drain)
        .name("surge")
        .on_completed(|seq, outcome| {
            println!(
                "{}",
                Report {
                    seq,
                    outcome: outcome.clone()
                }
            );
        })
        .build()?;

    Ok(Dispatcher::new(config).run(&client).await?)
}
