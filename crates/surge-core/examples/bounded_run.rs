//! Bounded dispatch example with a simulated transport.
//! Run with: cargo run --example bounded_run

use futures::FutureExt;
use surge_core::{issuer_fn, Dispatcher, DispatcherConfig, Outcome, Report};
use tokio::time::{sleep, Duration};

#[tokio::main]
async fn main() {
    let config = DispatcherConfig::builder()
        .total_requests(20)
        .max_in_flight(4)
        .name("example-dispatcher")
        .on_admitted(|seq, in_flight| {
            println!("  [ADMIT] {} (in flight: {})", seq, in_flight);
        })
        .on_completed(|seq, outcome| {
            println!(
                "{}",
                Report {
                    seq,
                    outcome: outcome.clone()
                }
            );
        })
        .build()
        .expect("valid config");

    // Simulated transport: uneven latency, every fifth request fails.
    let issuer = issuer_fn(|seq| {
        Ok(async move {
            sleep(Duration::from_millis(20 + (seq % 7) * 10)).await;
            if seq % 5 == 0 {
                Outcome::Fail {
                    status: Some(500),
                    message: "server error".to_string(),
                }
            } else {
                Outcome::Pass { status: 202 }
            }
        }
        .boxed())
    });

    let summary = Dispatcher::new(config)
        .run(&issuer)
        .await
        .expect("run completes");

    println!(
        "\ndone: {} admitted, {} passed, {} failed",
        summary.admitted, summary.passed, summary.failed
    );
}
