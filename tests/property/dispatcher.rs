//! Property tests for the bounded dispatcher.
//!
//! Invariants tested:
//! - Admitted count equals the budget exactly
//! - Observed sequence numbers form the contiguous range 1..=budget
//! - Peak concurrency never exceeds the ceiling

use futures::FutureExt;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use surge_core::{issuer_fn, Dispatcher, DispatcherConfig, Outcome, RunSummary};
use tokio::runtime::Runtime;

/// Runs one dispatch with a concurrency-tracking issuer whose requests
/// take uneven time and fail every third sequence number.
fn run_dispatch(budget: u64, ceiling: usize) -> (RunSummary, Vec<u64>, usize) {
    let rt = Runtime::new().unwrap();
    rt.block_on(async move {
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let seqs: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));

        let cur = Arc::clone(&current);
        let pk = Arc::clone(&peak);
        let issuer = issuer_fn(move |seq| {
            let cur = Arc::clone(&cur);
            let pk = Arc::clone(&pk);
            Ok(async move {
                let now = cur.fetch_add(1, Ordering::SeqCst) + 1;
                pk.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(seq % 4)).await;
                cur.fetch_sub(1, Ordering::SeqCst);
                if seq % 3 == 0 {
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

        let sink = Arc::clone(&seqs);
        let config = DispatcherConfig::builder()
            .total_requests(budget)
            .max_in_flight(ceiling)
            .on_completed(move |seq, _| sink.lock().unwrap().push(seq))
            .build()
            .unwrap();

        let summary = Dispatcher::new(config).run(&issuer).await.unwrap();
        let seqs = seqs.lock().unwrap().clone();
        (summary, seqs, peak.load(Ordering::SeqCst))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn admission_invariants(budget in 1u64..48, ceiling in 1usize..10) {
        let (summary, seqs, peak) = run_dispatch(budget, ceiling);

        prop_assert_eq!(summary.admitted, budget);
        prop_assert_eq!(summary.passed + summary.failed, budget);
        prop_assert_eq!(summary.abandoned, 0);
        prop_assert!(peak <= ceiling, "peak {} exceeded ceiling {}", peak, ceiling);

        prop_assert_eq!(seqs.len() as u64, budget);
        let unique: HashSet<u64> = seqs.iter().copied().collect();
        prop_assert_eq!(unique.len() as u64, budget);
        prop_assert_eq!(seqs.iter().copied().min(), Some(1));
        prop_assert_eq!(seqs.iter().copied().max(), Some(budget));
    }
}
