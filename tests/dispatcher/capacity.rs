use futures::FutureExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use surge_core::{issuer_fn, Dispatcher, DispatcherConfig, Outcome};
use tokio::time::sleep;

/// The in-flight set never exceeds the ceiling, and the dispatcher
/// actually reaches it when the budget allows.
#[tokio::test]
async fn in_flight_never_exceeds_ceiling() {
    let current = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let cur = Arc::clone(&current);
    let pk = Arc::clone(&peak);
    let issuer = issuer_fn(move |_| {
        let cur = Arc::clone(&cur);
        let pk = Arc::clone(&pk);
        Ok(async move {
            let now = cur.fetch_add(1, Ordering::SeqCst) + 1;
            pk.fetch_max(now, Ordering::SeqCst);
            sleep(Duration::from_millis(100)).await;
            cur.fetch_sub(1, Ordering::SeqCst);
            Outcome::Pass { status: 200 }
        }
        .boxed())
    });

    let config = DispatcherConfig::builder()
        .total_requests(60)
        .max_in_flight(7)
        .build()
        .unwrap();

    let summary = Dispatcher::new(config).run(&issuer).await.unwrap();
    assert_eq!(summary.admitted, 60);
    assert_eq!(peak.load(Ordering::SeqCst), 7);
}

/// Scenario A: budget 5, ceiling 2. The first two requests are admitted
/// immediately; each later admission waits for a completion first.
#[tokio::test]
async fn admit_two_then_wait_for_each_slot() {
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Step {
        Admit(u64),
        Complete(u64),
    }

    let log: Arc<Mutex<Vec<Step>>> = Arc::new(Mutex::new(Vec::new()));
    let admits = Arc::clone(&log);
    let completes = Arc::clone(&log);

    let config = DispatcherConfig::builder()
        .total_requests(5)
        .max_in_flight(2)
        .on_admitted(move |seq, _| admits.lock().unwrap().push(Step::Admit(seq)))
        .on_completed(move |seq, _| completes.lock().unwrap().push(Step::Complete(seq)))
        .build()
        .unwrap();

    let issuer = issuer_fn(|_| {
        Ok(async {
            sleep(Duration::from_millis(30)).await;
            Outcome::Pass { status: 200 }
        }
        .boxed())
    });

    let summary = Dispatcher::new(config).run(&issuer).await.unwrap();
    assert_eq!(summary.admitted, 5);

    let log = log.lock().unwrap().clone();
    assert_eq!(&log[..2], [Step::Admit(1), Step::Admit(2)]);

    // Before request k is admitted (k >= 3), at least k - 2 outcomes must
    // have been observed, otherwise the set would have been over capacity.
    for k in 3..=5u64 {
        let admit_pos = log
            .iter()
            .position(|step| *step == Step::Admit(k))
            .expect("request admitted");
        let completes_before = log[..admit_pos]
            .iter()
            .filter(|step| matches!(step, Step::Complete(_)))
            .count();
        assert!(
            completes_before >= (k - 2) as usize,
            "request {k} admitted after only {completes_before} completions"
        );
    }
}

/// A ceiling of one serializes the run: outcomes are observed in
/// admission order.
#[tokio::test]
async fn ceiling_of_one_serializes_completions() {
    let reported: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reported);

    let config = DispatcherConfig::builder()
        .total_requests(6)
        .max_in_flight(1)
        .on_completed(move |seq, _| sink.lock().unwrap().push(seq))
        .build()
        .unwrap();

    let issuer = issuer_fn(|seq| {
        Ok(async move {
            sleep(Duration::from_millis(5 + seq % 3)).await;
            Outcome::Pass { status: 200 }
        }
        .boxed())
    });

    Dispatcher::new(config).run(&issuer).await.unwrap();
    assert_eq!(reported.lock().unwrap().clone(), vec![1, 2, 3, 4, 5, 6]);
}
