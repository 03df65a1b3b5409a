use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use session_countdown::{
    create,
    tasks::expire_or_cancel,
    IntervalTicks, TimerError, TimerHandle, TimerOutcome, TimerSnapshot, TimerState,
};
use tokio::{
    sync::{mpsc, oneshot},
    time::{timeout, Instant},
};

#[derive(Clone, Default)]
struct Recorder {
    rendered: Arc<Mutex<Vec<String>>>,
    expired: Arc<AtomicUsize>,
}

impl Recorder {
    fn start(&self, seconds: i64, ticks: mpsc::UnboundedReceiver<()>) -> TimerHandle {
        let rendered = Arc::clone(&self.rendered);
        let expired = Arc::clone(&self.expired);
        create(
            seconds,
            ticks,
            move |time| {
                rendered.lock().unwrap().push(time.to_string());
                Ok(())
            },
            move || {
                expired.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .unwrap()
    }

    fn rendered(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }

    fn expired(&self) -> usize {
        self.expired.load(Ordering::SeqCst)
    }
}

fn send_ticks(tx: &mpsc::UnboundedSender<()>, count: usize) {
    for _ in 0..count {
        let _ = tx.send(());
    }
}

#[tokio::test]
async fn test_three_second_countdown() {
    let recorder = Recorder::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = recorder.start(3, rx);

    send_ticks(&tx, 3);
    assert_eq!(handle.wait().await.unwrap(), TimerOutcome::Expired);

    assert_eq!(recorder.rendered(), vec!["00:02", "00:01", "00:00"]);
    assert_eq!(recorder.expired(), 1);
    assert!(tx.is_closed(), "tick source released after expiry");
}

#[tokio::test]
async fn test_zero_duration_expires_on_first_tick() {
    let recorder = Recorder::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = recorder.start(0, rx);

    send_ticks(&tx, 1);
    assert_eq!(handle.wait().await.unwrap(), TimerOutcome::Expired);
    assert_eq!(recorder.rendered(), vec!["00:00"]);
    assert_eq!(recorder.expired(), 1);
}

#[tokio::test]
async fn test_extra_ticks_do_not_refire() {
    let recorder = Recorder::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = recorder.start(2, rx);

    send_ticks(&tx, 10);
    assert_eq!(handle.wait().await.unwrap(), TimerOutcome::Expired);
    assert_eq!(recorder.rendered(), vec!["00:01", "00:00"]);
    assert_eq!(recorder.expired(), 1);
}

#[tokio::test]
async fn test_cancel_stops_callbacks_and_is_idempotent() {
    let recorder = Recorder::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let mut handle = recorder.start(5, rx);
    let mut snapshots = handle.subscribe();

    send_ticks(&tx, 1);
    snapshots.changed().await.unwrap();
    assert_eq!(*snapshots.borrow_and_update(), TimerSnapshot::active(4));

    handle.cancel().await;
    handle.cancel().await;

    assert!(handle.is_finished());
    assert!(tx.send(()).is_err(), "tick source released on cancel");
    assert_eq!(recorder.rendered(), vec!["00:04"]);
    assert_eq!(recorder.expired(), 0);

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.state, TimerState::Stopped);
    assert_eq!(snapshot.remaining_seconds, 4);
    assert_eq!(handle.wait().await.unwrap(), TimerOutcome::Cancelled);
}

#[tokio::test]
async fn test_cancel_after_expiry_is_noop() {
    let recorder = Recorder::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let mut handle = recorder.start(1, rx);
    let mut snapshots = handle.subscribe();

    send_ticks(&tx, 1);
    while snapshots.borrow_and_update().is_active() {
        snapshots.changed().await.unwrap();
    }

    handle.cancel().await;
    assert_eq!(recorder.expired(), 1);
    assert_eq!(handle.wait().await.unwrap(), TimerOutcome::Expired);
}

#[tokio::test]
async fn test_cancel_keeps_failed_expire_error() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut handle = create(1, rx, |_| Ok(()), || anyhow::bail!("form submit failed")).unwrap();
    let mut snapshots = handle.subscribe();

    send_ticks(&tx, 1);
    while snapshots.borrow_and_update().is_active() {
        snapshots.changed().await.unwrap();
    }

    handle.cancel().await;
    handle.cancel().await;

    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, TimerError::Callback(_)));
    assert!(err.to_string().contains("form submit failed"));
}

#[tokio::test]
async fn test_expiry_wins_over_simultaneous_shutdown() {
    let recorder = Recorder::default();
    let (_tx, rx) = mpsc::unbounded_channel();
    let mut handle = recorder.start(5, rx);

    let (expired_tx, expired_rx) = oneshot::channel();
    expired_tx.send(()).unwrap();

    assert!(expire_or_cancel(&mut handle, expired_rx, std::future::ready(())).await);
    assert!(!handle.is_finished(), "shutdown must not cancel an expired timer");

    handle.cancel().await;
}

#[tokio::test]
async fn test_shutdown_cancels_pending_timer() {
    let recorder = Recorder::default();
    let (_tx, rx) = mpsc::unbounded_channel();
    let mut handle = recorder.start(5, rx);
    let (_expired_tx, expired_rx) = oneshot::channel();

    assert!(!expire_or_cancel(&mut handle, expired_rx, std::future::ready(())).await);
    assert!(handle.is_finished());
    assert_eq!(handle.wait().await.unwrap(), TimerOutcome::Cancelled);
}

#[tokio::test]
async fn test_negative_duration_takes_no_subscription() {
    let (tx, rx) = mpsc::unbounded_channel::<()>();
    let result = create(-1, rx, |_| Ok(()), || Ok(()));

    assert!(matches!(result, Err(TimerError::InvalidDuration(-1))));
    assert!(tx.is_closed());
}

#[tokio::test]
async fn test_closed_source_stops_without_expiring() {
    let recorder = Recorder::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = recorder.start(5, rx);

    send_ticks(&tx, 2);
    drop(tx);

    assert_eq!(handle.wait().await.unwrap(), TimerOutcome::SourceClosed);
    assert_eq!(recorder.rendered(), vec!["00:04", "00:03"]);
    assert_eq!(recorder.expired(), 0);
}

#[tokio::test]
async fn test_failing_expire_surfaces_once() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = create(
        1,
        rx,
        |_| Ok(()),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("form submit failed")
        },
    )
    .unwrap();

    send_ticks(&tx, 3);
    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, TimerError::Callback(_)));
    assert!(err.to_string().contains("form submit failed"));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failing_render_stops_timer() {
    let expired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&expired);
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = create(
        3,
        rx,
        |_| anyhow::bail!("display detached"),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    )
    .unwrap();
    let snapshots = handle.subscribe();

    send_ticks(&tx, 5);
    assert!(matches!(handle.wait().await, Err(TimerError::Callback(_))));
    assert_eq!(expired.load(Ordering::SeqCst), 0);
    assert!(!snapshots.borrow().is_active());
}

#[tokio::test]
async fn test_dropped_handle_keeps_counting() {
    let (tx, rx) = mpsc::unbounded_channel();
    let (done_tx, done_rx) = oneshot::channel();
    let handle = create(
        2,
        rx,
        |_| Ok(()),
        move || {
            let _ = done_tx.send(());
            Ok(())
        },
    )
    .unwrap();
    drop(handle);

    send_ticks(&tx, 2);
    timeout(Duration::from_secs(5), done_rx)
        .await
        .expect("countdown should expire after its handle is dropped")
        .unwrap();
}

#[tokio::test]
async fn test_independent_timers() {
    let first = Recorder::default();
    let second = Recorder::default();
    let (first_tx, first_rx) = mpsc::unbounded_channel();
    let (second_tx, second_rx) = mpsc::unbounded_channel();
    let mut first_handle = first.start(3, first_rx);
    let second_handle = second.start(2, second_rx);
    assert_ne!(first_handle.id(), second_handle.id());

    first_handle.cancel().await;
    send_ticks(&first_tx, 3);
    send_ticks(&second_tx, 2);

    assert_eq!(second_handle.wait().await.unwrap(), TimerOutcome::Expired);
    assert!(first.rendered().is_empty());
    assert_eq!(first.expired(), 0);
    assert_eq!(second.expired(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_interval_ticks_once_per_second() {
    let rendered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&rendered);
    let start = Instant::now();

    let handle = create(
        3,
        IntervalTicks::every_second(),
        move |time| {
            sink.lock().unwrap().push((time.to_string(), start.elapsed()));
            Ok(())
        },
        || Ok(()),
    )
    .unwrap();

    assert_eq!(handle.wait().await.unwrap(), TimerOutcome::Expired);

    let rendered = rendered.lock().unwrap();
    let times: Vec<&str> = rendered.iter().map(|(time, _)| time.as_str()).collect();
    assert_eq!(times, vec!["00:02", "00:01", "00:00"]);
    // First tick waits a full period
    assert!(rendered[0].1 >= Duration::from_secs(1));
    assert!(rendered[2].1 >= Duration::from_secs(3));
}
