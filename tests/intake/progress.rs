use std::time::Duration;

use tokio::sync::mpsc;
use triagex::intake::ProgressSequence;

#[test]
fn default_sequence_walks_stages_every_two_seconds() {
    let sequence = ProgressSequence::default();
    assert_eq!(sequence.total_duration(), Duration::from_millis(15_000));

    assert_eq!(sequence.update_at(0).stage, 0);
    // 13 ticks of 150ms = 1.95s, still first stage.
    assert_eq!(sequence.update_at(13).stage, 0);
    assert_eq!(sequence.update_at(14).stage, 1);
    assert_eq!(sequence.update_at(27).stage, 2);
    assert_eq!(sequence.update_at(40).stage, 3);
    assert_eq!(sequence.update_at(99).stage, 3);
    assert_eq!(sequence.update_at(99).completed_stages, 3);

    let done = sequence.update_at(100);
    assert!(done.is_complete());
    assert_eq!(done.completed_stages, sequence.stages().len());
}

#[tokio::test(start_paused = true)]
async fn run_publishes_monotonic_updates_until_complete() {
    let sequence = ProgressSequence::new(Duration::from_millis(10), Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let last = sequence.run(Some(&tx)).await;
    drop(tx);

    let mut updates = Vec::new();
    while let Some(update) = rx.recv().await {
        updates.push(update);
    }

    assert!(last.is_complete());
    assert_eq!(updates.len(), 101);
    assert!(updates.windows(2).all(|pair| pair[0].percent < pair[1].percent));
    assert!(updates.windows(2).all(|pair| pair[0].stage <= pair[1].stage));
    assert_eq!(updates.last().map(|update| update.percent), Some(100));
}

#[tokio::test(start_paused = true)]
async fn run_completes_when_receiver_is_gone() {
    let sequence = ProgressSequence::new(Duration::from_millis(5), Duration::from_millis(50));
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);

    let last = sequence.run(Some(&tx)).await;
    assert!(last.is_complete());
}
