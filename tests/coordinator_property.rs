// tests/coordinator_property.rs

//! Property test for the completion join: for any interleaving of log
//! lines with the task result, with the log stream finishing last or the
//! result arriving last, exactly one completion event is produced and it
//! carries every line in write order.

use proptest::prelude::*;

use runlist::engine::Coordinator;
use runlist::task::{TaskResult, TaskStatus};

proptest! {
    #[test]
    fn completion_join_is_order_independent(
        lines in proptest::collection::vec("[a-z ]{0,12}", 0..24),
        split in any::<proptest::sample::Index>(),
        logs_finish_last in any::<bool>(),
    ) {
        let mut coordinator = Coordinator::new();
        coordinator.start_task(7);

        let mut events = Vec::new();

        if logs_finish_last {
            // The result lands somewhere between two batches of lines;
            // logs_done is the temporally-last signal.
            let k = split.index(lines.len() + 1);
            for line in &lines[..k] {
                coordinator.add_log_line(line.clone());
            }
            events.extend(coordinator.task_done(TaskResult::done()));
            for line in &lines[k..] {
                coordinator.add_log_line(line.clone());
            }
            events.extend(coordinator.logs_done());
        } else {
            // The log stream finishes first; the result is last.
            for line in &lines {
                coordinator.add_log_line(line.clone());
            }
            events.extend(coordinator.logs_done());
            events.extend(coordinator.task_done(TaskResult::done()));
        }

        prop_assert_eq!(events.len(), 1);
        let event = &events[0];
        prop_assert_eq!(event.task_index, 7);
        prop_assert_eq!(event.result.status, TaskStatus::Done);
        prop_assert_eq!(&event.logs, &lines);

        // No second finalization, whatever arrives late.
        prop_assert!(coordinator.task_done(TaskResult::done()).is_none());
        prop_assert!(coordinator.logs_done().is_none());

        // History agrees with the event for non-empty streams.
        if lines.is_empty() {
            prop_assert!(coordinator.logs_for(7).is_empty());
        } else {
            prop_assert_eq!(coordinator.logs_for(7), lines.as_slice());
        }
    }
}
