// tests/executor_sequencing.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use runlist::exec::Executor;
use runlist::task::{Task, TaskContext, TaskResult, TaskStatus};
use runlist_test_utils::builders::ScriptedTask;

type TestResult = Result<(), Box<dyn Error>>;

fn done_tasks(n: usize) -> Vec<Arc<dyn Task>> {
    (0..n)
        .map(|i| ScriptedTask::new(&format!("task_{i}")).into_arc())
        .collect()
}

#[tokio::test]
async fn empty_task_list_is_immediately_done() -> TestResult {
    init_tracing();

    let mut executor = Executor::new(Vec::new());
    let ctx = TaskContext::new();

    assert_eq!(executor.total(), 0);
    assert!(executor.done());
    assert!(executor.stopped());
    assert!(executor.run_next(&ctx).await.is_none());
    assert!(executor.run_next(&ctx).await.is_none());
    assert_eq!(executor.elapsed(), Duration::ZERO);

    let summary = executor.summary();
    assert_eq!(summary.done, 0);
    assert_eq!(summary.pending, 0);
    assert!(!summary.has_failures);

    Ok(())
}

#[tokio::test]
async fn results_fill_in_strict_task_order() -> TestResult {
    init_tracing();

    let mut executor = Executor::new(done_tasks(3));
    let ctx = TaskContext::new();

    assert_eq!(executor.total(), 3);

    for k in 0..3 {
        assert_eq!(executor.current(), k);

        let result = executor.run_next(&ctx).await.expect("task should run");
        assert_eq!(result.status, TaskStatus::Done);

        assert_eq!(executor.current(), k + 1);
        for i in 0..=k {
            assert_eq!(executor.result_at(i).status, TaskStatus::Done);
        }
        for i in (k + 1)..3 {
            assert_eq!(executor.result_at(i).status, TaskStatus::Pending);
        }
    }

    assert!(executor.done());
    assert!(executor.stopped());
    assert!(executor.run_next(&ctx).await.is_none());

    Ok(())
}

#[tokio::test]
async fn result_at_is_total_over_any_index() -> TestResult {
    init_tracing();

    let executor = Executor::new(done_tasks(2));

    assert_eq!(executor.result_at(0).status, TaskStatus::Pending);
    assert_eq!(executor.result_at(2).status, TaskStatus::Pending);
    assert_eq!(executor.result_at(usize::MAX).status, TaskStatus::Pending);

    // The placeholder upholds the Pending invariant.
    let placeholder = executor.result_at(99);
    assert_eq!(placeholder.duration, Duration::ZERO);
    assert!(placeholder.error.is_none());

    Ok(())
}

#[tokio::test]
async fn summary_counts_every_status() -> TestResult {
    init_tracing();

    let tasks: Vec<Arc<dyn Task>> = vec![
        ScriptedTask::new("ok").into_arc(),
        ScriptedTask::new("skip")
            .result(TaskResult::skipped("nothing to do"))
            .into_arc(),
        ScriptedTask::new("boom")
            .result(TaskResult::failed(anyhow::anyhow!("exploded")))
            .into_arc(),
    ];

    let mut executor = Executor::new(tasks);
    let ctx = TaskContext::new();

    while executor.run_next(&ctx).await.is_some() {}

    let summary = executor.summary();
    assert_eq!(summary.done, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.pending, 0);
    assert!(summary.has_failures);

    // The skip reason travels in the message field.
    assert_eq!(executor.result_at(1).message, "nothing to do");
    // The failure travels as data, not as an Err.
    assert_eq!(executor.result_at(2).error.as_deref(), Some("exploded"));

    Ok(())
}

#[tokio::test]
async fn all_done_summary_has_no_failures() -> TestResult {
    init_tracing();

    let mut executor = Executor::new(done_tasks(3));
    let ctx = TaskContext::new();

    while executor.run_next(&ctx).await.is_some() {}

    let summary = executor.summary();
    assert_eq!(summary.done, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.pending, 0);
    assert!(!summary.has_failures);

    Ok(())
}

#[tokio::test]
async fn run_next_measures_wall_clock_duration() -> TestResult {
    init_tracing();

    let tasks: Vec<Arc<dyn Task>> = vec![
        ScriptedTask::new("slow")
            .delay(Duration::from_millis(20))
            .into_arc(),
    ];

    let mut executor = Executor::new(tasks);
    let ctx = TaskContext::new();

    let result = executor.run_next(&ctx).await.expect("task should run");
    assert!(result.duration >= Duration::from_millis(20));
    assert_eq!(executor.result_at(0).duration, result.duration);
    assert!(executor.elapsed() >= Duration::from_millis(20));

    Ok(())
}
