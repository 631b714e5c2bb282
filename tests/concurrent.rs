#![cfg(feature = "concurrent")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use streamline::collectors::Counting;
use streamline::concurrent::UnitStatus;
use streamline::testing::*;
use streamline::{DispatchOptions, ErrorKind, ExecConfig, ParallelStream, Stream, StreamError};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pool(workers: usize) -> ExecConfig {
    ExecConfig::default().with_workers(workers)
}

#[test]
fn map_concurrent_matches_sequential_map() -> anyhow::Result<()> {
    init_logger();
    let data = random_ints(31, -1000..1000, 400);

    let expected = Stream::new(data.clone()).map(|x| x * x - 1).to_vec()?;
    let actual = ParallelStream::concurrent(data, pool(4))?
        .map_concurrent(|x| x * x - 1, DispatchOptions::new().batch_size(16))?
        .to_vec()?;

    assert_collections_unordered_equal(&actual, &expected);
    Ok(())
}

#[test]
fn filter_concurrent_keeps_accepted_elements() -> anyhow::Result<()> {
    init_logger();
    let mut kept = ParallelStream::concurrent(0..200, pool(3))?
        .filter_concurrent(|x| x % 7 == 0, DispatchOptions::new())?
        .to_vec()?;
    kept.sort_unstable();

    let expected: Vec<i32> = (0..200).filter(|x| x % 7 == 0).collect();
    assert_collections_equal(&kept, &expected);
    Ok(())
}

#[test]
fn sequential_operators_keep_the_mode() -> anyhow::Result<()> {
    init_logger();
    let total = ParallelStream::concurrent(1..=100, pool(2))?
        .filter(|x| x % 2 == 0)
        .map_concurrent(|x| x * 10, DispatchOptions::new())?
        .map(|x| x + 1)
        .collect(Counting::new())?;

    assert_eq!(total, 50);
    Ok(())
}

#[test]
fn batch_processor_flattens_results() -> anyhow::Result<()> {
    init_logger();
    let out = Stream::new(0..50)
        .into_concurrent(pool(4))?
        .batch_processor(|x| x + 1000, 7, None)?
        .to_vec()?;

    let expected: Vec<i32> = (1000..1050).collect();
    assert_collections_unordered_equal(&out, &expected);
    Ok(())
}

#[test]
fn for_each_concurrent_visits_everything() -> anyhow::Result<()> {
    init_logger();
    let hits = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&hits);

    let mut s = ParallelStream::concurrent(0..300, pool(4))?;
    s.for_each_concurrent(
        move |x| {
            sink.fetch_add(x, Ordering::Relaxed);
        },
        DispatchOptions::new().batch_size(32),
    )?;

    assert_eq!(hits.load(Ordering::Relaxed), (0..300).sum::<usize>());
    assert!(s.executor().is_shut_down());
    Ok(())
}

#[test]
fn failing_unit_surfaces_at_the_terminal() -> anyhow::Result<()> {
    init_logger();
    let err = ParallelStream::concurrent(0..20, pool(2))?
        .try_map_concurrent(
            |x| if x == 13 { anyhow::bail!("unlucky {x}") } else { Ok(x) },
            DispatchOptions::new(),
        )?
        .to_vec()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnitFailure);
    assert!(err.to_string().contains("unlucky 13"));
    Ok(())
}

#[test]
fn panicking_unit_surfaces_as_unit_failure() -> anyhow::Result<()> {
    init_logger();
    let err = ParallelStream::concurrent(0..4, pool(2))?
        .map_concurrent(
            |x: i32| {
                assert!(x != 2, "cannot handle two");
                x
            },
            DispatchOptions::new(),
        )?
        .count()
        .unwrap_err();

    assert!(matches!(err, StreamError::UnitFailed { .. }));
    assert!(err.to_string().contains("cannot handle two"));
    Ok(())
}

#[mark_flaky_tests::flaky]
#[test]
fn slow_units_time_out_without_waiting_for_them() {
    init_logger();
    let started = Instant::now();
    let err = ParallelStream::concurrent(0..2, pool(1))
        .unwrap()
        .map_concurrent(
            |x| {
                thread::sleep(Duration::from_millis(1500));
                x
            },
            DispatchOptions::new().timeout(Duration::from_millis(20)),
        )
        .unwrap()
        .to_vec()
        .unwrap_err();

    assert!(matches!(err, StreamError::Timeout(d) if d == Duration::from_millis(20)));
    assert!(started.elapsed() < Duration::from_millis(750), "took {:?}", started.elapsed());
}

#[mark_flaky_tests::flaky]
#[test]
fn siblings_of_a_failed_unit_finish_on_their_own() {
    init_logger();
    let mut s = ParallelStream::concurrent(0..8, pool(2).with_batch_size(8))
        .unwrap()
        .try_map_concurrent(
            |x| {
                if x == 0 {
                    anyhow::bail!("first unit fails");
                }
                thread::sleep(Duration::from_millis(300));
                Ok(x)
            },
            DispatchOptions::new(),
        )
        .unwrap();

    let started = Instant::now();
    let err = s.to_vec().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnitFailure);
    assert!(started.elapsed() < Duration::from_millis(250), "took {:?}", started.elapsed());

    let exec = s.executor();
    assert!(exec.is_shut_down());
    let stats = exec.stats();
    assert_eq!(stats.failed, 1);
    assert!(stats.running >= 1, "no sibling was running: {stats:?}");
    assert!(stats.cancelled > 0, "nothing was cancelled: {stats:?}");

    let deadline = Instant::now() + Duration::from_secs(3);
    while exec.stats().running > 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    let stats = exec.stats();
    assert_eq!(stats.running, 0);
    assert!(stats.completed >= 1, "running siblings did not complete: {stats:?}");
    assert_eq!(stats.completed + stats.failed + stats.cancelled, stats.submitted);
}

#[mark_flaky_tests::flaky]
#[test]
fn early_terminal_cancels_queued_units() {
    init_logger();
    let started = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&started);

    let mut s = ParallelStream::concurrent(0..64, pool(2).with_batch_size(64))
        .unwrap()
        .map_concurrent(
            move |x| {
                counter.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(20));
                x
            },
            DispatchOptions::new(),
        )
        .unwrap();

    let first = s.find_first().unwrap();
    assert!(first.is_present());

    let stats = s.executor().stats();
    assert_eq!(stats.submitted, 64);
    assert!(stats.cancelled > 0, "nothing was cancelled: {stats:?}");
    assert_eq!(stats.running, 0);
    assert_eq!(started.load(Ordering::SeqCst), stats.completed + stats.failed);
    assert!(s.executor().is_shut_down());
}

#[test]
fn pool_is_released_after_the_terminal() -> anyhow::Result<()> {
    let mut s = ParallelStream::concurrent(0..10, pool(2))?.map_concurrent(|x| x * 2, DispatchOptions::new())?;
    assert!(!s.executor().is_shut_down());

    assert_eq!(s.count()?, 10);
    let exec = s.executor();
    assert!(exec.is_shut_down());

    let stats = exec.stats();
    assert_eq!(stats.submitted, 10);
    assert_eq!(stats.completed, 10);
    assert!(exec.units().iter().all(|u| u.status() == UnitStatus::Completed));
    Ok(())
}

#[test]
fn zero_workers_is_rejected() {
    let err = ParallelStream::concurrent(0..3, pool(0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn zero_dispatch_size_is_rejected() -> anyhow::Result<()> {
    let s = ParallelStream::concurrent(0..3, pool(1))?;
    let err = s.map_concurrent(|x| x, DispatchOptions::new().batch_size(0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    Ok(())
}

#[test]
fn supplier_backed_parallel_stream() -> anyhow::Result<()> {
    init_logger();
    let out = ParallelStream::concurrent_from_supplier(int_supplier(2, 0..10), pool(2))?
        .limit(25)
        .map_concurrent(|x| x + 1, DispatchOptions::new())?
        .to_vec()?;

    assert_eq!(out.len(), 25);
    assert_all(&out, |x| (1..11).contains(x));
    Ok(())
}
