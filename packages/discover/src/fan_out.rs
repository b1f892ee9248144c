//! Bounded fan-out with a single fan-in aggregator.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::thread;

use crate::error::DiscoverError;

/// Options shared by the discovery stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Upper bound on concurrently running tasks.
    pub threads: usize,
    /// What to do when a matched path cannot be stat'ed.
    pub missing: MissingPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            missing: MissingPolicy::Fail,
        }
    }
}

/// Handling of paths that vanish between globbing and stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Abort the stage.
    #[default]
    Fail,
    /// Log a warning and leave the path out.
    Skip,
}

/// Run `task` once per input and collect the results.
///
/// Tasks run on a dedicated pool of at most `threads` threads. A separate
/// aggregator thread receives exactly `inputs.len()` results over a channel and
/// calls `on_progress(done, total)` after each one. The call returns once the
/// pool and the aggregator have both finished. Result order is completion
/// order. If any task fails, every result is still drained and the first
/// error received is returned.
pub(crate) fn fan_out<I, T, F, P>(
    inputs: &[I],
    threads: usize,
    task: F,
    on_progress: P,
) -> Result<Vec<T>, DiscoverError>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> Result<T, DiscoverError> + Sync,
    P: Fn(u64, u64) + Send,
{
    let total = inputs.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.clamp(1, total))
        .thread_name(|i| format!("scan-{i}"))
        .build()?;

    let (tx, rx) = crossbeam_channel::unbounded::<Result<T, DiscoverError>>();

    thread::scope(|scope| {
        let aggregator = scope.spawn(move || {
            let mut results = Vec::with_capacity(total);
            let mut first_error = None;

            for done in 1..=total {
                let Ok(result) = rx.recv() else {
                    break;
                };
                match result {
                    Ok(value) => results.push(value),
                    Err(e) => {
                        log::debug!("Scan task failed: {e}");
                        first_error.get_or_insert(e);
                    }
                }
                on_progress(done as u64, total as u64);
            }

            first_error.map_or(Ok(results), Err)
        });

        let task = &task;
        pool.scope(|s| {
            for input in inputs {
                let tx = tx.clone();
                s.spawn(move |_| {
                    // The aggregator only goes away after `total` results.
                    let _ = tx.send(task(input));
                });
            }
        });
        drop(tx);

        aggregator
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_fan_out_collects_every_result() {
        let inputs: Vec<u64> = (1..=20).collect();

        let mut results = fan_out(&inputs, 4, |n| Ok(n * 2), |_, _| {}).unwrap();
        results.sort_unstable();

        assert_eq!(results, (1..=20).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_fan_out_reports_each_completion() {
        let inputs = vec![1, 2, 3, 4, 5];
        let seen = Mutex::new(Vec::new());

        fan_out(&inputs, 2, |n| Ok(*n), |done, total| {
            seen.lock().unwrap().push((done, total));
        })
        .unwrap();

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen, (1..=5).map(|d| (d, 5)).collect::<Vec<_>>());
    }

    #[test]
    fn test_fan_out_respects_thread_bound() {
        let inputs: Vec<u32> = (0..16).collect();
        let running = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        fan_out(
            &inputs,
            3,
            |_| {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(5));
                running.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            },
            |_, _| {},
        )
        .unwrap();

        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_fan_out_waits_for_all_tasks_before_failing() {
        let inputs: Vec<u32> = (0..10).collect();
        let finished = AtomicUsize::new(0);
        let progress_calls = AtomicUsize::new(0);

        let err = fan_out(
            &inputs,
            4,
            |n| {
                finished.fetch_add(1, Ordering::SeqCst);
                if *n == 3 {
                    Err(DiscoverError::NoFileName(PathBuf::from("/")))
                } else {
                    Ok(*n)
                }
            },
            |_, _| {
                progress_calls.fetch_add(1, Ordering::SeqCst);
            },
        )
        .unwrap_err();

        assert!(matches!(err, DiscoverError::NoFileName(_)));
        assert_eq!(finished.load(Ordering::SeqCst), 10);
        assert_eq!(progress_calls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_fan_out_empty_input() {
        let inputs: Vec<u32> = Vec::new();
        let results = fan_out(&inputs, 4, |n| Ok(*n), |_, _| panic!("no progress")).unwrap();
        assert!(results.is_empty());
    }
}
