use crossbeam_channel::{bounded, unbounded};
use std::thread;

/// Number of workers for `jobs` jobs when at most `max_threads` may run;
/// 0 means no limit.
pub fn worker_count(max_threads: usize, jobs: usize) -> usize {
    let workers = if max_threads == 0 || max_threads > jobs {
        jobs
    } else {
        max_threads
    };
    workers.max(1)
}

/// Runs `work` over `jobs` on at most `max_threads` threads and returns the
/// results in job order.
pub fn run_bounded<J, T, F>(jobs: Vec<J>, max_threads: usize, work: F) -> Vec<T>
where
    J: Send,
    T: Send,
    F: Fn(J) -> T + Sync,
{
    let total = jobs.len();
    let workers = worker_count(max_threads, total);
    let (job_tx, job_rx) = bounded::<(usize, J)>(workers * 2);
    let (result_tx, result_rx) = unbounded::<(usize, T)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let work = &work;
            scope.spawn(move || {
                while let Ok((idx, job)) = job_rx.recv() {
                    if result_tx.send((idx, work(job))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        for job in jobs.into_iter().enumerate() {
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx);
    });

    let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
    for (idx, result) in result_rx.iter() {
        slots[idx] = Some(result);
    }
    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn worker_count_is_bounded_by_jobs() {
        assert_eq!(worker_count(0, 3), 3);
        assert_eq!(worker_count(8, 3), 3);
        assert_eq!(worker_count(2, 3), 2);
        assert_eq!(worker_count(0, 0), 1);
    }

    #[test]
    fn results_keep_job_order() {
        let results = run_bounded((0..20).collect(), 3, |n: u32| n * 2);
        assert_eq!(results, (0..20).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn never_exceeds_thread_limit() {
        let running = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        run_bounded((0..12).collect::<Vec<u32>>(), 2, |_| {
            let now = running.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(5));
            running.fetch_sub(1, Ordering::SeqCst);
        });
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
