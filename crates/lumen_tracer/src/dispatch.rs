//! Lock-free work distribution across a fixed set of render threads.
//!
//! Workers share one cursor and claim indices with compare-and-swap until
//! the cursor reaches the end, so every index is handed out exactly once
//! and no lock is held while claiming.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use crate::{RenderError, RenderResult};

/// Shared cursor over `0..end`.
#[derive(Debug)]
pub struct WorkCursor {
    next: AtomicUsize,
    end: usize,
}

impl WorkCursor {
    /// Cursor positioned at 0.
    pub fn new(end: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            end,
        }
    }

    /// Rewind to 0 before a new pass.
    pub fn reset(&self) {
        self.next.store(0, Ordering::SeqCst);
    }

    /// Next index that has not been handed out yet.
    pub fn position(&self) -> usize {
        self.next.load(Ordering::Acquire)
    }

    /// One past the last index.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Claim the next index, or `None` once all are taken.
    pub fn claim(&self) -> Option<usize> {
        let mut current = self.next.load(Ordering::Relaxed);
        loop {
            if current >= self.end {
                return None;
            }
            match self.next.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Some(current),
                Err(actual) => current = actual,
            }
        }
    }
}

/// Run `num_threads` workers until `cursor` is exhausted.
///
/// `make_worker` is called once on each thread with the thread index and
/// returns the closure that processes claimed indices. The first error a
/// worker returns stops all workers from claiming further work. Every
/// spawned thread is joined before this returns.
///
/// Returns the number of indices each worker processed.
pub fn dispatch<F, W>(cursor: &WorkCursor, num_threads: usize, make_worker: F) -> RenderResult<Vec<usize>>
where
    F: Fn(usize) -> W + Sync,
    W: FnMut(usize) -> RenderResult<()>,
{
    let abort = AtomicBool::new(false);
    let make_worker = &make_worker;
    let abort_ref = &abort;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(num_threads);
        let mut spawn_error = None;

        for index in 0..num_threads {
            let spawned = thread::Builder::new()
                .name(format!("lumen-worker-{index}"))
                .spawn_scoped(scope, move || {
                    let mut work = make_worker(index);
                    let mut claimed = 0usize;

                    while !abort_ref.load(Ordering::Relaxed) {
                        let Some(item) = cursor.claim() else { break };
                        if let Err(err) = work(item) {
                            abort_ref.store(true, Ordering::Relaxed);
                            return Err(err);
                        }
                        claimed += 1;
                    }

                    log::debug!("Worker {index} processed {claimed} items");
                    Ok(claimed)
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    log::error!("Failed to spawn worker {index}: {err}");
                    abort.store(true, Ordering::Relaxed);
                    spawn_error = Some(err);
                    break;
                }
            }
        }

        let mut counts = Vec::with_capacity(handles.len());
        let mut first_error = None;
        for handle in handles {
            match handle.join() {
                Ok(Ok(claimed)) => counts.push(claimed),
                Ok(Err(err)) => {
                    first_error.get_or_insert(err);
                }
                Err(_) => {
                    first_error.get_or_insert(RenderError::WorkerPanicked);
                }
            }
        }

        if let Some(err) = spawn_error {
            return Err(RenderError::ThreadSpawn(err));
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(counts),
        }
    })
}
