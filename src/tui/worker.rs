//! Background worker for blocking network calls.
//!
//! The TUI main loop must keep redrawing while a request is in flight, so
//! every prediction, health probe and feedback send runs on its own thread
//! and reports back over a channel that the loop polls once per frame.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

/// Progress updates from a worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerProgress<T> {
    /// Job picked up; the blocking call is about to start
    Started,
    /// Job finished with its outcome
    Complete(T),
    /// Worker ended without reporting an outcome (panicked)
    Lost,
}

/// Handle to a running worker.
pub struct WorkerHandle<T> {
    progress_rx: Receiver<WorkerProgress<T>>,
    _handle: JoinHandle<()>,
}

impl<T> WorkerHandle<T> {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<WorkerProgress<T>> {
        match self.progress_rx.try_recv() {
            Ok(progress) => Some(progress),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(WorkerProgress::Lost),
        }
    }
}

/// Spawns jobs onto background threads.
pub struct Worker;

impl Worker {
    /// Run `job` on a new thread.
    pub fn spawn<T, F>(job: F) -> WorkerHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let _ = tx.send(WorkerProgress::Started);
            let outcome = job();
            let _ = tx.send(WorkerProgress::Complete(outcome));
        });

        WorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_outcome<T>(handle: &WorkerHandle<T>) -> WorkerProgress<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            match handle.try_recv() {
                Some(WorkerProgress::Started) | None => thread::sleep(Duration::from_millis(5)),
                Some(done) => return done,
            }
        }
        panic!("worker did not finish");
    }

    #[test]
    fn test_reports_outcome() {
        let handle = Worker::spawn(|| 6 * 7);
        assert_eq!(wait_for_outcome(&handle), WorkerProgress::Complete(42));
    }

    #[test]
    fn test_panicking_job_is_lost() {
        let handle = Worker::spawn(|| -> u8 { panic!("job failed") });
        assert_eq!(wait_for_outcome(&handle), WorkerProgress::Lost);
    }
}
