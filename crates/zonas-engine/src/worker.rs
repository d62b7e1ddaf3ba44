//! Dedicated worker thread with submit-and-wait semantics.
//!
//! Monitor geometry must sometimes be read from a thread with a
//! different DPI-awareness context than the engine thread, and that
//! context is per-thread and sticky. The engine keeps one long-lived
//! worker for those queries and blocks on each submission.

use std::sync::mpsc;
use std::thread;

type Job = Box<dyn FnOnce() + Send>;

pub struct Worker {
    tx: Option<mpsc::Sender<Job>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Worker {
    pub fn new(name: &str) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                for job in rx {
                    job();
                }
            })
            .ok();
        Self {
            tx: Some(tx),
            handle,
        }
    }

    /// Runs `f` on the worker thread and blocks until it returns.
    ///
    /// Returns `None` only if the worker thread is gone.
    pub fn submit_and_wait<T, F>(&self, f: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (result_tx, result_rx) = mpsc::channel();
        let job: Job = Box::new(move || {
            let _ = result_tx.send(f());
        });
        self.tx.as_ref()?.send(job).ok()?;
        result_rx.recv().ok()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
