//! Thread-spawning seam.
//!
//! The dispatch and monitor threads are started through this trait so the
//! engine never names a concrete threading implementation and tests can
//! substitute their own.

use std::thread;

pub trait Scheduler {
    fn spawn<F>(&self, name: &str, f: F)
    where
        F: FnOnce() + Send + 'static;
}

pub struct ThreadScheduler;

impl ThreadScheduler {
    pub fn new() -> Self {
        ThreadScheduler
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ThreadScheduler {
    fn spawn<F>(&self, name: &str, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let _ = thread::Builder::new().name(name.to_string()).spawn(f);
    }
}
