//! Input debouncing on top of gloo timers.

use gloo_timers::callback::Timeout;

/// Runs only the last scheduled callback once `delay_ms` passes quietly
pub struct Debouncer {
    delay_ms: u32,
    pending: Option<Timeout>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms, pending: None }
    }

    pub fn call<F>(&mut self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        // Replacing the Timeout drops, and so clears, the previous one
        self.pending = Some(Timeout::new(self.delay_ms, callback));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
