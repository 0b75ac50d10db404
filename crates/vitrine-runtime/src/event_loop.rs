//! Event Loop Implementation
//!
//! setInterval style timers on a virtual clock.

/// Timer handle returned by `set_interval`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

/// Pending interval
#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    payload: T,
    delay_ms: u64,
    due_at: u64,
}

/// Event loop
#[derive(Debug)]
pub struct EventLoop<T> {
    /// Pending timers
    timers: Vec<Timer<T>>,
    /// Next timer ID
    next_timer_id: u32,
    /// Current timestamp (ms)
    current_time: u64,
}

impl<T> Default for EventLoop<T> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_timer_id: 1,
            current_time: 0,
        }
    }
}

impl<T: Clone> EventLoop<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.current_time
    }

    /// Run `payload` every `delay_ms` (at least 1ms), first firing one full
    /// period from now
    pub fn set_interval(&mut self, payload: T, delay_ms: u64) -> TimerId {
        let delay_ms = delay_ms.max(1);
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        self.timers.push(Timer {
            id,
            payload,
            delay_ms,
            due_at: self.current_time + delay_ms,
        });
        tracing::trace!("Interval {:?} every {}ms from t={}", id, delay_ms, self.current_time);
        id
    }

    /// Clear an interval; returns false if it was not pending
    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Payload of the next timer due at or before `deadline`
    ///
    /// The earliest due timer fires and the clock jumps to its due time; it
    /// is rescheduled one period after that due time so its cadence never
    /// drifts. With nothing due the clock moves to `deadline` and `None` is
    /// returned.
    pub fn next_ready(&mut self, deadline: u64) -> Option<T> {
        let Some(timer) = self
            .timers
            .iter_mut()
            .filter(|t| t.due_at <= deadline)
            .min_by_key(|t| (t.due_at, t.id))
        else {
            self.current_time = self.current_time.max(deadline);
            return None;
        };

        self.current_time = self.current_time.max(timer.due_at);
        timer.due_at += timer.delay_ms;
        Some(timer.payload.clone())
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
