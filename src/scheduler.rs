//! Virtual clock with animation-frame and deferred-task queues.
//!
//! The scheduler only stores work; [`App::advance`](crate::app::App::advance)
//! takes due callbacks out and runs them after releasing its own borrow, so a
//! callback is free to schedule more work or touch the document.
//!
//! Ordering within one `advance`:
//! 1. the clock moves forward,
//! 2. due timeouts run in (due time, insertion) order,
//! 3. every frame callback queued before this frame runs with `now` as its
//!    timestamp. Frames requested during step 3 wait for the next frame.

use crate::app::App;

/// Frame callback; receives the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(&App, f64)>;

/// Deferred task callback.
pub type TimerCallback = Box<dyn FnOnce(&App)>;

struct Timer {
    due: f64,
    seq: u64,
    callback: TimerCallback,
}

/// Pending frame callbacks, pending timeouts and the current time.
pub struct Scheduler {
    now: f64,
    frames: Vec<FrameCallback>,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    /// A scheduler at time zero with nothing queued.
    pub fn new() -> Self {
        Self {
            now: 0.0,
            frames: Vec::new(),
            timers: Vec::new(),
            next_seq: 0,
        }
    }

    /// Current time in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Queue `callback` for the next animation frame.
    pub fn request_animation_frame(&mut self, callback: FrameCallback) {
        self.frames.push(callback);
    }

    /// Queue `callback` to run once `delay_ms` has elapsed. Negative delays
    /// are treated as zero.
    pub fn set_timeout(&mut self, delay_ms: f64, callback: TimerCallback) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            due: self.now + delay_ms.max(0.0),
            seq,
            callback,
        });
    }

    /// Move the clock forward. Negative deltas are ignored.
    pub fn advance_clock(&mut self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now += delta_ms;
        }
    }

    /// Remove and return every timeout due at the current time, in order.
    pub fn take_due_timers(&mut self) -> Vec<TimerCallback> {
        let now = self.now;
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|t| t.callback).collect()
    }

    /// Remove and return every queued frame callback.
    pub fn take_frames(&mut self) -> Vec<FrameCallback> {
        std::mem::take(&mut self.frames)
    }

    /// Number of queued frame callbacks.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of queued timeouts.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.frames.is_empty() && self.timers.is_empty()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
