//! Progress countdown driven by animation frames.
//!
//! Each tick recomputes the elapsed fraction from the frame timestamp and
//! the instance's carry offset, shrinks the bar, and either asks for another
//! frame or stops. The tick is the only place that looks at the pause flag:
//! a paused instance just stops rescheduling, and the elapsed time of the
//! stopped session is folded into the carry offset so the next session picks
//! up at the same fraction.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::config::Callback;
use super::instance::InstanceState;
use crate::app::App;

/// `clamp((timestamp + carry - start) / duration, 0, 1)`.
pub fn progress_fraction(timestamp: f64, carry_ms: f64, start_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ((timestamp + carry_ms - start_ms) / duration_ms).clamp(0.0, 1.0)
}

/// CSS width of the remaining part of the bar.
pub fn remaining_width(fraction: f64) -> String {
    format!("{}%", (1.0 - fraction) * 100.0)
}

/// One countdown session for one notification.
///
/// A new animator is created every time a countdown (re)starts; continuity
/// lives in the instance's carry offset, not here.
pub struct ProgressAnimator {
    state: Rc<RefCell<InstanceState>>,
    on_complete: Callback,
    start_ms: f64,
    completed: Cell<bool>,
}

impl ProgressAnimator {
    /// Start a session at the current time and request its first frame.
    pub(crate) fn start(
        app: &App,
        state: Rc<RefCell<InstanceState>>,
        on_complete: Callback,
    ) -> Rc<Self> {
        let start_ms = app.now();
        {
            let mut st = state.borrow_mut();
            st.session_live = true;
            st.countdown = Some(Rc::clone(&on_complete));
            tracing::trace!(identity = st.identity, carry_ms = st.carry_ms, "countdown started");
        }
        let animator = Rc::new(Self {
            state,
            on_complete,
            start_ms,
            completed: Cell::new(false),
        });
        Self::schedule(app, &animator);
        animator
    }

    fn schedule(app: &App, this: &Rc<Self>) {
        let this = Rc::clone(this);
        app.request_animation_frame(Box::new(move |app: &App, timestamp: f64| {
            Self::step(&this, app, timestamp)
        }));
    }

    fn step(this: &Rc<Self>, app: &App, timestamp: f64) {
        if this.completed.get() {
            return;
        }

        let instance = this.state.borrow().live_instance();
        if !app.is_registered(instance) {
            // Removed before completion: abandon the session.
            this.state.borrow_mut().session_live = false;
            tracing::trace!(identity = instance.identity, "countdown abandoned");
            return;
        }

        let (fraction, bar, reschedule) = {
            let mut st = this.state.borrow_mut();
            let fraction =
                progress_fraction(timestamp, st.carry_ms, this.start_ms, st.duration_ms);
            st.fraction = fraction;
            let reschedule = fraction < 1.0 && !st.paused;
            if !reschedule {
                st.carry_ms = timestamp + st.carry_ms - this.start_ms;
                st.session_live = false;
            }
            if fraction >= 1.0 {
                st.paused = true;
                st.carry_ms = 0.0;
            } else if !reschedule {
                tracing::trace!(identity = st.identity, fraction, "countdown paused");
            }
            (fraction, st.progress_bar, reschedule)
        };

        if let Some(bar) = bar {
            app.state_mut()
                .document
                .set_style(bar, "width", remaining_width(fraction));
        }

        if reschedule {
            Self::schedule(app, this);
        }

        if fraction >= 1.0 {
            this.completed.set(true);
            tracing::debug!(identity = instance.identity, "countdown completed");
            (this.on_complete)(app);
            app.remove_instance(instance);
        }
    }
}
