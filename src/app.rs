//! App struct: the UI root owning document, registry, scheduler and locale.
//!
//! [`App`] is a cheap, clonable handle to shared single-threaded state. Every
//! callback the crate stores (click handlers, frame and timeout callbacks,
//! notification callbacks) receives `&App` and runs with no borrow of that
//! state held, so it may freely notify, remove, click or schedule.
//!
//! [`App::new_headless`] gives an English app with default settings, which is
//! what tests use.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::dom::node::NodeId;
use crate::dom::tree::Document;
use crate::event::handler::EventDispatcher;
use crate::event::message::Envelope;
use crate::locale::{FixedLocale, Locale, LocaleSource};
use crate::notification::config::{NotificationConfig, NotificationProps, DEFAULT_DURATION_MS};
use crate::notification::instance::{self, NotificationHandle};
use crate::notification::position::{PositionPolicy, DEFAULT_MARGIN};
use crate::notification::registry::{LiveInstance, Registry};
use crate::scheduler::{FrameCallback, Scheduler, TimerCallback};
use crate::widgets::info_bubble::InfoBubble;
use crate::widgets::kv_pairs::KvPairs;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Distance between a resting toast and the screen edges, in pixels.
    pub margin: f32,
    /// Delay before a new toast slides in, in milliseconds.
    pub entrance_delay_ms: f64,
    /// Target frames per second for [`App::run`].
    pub fps: u32,
    /// Countdown duration used when a notification does not set one.
    pub default_duration_ms: u32,
    /// Confirm button label while a countdown runs.
    pub pause_label: String,
    /// Same, in the alternate locale.
    pub localized_pause_label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            entrance_delay_ms: 10.0,
            fps: 60,
            default_duration_ms: DEFAULT_DURATION_MS,
            pause_label: "pause".to_owned(),
            localized_pause_label: "暂停".to_owned(),
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edge margin (builder).
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the entrance delay (builder).
    pub fn with_entrance_delay_ms(mut self, delay: f64) -> Self {
        self.entrance_delay_ms = delay;
        self
    }

    /// Set the target FPS (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the default countdown duration (builder). Zero is ignored.
    pub fn with_default_duration_ms(mut self, ms: u32) -> Self {
        match crate::notification::config::validate_duration(ms) {
            Ok(ms) => self.default_duration_ms = ms,
            Err(err) => tracing::warn!(%err, "keeping default notification duration"),
        }
        self
    }

    /// Set the pause label pair (builder).
    pub fn with_pause_label(mut self, label: impl Into<String>, localized: impl Into<String>) -> Self {
        self.pause_label = label.into();
        self.localized_pause_label = localized.into();
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub(crate) struct Shared {
    pub document: Document,
    pub registry: Registry,
    pub scheduler: Scheduler,
    pub locale: Locale,
    pub config: AppConfig,
    pub policy: PositionPolicy,
}

/// The application root.
///
/// Clones share the same document; there is exactly one notification
/// registry per document.
#[derive(Clone)]
pub struct App {
    shared: Rc<RefCell<Shared>>,
}

impl App {
    /// Create an app reading its locale from `locale`.
    pub fn new(config: AppConfig, locale: &dyn LocaleSource) -> Self {
        let locale = locale.locale();
        tracing::debug!(%locale, fps = config.fps, "app created");
        Self {
            shared: Rc::new(RefCell::new(Shared {
                document: Document::new(),
                registry: Registry::new(),
                scheduler: Scheduler::new(),
                locale,
                policy: PositionPolicy::new(config.margin),
                config,
            })),
        }
    }

    /// Create an English app with default configuration.
    pub fn new_headless() -> Self {
        Self::new(AppConfig::default(), &FixedLocale(Locale::EN))
    }

    /// Create an app with default configuration in `locale`.
    pub fn with_locale(locale: Locale) -> Self {
        Self::new(AppConfig::default(), &FixedLocale(locale))
    }

    pub(crate) fn state(&self) -> Ref<'_, Shared> {
        self.shared.borrow()
    }

    pub(crate) fn state_mut(&self) -> RefMut<'_, Shared> {
        self.shared.borrow_mut()
    }

    /// The ambient locale.
    pub fn locale(&self) -> Locale {
        self.state().locale
    }

    /// Change the ambient locale. Affects widgets created afterwards.
    pub fn set_locale(&self, locale: Locale) {
        self.state_mut().locale = locale;
    }

    /// A copy of the configuration.
    pub fn config(&self) -> AppConfig {
        self.state().config.clone()
    }

    /// Read access to the document.
    ///
    /// Drop the guard before clicking or advancing.
    pub fn document(&self) -> Ref<'_, Document> {
        Ref::map(self.state(), |s| &s.document)
    }

    // ── Scheduling ──────────────────────────────────────────────────

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> f64 {
        self.state().scheduler.now()
    }

    /// Queue `callback` for the next frame.
    pub fn request_animation_frame(&self, callback: FrameCallback) {
        self.state_mut().scheduler.request_animation_frame(callback);
    }

    /// Queue `callback` to run after `delay_ms`.
    pub fn set_timeout(&self, delay_ms: f64, callback: TimerCallback) {
        self.state_mut().scheduler.set_timeout(delay_ms, callback);
    }

    /// Move the clock forward by `delta_ms`, run due timeouts, then run one
    /// frame stamped with the new time.
    pub fn advance(&self, delta_ms: f64) {
        let timers = {
            let mut state = self.state_mut();
            state.scheduler.advance_clock(delta_ms);
            state.scheduler.take_due_timers()
        };
        for timer in timers {
            timer(self);
        }

        let (timestamp, frames) = {
            let mut state = self.state_mut();
            (state.scheduler.now(), state.scheduler.take_frames())
        };
        for frame in frames {
            frame(self, timestamp);
        }
    }

    /// Whether any frame or timeout is still queued.
    pub fn has_pending_work(&self) -> bool {
        !self.state().scheduler.is_idle()
    }

    /// Drive the scheduler from wall-clock time at the configured frame rate
    /// until nothing is queued.
    pub async fn run(&self) {
        let fps = self.config().fps.max(1);
        let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();
        let mut frames = 0u64;
        while self.has_pending_work() {
            ticker.tick().await;
            let now = Instant::now();
            self.advance(now.duration_since(last).as_secs_f64() * 1000.0);
            last = now;
            frames += 1;
        }
        tracing::debug!(frames, "app idle");
    }

    // ── Notifications ───────────────────────────────────────────────

    /// Show a notification built from `props` merged onto the defaults.
    pub fn notify(&self, props: NotificationProps) -> NotificationHandle {
        let defaults = NotificationConfig::with_duration(self.state().config.default_duration_ms);
        instance::create(self, defaults.merge(props))
    }

    /// Remove every live notification and reset identities.
    pub fn destroy_all(&self) {
        let mut guard = self.state_mut();
        let state = &mut *guard;
        state.registry.clear_all(&mut state.document);
    }

    /// Number of live notifications.
    pub fn live_count(&self) -> usize {
        self.state().registry.len()
    }

    /// Identities of live notifications, oldest first.
    pub fn identities(&self) -> Vec<u64> {
        self.state().registry.identities()
    }

    pub(crate) fn is_registered(&self, instance: LiveInstance) -> bool {
        self.state().registry.contains(instance)
    }

    /// Unregister `instance` and remove its root. No-op if already gone.
    pub(crate) fn remove_instance(&self, instance: LiveInstance) {
        let mut state = self.state_mut();
        state.registry.unregister_instance(instance);
        state.document.remove(instance.root);
    }

    // ── Peripheral widgets ──────────────────────────────────────────

    /// Mount a key-value editor named `name`.
    pub fn kv_pairs(&self, name: &str) -> KvPairs {
        KvPairs::mount(self, name)
    }

    /// Mount an info tooltip linking `url`.
    pub fn info_bubble(&self, url: &str) -> InfoBubble {
        InfoBubble::mount(self, url)
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Click `node`: every click listener on the node and its ancestors runs,
    /// innermost first. Returns whether any listener ran.
    pub fn click(&self, node: NodeId) -> bool {
        let path = EventDispatcher::bubble_path(&self.document(), node);
        let mut handled = false;
        for target in path {
            // A previous listener may have removed this node.
            let handler = self.document().click_handler(target);
            if let Some(handler) = handler {
                handler(self);
                handled = true;
            }
        }
        handled
    }

    /// Type `value` into an input node. `false` if the node is gone.
    pub fn input(&self, node: NodeId, value: &str) -> bool {
        self.state_mut().document.set_attribute(node, "value", value)
    }

    /// Drain queued custom events, oldest first.
    ///
    /// Events such as [`PairDeleted`](crate::event::PairDeleted) stay queued
    /// until drained. Embedders should call this after handling input; once
    /// [`MAX_PENDING_EVENTS`](crate::event::handler::MAX_PENDING_EVENTS) are
    /// queued, each new event drops the oldest.
    pub fn drain_events(&self) -> Vec<Envelope> {
        self.state_mut().document.drain_events()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("App")
            .field("locale", &state.locale)
            .field("now", &state.scheduler.now())
            .field("live", &state.registry.len())
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
