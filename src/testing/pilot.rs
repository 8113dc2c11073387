//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`](crate::app::App) and provides methods to
//! simulate user input (clicks, typing), move the virtual clock, and
//! serialize the document for snapshot testing.

use crate::app::{App, AppConfig};
use crate::dom::node::NodeId;
use crate::locale::{FixedLocale, Locale};
use crate::notification::{NotificationHandle, NotificationProps};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```
/// use toastkit::notification::NotificationProps;
/// use toastkit::testing::Pilot;
///
/// let pilot = Pilot::new();
/// pilot.notify(NotificationProps::new().content("Saved"));
/// assert!(pilot.click_class("notification-close"));
/// assert_eq!(pilot.app().live_count(), 0);
/// ```
pub struct Pilot {
    app: App,
}

impl Pilot {
    /// English app with default configuration.
    pub fn new() -> Self {
        Self {
            app: App::new_headless(),
        }
    }

    /// Default configuration in `locale`.
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            app: App::with_locale(locale),
        }
    }

    /// Create a Pilot from an [`AppConfig`].
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            app: App::new(config, &FixedLocale(Locale::EN)),
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Show a notification.
    pub fn notify(&self, props: NotificationProps) -> NotificationHandle {
        self.app.notify(props)
    }

    /// Click `node`.
    pub fn click(&self, node: NodeId) -> bool {
        self.app.click(node)
    }

    /// Click the first attached node carrying `class`. `false` if there is
    /// none or nothing listened.
    pub fn click_class(&self, class: &str) -> bool {
        let target = self.app.document().query_by_class(class).first().copied();
        target.is_some_and(|node| self.app.click(node))
    }

    /// Set the value of an input node.
    pub fn type_into(&self, node: NodeId, value: &str) -> bool {
        self.app.input(node, value)
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Advance the clock by `ms` and run one frame.
    pub fn advance(&self, ms: f64) {
        self.app.advance(ms);
    }

    /// Run frames of `frame_ms` until `total_ms` has elapsed. The last frame
    /// is shortened to land exactly on `total_ms`.
    pub fn run_for(&self, total_ms: f64, frame_ms: f64) {
        if frame_ms <= 0.0 {
            self.app.advance(total_ms);
            return;
        }
        let mut elapsed = 0.0;
        while elapsed < total_ms {
            let step = frame_ms.min(total_ms - elapsed);
            self.app.advance(step);
            elapsed += step;
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the underlying app.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// The document serialized with [`document_to_string`](super::document_to_string).
    pub fn html(&self) -> String {
        super::snapshot::document_to_string(&self.app.document())
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
