//! Notification configuration: partial props merged onto defaults.
//!
//! [`NotificationProps`] records only what the caller set. Merging it onto a
//! [`NotificationConfig`] overrides exactly those fields, including ones set to
//! an "empty" value such as [`no_title`](NotificationProps::no_title) or
//! `progress(false)`. Unset fields keep their defaults.

use std::fmt;
use std::rc::Rc;

use super::position::Corner;
use crate::app::App;
use crate::error::{Result, ToastError};

/// A button callback. Receives the app so it can act on it without capturing it.
pub type Callback = Rc<dyn Fn(&App)>;

/// Default lifetime of a progress countdown.
pub const DEFAULT_DURATION_MS: u32 = 3000;

/// Reject durations that are not strictly positive.
pub fn validate_duration(ms: u32) -> Result<u32> {
    if ms == 0 {
        Err(ToastError::InvalidDuration(ms))
    } else {
        Ok(ms)
    }
}

// ---------------------------------------------------------------------------
// NotificationConfig
// ---------------------------------------------------------------------------

/// Fully resolved notification settings.
#[derive(Clone)]
pub struct NotificationConfig {
    /// Resting corner. `None` when the caller named a corner that does not
    /// exist; the toast then gets no placement at all.
    pub position: Option<Corner>,
    pub title: Option<String>,
    pub localized_title: Option<String>,
    pub content: Option<String>,
    pub localized_content: Option<String>,
    pub close_enabled: bool,
    pub progress_enabled: bool,
    pub duration_ms: u32,
    pub confirm_label: Option<String>,
    pub localized_confirm_label: Option<String>,
    pub cancel_label: Option<String>,
    pub localized_cancel_label: Option<String>,
    pub on_confirm: Option<Callback>,
    pub on_cancel: Option<Callback>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            position: Some(Corner::BottomRight),
            title: Some("Notification Title".to_owned()),
            localized_title: None,
            content: Some("Notification Content".to_owned()),
            localized_content: None,
            close_enabled: true,
            progress_enabled: false,
            duration_ms: DEFAULT_DURATION_MS,
            confirm_label: None,
            localized_confirm_label: None,
            cancel_label: None,
            localized_cancel_label: None,
            on_confirm: None,
            on_cancel: None,
        }
    }
}

impl NotificationConfig {
    /// Defaults with a different countdown duration.
    pub fn with_duration(duration_ms: u32) -> Self {
        Self::default().merge(NotificationProps::new().duration_ms(duration_ms))
    }

    /// Shallow merge: every field set on `props` replaces the current value.
    pub fn merge(mut self, props: NotificationProps) -> Self {
        if let Some(position) = props.position {
            self.position = position;
        }
        if let Some(title) = props.title {
            self.title = title;
        }
        if let Some(title) = props.localized_title {
            self.localized_title = Some(title);
        }
        if let Some(content) = props.content {
            self.content = content;
        }
        if let Some(content) = props.localized_content {
            self.localized_content = Some(content);
        }
        if let Some(close) = props.close_enabled {
            self.close_enabled = close;
        }
        if let Some(progress) = props.progress_enabled {
            self.progress_enabled = progress;
        }
        if let Some(ms) = props.duration_ms {
            match validate_duration(ms) {
                Ok(ms) => self.duration_ms = ms,
                Err(err) => {
                    tracing::warn!(%err, keep = self.duration_ms, "rejected notification duration")
                }
            }
        }
        if let Some(label) = props.confirm_label {
            self.confirm_label = label;
        }
        if let Some(label) = props.localized_confirm_label {
            self.localized_confirm_label = Some(label);
        }
        if let Some(label) = props.cancel_label {
            self.cancel_label = label;
        }
        if let Some(label) = props.localized_cancel_label {
            self.localized_cancel_label = Some(label);
        }
        if let Some(cb) = props.on_confirm {
            self.on_confirm = Some(cb);
        }
        if let Some(cb) = props.on_cancel {
            self.on_cancel = Some(cb);
        }
        self
    }
}

impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("position", &self.position)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("close_enabled", &self.close_enabled)
            .field("progress_enabled", &self.progress_enabled)
            .field("duration_ms", &self.duration_ms)
            .field("confirm_label", &self.confirm_label)
            .field("cancel_label", &self.cancel_label)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// NotificationProps
// ---------------------------------------------------------------------------

/// Caller-supplied settings. Every field starts unset.
#[derive(Clone, Default)]
pub struct NotificationProps {
    position: Option<Option<Corner>>,
    title: Option<Option<String>>,
    localized_title: Option<String>,
    content: Option<Option<String>>,
    localized_content: Option<String>,
    close_enabled: Option<bool>,
    progress_enabled: Option<bool>,
    duration_ms: Option<u32>,
    confirm_label: Option<Option<String>>,
    localized_confirm_label: Option<String>,
    cancel_label: Option<Option<String>>,
    localized_cancel_label: Option<String>,
    on_confirm: Option<Callback>,
    on_cancel: Option<Callback>,
}

impl NotificationProps {
    /// Empty props: merging them changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rest in `corner`.
    pub fn position(mut self, corner: Corner) -> Self {
        self.position = Some(Some(corner));
        self
    }

    /// Rest in the corner called `name`. An unknown name is logged and
    /// leaves the toast without any placement.
    pub fn position_name(mut self, name: &str) -> Self {
        let corner = match name.parse::<Corner>() {
            Ok(corner) => Some(corner),
            Err(err) => {
                tracing::warn!(%err, "notification will not be positioned");
                None
            }
        };
        self.position = Some(corner);
        self
    }

    /// Title text or markup.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    /// Render without a title block.
    pub fn no_title(mut self) -> Self {
        self.title = Some(None);
        self
    }

    /// Title shown in the alternate locale.
    pub fn localized_title(mut self, title: impl Into<String>) -> Self {
        self.localized_title = Some(title.into());
        self
    }

    /// Content text or markup.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(Some(content.into()));
        self
    }

    /// Render without a content block.
    pub fn no_content(mut self) -> Self {
        self.content = Some(None);
        self
    }

    /// Content shown in the alternate locale.
    pub fn localized_content(mut self, content: impl Into<String>) -> Self {
        self.localized_content = Some(content.into());
        self
    }

    /// Whether to render the close control.
    pub fn close(mut self, enabled: bool) -> Self {
        self.close_enabled = Some(enabled);
        self
    }

    /// Whether to render the progress track.
    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress_enabled = Some(enabled);
        self
    }

    /// Countdown duration in milliseconds. Zero is rejected at merge time.
    pub fn duration_ms(mut self, ms: u32) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Render a confirm button with `label`.
    pub fn confirm(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(Some(label.into()));
        self
    }

    /// Render no confirm button.
    pub fn no_confirm(mut self) -> Self {
        self.confirm_label = Some(None);
        self
    }

    /// Confirm label shown in the alternate locale.
    pub fn localized_confirm(mut self, label: impl Into<String>) -> Self {
        self.localized_confirm_label = Some(label.into());
        self
    }

    /// Render a cancel button with `label`.
    pub fn cancel(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(Some(label.into()));
        self
    }

    /// Render no cancel button.
    pub fn no_cancel(mut self) -> Self {
        self.cancel_label = Some(None);
        self
    }

    /// Cancel label shown in the alternate locale.
    pub fn localized_cancel(mut self, label: impl Into<String>) -> Self {
        self.localized_cancel_label = Some(label.into());
        self
    }

    /// Called when the confirm countdown completes.
    pub fn on_confirm(mut self, callback: impl Fn(&App) + 'static) -> Self {
        self.on_confirm = Some(Rc::new(callback));
        self
    }

    /// Called when the cancel button is clicked.
    pub fn on_cancel(mut self, callback: impl Fn(&App) + 'static) -> Self {
        self.on_cancel = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for NotificationProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationProps")
            .field("position", &self.position)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("close_enabled", &self.close_enabled)
            .field("progress_enabled", &self.progress_enabled)
            .field("duration_ms", &self.duration_ms)
            .field("confirm_label", &self.confirm_label)
            .field("cancel_label", &self.cancel_label)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish_non_exhaustive()
    }
}
