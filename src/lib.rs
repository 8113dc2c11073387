//! # toastkit
//!
//! Toast notifications over a small retained document model.
//!
//! A notification renders itself into the document, slides in from its
//! corner, and leaves when the user closes or cancels it or when its
//! progress countdown runs out. The same document hosts two peripheral
//! widgets: a key-value pair editor and an info tooltip.
//!
//! ## Core Systems
//!
//! - **[`notification`]**: configuration merge, corner placement, registry,
//!   instances and the progress countdown
//! - **[`dom`]**: slotmap-backed document arena, queries, markup sniffing
//! - **[`scheduler`]**: virtual clock with animation-frame and timeout queues
//! - **[`event`]**: click listeners and custom events
//! - **[`app`]**: the UI root tying everything together
//! - **[`widgets`]**: KvPairs, InfoBubble
//! - **[`locale`]**: picking between default and alternate strings
//! - **[`geometry`]**: lengths, edges, placements
//! - **[`testing`]**: headless Pilot and document snapshots
//!
//! ```
//! use toastkit::app::App;
//! use toastkit::notification::NotificationProps;
//!
//! let app = App::new_headless();
//! let toast = app.notify(
//!     NotificationProps::new()
//!         .title("Upload")
//!         .content("Finished")
//!         .cancel("Dismiss")
//!         .on_cancel(|_: &App| {}),
//! );
//! app.advance(10.0);
//! assert_eq!(app.live_count(), 1);
//! if let Some(button) = toast.cancel_button() {
//!     app.click(button);
//! }
//! assert_eq!(app.live_count(), 0);
//! ```

// Foundation
pub mod error;
pub mod geometry;
pub mod locale;

// Core systems
pub mod dom;
pub mod event;
pub mod scheduler;

// Widgets
pub mod notification;
pub mod widgets;

// Application
pub mod app;

// Headless testing
pub mod testing;

pub use app::{App, AppConfig};
pub use error::{Result, ToastError};
