//! Notifications: configuration, placement, registry, instances and the
//! progress countdown.
//!
//! Create one with [`App::notify`](crate::app::App::notify):
//!
//! ```
//! use toastkit::app::App;
//! use toastkit::notification::{Corner, NotificationProps};
//!
//! let app = App::new_headless();
//! let toast = app.notify(
//!     NotificationProps::new()
//!         .position(Corner::TopRight)
//!         .content("<b>Saved</b>")
//!         .progress(true)
//!         .duration_ms(500),
//! );
//! app.advance(250.0);
//! assert_eq!(toast.fraction(), 0.5);
//! app.advance(250.0);
//! assert!(!toast.is_live());
//! ```

pub mod config;
pub mod instance;
pub mod position;
pub mod progress;
pub mod registry;

pub use config::{Callback, NotificationConfig, NotificationProps, DEFAULT_DURATION_MS};
pub use instance::{apply_placement, InstanceNodes, NotificationHandle};
pub use position::{Corner, PositionPolicy, DEFAULT_MARGIN};
pub use progress::{progress_fraction, remaining_width, ProgressAnimator};
pub use registry::{LiveInstance, Registry};
