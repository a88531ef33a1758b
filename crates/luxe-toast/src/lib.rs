//! Notification manager for the event site.
//!
//! [`NotificationStore`] keeps the ordered list of visible notifications and
//! their countdowns; [`Toaster`] wraps it for async code, dismissing
//! notifications on time and publishing every change over a
//! [`tokio::sync::watch`] channel. [`Toaster::promise`] ties a notification
//! to the lifetime of a future.

pub mod clock;
pub mod countdown;
pub mod store;
pub mod toaster;

pub use clock::{Clock, ManualClock, TokioClock};
pub use store::NotificationStore;
pub use toaster::{PromiseMessages, Toaster};
