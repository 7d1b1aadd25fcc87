//! Breathe: a guided breathing session
//!
//! A session alternates inhale and exhale phases of fixed length for a
//! number of cycles. A one-second clock drives the session controller,
//! which publishes every change to the UI and any other observer.
//! Ambient sound plays while the window is focused and the user has not
//! muted it.

pub mod audio;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod testconfig;
pub mod ui;

pub use clock::{Clock, IntervalClock, ManualClock, ManualTicker, TickSink};
pub use config::BreatheConfig;
pub use controller::{ObserverId, SessionController, SessionEvent, SessionObserver, SessionRun};
pub use error::{BreatheError, Result};
pub use session::{advance, step, Phase, SessionParams, SessionState, Transition};
