//! Breath-cycle session state machine
//!
//! A session alternates inhale and exhale phases of equal length and counts
//! down a number of cycles. The transition function is pure; the
//! [`SessionController`](crate::controller::SessionController) is the only
//! place that stores and mutates a live [`SessionState`].

mod phase;
mod state;

pub use phase::Phase;
pub use state::{advance, step, SessionParams, SessionState, Transition};
