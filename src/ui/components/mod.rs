//! UI components module
//!
//! Reusable pieces of the session screen.

pub mod breath_circle;
pub mod cycle_counter;
pub mod session_screen;
pub mod sound_toggle;

pub use breath_circle::BreathCircle;
pub use cycle_counter::CycleCounter;
pub use session_screen::{ScreenResponse, SessionScreen};
pub use sound_toggle::SoundToggle;
