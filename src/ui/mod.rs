//! UI components and application module
//!
//! This module provides the egui/eframe-based session screen.

mod app;
pub mod components;
mod theme;
mod view;

pub use app::BreatheApp;
pub use components::{BreathCircle, CycleCounter, ScreenResponse, SessionScreen, SoundToggle};
pub use theme::Theme;
pub use view::{breath_scale, SessionView, BREATH_HALF_PERIOD_SECS, BREATH_MAX_SCALE};
