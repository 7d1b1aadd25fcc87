//! What the session screen shows for a given snapshot

use crate::session::{Phase, SessionParams, SessionState};

/// Seconds for the circle to grow (and again to shrink)
pub const BREATH_HALF_PERIOD_SECS: f64 = 5.0;
/// Largest circle scale
pub const BREATH_MAX_SCALE: f32 = 1.2;

/// Text and visibility derived from a [`SessionState`]
#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub phase: Phase,
    pub timer_text: String,
    pub status_line: &'static str,
    pub prompt: &'static str,
    pub cycles_text: String,
    pub completion_text: Option<&'static str>,
    pub show_quote: bool,
    /// Elapsed share of the current phase, drawn as an arc on the circle
    pub phase_progress: f32,
}

impl SessionView {
    pub fn from_state(state: &SessionState, params: &SessionParams) -> Self {
        let complete = state.is_complete();
        let cycles_text = if state.cycles_remaining == 1 {
            "1 cycle left".to_string()
        } else {
            format!("{} cycles left", state.cycles_remaining)
        };

        Self {
            phase: state.phase,
            timer_text: format!("{}s", state.seconds_remaining),
            status_line: state.phase.status_line(),
            prompt: state.phase.prompt(),
            cycles_text,
            completion_text: complete.then_some("Meditation Complete! Great job!"),
            show_quote: !complete,
            phase_progress: if complete {
                0.0
            } else {
                state.phase_progress(params.phase_seconds())
            },
        }
    }
}

/// Scale of the breathing circle `elapsed_secs` into the animation
///
/// Loops forever: eases from 1.0 up to [`BREATH_MAX_SCALE`] and back, each
/// half taking [`BREATH_HALF_PERIOD_SECS`]. Runs independently of the
/// session timer.
pub fn breath_scale(elapsed_secs: f64) -> f32 {
    let period = 2.0 * BREATH_HALF_PERIOD_SECS;
    let t = elapsed_secs.max(0.0) % period;
    let half = if t < BREATH_HALF_PERIOD_SECS {
        t / BREATH_HALF_PERIOD_SECS
    } else {
        1.0 - (t - BREATH_HALF_PERIOD_SECS) / BREATH_HALF_PERIOD_SECS
    };
    // Smoothstep easing
    let eased = half * half * (3.0 - 2.0 * half);
    1.0 + (BREATH_MAX_SCALE - 1.0) * eased as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{advance, SessionParams};

    #[test]
    fn test_initial_view() {
        let params = SessionParams::default();
        let state = SessionState::initial(&params);
        let view = SessionView::from_state(&state, &params);
        assert_eq!(view.timer_text, "10s");
        assert_eq!(view.status_line, "Inhaling...");
        assert_eq!(view.prompt, "Breathe In");
        assert_eq!(view.cycles_text, "10 cycles left");
        assert!(view.completion_text.is_none());
        assert!(view.show_quote);
        assert_eq!(view.phase_progress, 0.0);
    }

    #[test]
    fn test_progress_follows_countdown() {
        let params = SessionParams::new(4, 2);
        let mut state = SessionState::initial(&params);
        state = advance(state, &params);
        assert_eq!(SessionView::from_state(&state, &params).phase_progress, 0.25);
        state = advance(advance(state, &params), &params);
        assert_eq!(SessionView::from_state(&state, &params).phase_progress, 0.75);
        // Phase flip starts the arc over
        state = advance(state, &params);
        assert_eq!(SessionView::from_state(&state, &params).phase_progress, 0.0);
    }

    #[test]
    fn test_exhale_view() {
        let params = SessionParams::new(2, 1);
        let state = advance(advance(SessionState::initial(&params), &params), &params);
        let view = SessionView::from_state(&state, &params);
        assert_eq!(view.phase, Phase::Exhale);
        assert_eq!(view.prompt, "Breathe Out");
        assert_eq!(view.cycles_text, "1 cycle left");
    }

    #[test]
    fn test_complete_view_hides_quote() {
        let params = SessionParams::new(1, 0);
        let view = SessionView::from_state(&SessionState::initial(&params), &params);
        assert_eq!(view.cycles_text, "0 cycles left");
        assert!(view.completion_text.is_some());
        assert!(!view.show_quote);
        assert_eq!(view.phase_progress, 0.0);
    }

    #[test]
    fn test_breath_scale_loop() {
        assert_eq!(breath_scale(0.0), 1.0);
        assert!((breath_scale(5.0) - BREATH_MAX_SCALE).abs() < 1e-6);
        assert!((breath_scale(10.0) - 1.0).abs() < 1e-6);
        assert!((breath_scale(2.5) - 1.1).abs() < 1e-6);
        assert!((breath_scale(12.5) - breath_scale(2.5)).abs() < 1e-6);
        for i in 0..200 {
            let s = breath_scale(i as f64 * 0.1);
            assert!((1.0..=BREATH_MAX_SCALE).contains(&s));
        }
    }
}
