//! Session snapshot and the per-tick transition function

use super::phase::Phase;

/// Fixed parameters of one breathing session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionParams {
    phase_seconds: u32,
    total_cycles: u32,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            phase_seconds: 10,
            total_cycles: 10,
        }
    }
}

impl SessionParams {
    /// Create session parameters
    ///
    /// A phase lasts at least one second; zero is raised to one.
    pub fn new(phase_seconds: u32, total_cycles: u32) -> Self {
        Self {
            phase_seconds: phase_seconds.max(1),
            total_cycles,
        }
    }

    /// Seconds spent in each phase
    pub fn phase_seconds(&self) -> u32 {
        self.phase_seconds
    }

    /// Cycles in a full session
    pub fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    /// Ticks needed to run a full session to completion
    ///
    /// Saturates at `u64::MAX` for sessions too long to count.
    pub fn ticks_to_complete(&self) -> u64 {
        u64::from(self.total_cycles)
            .saturating_mul(u64::from(self.phase_seconds))
            .saturating_mul(2)
    }
}

/// Immutable snapshot of a breathing session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Current breathing direction
    pub phase: Phase,
    /// Seconds left in the current phase, in `[1, phase_seconds]`
    pub seconds_remaining: u32,
    /// Full inhale+exhale pairs still to go
    pub cycles_remaining: u32,
}

impl SessionState {
    /// State at the start of a session
    pub fn initial(params: &SessionParams) -> Self {
        Self {
            phase: Phase::Inhale,
            seconds_remaining: params.phase_seconds,
            cycles_remaining: params.total_cycles,
        }
    }

    /// Session has run out of cycles
    pub fn is_complete(&self) -> bool {
        self.cycles_remaining == 0
    }

    /// Cycles already finished out of `total`
    pub fn completed_cycles(&self, total: u32) -> u32 {
        total.saturating_sub(self.cycles_remaining)
    }

    /// Fraction of the current phase already elapsed, in `[0, 1)`
    pub fn phase_progress(&self, phase_seconds: u32) -> f32 {
        let phase_seconds = phase_seconds.max(1);
        let remaining = self.seconds_remaining.clamp(1, phase_seconds);
        (phase_seconds - remaining) as f32 / phase_seconds as f32
    }
}

/// What a single tick did to the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Session already complete; nothing changed
    Idle,
    /// Countdown moved one second within the same phase
    Counted,
    /// Inhale turned into exhale
    PhaseFlipped { from: Phase, to: Phase },
    /// Exhale turned into inhale, closing a cycle
    CycleCompleted { remaining: u32 },
}

impl Transition {
    /// Check if the phase changed on this tick
    pub fn flipped_phase(&self) -> bool {
        matches!(
            self,
            Transition::PhaseFlipped { .. } | Transition::CycleCompleted { .. }
        )
    }
}

/// Apply one tick and report what happened
///
/// The cycle decision reads the phase *before* the flip: only the
/// exhale-to-inhale boundary closes a cycle.
pub fn step(state: SessionState, params: &SessionParams) -> (SessionState, Transition) {
    let cycles_remaining = state.cycles_remaining.min(params.total_cycles);
    if cycles_remaining == 0 {
        let terminal = SessionState {
            cycles_remaining: 0,
            ..state
        };
        return (terminal, Transition::Idle);
    }

    let seconds = state.seconds_remaining.min(params.phase_seconds);
    if seconds > 1 {
        let next = SessionState {
            phase: state.phase,
            seconds_remaining: seconds - 1,
            cycles_remaining,
        };
        return (next, Transition::Counted);
    }

    let from = state.phase;
    let to = from.flipped();
    let closes_cycle = from.is_exhale();
    let cycles_remaining = if closes_cycle {
        cycles_remaining.saturating_sub(1)
    } else {
        cycles_remaining
    };

    let next = SessionState {
        phase: to,
        seconds_remaining: params.phase_seconds,
        cycles_remaining,
    };
    let transition = if closes_cycle {
        Transition::CycleCompleted {
            remaining: cycles_remaining,
        }
    } else {
        Transition::PhaseFlipped { from, to }
    };
    (next, transition)
}

/// Pure per-tick reducer
pub fn advance(state: SessionState, params: &SessionParams) -> SessionState {
    step(state, params).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_to_complete_saturates() {
        assert_eq!(SessionParams::new(10, 10).ticks_to_complete(), 200);
        assert_eq!(SessionParams::new(u32::MAX, 0).ticks_to_complete(), 0);

        assert_eq!(
            SessionParams::new(u32::MAX, 1).ticks_to_complete(),
            2 * u64::from(u32::MAX)
        );
        assert_eq!(SessionParams::new(u32::MAX, u32::MAX).ticks_to_complete(), u64::MAX);
    }

    fn run(params: &SessionParams, ticks: u64) -> SessionState {
        let mut state = SessionState::initial(params);
        for _ in 0..ticks {
            state = advance(state, params);
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let params = SessionParams::new(10, 3);
        let state = SessionState::initial(&params);
        assert_eq!(state.phase, Phase::Inhale);
        assert_eq!(state.seconds_remaining, 10);
        assert_eq!(state.cycles_remaining, 3);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_reference_timeline() {
        let params = SessionParams::new(10, 3);

        let s = run(&params, 9);
        assert_eq!((s.phase, s.seconds_remaining, s.cycles_remaining), (Phase::Inhale, 1, 3));

        let s = run(&params, 10);
        assert_eq!((s.phase, s.seconds_remaining, s.cycles_remaining), (Phase::Exhale, 10, 3));

        let s = run(&params, 20);
        assert_eq!((s.phase, s.seconds_remaining, s.cycles_remaining), (Phase::Inhale, 10, 2));

        let s = run(&params, 60);
        assert_eq!(s.cycles_remaining, 0);
        assert!(s.is_complete());
    }

    #[test]
    fn test_inhale_to_exhale_does_not_count_a_cycle() {
        let params = SessionParams::new(2, 5);
        let state = SessionState {
            phase: Phase::Inhale,
            seconds_remaining: 1,
            cycles_remaining: 5,
        };
        let (next, transition) = step(state, &params);
        assert_eq!(next.phase, Phase::Exhale);
        assert_eq!(next.cycles_remaining, 5);
        assert_eq!(
            transition,
            Transition::PhaseFlipped {
                from: Phase::Inhale,
                to: Phase::Exhale
            }
        );
    }

    #[test]
    fn test_exhale_to_inhale_counts_one_cycle() {
        let params = SessionParams::new(2, 5);
        let state = SessionState {
            phase: Phase::Exhale,
            seconds_remaining: 1,
            cycles_remaining: 5,
        };
        let (next, transition) = step(state, &params);
        assert_eq!(next.phase, Phase::Inhale);
        assert_eq!(next.seconds_remaining, 2);
        assert_eq!(next.cycles_remaining, 4);
        assert_eq!(transition, Transition::CycleCompleted { remaining: 4 });
    }

    #[test]
    fn test_terminal_state_is_fixed_point() {
        let params = SessionParams::new(3, 1);
        let done = run(&params, params.ticks_to_complete());
        assert!(done.is_complete());
        let (after, transition) = step(done, &params);
        assert_eq!(after, done);
        assert_eq!(transition, Transition::Idle);
        assert_eq!(run(&params, params.ticks_to_complete() + 17), done);
    }

    #[test]
    fn test_zero_cycles_is_terminal_from_start() {
        let params = SessionParams::new(10, 0);
        let state = SessionState::initial(&params);
        assert!(state.is_complete());
        assert_eq!(advance(state, &params), state);
    }

    #[test]
    fn test_seconds_stay_in_range() {
        let params = SessionParams::new(4, 3);
        let mut state = SessionState::initial(&params);
        for _ in 0..params.ticks_to_complete() + 5 {
            state = advance(state, &params);
            assert!(state.seconds_remaining >= 1);
            assert!(state.seconds_remaining <= params.phase_seconds());
        }
    }

    #[test]
    fn test_one_flip_per_boundary() {
        let params = SessionParams::new(3, 4);
        let mut state = SessionState::initial(&params);
        let mut phases = vec![state.phase];
        for _ in 0..params.ticks_to_complete() {
            let (next, transition) = step(state, &params);
            if transition.flipped_phase() {
                assert_ne!(next.phase, state.phase);
                phases.push(next.phase);
            } else {
                assert_eq!(next.phase, state.phase);
            }
            state = next;
        }
        for pair in phases.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        // 4 cycles = 8 flips after the initial inhale
        assert_eq!(phases.len(), 9);
    }

    #[test]
    fn test_cycle_decrements_every_two_phases() {
        let params = SessionParams::new(5, 6);
        let mut state = SessionState::initial(&params);
        for tick in 1..=params.ticks_to_complete() {
            state = advance(state, &params);
            let expected = 6 - (tick / 10) as u32;
            assert_eq!(state.cycles_remaining, expected, "tick {}", tick);
        }
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let params = SessionParams::new(10, 3);

        let oversized = SessionState {
            phase: Phase::Inhale,
            seconds_remaining: 99,
            cycles_remaining: 3,
        };
        assert_eq!(advance(oversized, &params).seconds_remaining, 9);

        let zero = SessionState {
            phase: Phase::Exhale,
            seconds_remaining: 0,
            cycles_remaining: 42,
        };
        let next = advance(zero, &params);
        assert_eq!(next.phase, Phase::Inhale);
        assert_eq!(next.seconds_remaining, 10);
        assert_eq!(next.cycles_remaining, 2);
    }

    #[test]
    fn test_zero_phase_seconds_raised_to_one() {
        let params = SessionParams::new(0, 2);
        assert_eq!(params.phase_seconds(), 1);
        let done = run(&params, 4);
        assert!(done.is_complete());
    }

    #[test]
    fn test_phase_progress() {
        let params = SessionParams::new(4, 1);
        let mut state = SessionState::initial(&params);
        assert_eq!(state.phase_progress(4), 0.0);
        state = advance(state, &params);
        assert_eq!(state.phase_progress(4), 0.25);
        assert_eq!(state.completed_cycles(1), 0);
    }
}
