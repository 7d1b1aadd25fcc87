//! Ambient sound policy
//!
//! Sound plays only while the session view has focus and the user has not
//! muted it. Player failures are logged and remembered, never propagated:
//! the breathing timer does not depend on audio.

use super::player::AudioPlayer;
use super::presence::AudioPresence;
use crate::error::BreatheError;
use crossbeam_channel::Receiver;
use tracing::{debug, error, warn};

/// Drives an [`AudioPlayer`] from focus and mute state
pub struct AmbientSound {
    player: Box<dyn AudioPlayer>,
    presence: AudioPresence,
    changes: Receiver<bool>,
    focused: bool,
    /// Last state successfully requested from the player
    requested: Option<bool>,
    last_error: Option<BreatheError>,
}

impl AmbientSound {
    /// Create the policy; nothing plays until the view gains focus
    pub fn new(player: Box<dyn AudioPlayer>, presence: AudioPresence) -> Self {
        let changes = presence.watch();
        Self {
            player,
            presence,
            changes,
            focused: false,
            requested: None,
            last_error: None,
        }
    }

    /// Shared mute flag
    pub fn presence(&self) -> &AudioPresence {
        &self.presence
    }

    /// Check if the session view has focus
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Check if sound is enabled
    pub fn sound_enabled(&self) -> bool {
        self.presence.is_enabled()
    }

    /// Check if the player reports audible output
    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// Most recent player failure, cleared by the next successful call
    pub fn last_error(&self) -> Option<&BreatheError> {
        self.last_error.as_ref()
    }

    /// Whether sound should currently be audible
    pub fn should_play(&self) -> bool {
        self.focused && self.presence.is_enabled()
    }

    /// Record a focus change of the session view
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            debug!("[AUDIO] Session view {}", if focused { "focused" } else { "blurred" });
        }
        self.focused = focused;
        self.sync();
    }

    /// Flip mute and apply it; returns whether sound is now enabled
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.presence.toggle();
        self.sync();
        enabled
    }

    /// Set mute state directly
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.presence.set_enabled(enabled);
        self.sync();
    }

    /// Apply mute changes made through other handles of the presence flag
    pub fn pump(&mut self) {
        if self.changes.try_iter().count() > 0 {
            self.sync();
        }
    }

    /// Bring the player in line with focus and mute state
    ///
    /// A call that would repeat the last successful request is skipped; a
    /// failed request is retried on the next sync.
    pub fn sync(&mut self) {
        // Changes we caused ourselves are already reflected below
        self.changes.try_iter().for_each(drop);

        let want = self.should_play();
        if self.requested == Some(want) {
            return;
        }

        let result = if want {
            self.player.play()
        } else {
            self.player.pause()
        };

        match result {
            Ok(()) => {
                self.requested = Some(want);
                self.last_error = None;
            }
            Err(e) => {
                let verb = if want { "play" } else { "pause" };
                if e.is_recoverable() {
                    warn!("[AUDIO] Failed to {} ambient sound: {}", verb, e);
                } else {
                    error!("[AUDIO] Failed to {} ambient sound: {}", verb, e);
                }
                self.requested = None;
                self.last_error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::player::SilentPlayer;
    use crate::error::Result;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts calls and optionally fails them
    struct CountingPlayer {
        plays: Rc<Cell<u32>>,
        pauses: Rc<Cell<u32>>,
        fail: Rc<Cell<bool>>,
        playing: bool,
    }

    impl AudioPlayer for CountingPlayer {
        fn play(&mut self) -> Result<()> {
            self.plays.set(self.plays.get() + 1);
            if self.fail.get() {
                return Err(BreatheError::AudioPlaybackError("device lost".into()));
            }
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.pauses.set(self.pauses.get() + 1);
            if self.fail.get() {
                return Err(BreatheError::AudioPlaybackError("device lost".into()));
            }
            self.playing = false;
            Ok(())
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    fn counting_sound() -> (AmbientSound, Rc<Cell<u32>>, Rc<Cell<u32>>, Rc<Cell<bool>>) {
        let plays = Rc::new(Cell::new(0));
        let pauses = Rc::new(Cell::new(0));
        let fail = Rc::new(Cell::new(false));
        let player = CountingPlayer {
            plays: Rc::clone(&plays),
            pauses: Rc::clone(&pauses),
            fail: Rc::clone(&fail),
            playing: false,
        };
        let ambient = AmbientSound::new(Box::new(player), AudioPresence::new(true));
        (ambient, plays, pauses, fail)
    }

    #[test]
    fn test_plays_when_focused_and_enabled() {
        let mut ambient = AmbientSound::new(Box::new(SilentPlayer::new()), AudioPresence::new(true));
        assert!(!ambient.is_playing());
        ambient.set_focused(true);
        assert!(ambient.is_playing());
        ambient.set_focused(false);
        assert!(!ambient.is_playing());
    }

    #[test]
    fn test_muted_stays_silent_on_focus() {
        let mut ambient = AmbientSound::new(Box::new(SilentPlayer::new()), AudioPresence::new(false));
        ambient.set_focused(true);
        assert!(!ambient.is_playing());
        assert!(ambient.toggle_sound());
        assert!(ambient.is_playing());
    }

    #[test]
    fn test_redundant_requests_are_skipped() {
        let (mut ambient, plays, pauses, _) = counting_sound();
        ambient.set_focused(true);
        ambient.set_focused(true);
        ambient.sync();
        assert_eq!(plays.get(), 1);

        ambient.set_sound_enabled(false);
        ambient.set_sound_enabled(false);
        ambient.set_focused(false);
        assert_eq!(pauses.get(), 1);
    }

    #[test]
    fn test_failure_is_recorded_and_retried() {
        let (mut ambient, plays, _, fail) = counting_sound();
        fail.set(true);
        ambient.set_focused(true);
        assert!(matches!(
            ambient.last_error(),
            Some(BreatheError::AudioPlaybackError(_))
        ));
        assert!(!ambient.is_playing());

        fail.set(false);
        ambient.sync();
        assert_eq!(plays.get(), 2);
        assert!(ambient.is_playing());
        assert!(ambient.last_error().is_none());
    }

    #[test]
    fn test_pump_applies_external_toggle() {
        let (mut ambient, _, pauses, _) = counting_sound();
        ambient.set_focused(true);
        let remote = ambient.presence().clone();
        remote.toggle();
        assert!(ambient.is_playing());

        ambient.pump();
        assert!(!ambient.is_playing());
        assert_eq!(pauses.get(), 1);
    }
}
