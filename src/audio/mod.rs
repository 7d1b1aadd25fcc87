//! Ambient sound: mute flag, players, and the playback policy

pub mod ambient;
pub mod player;
pub mod presence;

pub use ambient::AmbientSound;
#[cfg(feature = "audio-io")]
pub use player::LoopingTrackPlayer;
pub use player::{AudioPlayer, SilentPlayer};
pub use presence::AudioPresence;

use crate::config::AudioSection;
use tracing::{info, warn};

/// Open the configured ambient track, falling back to silence
///
/// Audio is cosmetic: a missing device or unreadable file is logged and the
/// session runs without sound.
pub fn open_player(config: &AudioSection) -> Box<dyn AudioPlayer> {
    let Some(path) = config.ambient_track.as_deref() else {
        info!("[AUDIO] No ambient track configured");
        return Box::new(SilentPlayer::new());
    };

    open_track(path, config.volume)
}

#[cfg(feature = "audio-io")]
fn open_track(path: &std::path::Path, volume: f32) -> Box<dyn AudioPlayer> {
    match LoopingTrackPlayer::open(path, volume) {
        Ok(player) => Box::new(player),
        Err(e) => {
            warn!("[AUDIO] {}; continuing without sound", e);
            Box::new(SilentPlayer::new())
        }
    }
}

#[cfg(not(feature = "audio-io"))]
fn open_track(path: &std::path::Path, _volume: f32) -> Box<dyn AudioPlayer> {
    warn!(
        "[AUDIO] Built without audio-io, ignoring track {}",
        path.display()
    );
    Box::new(SilentPlayer::new())
}
