//! Ambient track playback
//!
//! Players only need to start and pause a single looping track. Both calls
//! must be safe to repeat.

use crate::error::Result;
#[cfg(feature = "audio-io")]
use crate::error::BreatheError;
#[cfg(feature = "audio-io")]
use std::path::Path;
#[cfg(feature = "audio-io")]
use tracing::info;

/// Something that can play and pause the ambient track
pub trait AudioPlayer {
    /// Resume or start playback. Idempotent.
    fn play(&mut self) -> Result<()>;

    /// Pause playback. Idempotent.
    fn pause(&mut self) -> Result<()>;

    /// Check if audio is currently audible
    fn is_playing(&self) -> bool;
}

/// Player with no output, used when no device or track is available
#[derive(Debug, Default)]
pub struct SilentPlayer {
    playing: bool,
}

impl SilentPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioPlayer for SilentPlayer {
    fn play(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Loops an audio file forever on the default output device
#[cfg(feature = "audio-io")]
pub struct LoopingTrackPlayer {
    // Dropping the stream silences the sink
    _stream: rodio::OutputStream,
    sink: rodio::Sink,
}

#[cfg(feature = "audio-io")]
impl LoopingTrackPlayer {
    /// Open the default output device and queue `path` on repeat, paused
    ///
    /// # Errors
    /// Returns an error if there is no output device or the file cannot be
    /// decoded.
    pub fn open(path: &Path, volume: f32) -> Result<Self> {
        use rodio::Source;
        use std::fs::File;
        use std::io::BufReader;

        let (stream, handle) = rodio::OutputStream::try_default().map_err(|e| {
            BreatheError::AudioDeviceError(format!("Failed to open output device: {}", e))
        })?;
        let sink = rodio::Sink::try_new(&handle).map_err(|e| {
            BreatheError::AudioDeviceError(format!("Failed to create sink: {}", e))
        })?;

        let file = File::open(path)?;
        let source = rodio::Decoder::new(BufReader::new(file)).map_err(|e| {
            BreatheError::AudioPlaybackError(format!(
                "Failed to decode '{}': {}",
                path.display(),
                e
            ))
        })?;

        sink.pause();
        sink.set_volume(volume.clamp(0.0, 1.0));
        sink.append(source.repeat_infinite());
        info!("[AUDIO] Ambient track loaded: {}", path.display());

        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

#[cfg(feature = "audio-io")]
impl AudioPlayer for LoopingTrackPlayer {
    fn play(&mut self) -> Result<()> {
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.sink.pause();
        Ok(())
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }
}
