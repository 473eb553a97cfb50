//! Positional impact sound
//!
//! One short clip is replayed on every bounce. Where the bounce happened picks
//! how it sounds: impacts near the viewer are louder, and the left/right pan
//! follows the ball's x position.

use crate::Point3;
use crate::consts::AUDIO_FAR_VOLUME;
use crate::error::Error;
use crate::linear::LinearMap;
use crate::sim::BoxBounds;

/// How to play one impact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueParams {
    /// 0.0 - 1.0
    pub volume: f64,
    /// -1.0 (left) - 1.0 (right)
    pub balance: f64,
}

/// Something that can restart the impact clip
pub trait AudioPlayback {
    /// Stop the clip, rewind it, apply `params` and start it again.
    ///
    /// Failures are reported, never retried; the next bounce simply tries again.
    fn play(&mut self, params: CueParams) -> Result<(), Error>;
}

/// Maps collision positions to playback parameters
#[derive(Debug, Clone, Copy)]
pub struct AudioCue {
    volume: LinearMap,
    balance: LinearMap,
    master_volume: f64,
    muted: bool,
}

impl AudioCue {
    pub fn for_bounds(bounds: &BoxBounds) -> Self {
        let (lo, hi) = (bounds.ball_min(), bounds.ball_max());
        Self {
            volume: LinearMap::new(hi, 1.0, lo, AUDIO_FAR_VOLUME),
            balance: LinearMap::new(lo, -1.0, hi, 1.0),
            master_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f64) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn cue(&self, position: Point3) -> CueParams {
        let master = if self.muted { 0.0 } else { self.master_volume };
        CueParams {
            volume: (self.volume.at(position.z) * master).clamp(0.0, 1.0),
            balance: self.balance.at(position.x).clamp(-1.0, 1.0),
        }
    }

    /// Fire and forget. Playback errors are logged and dropped.
    pub fn trigger<A: AudioPlayback>(&self, audio: &mut A, position: Point3) {
        let params = self.cue(position);
        if params.volume <= 0.0 {
            return;
        }
        if let Err(err) = audio.play(params) {
            log::warn!("Unable to play impact sound: {}", err);
        }
    }
}

/// Playback for hosts without audio; just logs the cue
#[derive(Debug, Default)]
pub struct SilentPlayback {
    pub plays: u64,
}

impl AudioPlayback for SilentPlayback {
    fn play(&mut self, params: CueParams) -> Result<(), Error> {
        self.plays += 1;
        log::trace!(
            "whack volume={:.2} balance={:.2}",
            params.volume,
            params.balance
        );
        Ok(())
    }
}
