//! Headless native host
//!
//! No window and no sound: frames come from a simulated 60 Hz clock and
//! drawings land in a [`RecordingSurface`].

use crate::animator::{Animator, FrameStats};
use crate::audio::SilentPlayback;
use crate::error::Error;
use crate::renderer::RecordingSurface;
use crate::settings::Settings;

/// Simulated frame rate (Hz)
pub const FRAME_RATE: f64 = 60.0;
/// Simulated frame interval (ms)
pub const FRAME_MS: f64 = 1000.0 / FRAME_RATE;

/// Run the scene for `seconds` of simulated time
pub fn run_headless(settings: &Settings, seconds: f64) -> Result<FrameStats, Error> {
    let mut animator = Animator::new(settings, RecordingSurface::new(), SilentPlayback::default())?;

    let frames = (seconds * FRAME_RATE).round() as u64;
    for i in 0..frames {
        animator.frame(i as f64 * FRAME_MS);
        if i > 0 && i % 600 == 0 {
            let p = animator.sim().ball.position;
            log::info!(
                "t={:.1}s ball=({:.2}, {:.2}, {:.2}) collisions={}",
                i as f64 * FRAME_MS / 1000.0,
                p.x,
                p.y,
                p.z,
                animator.stats().collisions
            );
        }
    }

    let stats = animator.stats();
    let surface = animator.surface();
    log::info!(
        "{} frames, {} bounces ({} splats), {} ball draws, {} polygons, {} sounds, {} drawings live",
        stats.frames,
        stats.collisions,
        stats.splats,
        stats.ball_draws,
        surface.polygons_drawn,
        animator.audio().plays,
        surface.live_count()
    );
    Ok(stats)
}
