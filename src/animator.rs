//! Per-frame control loop
//!
//! Physics runs on every host frame. Drawing does not: the ball is redrawn on
//! its own jittered schedule for a hand-drawn, stop-motion look, except that a
//! bounce always forces an immediate redraw so impacts read crisply.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioCue, AudioPlayback};
use crate::error::Error;
use crate::projection::Projector;
use crate::renderer::{DrawHandle, DrawingSurface, Layer, shapes};
use crate::settings::Settings;
use crate::sim::{CollisionEvent, SimulationState, WallId};
use crate::wall::{Throttle, Wall};

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPhase {
    /// No frame seen yet
    Idle,
    /// Receiving frames
    Running,
}

/// Counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub collisions: u64,
    pub ball_draws: u64,
    pub splats: u64,
}

pub struct Animator<S: DrawingSurface, A: AudioPlayback> {
    sim: SimulationState,
    projector: Projector,
    walls: Vec<Wall>,
    cue: AudioCue,
    surface: S,
    audio: A,
    rng: Pcg32,
    phase: AnimatorPhase,
    ball_color: String,
    splat_scale: f64,
    ball_throttle: Throttle,
    effect_throttle: Throttle,
    ball: Option<DrawHandle>,
    /// Ball is redrawn on the first frame strictly after this time
    redraw_after: f64,
    /// Next ball drawing shows it squashed against the front face
    splat_next: bool,
    stats: FrameStats,
}

impl<S: DrawingSurface, A: AudioPlayback> Animator<S, A> {
    /// Build the scene with a randomly placed, randomly moving ball and draw
    /// the walls.
    pub fn new(settings: &Settings, surface: S, audio: A) -> Result<Self, Error> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = settings.bounds()?;
        let sim = SimulationState::random(bounds, settings.max_initial_speed, &mut rng);
        log::info!("Scene seed: {}", seed);
        Self::with_state(settings, sim, rng, surface, audio)
    }

    /// Build the scene around an existing simulation state
    pub fn with_state(
        settings: &Settings,
        sim: SimulationState,
        rng: Pcg32,
        surface: S,
        audio: A,
    ) -> Result<Self, Error> {
        settings.validate()?;
        let projector = Projector::new(&sim.bounds, settings.screen_min, settings.screen_max);

        let mut walls = Vec::new();
        for id in WallId::ALL {
            let Some(colors) = settings.wall_colors(id) else {
                continue;
            };
            let wall = Wall::for_box(
                id,
                &sim.bounds,
                &projector,
                colors.color.clone(),
                colors.impact_color.clone(),
            )?;
            walls.push(wall.with_effect_duration(settings.effect_duration_ms));
        }

        let mut cue = AudioCue::for_bounds(&sim.bounds);
        cue.set_master_volume(settings.master_volume);
        cue.set_muted(settings.muted);

        let mut animator = Self {
            sim,
            projector,
            walls,
            cue,
            surface,
            audio,
            rng,
            phase: AnimatorPhase::Idle,
            ball_color: settings.ball_color.clone(),
            splat_scale: settings.splat_scale,
            ball_throttle: settings.ball_throttle(),
            effect_throttle: settings.effect_throttle(),
            ball: None,
            redraw_after: f64::NEG_INFINITY,
            splat_next: false,
            stats: FrameStats::default(),
        };
        for wall in &mut animator.walls {
            wall.refresh(&mut animator.surface, &mut animator.rng);
        }
        Ok(animator)
    }

    /// Run one host frame at timestamp `now` (ms).
    ///
    /// The host is expected to call this again on its next frame; nothing here
    /// schedules anything.
    pub fn frame(&mut self, now: f64) {
        self.phase = AnimatorPhase::Running;
        self.stats.frames += 1;

        let events = self.sim.advance(now);
        for event in &events {
            self.on_collision(event, now);
        }

        if now > self.redraw_after {
            self.draw_ball();
            self.redraw_after = self.ball_throttle.next_after(now, &mut self.rng);
        }

        let throttle = self.effect_throttle;
        for wall in &mut self.walls {
            wall.update_effect(now, throttle, &mut self.surface, &mut self.rng);
        }
    }

    fn on_collision(&mut self, event: &CollisionEvent, now: f64) {
        let wall_id = event.wall();
        log::debug!(
            "Bounce off {:?} at ({:.2}, {:.2}, {:.2})",
            wall_id,
            event.position.x,
            event.position.y,
            event.position.z
        );
        self.stats.collisions += 1;

        if wall_id == WallId::Front {
            self.splat_next = true;
        }
        let target = self.projector.project(event.position);
        if let Some(wall) = self.walls.iter_mut().find(|w| w.id == wall_id) {
            wall.start_impact(target, now, &mut self.surface, &mut self.rng);
        }

        self.cue.trigger(&mut self.audio, event.position);
        self.redraw_after = f64::NEG_INFINITY;
    }

    fn draw_ball(&mut self) {
        if let Some(old) = self.ball.take() {
            self.surface.fade(old);
        }

        let position = self.sim.ball.position;
        let splat = std::mem::take(&mut self.splat_next);
        let scale = if splat { self.splat_scale } else { 1.0 };
        let diameter = scale * self.projector.apparent_diameter(position, self.sim.bounds.ball_radius);
        let style = shapes::ball_style(&self.ball_color, splat);

        self.ball = Some(self.surface.draw_circle(
            Layer::Foreground,
            self.projector.project(position),
            diameter,
            &style,
        ));
        self.stats.ball_draws += 1;
        if splat {
            self.stats.splats += 1;
        }
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    pub fn sim(&self) -> &SimulationState {
        &self.sim
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn ball_drawing(&self) -> Option<DrawHandle> {
        self.ball
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueParams;
    use crate::renderer::RecordingSurface;
    use crate::renderer::recording::Shape;
    use crate::settings::RedrawCadence;
    use crate::{Point2, Point3, Vector3};

    #[derive(Default)]
    struct RecordingAudio {
        played: Vec<CueParams>,
    }

    impl AudioPlayback for RecordingAudio {
        fn play(&mut self, params: CueParams) -> Result<(), Error> {
            self.played.push(params);
            Ok(())
        }
    }

    fn animator(
        settings: &Settings,
        position: Point3,
        velocity: Vector3,
    ) -> Animator<RecordingSurface, RecordingAudio> {
        let sim = SimulationState::new(settings.bounds().unwrap(), position, velocity);
        Animator::with_state(
            settings,
            sim,
            Pcg32::seed_from_u64(5),
            RecordingSurface::new(),
            RecordingAudio::default(),
        )
        .unwrap()
    }

    fn ball_circle(a: &Animator<RecordingSurface, RecordingAudio>) -> (Point2, f64) {
        let drawing = a.surface().get(a.ball_drawing().unwrap()).unwrap();
        assert_eq!(drawing.layer, Layer::Foreground);
        match drawing.shape {
            Shape::Circle { center, diameter } => (center, diameter),
            _ => panic!("ball should be a circle"),
        }
    }

    #[test]
    fn test_walls_drawn_at_construction() {
        let settings = Settings::default();
        let a = animator(&settings, Point3::ZERO, Vector3::ZERO);
        assert_eq!(a.phase(), AnimatorPhase::Idle);
        // Front face is left out by default
        assert_eq!(a.walls().len(), 5);
        assert!(a.wall(WallId::Front).is_none());
        assert_eq!(a.surface().polygons_drawn, 5);
        assert!(a.walls().iter().all(|w| w.drawing().is_some()));
    }

    #[test]
    fn test_first_frame_draws_ball_without_moving() {
        let settings = Settings::default();
        let mut a = animator(&settings, Point3::new(1.0, 2.0, 3.0), Vector3::new(5.0, 5.0, 5.0));
        a.frame(1000.0);

        assert_eq!(a.phase(), AnimatorPhase::Running);
        assert_eq!(a.sim().ball.position, Point3::new(1.0, 2.0, 3.0));
        let (center, _) = ball_circle(&a);
        assert_eq!(center, a.projector().project(Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_ball_redraw_is_throttled() {
        let settings = Settings::default();
        let mut a = animator(&settings, Point3::ZERO, Vector3::new(1.0, 0.0, 0.0));
        a.frame(0.0);
        let first = a.ball_drawing().unwrap();

        // 60 Hz frames inside the minimum window move the ball but keep the drawing
        for i in 1..6 {
            a.frame(i as f64 * 16.0);
        }
        assert_eq!(a.ball_drawing(), Some(first));
        assert_eq!(a.stats().ball_draws, 1);
        assert!(a.sim().ball.position.x > 0.0);

        // Past the maximum window it must have been redrawn
        a.frame(250.0);
        assert_ne!(a.ball_drawing(), Some(first));
        assert!(!a.surface().contains(first));
        assert_eq!(a.surface().faded, 1);
    }

    #[test]
    fn test_smooth_cadence_redraws_every_frame() {
        let settings = Settings {
            cadence: RedrawCadence::Smooth,
            ..Settings::default()
        };
        let mut a = animator(&settings, Point3::ZERO, Vector3::new(1.0, 0.0, 0.0));
        for i in 0..10 {
            a.frame(i as f64 * 16.0);
        }
        assert_eq!(a.stats().ball_draws, 10);
    }

    #[test]
    fn test_collision_starts_effect_plays_sound_and_forces_redraw() {
        let settings = Settings::default();
        let mut a = animator(&settings, Point3::new(12.4, 0.0, 0.0), Vector3::new(10.0, 0.0, 0.0));
        a.frame(0.0);
        let before = a.ball_drawing().unwrap();
        let right_drawing = a.wall(WallId::Right).unwrap().drawing().unwrap();

        // Well inside the ball throttle window
        a.frame(50.0);

        assert_eq!(a.stats().collisions, 1);
        assert_eq!(a.sim().ball.position.x, 12.5);
        assert_eq!(a.sim().ball.velocity.x, -10.0);

        let right = a.wall(WallId::Right).unwrap();
        let effect = right.effect().unwrap();
        assert_eq!(effect.start_time, 50.0);
        assert_eq!(effect.target, a.projector().project(Point3::new(12.5, 0.0, 0.0)));
        assert!(right.overlay().is_some());
        // Wall got re-sketched
        assert_ne!(right.drawing(), Some(right_drawing));

        assert_ne!(a.ball_drawing(), Some(before));
        assert_eq!(a.stats().ball_draws, 2);

        let played = &a.audio().played;
        assert_eq!(played.len(), 1);
        assert!((played[0].balance - 1.0).abs() < 1e-12);
        // z = 0 sits half way between the far and near volume
        assert!((played[0].volume - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_effect_expires() {
        let settings = Settings::default();
        let mut a = animator(&settings, Point3::new(-12.4, 0.0, 0.0), Vector3::new(-10.0, 0.0, 0.0));
        a.frame(0.0);
        a.frame(20.0);
        assert!(a.wall(WallId::Left).unwrap().effect().is_some());

        a.frame(20.0 + 349.0);
        assert!(a.wall(WallId::Left).unwrap().effect().is_some());
        a.frame(20.0 + 350.0);
        let left = a.wall(WallId::Left).unwrap();
        assert!(left.effect().is_none());
        assert!(left.overlay().is_none());
    }

    #[test]
    fn test_front_hit_splats_ball() {
        let settings = Settings::default();
        let mut a = animator(&settings, Point3::new(0.0, 0.0, 12.4), Vector3::new(0.0, 0.0, 10.0));
        a.frame(0.0);
        let (_, normal_diameter) = ball_circle(&a);

        a.frame(30.0);
        assert_eq!(a.stats().splats, 1);
        let (_, splat_diameter) = ball_circle(&a);
        let style = &a.surface().get(a.ball_drawing().unwrap()).unwrap().style;
        assert_eq!(style.curve_step_count, Some(50));
        // Ball moved slightly closer, so compare against the near-face size
        let near = a.projector().apparent_diameter(Point3::new(0.0, 0.0, 12.5), 1.5);
        assert!((splat_diameter - 2.5 * near).abs() < 1e-9);
        assert!(splat_diameter > normal_diameter);

        // Splat is a one-off
        a.frame(400.0);
        let style = &a.surface().get(a.ball_drawing().unwrap()).unwrap().style;
        assert_eq!(style.curve_step_count, Some(9));
        assert_eq!(a.stats().splats, 1);
    }

    #[test]
    fn test_front_wall_effect_when_enabled() {
        let settings = Settings {
            show_front_wall: true,
            ..Settings::default()
        };
        let mut a = animator(&settings, Point3::new(0.0, 0.0, 12.4), Vector3::new(0.0, 0.0, 10.0));
        a.frame(0.0);
        a.frame(30.0);
        let front = a.wall(WallId::Front).unwrap();
        assert!(front.effect().is_some());
        let overlay = a.surface().get(front.overlay().unwrap()).unwrap();
        assert_eq!(overlay.style.fill.as_deref(), Some("#800080"));
        assert_eq!(a.stats().splats, 1);
    }

    #[test]
    fn test_duplicate_frame_changes_nothing_physical() {
        let settings = Settings::default();
        let mut a = animator(&settings, Point3::ZERO, Vector3::new(3.0, 2.0, 1.0));
        a.frame(0.0);
        a.frame(100.0);
        let state = a.sim().clone();
        a.frame(100.0);
        a.frame(90.0);
        assert_eq!(a.sim(), &state);
    }

    #[test]
    fn test_long_run_stays_in_box() {
        let settings = Settings {
            seed: Some(1234),
            ..Settings::default()
        };
        let mut a = Animator::new(&settings, RecordingSurface::new(), RecordingAudio::default())
            .unwrap();
        let mut now = 0.0;
        for _ in 0..3600 {
            now += 1000.0 / 60.0;
            a.frame(now);
            let p = a.sim().ball.position;
            for v in [p.x, p.y, p.z] {
                assert!((-12.5..=12.5).contains(&v));
            }
        }
        // A minute at up to 25 units/s crosses the box many times
        assert!(a.stats().collisions > 0);
        assert_eq!(a.audio().played.len() as u64, a.stats().collisions);
        // At most one overlay per wall, plus the walls and the ball
        assert!(a.surface().live_count() <= 5 + 5 + 1);
    }
}
