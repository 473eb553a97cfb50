//! Box faces
//!
//! Wall geometry never changes, so corners are projected once up front. What
//! does change is the drawing: a wall is re-sketched on every impact and owns
//! at most one live [`ImpactEffect`] plus the overlay currently showing it.

use rand::Rng;

use crate::Point2;
use crate::effect::{EffectSample, ImpactEffect};
use crate::error::Error;
use crate::projection::Projector;
use crate::renderer::{DrawHandle, DrawingSurface, Layer, shapes};
use crate::sim::{BoxBounds, WallId};

/// Spacing between overlay redraws, in ms: a fixed minimum plus random jitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    pub min_ms: f64,
    pub jitter_ms: f64,
}

impl Throttle {
    /// Redraw every frame
    pub const NONE: Throttle = Throttle {
        min_ms: 0.0,
        jitter_ms: 0.0,
    };

    pub fn next_after<R: Rng>(&self, now: f64, rng: &mut R) -> f64 {
        if self.jitter_ms > 0.0 {
            now + self.min_ms + rng.random_range(0.0..self.jitter_ms)
        } else {
            now + self.min_ms
        }
    }
}

pub struct Wall {
    pub id: WallId,
    corners: [Point2; 4],
    color: String,
    impact_color: String,
    effect_duration_ms: f64,
    /// Hatch angle of the current drawing, degrees
    hachure_angle: f64,
    drawing: Option<DrawHandle>,
    effect: Option<ImpactEffect>,
    overlay: Option<DrawHandle>,
    next_overlay_at: f64,
}

impl Wall {
    /// `corners` must be the four projected corners of the face, in outline
    /// order. `impact_color` defaults to `color`.
    pub fn new(
        id: WallId,
        corners: &[Point2],
        color: impl Into<String>,
        impact_color: Option<String>,
    ) -> Result<Self, Error> {
        let corners: [Point2; 4] = corners.try_into().map_err(|_| Error::WallCorners {
            wall: id,
            count: corners.len(),
        })?;
        let color = color.into();
        Ok(Self {
            id,
            corners,
            impact_color: impact_color.unwrap_or_else(|| color.clone()),
            color,
            effect_duration_ms: crate::consts::EFFECT_DURATION_MS,
            hachure_angle: 0.0,
            drawing: None,
            effect: None,
            overlay: None,
            next_overlay_at: f64::NEG_INFINITY,
        })
    }

    /// The face `id` of `bounds`, projected through `projector`
    pub fn for_box(
        id: WallId,
        bounds: &BoxBounds,
        projector: &Projector,
        color: impl Into<String>,
        impact_color: Option<String>,
    ) -> Result<Self, Error> {
        let corners = bounds.face_corners(id).map(|c| projector.project(c));
        Self::new(id, &corners, color, impact_color)
    }

    pub fn with_effect_duration(mut self, duration_ms: f64) -> Self {
        self.effect_duration_ms = duration_ms;
        self
    }

    pub fn corners(&self) -> &[Point2; 4] {
        &self.corners
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn impact_color(&self) -> &str {
        &self.impact_color
    }

    pub fn effect(&self) -> Option<&ImpactEffect> {
        self.effect.as_ref()
    }

    pub fn drawing(&self) -> Option<DrawHandle> {
        self.drawing
    }

    pub fn overlay(&self) -> Option<DrawHandle> {
        self.overlay
    }

    /// Sketch the wall again with a fresh hatch angle, replacing the old drawing
    pub fn refresh<S: DrawingSurface, R: Rng>(&mut self, surface: &mut S, rng: &mut R) {
        if let Some(old) = self.drawing.take() {
            surface.remove(old);
        }
        self.hachure_angle = rng.random_range(0.0..360.0);
        let style = shapes::wall_style(&self.color, self.hachure_angle);
        self.drawing = Some(surface.draw_polygon(Layer::Background, &self.corners, &style));
    }

    /// Re-sketch the wall and start highlighting `target`, replacing any
    /// effect still running. The first overlay frame is drawn on the next
    /// [`Wall::update_effect`].
    pub fn start_impact<S: DrawingSurface, R: Rng>(
        &mut self,
        target: Point2,
        now: f64,
        surface: &mut S,
        rng: &mut R,
    ) {
        self.clear_overlay(surface);
        self.refresh(surface, rng);
        self.effect = Some(ImpactEffect::with_duration(target, now, self.effect_duration_ms));
        self.next_overlay_at = f64::NEG_INFINITY;
    }

    /// Advance the running effect, if any. Returns false once the wall is idle.
    pub fn update_effect<S: DrawingSurface, R: Rng>(
        &mut self,
        now: f64,
        throttle: Throttle,
        surface: &mut S,
        rng: &mut R,
    ) -> bool {
        let Some(effect) = &self.effect else {
            return false;
        };

        if effect.is_finished(now) {
            self.clear_overlay(surface);
            self.effect = None;
            return false;
        }
        if now < self.next_overlay_at {
            return true;
        }

        match effect.sample(now, &self.corners) {
            EffectSample::Active(frame) => {
                let style = shapes::impact_style(
                    &self.impact_color,
                    self.hachure_angle,
                    frame.hachure_gap,
                    frame.fill_weight,
                );
                self.clear_overlay(surface);
                self.overlay = Some(surface.draw_polygon(Layer::Background, &frame.points, &style));
                self.next_overlay_at = throttle.next_after(now, rng);
                true
            }
            EffectSample::Finished => {
                self.clear_overlay(surface);
                self.effect = None;
                false
            }
        }
    }

    fn clear_overlay<S: DrawingSurface>(&mut self, surface: &mut S) {
        if let Some(old) = self.overlay.take() {
            surface.remove(old);
        }
    }
}
