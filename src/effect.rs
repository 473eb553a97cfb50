//! Impact highlight on a wall
//!
//! After a bounce, a cross-hatched copy of the wall starts as a sliver around
//! the impact point and grows toward the wall outline while its hatching opens
//! up and thins out. The timeline depends only on the timestamp passed to
//! [`ImpactEffect::sample`], so sampling is idempotent and can be throttled
//! freely.

use crate::Point2;
use crate::consts::*;
use crate::linear::{LinearMap, interpolate};

/// One frame of the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub points: [Point2; 4],
    /// Fraction of the wall outline covered, 0..=1
    pub size: f64,
    pub hachure_gap: f64,
    pub fill_weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectSample {
    Active(OverlayFrame),
    Finished,
}

#[derive(Debug, Clone)]
pub struct ImpactEffect {
    pub target: Point2,
    pub start_time: f64,
    pub end_time: f64,
    size: LinearMap,
    gap: LinearMap,
    weight: LinearMap,
}

impl ImpactEffect {
    pub fn new(target: Point2, start_time: f64) -> Self {
        Self::with_duration(target, start_time, EFFECT_DURATION_MS)
    }

    pub fn with_duration(target: Point2, start_time: f64, duration_ms: f64) -> Self {
        let end_time = start_time + duration_ms;
        Self {
            target,
            start_time,
            end_time,
            size: LinearMap::new(start_time, EFFECT_SIZE_START, end_time, EFFECT_SIZE_END),
            gap: LinearMap::new(start_time, EFFECT_GAP_START, end_time, EFFECT_GAP_END),
            weight: LinearMap::new(start_time, EFFECT_WEIGHT_START, end_time, EFFECT_WEIGHT_END),
        }
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.end_time
    }

    /// Overlay geometry for `now`, given the wall's projected corners
    pub fn sample(&self, now: f64, corners: &[Point2; 4]) -> EffectSample {
        if self.is_finished(now) {
            return EffectSample::Finished;
        }

        let t = if now >= self.start_time {
            now
        } else {
            // Clock went backwards past the start, or isn't a number
            log::error!(
                "Impact effect sampled at t={} before its start {} (end {})",
                now,
                self.start_time,
                self.end_time
            );
            self.start_time
        };
        let size = self.size.at(t).clamp(0.0, 1.0);

        EffectSample::Active(OverlayFrame {
            points: corners.map(|corner| interpolate(corner, self.target, size)),
            size,
            hachure_gap: self.gap.at(t),
            fill_weight: self.weight.at(t),
        })
    }
}
