//! Sketchy renderer options
//!
//! Field names serialize to the renderer's own camelCase option names so a
//! `Style` can be handed over as JSON unchanged.

use serde::{Deserialize, Serialize};

/// Fill pattern algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    #[default]
    Hachure,
    Solid,
    Zigzag,
    CrossHatch,
    Dots,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    /// CSS color, or "none"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    pub fill_style: FillStyle,
    /// Degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hachure_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hachure_gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_weight: Option<f64>,
    /// Positional jitter of strokes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
    /// Circle smoothness; low values look angular
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve_step_count: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_multi_stroke: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_multi_stroke_fill: bool,
}

/// Default palette
pub mod colors {
    pub const LEFT_WALL: &str = "#008000";
    pub const RIGHT_WALL: &str = "#000080";
    pub const TOP_WALL: &str = "#808000";
    pub const BOTTOM_WALL: &str = "#008080";
    pub const BACK_WALL: &str = "#800000";
    /// The front face itself is never filled
    pub const FRONT_WALL: &str = "none";
    pub const FRONT_WALL_IMPACT: &str = "#800080";
    pub const BALL: &str = "#ffa0a0";
    pub const NONE: &str = "none";
}
