//! Option bags for the things we draw

use super::style::{FillStyle, Style, colors};
use crate::consts::EFFECT_ANGLE_OFFSET;

/// A box face. `hachure_angle` is re-rolled on every redraw so the wall
/// looks freshly sketched each time it is hit.
pub fn wall_style(color: &str, hachure_angle: f64) -> Style {
    Style {
        fill: Some(color.to_owned()),
        stroke: Some(colors::NONE.to_owned()),
        fill_style: FillStyle::Zigzag,
        hachure_gap: Some(5.0),
        hachure_angle: Some(hachure_angle),
        disable_multi_stroke_fill: true,
        ..Default::default()
    }
}

/// The shrinking-in overlay drawn on a wall after an impact
pub fn impact_style(
    impact_color: &str,
    wall_hachure_angle: f64,
    hachure_gap: f64,
    fill_weight: f64,
) -> Style {
    Style {
        fill: Some(impact_color.to_owned()),
        fill_style: FillStyle::CrossHatch,
        hachure_angle: Some(wall_hachure_angle + EFFECT_ANGLE_OFFSET),
        hachure_gap: Some(hachure_gap),
        fill_weight: Some(fill_weight),
        roughness: Some(4.0),
        ..wall_style(impact_color, wall_hachure_angle)
    }
}

/// The ball. A splat is the ball squashed against the front face.
pub fn ball_style(color: &str, splat: bool) -> Style {
    Style {
        fill: Some(color.to_owned()),
        stroke: Some(colors::NONE.to_owned()),
        stroke_width: Some(0.2),
        fill_style: FillStyle::Solid,
        roughness: Some(if splat { 1.0 } else { 0.3333 }),
        curve_step_count: Some(if splat { 50 } else { 9 }),
        disable_multi_stroke: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_style_offsets_angle() {
        let style = impact_style("#800080", 30.0, 4.0, 0.5);
        assert_eq!(style.hachure_angle, Some(75.0));
        assert_eq!(style.fill_style, FillStyle::CrossHatch);
        assert_eq!(style.fill.as_deref(), Some("#800080"));
        assert_eq!(style.hachure_gap, Some(4.0));
        assert_eq!(style.fill_weight, Some(0.5));
        // Inherited from the wall look
        assert_eq!(style.stroke.as_deref(), Some("none"));
        assert!(style.disable_multi_stroke_fill);
    }

    #[test]
    fn test_splat_is_smoother_and_rougher() {
        let normal = ball_style(colors::BALL, false);
        let splat = ball_style(colors::BALL, true);
        assert_eq!(normal.curve_step_count, Some(9));
        assert_eq!(splat.curve_step_count, Some(50));
        assert!(splat.roughness > normal.roughness);
    }
}
