//! Drawing service abstraction
//!
//! The actual strokes come from a sketchy (hand-drawn look) renderer owned by
//! the host. This module only describes what to draw and keeps handles so
//! drawings can be taken away again.

pub mod recording;
pub mod shapes;
pub mod style;

pub use recording::RecordingSurface;
pub use style::{FillStyle, Style};

use serde::{Deserialize, Serialize};

use crate::Point2;

/// Identifies one drawing on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawHandle(pub u64);

/// Stacking group. Background holds walls and impact overlays, the ball sits
/// on top in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Background,
    Foreground,
}

impl Layer {
    /// Host element id of the group
    pub fn element_id(self) -> &'static str {
        match self {
            Layer::Background => "background",
            Layer::Foreground => "foreground",
        }
    }
}

/// Something that can draw sketchy polygons and circles
pub trait DrawingSurface {
    fn draw_polygon(&mut self, layer: Layer, points: &[Point2], style: &Style) -> DrawHandle;

    fn draw_circle(
        &mut self,
        layer: Layer,
        center: Point2,
        diameter: f64,
        style: &Style,
    ) -> DrawHandle;

    /// Take a drawing away immediately
    fn remove(&mut self, handle: DrawHandle);

    /// Take a drawing away, possibly with a short fade-out
    fn fade(&mut self, handle: DrawHandle) {
        self.remove(handle);
    }
}
