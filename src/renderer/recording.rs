//! In-memory drawing surface
//!
//! Keeps every live drawing so callers can inspect what is on screen. Used by
//! the headless native runner and by tests.

use std::collections::BTreeMap;

use super::{DrawHandle, DrawingSurface, Layer, Style};
use crate::Point2;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Vec<Point2>),
    Circle { center: Point2, diameter: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub layer: Layer,
    pub shape: Shape,
    pub style: Style,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Live drawings, oldest first
    drawings: BTreeMap<u64, Drawing>,
    next_id: u64,
    pub polygons_drawn: u64,
    pub circles_drawn: u64,
    pub removed: u64,
    pub faded: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: DrawHandle) -> Option<&Drawing> {
        self.drawings.get(&handle.0)
    }

    pub fn contains(&self, handle: DrawHandle) -> bool {
        self.drawings.contains_key(&handle.0)
    }

    pub fn live_count(&self) -> usize {
        self.drawings.len()
    }

    fn insert(&mut self, drawing: Drawing) -> DrawHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.drawings.insert(id, drawing);
        DrawHandle(id)
    }
}

impl DrawingSurface for RecordingSurface {
    fn draw_polygon(&mut self, layer: Layer, points: &[Point2], style: &Style) -> DrawHandle {
        self.polygons_drawn += 1;
        self.insert(Drawing {
            layer,
            shape: Shape::Polygon(points.to_vec()),
            style: style.clone(),
        })
    }

    fn draw_circle(
        &mut self,
        layer: Layer,
        center: Point2,
        diameter: f64,
        style: &Style,
    ) -> DrawHandle {
        self.circles_drawn += 1;
        self.insert(Drawing {
            layer,
            shape: Shape::Circle { center, diameter },
            style: style.clone(),
        })
    }

    fn remove(&mut self, handle: DrawHandle) {
        if self.drawings.remove(&handle.0).is_some() {
            self.removed += 1;
        } else {
            log::warn!("Removing unknown drawing {:?}", handle);
        }
    }

    fn fade(&mut self, handle: DrawHandle) {
        self.faded += 1;
        self.remove(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_and_remove() {
        let mut surface = RecordingSurface::new();
        let style = Style::default();
        let a = surface.draw_circle(Layer::Foreground, Point2::new(50.0, 50.0), 3.0, &style);
        let b = surface.draw_polygon(Layer::Background, &[Point2::ZERO; 4], &style);
        assert_ne!(a, b);
        assert_eq!(surface.live_count(), 2);

        surface.fade(a);
        assert!(!surface.contains(a));
        assert!(surface.contains(b));
        assert_eq!(surface.faded, 1);
        assert_eq!(surface.removed, 1);
        assert_eq!(surface.circles_drawn, 1);
        assert_eq!(surface.polygons_drawn, 1);
    }
}
