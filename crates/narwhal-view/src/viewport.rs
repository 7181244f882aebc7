use crate::geom::{Point, Rect, Size, Vector};
use serde::{Deserialize, Serialize};

/// Camera state of one view.
///
/// `origin` is the world point shown at the top-left corner of the canvas; `size` is the canvas
/// size in pixels, so the visible world area is `size / zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub world: Rect,
    pub zoom: f64,
    pub origin: Point,
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            world: Rect::zero(),
            zoom: 1.0,
            origin: Point::origin(),
            size: Size::zero(),
        }
    }
}

impl Viewport {
    /// Visible world extent.
    pub fn visible_size(&self) -> Size {
        self.size / self.zoom
    }

    pub fn center(&self) -> Point {
        self.origin + self.visible_size().to_vector() / 2.0
    }

    /// Origin that puts `center` in the middle of the canvas at the current zoom.
    pub fn origin_for_center(&self, center: Point) -> Point {
        center - self.visible_size().to_vector() / 2.0
    }

    pub fn visible_rect(&self) -> Rect {
        Rect::new(self.origin, self.visible_size())
    }

    /// Converts a canvas (pixel) delta into a world delta.
    pub fn to_world_delta(&self, delta: Vector) -> Vector {
        delta / self.zoom
    }
}
