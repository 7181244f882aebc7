//! What the engine needs from a rendering surface. Painting itself happens elsewhere.

use crate::geom::{Point, Rect};
use crate::viewport::Viewport;
use narwhal_core::{EdgeIx, GraphKind, NodeIx, RedrawKind};

/// Which graph a surface is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHandle(pub GraphKind);

/// A node under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Raw(NodeIx),
    /// A proximity marker, identified by the node it is attached to.
    Marker(NodeIx),
}

/// A bend point of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BendRef {
    pub edge: EdgeIx,
    pub index: usize,
}

/// Result of hit-testing a canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hit {
    /// Off the canvas.
    Outside,
    Background,
    Node(NodeRef),
    Edge(EdgeIx),
    Bend(BendRef),
}

pub trait RenderSurface {
    /// Hit-tests a canvas (pixel) position.
    fn hit_test(&self, position: Point) -> Hit;

    fn viewport(&self) -> Viewport;

    fn set_viewport(&mut self, world: Rect, zoom: f64, origin: Point);

    /// Moves the camera so `center` is in the middle of the canvas, keeping zoom.
    fn set_center(&mut self, center: Point) {
        let vp = self.viewport();
        self.set_viewport(vp.world, vp.zoom, vp.origin_for_center(center));
    }

    fn rendered_width(&self) -> f64 {
        self.viewport().size.width
    }

    fn request_redraw(&mut self, kind: RedrawKind);

    fn content(&self) -> ContentHandle;

    fn set_content(&mut self, content: ContentHandle);

    /// Bounding box of the current content in world coordinates.
    fn content_bounds(&self) -> Rect;

    /// Number of nodes in the current content.
    fn node_count(&self) -> usize;
}
