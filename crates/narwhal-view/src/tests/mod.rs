use crate::geom::{Point, Rect, size};
use crate::*;
use narwhal_core::{
    Address, DiffDataset, DiffGraphs, GraphKind, GraphSettings, MatchKind, NodeMatch, RedrawKind,
    SideDataset,
};


/// In-memory surface that records what the engine asked of it.
#[derive(Debug, Clone)]
pub(crate) struct FakeSurface {
    pub vp: Viewport,
    pub content: ContentHandle,
    pub own_bounds: Rect,
    pub super_bounds: Rect,
    pub nodes: usize,
    pub content_log: Vec<ContentHandle>,
    pub redraws: Vec<RedrawKind>,
}

impl FakeSurface {
    pub fn new(view: GraphKind, width: f64, height: f64) -> Self {
        Self {
            vp: Viewport {
                size: size(width, height),
                ..Viewport::default()
            },
            content: ContentHandle(view),
            own_bounds: Rect::zero(),
            super_bounds: Rect::zero(),
            nodes: 1,
            content_log: Vec::new(),
            redraws: Vec::new(),
        }
    }
}

impl RenderSurface for FakeSurface {
    fn hit_test(&self, _position: Point) -> Hit {
        Hit::Background
    }

    fn viewport(&self) -> Viewport {
        self.vp
    }

    fn set_viewport(&mut self, world: Rect, zoom: f64, origin: Point) {
        self.vp.world = world;
        self.vp.zoom = zoom;
        self.vp.origin = origin;
    }

    fn request_redraw(&mut self, kind: RedrawKind) {
        self.redraws.push(kind);
    }

    fn content(&self) -> ContentHandle {
        self.content
    }

    fn set_content(&mut self, content: ContentHandle) {
        self.content_log.push(content);
        self.content = content;
    }

    fn content_bounds(&self) -> Rect {
        if self.content.0 == GraphKind::Super {
            self.super_bounds
        } else {
            self.own_bounds
        }
    }

    fn node_count(&self) -> usize {
        self.nodes
    }
}

fn side(address: u64, name: &str) -> SideDataset {
    SideDataset {
        name: Some(name.to_string()),
        address: Some(Address(address)),
        ..SideDataset::default()
    }
    .node(address, "entry")
}

pub(crate) fn graphs(settings: GraphSettings) -> DiffGraphs {
    let dataset = DiffDataset {
        primary: side(0x1000, "f"),
        secondary: side(0x2000, "f"),
        matches: vec![NodeMatch {
            primary: Address(0x1000),
            secondary: Address(0x2000),
            kind: MatchKind::Identical,
        }],
        ..DiffDataset::default()
    };
    DiffGraphs::from_dataset(&dataset, settings).unwrap()
}

/// A flow-graph diff where the secondary side has no function.
pub(crate) fn unmatched_graphs() -> DiffGraphs {
    let dataset = DiffDataset {
        primary: side(0x1000, "f"),
        secondary: SideDataset::default(),
        ..DiffDataset::default()
    };
    DiffGraphs::from_dataset(&dataset, GraphSettings::default()).unwrap()
}
