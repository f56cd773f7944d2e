//! Render-surface primitives.

use serde::Serialize;

/// A 2D point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned bounds of a drawn node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Bounds {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center of the left or right edge, where back edges enter.
    #[inline]
    pub fn left_entry(&self) -> Point {
        Point::new(self.x, self.y + self.height * 0.5)
    }

    #[inline]
    pub fn right_entry(&self) -> Point {
        Point::new(self.right(), self.y + self.height * 0.5)
    }

    /// Center of the top edge, where forward edges land.
    #[inline]
    pub fn top_entry(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y)
    }

    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Paint order groups, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Layer {
    /// Back edges and their arrowheads. Painted first so cycle arrows
    /// run behind the node boxes they cross.
    Background,
    /// Node boxes, function circles, slot text, and null slashes.
    Nodes,
    /// Forward edges and their arrowheads.
    Arrows,
}

/// One primitive operation for the rendering surface.
///
/// Ops arrive pre-sorted in paint order; `layer` is carried for
/// surfaces that keep their own scene graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    /// Axis-aligned rectangle outline.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        layer: Layer,
    },
    /// Open polyline through `points`.
    Polyline { points: Vec<Point>, layer: Layer },
    /// Text centered on (`x`, `y`).
    Text {
        x: f32,
        y: f32,
        text: String,
        layer: Layer,
    },
    /// Circle outline centered on (`cx`, `cy`).
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        layer: Layer,
    },
}

impl DrawOp {
    pub fn layer(&self) -> Layer {
        match self {
            DrawOp::Rect { layer, .. }
            | DrawOp::Polyline { layer, .. }
            | DrawOp::Text { layer, .. }
            | DrawOp::Circle { layer, .. } => *layer,
        }
    }
}
