//! The paint pass: node graph plus layout in, finished drawing out.
//!
//! The pass walks the arena in id order and emits primitive ops into
//! three groups that concatenate into paint order: background (back
//! edges and their arrowheads), then node boxes, circles and slot
//! contents, then forward edges. Painting back edges first keeps
//! cycle arrows behind the boxes they cross.
//!
//! Canvas dimensions start from the up-front estimate and grow to the
//! placed extent when function circles or routed edges spill past it.

use crate::draw::drawing::{Drawing, Edge, NodeShape, PositionedNode};
use crate::draw::edges::{arrowhead, route_back, route_forward};
use crate::draw::primitives::{Bounds, DrawOp, Layer, Point};
use crate::draw::text::{slot_text, to_text, LabelAllocator};
use crate::layout::{canvas_size, DrawConfig, LayoutResult};
use crate::tree::{Node, NodeGraph, NodeId, NodeKind, Slot};
use crate::value::Scalar;

/// Coarse width of one drawn character, used to size the canvas for a
/// bare scalar. Surfaces with real font metrics can re-measure.
const CHAR_WIDTH: f32 = 8.0;

/// Paint a placed pair tree into a drawing.
pub fn paint(graph: &NodeGraph, layout: &LayoutResult, config: &DrawConfig) -> Drawing {
    let nodes: Vec<PositionedNode> = graph
        .iter()
        .map(|node| positioned(node, layout, config))
        .collect();

    let mut painter = Painter {
        config,
        nodes: &nodes,
        labels: LabelAllocator::new(),
        background: Vec::new(),
        node_ops: Vec::new(),
        arrows: Vec::new(),
        edges: Vec::new(),
    };
    for node in graph.iter() {
        painter.paint_node(node);
    }

    let Painter {
        labels,
        background,
        node_ops,
        arrows,
        edges,
        ..
    } = painter;

    let (width, height) = grown_canvas(graph, config, &nodes, &edges);
    let mut ops = background;
    ops.extend(node_ops);
    ops.extend(arrows);

    Drawing {
        nodes,
        edges,
        ops,
        labels: labels.into_entries(),
        width,
        height,
    }
}

/// One-op drawing for a bare top-level scalar or null.
pub fn paint_scalar(value: &Scalar, config: &DrawConfig) -> Drawing {
    let text = to_text(value, true).unwrap_or_default();
    let width = 2.0 * config.margin + text.chars().count() as f32 * CHAR_WIDTH;
    let height = 2.0 * config.margin + config.box_height;
    Drawing {
        nodes: Vec::new(),
        edges: Vec::new(),
        ops: vec![DrawOp::Text {
            x: width * 0.5,
            y: height * 0.5,
            text,
            layer: Layer::Nodes,
        }],
        labels: Vec::new(),
        width,
        height,
    }
}

/// Single-circle drawing for a bare top-level callable.
pub fn paint_function(config: &DrawConfig) -> Drawing {
    let r = config.function_radius;
    let side = 2.0 * r;
    Drawing {
        nodes: vec![PositionedNode {
            id: 0,
            shape: NodeShape::FunctionCircle,
            x: config.margin,
            y: config.margin,
            width: side,
            height: side,
        }],
        edges: Vec::new(),
        ops: vec![DrawOp::Circle {
            cx: config.margin + r,
            cy: config.margin + r,
            radius: r,
            layer: Layer::Nodes,
        }],
        labels: Vec::new(),
        width: 2.0 * config.margin + side,
        height: 2.0 * config.margin + side,
    }
}

fn positioned(node: &Node, layout: &LayoutResult, config: &DrawConfig) -> PositionedNode {
    let p = layout.get(node.id);
    let (shape, width, height) = match node.kind {
        NodeKind::Pair { .. } => (NodeShape::PairBox, config.pair_width(), config.box_height),
        NodeKind::Function => {
            let side = 2.0 * config.function_radius;
            (NodeShape::FunctionCircle, side, side)
        }
    };
    PositionedNode {
        id: node.id.raw(),
        shape,
        x: p.x,
        y: p.y,
        width,
        height,
    }
}

fn grown_canvas(
    graph: &NodeGraph,
    config: &DrawConfig,
    nodes: &[PositionedNode],
    edges: &[Edge],
) -> (f32, f32) {
    let (est_w, est_h) = canvas_size(graph, config);
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for node in nodes {
        max_x = max_x.max(node.x + node.width);
        max_y = max_y.max(node.y + node.height);
    }
    for edge in edges {
        for p in &edge.points {
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
    }
    (
        est_w.max(max_x + config.margin),
        est_h.max(max_y + config.margin),
    )
}

struct Painter<'a> {
    config: &'a DrawConfig,
    nodes: &'a [PositionedNode],
    labels: LabelAllocator,
    background: Vec<DrawOp>,
    node_ops: Vec<DrawOp>,
    arrows: Vec<DrawOp>,
    edges: Vec<Edge>,
}

impl Painter<'_> {
    fn paint_node(&mut self, node: &Node) {
        let bounds = self.nodes[node.id.index()].bounds();
        match &node.kind {
            NodeKind::Function => {
                let r = self.config.function_radius;
                self.node_ops.push(DrawOp::Circle {
                    cx: bounds.x + r,
                    cy: bounds.y + r,
                    radius: r,
                    layer: Layer::Nodes,
                });
            }
            NodeKind::Pair { left, right } => {
                self.node_ops.push(DrawOp::Rect {
                    x: bounds.x,
                    y: bounds.y,
                    width: bounds.width,
                    height: bounds.height,
                    layer: Layer::Nodes,
                });
                let mid_x = bounds.x + self.config.box_width;
                self.node_ops.push(DrawOp::Polyline {
                    points: vec![
                        Point::new(mid_x, bounds.y),
                        Point::new(mid_x, bounds.bottom()),
                    ],
                    layer: Layer::Nodes,
                });

                let slot_w = self.config.box_width;
                self.paint_slot(
                    node.id,
                    left,
                    Bounds::new(bounds.x, bounds.y, slot_w, bounds.height),
                );
                self.paint_slot(
                    node.id,
                    right,
                    Bounds::new(mid_x, bounds.y, slot_w, bounds.height),
                );
            }
        }
    }

    fn paint_slot(&mut self, parent: NodeId, slot: &Slot, slot_box: Bounds) {
        let anchor = Point::new(
            slot_box.x + slot_box.width * 0.5,
            slot_box.y + slot_box.height * 0.5,
        );
        match slot {
            Slot::Data(value) => {
                let text = slot_text(value, &mut self.labels);
                self.node_ops.push(DrawOp::Text {
                    x: anchor.x,
                    y: anchor.y,
                    text,
                    layer: Layer::Nodes,
                });
            }
            Slot::Null => {
                // Slash from the bottom-left to the top-right corner.
                self.node_ops.push(DrawOp::Polyline {
                    points: vec![
                        Point::new(slot_box.x, slot_box.bottom()),
                        Point::new(slot_box.right(), slot_box.y),
                    ],
                    layer: Layer::Nodes,
                });
            }
            Slot::Node(child) => self.forward_edge(parent, *child, anchor),
            Slot::Back(target) => self.back_edge(parent, *target, anchor),
        }
    }

    fn forward_edge(&mut self, parent: NodeId, child: NodeId, anchor: Point) {
        let target = self.nodes[child.index()].bounds();
        let points = route_forward(anchor, target);
        let to_pos = points[points.len() - 1];
        let head = arrowhead(anchor, to_pos, self.config);

        self.arrows.push(DrawOp::Polyline {
            points: points.clone(),
            layer: Layer::Arrows,
        });
        self.arrows.push(DrawOp::Polyline {
            points: head.to_vec(),
            layer: Layer::Arrows,
        });
        self.edges.push(Edge {
            from_id: parent.raw(),
            to_id: child.raw(),
            is_back_edge: false,
            from_pos: anchor,
            to_pos,
            points,
        });
    }

    fn back_edge(&mut self, parent: NodeId, target: NodeId, anchor: Point) {
        let target_bounds = self.nodes[target.index()].bounds();
        let points = route_back(anchor, target_bounds, self.config);
        let to_pos = points[points.len() - 1];
        let head = arrowhead(points[points.len() - 2], to_pos, self.config);

        self.background.push(DrawOp::Polyline {
            points: points.clone(),
            layer: Layer::Background,
        });
        self.background.push(DrawOp::Polyline {
            points: head.to_vec(),
            layer: Layer::Background,
        });
        self.edges.push(Edge {
            from_id: parent.raw(),
            to_id: target.raw(),
            is_back_edge: true,
            from_pos: anchor,
            to_pos,
            points,
        });
    }
}
