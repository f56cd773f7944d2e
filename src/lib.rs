//! Boxwood - WASM Module
//!
//! This module provides the layout engine for the Boxwood box-and-pointer
//! diagram library. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `value`: Host value boundary (capability trait + wire encoding)
//! - `tree`: Cycle-aware tree construction with id memoization
//! - `layout`: Canvas estimation and recursive node placement
//! - `draw`: Edge routing, text fitting, and the paint pass
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `engine`: Pipeline orchestration, drawing history, query indices

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod draw;
pub mod engine;
pub mod error;
pub mod layout;
pub mod spatial;
pub mod tree;
pub mod value;

use engine::VisualizerEngine;
use error::VisualizeError;
use layout::DrawConfig;
use value::EncodedHeap;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for the visualizer.
///
/// This struct wraps the internal VisualizerEngine and provides the
/// public API exposed to JavaScript.
#[wasm_bindgen]
pub struct BoxwoodWasm {
    engine: VisualizerEngine,
}

#[wasm_bindgen]
impl BoxwoodWasm {
    /// Create a new visualizer with default geometry.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: VisualizerEngine::new(),
        }
    }

    // =========================================================================
    // Visualization
    // =========================================================================

    /// Visualize an encoded pair structure.
    ///
    /// Takes `{ cells: [{left, right}, ...], root: {...} }` where each
    /// slot is a tagged object (`{kind: "pair", cell}`, `{kind: "null"}`,
    /// `{kind: "callable", id}`, `{kind: "number", value}`, ...).
    ///
    /// Returns the finished drawing and appends it to the history. Any
    /// `*N` labels assigned to oversized values are echoed to the
    /// console. A malformed structure throws without touching history.
    pub fn visualize(&mut self, structure: JsValue) -> Result<JsValue, JsError> {
        let heap: EncodedHeap = serde_wasm_bindgen::from_value(structure)
            .map_err(|e| VisualizeError::UnrecognizedShape(e.to_string()))?;
        let root = heap.root_value()?;
        let drawing = self.engine.visualize(&heap, root)?;

        for label in &drawing.labels {
            web_sys::console::log_1(&JsValue::from_str(&format!(
                "*{} = {}",
                label.number, label.text
            )));
        }
        Ok(serde_wasm_bindgen::to_value(drawing)?)
    }

    /// Get the visible drawing, or null when there is none.
    #[wasm_bindgen(js_name = currentDrawing)]
    pub fn current_drawing(&self) -> Result<JsValue, JsError> {
        match self.engine.current_drawing() {
            Some(drawing) => Ok(serde_wasm_bindgen::to_value(drawing)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Drop all drawings and derived state.
    pub fn clear(&mut self) {
        self.engine.clear();
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Get the number of retained drawings.
    #[wasm_bindgen(js_name = drawingCount)]
    pub fn drawing_count(&self) -> u32 {
        self.engine.drawing_count()
    }

    /// Get the index of the visible drawing.
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Option<u32> {
        self.engine.current_index()
    }

    /// Make the drawing at `index` visible.
    ///
    /// Returns true if the index was in range.
    #[wasm_bindgen(js_name = showDrawing)]
    pub fn show_drawing(&mut self, index: u32) -> bool {
        self.engine.show_drawing(index as usize)
    }

    /// Step forward in history.
    #[wasm_bindgen(js_name = showNext)]
    pub fn show_next(&mut self) -> bool {
        self.engine.show_next()
    }

    /// Step backward in history.
    #[wasm_bindgen(js_name = showPrevious)]
    pub fn show_previous(&mut self) -> bool {
        self.engine.show_previous()
    }

    // =========================================================================
    // Queries (visible drawing)
    // =========================================================================

    /// Get the number of nodes in the visible drawing.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.engine.node_count()
    }

    /// Get the number of edges in the visible drawing.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.engine.edge_count()
    }

    /// Get the ids a node's slots point at.
    ///
    /// Returns a Uint32Array of node IDs, forward and back edges alike.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Vec<u32> {
        self.engine.neighbors(node_id)
    }

    /// Find the node whose drawn box contains the point.
    #[wasm_bindgen(js_name = hitTest)]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<u32> {
        self.engine.hit_test(x, y)
    }

    /// Find the nearest node to a point.
    ///
    /// Returns the node ID, or None if the drawing is empty.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&self, x: f32, y: f32) -> Option<u32> {
        self.engine.find_nearest_node(x, y)
    }

    /// Find the nearest node within a maximum distance of the point.
    ///
    /// Returns the node ID, or None if no node is within the distance.
    #[wasm_bindgen(js_name = findNearestNodeWithin)]
    pub fn find_nearest_node_within(&self, x: f32, y: f32, max_distance: f32) -> Option<u32> {
        self.engine.find_nearest_node_within(x, y, max_distance)
    }

    /// Find all nodes whose boxes intersect a rectangular region.
    ///
    /// Returns a Uint32Array of node IDs in id order.
    #[wasm_bindgen(js_name = findNodesInRect)]
    pub fn find_nodes_in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<u32> {
        self.engine.nodes_in_rect(min_x, min_y, max_x, max_y)
    }

    /// Get the interleaved [x0, y0, x1, y1, ...] top-left anchors of
    /// the visible drawing's nodes, in id order.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float32Array {
        Float32Array::from(self.engine.positions())
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the geometry constants. Fields omitted from the object
    /// keep their defaults. Only future visualize calls are affected.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let config: DrawConfig = serde_wasm_bindgen::from_value(config)?;
        self.engine.set_config(config);
        Ok(())
    }

    /// Get the current geometry constants.
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.engine.config())?)
    }
}

impl Default for BoxwoodWasm {
    fn default() -> Self {
        Self::new()
    }
}
