//! Drawing configuration.

use serde::{Deserialize, Serialize};

/// Geometry constants for one drawing.
///
/// A pair box is two slots wide, so its drawn width is
/// `2 * box_width`. `distance_x` is the horizontal step unit between a
/// parent and its children; the placer multiplies it by a whole shift
/// count, never by a fraction. Configs deserialize partially: fields
/// the host omits keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawConfig {
    /// Width of one slot of a pair box (default: 45.0).
    pub box_width: f32,
    /// Height of a pair box (default: 25.0).
    pub box_height: f32,
    /// Horizontal spacing unit between parent and child (default: 50.0).
    pub distance_x: f32,
    /// Vertical spacing between tree levels (default: 60.0).
    pub distance_y: f32,
    /// Gap between the canvas edge and the drawing. Also the clearance
    /// back-edge rails run in, so it should stay above half a slot
    /// width (default: 30.0).
    pub margin: f32,
    /// Stroke width for boxes, circles and edges (default: 2.0).
    pub stroke_width: f32,
    /// Angle between an edge and each arrowhead wing, in radians
    /// (default: 0.5236, thirty degrees).
    pub arrow_angle: f32,
    /// Length of each arrowhead wing (default: 10.0).
    pub arrow_length: f32,
    /// Radius of a function circle (default: 12.0).
    pub function_radius: f32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        DrawConfig {
            box_width: 45.0,
            box_height: 25.0,
            distance_x: 50.0,
            distance_y: 60.0,
            margin: 30.0,
            stroke_width: 2.0,
            arrow_angle: 0.5236,
            arrow_length: 10.0,
            function_radius: 12.0,
        }
    }
}

impl DrawConfig {
    /// Drawn width of a pair box (both slots).
    #[inline]
    pub fn pair_width(&self) -> f32 {
        self.box_width * 2.0
    }
}
