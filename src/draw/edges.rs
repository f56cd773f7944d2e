//! Edge routing and arrowhead geometry.
//!
//! # Algorithm Overview
//!
//! Forward edges (parent slot to a freshly placed child) are straight
//! lines from the slot center to the middle of the child's top edge.
//! Back edges (parent slot to a node that already had a position when
//! the slot was drawn) are orthogonal multi-segment paths: drop below
//! the source box, run sideways to a rail just outside the target's
//! near column, run along the rail to the target's vertical center,
//! and enter through the middle of the target's near side edge. The
//! rail side comes from the quadrant the target lies in relative to
//! the source, classified by [`BackEdgeRoute::classify`]. Both edge
//! kinds end in the same arrowhead, built from the direction of the
//! final segment.

use crate::draw::primitives::{Bounds, Point};
use crate::layout::DrawConfig;

/// The four orthogonal back-edge variants, named source to target.
///
/// Ties resolve toward the lower and right variants: a target on the
/// same row counts as below, a target in the same column counts as to
/// the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackEdgeRoute {
    /// Target is up and to the left of the source.
    LowerRightToUpperLeft,
    /// Target is up and to the right.
    LowerLeftToUpperRight,
    /// Target is down and to the left.
    UpperRightToLowerLeft,
    /// Target is down and to the right.
    UpperLeftToLowerRight,
}

impl BackEdgeRoute {
    /// Classify by where the target lies relative to the source.
    pub fn classify(source: Point, target: Point) -> Self {
        let left = target.x < source.x;
        let up = target.y < source.y;
        match (up, left) {
            (true, true) => BackEdgeRoute::LowerRightToUpperLeft,
            (true, false) => BackEdgeRoute::LowerLeftToUpperRight,
            (false, true) => BackEdgeRoute::UpperRightToLowerLeft,
            (false, false) => BackEdgeRoute::UpperLeftToLowerRight,
        }
    }

    /// Whether the path approaches the target from its left side.
    pub fn enters_left(self) -> bool {
        matches!(
            self,
            BackEdgeRoute::LowerRightToUpperLeft | BackEdgeRoute::UpperRightToLowerLeft
        )
    }
}

/// Straight path for a forward edge: slot center to the middle of the
/// child's top edge.
pub fn route_forward(source: Point, target: Bounds) -> Vec<Point> {
    vec![source, target.top_entry()]
}

/// Orthogonal path for a back edge.
///
/// The drop distance is one box height, which clears the source box;
/// the rail runs half a slot width outside the target column, which
/// keeps it off the boxes in that column.
pub fn route_back(source: Point, target: Bounds, config: &DrawConfig) -> Vec<Point> {
    let center = Point::new(target.x + target.width * 0.5, target.y + target.height * 0.5);
    let route = BackEdgeRoute::classify(source, center);

    let drop = source.y + config.box_height;
    let clearance = config.box_width * 0.5;
    let (rail, entry) = if route.enters_left() {
        (target.x - clearance, target.left_entry())
    } else {
        (target.right() + clearance, target.right_entry())
    };

    vec![
        source,
        Point::new(source.x, drop),
        Point::new(rail, drop),
        Point::new(rail, entry.y),
        entry,
    ]
}

/// Arrowhead polyline for an edge ending at `tip`, arriving from
/// `from`: two wings swept `arrow_angle` off the reversed final
/// segment, `arrow_length` long, meeting at the tip.
pub fn arrowhead(from: Point, tip: Point, config: &DrawConfig) -> [Point; 3] {
    let theta = (from.y - tip.y).atan2(from.x - tip.x);
    let left = theta + config.arrow_angle;
    let right = theta - config.arrow_angle;
    [
        Point::new(
            tip.x + config.arrow_length * left.cos(),
            tip.y + config.arrow_length * left.sin(),
        ),
        tip,
        Point::new(
            tip.x + config.arrow_length * right.cos(),
            tip.y + config.arrow_length * right.sin(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthogonal(points: &[Point]) {
        for pair in points.windows(2) {
            let same_x = (pair[0].x - pair[1].x).abs() < 1e-6;
            let same_y = (pair[0].y - pair[1].y).abs() < 1e-6;
            assert!(
                same_x || same_y,
                "segment {:?} -> {:?} is not axis-aligned",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_classify_quadrants() {
        let source = Point::new(200.0, 200.0);
        assert_eq!(
            BackEdgeRoute::classify(source, Point::new(50.0, 50.0)),
            BackEdgeRoute::LowerRightToUpperLeft
        );
        assert_eq!(
            BackEdgeRoute::classify(source, Point::new(300.0, 50.0)),
            BackEdgeRoute::LowerLeftToUpperRight
        );
        assert_eq!(
            BackEdgeRoute::classify(source, Point::new(50.0, 300.0)),
            BackEdgeRoute::UpperRightToLowerLeft
        );
        assert_eq!(
            BackEdgeRoute::classify(source, Point::new(300.0, 300.0)),
            BackEdgeRoute::UpperLeftToLowerRight
        );
    }

    #[test]
    fn test_classify_ties_go_right_and_down() {
        let source = Point::new(200.0, 200.0);
        // Same column: counts as right. Same row: counts as below.
        assert_eq!(
            BackEdgeRoute::classify(source, Point::new(200.0, 50.0)),
            BackEdgeRoute::LowerLeftToUpperRight
        );
        assert_eq!(
            BackEdgeRoute::classify(source, Point::new(50.0, 200.0)),
            BackEdgeRoute::UpperRightToLowerLeft
        );
        assert_eq!(
            BackEdgeRoute::classify(source, source),
            BackEdgeRoute::UpperLeftToLowerRight
        );
    }

    #[test]
    fn test_route_back_to_upper_left() {
        let config = DrawConfig::default();
        let source = Point::new(200.0, 200.0);
        let target = Bounds::new(50.0, 30.0, 90.0, 25.0);

        let points = route_back(source, target, &config);
        assert_eq!(points.len(), 5);
        assert_orthogonal(&points);
        assert_eq!(points[0], source);
        // Drops one box height, rails half a slot left of the target,
        // enters the left edge at its middle.
        assert_eq!(points[1], Point::new(200.0, 225.0));
        assert_eq!(points[2], Point::new(27.5, 225.0));
        assert_eq!(points[4], Point::new(50.0, 42.5));
    }

    #[test]
    fn test_route_back_to_upper_right() {
        let config = DrawConfig::default();
        let source = Point::new(50.0, 200.0);
        let target = Bounds::new(200.0, 30.0, 90.0, 25.0);

        let points = route_back(source, target, &config);
        assert_eq!(points.len(), 5);
        assert_orthogonal(&points);
        assert_eq!(points[2], Point::new(312.5, 225.0));
        assert_eq!(points[4], Point::new(290.0, 42.5));
    }

    #[test]
    fn test_route_back_downward() {
        let config = DrawConfig::default();
        let source = Point::new(50.0, 50.0);
        let target = Bounds::new(200.0, 150.0, 90.0, 25.0);

        let points = route_back(source, target, &config);
        assert_orthogonal(&points);
        assert_eq!(points[1], Point::new(50.0, 75.0));
        assert_eq!(points[4], Point::new(290.0, 162.5));
    }

    #[test]
    fn test_self_loop_wraps_around() {
        // Left slot referencing its own box. The box center is right
        // of the slot anchor, so the loop runs under the box and
        // enters its right edge.
        let config = DrawConfig::default();
        let target = Bounds::new(100.0, 100.0, 90.0, 25.0);
        let source = Point::new(122.5, 112.5);

        let points = route_back(source, target, &config);
        assert_orthogonal(&points);
        assert_eq!(points[4], Point::new(190.0, 112.5));
        assert!(points[2].x > target.right());
        assert!(points[1].y > target.bottom());
    }

    #[test]
    fn test_forward_route_hits_top_center() {
        let target = Bounds::new(80.0, 90.0, 90.0, 25.0);
        let points = route_forward(Point::new(52.5, 42.5), target);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], Point::new(125.0, 90.0));
    }

    #[test]
    fn test_arrowhead_wings() {
        let config = DrawConfig::default();
        // Horizontal approach from the left.
        let head = arrowhead(Point::new(0.0, 10.0), Point::new(10.0, 10.0), &config);

        assert_eq!(head[1], Point::new(10.0, 10.0));
        for wing in [head[0], head[2]] {
            let d = ((wing.x - 10.0).powi(2) + (wing.y - 10.0).powi(2)).sqrt();
            assert!((d - config.arrow_length).abs() < 1e-4);
            assert!(wing.x < 10.0);
        }
        // Wings sit symmetric about the shaft.
        assert!((head[0].y + head[2].y - 20.0).abs() < 1e-4);
        assert!((head[0].x - head[2].x).abs() < 1e-4);
    }
}
