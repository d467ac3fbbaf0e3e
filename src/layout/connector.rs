use serde::{Deserialize, Serialize};

use super::geometry::{Point, point_on_circle, radial_unit};
use super::types::{ConnectorPath, LabelBox, PieGeometry};

pub const DEFAULT_LABEL_MARGIN: f64 = 6.0;
pub const DEFAULT_HEIGHT_OFFSET_DIVISOR: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorEdge {
    Left,
    Right,
}

/// Which side of the label box the line ends on, indexed by quadrant.
/// Quadrants 0 and 1 anchor left, 2 and 3 anchor right.
pub const QUADRANT_ANCHORS: [AnchorEdge; 4] = [
    AnchorEdge::Left,
    AnchorEdge::Left,
    AnchorEdge::Right,
    AnchorEdge::Right,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorStyle {
    /// Distance past the outer radius of the bend point.
    pub midpoint_distance: f64,
    /// Horizontal gap between the line end and the label box.
    pub label_margin: f64,
    pub height_offset_divisor: f64,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self {
            midpoint_distance: 8.0,
            label_margin: DEFAULT_LABEL_MARGIN,
            height_offset_divisor: DEFAULT_HEIGHT_OFFSET_DIVISOR,
        }
    }
}

pub fn quadrant(mid_angle: f64) -> usize {
    ((mid_angle.rem_euclid(360.0) / 90.0).floor() as usize).min(3)
}

pub fn anchor_edge(mid_angle: f64) -> AnchorEdge {
    QUADRANT_ANCHORS[quadrant(mid_angle)]
}

pub fn label_anchor(label_box: &LabelBox, mid_angle: f64, style: &ConnectorStyle) -> Point {
    let height_offset = if style.height_offset_divisor > 0.0 {
        label_box.h / style.height_offset_divisor
    } else {
        0.0
    };
    let x = match anchor_edge(mid_angle) {
        AnchorEdge::Left => label_box.x - style.label_margin,
        AnchorEdge::Right => label_box.x + label_box.w + style.label_margin,
    };
    Point::new(x, label_box.y - height_offset)
}

/// Three-point connector from the wedge edge to the label's anchor side.
pub fn route_connector(
    label_box: &LabelBox,
    mid_angle: f64,
    geometry: &PieGeometry,
    style: &ConnectorStyle,
) -> ConnectorPath {
    let origin = point_on_circle(geometry.center, geometry.outer_radius, mid_angle);
    let bend_radius = geometry.outer_radius + style.midpoint_distance;
    let dir = radial_unit(mid_angle);
    let bend = Point::new(
        geometry.center.x + dir.x * bend_radius,
        geometry.center.y + dir.y * bend_radius,
    );
    let end = label_anchor(label_box, mid_angle, style);
    ConnectorPath([origin, bend, end])
}
