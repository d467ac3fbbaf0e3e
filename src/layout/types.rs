use serde::{Deserialize, Serialize};

use super::error::{LayoutError, Result};
use super::geometry::Point;

/// One wedge of the chart, identified by dataset index and mid-angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub index: usize,
    pub mid_angle: f64,
}

impl Segment {
    /// Angles outside `[0, 360)` are wrapped into range.
    pub fn new(index: usize, mid_angle: f64) -> Self {
        // rem_euclid rounds tiny negative angles up to exactly 360.
        let wrapped = mid_angle.rem_euclid(360.0);
        Self {
            index,
            mid_angle: if wrapped >= 360.0 { 0.0 } else { wrapped },
        }
    }

    /// Segments built by hand must keep their mid-angle in `[0, 360)`.
    pub(crate) fn validate(&self) -> Result<()> {
        if (0.0..360.0).contains(&self.mid_angle) {
            Ok(())
        } else {
            Err(LayoutError::geometry(format!(
                "segment {} has mid-angle {} outside [0, 360)",
                self.index, self.mid_angle
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    Left,
    Right,
}

impl Hemisphere {
    pub fn for_angle(mid_angle: f64) -> Self {
        if mid_angle > 180.0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

impl LabelSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub(crate) fn validate(self, index: usize) -> Result<Self> {
        let ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0;
        if ok {
            Ok(self)
        } else {
            Err(LayoutError::InvalidSize {
                index,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Top-left anchored bounding box of an outer label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelBox {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub hemisphere: Hemisphere,
}

impl LabelBox {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Strict axis-aligned overlap; boxes that only touch do not intersect.
    pub fn intersects(&self, other: &LabelBox) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Chart geometry for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieGeometry {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub line_length: f64,
}

impl PieGeometry {
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64, line_length: f64) -> Result<Self> {
        let geometry = Self {
            center,
            inner_radius,
            outer_radius,
            line_length,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(LayoutError::geometry("center must be finite"));
        }
        for (name, value) in [
            ("inner radius", self.inner_radius),
            ("outer radius", self.outer_radius),
            ("line length", self.line_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::geometry(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }
        if self.inner_radius > self.outer_radius {
            return Err(LayoutError::geometry(format!(
                "inner radius {} exceeds outer radius {}",
                self.inner_radius, self.outer_radius
            )));
        }
        Ok(())
    }

    /// Radius of the circle ideal and shifted label positions sit on.
    pub fn label_radius(&self) -> f64 {
        self.outer_radius + self.line_length
    }
}

/// Wedge edge point, bend point, label anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorPath(pub [Point; 3]);

impl ConnectorPath {
    pub fn points(&self) -> &[Point; 3] {
        &self.0
    }

    pub fn start(&self) -> Point {
        self.0[0]
    }

    pub fn mid(&self) -> Point {
        self.0[1]
    }

    pub fn end(&self) -> Point {
        self.0[2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedReason {
    /// The shift step ran past the pole of the label circle.
    DegenerateShift,
    /// The shifted box still overlaps an earlier label.
    PersistentOverlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedCollision {
    pub index: usize,
    pub reason: UnresolvedReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub shifted: Vec<usize>,
    pub unresolved: Vec<UnresolvedCollision>,
}

impl CollisionReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn shift_count(&self) -> usize {
        self.shifted.len()
    }

    pub fn is_unresolved(&self, index: usize) -> bool {
        self.unresolved.iter().any(|entry| entry.index == index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLabel {
    pub index: usize,
    pub mid_angle: f64,
    pub label_box: LabelBox,
    pub connector: ConnectorPath,
}

impl PlacedLabel {
    pub fn position(&self) -> Point {
        self.label_box.position()
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.label_box.hemisphere
    }
}

/// Final outer label layout, ordered by dataset index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLayout {
    pub geometry: PieGeometry,
    pub labels: Vec<PlacedLabel>,
    pub report: CollisionReport,
}

impl LabelLayout {
    pub fn final_positions(&self) -> Vec<Point> {
        self.labels.iter().map(PlacedLabel::position).collect()
    }

    pub fn connector_paths(&self) -> Vec<ConnectorPath> {
        self.labels.iter().map(|label| label.connector).collect()
    }

    pub fn hemispheres(&self) -> Vec<Hemisphere> {
        self.labels.iter().map(PlacedLabel::hemisphere).collect()
    }

    pub fn boxes(&self) -> Vec<LabelBox> {
        self.labels.iter().map(|label| label.label_box).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InnerLabel {
    pub index: usize,
    pub position: Point,
}
