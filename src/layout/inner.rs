// Labels drawn inside their wedge. No collision pass: inner labels are sparse
// enough that the centroid heuristic below is used as-is.

use super::error::{LayoutError, Result};
use super::geometry::{Point, point_on_circle, radial_unit};
use super::types::{InnerLabel, PieGeometry, Segment};

/// Centroid of a wedge: the mid-angle point halfway through the ring.
pub fn wedge_centroid(geometry: &PieGeometry, mid_angle: f64) -> Point {
    let radius = (geometry.inner_radius + geometry.outer_radius) / 2.0;
    point_on_circle(geometry.center, radius, mid_angle)
}

/// Centroid pushed outwards by half the ring thickness.
///
/// This is a placement heuristic, not a geometric centre. For a full pie it
/// lands the label anchor on the outer edge of the wedge.
pub fn place_inner(segment: &Segment, centroid: Point, geometry: &PieGeometry) -> InnerLabel {
    let offset = (geometry.outer_radius - geometry.inner_radius) / 2.0;
    let dir = radial_unit(segment.mid_angle);
    InnerLabel {
        index: segment.index,
        position: Point::new(centroid.x + dir.x * offset, centroid.y + dir.y * offset),
    }
}

/// Inner placement with centroids supplied by the caller (e.g. from rendered paths).
pub fn place_inner_labels(
    segments: &[Segment],
    centroids: &[Point],
    geometry: &PieGeometry,
) -> Result<Vec<InnerLabel>> {
    geometry.validate()?;
    for segment in segments {
        segment.validate()?;
    }
    if centroids.len() != segments.len() {
        return Err(LayoutError::LengthMismatch {
            what: "centroids",
            expected: segments.len(),
            actual: centroids.len(),
        });
    }
    Ok(segments
        .iter()
        .zip(centroids)
        .map(|(segment, centroid)| place_inner(segment, *centroid, geometry))
        .collect())
}

pub fn compute_inner_layout(segments: &[Segment], geometry: &PieGeometry) -> Result<Vec<InnerLabel>> {
    let centroids: Vec<Point> = segments
        .iter()
        .map(|segment| wedge_centroid(geometry, segment.mid_angle))
        .collect();
    let labels = place_inner_labels(segments, &centroids, geometry)?;
    tracing::debug!(labels = labels.len(), "inner labels placed");
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn full_pie_inner_label_sits_on_outer_radius() {
        let geometry = PieGeometry::new(Point::new(50.0, 50.0), 0.0, 40.0, 10.0).unwrap();
        let labels = compute_inner_layout(&[Segment::new(0, 90.0)], &geometry).unwrap();
        assert_eq!(labels.len(), 1);
        assert!((labels[0].position.x - 90.0).abs() < EPS);
        assert!((labels[0].position.y - 50.0).abs() < EPS);
    }

    #[test]
    fn donut_offset_is_half_the_ring() {
        let geometry = PieGeometry::new(Point::new(0.0, 0.0), 60.0, 100.0, 10.0).unwrap();
        let segment = Segment::new(3, 180.0);
        let centroid = wedge_centroid(&geometry, segment.mid_angle);
        assert!((centroid.y - 80.0).abs() < EPS);
        let label = place_inner(&segment, centroid, &geometry);
        assert_eq!(label.index, 3);
        assert!((label.position.y - 100.0).abs() < EPS);
        assert!(label.position.x.abs() < EPS);
    }

    #[test]
    fn unwrapped_angles_are_rejected() {
        let geometry = PieGeometry::new(Point::new(0.0, 0.0), 0.0, 10.0, 5.0).unwrap();
        let segment = Segment {
            index: 0,
            mid_angle: 450.0,
        };
        assert!(matches!(
            compute_inner_layout(&[segment], &geometry),
            Err(LayoutError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn supplied_centroids_must_match_segments() {
        let geometry = PieGeometry::new(Point::new(0.0, 0.0), 0.0, 10.0, 5.0).unwrap();
        let err = place_inner_labels(&[Segment::new(0, 0.0), Segment::new(1, 90.0)], &[Point::default()], &geometry)
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::LengthMismatch {
                what: "centroids",
                expected: 2,
                actual: 1
            }
        );
    }
}
