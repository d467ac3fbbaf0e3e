// Greedy collision avoidance for outer labels.
//
// A single clockwise sweep: each label is compared against every label before
// it, and on the first conflict it is moved one step past the previous label
// along the label circle. Earlier labels are never moved, so conflicts that
// could only be fixed by moving them stay in place and are reported.

use super::geometry::Point;
use super::types::{
    CollisionReport, Hemisphere, LabelBox, PieGeometry, UnresolvedCollision, UnresolvedReason,
};

pub const DEFAULT_SHIFT_PADDING: f64 = 1.0;

/// Inputs to a single shift step, fixed for a whole sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftParams {
    pub center: Point,
    pub label_radius: f64,
    pub height_change: f64,
}

impl ShiftParams {
    /// The step height is taken from the first label, whatever the others measure.
    pub fn for_boxes(boxes: &[LabelBox], geometry: &PieGeometry, padding: f64) -> Option<Self> {
        let first = boxes.first()?;
        Some(Self {
            center: geometry.center,
            label_radius: geometry.label_radius(),
            height_change: first.h + padding,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shift {
    pub position: Point,
    /// Set when the step overshot the label circle and `x` was pinned to the center line.
    pub degenerate: bool,
}

/// Position one step below (right half) or above (left half) `anchor`, back on the label circle.
pub fn shift_label(anchor: &LabelBox, params: &ShiftParams) -> Shift {
    let new_y = match anchor.hemisphere {
        Hemisphere::Right => anchor.y + params.height_change,
        Hemisphere::Left => anchor.y - params.height_change,
    };
    let y_diff = params.center.y - new_y;
    let discriminant = params.label_radius * params.label_radius - y_diff * y_diff;
    let degenerate = discriminant.is_nan() || discriminant < 0.0;
    let x_diff = if degenerate { 0.0 } else { discriminant.sqrt() };
    let new_x = match anchor.hemisphere {
        Hemisphere::Right => params.center.x + x_diff,
        Hemisphere::Left => params.center.x - x_diff,
    };
    Shift {
        position: Point::new(new_x, new_y),
        degenerate,
    }
}

/// First label in `0..=upto` that overlaps `boxes[target]`.
pub fn find_conflict(boxes: &[LabelBox], target: usize, upto: usize) -> Option<usize> {
    let examined = boxes.get(target)?;
    boxes
        .iter()
        .take(upto + 1)
        .position(|placed| placed.intersects(examined))
}

/// Every overlapping pair `(i, j)` with `i < j`.
pub fn overlapping_pairs(boxes: &[LabelBox]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in boxes.iter().enumerate() {
        for (j, b) in boxes.iter().enumerate().skip(i + 1) {
            if a.intersects(b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Run the clockwise sweep over `boxes` in place.
///
/// `boxes[0]` is never moved. Each later box is checked once against all the
/// boxes before it.
pub fn resolve_collisions(
    boxes: &mut [LabelBox],
    geometry: &PieGeometry,
    padding: f64,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let Some(params) = ShiftParams::for_boxes(boxes, geometry, padding) else {
        return report;
    };

    for curr in 0..boxes.len().saturating_sub(1) {
        let next = curr + 1;
        let Some(conflict) = find_conflict(boxes, next, curr) else {
            continue;
        };

        let shift = shift_label(&boxes[curr], &params);
        boxes[next].x = shift.position.x;
        boxes[next].y = shift.position.y;
        report.shifted.push(next);
        tracing::trace!(
            index = next,
            conflict,
            x = shift.position.x,
            y = shift.position.y,
            "shifted label"
        );

        let reason = if shift.degenerate {
            Some(UnresolvedReason::DegenerateShift)
        } else if find_conflict(boxes, next, curr).is_some() {
            Some(UnresolvedReason::PersistentOverlap)
        } else {
            None
        };
        if let Some(reason) = reason {
            tracing::warn!(index = next, ?reason, "label collision left unresolved");
            report.unresolved.push(UnresolvedCollision {
                index: next,
                reason,
            });
        }
    }

    tracing::debug!(
        labels = boxes.len(),
        shifted = report.shifted.len(),
        unresolved = report.unresolved.len(),
        "collision pass complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::point_on_circle;

    const EPS: f64 = 1e-9;

    fn geometry() -> PieGeometry {
        PieGeometry::new(Point::new(0.0, 0.0), 0.0, 100.0, 20.0).unwrap()
    }

    fn right_box(index: usize, angle: f64, w: f64, h: f64) -> LabelBox {
        let p = point_on_circle(Point::new(0.0, 0.0), 120.0, angle);
        LabelBox {
            index,
            x: p.x,
            y: p.y,
            w,
            h,
            hemisphere: Hemisphere::Right,
        }
    }

    fn params(height_change: f64) -> ShiftParams {
        ShiftParams {
            center: Point::new(0.0, 0.0),
            label_radius: 120.0,
            height_change,
        }
    }

    #[test]
    fn right_shift_moves_down_and_stays_on_circle() {
        let anchor = right_box(0, 0.0, 100.0, 30.0);
        let shift = shift_label(&anchor, &params(31.0));
        assert!(!shift.degenerate);
        assert!((shift.position.y - (anchor.y + 31.0)).abs() < EPS);
        assert!(shift.position.x > 0.0);
        assert!((shift.position.distance(Point::new(0.0, 0.0)) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn left_shift_moves_up_and_stays_on_circle() {
        let anchor = LabelBox {
            hemisphere: Hemisphere::Left,
            ..right_box(0, 250.0, 50.0, 20.0)
        };
        let shift = shift_label(&anchor, &params(21.0));
        assert!(!shift.degenerate);
        assert!((shift.position.y - (anchor.y - 21.0)).abs() < EPS);
        assert!(shift.position.x < 0.0);
        assert!((shift.position.distance(Point::new(0.0, 0.0)) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn overshooting_the_pole_is_clamped() {
        let anchor = right_box(0, 170.0, 40.0, 20.0);
        let shift = shift_label(&anchor, &params(50.0));
        assert!(shift.degenerate);
        assert!(shift.position.is_finite());
        assert_eq!(shift.position.x, 0.0);
        assert!((shift.position.y - (anchor.y + 50.0)).abs() < EPS);
    }

    #[test]
    fn first_conflict_scans_from_the_start() {
        let boxes = vec![
            right_box(0, 0.0, 100.0, 30.0),
            right_box(1, 5.0, 100.0, 30.0),
            right_box(2, 8.0, 100.0, 30.0),
        ];
        assert_eq!(find_conflict(&boxes, 2, 1), Some(0));
        assert_eq!(find_conflict(&boxes, 1, 0), Some(0));
        assert_eq!(find_conflict(&boxes, 5, 1), None);
    }

    #[test]
    fn separated_labels_are_left_alone() {
        let mut boxes = vec![
            right_box(0, 10.0, 30.0, 12.0),
            right_box(1, 60.0, 30.0, 12.0),
            right_box(2, 120.0, 30.0, 12.0),
        ];
        let before = boxes.clone();
        let report = resolve_collisions(&mut boxes, &geometry(), DEFAULT_SHIFT_PADDING);
        assert_eq!(report, CollisionReport::default());
        assert_eq!(boxes, before);
    }

    #[test]
    fn every_label_after_the_first_is_examined() {
        // Ideal positions all pile up near 12 o'clock.
        let mut boxes: Vec<LabelBox> = (0..4)
            .map(|i| right_box(i, i as f64 * 2.0, 60.0, 15.0))
            .collect();
        let report = resolve_collisions(&mut boxes, &geometry(), DEFAULT_SHIFT_PADDING);
        assert_eq!(report.shifted, vec![1, 2, 3]);
        assert!(report.is_clean());
        assert!(overlapping_pairs(&boxes).is_empty());
        for pair in boxes.windows(2) {
            assert!((pair[1].y - (pair[0].y + 16.0)).abs() < EPS);
        }
    }

    #[test]
    fn first_label_never_moves() {
        let mut boxes = vec![right_box(0, 0.0, 100.0, 30.0), right_box(1, 3.0, 100.0, 30.0)];
        let first = boxes[0];
        resolve_collisions(&mut boxes, &geometry(), DEFAULT_SHIFT_PADDING);
        assert_eq!(boxes[0], first);
    }

    #[test]
    fn shifted_label_overlapping_a_tall_neighbour_is_reported() {
        // The step height comes from the short first label, so a label pushed past a
        // tall neighbour still overlaps it. The sweep does not revisit earlier labels.
        let mut boxes = vec![
            right_box(0, 0.0, 40.0, 10.0),
            right_box(1, 60.0, 40.0, 50.0),
            right_box(2, 62.0, 40.0, 50.0),
        ];
        let report = resolve_collisions(&mut boxes, &geometry(), DEFAULT_SHIFT_PADDING);
        assert_eq!(report.shifted, vec![2]);
        assert_eq!(
            report.unresolved,
            vec![UnresolvedCollision {
                index: 2,
                reason: UnresolvedReason::PersistentOverlap
            }]
        );
        assert_eq!(overlapping_pairs(&boxes), vec![(1, 2)]);
    }

    #[test]
    fn oversized_first_label_produces_degenerate_shift() {
        let mut boxes = vec![right_box(0, 0.0, 100.0, 300.0), right_box(1, 5.0, 100.0, 30.0)];
        let report = resolve_collisions(&mut boxes, &geometry(), DEFAULT_SHIFT_PADDING);
        assert!(report.is_unresolved(1));
        assert_eq!(report.unresolved[0].reason, UnresolvedReason::DegenerateShift);
        assert!(boxes[1].position().is_finite());
        assert_eq!(boxes[1].x, 0.0);
    }

    #[test]
    fn empty_and_single_inputs_are_noops() {
        let mut empty: Vec<LabelBox> = Vec::new();
        assert_eq!(
            resolve_collisions(&mut empty, &geometry(), DEFAULT_SHIFT_PADDING),
            CollisionReport::default()
        );
        let mut single = vec![right_box(0, 0.0, 10.0, 10.0)];
        assert_eq!(
            resolve_collisions(&mut single, &geometry(), DEFAULT_SHIFT_PADDING),
            CollisionReport::default()
        );
    }
}
