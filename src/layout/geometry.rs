// Rotation and angle primitives shared by every placement step.
// All angles are in degrees, measured clockwise from 12 o'clock, with the
// y axis pointing down (screen coordinates).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Rotate `point` about `center` by `angle_degrees`, clockwise on screen.
pub fn rotate(point: Point, center: Point, angle_degrees: f64) -> Point {
    let (sin, cos) = to_radians(angle_degrees).sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point {
        x: dx * cos - dy * sin + center.x,
        y: dx * sin + dy * cos + center.y,
    }
}

/// The point at `radius` from `center` along `angle_degrees`.
pub fn point_on_circle(center: Point, radius: f64, angle_degrees: f64) -> Point {
    rotate(Point::new(center.x, center.y - radius), center, angle_degrees)
}

/// Unit vector pointing from the center outwards along `angle_degrees`.
pub(crate) fn radial_unit(angle_degrees: f64) -> Point {
    let (sin, cos) = to_radians(angle_degrees).sin_cos();
    Point { x: sin, y: -cos }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "expected {b:?}, got {a:?}"
        );
    }

    #[test]
    fn quarter_turns_move_clockwise_on_screen() {
        let center = Point::new(10.0, 10.0);
        let top = Point::new(10.0, 0.0);
        assert_close(rotate(top, center, 90.0), Point::new(20.0, 10.0));
        assert_close(rotate(top, center, 180.0), Point::new(10.0, 20.0));
        assert_close(rotate(top, center, 270.0), Point::new(0.0, 10.0));
        assert_close(rotate(top, center, 360.0), top);
    }

    #[test]
    fn rotation_preserves_distance_to_center() {
        let center = Point::new(-3.5, 42.0);
        let points = [
            Point::new(0.0, 0.0),
            Point::new(100.0, -7.25),
            Point::new(-3.5, 42.0),
            Point::new(1e4, 1e-3),
        ];
        for point in points {
            let before = point.distance(center);
            let mut angle = -720.0;
            while angle <= 720.0 {
                let after = rotate(point, center, angle).distance(center);
                assert!(
                    (after - before).abs() <= 1e-9 * before.max(1.0),
                    "angle {angle}: {before} != {after}"
                );
                angle += 13.7;
            }
        }
    }

    #[test]
    fn radial_unit_matches_point_on_circle() {
        let center = Point::new(0.0, 0.0);
        for angle in [0.0, 33.0, 145.0, 260.0, 359.0] {
            let on_circle = point_on_circle(center, 1.0, angle);
            assert_close(radial_unit(angle), on_circle);
        }
    }

    #[test]
    fn to_radians_is_standard() {
        assert!((to_radians(180.0) - std::f64::consts::PI).abs() < EPS);
        assert_eq!(to_radians(0.0), 0.0);
    }
}
