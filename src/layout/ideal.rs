use super::error::{LayoutError, Result};
use super::geometry::point_on_circle;
use super::types::{Hemisphere, LabelBox, LabelSize, PieGeometry, Segment};

/// Unconstrained position of a label on the label circle.
///
/// Labels on the left half are shifted left by their own width so the text
/// reads towards the chart. `size` is `None` when the label was never
/// measured, which is an invalid state rather than a zero-sized box.
pub fn compute_ideal(
    index: usize,
    segment: &Segment,
    geometry: &PieGeometry,
    size: Option<LabelSize>,
) -> Result<LabelBox> {
    let size = size
        .ok_or(LayoutError::MissingMeasurement { index })?
        .validate(index)?;
    let mut point = point_on_circle(geometry.center, geometry.label_radius(), segment.mid_angle);
    let hemisphere = Hemisphere::for_angle(segment.mid_angle);
    if hemisphere == Hemisphere::Left {
        point.x -= size.width;
    }
    tracing::trace!(index, x = point.x, y = point.y, hemisphere = hemisphere.as_str(), "ideal label position");
    Ok(LabelBox {
        index,
        x: point.x,
        y: point.y,
        w: size.width,
        h: size.height,
        hemisphere,
    })
}
