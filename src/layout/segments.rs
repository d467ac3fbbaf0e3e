use serde::{Deserialize, Serialize};

use super::error::{LayoutError, Result};
use super::types::Segment;
use crate::ir::DataEntry;

/// Angular extent of one wedge, clockwise from 12 o'clock in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSpan {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub share: f64,
}

impl SegmentSpan {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.index, self.mid_angle())
    }
}

pub fn segment_spans(entries: &[DataEntry]) -> Result<Vec<SegmentSpan>> {
    for (index, entry) in entries.iter().enumerate() {
        if !entry.value.is_finite() || entry.value < 0.0 {
            return Err(LayoutError::dataset(format!(
                "entry {index} ({:?}) has invalid value {}",
                entry.label, entry.value
            )));
        }
    }
    if entries.is_empty() {
        return Ok(Vec::new());
    }
    let total: f64 = entries.iter().map(|entry| entry.value).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(LayoutError::dataset(format!(
            "values must sum to a positive number, got {total}"
        )));
    }

    let mut spans = Vec::with_capacity(entries.len());
    let mut cumulative = 0.0;
    for (index, entry) in entries.iter().enumerate() {
        let share = entry.value / total;
        let start_angle = cumulative * 360.0;
        cumulative += share;
        spans.push(SegmentSpan {
            index,
            start_angle,
            end_angle: cumulative * 360.0,
            share,
        });
    }
    Ok(spans)
}

pub fn segment_angles(entries: &[DataEntry]) -> Result<Vec<Segment>> {
    Ok(segment_spans(entries)?
        .iter()
        .map(SegmentSpan::segment)
        .collect())
}
