// Outer and inner label layout for pie charts.
//
// Outer labels go through a fixed pipeline owned by `LayoutContext`:
// measure every label, place each one on the label circle, sweep once for
// collisions, then route the connector lines. Each phase needs the complete
// output of the previous one.

pub mod collision;
pub mod connector;
pub mod error;
pub mod geometry;
pub mod ideal;
pub mod inner;
pub mod measure;
pub mod segments;
pub mod text;
pub mod types;

pub use collision::{resolve_collisions, shift_label};
pub use connector::{ConnectorStyle, route_connector};
pub use error::{LayoutError, Result};
pub use geometry::{Point, rotate, to_radians};
pub use ideal::compute_ideal;
pub use inner::compute_inner_layout;
pub use measure::{FixedMeasurer, LabelMeasurer, TextMeasurer};
pub use segments::{SegmentSpan, segment_angles, segment_spans};
pub use types::{
    CollisionReport, ConnectorPath, Hemisphere, InnerLabel, LabelBox, LabelLayout, LabelSize,
    PieGeometry, PlacedLabel, Segment, UnresolvedCollision, UnresolvedReason,
};

use crate::config::Config;
use crate::ir::Dataset;
use text::{ArrangedLabel, LabelContent, LabelSet};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub shift_padding: f64,
    pub connector: ConnectorStyle,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            shift_padding: collision::DEFAULT_SHIFT_PADDING,
            connector: ConnectorStyle::default(),
        }
    }
}

impl LayoutOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            shift_padding: config.lines.shift_padding,
            connector: config.lines.connector_style(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Measured,
    Placed,
    Resolved,
    Routed,
}

/// State of one outer layout pass. Rebuild it when any input changes.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    geometry: PieGeometry,
    options: LayoutOptions,
    segments: Vec<Segment>,
    phase: Phase,
    sizes: Vec<LabelSize>,
    boxes: Vec<LabelBox>,
    report: CollisionReport,
    connectors: Vec<ConnectorPath>,
}

impl LayoutContext {
    pub fn new(geometry: PieGeometry, segments: Vec<Segment>, options: LayoutOptions) -> Result<Self> {
        geometry.validate()?;
        for (position, segment) in segments.iter().enumerate() {
            if segment.index != position {
                return Err(LayoutError::state(format!(
                    "segment at position {position} has index {}",
                    segment.index
                )));
            }
            segment.validate()?;
        }
        Ok(Self {
            geometry,
            options,
            segments,
            phase: Phase::Created,
            sizes: Vec::new(),
            boxes: Vec::new(),
            report: CollisionReport::default(),
            connectors: Vec::new(),
        })
    }

    fn expect_phase(&self, expected: Phase, action: &str) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(LayoutError::state(format!(
                "cannot {action} while layout is {:?}, expected {:?}",
                self.phase, expected
            )))
        }
    }

    pub fn measure(&mut self, measurer: &dyn LabelMeasurer) -> Result<()> {
        self.expect_phase(Phase::Created, "measure labels")?;
        self.sizes = measure::measure_all(measurer, self.segments.len())?;
        self.phase = Phase::Measured;
        Ok(())
    }

    pub fn place_ideal(&mut self) -> Result<()> {
        self.expect_phase(Phase::Measured, "place labels")?;
        self.boxes = self
            .segments
            .iter()
            .map(|segment| {
                compute_ideal(
                    segment.index,
                    segment,
                    &self.geometry,
                    self.sizes.get(segment.index).copied(),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(labels = self.boxes.len(), "ideal label positions computed");
        self.phase = Phase::Placed;
        Ok(())
    }

    pub fn resolve_collisions(&mut self) -> Result<&CollisionReport> {
        self.expect_phase(Phase::Placed, "resolve collisions")?;
        self.report = resolve_collisions(&mut self.boxes, &self.geometry, self.options.shift_padding);
        self.phase = Phase::Resolved;
        Ok(&self.report)
    }

    pub fn route_connectors(&mut self) -> Result<()> {
        self.expect_phase(Phase::Resolved, "route connectors")?;
        self.connectors = self
            .boxes
            .iter()
            .zip(&self.segments)
            .map(|(label_box, segment)| {
                route_connector(label_box, segment.mid_angle, &self.geometry, &self.options.connector)
            })
            .collect();
        self.phase = Phase::Routed;
        Ok(())
    }

    pub fn finish(self) -> Result<LabelLayout> {
        self.expect_phase(Phase::Routed, "finish layout")?;
        let labels = self
            .segments
            .iter()
            .zip(self.boxes)
            .zip(self.connectors)
            .map(|((segment, label_box), connector)| PlacedLabel {
                index: segment.index,
                mid_angle: segment.mid_angle,
                label_box,
                connector,
            })
            .collect();
        Ok(LabelLayout {
            geometry: self.geometry,
            labels,
            report: self.report,
        })
    }
}

/// Run the whole outer pipeline.
pub fn compute_outer_layout(
    segments: &[Segment],
    geometry: &PieGeometry,
    measurer: &dyn LabelMeasurer,
    options: &LayoutOptions,
) -> Result<LabelLayout> {
    let mut context = LayoutContext::new(*geometry, segments.to_vec(), *options)?;
    context.measure(measurer)?;
    context.place_ideal()?;
    context.resolve_collisions()?;
    context.route_connectors()?;
    context.finish()
}

/// Layout of a whole chart, outer labels plus optional inner labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub spans: Vec<SegmentSpan>,
    pub outer: LabelLayout,
    /// Text parts of each outer label, offset from the label position.
    pub outer_text: Vec<ArrangedLabel>,
    pub inner: Vec<InnerLabel>,
    pub inner_text: Vec<LabelContent>,
}

pub fn compute_chart_layout(
    dataset: &Dataset,
    config: &Config,
    text_measurer: &dyn TextMeasurer,
    with_inner: bool,
) -> Result<ChartLayout> {
    let geometry = config.geometry()?;
    let spans = segment_spans(&dataset.entries)?;
    let segments: Vec<Segment> = spans.iter().map(SegmentSpan::segment).collect();

    // Every label is attached and measured before any of them is placed.
    let labels = LabelSet::attach(&dataset.entries, config.labels.outer);
    let measured = labels.measure(&config.theme, text_measurer, config.labels.single_line_pad);
    let outer = compute_outer_layout(
        &segments,
        &geometry,
        &measured,
        &LayoutOptions::from_config(config),
    )?;

    let (inner, inner_text) = if with_inner {
        (
            compute_inner_layout(&segments, &geometry)?,
            LabelSet::attach(&dataset.entries, config.labels.inner)
                .labels()
                .to_vec(),
        )
    } else {
        (Vec::new(), Vec::new())
    };
    Ok(ChartLayout {
        spans,
        outer,
        outer_text: measured.labels().to_vec(),
        inner,
        inner_text,
    })
}
