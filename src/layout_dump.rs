use crate::ir::Dataset;
use crate::layout::text::{ArrangedPart, LabelDisplay};
use crate::layout::{ChartLayout, Hemisphere, UnresolvedCollision};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub title: Option<String>,
    pub center: [f64; 2],
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub label_radius: f64,
    pub labels: Vec<LabelDump>,
    pub inner_labels: Vec<InnerLabelDump>,
    pub unresolved: Vec<UnresolvedCollision>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDump {
    pub index: usize,
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub hemisphere: Hemisphere,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shifted: bool,
    pub connector: Vec<[f64; 2]>,
    pub parts: Vec<ArrangedPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerLabelDump {
    pub index: usize,
    pub display: LabelDisplay,
    pub x: f64,
    pub y: f64,
    pub text: Vec<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &ChartLayout, dataset: &Dataset) -> Self {
        let outer = &layout.outer;
        let labels = outer
            .labels
            .iter()
            .map(|placed| {
                let entry = dataset.entries.get(placed.index);
                let span = layout.spans.get(placed.index);
                LabelDump {
                    index: placed.index,
                    label: entry.map(|e| e.label.clone()).unwrap_or_default(),
                    value: entry.map(|e| e.value).unwrap_or_default(),
                    start_angle: span.map(|s| s.start_angle).unwrap_or(placed.mid_angle),
                    end_angle: span.map(|s| s.end_angle).unwrap_or(placed.mid_angle),
                    mid_angle: placed.mid_angle,
                    hemisphere: placed.hemisphere(),
                    x: placed.label_box.x,
                    y: placed.label_box.y,
                    width: placed.label_box.w,
                    height: placed.label_box.h,
                    shifted: outer.report.shifted.contains(&placed.index),
                    connector: placed
                        .connector
                        .points()
                        .iter()
                        .map(|p| [p.x, p.y])
                        .collect(),
                    parts: layout
                        .outer_text
                        .get(placed.index)
                        .map(|text| text.parts.clone())
                        .unwrap_or_default(),
                }
            })
            .collect();

        let inner_labels = layout
            .inner
            .iter()
            .zip(&layout.inner_text)
            .map(|(label, content)| InnerLabelDump {
                index: label.index,
                display: content.display,
                x: label.position.x,
                y: label.position.y,
                text: content.parts.iter().map(|part| part.text.clone()).collect(),
            })
            .collect();

        LayoutDump {
            title: dataset.title.clone(),
            center: [outer.geometry.center.x, outer.geometry.center.y],
            inner_radius: outer.geometry.inner_radius,
            outer_radius: outer.geometry.outer_radius,
            label_radius: outer.geometry.label_radius(),
            labels,
            inner_labels,
            unresolved: outer.report.unresolved.clone(),
        }
    }
}

pub fn write_layout_dump_to<W: Write>(writer: W, layout: &ChartLayout, dataset: &Dataset) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, dataset);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

pub fn write_layout_dump(path: &Path, layout: &ChartLayout, dataset: &Dataset) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_layout_dump_to(&mut writer, layout, dataset)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::layout::compute_chart_layout;
    use crate::layout::measure::DeterministicTextMeasurer;

    #[test]
    fn dump_carries_positions_connectors_and_hemispheres() {
        let mut dataset = Dataset::new();
        dataset.title = Some("Pets".to_string());
        dataset.push("Dogs", 3.0);
        dataset.push("Cats", 1.0);
        let layout = compute_chart_layout(
            &dataset,
            &Config::default(),
            &DeterministicTextMeasurer::default(),
            true,
        )
        .unwrap();

        let mut buf = Vec::new();
        write_layout_dump_to(&mut buf, &layout, &dataset).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(json["title"], "Pets");
        assert_eq!(json["labels"].as_array().unwrap().len(), 2);
        assert_eq!(json["labels"][0]["label"], "Dogs");
        assert_eq!(json["labels"][0]["hemisphere"], "right");
        assert_eq!(json["labels"][1]["hemisphere"], "left");
        assert_eq!(json["labels"][0]["connector"].as_array().unwrap().len(), 3);
        assert_eq!(json["labels"][0]["parts"][0]["kind"], "mainLabel");
        assert_eq!(json["innerLabels"][1]["text"][0], "25%");
        assert_eq!(json["innerLabels"][1]["display"], "percentage");
    }
}
