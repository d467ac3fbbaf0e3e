use crate::layout::collision::DEFAULT_SHIFT_PADDING;
use crate::layout::connector::{ConnectorStyle, DEFAULT_HEIGHT_OFFSET_DIVISOR, DEFAULT_LABEL_MARGIN};
use crate::layout::text::{DEFAULT_SINGLE_LINE_PAD, LabelDisplay};
use crate::layout::{PieGeometry, Point};
use crate::theme::{TextStyle, Theme};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieConfig {
    /// Explicit outer radius; derived from the canvas when unset.
    pub outer_radius: Option<f64>,
    pub inner_radius: f64,
    /// Space kept free around the label circle when the radius is derived.
    pub canvas_padding: f64,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            outer_radius: None,
            inner_radius: 0.0,
            canvas_padding: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLineConfig {
    pub length: f64,
    pub midpoint_distance: f64,
    pub label_margin: f64,
    pub height_offset_divisor: f64,
    pub shift_padding: f64,
}

impl Default for LabelLineConfig {
    fn default() -> Self {
        Self {
            length: 16.0,
            midpoint_distance: 8.0,
            label_margin: DEFAULT_LABEL_MARGIN,
            height_offset_divisor: DEFAULT_HEIGHT_OFFSET_DIVISOR,
            shift_padding: DEFAULT_SHIFT_PADDING,
        }
    }
}

impl LabelLineConfig {
    pub fn connector_style(&self) -> ConnectorStyle {
        ConnectorStyle {
            midpoint_distance: self.midpoint_distance,
            label_margin: self.label_margin,
            height_offset_divisor: self.height_offset_divisor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelsConfig {
    pub outer: LabelDisplay,
    pub inner: LabelDisplay,
    pub single_line_pad: f64,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            outer: LabelDisplay::Label,
            inner: LabelDisplay::Percentage,
            single_line_pad: DEFAULT_SINGLE_LINE_PAD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub pie: PieConfig,
    pub lines: LabelLineConfig,
    pub labels: LabelsConfig,
    pub theme: Theme,
}

impl Config {
    pub fn center(&self) -> Point {
        Point::new(self.canvas.width / 2.0, self.canvas.height / 2.0)
    }

    pub fn outer_radius(&self) -> f64 {
        match self.pie.outer_radius {
            Some(radius) => radius,
            None => {
                let half = self.canvas.width.min(self.canvas.height) / 2.0;
                (half - self.lines.length - self.pie.canvas_padding).max(1.0)
            }
        }
    }

    pub fn geometry(&self) -> crate::layout::Result<PieGeometry> {
        PieGeometry::new(
            self.center(),
            self.pie.inner_radius,
            self.outer_radius(),
            self.lines.length,
        )
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    canvas: Option<CanvasConfigFile>,
    pie: Option<PieConfigFile>,
    lines: Option<LabelLineConfigFile>,
    labels: Option<LabelsConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CanvasConfigFile {
    width: Option<f64>,
    height: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PieConfigFile {
    outer_radius: Option<f64>,
    inner_radius: Option<f64>,
    canvas_padding: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LabelLineConfigFile {
    length: Option<f64>,
    midpoint_distance: Option<f64>,
    label_margin: Option<f64>,
    height_offset_divisor: Option<f64>,
    shift_padding: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LabelsConfigFile {
    outer: Option<LabelDisplay>,
    inner: Option<LabelDisplay>,
    single_line_pad: Option<f64>,
    main_label: Option<TextStyleFile>,
    percentage: Option<TextStyleFile>,
    value: Option<TextStyleFile>,
    line_height: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TextStyleFile {
    font: Option<String>,
    font_size: Option<f64>,
}

fn merge_style(style: &mut TextStyle, file: Option<TextStyleFile>) {
    let Some(file) = file else {
        return;
    };
    if let Some(v) = file.font {
        style.font_family = v;
    }
    if let Some(v) = file.font_size {
        style.font_size = v;
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme: {name}"))?;
    }

    if let Some(canvas) = parsed.canvas {
        if let Some(v) = canvas.width {
            config.canvas.width = v;
        }
        if let Some(v) = canvas.height {
            config.canvas.height = v;
        }
    }

    if let Some(pie) = parsed.pie {
        if pie.outer_radius.is_some() {
            config.pie.outer_radius = pie.outer_radius;
        }
        if let Some(v) = pie.inner_radius {
            config.pie.inner_radius = v;
        }
        if let Some(v) = pie.canvas_padding {
            config.pie.canvas_padding = v;
        }
    }

    if let Some(lines) = parsed.lines {
        if let Some(v) = lines.length {
            config.lines.length = v;
        }
        if let Some(v) = lines.midpoint_distance {
            config.lines.midpoint_distance = v;
        }
        if let Some(v) = lines.label_margin {
            config.lines.label_margin = v;
        }
        if let Some(v) = lines.height_offset_divisor {
            config.lines.height_offset_divisor = v;
        }
        if let Some(v) = lines.shift_padding {
            config.lines.shift_padding = v;
        }
    }

    if let Some(labels) = parsed.labels {
        if let Some(v) = labels.outer {
            config.labels.outer = v;
        }
        if let Some(v) = labels.inner {
            config.labels.inner = v;
        }
        if let Some(v) = labels.single_line_pad {
            config.labels.single_line_pad = v;
        }
        if let Some(v) = labels.line_height {
            config.theme.line_height = v;
        }
        merge_style(&mut config.theme.main_label, labels.main_label);
        merge_style(&mut config.theme.percentage, labels.percentage);
        merge_style(&mut config.theme.value, labels.value);
    }

    Ok(config)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_center_the_pie_in_the_canvas() {
        let config = Config::default();
        let geometry = config.geometry().unwrap();
        assert_eq!(geometry.center, Point::new(250.0, 250.0));
        assert_eq!(geometry.outer_radius, 250.0 - 16.0 - 60.0);
        assert_eq!(geometry.line_length, 16.0);
        assert_eq!(geometry.inner_radius, 0.0);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = parse_config(
            r#"{
                "canvas": { "width": 800 },
                "pie": { "outerRadius": 100, "innerRadius": 40 },
                "lines": { "length": 20, "labelMargin": 4 },
                "labels": {
                    "outer": "label-percentage1",
                    "mainLabel": { "fontSize": 14 }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.canvas.width, 800.0);
        assert_eq!(config.canvas.height, 500.0);
        assert_eq!(config.outer_radius(), 100.0);
        assert_eq!(config.pie.inner_radius, 40.0);
        assert_eq!(config.lines.length, 20.0);
        assert_eq!(config.lines.label_margin, 4.0);
        assert_eq!(config.lines.midpoint_distance, 8.0);
        assert_eq!(config.labels.outer, LabelDisplay::LabelPercentage1);
        assert_eq!(config.theme.main_label.font_size, 14.0);
        assert_eq!(config.theme.main_label.font_family, "arial");
    }

    #[test]
    fn unknown_theme_is_an_error() {
        assert!(parse_config(r#"{ "theme": "neon" }"#).is_err());
        assert_eq!(
            parse_config(r#"{ "theme": "modern" }"#).unwrap().theme,
            Theme::modern()
        );
    }

    #[test]
    fn connector_style_mirrors_line_config() {
        let lines = LabelLineConfig::default();
        let style = lines.connector_style();
        assert_eq!(style.label_margin, 6.0);
        assert_eq!(style.height_offset_divisor, 5.0);
        assert_eq!(style.midpoint_distance, 8.0);
    }
}
