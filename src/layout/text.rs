// Label content: which text parts a label shows and how they are arranged
// relative to each other. Building the content is the attach step; arranging
// it with a `TextMeasurer` is the measure step that yields the label boxes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::measure::{LabelMeasurer, TextMeasurer};
use super::types::LabelSize;
use crate::ir::DataEntry;
use crate::theme::{TextStyle, Theme};

pub const DEFAULT_SINGLE_LINE_PAD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelDisplay {
    Label,
    Value,
    Percentage,
    /// Label and value on one line.
    LabelValue1,
    /// Value below the label.
    LabelValue2,
    /// Label and percentage on one line.
    LabelPercentage1,
    /// Percentage centered below the label.
    LabelPercentage2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelIncludes {
    pub main_label: bool,
    pub value: bool,
    pub percentage: bool,
}

impl LabelDisplay {
    pub const ALL: [LabelDisplay; 7] = [
        LabelDisplay::Label,
        LabelDisplay::Value,
        LabelDisplay::Percentage,
        LabelDisplay::LabelValue1,
        LabelDisplay::LabelValue2,
        LabelDisplay::LabelPercentage1,
        LabelDisplay::LabelPercentage2,
    ];

    pub fn includes(self) -> LabelIncludes {
        match self {
            Self::Label => LabelIncludes {
                main_label: true,
                ..LabelIncludes::default()
            },
            Self::Value => LabelIncludes {
                value: true,
                ..LabelIncludes::default()
            },
            Self::Percentage => LabelIncludes {
                percentage: true,
                ..LabelIncludes::default()
            },
            Self::LabelValue1 | Self::LabelValue2 => LabelIncludes {
                main_label: true,
                value: true,
                percentage: false,
            },
            Self::LabelPercentage1 | Self::LabelPercentage2 => LabelIncludes {
                main_label: true,
                value: false,
                percentage: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Value => "value",
            Self::Percentage => "percentage",
            Self::LabelValue1 => "label-value1",
            Self::LabelValue2 => "label-value2",
            Self::LabelPercentage1 => "label-percentage1",
            Self::LabelPercentage2 => "label-percentage2",
        }
    }
}

impl fmt::Display for LabelDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelDisplay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|display| display.as_str() == wanted)
            .ok_or_else(|| format!("unknown label display type: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartKind {
    MainLabel,
    Percentage,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPart {
    pub kind: PartKind,
    pub text: String,
}

/// Unmeasured label for one dataset index.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelContent {
    pub index: usize,
    pub display: LabelDisplay,
    pub parts: Vec<LabelPart>,
}

/// A part placed relative to the label origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangedPart {
    pub kind: PartKind,
    pub text: String,
    pub dx: f64,
    pub dy: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrangedLabel {
    pub index: usize,
    pub parts: Vec<ArrangedPart>,
    pub size: LabelSize,
}

/// Integer share, truncated, as the label shows it.
pub fn percentage_text(value: f64, total: f64) -> String {
    if total <= 0.0 || !total.is_finite() {
        return "0%".to_string();
    }
    format!("{}%", (value / total * 100.0).trunc() as i64)
}

/// The value exactly as given, without a trailing `.0` for whole numbers.
pub fn value_text(value: f64) -> String {
    value.to_string()
}

impl LabelContent {
    pub fn build(index: usize, entry: &DataEntry, total: f64, display: LabelDisplay) -> Self {
        let includes = display.includes();
        let mut parts = Vec::new();
        if includes.main_label {
            parts.push(LabelPart {
                kind: PartKind::MainLabel,
                text: entry.label.clone(),
            });
        }
        if includes.percentage {
            parts.push(LabelPart {
                kind: PartKind::Percentage,
                text: percentage_text(entry.value, total),
            });
        }
        if includes.value {
            parts.push(LabelPart {
                kind: PartKind::Value,
                text: value_text(entry.value),
            });
        }
        Self {
            index,
            display,
            parts,
        }
    }

    pub fn arrange(
        &self,
        theme: &Theme,
        measurer: &dyn TextMeasurer,
        single_line_pad: f64,
    ) -> ArrangedLabel {
        let mut parts: Vec<ArrangedPart> = self
            .parts
            .iter()
            .map(|part| {
                let size = measurer.measure(&part.text, part_style(theme, part.kind), theme.line_height);
                ArrangedPart {
                    kind: part.kind,
                    text: part.text.clone(),
                    dx: 0.0,
                    dy: 0.0,
                    width: size.width,
                    height: size.height,
                }
            })
            .collect();

        let main = parts
            .iter()
            .find(|part| part.kind == PartKind::MainLabel)
            .map(|part| (part.width, part.height));
        if let Some((main_w, main_h)) = main {
            for part in parts.iter_mut().filter(|part| part.kind != PartKind::MainLabel) {
                match (self.display, part.kind) {
                    (LabelDisplay::LabelValue1, PartKind::Value)
                    | (LabelDisplay::LabelPercentage1, PartKind::Percentage) => {
                        part.dx = main_w + single_line_pad;
                    }
                    (LabelDisplay::LabelValue2, PartKind::Value) => {
                        part.dy = main_h;
                    }
                    (LabelDisplay::LabelPercentage2, PartKind::Percentage) => {
                        part.dx = main_w / 2.0 - part.width / 2.0;
                        part.dy = main_h;
                    }
                    _ => {}
                }
            }
        }

        let size = union_size(&parts);
        ArrangedLabel {
            index: self.index,
            parts,
            size,
        }
    }
}

fn part_style(theme: &Theme, kind: PartKind) -> &TextStyle {
    match kind {
        PartKind::MainLabel => &theme.main_label,
        PartKind::Percentage => &theme.percentage,
        PartKind::Value => &theme.value,
    }
}

fn union_size(parts: &[ArrangedPart]) -> LabelSize {
    if parts.is_empty() {
        return LabelSize::default();
    }
    let min_x = parts.iter().map(|p| p.dx).fold(f64::INFINITY, f64::min);
    let min_y = parts.iter().map(|p| p.dy).fold(f64::INFINITY, f64::min);
    let max_x = parts.iter().map(|p| p.dx + p.width).fold(f64::NEG_INFINITY, f64::max);
    let max_y = parts.iter().map(|p| p.dy + p.height).fold(f64::NEG_INFINITY, f64::max);
    LabelSize::new(max_x - min_x, max_y - min_y)
}

/// Attached labels for a whole dataset, not yet measured.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSet {
    labels: Vec<LabelContent>,
}

impl LabelSet {
    pub fn attach(entries: &[DataEntry], display: LabelDisplay) -> Self {
        let total: f64 = entries.iter().map(|entry| entry.value).sum();
        let labels = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| LabelContent::build(index, entry, total, display))
            .collect();
        Self { labels }
    }

    pub fn labels(&self) -> &[LabelContent] {
        &self.labels
    }

    /// Arrange every label; the result answers size queries for the layout.
    pub fn measure(
        &self,
        theme: &Theme,
        measurer: &dyn TextMeasurer,
        single_line_pad: f64,
    ) -> MeasuredLabels {
        let labels: Vec<ArrangedLabel> = self
            .labels
            .iter()
            .map(|label| label.arrange(theme, measurer, single_line_pad))
            .collect();
        tracing::debug!(labels = labels.len(), "labels measured");
        MeasuredLabels { labels }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredLabels {
    labels: Vec<ArrangedLabel>,
}

impl MeasuredLabels {
    pub fn labels(&self) -> &[ArrangedLabel] {
        &self.labels
    }
}

impl LabelMeasurer for MeasuredLabels {
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn measure(&self, index: usize) -> Option<LabelSize> {
        self.labels.get(index).map(|label| label.size)
    }
}
