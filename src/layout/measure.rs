use super::error::{LayoutError, Result};
use super::types::LabelSize;
use crate::text_metrics::{FALLBACK_CHAR_WIDTH, text_width};
use crate::theme::TextStyle;

/// Size of a single line of styled text.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle, line_height: f64) -> LabelSize;
}

/// Measures with installed system fonts, estimating when none match.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontTextMeasurer;

impl TextMeasurer for FontTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle, line_height: f64) -> LabelSize {
        LabelSize::new(
            text_width(text, style.font_size, &style.font_family),
            style.font_size * line_height,
        )
    }
}

/// Font-independent measurer: every character has the same advance.
#[derive(Debug, Clone, Copy)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: FALLBACK_CHAR_WIDTH,
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle, line_height: f64) -> LabelSize {
        let chars = text.chars().filter(|ch| *ch != '\n').count();
        LabelSize::new(
            chars as f64 * style.font_size * self.char_width_factor,
            style.font_size * line_height,
        )
    }
}

/// Bounding box of each label, available once labels have been laid out as text.
pub trait LabelMeasurer {
    /// Number of labels known to this measurer.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `None` when the label at `index` was never attached.
    fn measure(&self, index: usize) -> Option<LabelSize>;
}

/// Sizes supplied directly by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedMeasurer {
    sizes: Vec<LabelSize>,
}

impl FixedMeasurer {
    pub fn new(sizes: Vec<LabelSize>) -> Self {
        Self { sizes }
    }

    pub fn uniform(count: usize, size: LabelSize) -> Self {
        Self {
            sizes: vec![size; count],
        }
    }
}

impl LabelMeasurer for FixedMeasurer {
    fn len(&self) -> usize {
        self.sizes.len()
    }

    fn measure(&self, index: usize) -> Option<LabelSize> {
        self.sizes.get(index).copied()
    }
}

/// Query every label once, in index order.
pub fn measure_all(measurer: &dyn LabelMeasurer, expected: usize) -> Result<Vec<LabelSize>> {
    if measurer.len() != expected {
        return Err(LayoutError::LengthMismatch {
            what: "measurements",
            expected,
            actual: measurer.len(),
        });
    }
    (0..expected)
        .map(|index| {
            measurer
                .measure(index)
                .ok_or(LayoutError::MissingMeasurement { index })?
                .validate(index)
        })
        .collect()
}
