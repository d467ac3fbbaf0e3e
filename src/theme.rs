use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
}

impl TextStyle {
    pub fn new(font_family: impl Into<String>, font_size: f64) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
        }
    }
}

/// Fonts of the three label parts. Only used to measure label boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub main_label: TextStyle,
    pub percentage: TextStyle,
    pub value: TextStyle,
    /// Line box height as a multiple of the font size.
    pub line_height: f64,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            main_label: TextStyle::new("arial", 10.0),
            percentage: TextStyle::new("arial", 10.0),
            value: TextStyle::new("arial", 10.0),
            line_height: 1.2,
        }
    }

    pub fn modern() -> Self {
        Self {
            main_label: TextStyle::new("Inter, Segoe UI, system-ui, -apple-system, sans-serif", 12.0),
            percentage: TextStyle::new("Inter, Segoe UI, system-ui, -apple-system, sans-serif", 11.0),
            value: TextStyle::new("Inter, Segoe UI, system-ui, -apple-system, sans-serif", 11.0),
            line_height: 1.25,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(Self::modern()),
            "classic" | "default" | "d3pie" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
