use serde::{Deserialize, Serialize};

/// One record of the chart. Index order is layout order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    pub label: String,
    pub value: f64,
}

impl DataEntry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub title: Option<String>,
    pub show_data: bool,
    pub entries: Vec<DataEntry>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<DataEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.entries.push(DataEntry::new(label, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.value).sum()
    }
}
