#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use ir::{DataEntry, Dataset};
pub use layout::{
    ChartLayout, LabelLayout, LayoutContext, LayoutError, LayoutOptions, compute_chart_layout,
    compute_outer_layout,
};
pub use parser::parse_dataset;
pub use theme::Theme;
