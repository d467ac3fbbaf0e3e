use crate::config::load_config;
use crate::layout::compute_chart_layout;
use crate::layout::measure::{DeterministicTextMeasurer, FontTextMeasurer, TextMeasurer};
use crate::layout::text::LabelDisplay;
use crate::layout_dump::{write_layout_dump, write_layout_dump_to};
use crate::parser::parse_dataset;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pielabels",
    version,
    about = "Compute collision-aware label positions for a pie chart"
)]
pub struct Args {
    /// Input dataset (JSON or pie text) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output JSON file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Outer label display type (label, value, percentage, label-value1, ...)
    #[arg(short = 'd', long = "display")]
    pub display: Option<LabelDisplay>,

    /// Also place inner labels
    #[arg(long = "inner")]
    pub inner: bool,

    /// Measure text with a fixed per-character width instead of system fonts
    #[arg(long = "fixedWidth")]
    pub fixed_width: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }
    if let Some(display) = args.display {
        config.labels.outer = display;
    }

    let input = read_input(args.input.as_deref())?;
    let dataset = parse_dataset(&input)?;
    if dataset.is_empty() {
        return Err(anyhow::anyhow!("No data entries found in input"));
    }

    let measurer: Box<dyn TextMeasurer> = if args.fixed_width {
        Box::new(DeterministicTextMeasurer::default())
    } else {
        Box::new(FontTextMeasurer)
    };
    let layout = compute_chart_layout(&dataset, &config, measurer.as_ref(), args.inner)?;
    if !layout.outer.report.is_clean() {
        tracing::warn!(
            unresolved = layout.outer.report.unresolved.len(),
            "some labels still overlap"
        );
    }

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout, &dataset)?,
        None => {
            let stdout = io::stdout();
            write_layout_dump_to(stdout.lock(), &layout, &dataset)?;
            println!();
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_and_flags() {
        let args = Args::try_parse_from([
            "pielabels",
            "-i",
            "data.json",
            "--display",
            "label-percentage2",
            "--inner",
            "-vv",
            "-w",
            "640",
        ])
        .unwrap();
        assert_eq!(args.input.as_deref(), Some(Path::new("data.json")));
        assert_eq!(args.display, Some(LabelDisplay::LabelPercentage2));
        assert!(args.inner);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.width, Some(640.0));
        assert_eq!(args.height, None);
    }

    #[test]
    fn rejects_unknown_display() {
        assert!(Args::try_parse_from(["pielabels", "--display", "sideways"]).is_err());
    }
}
