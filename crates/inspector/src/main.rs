//! Layout inspector - lays out a JSON component document and prints the result.

mod document;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use document::Document;
use layout::{LayoutConfig, LayoutEngine};
use report::LayoutReport;

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Layout inspector - computes component layouts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Component document (JSON)
    document: PathBuf,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    height: f32,

    /// Layout configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only report the component with this document name and its subtree
    #[arg(long)]
    select: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Exit with an error if any subtree failed to lay out
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<LayoutConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            LayoutConfig::from_json(&json)
                .with_context(|| format!("invalid layout config {}", path.display()))
        }
        None => Ok(LayoutConfig::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.width <= 0.0 || args.height <= 0.0 {
        bail!("viewport must be positive, got {}x{}", args.width, args.height);
    }

    let config = load_config(args.config.as_ref())?;
    let mut document = Document::load(&args.document)?;
    info!(
        components = document.tree.len(),
        path = %args.document.display(),
        "document loaded"
    );

    let engine = LayoutEngine::new(args.width, args.height).with_config(config);
    let pass = engine.layout(&mut document.tree)?;
    if !pass.is_clean() {
        warn!(failures = pass.failures.len(), "some subtrees could not be laid out");
    }

    let start = match args.select.as_deref() {
        Some(name) => match document.find(name) {
            Some(id) => Some(id),
            None => bail!("no component named {:?} in {}", name, args.document.display()),
        },
        None => None,
    };
    let report = LayoutReport::new(&document, start, engine.viewport(), &pass);
    match args.format {
        Format::Text => print!("{}", report.to_text()),
        Format::Json => println!("{}", report.to_json()?),
    }

    if args.strict && !pass.is_clean() {
        bail!("{} subtree(s) failed to lay out", pass.failures.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["layout-inspect", "form.json"]);
        assert_eq!(args.document, PathBuf::from("form.json"));
        assert_eq!(args.width, 1280.0);
        assert_eq!(args.height, 720.0);
        assert_eq!(args.format, Format::Text);
        assert!(args.config.is_none());
        assert!(args.select.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_viewport_and_format() {
        let args = Args::parse_from([
            "layout-inspect",
            "form.json",
            "--width",
            "375",
            "--height",
            "812",
            "--format",
            "json",
        ]);
        assert_eq!(args.width, 375.0);
        assert_eq!(args.height, 812.0);
        assert_eq!(args.format, Format::Json);
    }

    #[test]
    fn test_args_document_required() {
        assert!(Args::try_parse_from(["layout-inspect"]).is_err());
    }

    #[test]
    fn test_default_config_without_path() {
        assert_eq!(load_config(None).unwrap(), LayoutConfig::default());
    }
}
