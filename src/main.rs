//! Bomb Visibility - Entry Point
//!
//! Loads a scene, runs an optional query file against it and writes a JSON
//! report with the final city and every computed region.

use std::path::{Path, PathBuf};

use bomb_visibility::city::City;
use bomb_visibility::command::{parse_query, BombProcessor, RegionLog, RunReport};
use bomb_visibility::core::config::{set_config, VisibilityConfig};
use bomb_visibility::core::error::Result;
use bomb_visibility::scene::SceneLoader;
use bomb_visibility::visibility::SortStrategy;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Run bomb commands over a city and report what they hit
#[derive(Parser, Debug)]
#[command(name = "bomb-visibility")]
#[command(about = "Visibility-driven destroy/paint/clone/anteparo commands over a 2D city")]
struct Args {
    /// Scene description file (.geo)
    #[arg(long)]
    geo: PathBuf,

    /// Query file (.qry) with bomb commands
    #[arg(long)]
    qry: Option<PathBuf>,

    /// Base directory for relative input paths
    #[arg(long)]
    prefix: Option<PathBuf>,

    /// Directory the JSON report is written to
    #[arg(long)]
    output: PathBuf,

    /// Event sort strategy: merge, quick or insertion
    #[arg(long)]
    sort: Option<SortStrategy>,

    /// Inputs up to this size are insertion sorted
    #[arg(long)]
    threshold: Option<usize>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Output<'a> {
    report: &'a RunReport,
    city: &'a City,
    regions: &'a RegionLog,
}

fn resolve(prefix: Option<&Path>, path: &Path) -> PathBuf {
    match prefix {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bomb_visibility=info")),
        )
        .init();

    let args = Args::parse();
    let prefix = args.prefix.as_deref();

    let mut config = match &args.config {
        Some(path) => VisibilityConfig::load(&resolve(prefix, path))?,
        None => VisibilityConfig::default(),
    };
    if let Some(strategy) = args.sort {
        config.sort.strategy = strategy;
    }
    if let Some(threshold) = args.threshold {
        config.sort.insertion_threshold = threshold;
    }
    config.validate()?;
    if set_config(config).is_err() {
        tracing::warn!("config already set, keeping existing values");
    }

    let geo_path = resolve(prefix, &args.geo);
    let mut city = SceneLoader::new().load_file(&geo_path)?;

    let mut regions = RegionLog::new();
    let mut name = stem(&args.geo);

    let report = match &args.qry {
        Some(qry) => {
            let source = std::fs::read_to_string(resolve(prefix, qry))?;
            name = format!("{name}-{}", stem(qry));
            let mut processor = BombProcessor::new().with_sink(&mut regions);
            processor.run(&mut city, parse_query(&source))?
        }
        None => RunReport {
            highest_id: city.highest_id(),
            ..Default::default()
        },
    };

    std::fs::create_dir_all(&args.output)?;
    let out_path = args.output.join(format!("{name}.json"));
    let output = Output {
        report: &report,
        city: &city,
        regions: &regions,
    };
    std::fs::write(&out_path, serde_json::to_string_pretty(&output)?)?;

    tracing::info!(
        commands = report.outcomes.len(),
        skipped = report.skipped,
        shapes = city.len(),
        path = %out_path.display(),
        "report written"
    );
    Ok(())
}
