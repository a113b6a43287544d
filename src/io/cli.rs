//! Command-line interface for generating maps from world seed files

use crate::engine::{GenerateOptions, TerrainSliders, generate};
use crate::io::configuration::{DEFAULT_SEED, OUTPUT_SUFFIX, PROGRESS_MIN_INTERVAL_MS};
use crate::io::error::{GenError, Result};
use crate::io::preview::export_map_png;
use crate::io::progress::ProgressEvent;
use crate::seed::schema::WorldSeed;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "worldweave")]
#[command(
    author,
    version,
    about = "Generate tile maps from declarative world seeds"
)]
/// Command-line arguments for the map generation tool
pub struct Cli {
    /// World seed JSON file
    #[arg(value_name = "SEED_FILE")]
    pub seed_file: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output map JSON path (defaults next to the seed file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write a flat PNG preview to this path
    #[arg(short, long)]
    pub preview: Option<PathBuf>,

    /// Backtrack budget before the solver falls back to recovery
    #[arg(short, long)]
    pub backtracks: Option<usize>,

    /// Slow each collapse so the progress stream is visible
    #[arg(short, long)]
    pub animated: bool,

    /// Per-collapse delay in milliseconds for animated mode
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Run one generation from parsed CLI arguments
///
/// # Errors
///
/// Returns an error if the seed file cannot be read or parsed, the seed
/// fails validation, generation is cancelled, or an output cannot be
/// written.
pub fn run(cli: &Cli) -> Result<()> {
    let seed = load_seed(&cli.seed_file)?;
    let sliders = TerrainSliders::from_seed(&seed);

    let progress_bar = cli.should_show_progress().then(make_progress_bar);
    let progress = progress_bar.clone().map(|bar| {
        Box::new(move |event: &ProgressEvent| {
            bar.set_position(u64::from(event.progress));
            bar.set_prefix(event.phase.to_string());
            bar.set_message(event.message.clone());
        }) as Box<dyn FnMut(&ProgressEvent)>
    });

    let options = GenerateOptions {
        max_backtracks: cli.backtracks,
        animated: cli.animated,
        animation_delay_ms: cli.delay_ms,
        progress,
        cancel: Default::default(),
    };

    let map = generate(&seed, cli.seed, &sliders, options)?;

    if let Some(bar) = progress_bar {
        bar.finish_with_message(if map.success {
            "Map complete"
        } else {
            "Map complete (recovered)"
        });
    }

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.seed_file));
    let encoded = serde_json::to_string_pretty(&map)
        .map_err(|e| GenError::MapEncode { source: e })?;
    std::fs::write(&output_path, encoded).map_err(|e| GenError::MapWrite {
        path: output_path.clone(),
        source: e,
    })?;

    if let Some(preview_path) = &cli.preview {
        export_map_png(&map, preview_path)?;
    }

    // Allow print for user feedback after a degraded solve
    #[allow(clippy::print_stderr)]
    if !map.success && !cli.quiet {
        eprintln!(
            "Warning: solver needed recovery ({} backtracks); terrain may be locally incoherent",
            map.stats.backtracks
        );
    }

    Ok(())
}

/// Read and parse a world seed JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON for
/// the world seed schema.
pub fn load_seed(path: &Path) -> Result<WorldSeed> {
    let raw = std::fs::read_to_string(path).map_err(|e| GenError::SeedRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&raw).map_err(|e| GenError::SeedParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn make_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:>8} [{bar:30.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    bar.enable_steady_tick(Duration::from_millis(PROGRESS_MIN_INTERVAL_MS * 4));
    bar
}

fn default_output_path(seed_path: &Path) -> PathBuf {
    let stem = seed_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{}.json", stem.to_string_lossy(), OUTPUT_SUFFIX);

    if let Some(parent) = seed_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
