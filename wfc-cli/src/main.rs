//! Command-line driver for `wfc-core`: loads an exemplar image, runs the
//! solver against a handful of seeds until one doesn't contradict, and
//! writes the result back out as an image.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use wfc_core::{Color, Exemplar, FixedGrid2D, Heuristic as CoreHeuristic, Options, Solver, render};

/// Number of seeds to try before giving up on a contradiction.
const MAX_ATTEMPTS: u32 = 10;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Heuristic {
    Scanline,
    Mrv,
    Entropy,
}

impl From<Heuristic> for CoreHeuristic {
    fn from(h: Heuristic) -> Self {
        match h {
            Heuristic::Scanline => CoreHeuristic::Scanline,
            Heuristic::Mrv => CoreHeuristic::Mrv,
            Heuristic::Entropy => CoreHeuristic::Entropy,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the exemplar image.
    input: PathBuf,

    /// Path the generated image is written to.
    #[arg(short = 'o', long = "output", default_value = "output.png")]
    output: PathBuf,

    /// Pattern (window) edge length in pixels.
    #[arg(short = 'n', long = "pattern-size", default_value_t = 3)]
    pattern_size: usize,

    /// Output width in cells.
    #[arg(long = "width", default_value_t = 48)]
    width: usize,

    /// Output height in cells.
    #[arg(long = "height", default_value_t = 48)]
    height: usize,

    /// Treat the exemplar as toric when extracting patterns.
    #[arg(long = "periodic-input", default_value_t = true)]
    periodic_input: bool,

    /// Treat the output as toric when propagating.
    #[arg(long = "periodic-output", default_value_t = false)]
    periodic_output: bool,

    /// Number of dihedral symmetries to use, 1..=8.
    #[arg(short = 's', long = "symmetry", default_value_t = 8)]
    symmetry: u8,

    /// Next-cell-to-observe heuristic.
    #[arg(long = "heuristic", value_enum, default_value_t = Heuristic::Mrv)]
    heuristic: Heuristic,

    /// Constrain a distinguished pattern to the bottom row.
    #[arg(long = "ground", default_value_t = false)]
    ground: bool,

    /// Seed to start retrying from.
    #[arg(long = "seed", default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if !(1..=8).contains(&cli.symmetry) {
        bail!("--symmetry must be between 1 and 8, got {}", cli.symmetry);
    }

    let image = image::open(&cli.input)
        .with_context(|| format!("failed to open exemplar {}", cli.input.display()))?
        .to_rgb8();
    let exemplar = Exemplar::from(&image);

    let options = Options {
        periodic_input: cli.periodic_input,
        periodic_output: cli.periodic_output,
        pattern_size: cli.pattern_size,
        output_width: cli.width,
        output_height: cli.height,
        symmetry: Options::symmetry_from_count(cli.symmetry),
        heuristic: cli.heuristic.into(),
        ground: cli.ground,
        limit: None,
    };

    let mut solver = Solver::new(options, &exemplar).context("invalid configuration")?;

    let mut last_err = None;
    for attempt in 0..MAX_ATTEMPTS {
        let seed = cli.seed.wrapping_add(attempt as u64);
        match solver.run(seed) {
            Ok(()) => {
                let grid = render(&solver);
                save(&grid, &cli.output)?;
                log::info!(
                    "wrote {} after {} attempt(s), seed={seed}",
                    cli.output.display(),
                    attempt + 1
                );
                return Ok(());
            }
            Err(e) => {
                log::warn!("attempt {} (seed={seed}) contradicted: {e}", attempt + 1);
                last_err = Some(e);
            }
        }
    }

    bail!(
        "failed to converge after {MAX_ATTEMPTS} attempts, last error: {}",
        last_err.unwrap()
    );
}

fn save(grid: &FixedGrid2D<Color>, path: &PathBuf) -> Result<()> {
    let mut img = image::RgbImage::new(grid.width() as u32, grid.height() as u32);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            img.put_pixel(x as u32, y as u32, image::Rgb(grid.get(x, y).to_array()));
        }
    }
    img.save(path).with_context(|| format!("failed to save {}", path.display()))
}
