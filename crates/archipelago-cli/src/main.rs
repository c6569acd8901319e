//! Archipelago board randomizer command line.

use archipelago_core::BoardGenerator;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod output;

use config::{HarborMode, Overrides};
use output::Format;

/// Generate randomized island boards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON settings file (missing fields take their defaults)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Number of islands
    #[arg(long)]
    islands: Option<u8>,

    /// Smallest allowed island
    #[arg(long)]
    min_fields: Option<u8>,

    /// Let 6s and 8s touch
    #[arg(long)]
    allow_high_value_adjacency: bool,

    /// Extra same-number tokens allowed per cluster (0-2)
    #[arg(long)]
    max_same_number: Option<u8>,

    /// Largest same-terrain cluster
    #[arg(long)]
    max_same_resource: Option<u8>,

    /// Harbor distribution
    #[arg(long, value_enum)]
    harbors: Option<HarborMode>,

    /// Clamp unsatisfiable settings instead of rejecting them
    #[arg(long)]
    clamp: bool,

    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    /// Number of boards to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            islands: self.islands,
            min_fields: self.min_fields,
            allow_high_value_adjacency: self.allow_high_value_adjacency,
            max_same_number: self.max_same_number,
            max_same_resource: self.max_same_resource,
            harbors: self.harbors,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for the board output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let generator = BoardGenerator::standard();

    let settings = config::resolve(
        cli.settings.as_deref(),
        &cli.overrides(),
        generator.land_count(),
        cli.clamp,
    )?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(count = cli.count, seed = ?cli.seed, "Generating boards");

    let boards: Vec<_> = (0..cli.count)
        .map(|_| generator.generate_with_rng(&settings, &mut rng))
        .collect();

    for (i, board) in boards.iter().enumerate() {
        for warning in board.warnings() {
            warn!(board = i, "{}", warning);
        }
    }

    println!("{}", output::render(&boards, &settings, cli.seed, cli.format)?);
    Ok(())
}
