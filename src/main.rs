//! Evolves ASCII art that approximates a grayscale image.
//!
//! Usage:
//!   ascii-evolve <image.png> --palette <file> [--width 24] [--height 16] [--seed 7]
//!   RUST_LOG=debug ascii-evolve <image.png> --palette <file> --log-level verbose --plot run.png

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use tracing::{error, info};

use ascii_evolve::{
    evolution::{BrightnessChallenge, CacheType, EvolutionLauncher, EvolutionOptions, LogLevel},
    grid::Shape,
    io,
    palette::BrightnessMap,
    strategy::GenerationalStrategy,
    Result,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CacheArg {
    None,
    Global,
    ThreadLocal,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogArg {
    Verbose,
    Minimal,
    None,
}

#[derive(Parser, Debug)]
#[command(name = "ascii-evolve")]
#[command(about = "Evolve ASCII art that approximates a grayscale image")]
struct Args {
    /// Image to approximate (PNG, JPEG, BMP, GIF or PNM), converted to grayscale
    image: PathBuf,

    /// Text file with the palette characters, darkest first
    #[arg(short, long)]
    palette: PathBuf,

    /// Grid width in characters
    #[arg(long, default_value_t = 24)]
    width: usize,

    /// Grid height in characters
    #[arg(long, default_value_t = 16)]
    height: usize,

    /// Individuals per generation
    #[arg(long, default_value_t = 100)]
    population: usize,

    /// Breeding rounds to run
    #[arg(short, long, default_value_t = 150)]
    generations: usize,

    /// Elites copied unchanged into each next generation
    #[arg(long, default_value_t = 2)]
    elites: usize,

    /// Per-cell mutation probability
    #[arg(long, default_value_t = 0.05)]
    mutation_rate: f64,

    /// Probability that a selected pair is recombined
    #[arg(long, default_value_t = 0.8)]
    crossover_rate: f64,

    /// Entrants drawn per tournament
    #[arg(long, default_value_t = 3)]
    tournament_size: usize,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Where the final art is written
    #[arg(short, long, default_value = "ascii_art_output.txt")]
    output: PathBuf,

    /// Optional CSV file for the per-generation fitness history
    #[arg(long)]
    history: Option<PathBuf>,

    /// Where the fitness chart (best solid, average dashed) is written
    #[arg(long, default_value = "fitness_evolution.png")]
    plot: PathBuf,

    /// Fitness cache shared across generations
    #[arg(long, value_enum, default_value_t = CacheArg::None)]
    cache: CacheArg,

    /// How much progress is logged while evolving
    #[arg(long, value_enum, default_value_t = LogArg::Minimal)]
    log_level: LogArg,

    /// Generations between progress reports
    #[arg(long, default_value_t = 10)]
    report_interval: usize,
}

fn run(args: Args) -> Result<()> {
    let shape = Shape::new(args.height, args.width)?;
    let palette = io::load_palette(&args.palette)?;
    let target = io::load_target(&args.image, shape)?;
    info!(image = %args.image.display(), shape = %shape, "Loaded target");

    let strategy =
        GenerationalStrategy::new(args.crossover_rate, args.mutation_rate, args.tournament_size)?;
    let challenge = BrightnessChallenge::new(target, BrightnessMap::new(&palette));

    let mut builder = EvolutionOptions::builder()
        .num_generations(args.generations)
        .population_size(args.population)
        .elite_count(args.elites)
        .shape(shape)
        .report_interval(args.report_interval)
        .log_level(match args.log_level {
            LogArg::Verbose => LogLevel::Verbose,
            LogArg::Minimal => LogLevel::Minimal,
            LogArg::None => LogLevel::None,
        });
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    match args.cache {
        CacheArg::None => {}
        CacheArg::Global => builder = builder.cache_type(CacheType::Global),
        CacheArg::ThreadLocal => builder = builder.cache_type(CacheType::ThreadLocal),
    }

    let launcher = EvolutionLauncher::new(strategy, challenge, palette);
    let start = Instant::now();
    let outcome = launcher.evolve(builder.build())?;

    println!("{}", outcome.best.individual);
    println!();
    println!(
        "Best fitness: {:.4} after {} generations ({:.1}s)",
        outcome.best.score,
        outcome.generations,
        start.elapsed().as_secs_f64()
    );

    io::write_art(&args.output, &outcome.best.individual)?;
    println!("Art written to {}", args.output.display());

    if let Some(path) = &args.history {
        io::write_history(path, &outcome.history)?;
        println!("History written to {}", path.display());
    }

    io::plot_history(&args.plot, &outcome.history)?;
    println!("Fitness chart written to {}", args.plot.display());

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
