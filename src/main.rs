//! Gig CLI - learn deterministic acceptors from labeled samples.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Gig - genetic induction of finite acceptors
#[derive(Parser, Debug)]
#[command(name = "gig")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Learn an acceptor from a JSON sample
    Learn {
        /// Sample file: {"positive": [...], "negative": [...]}
        #[arg(required = true)]
        sample: PathBuf,

        /// JSON evolution configuration (flags override its fields)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Genomes per generation
        #[arg(long)]
        population: Option<usize>,

        /// Maximum generations
        #[arg(short, long)]
        generations: Option<usize>,

        /// Mating pool size
        #[arg(long)]
        parents: Option<usize>,

        /// Elite genomes kept per generation
        #[arg(long)]
        elitism: Option<usize>,

        /// Fraction of offspring mutated (0-1)
        #[arg(long)]
        mutation_fraction: Option<f64>,

        /// Stop after N generations without improvement
        #[arg(long)]
        saturation: Option<usize>,

        /// Stop once the best fitness reaches this fraction of the maximum (0-1]
        #[arg(long)]
        target: Option<f64>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Worker threads for fitness evaluation (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Initial population strategy
        #[arg(long)]
        init: Option<cli::InitArg>,

        /// Parent selection method
        #[arg(long)]
        selection: Option<cli::SelectionArg>,

        /// Tournament size for --selection tournament
        #[arg(long, default_value = "3")]
        tournament_size: usize,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print the maximal canonical acceptor of a sample
    Mca {
        /// Sample file: {"positive": [...], "negative": [...]}
        #[arg(required = true)]
        sample: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let result = match args.command {
        Commands::Learn {
            sample,
            config,
            population,
            generations,
            parents,
            elitism,
            mutation_fraction,
            saturation,
            target,
            seed,
            threads,
            init,
            selection,
            tournament_size,
            format,
            progress,
        } => {
            let overrides = cli::learn::Overrides {
                population,
                generations,
                parents,
                elitism,
                mutation_fraction,
                saturation,
                target,
                seed,
                threads,
                init,
                selection,
                tournament_size,
            };
            cli::learn::execute(&sample, config.as_deref(), &overrides, format, progress)
        }

        Commands::Mca { sample, format } => cli::mca::execute(&sample, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
