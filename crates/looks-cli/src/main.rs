//! looks - photo looks and colour correction from the command line
//!
//! Lists the look gallery, shows parameter curves, validates session configs
//! and renders looks onto PNG files or a built-in test card.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "looks")]
#[command(author, version, about = "Photo looks and colour correction")]
#[command(long_about = "
Applies gallery looks and colour correction to images.

Examples:
  looks list                                   # Show the look gallery
  looks params                                 # Show parameter ranges and curves
  looks check session.yaml                     # Validate a session config
  looks render -o out.png --look Chrome        # Render a look on the test card
  looks render photo.png -o out.png --look Noir --set contrast=30 --set warmth=80
  looks previews photo.png -o previews/ --size 256
  RUST_LOG=looks_gallery=debug looks previews -o previews/
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Session config (YAML); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the looks in the gallery
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show parameter ranges, curves and defaults
    #[command(visible_alias = "p")]
    Params(ParamsArgs),

    /// Validate a session config
    Check(CheckArgs),

    /// Render a look plus colour correction to a PNG
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Render every look's preview to a directory
    Previews(PreviewsArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Show the filter stages of each look
    #[arg(short, long)]
    stages: bool,
}

#[derive(Args)]
struct ParamsArgs {
    /// Map a normalized value to native units for every parameter
    #[arg(long)]
    probe: Option<f64>,
}

#[derive(Args)]
struct CheckArgs {
    /// Config file(s) to validate
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct RenderArgs {
    /// Input PNG; the test card when omitted
    input: Option<PathBuf>,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Look name (default: the config's initial look)
    #[arg(short, long)]
    look: Option<String>,

    /// Parameter assignment, e.g. `brightness=20` (repeatable)
    #[arg(short, long = "set", value_name = "PARAM=VALUE")]
    set: Vec<String>,

    /// Test card size as WIDTHxHEIGHT
    #[arg(long, default_value = "512x384")]
    card: String,
}

#[derive(Args)]
struct PreviewsArgs {
    /// Input PNG; the test card when omitted
    input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Longest preview side in pixels (overrides the config)
    #[arg(long)]
    size: Option<u32>,

    /// Test card size as WIDTHxHEIGHT
    #[arg(long, default_value = "512x384")]
    card: String,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let config = cli.config.as_deref();
    match cli.command {
        Commands::List(args) => commands::list::run(args, config, cli.verbose),
        Commands::Params(args) => commands::params::run(args, config, cli.verbose),
        Commands::Check(args) => commands::check::run(args, cli.verbose),
        Commands::Render(args) => commands::render::run(args, config, cli.verbose),
        Commands::Previews(args) => commands::previews::run(args, config, cli.verbose),
    }
}
