mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "framestat", about = "Image-sequence statistics over a shared region of interest")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics of a single image
    Info(commands::info::InfoArgs),
    /// List the image files a folder analysis would pick up
    List(commands::list::ListArgs),
    /// Crop and Butterworth-smooth an image
    Smooth(commands::smooth::SmoothArgs),
    /// Analyze every image in a folder
    Batch(commands::batch::BatchArgs),
    /// Print or save a default analysis config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Smooth(args) => commands::smooth::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
