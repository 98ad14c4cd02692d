use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use doodle_compositor::{config::Config, pipeline::PipelineOrchestrator};

#[derive(Parser)]
#[command(
    name = "doodle-compositor",
    version,
    about = "Turn any video into a doodle-styled animation",
    long_about = "Doodle-Compositor decomposes a video into frames, traces white outlines around detected shapes, layers randomized doodles on top, and reassembles the result at the original frame rate."
)]
struct Cli {
    /// Input video file
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for the final video
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting Doodle-Compositor v{}", env!("CARGO_PKG_VERSION"));
    info!("Input: {:?}", cli.input);

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    if let Some(output_dir) = cli.output_dir {
        config.staging.output_dir = output_dir;
    }
    config.validate()?;

    let orchestrator = PipelineOrchestrator::new(config);

    match orchestrator.process(&cli.input) {
        Ok(output) => {
            info!("Output saved to: {:?}", output);
            println!("{}", output.display());
            Ok(())
        }
        Err(e) => {
            // Same boundary shape the service wrapper returns: an error
            // object with a message, never a partial artifact.
            println!("{}", serde_json::to_string(&e.to_report())?);
            std::process::exit(1);
        }
    }
}
