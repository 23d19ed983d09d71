mod analyze_cmd;
mod config;
mod doctor_cmd;
mod serve_cmd;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use objscan_config::defaults::DEFAULT_LOG_LEVEL;
use objscan_config::load_and_prepare;
use objscan_logging::init_logger;

#[derive(Parser)]
#[command(name = "objscan")]
#[command(about = "objscan: inventory the objects in a photo using a vision model")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file (default: ~/.objscan/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JPEG file and print the object inventory
    Analyze {
        /// JPEG image to analyze
        file: PathBuf,
    },
    /// Start the HTTP upload gateway
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// IP address to bind to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Check configuration and credentials without calling the vision service
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = config::resolve_config_path(cli.config.as_deref());

    match cli.command {
        // Doctor reports load failures itself instead of aborting on them.
        Commands::Doctor => {
            let _log_guard = init_logger(DEFAULT_LOG_LEVEL, false, None)?;
            doctor_cmd::run(&config_path).await
        }
        command => run_with_config(&config_path, command).await,
    }
}

async fn run_with_config(config_path: &Path, command: Commands) -> Result<()> {
    let (config, report) = load_and_prepare(config_path).await?;

    let logging = config.logging();
    let _log_guard = init_logger(
        logging.level(),
        logging.json(),
        logging.dir.as_deref().map(Path::new),
    )?;

    match command {
        Commands::Analyze { file } => analyze_cmd::run(&config, report, &file).await,
        Commands::Serve { port, bind } => serve_cmd::run(&config, report, port, bind).await,
        Commands::Doctor => doctor_cmd::run(config_path).await,
    }
}
