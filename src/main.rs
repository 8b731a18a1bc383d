use clap::{Parser, Subcommand};
use mandelbrot_engine::{
    BatchController, EngineConfig, FramebufferDumpPresenter, PpmFilePresenter, read_test_cases,
};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "mandelbrot-engine", version, about = "Fixed-point Mandelbrot raster engine")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every test case to PPM images and framebuffer dumps
    Render {
        /// Test case file, one render per line
        #[arg(short, long)]
        cases: PathBuf,

        /// Engine configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory receiving images/ and output_files/
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Render every test case and compare it with golden framebuffer dumps
    Verify {
        /// Test case file, one render per line
        #[arg(short, long)]
        cases: PathBuf,

        /// Directory holding output_file_<n>.txt golden dumps
        #[arg(short, long)]
        golden: PathBuf,

        /// Engine configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            cases,
            config,
            output,
        } => {
            let config = EngineConfig::load_or_default(config.as_deref())?;
            let cases = read_test_cases(&cases)?;
            let mut controller = BatchController::new(
                config,
                PpmFilePresenter::new(),
                FramebufferDumpPresenter::new(),
            );

            controller.generate(&cases)?;
            controller.write(&output)?;
        }
        Commands::Verify {
            cases,
            golden,
            config,
        } => {
            let config = EngineConfig::load_or_default(config.as_deref())?;
            let cases = read_test_cases(&cases)?;
            let mut controller = BatchController::new(
                config,
                PpmFilePresenter::new(),
                FramebufferDumpPresenter::new(),
            );

            controller.generate(&cases)?;
            controller.verify(&golden)?.into_result()?;
        }
    }

    Ok(())
}
