use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secure_wiper::app::TerminalSurface;
use secure_wiper::export::DirectoryTarget;
use secure_wiper::{SimError, SimulatorConfig, WiperApp};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "secure-wiper")]
#[command(about = "Simulated secure data wipe with completion certificates (no device is touched)")]
#[command(version = "1.0.0")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "SECURE_WIPER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive home -> progress -> certificate flow (default)
    Run,

    /// Run one simulated wipe without prompts
    Simulate {
        /// Export the certificate into this directory
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Print the completion record as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Skip every artificial delay and tick as fast as possible
        #[arg(long)]
        fast: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug);
    setup_signal_handlers()?;

    if !cfg!(feature = "color-output") {
        colored::control::set_override(false);
    }

    let config = SimulatorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut surface = TerminalSurface::new();

    let outcome = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let mut app = WiperApp::new(config);
            let stdin = BufReader::new(tokio::io::stdin());
            app.run_interactive(&mut surface, stdin).await
        }
        Commands::Simulate { export, json, fast } => {
            simulate(config, &mut surface, export, json, fast).await
        }
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(SimError::Cancelled) => {
            eprintln!("\nSimulation interrupted.");
            std::process::exit(130);
        }
        Err(e) => Err(e.into()),
    }
}

async fn simulate(
    mut config: SimulatorConfig,
    surface: &mut TerminalSurface,
    export: Option<PathBuf>,
    json: bool,
    fast: bool,
) -> Result<(), SimError> {
    if fast {
        config.timing = secure_wiper::settings::TimingConfig::instant();
    }

    let mut app = match &export {
        Some(dir) => WiperApp::with_target(config, DirectoryTarget::new(dir)),
        None => WiperApp::new(config),
    };

    let record = app.run_once(surface, export.is_some()).await?;

    if json {
        let text = serde_json::to_string_pretty(&record).map_err(std::io::Error::from)?;
        println!("{}", text);
    }
    Ok(())
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("secure_wiper=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Signal handler for graceful shutdown
fn setup_signal_handlers() -> Result<()> {
    use signal_hook::{consts::SIGINT, iterator::Signals};

    let mut signals = Signals::new([SIGINT])?;

    std::thread::spawn(move || {
        for sig in signals.forever() {
            if sig == SIGINT {
                eprintln!("\n\n🛑 Interrupt received! Stopping simulation...");
                secure_wiper::set_interrupted();
            }
        }
    });

    Ok(())
}
