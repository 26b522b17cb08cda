use anyhow::Context;
use clap::Parser;
use pipenet_console::Console;
use pipenet_console::config::ConsoleConfig;
use pipenet_engine::Engine;
use std::io;
use std::path::PathBuf;

/// Command line arguments for the pipenet console
#[derive(Parser, Debug)]
#[command(name = "pipenet")]
#[command(about = "Pipeline and compressor station record manager")]
struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Diagnostics level written to stderr (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Data file to load before the menu is shown
    #[arg(short, long)]
    load: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConsoleConfig::from_file(path)?,
        None => ConsoleConfig::default(),
    };

    // Initialize tracing on stderr so it never mixes with the menu on stdout
    let log_level = args.log_level.as_deref().unwrap_or(&config.log_level);
    let level: tracing::Level = log_level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(Engine::new(), stdin.lock(), stdout.lock());

    if let Some(path) = args.load.as_ref().or(config.autoload.as_ref()) {
        tracing::info!("Loading {} at startup", path.display());
        console.load_file(path).context("Failed to write to stdout")?;
    }

    console.run().context("Console I/O failed")?;

    let state = console.engine().state();
    tracing::info!(
        "Session ended with {} pipes and {} stations",
        state.pipes().len(),
        state.stations().len()
    );
    Ok(())
}
