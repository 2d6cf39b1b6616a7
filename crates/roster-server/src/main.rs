//! Roster server CLI
//!
//! Main entry point for serving student records over HTTP.

use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use roster_server::{create_router, AppState, Config};
use roster_store::StudentStore;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Roster - Student Record Service
///
/// Serves a JSON REST API over a flat-file student record store.
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: roster.json in current directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Path to the student records data file (overrides config)
    #[arg(short, long, value_name = "FILE")]
    data_file: Option<String>,

    /// Port for the HTTP API server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing subscriber with appropriate filter
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Roster server starting");

    match run_server(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Runs the HTTP server.
///
/// 1. Load config and apply CLI overrides
/// 2. Load the student store from the data file
/// 3. Bind the listener and serve the API
async fn run_server(args: Args) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;

    // Apply CLI argument overrides
    if let Some(ref data_file) = args.data_file {
        config.data_file.clone_from(data_file);
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    // Re-validate after overrides
    config.validate()?;

    print_config(&config);

    let store = StudentStore::load(&config.data_file).await;
    println!(
        "Loaded {} student record(s) from {}",
        store.count(),
        config.data_file
    );

    let addr: SocketAddr = ([127, 0, 0, 1], config.port).into();
    let state = AppState::new(config, store);
    let router = create_router(state);

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to bind to {addr}: {e}\n\nSuggestion: Try a different port with --port"
        )
    })?;

    println!("Roster API server running on http://{addr}");
    println!("Press Ctrl+C to stop");

    axum::serve(listener, router).await?;

    Ok(())
}

/// Loads configuration from the specified path or default location.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Config::load_from_file(path).map_err(|e| anyhow::anyhow!("{e}"))
        }
        None => Config::load().map_err(|e| anyhow::anyhow!("{e}")),
    }
}

/// Prints the loaded configuration.
fn print_config(config: &Config) {
    println!("Configuration loaded:");
    println!("  Data file: {}", config.data_file);
    println!("  Port: {}", config.port);
}
