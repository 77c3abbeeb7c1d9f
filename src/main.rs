//! thermoprop-mcp: MCP server for thermodynamic property lookup
//!
//! Reads JSON-RPC requests from stdin, one per line, and answers each on
//! stdout. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use thermoprop_mcp::config;
use thermoprop_mcp::mcp::server::McpServer;
use thermoprop_mcp::thermo::{build_backend, BackendKind};

/// MCP server for thermodynamic property lookup.
///
/// Exposes property calculation, component search and listing tools over
/// line-delimited JSON-RPC on stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "thermoprop-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Property backend, overriding the configuration file
    #[arg(short, long, value_name = "BACKEND")]
    backend: Option<BackendKind>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the thermoprop-mcp server.
fn main() -> ExitCode {
    let args = Args::parse();

    let config_path = args.config.as_deref();
    let mut cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if config_path.is_none() {
                if let Some(default_path) = config::default_config_path() {
                    eprintln!("\nConfig was read from: {}", default_path.display());
                    eprintln!("See config/example-config.json for the format");
                }
            }
            return ExitCode::FAILURE;
        }
    };

    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    if let Some(backend) = args.backend {
        cfg.backend = backend;
    }
    if let Some(path) = cfg.unused_database_path() {
        warn!(
            path = %path.display(),
            backend = %cfg.backend,
            "compound_database_path is only used by the correlation backend"
        );
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %cfg.backend,
        "Starting thermoprop-mcp server"
    );

    let backend = match build_backend(
        cfg.backend,
        cfg.cache.capacity,
        cfg.compound_database_path.as_deref(),
    ) {
        Ok(backend) => backend,
        Err(e) => {
            error!(error = %e, "Failed to initialise backend");
            eprintln!("Backend error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut server = McpServer::new(backend).with_temperature_unit(cfg.temperature_unit());

    info!("MCP server ready, waiting for requests...");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(server.run());

    match result {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
