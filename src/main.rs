use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use pyversion_server::config::{DEFAULT_LOG_FILTER, LOG_FILE_NAME, ServerConfig};

const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Parser)]
#[command(name = "pyversion-server")]
#[command(version, about = "HTTP service reporting the latest Python releases")]
struct Cli {
    /// Environment file to load before reading configuration [default: .env]
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Loaded before logging so LOG_DIR and RUST_LOG may come from the file
    let env_loaded = load_env_file(cli.env_file.as_deref());
    let _guard = init_tracing();

    if let Err(e) = &env_loaded {
        error!("{:#}", e);
    }
    env_loaded?;

    let config = ServerConfig::from_env()
        .inspect_err(|e| error!("Invalid configuration: {}", e))
        .context("failed to load configuration")?;
    info!(port = config.port, "Configuration loaded");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(pyversion_server::server::run_server(config))
}

/// Load an env file into the process environment.
///
/// A missing default `.env` is fine; an explicitly requested file must exist
/// and parse.
fn load_env_file(path: Option<&Path>) -> anyhow::Result<()> {
    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_ENV_FILE), false),
    };

    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() && !explicit => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to load env file {}", path.display())),
    }
}

/// Log to stdout, or to a daily rolling file when `LOG_DIR` is set.
/// `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() -> WorkerGuard {
    let log_dir = env::var_os("LOG_DIR");
    let to_file = log_dir.is_some();

    let (writer, guard) = match log_dir {
        Some(dir) => {
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_NAME))
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if json {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer()
            .with_ansi(!to_file)
            .with_writer(writer)
            .boxed()
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();

    guard
}
