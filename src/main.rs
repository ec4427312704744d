//! rssagg API server entry point.

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rssagg::config::Config;
use rssagg::server::{self, ServeOptions};
use rssagg::store::PgUserStore;

/// Versioned user-registration API.
#[derive(Parser, Debug)]
#[command(name = "rssagg")]
#[command(about = "HTTP API for registering users, backed by PostgreSQL")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format.
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply migrations and run the HTTP server (default).
    Serve {
        /// Do not apply pending migrations at startup.
        #[arg(long)]
        skip_migrations: bool,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Apply pending schema migrations and exit.
    Migrate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads LOG_FORMAT
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose, args.log_format);

    match args.command {
        Some(Command::Serve { skip_migrations }) => cmd_serve(skip_migrations).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Migrate) => cmd_migrate().await,
        None => cmd_serve(false).await,
    }
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("rssagg=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

/// Load configuration, logging the reason before bailing out.
fn load_config() -> anyhow::Result<Config> {
    Config::load().map_err(|e| {
        error!("{}", e);
        e.into()
    })
}

/// Run the HTTP server.
async fn cmd_serve(skip_migrations: bool) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config()?;

    let options = ServeOptions { skip_migrations };
    server::run(&config, options, server::shutdown_signal())
        .await
        .map_err(|e| {
            error!("{}", e);
            e.into()
        })
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("RSSAGG - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Database: {}", config.redacted_db_url());
    println!("  Max Connections: {}", config.db_max_connections);
    println!("  Acquire Timeout: {}s", config.db_acquire_timeout_secs);
    match config.metrics_port {
        Some(port) => println!("  Metrics: port {}", port),
        None => println!("  Metrics: Disabled"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Apply schema migrations and exit.
async fn cmd_migrate() -> anyhow::Result<()> {
    let config = load_config()?;
    let store = PgUserStore::connect(&config).await.map_err(|e| {
        error!("Cannot connect to database: {}", e);
        e
    })?;
    store.migrate().await?;
    Ok(())
}
