//! System Monitor daemon binary.
//!
//! Runs the sampling loops, or serves the snapshot file over HTTP.

use clap::{Args, Parser, Subcommand};
use system_monitor::{start_web_server, Monitor, MonitorConfig, WebConfig, DEFAULT_WEB_PORT};
use tracing::{info, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "system_monitor")]
#[command(about = "Samples CPU, memory and power usage into a JSON snapshot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sampling daemon (default)
    Run,

    /// Serve the snapshot file over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Serve(args)) => serve_command(args).await?,
        Some(Commands::Run) | None => run_command().await,
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(log_level(cli), rust_log.as_deref()))
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// `RUST_LOG` directives on top of the level picked by the flags.
fn log_filter(level: Level, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives.unwrap_or_default())
}

async fn run_command() {
    println!("Starting system_monitor daemon...");
    info!("Starting system_monitor daemon");

    Monitor::new(MonitorConfig::default()).spawn().wait().await;
}

async fn serve_command(args: &ServeArgs) -> anyhow::Result<()> {
    let config = WebConfig::new(&args.host, args.port).with_cors(!args.no_cors);
    start_web_server(config).await?;
    Ok(())
}
