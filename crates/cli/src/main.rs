//! Satisfaction kiosk CLI
//!
//! Runs the kiosk server and drives a running one: record answers, read the
//! counters, browse the dashboard and download exports.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use kiosk_cli::{
    client::{ClientConfig, RestClient},
    commands::{
        ConfigCommand, DashboardArgs, ExportArgs, HealthCommand, ServeArgs, SubmitArgs,
        SummaryCommand,
    },
    output::{get_formatter, OutputFormat},
    DEFAULT_API_URL,
};
use kiosk_config::{KioskConfig, ObservabilityConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "kiosk",
    version,
    about = "Satisfaction kiosk - collect and report visitor feedback"
)]
struct Cli {
    /// API base URL
    #[arg(long, env = "KIOSK_API_URL", global = true, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a YAML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the kiosk server
    Serve(ServeArgs),

    /// Record one satisfaction answer
    Submit(SubmitArgs),

    /// Show the kiosk counters
    Summary,

    /// Check that the server is up
    Health,

    /// Show the admin dashboard
    Dashboard(DashboardArgs),

    /// Download the full record set as CSV or TXT
    Export(ExportArgs),

    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = KioskConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    init_tracing(&config.observability, cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let formatter = get_formatter(cli.output);
    let client = || {
        RestClient::new(ClientConfig {
            base_url: cli.api_url.clone(),
            timeout: Duration::from_secs(cli.timeout),
        })
    };
    let secret = config.admin.secret.as_str();

    match command {
        Commands::Serve(args) => args.execute(config.clone()).await?,
        Commands::Submit(args) => args.execute(&client()?, formatter.as_ref()).await?,
        Commands::Summary => SummaryCommand.execute(&client()?, formatter.as_ref()).await?,
        Commands::Health => HealthCommand.execute(&client()?, formatter.as_ref()).await?,
        Commands::Dashboard(args) => {
            args.execute(&client()?, formatter.as_ref(), secret).await?
        }
        Commands::Export(args) => args.execute(&client()?, secret).await?,
        Commands::Config { command } => command.execute(&config, cli.output)?,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level; `--verbose` forces debug
fn init_tracing(observability: &ObservabilityConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&observability.log_level))
    };

    let json = observability.json_logging;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_target(false)))
        .init();
}
