//! `invex` - turn invoice PDFs into header and line item CSV extracts.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, handle, process};

/// Extract invoice headers and line items into zipped CSV tables
#[derive(Parser)]
#[command(name = "invex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON config file overriding the default location
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one PDF or text file into an extract
    Process(process::ProcessArgs),

    /// Convert every file matching a glob, one ZIP each
    Batch(batch::BatchArgs),

    /// Answer a request event and print the response envelope
    Handle(handle::HandleArgs),

    /// Show, create or locate the config file
    Config(config::ConfigArgs),
}

/// Install a stderr subscriber so stdout carries only command output.
fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Handle(args) => handle::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
