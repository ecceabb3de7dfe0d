//! Handle command - run one request event through the conversion service.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};

use invex_core::service::ConvertService;

use super::load_config;

/// Arguments for the handle command.
#[derive(Args)]
pub struct HandleArgs {
    /// Request event JSON file (default: stdin)
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Pretty-print the response envelope
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: HandleArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let raw = match &args.event {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    debug!("Read {} byte request event", raw.len());

    let response =
        tokio::task::spawn_blocking(move || ConvertService::new(config).handle_json(&raw)).await?;
    info!("Responding with status {}", response.status_code);

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(())
}
