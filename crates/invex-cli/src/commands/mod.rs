//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod handle;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use invex_core::models::config::InvexConfig;
use invex_core::pdf::PlainText;
use invex_core::service::{Conversion, ConvertService};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invex")
        .join("config.json")
}

/// Load the config from `--config`, then the default path, then defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvexConfig> {
    if let Some(path) = config_path {
        return Ok(InvexConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(InvexConfig::from_file(&default_path)?)
    } else {
        Ok(InvexConfig::default())
    }
}

/// Kind of input document, decided by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    /// Text that was already extracted from a PDF.
    Text,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Read and convert one file on the blocking pool.
pub async fn convert_file(path: PathBuf, config: InvexConfig) -> anyhow::Result<Conversion> {
    let Some(kind) = DocumentKind::from_path(&path) else {
        anyhow::bail!("Unsupported file format: {}", path.display());
    };

    tokio::task::spawn_blocking(move || -> anyhow::Result<Conversion> {
        let data = fs::read(&path)?;
        debug!("Read {} bytes from {}", data.len(), path.display());

        let conversion = match kind {
            DocumentKind::Pdf => ConvertService::new(config).convert(&data)?,
            DocumentKind::Text => ConvertService::with_extractor(config, PlainText).convert(&data)?,
        };
        Ok(conversion)
    })
    .await?
}
