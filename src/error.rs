use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to load asset `{name}` from {}: {source}", .path.display())]
    AssetLoad {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("asset `{name}` at {} has no visible content", .path.display())]
    EmptyAsset { name: &'static str, path: PathBuf },
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config {} is not valid JSON: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error(
        "terminal too small: need at least {min_width}x{min_height}, got {width}x{height}"
    )]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
