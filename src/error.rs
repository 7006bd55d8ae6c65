//! Error types shared by the server, the client and the page composer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::data::LoadError;
use crate::widget::WidgetError;

/// Top-level error for every operation exposed by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal, socket or file I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The question deck could not be loaded.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    /// The configuration file exists but could not be used.
    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A frame could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The WebSocket transport failed.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The alternatives widget rejected an operation.
    #[error(transparent)]
    Widget(#[from] WidgetError),

    /// The logging subscriber could not be installed.
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}
