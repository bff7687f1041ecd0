//! Error types for menukit-core.

use crate::widget::WidgetId;
use thiserror::Error;

/// Errors from widget tree manipulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id does not name a widget in this tree.
    #[error("unknown widget {0}")]
    UnknownWidget(WidgetId),
}

/// Errors from loading a style file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file is not valid TOML, or a value has the wrong shape
    /// (bad colors are reported here too).
    #[error("invalid style: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
