//! Error types
//!
//! Building, adapting and laying out a chain never fails; errors only arise at
//! the edges (configuration files, output serialization and writing).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the configuration and output layers
#[derive(Error, Debug)]
pub enum ChainvizError {
    #[error("Failed to read config {}: {}", .path.display(), .source)]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {}", .path.display(), .source)]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config {}: {}", .path.display(), .source)]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Chain serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, ChainvizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_read_message_names_path() {
        let err = ChainvizError::ConfigRead {
            path: PathBuf::from("missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.toml"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_output_from_io() {
        let err: ChainvizError = std::io::Error::new(std::io::ErrorKind::Other, "pipe").into();
        assert!(matches!(err, ChainvizError::Output(_)));
    }
}
