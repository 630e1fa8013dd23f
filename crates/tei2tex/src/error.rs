//! Error types for the converter library.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be decoded or parsed as XML.
    #[error(transparent)]
    Xml(#[from] tei_xml::Error),

    #[error("failed to read configuration file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
