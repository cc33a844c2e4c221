use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for serialization and the serving adapter.
///
/// The document generator itself has no error surface: missing metadata
/// resolves to documented defaults and name collisions are last-write-wins.
/// Errors only arise at the edges - serializing a document, fetching a
/// remote spec for the Markdown export, or enumerating controllers from a
/// failing source.
#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spec fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("markdown conversion failed: {0}")]
    Markdown(String),

    #[error("controller discovery failed: {0}")]
    Discovery(String),
}
