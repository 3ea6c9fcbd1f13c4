use thiserror::Error;

/// Errors raised while fetching or decoding catalog data.
///
/// Only [`CatalogError::Cancelled`] escapes [`crate::catalog::CatalogLoader::load`];
/// every other variant is turned into a fallback with a soft warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog source failed: {0}")]
    Source(String),

    #[error("Catalog fetch timed out after {0} seconds")]
    Timeout(u64),

    #[error("Catalog source returned no rows")]
    Empty,

    #[error("Catalog load was cancelled by a newer session")]
    Cancelled,

    #[error("Failed to decode fallback catalog '{origin}': {message}")]
    FallbackDecode { origin: String, message: String },
}

/// Errors that can occur during a bulk CSV import.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not open import file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV input has no header row")]
    MissingHeader,
}

/// Errors that can occur when decoding a share link.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareCodecError {
    #[error("Unknown value '{value}' for share key '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Errors that can occur while loading layered configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Errors that can occur when saving or loading a catalog snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Could not access snapshot file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot serialization failed: {0}")]
    Encode(String),

    #[error("Snapshot deserialization failed: {0}")]
    Decode(String),
}

/// Errors returned when a wizard answer does not fit the current screen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("'{option}' is not an answer to the {step} step")]
    UnknownOption { step: &'static str, option: String },

    #[error("'{option}' is not available for the current selection")]
    UnavailableOption { option: String },

    #[error("The {0} screen takes no answers")]
    NoQuestion(&'static str),
}
