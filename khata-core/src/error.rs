//! Error types for catalog loading, issuer resolution, and per-record skips.

use thiserror::Error;

/// A defect in a single profile definition.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Missing or mistyped field in the profile's catalog entry.
    #[error("{0}")]
    Spec(String),

    #[error("invalid regex: {0}")]
    BadRegex(#[from] regex::Error),

    /// A 1-based capture-group index that the regex does not have.
    #[error("{field} = {index} is out of range (pattern has {available} capture groups)")]
    BadGroupIndex {
        field: &'static str,
        index: usize,
        available: usize,
    },

    #[error("invalid date format {format:?}")]
    BadDateFormat { format: String },

    #[error("degenerate crop box [{x0}, {y0}, {x1}, {y1}]")]
    BadCropBox { x0: f32, y0: f32, x1: f32, y1: f32 },
}

/// Catalog-level failure. Fatal: without a valid profile set nothing runs.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("cannot read profile catalog {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("profile catalog is not a TOML table of profiles: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("profile {key:?}: {source}")]
    Profile { key: String, source: ProfileError },

    #[error("no profile with key {0:?} in the catalog")]
    UnknownKey(String),
}

/// No profile's identifier was found in the first page's text.
///
/// Callers fall back to an explicitly supplied profile key, which bypasses
/// resolution entirely.
#[derive(Debug, Error)]
#[error("no profile identifier matched the first page's text")]
pub struct ProfileNotIdentified;

/// A single matched line that could not be normalized. The line is skipped
/// and reported; extraction of the rest of the region continues.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {line:?}")]
pub struct RecordError {
    /// The matched text, for the operator refining the profile's pattern.
    pub line: String,
    pub kind: RecordErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordErrorKind {
    #[error("unparseable date {value:?} (expected {format})")]
    DateParse { value: String, format: String },

    #[error("unparseable amount {value:?}")]
    AmountParse { value: String },

    #[error("unrecognized transaction-type marker {marker:?}")]
    DirectionAmbiguous { marker: String },
}
