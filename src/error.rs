//! Crate error type.
//!
//! Most DSP failure modes are not errors at all: a window without a
//! discernable pitch yields an unvoiced result and a malformed note label
//! falls back to A4. The variants below cover what is left, i.e failures a
//! caller has to report to the user.

use thiserror::Error;

/// Errors reported by the [`Session`](crate::session::Session) and the
/// reference/config loaders.
#[derive(Debug, Error)]
pub enum Error {
    /// The sound sink could not be created. Playback is aborted and not retried.
    #[error("Sound output unavailable: {0}")]
    SoundSinkUnavailable(String),

    /// The reference pitch payload could not be deserialized.
    #[error("Invalid reference pitch data: {0}")]
    InvalidReference(#[from] serde_json::Error),

    /// The reference pitch payload reported a non-success status.
    #[error("Reference pitch extraction failed with status \"{0}\"")]
    ReferenceStatus(String),

    /// Reference sample times must be non-decreasing.
    #[error("Reference sample {index} at {time} s precedes the previous sample")]
    UnorderedReference {
        /// Index of the offending sample.
        index: usize,
        /// Its time in seconds.
        time: f64,
    },

    /// The configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
