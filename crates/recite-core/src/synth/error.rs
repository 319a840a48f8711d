//! Speech synthesis error types

use thiserror::Error;

/// Errors that can occur while obtaining speech audio for a chunk.
///
/// None of these are fatal to a session: every failure degrades the
/// affected unit to silence.
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Network-level failure (connect, timeout, TLS, ...)
    #[error("Synthesis request failed: {0}")]
    Http(String),

    /// Provider answered with a non-success status
    #[error("Synthesis provider returned status {0}")]
    BadStatus(u16),

    /// Response body could not be decoded into audio
    #[error("Failed to decode synthesized audio: {0}")]
    Decode(String),

    /// Response decoded to zero samples
    #[error("Synthesized audio was empty")]
    EmptyAudio,
}

/// Result type for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;
