//! Audio backend error types

use thiserror::Error;

/// Errors that can occur while starting audio output.
///
/// All of these are non-fatal to a reading session: the session falls back
/// to subtitles-only playback on the transport clock.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No default output device available
    #[error("No default audio output device found")]
    NoDefaultDevice,

    /// Failed to get device configuration
    #[error("Failed to get device config: {0}")]
    ConfigError(String),

    /// Failed to build audio stream
    #[error("Failed to build audio stream: {0}")]
    StreamBuildError(String),

    /// Failed to start/play stream
    #[error("Failed to start audio stream: {0}")]
    StreamPlayError(String),
}

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;
