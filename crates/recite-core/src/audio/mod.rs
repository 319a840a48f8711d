//! Audio output for Recite
//!
//! Lock-free design for real-time safety:
//! - **Control thread**: sends commands via lock-free ringbuffer
//! - **Audio thread**: owns the PlayerEngine exclusively, processes commands
//! - **Atomics**: control thread reads playback state without locks
//!
//! Audio is best-effort: if no device is available or the stream fails to
//! start, the session keeps running on the transport clock with subtitles
//! only.

mod error;
mod output;

pub use error::{AudioError, AudioResult};
pub use output::{start_audio_system, AudioHandle, AudioSystemResult};
