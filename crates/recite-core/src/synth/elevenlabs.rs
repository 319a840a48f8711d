//! ElevenLabs speech synthesis provider
//!
//! Blocking HTTP client for the ElevenLabs text-to-speech endpoint. One
//! request per chunk, no retry: any failure is reported to the resolver,
//! which substitutes silence.

use std::io::Read;
use std::time::Duration;

use super::decode::decode_clip;
use super::error::{SynthesisError, SynthesisResult};
use super::{SpeechClip, SpeechProvider};

/// Synthesis model requested from the provider.
const MODEL_ID: &str = "eleven_multilingual_v2";

/// Requested output encoding. Keep in sync with the decoder (mp3).
const OUTPUT_FORMAT: &str = "mp3_44100_128";

/// Voice settings tuned for long-form reading.
const STABILITY: f64 = 0.3;
const SIMILARITY_BOOST: f64 = 0.7;

/// Time allowed to establish a connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall per-request deadline. A hung request must not stall chunk
/// resolution indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Hard cap on response size (10 MiB). A per-chunk clip is a few hundred KiB.
const MAX_RESPONSE_BYTES: u64 = 10 * 1024 * 1024;

/// ElevenLabs TTS client with voice credentials.
pub struct ElevenLabsProvider {
    agent: ureq::Agent,
    api_key: String,
    voice_id: String,
}

impl ElevenLabsProvider {
    /// Create a provider for the given credentials.
    pub fn new(api_key: impl Into<String>, voice_id: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build();
        Self {
            agent,
            api_key: api_key.into(),
            voice_id: voice_id.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://api.elevenlabs.io/v1/text-to-speech/{}",
            self.voice_id
        )
    }

    /// Request encoded speech audio for `text`.
    fn request_audio(&self, text: &str) -> SynthesisResult<Vec<u8>> {
        let body = serde_json::json!({
            "text": text,
            "model_id": MODEL_ID,
            "voice_settings": {
                "stability": STABILITY,
                "similarity_boost": SIMILARITY_BOOST,
            },
            "output_format": OUTPUT_FORMAT,
        });

        let response = self
            .agent
            .post(&self.endpoint())
            .set("xi-api-key", &self.api_key)
            .set("Accept", "audio/mpeg")
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => SynthesisError::BadStatus(code),
                ureq::Error::Transport(t) => SynthesisError::Http(t.to_string()),
            })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_RESPONSE_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| SynthesisError::Http(e.to_string()))?;

        Ok(bytes)
    }
}

impl SpeechProvider for ElevenLabsProvider {
    fn synthesize(&self, text: &str) -> SynthesisResult<SpeechClip> {
        let bytes = self.request_audio(text)?;
        decode_clip(bytes)
    }
}
