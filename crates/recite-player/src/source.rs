//! Text sources for the player: a file on disk or piped stdin

use std::io::Read;
use std::path::PathBuf;

use recite_core::source::{cap_text, SourceError, TextSource};
use recite_core::PagePayload;

/// Reads the page text from a file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TextSource for FileSource {
    fn extract(&self, char_cap: usize) -> Result<PagePayload, SourceError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let title = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Reading".to_string());

        Ok(PagePayload {
            url: format!("file:{}", self.path.display()),
            title,
            text: cap_text(raw.trim(), char_cap).to_string(),
        })
    }
}

/// Reads the page text from standard input (pipe mode).
///
/// Note that pipe mode consumes stdin, so the keyboard toggle is
/// unavailable; playback runs to completion.
pub struct StdinSource;

impl TextSource for StdinSource {
    fn extract(&self, char_cap: usize) -> Result<PagePayload, SourceError> {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;

        Ok(PagePayload {
            url: "stdin".to_string(),
            title: "Reading".to_string(),
            text: cap_text(raw.trim(), char_cap).to_string(),
        })
    }
}
