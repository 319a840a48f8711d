//! Text source seam
//!
//! Page text extraction lives outside the synchronization engine; sources
//! implement this trait and hand the engine a capped [`PagePayload`].

use thiserror::Error;

use crate::types::PagePayload;

/// Errors from a text source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source produced nothing usable
    #[error("No readable text was found in {0}")]
    NothingReadable(String),

    /// The source could not be read at all
    #[error("Failed to read text source: {0}")]
    Io(#[from] std::io::Error),
}

/// Supplies extracted page text for a single page on request.
pub trait TextSource {
    /// Extract the page payload, with `text` capped to `char_cap`
    /// characters. Implementations return whatever they find; length
    /// validation happens at session start.
    fn extract(&self, char_cap: usize) -> Result<PagePayload, SourceError>;
}

/// Cap `text` to at most `char_cap` characters, respecting char boundaries.
pub fn cap_text(text: &str, char_cap: usize) -> &str {
    match text.char_indices().nth(char_cap) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
