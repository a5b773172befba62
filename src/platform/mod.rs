// ChatCut - platform/mod.rs
//
// Host-capability boundary. The core never performs I/O or produces pixels;
// these traits are what an embedding host (GUI shell, web runtime) plugs in.
// Dependencies: standard library plus core data types — no app layer.

pub mod fs;

use crate::core::compose::RenderDocument;
use crate::util::error::ExportError;
use std::fmt;
use std::io;

// =============================================================================
// Raw-text acquisition
// =============================================================================

/// Failure modes of a single-shot text acquisition.
#[derive(Debug)]
pub enum TextSourceError {
    /// The underlying read failed.
    Io { source: io::Error },

    /// The content is not valid UTF-8 text.
    Decode { source: std::str::Utf8Error },

    /// The source exceeds the supported size.
    TooLarge { size: u64, max_size: u64 },
}

impl fmt::Display for TextSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { source } => write!(f, "read failed: {source}"),
            Self::Decode { source } => write!(f, "not valid UTF-8: {source}"),
            Self::TooLarge { size, max_size } => {
                write!(f, "{size} bytes exceeds the {max_size}-byte limit")
            }
        }
    }
}

impl std::error::Error for TextSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::Decode { source } => Some(source),
            Self::TooLarge { .. } => None,
        }
    }
}

/// A way to obtain raw export text.
///
/// Single-shot with a success/failure outcome; the host may resolve it
/// asynchronously (file picker, drag-and-drop) and call into the core once
/// the text is available.
pub trait TextSource {
    fn read_text(&self) -> Result<String, TextSourceError>;
}

/// In-memory source, mostly for tests and hosts that already hold the text.
pub struct StringTextSource(pub String);

impl TextSource for StringTextSource {
    fn read_text(&self) -> Result<String, TextSourceError> {
        Ok(self.0.clone())
    }
}

// =============================================================================
// Rasterization
// =============================================================================

/// A way to turn a fully resolved, styled document into image bytes.
///
/// The core treats this as opaque; failure is a non-fatal advisory and the
/// editing session state stays valid for a retry.
pub trait Rasterizer {
    fn rasterize(&self, document: &RenderDocument) -> Result<Vec<u8>, ExportError>;
}

/// Run a rasterizer over a composed document, logging the outcome.
pub fn rasterize_document(
    rasterizer: &dyn Rasterizer,
    document: &RenderDocument,
) -> Result<Vec<u8>, ExportError> {
    match rasterizer.rasterize(document) {
        Ok(bytes) => {
            tracing::debug!(bytes = bytes.len(), "Rasterization complete");
            Ok(bytes)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rasterization failed; session state preserved");
            Err(e)
        }
    }
}
