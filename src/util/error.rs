// ChatCut - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors keep their causal chain
// for diagnostic logging.
//
// No error in this system is fatal: every failure returns control to a
// prior, still-valid session state (import can be retried with another
// file, rasterization can be retried without losing edits).

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ChatCut operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ChatCutError {
    /// Profile loading or validation failed.
    Profile(ProfileError),

    /// Export-file import failed before a conversation was produced.
    Import(ImportError),

    /// Document composition or rasterization failed.
    Export(ExportError),
}

impl fmt::Display for ChatCutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile(e) => write!(f, "Profile error: {e}"),
            Self::Import(e) => write!(f, "Import error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for ChatCutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Profile(e) => Some(e),
            Self::Import(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

impl From<ProfileError> for ChatCutError {
    fn from(e: ProfileError) -> Self {
        Self::Profile(e)
    }
}

impl From<ImportError> for ChatCutError {
    fn from(e: ImportError) -> Self {
        Self::Import(e)
    }
}

impl From<ExportError> for ChatCutError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Profile errors
// ---------------------------------------------------------------------------

/// Errors related to export-profile loading and validation.
#[derive(Debug)]
pub enum ProfileError {
    /// TOML document could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A required field is missing or empty in the profile definition.
    MissingField {
        profile_id: String,
        field: &'static str,
    },

    /// A regex pattern in the profile is invalid.
    InvalidRegex {
        profile_id: String,
        field: &'static str,
        pattern: String,
        source: regex::Error,
    },

    /// A regex pattern exceeds the maximum allowed length.
    RegexTooLong {
        profile_id: String,
        field: &'static str,
        length: usize,
        max_length: usize,
    },

    /// A line pattern lacks a capture group the parser depends on.
    MissingCaptureGroup {
        profile_id: String,
        field: &'static str,
        group: &'static str,
    },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "cannot parse profile '{}': {source}", path.display())
            }
            Self::MissingField { profile_id, field } => {
                write!(f, "profile '{profile_id}': missing required field '{field}'")
            }
            Self::InvalidRegex {
                profile_id,
                field,
                pattern,
                source,
            } => write!(
                f,
                "profile '{profile_id}': invalid regex in '{field}' ('{pattern}'): {source}"
            ),
            Self::RegexTooLong {
                profile_id,
                field,
                length,
                max_length,
            } => write!(
                f,
                "profile '{profile_id}': regex in '{field}' is {length} chars \
                 (maximum {max_length})"
            ),
            Self::MissingCaptureGroup {
                profile_id,
                field,
                group,
            } => write!(
                f,
                "profile '{profile_id}': pattern '{field}' has no '{group}' capture group"
            ),
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::InvalidRegex { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Import errors
// ---------------------------------------------------------------------------

/// Errors produced while turning a user-picked file into a conversation.
///
/// All variants are recoverable: the session stays on the import screen and
/// the user may retry with a different file.
#[derive(Debug)]
pub enum ImportError {
    /// File extension rejected before any read was attempted.
    UnsupportedFile {
        file_name: String,
        expected_extension: &'static str,
    },

    /// The raw-text acquisition step failed (I/O).
    Read {
        file_name: String,
        source: io::Error,
    },

    /// The file content is not valid UTF-8 text.
    Decode {
        file_name: String,
        source: std::str::Utf8Error,
    },

    /// The file exceeds the maximum supported export size.
    TooLarge {
        file_name: String,
        size: u64,
        max_size: u64,
    },

    /// Parsing succeeded but produced zero messages (malformed or foreign
    /// format; detected by emptiness per the fail-soft parser contract).
    NoMessages { file_name: String },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFile {
                file_name,
                expected_extension,
            } => write!(
                f,
                "'{file_name}' is not a .{expected_extension} talk-history export"
            ),
            Self::Read { file_name, source } => {
                write!(f, "cannot read '{file_name}': {source}")
            }
            Self::Decode { file_name, source } => {
                write!(f, "'{file_name}' is not valid UTF-8 text: {source}")
            }
            Self::TooLarge {
                file_name,
                size,
                max_size,
            } => write!(
                f,
                "'{file_name}' is {size} bytes (maximum supported export is {max_size})"
            ),
            Self::NoMessages { file_name } => {
                write!(f, "no messages found in '{file_name}'")
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors produced while composing or rasterizing a document.
///
/// Non-fatal advisories: the editing session state is preserved and the
/// export can be retried.
#[derive(Debug)]
pub enum ExportError {
    /// The host rasterizer could not produce an image.
    Rasterization { reason: String },

    /// The resolved document could not be serialised.
    Json { source: serde_json::Error },

    /// Writing the serialised document to a sink failed.
    Io { source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rasterization { reason } => {
                write!(f, "image generation failed: {reason}")
            }
            Self::Json { source } => write!(f, "cannot serialise document: {source}"),
            Self::Io { source } => write!(f, "cannot write document: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rasterization { .. } => None,
            Self::Json { source } => Some(source),
            Self::Io { source } => Some(source),
        }
    }
}
