// ChatCut - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ChatCut";

/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Watermark line appended to every composed document.
pub const WATERMARK: &str = "Cut with Chat Cut ✂️";

// =============================================================================
// Import limits
// =============================================================================

/// The only file extension accepted for talk-history imports.
pub const SUPPORTED_EXPORT_EXTENSION: &str = "txt";

/// Maximum export file size in bytes. Exports beyond this are rejected
/// before parsing so a mis-picked file cannot exhaust memory.
pub const MAX_EXPORT_FILE_SIZE: u64 = 32 * 1024 * 1024; // 32 MB

// =============================================================================
// Profile limits
// =============================================================================

/// Maximum length of a regex pattern in a profile definition (ReDoS guard).
pub const MAX_REGEX_PATTERN_LENGTH: usize = 2_048;

// =============================================================================
// Selection
// =============================================================================

/// Default number of messages shown on each side of a search hit when the
/// user inspects it in context.
pub const DEFAULT_CONTEXT_RADIUS: usize = 8;

// =============================================================================
// Rendering
// =============================================================================

/// Glyph substituted for each redacted codepoint. One glyph per codepoint,
/// so a fully masked message keeps its original codepoint count.
pub const MASK_GLYPH: char = '●';

/// Maximum title length in codepoints for a composed document.
pub const MAX_TITLE_LEN: usize = 40;

/// Prefix for suggested export image file names.
pub const EXPORT_FILE_PREFIX: &str = "chatcut";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG nor the debug flag is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";
