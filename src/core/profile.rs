// ChatCut - core/profile.rs
//
// Export-format profile loading, validation, and compilation.
// Core layer: accepts TOML strings, never touches the filesystem.
//
// A profile describes one chat export dialect: the group-header marker, the
// date-header and message-line patterns, and the exact-match placeholder
// vocabulary for non-text messages. The LINE dialect ships built in; hosts
// may load additional profiles through the same validation path.

use crate::core::model::MessageKind;
use crate::util::constants;
use crate::util::error::ProfileError;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw TOML profile definition as deserialized from a .toml document.
/// This is validated and compiled into an `ExportProfile` for runtime use.
#[derive(Debug, Deserialize)]
pub struct ProfileDefinition {
    pub profile: ProfileMeta,
    pub markers: MarkersDef,
    pub parsing: ParsingDef,
    #[serde(default)]
    pub placeholders: PlaceholdersDef,
}

#[derive(Debug, Deserialize)]
pub struct ProfileMeta {
    pub id: String,
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

#[derive(Debug, Deserialize)]
pub struct MarkersDef {
    /// Token that opens the group-header line (e.g. "[LINE]").
    pub group_header: String,

    /// Trailing suffix stripped from the header's free text, if present.
    #[serde(default)]
    pub group_suffix: String,

    /// Group name used when the export has no header line.
    pub fallback_group_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ParsingDef {
    /// Pattern for a date-header line. Needs a `date` capture group.
    pub date_pattern: String,

    /// Pattern for a message line. Needs `hour`, `minute`, `name`, `body`
    /// capture groups; only the first two tabs are structural, so `body`
    /// must be able to contain further tabs.
    pub message_pattern: String,
}

/// Placeholder-body vocabulary, one list of exact-match tokens per kind.
#[derive(Debug, Deserialize, Default)]
pub struct PlaceholdersDef {
    #[serde(default)]
    pub sticker: Vec<String>,
    #[serde(default)]
    pub photo: Vec<String>,
    #[serde(default)]
    pub video: Vec<String>,
    #[serde(default)]
    pub file: Vec<String>,
    #[serde(default)]
    pub voice: Vec<String>,
}

// =============================================================================
// Runtime profile
// =============================================================================

/// Runtime representation of an export profile after TOML parsing and
/// regex compilation. This is what the parser uses.
#[derive(Debug, Clone)]
pub struct ExportProfile {
    /// Unique profile identifier (e.g. "line-talk").
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Profile schema version.
    pub version: String,

    /// Description of the export dialect this profile covers.
    pub description: String,

    /// Group-header marker token.
    pub group_header: String,

    /// Trailing suffix stripped from the group name (may be empty).
    pub group_suffix: String,

    /// Group name used when no header line was seen.
    pub fallback_group_name: String,

    /// Compiled date-header pattern with a `date` capture group.
    pub date_pattern: Regex,

    /// Compiled message-line pattern with `hour`, `minute`, `name`, `body`
    /// capture groups.
    pub message_pattern: Regex,

    /// Exact-match body token -> kind classification table.
    placeholders: HashMap<String, MessageKind>,

    /// Whether this is the built-in profile (true) or host-supplied (false).
    pub is_builtin: bool,
}

impl ExportProfile {
    /// Classify a message body against the placeholder vocabulary.
    ///
    /// Exact string match only; any body outside the vocabulary is `Text`.
    pub fn classify_body(&self, body: &str) -> MessageKind {
        self.placeholders
            .get(body)
            .copied()
            .unwrap_or(MessageKind::Text)
    }
}

// =============================================================================
// Profile validation and compilation
// =============================================================================

/// Parse a TOML string into a `ProfileDefinition`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_profile_toml(
    toml_content: &str,
    source_path: &PathBuf,
) -> Result<ProfileDefinition, ProfileError> {
    toml::from_str(toml_content).map_err(|e| ProfileError::TomlParse {
        path: source_path.clone(),
        source: e,
    })
}

/// Validate a `ProfileDefinition` and compile it into a runtime
/// `ExportProfile`.
///
/// Validates:
/// - Required fields are present and non-empty
/// - Regex patterns are valid and within size limits
/// - The capture groups the parser depends on exist
pub fn validate_and_compile(
    def: ProfileDefinition,
    is_builtin: bool,
) -> Result<ExportProfile, ProfileError> {
    let id = &def.profile.id;

    if id.is_empty() {
        return Err(ProfileError::MissingField {
            profile_id: "(empty)".to_string(),
            field: "profile.id",
        });
    }
    if def.profile.name.is_empty() {
        return Err(ProfileError::MissingField {
            profile_id: id.clone(),
            field: "profile.name",
        });
    }
    if def.markers.group_header.is_empty() {
        return Err(ProfileError::MissingField {
            profile_id: id.clone(),
            field: "markers.group_header",
        });
    }
    if def.markers.fallback_group_name.is_empty() {
        return Err(ProfileError::MissingField {
            profile_id: id.clone(),
            field: "markers.fallback_group_name",
        });
    }
    if def.parsing.date_pattern.is_empty() {
        return Err(ProfileError::MissingField {
            profile_id: id.clone(),
            field: "parsing.date_pattern",
        });
    }
    if def.parsing.message_pattern.is_empty() {
        return Err(ProfileError::MissingField {
            profile_id: id.clone(),
            field: "parsing.message_pattern",
        });
    }

    let date_pattern = compile_regex(id, "parsing.date_pattern", &def.parsing.date_pattern)?;
    require_group(id, "parsing.date_pattern", &date_pattern, "date")?;

    let message_pattern =
        compile_regex(id, "parsing.message_pattern", &def.parsing.message_pattern)?;
    for group in ["hour", "minute", "name", "body"] {
        require_group(id, "parsing.message_pattern", &message_pattern, group)?;
    }

    // Build the body classification table. Later entries never overwrite
    // earlier ones silently; duplicate tokens across kinds are a profile
    // bug surfaced in the logs.
    let mut placeholders = HashMap::new();
    let table = [
        (MessageKind::Sticker, &def.placeholders.sticker),
        (MessageKind::Photo, &def.placeholders.photo),
        (MessageKind::Video, &def.placeholders.video),
        (MessageKind::File, &def.placeholders.file),
        (MessageKind::Voice, &def.placeholders.voice),
    ];
    for (kind, tokens) in table {
        for token in tokens {
            if let Some(previous) = placeholders.insert(token.clone(), kind) {
                tracing::warn!(
                    profile_id = %id,
                    token = %token,
                    previous = ?previous,
                    now = ?kind,
                    "Duplicate placeholder token; later kind wins"
                );
            }
        }
    }

    Ok(ExportProfile {
        id: id.clone(),
        name: def.profile.name,
        version: def.profile.version,
        description: def.profile.description,
        group_header: def.markers.group_header,
        group_suffix: def.markers.group_suffix,
        fallback_group_name: def.markers.fallback_group_name,
        date_pattern,
        message_pattern,
        placeholders,
        is_builtin,
    })
}

/// Compile a regex pattern with length validation to prevent ReDoS.
fn compile_regex(
    profile_id: &str,
    field: &'static str,
    pattern: &str,
) -> Result<Regex, ProfileError> {
    if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
        return Err(ProfileError::RegexTooLong {
            profile_id: profile_id.to_string(),
            field,
            length: pattern.len(),
            max_length: constants::MAX_REGEX_PATTERN_LENGTH,
        });
    }

    Regex::new(pattern).map_err(|e| ProfileError::InvalidRegex {
        profile_id: profile_id.to_string(),
        field,
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Ensure a compiled pattern exposes a named capture group.
fn require_group(
    profile_id: &str,
    field: &'static str,
    pattern: &Regex,
    group: &'static str,
) -> Result<(), ProfileError> {
    let present = pattern.capture_names().flatten().any(|name| name == group);
    if present {
        Ok(())
    } else {
        Err(ProfileError::MissingCaptureGroup {
            profile_id: profile_id.to_string(),
            field,
            group,
        })
    }
}

// =============================================================================
// Built-in profile (embedded at compile time)
// =============================================================================

/// Embedded TOML content for the built-in LINE export profile.
pub fn builtin_profile_source() -> &'static str {
    include_str!("../../profiles/line_talk.toml")
}

/// Load and validate the built-in LINE export profile.
///
/// Failures here are build-time bugs in the embedded document; they are
/// surfaced as a normal `ProfileError` so the host can degrade gracefully.
pub fn load_builtin_profile() -> Result<ExportProfile, ProfileError> {
    let path = PathBuf::from("<builtin>/line_talk.toml");
    let def = parse_profile_toml(builtin_profile_source(), &path)?;
    let profile = validate_and_compile(def, true)?;
    tracing::debug!(profile_id = %profile.id, "Loaded built-in profile");
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profile_compiles() {
        let profile = load_builtin_profile().unwrap();
        assert_eq!(profile.id, "line-talk");
        assert!(profile.is_builtin);
        assert_eq!(profile.group_header, "[LINE]");
        assert_eq!(profile.fallback_group_name, "トーク");
    }

    #[test]
    fn builtin_vocabulary_classifies_all_kinds() {
        let profile = load_builtin_profile().unwrap();
        assert_eq!(profile.classify_body("[スタンプ]"), MessageKind::Sticker);
        assert_eq!(profile.classify_body("[写真]"), MessageKind::Photo);
        assert_eq!(profile.classify_body("[動画]"), MessageKind::Video);
        assert_eq!(profile.classify_body("[ファイル]"), MessageKind::File);
        assert_eq!(
            profile.classify_body("[ボイスメッセージ]"),
            MessageKind::Voice
        );
        // Anything else, including near-misses, is text.
        assert_eq!(profile.classify_body("[スタンプ] "), MessageKind::Text);
        assert_eq!(profile.classify_body("こんにちは"), MessageKind::Text);
    }

    #[test]
    fn missing_capture_group_is_rejected() {
        let toml = r#"
            [profile]
            id = "broken"
            name = "Broken"

            [markers]
            group_header = "[X]"
            fallback_group_name = "chat"

            [parsing]
            date_pattern = '^\d{4}$'
            message_pattern = '^(?P<hour>\d+):(?P<minute>\d+)\t(?P<name>[^\t]+)\t(?P<body>.*)$'
        "#;
        let def = parse_profile_toml(toml, &PathBuf::from("test.toml")).unwrap();
        let err = validate_and_compile(def, false).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::MissingCaptureGroup { group: "date", .. }
        ));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let toml = r#"
            [profile]
            id = "broken"
            name = "Broken"

            [markers]
            group_header = "[X]"
            fallback_group_name = "chat"

            [parsing]
            date_pattern = '^(?P<date>[invalid$'
            message_pattern = '^(?P<hour>\d+):(?P<minute>\d+)\t(?P<name>[^\t]+)\t(?P<body>.*)$'
        "#;
        let def = parse_profile_toml(toml, &PathBuf::from("test.toml")).unwrap();
        let err = validate_and_compile(def, false).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidRegex { .. }));
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let toml = r#"
            [profile]
            id = ""
            name = "X"

            [markers]
            group_header = "[X]"
            fallback_group_name = "chat"

            [parsing]
            date_pattern = '^(?P<date>.+)$'
            message_pattern = '^(?P<hour>\d+):(?P<minute>\d+)\t(?P<name>[^\t]+)\t(?P<body>.*)$'
        "#;
        let def = parse_profile_toml(toml, &PathBuf::from("test.toml")).unwrap();
        let err = validate_and_compile(def, false).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::MissingField {
                field: "profile.id",
                ..
            }
        ));
    }
}
