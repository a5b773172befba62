// ChatCut - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers. A Conversation
// is immutable once parsed; everything the user changes afterwards lives in
// separate overlay values keyed by message id.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

// =============================================================================
// Message identity
// =============================================================================

/// Stable opaque identifier for a message within one parsed conversation.
///
/// Derived deterministically from the parse-time order counter, so
/// re-parsing the same export yields the same identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Build the id for the message emitted at `order`.
    pub fn from_order(order: usize) -> Self {
        Self(format!("m{order}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// Message kind
// =============================================================================

/// Closed set of message content kinds.
///
/// Non-text kinds are produced by exact-match classification of placeholder
/// bodies (the vocabulary lives in the export profile) and render as a fixed
/// label instead of their body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Sticker,
    Photo,
    Video,
    File,
    Voice,
}

impl MessageKind {
    /// True for plain text messages (the only kind redaction applies to).
    pub fn is_text(&self) -> bool {
        matches!(self, MessageKind::Text)
    }

    /// Fixed display label for non-text kinds; `None` for text.
    pub fn placeholder_label(&self) -> Option<&'static str> {
        match self {
            MessageKind::Text => None,
            MessageKind::Sticker => Some("🎫 スタンプ"),
            MessageKind::Photo => Some("📷 写真"),
            MessageKind::Video => Some("🎬 動画"),
            MessageKind::File => Some("📎 ファイル"),
            MessageKind::Voice => Some("🎤 ボイス"),
        }
    }
}

// =============================================================================
// Message and Conversation (immutable parse output)
// =============================================================================

/// A single parsed chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Stable identifier, unique within the conversation.
    pub id: MessageId,

    /// Date header active at this message's line, verbatim including the
    /// weekday parenthetical (e.g. "2025/02/08(土)"). Empty if the message
    /// appeared before any date header.
    pub date: String,

    /// Zero-padded wall-clock time, "HH:MM".
    pub time: String,

    /// Sender display name as it appears in the export, trimmed.
    pub user_name: String,

    /// Message body. For non-text kinds this is the raw placeholder token.
    pub text: String,

    /// Content kind classified from the body.
    pub kind: MessageKind,

    /// Position in file line order; strictly increasing, assigned at parse
    /// time, never reused.
    pub order: usize,
}

/// A parsed talk history. Immutable once produced by the parser.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    /// Group or room name from the export header (fallback label if the
    /// export had no header line).
    pub group_name: String,

    /// All messages in file line order. `messages[i].order == i`.
    pub messages: Vec<Message>,

    /// Every distinct sender name, in first-seen order.
    pub participants: Vec<String>,
}

impl Conversation {
    /// True when parsing produced no messages (the fail-soft signal the
    /// import layer turns into an error).
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Look up a message by id.
    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The set of message ids the user has marked for the clip.
///
/// Order-irrelevant storage; `select::materialize` is the sole place
/// conversation order is imposed when the set becomes a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet(HashSet<MessageId>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageId> {
        self.0.iter()
    }

    pub(crate) fn insert(&mut self, id: MessageId) {
        self.0.insert(id);
    }

    pub(crate) fn remove(&mut self, id: &MessageId) {
        self.0.remove(id);
    }
}

impl FromIterator<MessageId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = MessageId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// Edit overlays
// =============================================================================

/// Half-open codepoint range over a message's effective text.
///
/// Offsets address the Unicode-codepoint sequence, not bytes. Ranges need
/// not be sorted or disjoint at write time; rendering normalises them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharRange {
    pub start: usize,
    pub end: usize,
}

impl CharRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A range that selects nothing (treated as a no-op by rendering).
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }
}

/// Opaque reference to a host-managed still image attached to a message.
///
/// The core stores and round-trips this token; only the host interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Per-message edit annotations, independent of the message's original
/// content. Sparse: a message with no overlay entry is unchanged.
///
/// Invariant (enforced by `core::redact`, never left to callers):
/// `full_redaction` and a non-empty `partial_redaction` are never active
/// at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditOverlay {
    /// Mask the entire text, preserving codepoint count.
    pub full_redaction: bool,

    /// Codepoint ranges to mask. Applied to the substituted text when a
    /// substitution is also present.
    pub partial_redaction: Vec<CharRange>,

    /// Replacement body text; `None` means the original text is shown.
    pub substitute_text: Option<String>,

    /// Attached still image, if any.
    pub media: Option<MediaRef>,
}

impl EditOverlay {
    /// True when every field is at its no-change value; such overlays are
    /// dropped from the map to keep it sparse.
    pub fn is_inactive(&self) -> bool {
        !self.full_redaction
            && self.partial_redaction.is_empty()
            && self.substitute_text.is_none()
            && self.media.is_none()
    }

    /// True when any masking (full or partial) is active.
    pub fn has_redaction(&self) -> bool {
        self.full_redaction || !self.partial_redaction.is_empty()
    }
}

/// All overlays for one editing session, keyed by clip message id.
pub type OverlayMap = HashMap<MessageId, EditOverlay>;

/// Redaction state of a single message, derived from its overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedactionStatus {
    Clear,
    FullyMasked,
    PartiallyMasked,
}

// =============================================================================
// Display-name remapping
// =============================================================================

/// Output-time mapping from original sender names to presentation names.
///
/// Defaults to identity for every participant; resetting a name removes the
/// entry rather than storing an explicit identity mapping, so the map stays
/// minimal. Never alters `Message::user_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayNameMap(std::collections::BTreeMap<String, String>);

impl DisplayNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presentation name for `user_name`; the name itself if unmapped.
    pub fn display<'a>(&'a self, user_name: &'a str) -> &'a str {
        self.0.get(user_name).map(String::as_str).unwrap_or(user_name)
    }

    /// Store a remapping. An empty or identical `display` resets the entry.
    pub fn set(&mut self, user_name: &str, display: &str) {
        let display = display.trim();
        if display.is_empty() || display == user_name {
            self.0.remove(user_name);
        } else {
            self.0.insert(user_name.to_string(), display.to_string());
        }
    }

    /// True when `user_name` has a non-identity mapping.
    pub fn is_remapped(&self, user_name: &str) -> bool {
        self.0.contains_key(user_name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Rendered spans (display construction output)
// =============================================================================

/// Visual role of a rendered span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Text shown as-is.
    Plain,

    /// Masked text: one mask glyph per hidden codepoint.
    Masked,

    /// Search-hit emphasis. Mutually exclusive with masking (redaction wins).
    Highlight,

    /// Fixed label standing in for a non-text message.
    Placeholder,
}

/// One run of equally styled text in a rendered message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSpan {
    pub kind: SpanKind,
    pub text: String,
}

impl RenderedSpan {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_is_deterministic_over_order() {
        assert_eq!(MessageId::from_order(0), MessageId::from_order(0));
        assert_eq!(MessageId::from_order(42).as_str(), "m42");
        assert_ne!(MessageId::from_order(1), MessageId::from_order(2));
    }

    #[test]
    fn placeholder_labels_cover_all_non_text_kinds() {
        assert!(MessageKind::Text.placeholder_label().is_none());
        for kind in [
            MessageKind::Sticker,
            MessageKind::Photo,
            MessageKind::Video,
            MessageKind::File,
            MessageKind::Voice,
        ] {
            assert!(kind.placeholder_label().is_some(), "{kind:?}");
        }
    }

    #[test]
    fn display_name_map_defaults_to_identity() {
        let map = DisplayNameMap::new();
        assert_eq!(map.display("Alice"), "Alice");
    }

    #[test]
    fn display_name_map_reset_removes_entry() {
        let mut map = DisplayNameMap::new();
        map.set("たくや", "T");
        assert_eq!(map.display("たくや"), "T");
        assert!(map.is_remapped("たくや"));

        // Identity write drops the entry instead of storing it.
        map.set("たくや", "たくや");
        assert!(!map.is_remapped("たくや"));
        assert!(map.is_empty());

        // Empty input behaves like a reset too.
        map.set("ゆうこ", "Y");
        map.set("ゆうこ", "  ");
        assert!(map.is_empty());
    }

    #[test]
    fn inactive_overlay_detection() {
        let mut overlay = EditOverlay::default();
        assert!(overlay.is_inactive());

        overlay.substitute_text = Some("x".into());
        assert!(!overlay.is_inactive());
        assert!(!overlay.has_redaction());

        overlay.substitute_text = None;
        overlay.partial_redaction.push(CharRange::new(0, 1));
        assert!(overlay.has_redaction());
    }
}
