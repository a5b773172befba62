// ChatCut - app/session.rs
//
// Editing-session state: one immutable value per stage, replaced wholesale
// by every user action. Transition methods consume the old snapshot and
// return the new one, so the host never mutates shared structures and
// cannot observe a half-applied edit.
//
// Stage flow: SelectStage (whole conversation, accumulate a selection)
// -> EditStage (the committed clip by value, overlays, names, style)
// -> compose() for preview/export. After commit the conversation itself is
// no longer consulted for clip contents; only its participant list is
// carried for stable colour lookups.

use crate::core::compose::{compose_document, RenderDocument};
use crate::core::model::{
    CharRange, Conversation, DisplayNameMap, MediaRef, Message, MessageId, OverlayMap,
    RedactionStatus, SelectionSet,
};
use crate::core::style::StyleConfig;
use crate::core::{redact, select};
use crate::util::constants::DEFAULT_CONTEXT_RADIUS;

// =============================================================================
// Selection stage
// =============================================================================

/// Stage 1: the parsed conversation plus the user's selection-in-progress.
#[derive(Debug, Clone)]
pub struct SelectStage {
    conversation: Conversation,
    selection: SelectionSet,
    self_name: Option<String>,
}

impl SelectStage {
    /// Start selecting over a freshly imported conversation.
    pub fn new(conversation: Conversation) -> Self {
        Self {
            conversation,
            selection: SelectionSet::new(),
            self_name: None,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn self_name(&self) -> Option<&str> {
        self.self_name.as_deref()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Record which participant is "me" (skippable; unknown names clear the
    /// pick rather than storing a dangling one).
    pub fn pick_self(mut self, name: Option<&str>) -> Self {
        self.self_name = name
            .filter(|n| self.conversation.participants.iter().any(|p| p == n))
            .map(str::to_string);
        self
    }

    /// Toggle one message in or out of the selection.
    pub fn toggle(mut self, id: &MessageId) -> Self {
        self.selection = select::toggle(&self.selection, id);
        self
    }

    /// The surrounding exchange for a search hit, at the default radius.
    pub fn context_for(&self, id: &MessageId) -> &[Message] {
        match self.conversation.message(id) {
            Some(center) => {
                select::context_window(&self.conversation, center, DEFAULT_CONTEXT_RADIUS)
            }
            None => &[],
        }
    }

    /// Drop the whole selection.
    pub fn clear_selection(mut self) -> Self {
        self.selection = SelectionSet::new();
        self
    }

    /// Commit the selection as the clip and move to editing.
    ///
    /// Returns `None` when nothing is selected; the stage stays usable.
    pub fn commit(&self) -> Option<EditStage> {
        if self.selection.is_empty() {
            return None;
        }

        let clip = select::materialize(&self.conversation, &self.selection);
        tracing::debug!(clip = clip.len(), "Selection committed");
        Some(EditStage {
            group_name: self.conversation.group_name.clone(),
            participants: self.conversation.participants.clone(),
            style: StyleConfig::for_clip(&self.conversation.participants, self.self_name()),
            clip,
            overlays: OverlayMap::new(),
            name_map: DisplayNameMap::new(),
            self_name: self.self_name.clone(),
            title: None,
        })
    }
}

// =============================================================================
// Editing stage
// =============================================================================

/// Stage 2: the clip (by value) plus every edit the user layers on top.
#[derive(Debug, Clone)]
pub struct EditStage {
    group_name: String,
    participants: Vec<String>,
    clip: Vec<Message>,
    overlays: OverlayMap,
    name_map: DisplayNameMap,
    style: StyleConfig,
    self_name: Option<String>,
    title: Option<String>,
}

impl EditStage {
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn clip(&self) -> &[Message] {
        &self.clip
    }

    pub fn overlays(&self) -> &OverlayMap {
        &self.overlays
    }

    pub fn name_map(&self) -> &DisplayNameMap {
        &self.name_map
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn self_name(&self) -> Option<&str> {
        self.self_name.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn in_clip(&self, id: &MessageId) -> bool {
        self.clip.iter().any(|m| &m.id == id)
    }

    // -------------------------------------------------------------------------
    // Redaction and text edits (overlays exist only for clip messages)
    // -------------------------------------------------------------------------

    /// Toggle full redaction for a clip message.
    pub fn toggle_full_redaction(mut self, id: &MessageId) -> Self {
        if self.in_clip(id) {
            self.overlays = redact::set_full_redaction(&self.overlays, id);
        }
        self
    }

    /// Replace the partial-redaction ranges for a clip message.
    pub fn set_partial_redaction(mut self, id: &MessageId, ranges: Vec<CharRange>) -> Self {
        if self.in_clip(id) {
            self.overlays = redact::set_partial_redaction(&self.overlays, id, ranges);
        }
        self
    }

    /// Remove any redaction from a clip message.
    pub fn clear_redaction(mut self, id: &MessageId) -> Self {
        self.overlays = redact::clear_redaction(&self.overlays, id);
        self
    }

    /// Store a substitution for a clip message's text. Writing the original
    /// text back clears the substitution.
    pub fn edit_text(mut self, id: &MessageId, new_text: &str) -> Self {
        if let Some(original) = self.clip.iter().find(|m| &m.id == id) {
            self.overlays = redact::set_text(&self.overlays, id, new_text, &original.text);
        }
        self
    }

    /// Attach or replace the media reference on a clip message.
    pub fn attach_media(mut self, id: &MessageId, media: MediaRef) -> Self {
        if self.in_clip(id) {
            self.overlays = redact::attach_media(&self.overlays, id, media);
        }
        self
    }

    /// Remove the media reference from a clip message.
    pub fn remove_media(mut self, id: &MessageId) -> Self {
        self.overlays = redact::remove_media(&self.overlays, id);
        self
    }

    /// Redaction state of one clip message.
    pub fn message_status(&self, id: &MessageId) -> RedactionStatus {
        redact::redaction_status(&self.overlays, id)
    }

    // -------------------------------------------------------------------------
    // Names, style, title
    // -------------------------------------------------------------------------

    /// Remap a participant's display name. Empty or identical input resets.
    pub fn rename_participant(mut self, original: &str, display: &str) -> Self {
        self.name_map.set(original, display);
        self
    }

    /// Switch which participant is "me". Bubble colours are left as chosen.
    pub fn switch_self(mut self, name: Option<&str>) -> Self {
        self.self_name = name
            .filter(|n| self.participants.iter().any(|p| p == n))
            .map(str::to_string);
        self
    }

    /// Replace the style configuration wholesale.
    pub fn restyle(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Set or clear the document title.
    pub fn set_title(mut self, title: Option<&str>) -> Self {
        self.title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    // -------------------------------------------------------------------------
    // Status badges and composition
    // -------------------------------------------------------------------------

    /// Number of clip messages with any redaction active.
    pub fn redacted_count(&self) -> usize {
        self.overlays.values().filter(|o| o.has_redaction()).count()
    }

    /// Number of clip messages with a text substitution.
    pub fn edited_count(&self) -> usize {
        self.overlays
            .values()
            .filter(|o| o.substitute_text.is_some())
            .count()
    }

    /// Number of clip messages with attached media.
    pub fn media_count(&self) -> usize {
        self.overlays.values().filter(|o| o.media.is_some()).count()
    }

    /// Resolve the current state into the document the rasterizer consumes.
    pub fn compose(&self) -> RenderDocument {
        compose_document(
            &self.clip,
            &self.participants,
            &self.overlays,
            &self.name_map,
            &self.style,
            self.title(),
            self.self_name(),
        )
    }
}
