// ChatCut - core/compose.rs
//
// Document composition: resolve a clip plus all of its edit state into the
// fully styled view the rasterization boundary consumes.
// Core layer: writes to any Write trait object, never opens files itself.
//
// The composed document is self-contained — every span, colour, label and
// flag is resolved here so the host can draw it without consulting any
// overlay or style state.

use crate::core::model::{DisplayNameMap, MediaRef, Message, MessageId, OverlayMap, RenderedSpan};
use crate::core::render::render_text;
use crate::core::style::{name_color, StyleConfig};
use crate::util::constants::{EXPORT_FILE_PREFIX, MAX_TITLE_LEN, WATERMARK};
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// One element of the composed view, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderBlock {
    /// Centred date chip, emitted whenever the date changes.
    DateSeparator { date: String },

    /// One message bubble.
    Bubble(BubbleBlock),
}

/// A fully resolved message bubble.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleBlock {
    pub message_id: MessageId,

    /// Presentation name shown above the bubble — only on the first bubble
    /// of a same-sender run, and never for the self participant.
    pub sender_label: Option<String>,

    /// Name-label colour (present whenever `sender_label` is).
    pub name_color: Option<String>,

    /// Whether the bubble sits on the self side.
    pub is_self: bool,

    /// Zero-padded wall-clock time.
    pub time: String,

    /// Resolved bubble fill colour.
    pub bubble_color: String,

    /// True when any redaction is active on this message, so the host can
    /// tint the bubble.
    pub masked: bool,

    /// Resolved body spans (placeholder, masked, plain).
    pub spans: Vec<RenderedSpan>,

    /// Attached still image, if any.
    pub media: Option<MediaRef>,
}

/// The fully resolved, styled view handed to the rasterizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderDocument {
    /// Optional user title, truncated to the title length cap.
    pub title: Option<String>,

    /// Background theme the whole view is drawn on.
    pub background: crate::core::style::BackgroundPreset,

    /// Whether bubble timestamps are drawn.
    pub show_timestamps: bool,

    /// Footer watermark line.
    pub watermark: String,

    pub blocks: Vec<RenderBlock>,
}

/// Compose the resolved document for a clip.
///
/// `participants` is the full conversation participant list (colour lookups
/// stay stable even when a participant has no message in the clip), and
/// `self_name` places that sender's bubbles on the self side without a name
/// label.
pub fn compose_document(
    clip: &[Message],
    participants: &[String],
    overlays: &OverlayMap,
    name_map: &DisplayNameMap,
    style: &StyleConfig,
    title: Option<&str>,
    self_name: Option<&str>,
) -> RenderDocument {
    let mut blocks = Vec::with_capacity(clip.len() + 4);
    let mut last_date = "";
    let mut last_user = "";

    for message in clip {
        let new_date = message.date != last_date;
        if new_date && !message.date.is_empty() {
            blocks.push(RenderBlock::DateSeparator {
                date: message.date.clone(),
            });
        }
        let new_run = new_date || message.user_name != last_user;
        last_date = message.date.as_str();
        last_user = message.user_name.as_str();

        let is_self = Some(message.user_name.as_str()) == self_name;
        let overlay = overlays.get(&message.id);

        let (sender_label, label_color) = if new_run && !is_self {
            (
                Some(name_map.display(&message.user_name).to_string()),
                Some(name_color(&message.user_name, participants).to_string()),
            )
        } else {
            (None, None)
        };

        blocks.push(RenderBlock::Bubble(BubbleBlock {
            message_id: message.id.clone(),
            sender_label,
            name_color: label_color,
            is_self,
            time: message.time.clone(),
            bubble_color: style
                .bubble_color(&message.user_name, participants)
                .to_string(),
            masked: overlay.is_some_and(|o| o.has_redaction()),
            spans: render_text(message, overlay, None),
            media: overlay.and_then(|o| o.media.clone()),
        }));
    }

    let document = RenderDocument {
        title: title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| t.chars().take(MAX_TITLE_LEN).collect()),
        background: style.background,
        show_timestamps: style.show_timestamps,
        watermark: WATERMARK.to_string(),
        blocks,
    };

    tracing::debug!(
        blocks = document.blocks.len(),
        titled = document.title.is_some(),
        "Document composed"
    );
    document
}

/// Serialise a composed document as pretty JSON to any writer.
///
/// This is the wire form a browser-canvas host consumes.
pub fn write_document_json<W: Write>(
    document: &RenderDocument,
    writer: W,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, document).map_err(|e| ExportError::Json { source: e })
}

/// Suggested file name for the exported image.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.png", now.format("%Y%m%d-%H%M%S"))
}
