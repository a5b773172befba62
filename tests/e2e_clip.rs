// ChatCut - tests/e2e_clip.rs
//
// End-to-end tests for the clipping pipeline.
//
// These tests exercise the real filesystem, real profile loading, real
// parsing, and real document composition — no mocks, no stubs. This covers
// the full path from a raw talk-history export on disk to a resolved
// render document with redactions, renames and styling applied.

use chatcut::app::import::{import_export, import_export_path};
use chatcut::app::session::SelectStage;
use chatcut::core::compose::{write_document_json, RenderBlock};
use chatcut::core::model::{CharRange, MessageId, SpanKind};
use chatcut::core::profile::{load_builtin_profile, ExportProfile};
use chatcut::core::select;
use chatcut::platform::StringTextSource;
use chatcut::util::error::ImportError;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn profile() -> ExportProfile {
    load_builtin_profile().unwrap()
}

// =============================================================================
// Import E2E
// =============================================================================

/// Importing the fixture export yields the full structured conversation.
#[test]
fn e2e_imports_fixture_export() {
    let conv = import_export_path(&fixture("line_talk_sample.txt"), &profile()).unwrap();

    assert_eq!(conv.group_name, "大学同期");
    assert_eq!(conv.participants, vec!["たくや", "ゆうこ", "けんた"]);
    assert_eq!(conv.messages.len(), 15);

    // Order is the file line order, ids derive from it.
    for (i, msg) in conv.messages.iter().enumerate() {
        assert_eq!(msg.order, i);
        assert_eq!(msg.id, MessageId::from_order(i));
    }

    // The second date section resets the active date.
    assert_eq!(conv.messages[10].date, "2025/02/08(土)");
    assert_eq!(conv.messages[11].date, "2025/02/09(日)");
}

/// A nonexistent path surfaces as a read failure, not a panic.
#[test]
fn e2e_missing_file_is_a_read_failure() {
    let result = import_export_path(&fixture("does_not_exist.txt"), &profile());
    assert!(matches!(result, Err(ImportError::Read { .. })));
}

/// Non-UTF-8 bytes surface as a decode failure.
#[test]
fn e2e_binary_file_is_a_decode_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbled.txt");
    std::fs::write(&path, [0xC3, 0x28, 0xA0, 0xFF]).unwrap();

    let result = import_export_path(&path, &profile());
    assert!(matches!(result, Err(ImportError::Decode { .. })));
}

/// A text file in a foreign format parses to zero messages and is rejected
/// by emptiness, leaving retry possible.
#[test]
fn e2e_foreign_format_is_rejected_by_emptiness() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.txt");
    std::fs::write(&path, "2024-01-15 14:30:22 INFO something else\n").unwrap();

    let result = import_export_path(&path, &profile());
    assert!(matches!(result, Err(ImportError::NoMessages { .. })));
}

// =============================================================================
// Full pipeline E2E
// =============================================================================

/// Search, select in context, commit, redact, rename, restyle, compose.
#[test]
fn e2e_search_select_redact_compose() {
    let conv = import_export_path(&fixture("line_talk_sample.txt"), &profile()).unwrap();

    // Find the embarrassing line and inspect it in context.
    let hits = select::search(&conv, "愛してます");
    assert_eq!(hits.len(), 1);
    let hit = hits[0];
    let hit_id = hit.id.clone();
    let window = select::context_window(&conv, hit, 2);
    assert_eq!(window.len(), 5);
    assert!(window.iter().any(|m| m.id == hit_id));
    let window_ids: Vec<MessageId> = window.iter().map(|m| m.id.clone()).collect();

    // Select the window.
    let mut stage = SelectStage::new(conv).pick_self(Some("たくや"));
    for id in &window_ids {
        stage = stage.toggle(id);
    }
    assert_eq!(stage.selected_count(), 5);

    // Commit and edit: mask the confession, blur part of another line,
    // rename a participant, hide timestamps.
    let edit = stage.commit().unwrap();
    let second_id = edit.clip()[1].id.clone();
    let quiet_style = edit.style().clone().with_timestamps(false);
    let edit = edit
        .toggle_full_redaction(&hit_id)
        .set_partial_redaction(&second_id, vec![CharRange::new(0, 3)])
        .rename_participant("ゆうこ", "友人A")
        .set_title(Some("コンビニで愛の告白事件"))
        .restyle(quiet_style);

    let document = edit.compose();
    assert_eq!(document.title.as_deref(), Some("コンビニで愛の告白事件"));
    assert!(!document.show_timestamps);

    let bubbles: Vec<_> = document
        .blocks
        .iter()
        .filter_map(|b| match b {
            RenderBlock::Bubble(bubble) => Some(bubble),
            _ => None,
        })
        .collect();
    assert_eq!(bubbles.len(), 5);

    // The fully redacted bubble shows only mask glyphs, count preserved.
    let masked = bubbles
        .iter()
        .find(|b| b.message_id == hit_id)
        .expect("redacted bubble present");
    assert!(masked.masked);
    assert_eq!(masked.spans.len(), 1);
    assert_eq!(masked.spans[0].kind, SpanKind::Masked);
    let hit_codepoints = "「愛してます」って言っちゃった".chars().count();
    assert_eq!(masked.spans[0].text.chars().count(), hit_codepoints);

    // The partially redacted bubble alternates masked and plain spans.
    let partial = bubbles
        .iter()
        .find(|b| b.message_id == second_id)
        .expect("partially redacted bubble present");
    assert_eq!(partial.spans[0].kind, SpanKind::Masked);
    assert_eq!(partial.spans[0].text, "●●●");

    // The rename shows up in labels without touching message data.
    assert!(bubbles
        .iter()
        .any(|b| b.sender_label.as_deref() == Some("友人A")));

    // Self bubbles carry no label.
    assert!(bubbles
        .iter()
        .filter(|b| b.is_self)
        .all(|b| b.sender_label.is_none()));

    // The document serialises for the rasterizer boundary.
    let mut json = Vec::new();
    write_document_json(&document, &mut json).unwrap();
    let json = String::from_utf8(json).unwrap();
    assert!(json.contains("友人A"));
    assert!(!json.contains("愛してます"), "redacted text must not leak");
}

/// Selecting every message round-trips the conversation order exactly.
#[test]
fn e2e_full_selection_round_trips_order() {
    let conv = import_export_path(&fixture("line_talk_sample.txt"), &profile()).unwrap();

    let mut stage = SelectStage::new(conv);
    let ids: Vec<MessageId> = stage
        .conversation()
        .messages
        .iter()
        .map(|m| m.id.clone())
        .collect();
    for id in &ids {
        stage = stage.toggle(id);
    }

    let edit = stage.commit().unwrap();
    let clip_ids: Vec<MessageId> = edit.clip().iter().map(|m| m.id.clone()).collect();
    assert_eq!(clip_ids, ids);
}

/// Placeholder messages survive the pipeline as labels, untouched by
/// redaction.
#[test]
fn e2e_placeholder_kinds_render_as_labels() {
    let conv = import_export_path(&fixture("line_talk_sample.txt"), &profile()).unwrap();
    let sticker = conv
        .messages
        .iter()
        .find(|m| m.text == "[スタンプ]")
        .unwrap()
        .id
        .clone();

    let stage = SelectStage::new(conv).toggle(&sticker);
    let edit = stage.commit().unwrap().toggle_full_redaction(&sticker);
    let document = edit.compose();

    let RenderBlock::Bubble(bubble) = document
        .blocks
        .iter()
        .find(|b| matches!(b, RenderBlock::Bubble(_)))
        .unwrap()
    else {
        unreachable!()
    };
    assert_eq!(bubble.spans[0].kind, SpanKind::Placeholder);
    assert_eq!(bubble.spans[0].text, "🎫 スタンプ");
}

/// In-memory sources go through the same validation as files.
#[test]
fn e2e_string_source_import() {
    let raw = std::fs::read_to_string(fixture("line_talk_sample.txt")).unwrap();
    let conv = import_export(&StringTextSource(raw), "talk.txt", &profile()).unwrap();
    assert_eq!(conv.messages.len(), 15);
}
