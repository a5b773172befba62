// ChatCut - core/redact.rs
//
// Redaction and edit model: per-message overlay mutations for one editing
// session over one clip.
// Core layer: pure map-in/map-out transitions; the caller holds one
// immutable overlay snapshot and replaces it wholesale on each action.
//
// Invariant owned here (never left to callers): full and partial redaction
// are mutually exclusive — activating one clears the other, and there is no
// direct fully<->partial transition that skips the clearing step.

use crate::core::model::{CharRange, EditOverlay, MediaRef, MessageId, OverlayMap, RedactionStatus};

/// Apply `mutate` to the overlay for `id`, creating the entry on demand and
/// dropping it again when every field returns to its no-change value.
fn update(
    overlays: &OverlayMap,
    id: &MessageId,
    mutate: impl FnOnce(&mut EditOverlay),
) -> OverlayMap {
    let mut next = overlays.clone();
    let mut overlay = next.get(id).cloned().unwrap_or_default();
    mutate(&mut overlay);
    if overlay.is_inactive() {
        next.remove(id);
    } else {
        next.insert(id.clone(), overlay);
    }
    next
}

/// Toggle full redaction for `id`.
///
/// On transition to active, any partial ranges for the message are cleared.
pub fn set_full_redaction(overlays: &OverlayMap, id: &MessageId) -> OverlayMap {
    update(overlays, id, |overlay| {
        overlay.full_redaction = !overlay.full_redaction;
        if overlay.full_redaction {
            overlay.partial_redaction.clear();
        }
    })
}

/// Replace the partial-redaction ranges for `id`.
///
/// A non-empty set clears full redaction; an empty set removes partial
/// redaction entirely (equivalent to "no redaction"). Ranges are stored as
/// given — sorting and overlap handling happen at render time.
pub fn set_partial_redaction(
    overlays: &OverlayMap,
    id: &MessageId,
    ranges: Vec<CharRange>,
) -> OverlayMap {
    update(overlays, id, |overlay| {
        if ranges.is_empty() {
            overlay.partial_redaction.clear();
        } else {
            overlay.partial_redaction = ranges;
            overlay.full_redaction = false;
        }
    })
}

/// Remove both kinds of redaction for `id`, leaving any substitution or
/// media attachment in place.
pub fn clear_redaction(overlays: &OverlayMap, id: &MessageId) -> OverlayMap {
    update(overlays, id, |overlay| {
        overlay.full_redaction = false;
        overlay.partial_redaction.clear();
    })
}

/// Store a text substitution for `id`.
///
/// Writing the original text back removes the stored substitution so the
/// map never accumulates no-op overlays.
pub fn set_text(
    overlays: &OverlayMap,
    id: &MessageId,
    new_text: &str,
    original_text: &str,
) -> OverlayMap {
    update(overlays, id, |overlay| {
        if new_text == original_text {
            overlay.substitute_text = None;
        } else {
            overlay.substitute_text = Some(new_text.to_string());
        }
    })
}

/// Attach (or replace) the opaque media reference for `id`.
pub fn attach_media(overlays: &OverlayMap, id: &MessageId, media: MediaRef) -> OverlayMap {
    update(overlays, id, |overlay| {
        overlay.media = Some(media);
    })
}

/// Remove the media attachment for `id`.
pub fn remove_media(overlays: &OverlayMap, id: &MessageId) -> OverlayMap {
    update(overlays, id, |overlay| {
        overlay.media = None;
    })
}

/// Current redaction state of `id`, derived from its overlay.
pub fn redaction_status(overlays: &OverlayMap, id: &MessageId) -> RedactionStatus {
    match overlays.get(id) {
        Some(overlay) if overlay.full_redaction => RedactionStatus::FullyMasked,
        Some(overlay) if !overlay.partial_redaction.is_empty() => {
            RedactionStatus::PartiallyMasked
        }
        _ => RedactionStatus::Clear,
    }
}
