// ChatCut - core/select.rs
//
// Selection engine: search, contextual windowing, and clip accumulation
// over an already-parsed conversation.
// Core layer: pure logic, no I/O, no hidden state beyond the arguments.

use crate::core::model::{Conversation, Message, MessageId, SelectionSet};

/// Case-insensitive substring search over message text and sender names.
///
/// An empty query yields an empty result, not "all messages" — selecting
/// everything is a deliberate act, never a default.
pub fn search<'a>(conversation: &'a Conversation, query: &str) -> Vec<&'a Message> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    conversation
        .messages
        .iter()
        .filter(|m| {
            m.text.to_lowercase().contains(&needle)
                || m.user_name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Up to `2 * radius + 1` messages centred on `center`, clipped at the
/// conversation's boundaries.
///
/// Used to let the user judge a search hit in its surrounding exchange
/// before selecting it.
pub fn context_window<'a>(
    conversation: &'a Conversation,
    center: &Message,
    radius: usize,
) -> &'a [Message] {
    let len = conversation.messages.len();
    if len == 0 {
        return &[];
    }

    let start = center.order.saturating_sub(radius);
    let end = (center.order.saturating_add(radius) + 1).min(len);
    if start >= len {
        return &[];
    }
    &conversation.messages[start..end]
}

/// Symmetric-difference update: add `id` if absent, remove it if present.
///
/// Pure value-in/value-out so the host can hold one immutable selection
/// snapshot per render and replace it wholesale on each interaction.
pub fn toggle(selection: &SelectionSet, id: &MessageId) -> SelectionSet {
    let mut next = selection.clone();
    if next.contains(id) {
        next.remove(id);
    } else {
        next.insert(id.clone());
    }
    next
}

/// Convert the selection back into a sequence: the conversation's messages
/// whose ids are selected, in conversation order, cloned by value.
///
/// This is the sole place selection order is imposed; the set itself never
/// carries one. The returned sequence is the clip that moves to editing.
pub fn materialize(conversation: &Conversation, selection: &SelectionSet) -> Vec<Message> {
    conversation
        .messages
        .iter()
        .filter(|m| selection.contains(&m.id))
        .cloned()
        .collect()
}
