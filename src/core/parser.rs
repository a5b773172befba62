// ChatCut - core/parser.rs
//
// Talk-history export parsing using export profiles.
// Core layer: accepts decoded text, never touches the filesystem.
//
// Fail-soft contract: malformed input produces a Conversation with zero
// messages rather than an error. The app layer decides whether emptiness
// is worth surfacing to the user.

use crate::core::model::{Conversation, Message, MessageId};
use crate::core::profile::ExportProfile;

/// Parse a decoded export into a conversation.
///
/// Lines are classified first-match-wins as group header, date header, or
/// message line; anything else (blank lines, "saved at" metadata) is
/// silently ignored and leaves parse state untouched.
///
/// Invariants upheld:
/// - `messages[i].order == i`, strictly increasing, assigned once.
/// - `id` is derived from `order`, so re-parsing the same export yields
///   identical identifiers.
/// - `date` is the most recent date header at or before the message's line
///   (empty string before the first header).
/// - `participants` preserves first-seen order.
pub fn parse_export(raw: &str, profile: &ExportProfile) -> Conversation {
    tracing::debug!(profile_id = %profile.id, bytes = raw.len(), "Parsing started");

    let normalized = raw.replace("\r\n", "\n");

    let mut messages: Vec<Message> = Vec::new();
    let mut participants: Vec<String> = Vec::new();
    let mut group_name = String::new();
    let mut current_date = String::new();
    let mut order: usize = 0;

    for line in normalized.split('\n') {
        // Group header: marker token, free text, optional trailing suffix.
        if let Some(rest) = line.strip_prefix(&profile.group_header) {
            let rest = rest.trim();
            if !rest.is_empty() {
                let name = rest.strip_suffix(&profile.group_suffix).unwrap_or(rest);
                group_name = name.to_string();
                continue;
            }
            // Marker with no text falls through; no other pattern will
            // claim it, so the line is dropped like any unmatched line.
        }

        // Date header: stored verbatim, weekday parenthetical included.
        if let Some(caps) = profile.date_pattern.captures(line) {
            if let Some(date) = caps.name("date") {
                current_date = date.as_str().to_string();
                continue;
            }
        }

        // Message line: H:MM or HH:MM, tab, name, tab, body. Only the
        // first two tabs are structural; the body keeps any further tabs.
        if let Some(caps) = profile.message_pattern.captures(line) {
            let (Some(hour), Some(minute), Some(name), Some(body)) = (
                caps.name("hour"),
                caps.name("minute"),
                caps.name("name"),
                caps.name("body"),
            ) else {
                continue;
            };

            let user_name = name.as_str().trim().to_string();
            if !participants.contains(&user_name) {
                participants.push(user_name.clone());
            }

            let body = body.as_str();
            messages.push(Message {
                id: MessageId::from_order(order),
                date: current_date.clone(),
                time: format!("{:0>2}:{:0>2}", hour.as_str(), minute.as_str()),
                user_name,
                text: body.to_string(),
                kind: profile.classify_body(body),
                order,
            });
            order += 1;
        }
    }

    if group_name.is_empty() {
        group_name = profile.fallback_group_name.clone();
    }

    tracing::debug!(
        profile_id = %profile.id,
        messages = messages.len(),
        participants = participants.len(),
        "Parsing complete"
    );

    Conversation {
        group_name,
        messages,
        participants,
    }
}
