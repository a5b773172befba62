// ChatCut - app/import.rs
//
// Import path: turn a user-picked file into a parsed conversation.
// Owns the caller-level checks the fail-soft parser deliberately does not
// perform: extension gating before any read, read/decode failures, and the
// "zero messages" emptiness check.

use crate::core::model::Conversation;
use crate::core::parser::parse_export;
use crate::core::profile::ExportProfile;
use crate::platform::fs::FileTextSource;
use crate::platform::{TextSource, TextSourceError};
use crate::util::constants::SUPPORTED_EXPORT_EXTENSION;
use crate::util::error::ImportError;
use std::path::Path;

/// Import an export through any text source.
///
/// `file_name` is the user-visible name used for extension validation and
/// error messages; it does not have to be a real path.
pub fn import_export(
    source: &dyn TextSource,
    file_name: &str,
    profile: &ExportProfile,
) -> Result<Conversation, ImportError> {
    let extension_ok = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SUPPORTED_EXPORT_EXTENSION));
    if !extension_ok {
        tracing::debug!(file = file_name, "Import rejected: unsupported extension");
        return Err(ImportError::UnsupportedFile {
            file_name: file_name.to_string(),
            expected_extension: SUPPORTED_EXPORT_EXTENSION,
        });
    }

    let raw = source.read_text().map_err(|e| match e {
        TextSourceError::Io { source } => ImportError::Read {
            file_name: file_name.to_string(),
            source,
        },
        TextSourceError::Decode { source } => ImportError::Decode {
            file_name: file_name.to_string(),
            source,
        },
        TextSourceError::TooLarge { size, max_size } => ImportError::TooLarge {
            file_name: file_name.to_string(),
            size,
            max_size,
        },
    })?;

    let conversation = parse_export(&raw, profile);
    if conversation.is_empty() {
        tracing::debug!(file = file_name, "Import produced no messages");
        return Err(ImportError::NoMessages {
            file_name: file_name.to_string(),
        });
    }

    tracing::info!(
        file = file_name,
        messages = conversation.messages.len(),
        participants = conversation.participants.len(),
        "Import complete"
    );
    Ok(conversation)
}

/// Import an export file from disk.
pub fn import_export_path(
    path: &Path,
    profile: &ExportProfile,
) -> Result<Conversation, ImportError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    import_export(&FileTextSource::new(path), &file_name, profile)
}

// =============================================================================
// Demo data
// =============================================================================

/// Embedded demo talk history for trying the flow without a real export.
const DEMO_EXPORT: &str = "[LINE] 大学同期のトーク履歴
保存日時：2025/02/10 18:30

2025/02/08(土)
14:23\tたくや\tなあ聞いてくれ
14:23\tたくや\tさっきコンビニ行ったんだけど
14:24\tゆうこ\tうん
14:24\tたくや\tレジで「温めますか？」って聞かれて
14:25\tたくや\t「愛してます」って言っちゃった
14:25\tゆうこ\tえ
14:25\tけんた\tは？？？
14:26\tゆうこ\t[スタンプ]
14:26\tたくや\t自分でもわからない
14:27\tけんた\t店員さんかわいそう
14:29\tたくや\tもう引っ越す

2025/02/09(日)
10:15\tゆうこ\tたくやまだコンビニ行けてる？
10:20\tたくや\t行けてない
10:23\tけんた\tコンビニ愛の伝道師
10:24\tたくや\tその肩書きいらない
";

/// Parse the embedded demo history.
pub fn demo_conversation(profile: &ExportProfile) -> Conversation {
    parse_export(DEMO_EXPORT, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::load_builtin_profile;
    use crate::platform::StringTextSource;

    fn profile() -> ExportProfile {
        load_builtin_profile().unwrap()
    }

    #[test]
    fn rejects_non_txt_files_before_reading() {
        struct PanicSource;
        impl TextSource for PanicSource {
            fn read_text(&self) -> Result<String, TextSourceError> {
                panic!("read must not be attempted for a rejected extension");
            }
        }

        let err = import_export(&PanicSource, "talk.csv", &profile()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFile { .. }));

        let err = import_export(&PanicSource, "no-extension", &profile()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFile { .. }));
    }

    #[test]
    fn extension_check_ignores_case() {
        let source = StringTextSource("2025/02/08(土)\n14:23\tたくや\tやあ\n".to_string());
        assert!(import_export(&source, "TALK.TXT", &profile()).is_ok());
    }

    #[test]
    fn empty_parse_surfaces_as_no_messages() {
        let source = StringTextSource("nothing that parses\n".to_string());
        let err = import_export(&source, "talk.txt", &profile()).unwrap_err();
        assert!(matches!(err, ImportError::NoMessages { .. }));
    }

    #[test]
    fn demo_history_parses_with_both_dates() {
        let conv = demo_conversation(&profile());
        assert!(!conv.is_empty());
        assert_eq!(conv.group_name, "大学同期");
        assert_eq!(conv.participants, vec!["たくや", "ゆうこ", "けんた"]);
        assert_eq!(conv.messages.first().unwrap().date, "2025/02/08(土)");
        assert_eq!(conv.messages.last().unwrap().date, "2025/02/09(日)");
    }
}
