use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// Exported chats mark each message with a bracketed header line:
//   [김매니저] [오후 2:31] 2024.06.10
//   [박작가] [오전 9:02] 네 확인했습니다
// Continuation lines (no header) belong to the message being accumulated.
static RE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]\s*\[([^\]]+)\]\s*(.*)$").unwrap());

/// One speaker-attributed message from the export.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// All lines joined with newlines.
    pub content: String,
    /// Timestamp text as written in the header; kept opaque.
    pub time: String,
    pub lines: Vec<String>,
}

/// Per-speaker message streams for one chat export.
#[derive(Debug, Default)]
pub struct SpeakerMessages {
    /// Distinct speakers in first-seen order.
    pub speakers: Vec<String>,
    pub messages: HashMap<String, Vec<ChatMessage>>,
}

/// Split a raw chat export into per-speaker, per-message streams.
///
/// Linear single-pass state machine: either no message is active, or lines
/// are accumulating for the current speaker. The only transition trigger is
/// a header-line match; the final message is flushed at end of input.
pub fn extract_speaker_messages(chat_text: &str) -> SpeakerMessages {
    let mut result = SpeakerMessages::default();

    let mut current_speaker: Option<String> = None;
    let mut current_time = String::new();
    let mut current_lines: Vec<String> = Vec::new();

    let flush = |speaker: &Option<String>, time: &str, lines: &mut Vec<String>, out: &mut SpeakerMessages| {
        if let Some(speaker) = speaker {
            if !lines.is_empty() {
                out.messages
                    .entry(speaker.clone())
                    .or_default()
                    .push(ChatMessage {
                        content: lines.join("\n"),
                        time: time.to_string(),
                        lines: std::mem::take(lines),
                    });
            }
        }
    };

    for line in chat_text.lines() {
        if let Some(caps) = RE_HEADER.captures(line) {
            flush(&current_speaker, &current_time, &mut current_lines, &mut result);

            let speaker = caps[1].to_string();
            let content = &caps[3];
            if !result.speakers.contains(&speaker) {
                result.speakers.push(speaker.clone());
            }
            current_time = caps[2].to_string();
            current_lines = if content.trim().is_empty() {
                Vec::new()
            } else {
                vec![content.to_string()]
            };
            current_speaker = Some(speaker);
        } else if !line.trim().is_empty() && current_speaker.is_some() {
            current_lines.push(line.to_string());
        }
    }

    flush(&current_speaker, &current_time, &mut current_lines, &mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_speakers() {
        let chat = "[매니저] [오후 2:10] 2024.06.10\n라움\n[작가] [오후 2:12] 네 확인했습니다\n";
        let seg = extract_speaker_messages(chat);

        assert_eq!(seg.speakers, vec!["매니저", "작가"]);
        let manager = &seg.messages["매니저"];
        assert_eq!(manager.len(), 1);
        assert_eq!(manager[0].content, "2024.06.10\n라움");
        assert_eq!(manager[0].time, "오후 2:10");
        let other = &seg.messages["작가"];
        assert_eq!(other[0].content, "네 확인했습니다");
    }

    #[test]
    fn test_consecutive_messages_same_speaker() {
        let chat = "[매니저] [오후 1:00] 첫번째 공지\n[매니저] [오후 1:05] 두번째 공지";
        let seg = extract_speaker_messages(chat);

        assert_eq!(seg.speakers, vec!["매니저"]);
        assert_eq!(seg.messages["매니저"].len(), 2);
        assert_eq!(seg.messages["매니저"][1].time, "오후 1:05");
    }

    #[test]
    fn test_empty_header_then_continuation() {
        // Header with no trailing content starts an empty accumulation.
        let chat = "[매니저] [오후 1:00]\n2024.06.10\n라움";
        let seg = extract_speaker_messages(chat);

        assert_eq!(seg.messages["매니저"][0].lines, vec!["2024.06.10", "라움"]);
    }

    #[test]
    fn test_no_headers() {
        let seg = extract_speaker_messages("그냥 텍스트\n헤더 없음");
        assert!(seg.speakers.is_empty());
        assert!(seg.messages.is_empty());
    }

    #[test]
    fn test_header_only_message_is_not_flushed() {
        let chat = "[매니저] [오후 1:00]\n[매니저] [오후 1:01] 실제 내용";
        let seg = extract_speaker_messages(chat);
        // The empty message leaves no record; only the second survives.
        assert_eq!(seg.messages["매니저"].len(), 1);
        assert_eq!(seg.messages["매니저"][0].content, "실제 내용");
    }
}
