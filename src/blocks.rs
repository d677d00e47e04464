use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::lines::is_schedule_line;
use crate::names::split_two_names;

// ── Regex patterns ─────────────────────────────────────────────────
//
// Real data examples:
//   2024.06.10              (date anchor line)
//   공지 2024.03.15 확정    (anchor embedded in surrounding text)
//   13:00
//   라움 2층 컨벤션홀
//   박민수 최지은
//   010-1234-5678
//   K[세븐스] 30P
//   세컨드플로우 기본 40P

// Date anchor: appears anywhere in a line; only the digits are kept.
static RE_DATE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}\.\d{2}\.\d{2})").unwrap());

// Exact-match forms used by the validator.
static RE_DATE_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}\.\d{2}\.\d{2}$").unwrap());
static RE_TIME_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}$").unwrap());

static RE_HANGUL_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[가-힣\s]+$").unwrap());

pub(crate) static RE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"010[-.\s]?\d{3,4}[-.\s]?\d{4}").unwrap());

// Guard used when hunting the couple-name line: a line carrying brand or
// product markers is never a couple line. The 세컨플로우 literal (missing 드)
// is kept as observed in production data.
static RE_BRAND_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[KBA]\s*\[|세컨플로우|세븐스|그라피|\d+[pP]").unwrap());

// Brand checks for the validator: bracketed single-letter code, known
// brand-family substring, or a digit+P album code.
static RE_BRAND_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[KBA]\s*\[").unwrap());
static RE_BRAND_FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(세븐스|그라피|플로우)").unwrap());
static RE_ALBUM_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+[pP]").unwrap());

/// A candidate run of lines believed to describe one shoot.
/// Line 0 is always the normalized `YYYY.MM.DD` date string.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleBlock {
    pub lines: Vec<String>,
    /// Index of the owning message within the speaker's message sequence.
    pub message_index: usize,
    /// Line index within the message at which the date anchor sat.
    pub start_line: usize,
}

/// Count `YYYY.MM.DD` occurrences in a text; used for speaker auto-selection.
pub fn count_date_tokens(text: &str) -> usize {
    RE_DATE_ANCHOR.find_iter(text).count()
}

/// Slice one message's content into candidate schedule blocks.
///
/// A line containing a date token opens a block whose line 0 is only the
/// matched digits; following lines are consumed (noise-filtered) until the
/// next date line or end of message. Blocks never overlap — the scan
/// pointer jumps past each consumed extent. Runs shorter than 4 lines
/// after filtering are dropped.
pub fn extract_schedule_blocks(message_content: &str, message_index: usize) -> Vec<ScheduleBlock> {
    let lines: Vec<&str> = message_content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some(caps) = RE_DATE_ANCHOR.captures(lines[i]) else {
            i += 1;
            continue;
        };

        let mut block = vec![caps[1].to_string()];
        let mut j = i + 1;
        while j < lines.len() {
            if RE_DATE_ANCHOR.is_match(lines[j]) {
                break;
            }
            if is_schedule_line(lines[j]) {
                block.push(lines[j].to_string());
            }
            j += 1;
        }

        if block.len() >= 4 {
            blocks.push(ScheduleBlock {
                lines: block,
                message_index,
                start_line: i,
            });
        }
        i = j;
    }

    blocks
}

/// Find the couple-name line in a block: Korean-only text that splits into
/// two names, is not the venue line (index 1), not a phone line, and not a
/// brand/product line. Shared by the validator and change detection.
pub fn couple_name_line(lines: &[String]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let Some((first, second)) = split_two_names(trimmed) else {
            continue;
        };
        if first.is_empty() || second.is_empty() {
            continue;
        }
        if RE_HANGUL_ONLY.is_match(trimmed)
            && i != 1
            && !RE_PHONE.is_match(trimmed)
            && !RE_BRAND_MARKERS.is_match(trimmed)
        {
            return Some(trimmed.to_string());
        }
    }
    None
}

/// Accept/reject a candidate block against required-field heuristics.
///
/// Checks run in order and the first failure rejects: minimum length,
/// exact date line, an exact time line among indices 1–3, a venue of at
/// least 2 chars, a recognizable couple-name line, and brand + product
/// markers (which may be satisfied by the same physical line).
pub fn is_valid_schedule_block(lines: &[String]) -> bool {
    if lines.len() < 4 {
        return false;
    }

    if !RE_DATE_EXACT.is_match(lines[0].trim()) {
        return false;
    }

    let mut has_valid_time = false;
    for line in lines.iter().take(4).skip(1) {
        if RE_TIME_EXACT.is_match(line.trim()) {
            has_valid_time = true;
            break;
        }
    }
    if !has_valid_time {
        return false;
    }

    if lines[1].trim().chars().count() < 2 {
        return false;
    }

    if couple_name_line(lines).is_none() {
        return false;
    }

    let has_brand = lines.iter().any(|line| {
        RE_BRAND_CODE.is_match(line) || RE_BRAND_FAMILY.is_match(line) || RE_ALBUM_CODE.is_match(line)
    });
    if !has_brand {
        return false;
    }

    let has_product = lines.iter().any(|line| RE_ALBUM_CODE.is_match(line));
    if !has_product {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    const MESSAGE: &str = "공지 2024.03.15 확정\n라움 2층\n13:00\n확인\n박민수 최지은\nK[세븐스] 30P\n2024.04.02\n그랜드호텔\n11:30\n김철수 이영희\n세컨드플로우 기본 40P";

    #[test]
    fn test_date_normalization() {
        let blocks = extract_schedule_blocks(MESSAGE, 0);
        assert_eq!(blocks[0].lines[0], "2024.03.15");
    }

    #[test]
    fn test_noise_filtered_inside_block() {
        let blocks = extract_schedule_blocks(MESSAGE, 0);
        assert!(!blocks[0].lines.iter().any(|l| l == "확인"));
    }

    #[test]
    fn test_blocks_do_not_overlap() {
        let blocks = extract_schedule_blocks(MESSAGE, 0);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines[0], "2024.03.15");
        assert_eq!(blocks[1].lines[0], "2024.04.02");
        assert_eq!(blocks[1].start_line, 6);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_schedule_blocks(MESSAGE, 3);
        let second = extract_schedule_blocks(MESSAGE, 3);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.lines, b.lines);
            assert_eq!(a.message_index, b.message_index);
            assert_eq!(a.start_line, b.start_line);
        }
    }

    #[test]
    fn test_short_runs_dropped() {
        let blocks = extract_schedule_blocks("2024.03.15\n라움\n13:00", 0);
        assert!(blocks.is_empty());
    }

    // Minimum-valid block for the validator checks.
    fn minimum_valid() -> Vec<String> {
        block(&["2024.05.01", "그랜드호텔", "12:30", "김철수 이영희", "세븐스 30P"])
    }

    #[test]
    fn test_minimum_valid_block_accepted() {
        assert!(is_valid_schedule_block(&minimum_valid()));
    }

    #[test]
    fn test_missing_date_rejected() {
        let mut b = minimum_valid();
        b[0] = "일정 공지".into();
        assert!(!is_valid_schedule_block(&b));
    }

    #[test]
    fn test_missing_time_rejected() {
        let mut b = minimum_valid();
        b[2] = "정오쯤".into();
        assert!(!is_valid_schedule_block(&b));
        b[2] = "12:30".into();
        assert!(is_valid_schedule_block(&b));
    }

    #[test]
    fn test_short_venue_rejected() {
        let mut b = minimum_valid();
        b[1] = "홀".into();
        assert!(!is_valid_schedule_block(&b));
        b[1] = "호텔".into();
        assert!(is_valid_schedule_block(&b));
    }

    #[test]
    fn test_missing_couple_rejected() {
        let b = block(&["2024.05.01", "그랜드호텔", "12:30", "세븐스 30P", "추가안내사항"]);
        assert!(!is_valid_schedule_block(&b));
    }

    #[test]
    fn test_missing_brand_rejected() {
        let b = block(&["2024.05.01", "그랜드호텔", "12:30", "김철수 이영희", "요청사항 없음"]);
        assert!(!is_valid_schedule_block(&b));
    }

    #[test]
    fn test_too_short_rejected() {
        let b = block(&["2024.05.01", "그랜드호텔", "12:30"]);
        assert!(!is_valid_schedule_block(&b));
    }

    #[test]
    fn test_one_line_satisfies_brand_and_product() {
        // K[세븐스] 30P carries the brand code and the album code at once.
        let b = block(&["2024.06.10", "라움", "13:00", "박민수 최지은", "K[세븐스] 30P"]);
        assert!(is_valid_schedule_block(&b));
    }

    #[test]
    fn test_venue_line_is_not_a_couple_line() {
        // Index 1 is excluded from the couple hunt even when it splits.
        let b = block(&["2024.05.01", "수원 컨벤션", "12:30", "세븐스 30P", "메모"]);
        assert!(!is_valid_schedule_block(&b));
        assert_eq!(couple_name_line(&b), None);
    }

    #[test]
    fn test_couple_line_found() {
        assert_eq!(
            couple_name_line(&minimum_valid()),
            Some("김철수 이영희".to_string())
        );
    }
}
