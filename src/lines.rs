use regex::Regex;
use std::sync::LazyLock;

// Managers interleave schedule fields with chat noise: acknowledgments,
// greetings, emoticons, decorative separators. The classifier is a fixed
// denylist tuned against real exports — it is deliberately not extended
// beyond the observed patterns, because any change here silently shifts
// which lines survive into blocks downstream.
//
// Real noise examples:
//   ---------------------
//   2024년 3월 15일
//   토요일
//   확인
//   감사합니다 ^^
//   ㅠㅠ

// Full calendar-style date statement (distinct from the YYYY.MM.DD anchor).
static RE_CALENDAR_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}년\s*\d{1,2}월\s*\d{1,2}일").unwrap());

// Bare day-of-week line: "토요일", "일요일".
static RE_WEEKDAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(월|화|수|목|금|토|일)요일\s*$").unwrap());

/// Greeting/acknowledgment/emoticon lines that carry no schedule content.
/// Literal pattern set, order-independent, first match discards.
const NOISE_PATTERNS: &[&str] = &[
    r"^건입니\s*$",
    r"^확인\s*$",
    r"^감사\s*$",
    r"^스케줄입니다\s*$",
    r"^부탁드리겠습니\s*$",
    r"^[\^\s]*$",
    r"^[:)\s]*$",
    r"^[:D\s]*$",
    r"^[ㅠㅜ\s]*$",
    r"^헉\s*$",
    r"^아하\s*$",
    r"^안녕하세요\s*$",
    r"^좋은아침\s*$",
    r"^잘다녀오\s*$",
    r"^기상체크\s*$",
    r"^확인부탁\s*$",
    r"^재발송\s*$",
    r"^특이사항\s*$",
    r"^전체\s*재확인\s*$",
    r"^내용\s*한번씩\s*$",
    r"^이번주\s*$",
];

static RE_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    NOISE_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// Decide whether a single line is schedule-relevant.
/// Pure and stateless; runs inside block extraction to strip chat noise
/// interleaved between genuine schedule fields.
pub fn is_schedule_line(line: &str) -> bool {
    let trimmed = line.trim();

    if trimmed.chars().count() <= 1 {
        return false;
    }
    if trimmed.contains("---------------") {
        return false;
    }
    if RE_CALENDAR_DATE.is_match(trimmed) {
        return false;
    }
    if RE_WEEKDAY.is_match(trimmed) {
        return false;
    }
    for re in RE_NOISE.iter() {
        if re.is_match(trimmed) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_schedule_fields() {
        assert!(is_schedule_line("그랜드호텔 3층 아모르홀"));
        assert!(is_schedule_line("13:00"));
        assert!(is_schedule_line("김철수 이영희"));
        assert!(is_schedule_line("010-1234-5678"));
        assert!(is_schedule_line("K[세븐스] 30P"));
    }

    #[test]
    fn test_discards_short_and_separators() {
        assert!(!is_schedule_line(""));
        assert!(!is_schedule_line("네"));
        assert!(!is_schedule_line("--------------------"));
    }

    #[test]
    fn test_discards_calendar_noise() {
        assert!(!is_schedule_line("2024년 3월 15일"));
        assert!(!is_schedule_line("토요일"));
    }

    #[test]
    fn test_discards_greetings_and_emoticons() {
        assert!(!is_schedule_line("안녕하세요"));
        assert!(!is_schedule_line("확인"));
        assert!(!is_schedule_line("^^"));
        assert!(!is_schedule_line("ㅠㅠ"));
        assert!(!is_schedule_line("기상체크"));
        assert!(!is_schedule_line("전체 재확인"));
    }

    #[test]
    fn test_prefix_is_not_enough() {
        // Denylist entries are anchored; longer lines that merely start
        // with a noise word are kept.
        assert!(is_schedule_line("확인 후 연락드리겠습니다 일정은 그대로입니다"));
    }
}
