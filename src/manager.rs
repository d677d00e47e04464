use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::pricing::calculate_price;

// ── Regex patterns ─────────────────────────────────────────────────
//
// A manager notice is one free-text message describing a single shoot:
//   2025.03.15
//   더케이웨딩홀 3층 (주차 B2)
//   14:30
//   김철수 이영희
//   010-1234-5678
//   K 세븐스 30P
//   선촬영 폐백
//   안현우 010-5555-6666 메인
//   그랜드블랑 w플래너

static RE_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{4}\.\d{2}\.\d{2})").unwrap());
static RE_TIME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());
static RE_COUPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[가-힣]{2,4}\s+[가-힣]{2,4}").unwrap());
static RE_CONTACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"010-[\d-]+").unwrap());
static RE_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());

/// Studio photographers whose names appear as credit lines in notices.
const KNOWN_PHOTOGRAPHERS: &[&str] = &["안현우"];

/// When a notice carries no time line, shoots default to noon.
const DEFAULT_TIME: &str = "12:00";

/// Structured shoot metadata parsed from one manager notice.
/// Every field is best-effort; unresolved ones stay `None`.
#[derive(Debug, Default, Serialize)]
pub struct ShootingNotice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub couple: Option<String>,
    /// Local-time ISO datetime, e.g. "2025-03-15T14:30:00.000+09:00".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photographer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<i64>,
    /// On-site briefing notes (선촬영, 폐백, ...).
    pub briefing: Vec<String>,
    /// Handover remarks joined with ", ".
    pub handover: String,
}

fn mentions_photographer(line: &str) -> bool {
    KNOWN_PHOTOGRAPHERS.iter().any(|name| line.contains(name))
}

fn looks_like_brand_line(line: &str) -> bool {
    line.contains("세븐스") || line.contains("세컨") || line.contains("그라피")
}

/// Parse a manager's free-text shoot notice into structured metadata.
///
/// Heuristic field hunts over trimmed lines; the price is attached
/// automatically once brand, album, and venue are all resolved.
pub fn parse_manager_notice(message: &str) -> ShootingNotice {
    let lines: Vec<&str> = message.trim().split('\n').map(str::trim).collect();
    let mut notice = ShootingNotice::default();

    // Datetime: date anchor on the first line, first time token anywhere.
    if let Some(date) = lines.first().and_then(|l| RE_DATE.captures(l)) {
        let time = lines
            .iter()
            .find_map(|l| RE_TIME.find(l))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_TIME.to_string());
        let parts: Vec<&str> = date[1].split('.').collect();
        if let [year, month, day] = parts[..] {
            notice.datetime = Some(format!("{year}-{month}-{day}T{time}:00.000+09:00"));
        }
    }

    // Venue: first line that is none of the other field shapes.
    notice.venue = lines
        .iter()
        .find(|l| {
            !RE_DATE.is_match(l)
                && !RE_TIME.is_match(l)
                && !l.contains("010-")
                && !l.contains("세븐스")
                && !l.contains("세컨")
                && !mentions_photographer(l)
                && l.chars().count() > 2
        })
        .map(|l| RE_PARENTHETICAL.replace_all(l, "").trim().to_string());

    // Couple: two Korean names on a non-contact line.
    notice.couple = lines
        .iter()
        .filter(|l| !l.contains("010-"))
        .find_map(|l| RE_COUPLE.find(l))
        .map(|m| m.as_str().to_string());

    notice.contact = lines
        .iter()
        .find(|l| l.contains("010-"))
        .and_then(|l| RE_CONTACT.find(l))
        .map(|m| m.as_str().to_string());

    // Brand and album from the product line.
    if let Some(product_line) = lines.iter().find(|l| looks_like_brand_line(l)) {
        notice.brand = if product_line.contains('K') && product_line.contains("세븐스") {
            Some("K 세븐스".to_string())
        } else if product_line.contains('B') && product_line.contains("세븐스") {
            Some("B 세븐스".to_string())
        } else if product_line.contains('A') && product_line.contains("세븐스") {
            Some("A 세븐스프리미엄".to_string())
        } else if product_line.contains("세컨") {
            Some("세컨드플로우".to_string())
        } else if product_line.contains("그라피") {
            Some("더그라피".to_string())
        } else {
            None
        };

        for pages in ["30P", "40P", "50P"] {
            if product_line.contains(pages) {
                notice.album = Some(if product_line.contains("기본") {
                    format!("기본 {pages}")
                } else {
                    pages.to_string()
                });
                break;
            }
        }
    }

    notice.photographer = lines
        .iter()
        .find(|l| mentions_photographer(l))
        .and_then(|l| KNOWN_PHOTOGRAPHERS.iter().find(|name| l.contains(*name)))
        .map(|name| name.to_string());

    notice.planner = lines
        .iter()
        .find(|l| l.contains('w') || l.contains("그랜드블랑"))
        .map(|l| l.to_string());

    // Briefing keyword scan over the whole notice.
    let joined = lines.join(" ");
    if joined.contains("선촬영") {
        notice.briefing.push("선촬영".to_string());
    }
    if joined.contains("폐백") && !joined.contains("폐백X") && !joined.contains("폐백 X") {
        notice.briefing.push("폐백".to_string());
    }
    if joined.contains("포토부스") {
        notice.briefing.push("포토부스".to_string());
    }
    if joined.contains("플래시컷") {
        notice.briefing.push("플래시컷".to_string());
    }
    if joined.contains("드레스실") || joined.contains("드래스룸") {
        notice.briefing.push("드래스룸".to_string());
    }
    if joined.contains("홀스냅") {
        notice.briefing.push("홀스냅".to_string());
    }

    let mut handover = Vec::new();
    if message.contains("지하") {
        handover.push("지하1층");
    }
    if message.contains("미니북") {
        handover.push("미니북 2권");
    }
    if message.contains("폐백X") || message.contains("폐백 X") {
        handover.push("폐백X");
    }
    notice.handover = handover.join(", ");

    if let (Some(brand), Some(album), Some(venue)) = (&notice.brand, &notice.album, &notice.venue)
    {
        notice.estimated_price = calculate_price(brand, album, venue).ok();
    }

    notice
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTICE: &str = "2025.03.15\n더케이웨딩홀 3층 (주차 B2)\n14:30\n김철수 이영희\n010-1234-5678\nK 세븐스 30P\n선촬영 폐백\n안현우 010-5555-6666 메인\n그랜드블랑 w플래너";

    #[test]
    fn test_full_notice() {
        let notice = parse_manager_notice(NOTICE);

        assert_eq!(
            notice.datetime.as_deref(),
            Some("2025-03-15T14:30:00.000+09:00")
        );
        assert_eq!(notice.venue.as_deref(), Some("더케이웨딩홀 3층"));
        assert_eq!(notice.couple.as_deref(), Some("김철수 이영희"));
        assert_eq!(notice.contact.as_deref(), Some("010-1234-5678"));
        assert_eq!(notice.brand.as_deref(), Some("K 세븐스"));
        assert_eq!(notice.album.as_deref(), Some("30P"));
        assert_eq!(notice.photographer.as_deref(), Some("안현우"));
        assert_eq!(notice.planner.as_deref(), Some("그랜드블랑 w플래너"));
        assert_eq!(notice.estimated_price, Some(140_000));
        assert_eq!(notice.briefing, vec!["선촬영", "폐백"]);
    }

    #[test]
    fn test_missing_time_defaults_to_noon() {
        let notice = parse_manager_notice("2025.03.15\n더케이웨딩홀 본관\n김철수 이영희\n세컨드플로우 기본 40P");
        assert_eq!(
            notice.datetime.as_deref(),
            Some("2025-03-15T12:00:00.000+09:00")
        );
        assert_eq!(notice.estimated_price, Some(190_000));
    }

    #[test]
    fn test_suppressed_paebaek_goes_to_handover() {
        let notice = parse_manager_notice("2025.03.15\n라움홀 2층\n13:00\n박민수 최지은\nB 세븐스 40P\n폐백X 지하 주차");
        assert!(!notice.briefing.contains(&"폐백".to_string()));
        assert_eq!(notice.handover, "지하1층, 폐백X");
    }

    #[test]
    fn test_unresolved_fields_stay_empty() {
        let notice = parse_manager_notice("일정 문의드립니다");
        assert!(notice.datetime.is_none());
        assert!(notice.brand.is_none());
        assert!(notice.estimated_price.is_none());
    }
}
