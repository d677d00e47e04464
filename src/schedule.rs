use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::blocks::RE_PHONE;
use crate::names::split_two_names;

// ── Brand/product decomposition ────────────────────────────────────
//
// Real brand lines:
//   K[세븐스] 30P
//   세컨드플로우 기본 40P
//   더그라피 50P (2권) + 미니북
//   B[세븐스] 프리미엄

static RE_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static RE_COPY_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+권").unwrap());
static RE_MINIBOOK_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"미니북.*$").unwrap());
static RE_PLUS_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+.*$").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Product-tier suffixes, tried in order; first match wins.
const TIER_PATTERNS: &[&str] = &[
    r"(?i)(기본\s*\d+[pP])$",
    r"(?i)(\d+[pP])$",
    r"(기본)$",
    r"(프리미엄)$",
    r"(스탠다드)$",
];

static RE_TIERS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| TIER_PATTERNS.iter().map(|p| Regex::new(p).unwrap()).collect());

/// Default tier when no pattern matches.
const DEFAULT_TIER: &str = "기본";

/// Decompose a combined brand+product line into (brand, product tier).
///
/// Parenthetical asides, copy-count tokens, 미니북 tails, and anything
/// after a `+` are stripped before matching; brackets are removed from the
/// brand remainder.
pub fn parse_brand_product(text: &str) -> (String, String) {
    let cleaned = RE_PARENTHETICAL.replace_all(text, "");
    let cleaned = RE_COPY_COUNT.replace_all(&cleaned, "");
    let cleaned = RE_MINIBOOK_TAIL.replace_all(&cleaned, "");
    let cleaned = RE_PLUS_TAIL.replace_all(&cleaned, "");
    let cleaned = cleaned.trim().to_string();

    let mut product = DEFAULT_TIER.to_string();
    let mut brand = cleaned.clone();

    for re in RE_TIERS.iter() {
        if let Some(caps) = re.captures(&cleaned) {
            let m = caps.get(1).unwrap();
            product = RE_WHITESPACE.replace_all(m.as_str(), " ").to_string();
            brand = cleaned[..m.start()].trim().to_string();
            break;
        }
    }

    (brand.replace(['[', ']'], ""), product)
}

// ── Field parser ───────────────────────────────────────────────────

// Trailing lines are photographer credits or free-text requirements.
// Credits look like a bare short Korean name, or a name+phone+role line:
//   안현우
//   안현우 010-5555-6666 메인
static RE_BARE_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[가-힣]{2,3}$").unwrap());
static RE_NAME_PHONE_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[가-힣]{2,4}\s+010[-.\s]?\d{3,4}[-.\s]?\d{4}.*(?:메인|서브)").unwrap()
});
static RE_PHONE_WITH_ROLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"010[-.\s]?\d{3,4}[-.\s]?\d{4}.*(?:메인|서브)").unwrap());

/// Final output unit for one shoot. Immutable once built; the price is
/// attached by the pipeline when the brand maps to a pricing key.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRecord {
    pub date: String,
    pub venue: String,
    pub time: String,
    /// Couple names as written, before splitting.
    pub couple: String,
    pub groom: String,
    pub bride: String,
    pub contact: String,
    pub brand: String,
    pub product: String,
    pub company: String,
    pub planner: String,
    pub requirements: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

fn is_photographer_credit(line: &str) -> bool {
    let trimmed = line.trim();
    RE_BARE_NAME.is_match(trimmed)
        || RE_NAME_PHONE_ROLE.is_match(trimmed)
        || RE_PHONE_WITH_ROLE.is_match(trimmed)
}

/// Map a validated block's ordered lines onto a structured record.
///
/// Positional: 0 date, 1 venue, 2 time, 3 couple names; index 4 is the
/// contact only when it looks like a phone number, otherwise it is read as
/// the brand line. Trailing lines split into photographer credits and
/// requirements; the last trailing line is (company, planner). Sub-field
/// failures leave fields empty — this never errors.
pub fn parse_complete_schedule(lines: &[String]) -> ScheduleRecord {
    let get = |i: usize| lines.get(i).cloned().unwrap_or_default();

    let date = get(0);
    let venue = get(1);
    let time = get(2);
    let couple = get(3);
    let mut idx = 4;

    let contact = if idx < lines.len() && RE_PHONE.is_match(&lines[idx]) {
        idx += 1;
        lines[idx - 1].clone()
    } else {
        String::new()
    };

    let (brand, product) = if idx < lines.len() {
        idx += 1;
        parse_brand_product(&lines[idx - 1])
    } else {
        (String::new(), String::new())
    };

    let remaining = &lines[idx.min(lines.len())..];

    let mut requirements = Vec::new();
    for (i, line) in remaining.iter().enumerate() {
        if i + 1 == remaining.len() {
            break;
        }
        if !is_photographer_credit(line) {
            requirements.push(line.as_str());
        }
    }

    let last_line = remaining.last().cloned().unwrap_or_default();
    let (company, planner) = match last_line.split_once(' ') {
        Some((company, planner)) => (company.to_string(), planner.to_string()),
        None => (last_line, String::new()),
    };

    let (groom, bride) = split_two_names(&couple).unwrap_or_default();

    ScheduleRecord {
        date,
        venue,
        time,
        couple,
        groom,
        bride,
        contact,
        brand,
        product,
        company,
        planner,
        requirements: requirements.join(" "),
        price: None,
    }
}
