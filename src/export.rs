use std::io::Write;
use std::path::Path;

use crate::schedule::ScheduleRecord;

/// Column order expected by the studio's spreadsheet workflow.
pub const CSV_HEADERS: &[&str] = &[
    "날짜", "시간", "예식장홀", "신랑", "신부", "연락처", "브랜드", "상품", "업체", "플래너",
    "요청사항",
];

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn row(record: &ScheduleRecord) -> String {
    [
        record.date.as_str(),
        record.time.as_str(),
        record.venue.as_str(),
        record.groom.as_str(),
        record.bride.as_str(),
        record.contact.as_str(),
        record.brand.as_str(),
        record.product.as_str(),
        record.company.as_str(),
        record.planner.as_str(),
        record.requirements.as_str(),
    ]
    .iter()
    .map(|v| quote(v))
    .collect::<Vec<_>>()
    .join(",")
}

/// Render records as CSV: one header line, then one all-quoted row per
/// record, in the fixed column order.
pub fn render_csv(records: &[ScheduleRecord]) -> String {
    let mut out = vec![CSV_HEADERS.join(",")];
    out.extend(records.iter().map(row));
    out.join("\n")
}

/// Write the CSV with a leading UTF-8 byte-order mark so spreadsheet tools
/// pick up the encoding.
pub fn write_csv(path: &Path, records: &[ScheduleRecord]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all("\u{FEFF}".as_bytes())?;
    file.write_all(render_csv(records).as_bytes())?;
    Ok(())
}
