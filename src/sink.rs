use serde::Serialize;
use std::io::Write;
use thiserror::Error;

use crate::schedule::ScheduleRecord;

/// Required fields a downstream consumer insists on before accepting a
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequiredField {
    CoupleNames,
    Date,
    Venue,
    Brand,
    Album,
    Price,
}

impl RequiredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoupleNames => "신랑신부",
            Self::Date => "날짜",
            Self::Venue => "예식장",
            Self::Brand => "브랜드",
            Self::Album => "앨범",
            Self::Price => "단가",
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("record missing required fields: {}", .0.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", "))]
    Invalid(Vec<RequiredField>),

    #[error("sink io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check a record against the consumer contract. Every missing field is
/// enumerated; an empty list means the record is acceptable.
pub fn validate_record(record: &ScheduleRecord) -> Vec<RequiredField> {
    let mut missing = Vec::new();
    if record.couple.trim().is_empty() {
        missing.push(RequiredField::CoupleNames);
    }
    if record.date.trim().is_empty() {
        missing.push(RequiredField::Date);
    }
    if record.venue.trim().is_empty() {
        missing.push(RequiredField::Venue);
    }
    if record.brand.trim().is_empty() {
        missing.push(RequiredField::Brand);
    }
    if record.product.trim().is_empty() {
        missing.push(RequiredField::Album);
    }
    if !record.price.is_some_and(|p| p > 0) {
        missing.push(RequiredField::Price);
    }
    missing
}

/// Write sink accepting finished records. The persistent backend behind it
/// is a collaborator concern; implementations only report success/failure.
pub trait RecordSink {
    fn submit(&mut self, record: &ScheduleRecord) -> Result<(), SinkError>;
}

/// Bundled sink: validates, then appends each record as one JSON line.
pub struct JsonlSink<W: Write> {
    out: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(out: W) -> Self {
        JsonlSink { out }
    }
}

impl<W: Write> RecordSink for JsonlSink<W> {
    fn submit(&mut self, record: &ScheduleRecord) -> Result<(), SinkError> {
        let missing = validate_record(record);
        if !missing.is_empty() {
            return Err(SinkError::Invalid(missing));
        }
        let json = serde_json::to_string(record).map_err(std::io::Error::other)?;
        writeln!(self.out, "{json}")?;
        Ok(())
    }
}
