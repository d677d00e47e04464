use serde::Serialize;

use crate::blocks::{count_date_tokens, extract_schedule_blocks, is_valid_schedule_block};
use crate::changes::{detect_changes, ChangeReport};
use crate::error::ParseError;
use crate::pricing::{brand_key, calculate_price};
use crate::schedule::{parse_complete_schedule, ScheduleRecord};
use crate::segment::extract_speaker_messages;

/// Counters for one pipeline run, reported alongside the records.
#[derive(Debug, Serialize)]
pub struct Statistics {
    pub total_speakers: usize,
    pub target_speaker: String,
    pub schedule_blocks: usize,
    pub changes: usize,
    pub final_schedules: usize,
}

/// Everything one chat export parses into.
#[derive(Debug, Serialize)]
pub struct ParseOutcome {
    pub statistics: Statistics,
    pub speakers: Vec<String>,
    pub changes: Vec<ChangeReport>,
    pub records: Vec<ScheduleRecord>,
}

/// Run the full extraction pipeline over a raw chat export.
///
/// Speaker segmentation → per-message block extraction → validation gate →
/// duplicate/change resolution → field parsing → price attachment.
///
/// When no hint is given (or `auto_detect` is set), the speaker whose
/// concatenated messages contain the most date tokens is chosen; ties keep
/// the first speaker in scan order.
pub fn parse_chat(
    raw_text: &str,
    speaker_hint: Option<&str>,
    auto_detect: bool,
) -> Result<ParseOutcome, ParseError> {
    let segmented = extract_speaker_messages(raw_text);
    if segmented.speakers.is_empty() {
        return Err(ParseError::NoSpeakers);
    }

    let hint = speaker_hint.unwrap_or("").trim();
    let mut target = hint.to_string();

    if auto_detect || hint.is_empty() {
        let mut best = "";
        let mut max_tokens = 0;
        for speaker in &segmented.speakers {
            // A speaker may have produced only header-only lines and carry
            // no flushed messages.
            let text = segmented
                .messages
                .get(speaker)
                .map(|msgs| {
                    msgs.iter()
                        .map(|m| m.content.as_str())
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default();
            let tokens = count_date_tokens(&text);
            if tokens > max_tokens {
                max_tokens = tokens;
                best = speaker;
            }
        }
        if !best.is_empty() {
            target = best.to_string();
        }
    }

    let Some(messages) = segmented.messages.get(&target) else {
        return Err(ParseError::SpeakerNotFound {
            requested: target,
            available: segmented.speakers.clone(),
        });
    };

    let mut all_blocks = Vec::new();
    for (message_index, message) in messages.iter().enumerate() {
        all_blocks.extend(extract_schedule_blocks(&message.content, message_index));
    }
    let total_blocks = all_blocks.len();

    let valid_blocks: Vec<_> = all_blocks
        .into_iter()
        .filter(|b| is_valid_schedule_block(&b.lines))
        .collect();

    let analysis = detect_changes(valid_blocks);

    let mut records: Vec<ScheduleRecord> = analysis
        .survivors
        .iter()
        .map(|b| parse_complete_schedule(&b.lines))
        .collect();
    for record in &mut records {
        attach_price(record);
    }

    Ok(ParseOutcome {
        statistics: Statistics {
            total_speakers: segmented.speakers.len(),
            target_speaker: target,
            schedule_blocks: total_blocks,
            changes: analysis.changes.len(),
            final_schedules: records.len(),
        },
        speakers: segmented.speakers,
        changes: analysis.changes,
        records,
    })
}

/// Attach the computed price when the parsed brand maps to a pricing key.
/// Unmapped brands leave the price unset — a soft gap, never an error.
fn attach_price(record: &mut ScheduleRecord) {
    if record.venue.is_empty() || record.product.is_empty() {
        return;
    }
    if let Some(key) = brand_key(&record.brand) {
        record.price = calculate_price(key, &record.product, &record.venue).ok();
    }
}
