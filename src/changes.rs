use serde::Serialize;
use std::collections::HashMap;

use crate::blocks::{couple_name_line, ScheduleBlock};

/// Audit entry: several blocks described the same real-world event.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeReport {
    pub date: String,
    pub venue: String,
    pub couple_names: String,
    pub count: usize,
    pub blocks: Vec<ScheduleBlock>,
}

/// Result of duplicate resolution: the audit reports plus one surviving
/// block per distinct real-world event.
#[derive(Debug, Default)]
pub struct ChangeAnalysis {
    pub changes: Vec<ChangeReport>,
    pub survivors: Vec<ScheduleBlock>,
}

/// Collapse blocks describing the same wedding into one current record.
///
/// Blocks group by (date, trimmed venue, couple-name line); within a group
/// the block from the latest message wins — later chat messages supersede
/// earlier ones for the same event. Superseded versions are reported, never
/// silently dropped. Any group size is handled; this cannot fail.
pub fn detect_changes(blocks: Vec<ScheduleBlock>) -> ChangeAnalysis {
    let mut key_order: Vec<(String, String, String)> = Vec::new();
    let mut groups: HashMap<(String, String, String), Vec<ScheduleBlock>> = HashMap::new();

    for block in blocks {
        let date = block.lines.first().cloned().unwrap_or_default();
        let venue = block
            .lines
            .get(1)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        let couple_names = couple_name_line(&block.lines).unwrap_or_default();

        let key = (date, venue, couple_names);
        if !groups.contains_key(&key) {
            key_order.push(key.clone());
        }
        groups.entry(key).or_default().push(block);
    }

    let mut analysis = ChangeAnalysis::default();
    for key in key_order {
        let members = groups.remove(&key).unwrap_or_default();
        let (date, venue, couple_names) = key;

        if members.len() > 1 {
            // Highest message index wins; on a tie the earlier block stays.
            let mut latest = 0;
            for (i, member) in members.iter().enumerate() {
                if member.message_index > members[latest].message_index {
                    latest = i;
                }
            }
            analysis.changes.push(ChangeReport {
                date,
                venue,
                couple_names,
                count: members.len(),
                blocks: members.clone(),
            });
            analysis.survivors.push(members[latest].clone());
        } else if let Some(only) = members.into_iter().next() {
            analysis.survivors.push(only);
        }
    }

    analysis
}
