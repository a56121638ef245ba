use super::ReportContext;
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonEntry {
    class: String,
    subject: String,
    teacher: String,
    room: String,
    day_index: u8,
    period_index: u32,
    locked: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    entries: Vec<JsonEntry>,
    conflict_reports: &'a [crate::types::ConflictReport],
}

/// Renders the whole-school timetable as a flat JSON array of entries plus
/// the latest conflict reports.
pub fn generate_json_report(ctx: &ReportContext) -> Result<String> {
    let mut entries: Vec<JsonEntry> = ctx
        .entries
        .iter()
        .map(|e| {
            let slot = ctx.slot(e.time_slot_id);
            JsonEntry {
                class: ctx.class(e.class_id).map(|c| c.name.clone()).unwrap_or_default(),
                subject: ctx.subject(e.subject_id).map(|s| s.name.clone()).unwrap_or_default(),
                teacher: ctx.teacher(e.teacher_id).map(|t| t.name.clone()).unwrap_or_default(),
                room: ctx.room(e.room_id).map(|r| r.name.clone()).unwrap_or_default(),
                day_index: slot.map(|s| s.day_index).unwrap_or(0),
                period_index: slot.map(|s| s.period_index).unwrap_or(0),
                locked: e.is_locked,
            }
        })
        .collect();
    entries.sort_by_key(|e| (e.day_index, e.period_index, e.class.clone()));

    let report = JsonReport { entries, conflict_reports: ctx.conflict_reports };
    Ok(serde_json::to_string_pretty(&report)?)
}
