use super::ReportContext;
use std::collections::BTreeMap;

/// Renders the whole-school timetable as a Markdown document: one table per
/// class, plus a conflict-report section when any exist.
pub fn generate_markdown_report(ctx: &ReportContext) -> String {
    let mut lines = vec!["# Timetable Report".to_string(), String::new()];

    lines.push("## Summary\n".to_string());
    lines.push("| Metric | Value |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| Classes | {} |", ctx.classes.len()));
    lines.push(format!("| Teachers | {} |", ctx.teachers.len()));
    lines.push(format!("| Lessons scheduled | {} |", ctx.entries.len()));
    lines.push(format!("| Conflict reports | {} |", ctx.conflict_reports.len()));
    lines.push(String::new());

    let mut by_class: BTreeMap<_, Vec<_>> = BTreeMap::new();
    for entry in ctx.entries {
        by_class.entry(entry.class_id).or_insert_with(Vec::new).push(entry);
    }

    lines.push("## Class Schedules\n".to_string());
    for class in ctx.classes {
        let Some(entries) = by_class.get(&class.id) else { continue };
        lines.push(format!("### {}\n", class.name));
        lines.push("| Day | Period | Subject | Teacher | Room |".to_string());
        lines.push("|-----|--------|---------|---------|------|".to_string());

        let mut sorted: Vec<_> = entries.iter().collect();
        sorted.sort_by_key(|e| ctx.slot(e.time_slot_id).map(|s| s.key()).unwrap_or((0, 0)));

        for entry in sorted {
            let slot = ctx.slot(entry.time_slot_id);
            let subject = ctx.subject(entry.subject_id).map(|s| s.name.as_str()).unwrap_or("Unknown");
            let teacher = ctx.teacher(entry.teacher_id).map(|t| t.name.as_str()).unwrap_or("Unknown");
            let room = ctx.room(entry.room_id).map(|r| r.name.as_str()).unwrap_or("Unknown");
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                slot.map(|s| s.day_index + 1).unwrap_or(0),
                slot.map(|s| s.period_index + 1).unwrap_or(0),
                subject,
                teacher,
                room,
            ));
        }
        lines.push(String::new());
    }

    if !ctx.conflict_reports.is_empty() {
        lines.push("## Conflict Reports\n".to_string());
        for report in ctx.conflict_reports {
            lines.push(format!("- **{:?}**: {}", report.severity, report.message));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
