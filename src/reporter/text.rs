use super::ReportContext;
use crate::types::ReportSeverity;
use colored::Colorize;
use std::collections::BTreeMap;

/// Renders the whole-school timetable as a colored plain-text report.
pub fn generate_text_report(ctx: &ReportContext) -> String {
    let mut lines = Vec::new();

    lines.push("=".repeat(60));
    lines.push("                TIMETABLE REPORT".to_string());
    lines.push("=".repeat(60));
    lines.push(String::new());

    lines.push("-".repeat(40));
    lines.push("STATISTICS".to_string());
    lines.push("-".repeat(40));
    lines.push(format!("  Classes:    {}", ctx.classes.len()));
    lines.push(format!("  Teachers:   {}", ctx.teachers.len()));
    lines.push(format!("  Lessons:    {}", ctx.entries.len()));
    lines.push(format!("  Conflicts:  {}", ctx.conflict_reports.len()));
    lines.push(String::new());

    lines.push("-".repeat(40));
    if ctx.conflict_reports.is_empty() {
        lines.push("STATUS: CLEAN".green().to_string());
    } else {
        let errors = ctx.conflict_reports.iter().filter(|r| r.severity == ReportSeverity::Error).count();
        if errors > 0 {
            lines.push("STATUS: CONFLICTS FOUND".red().to_string());
        } else {
            lines.push("STATUS: WARNINGS".yellow().to_string());
        }
        for report in ctx.conflict_reports {
            let marker = match report.severity {
                ReportSeverity::Error => "!".red(),
                ReportSeverity::Warning => "!".yellow(),
                ReportSeverity::Info => "i".dimmed(),
            };
            lines.push(format!("  {} {}", marker, report.message));
        }
    }
    lines.push("-".repeat(40));
    lines.push(String::new());

    let mut by_class: BTreeMap<_, Vec<_>> = BTreeMap::new();
    for entry in ctx.entries {
        by_class.entry(entry.class_id).or_insert_with(Vec::new).push(entry);
    }

    lines.push("CLASS SCHEDULES".to_string());
    lines.push("-".repeat(40));
    for class in ctx.classes {
        let Some(entries) = by_class.get(&class.id) else { continue };
        lines.push(format!("\n{} ({} lessons)", class.name.bold(), entries.len()));

        let mut sorted: Vec<_> = entries.iter().collect();
        sorted.sort_by_key(|e| ctx.slot(e.time_slot_id).map(|s| s.key()).unwrap_or((0, 0)));

        for entry in sorted {
            let slot = ctx.slot(entry.time_slot_id);
            let subject = ctx.subject(entry.subject_id).map(|s| s.name.as_str()).unwrap_or("Unknown");
            let teacher = ctx.teacher(entry.teacher_id).map(|t| t.name.as_str()).unwrap_or("Unknown");
            let room = ctx.room(entry.room_id).map(|r| r.name.as_str()).unwrap_or("Unknown");
            let when = slot
                .map(|s| format!("D{}P{}", s.day_index + 1, s.period_index + 1))
                .unwrap_or_else(|| "????".to_string());
            let lock_marker = if entry.is_locked { "*".dimmed() } else { " ".normal() };
            lines.push(format!("  {} {} | {} | {} | {}", lock_marker, when, subject, teacher, room));
        }
    }

    lines.push(String::new());
    lines.push("=".repeat(60));

    lines.join("\n")
}

/// Prints a short summary of a generate run to stdout.
pub fn print_summary(status: crate::scheduler::SolverStatus, entries_written: usize, solve_time_ms: u64) {
    println!();
    if status.is_success() {
        println!("{}", "Timetable generated successfully".green().bold());
    } else {
        println!("{}", "No timetable produced".red().bold());
    }
    println!();
    println!("  Status:  {:?}", status);
    println!("  Entries: {}", entries_written);
    println!("  Time:    {}ms", solve_time_ms);
    println!();
}
