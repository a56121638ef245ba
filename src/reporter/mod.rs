mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::error::Result;
use crate::types::{
    ClassGroup, ClassId, ConflictReport, Room, RoomId, Subject, SubjectId, Teacher, TeacherId,
    TimeSlot, TimeSlotId, TimetableEntry,
};
use std::fs;
use std::path::Path;

/// Output format for the `report` subcommand's file mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Everything a report renderer needs, borrowed from the repository for the
/// duration of one render. No PDF/Excel/CSV output here, text, Markdown, and
/// JSON only.
pub struct ReportContext<'a> {
    pub entries: &'a [TimetableEntry],
    pub slots: &'a [TimeSlot],
    pub classes: &'a [ClassGroup],
    pub teachers: &'a [Teacher],
    pub subjects: &'a [Subject],
    pub rooms: &'a [Room],
    pub conflict_reports: &'a [ConflictReport],
}

impl<'a> ReportContext<'a> {
    pub fn slot(&self, id: TimeSlotId) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassGroup> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    fn entries_for<F>(&self, pred: F) -> Vec<&TimetableEntry>
    where
        F: Fn(&TimetableEntry) -> bool,
    {
        let mut matches: Vec<&TimetableEntry> = self.entries.iter().filter(|e| pred(e)).collect();
        matches.sort_by_key(|e| self.slot(e.time_slot_id).map(|s| s.key()).unwrap_or((0, 0)));
        matches
    }
}

/// Writes whole-school timetable and conflict-report files to `output_dir`,
/// one file per requested format.
pub fn write_reports(ctx: &ReportContext, output_dir: &Path, formats: &[OutputFormat]) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    for format in formats {
        match format {
            OutputFormat::Json => {
                fs::write(output_dir.join("timetable.json"), generate_json_report(ctx)?)?;
            }
            OutputFormat::Markdown => {
                fs::write(output_dir.join("timetable.md"), generate_markdown_report(ctx))?;
            }
            OutputFormat::Text => {
                fs::write(output_dir.join("timetable.txt"), generate_text_report(ctx))?;
            }
        }
    }
    Ok(())
}

/// Renders one class's weekly schedule as plain text, for the `report
/// --class` CLI view. `None` if the class id is unknown.
pub fn class_schedule_text(ctx: &ReportContext, class_id: ClassId) -> Option<String> {
    let class = ctx.class(class_id)?;
    let entries = ctx.entries_for(|e| e.class_id == class_id);

    let mut lines = vec![format!("Schedule for {}", class.name), String::new()];
    if entries.is_empty() {
        lines.push("No lessons scheduled.".to_string());
        return Some(lines.join("\n"));
    }
    for entry in entries {
        let slot = ctx.slot(entry.time_slot_id);
        let subject = ctx.subject(entry.subject_id).map(|s| s.name.as_str()).unwrap_or("Unknown");
        let teacher = ctx.teacher(entry.teacher_id).map(|t| t.name.as_str()).unwrap_or("Unknown");
        let room = ctx.room(entry.room_id).map(|r| r.name.as_str()).unwrap_or("Unknown");
        let when = slot
            .map(|s| format!("Day {} / Period {}", s.day_index + 1, s.period_index + 1))
            .unwrap_or_else(|| "Unknown slot".to_string());
        let locked = if entry.is_locked { " [locked]" } else { "" };
        lines.push(format!("  {:<24} {} with {} in {}{}", when, subject, teacher, room, locked));
    }
    Some(lines.join("\n"))
}

/// Renders one teacher's weekly schedule as plain text, for the `report
/// --teacher` CLI view. `None` if the teacher id is unknown.
pub fn teacher_schedule_text(ctx: &ReportContext, teacher_id: TeacherId) -> Option<String> {
    let teacher = ctx.teacher(teacher_id)?;
    let entries = ctx.entries_for(|e| e.teacher_id == teacher_id);

    let mut lines = vec![format!("Schedule for {}", teacher.name), String::new()];
    if entries.is_empty() {
        lines.push("No lessons assigned.".to_string());
        return Some(lines.join("\n"));
    }
    for entry in entries {
        let slot = ctx.slot(entry.time_slot_id);
        let subject = ctx.subject(entry.subject_id).map(|s| s.name.as_str()).unwrap_or("Unknown");
        let class = ctx.class(entry.class_id).map(|c| c.name.as_str()).unwrap_or("Unknown");
        let room = ctx.room(entry.room_id).map(|r| r.name.as_str()).unwrap_or("Unknown");
        let when = slot
            .map(|s| format!("Day {} / Period {}", s.day_index + 1, s.period_index + 1))
            .unwrap_or_else(|| "Unknown slot".to_string());
        let locked = if entry.is_locked { " [locked]" } else { "" };
        lines.push(format!("  {:<24} {} for {} in {}{}", when, subject, class, room, locked));
    }
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassId, Difficulty, RoomId, RoomType, SubjectId, SubjectKind, TeacherId, TimeSlotId, TimetableEntryId};
    use std::collections::BTreeSet;

    fn ctx_fixture() -> (ClassGroup, Teacher, Subject, Room, TimeSlot, TimetableEntry) {
        let class = ClassGroup {
            id: ClassId(1),
            name: "9A".into(),
            student_count: 25,
            required_subjects: BTreeSet::new(),
        };
        let teacher = Teacher {
            id: TeacherId(1),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            competencies: BTreeSet::new(),
            max_periods_week: 20,
            availability: Default::default(),
        };
        let subject = Subject {
            id: SubjectId(1),
            name: "Math".into(),
            weekly_periods: 2,
            kind: SubjectKind::Theory,
            difficulty: Difficulty::Easy,
            required_room_type: RoomType::Classroom,
            requires_consecutive_periods: false,
        };
        let room = Room {
            id: RoomId(1),
            name: "R1".into(),
            room_type: RoomType::Classroom,
            capacity: 30,
            availability: Default::default(),
        };
        let slot = TimeSlot {
            id: TimeSlotId(1),
            day_index: 0,
            period_index: 0,
            start_minutes: 480,
            end_minutes: 525,
        };
        let entry = TimetableEntry {
            id: TimetableEntryId(1),
            teacher_id: teacher.id,
            class_id: class.id,
            subject_id: subject.id,
            room_id: room.id,
            time_slot_id: slot.id,
            is_locked: false,
        };
        (class, teacher, subject, room, slot, entry)
    }

    #[test]
    fn renders_a_class_schedule() {
        let (class, teacher, subject, room, slot, entry) = ctx_fixture();
        let entries = [entry];
        let classes = [class];
        let teachers = [teacher];
        let subjects = [subject];
        let rooms = [room];
        let slots = [slot];
        let ctx = ReportContext {
            entries: &entries,
            slots: &slots,
            classes: &classes,
            teachers: &teachers,
            subjects: &subjects,
            rooms: &rooms,
            conflict_reports: &[],
        };
        let text = class_schedule_text(&ctx, ClassId(1)).unwrap();
        assert!(text.contains("Math"));
        assert!(text.contains("Jane"));
    }

    #[test]
    fn unknown_teacher_returns_none() {
        let (_, _, _, _, _, entry) = ctx_fixture();
        let entries = [entry];
        let ctx = ReportContext {
            entries: &entries,
            slots: &[],
            classes: &[],
            teachers: &[],
            subjects: &[],
            rooms: &[],
            conflict_reports: &[],
        };
        assert!(teacher_schedule_text(&ctx, TeacherId(999)).is_none());
    }
}
