use crate::scheduler::backend::SolverStatus;
use crate::scheduler::candidate_enumerator::EnumerationResult;
use crate::types::{
    Allocation, AllocationId, ClassGroup, ConflictReport, Room, ReportSeverity, Subject, Teacher,
    TimeSlot,
};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

/// Derives human-readable diagnostics by local checks on the input rather
/// than by solver introspection. Pure function: persistence is
/// the caller's responsibility.
pub fn generate_reports(
    status: SolverStatus,
    enum_result: &EnumerationResult,
    allocations: &[Allocation],
    subjects: &[Subject],
    teachers: &[Teacher],
    classes: &[ClassGroup],
    rooms: &[Room],
    timeslots: &[TimeSlot],
) -> Vec<ConflictReport> {
    let mut reports = Vec::new();

    // 1. Terminal status.
    match status {
        SolverStatus::Unknown => reports.push(ConflictReport::new(
            ReportSeverity::Warning,
            "The solver did not reach a decision within the time limit.",
            BTreeMap::new(),
        )),
        SolverStatus::Infeasible => reports.push(ConflictReport::new(
            ReportSeverity::Error,
            "No feasible timetable exists for the current input.",
            BTreeMap::new(),
        )),
        _ => {}
    }

    let subjects_by_id: BTreeMap<_, _> = subjects.iter().map(|s| (s.id, s)).collect();
    let teachers_by_id: BTreeMap<_, _> = teachers.iter().map(|t| (t.id, t)).collect();
    let classes_by_id: BTreeMap<_, _> = classes.iter().map(|c| (c.id, c)).collect();

    // 2. Allocations with zero candidate tuples across every still-needed
    // period (locked allocations that are already fully satisfied are not
    // reported).
    let allocations_with_candidates: BTreeSet<AllocationId> = enum_result
        .candidates
        .iter()
        .map(|c| c.allocation_id)
        .collect();
    for allocation in allocations {
        let Some(subject) = subjects_by_id.get(&allocation.subject_id) else {
            continue;
        };
        let locked = enum_result
            .locked_period_counts
            .get(&allocation.id)
            .copied()
            .unwrap_or(0);
        let periods_needed = subject.weekly_periods.saturating_sub(locked);
        if periods_needed == 0 {
            continue;
        }
        if !allocations_with_candidates.contains(&allocation.id) {
            let teacher_name = teachers_by_id
                .get(&allocation.teacher_id)
                .map(|t| t.name.clone())
                .unwrap_or_default();
            let class_name = classes_by_id
                .get(&allocation.class_id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            reports.push(ConflictReport::new(
                ReportSeverity::Error,
                format!(
                    "No candidate time slot exists for '{}' taught by '{}' to class '{}'.",
                    subject.name, teacher_name, class_name
                ),
                BTreeMap::from([
                    ("class".to_string(), json!(class_name)),
                    ("subject".to_string(), json!(subject.name)),
                    ("teacher".to_string(), json!(teacher_name)),
                    (
                        "required_room_type".to_string(),
                        json!(format!("{:?}", subject.required_room_type)),
                    ),
                ]),
            ));
        }
    }

    // 3. Subjects whose required room type has no matching room at all.
    let room_types_present: BTreeSet<_> = rooms.iter().map(|r| r.room_type).collect();
    let mut reported_subjects = BTreeSet::new();
    for subject in subjects {
        if !room_types_present.contains(&subject.required_room_type)
            && reported_subjects.insert(subject.id)
        {
            reports.push(ConflictReport::new(
                ReportSeverity::Error,
                format!(
                    "Subject '{}' requires a room of type {:?}, but the school has none.",
                    subject.name, subject.required_room_type
                ),
                BTreeMap::from([
                    ("subject".to_string(), json!(subject.name)),
                    (
                        "required_room_type".to_string(),
                        json!(format!("{:?}", subject.required_room_type)),
                    ),
                ]),
            ));
        }
    }

    // 4. Teacher overallocation.
    let total_slots_available = |teacher: &Teacher| -> usize {
        timeslots
            .iter()
            .filter(|s| teacher.is_available(s.day_index, s.period_index))
            .count()
    };
    let mut required_by_teacher: BTreeMap<_, u32> = BTreeMap::new();
    for allocation in allocations {
        if let Some(subject) = subjects_by_id.get(&allocation.subject_id) {
            *required_by_teacher.entry(allocation.teacher_id).or_default() += subject.weekly_periods;
        }
    }
    for (teacher_id, required) in &required_by_teacher {
        let Some(teacher) = teachers_by_id.get(teacher_id) else {
            continue;
        };
        let available = total_slots_available(teacher);
        if *required as usize > available {
            reports.push(ConflictReport::new(
                ReportSeverity::Error,
                format!(
                    "Teacher '{}' is assigned {} periods/week but is only available for {}.",
                    teacher.name, required, available
                ),
                BTreeMap::from([
                    ("teacher".to_string(), json!(teacher.name)),
                    ("required".to_string(), json!(required)),
                    ("available".to_string(), json!(available)),
                ]),
            ));
        }
    }

    // 5. Class overallocation.
    let mut required_by_class: BTreeMap<_, u32> = BTreeMap::new();
    for allocation in allocations {
        if let Some(subject) = subjects_by_id.get(&allocation.subject_id) {
            *required_by_class.entry(allocation.class_id).or_default() += subject.weekly_periods;
        }
    }
    for (class_id, required) in &required_by_class {
        let Some(class) = classes_by_id.get(class_id) else {
            continue;
        };
        if *required as usize > timeslots.len() {
            reports.push(ConflictReport::new(
                ReportSeverity::Error,
                format!(
                    "Class '{}' is assigned {} periods/week but only {} time slots exist.",
                    class.name, required, timeslots.len()
                ),
                BTreeMap::from([
                    ("class".to_string(), json!(class.name)),
                    ("required".to_string(), json!(required)),
                    ("available".to_string(), json!(timeslots.len())),
                ]),
            ));
        }
    }

    // 6. Generic fallback advice.
    if reports.is_empty() && !status.is_success() {
        let (severity, message) = match status {
            SolverStatus::Unknown => (
                ReportSeverity::Warning,
                "The solver could not decide in time; try increasing the time limit.",
            ),
            _ => (
                ReportSeverity::Error,
                "The solver could not produce a timetable; review constraints and availability.",
            ),
        };
        reports.push(ConflictReport::new(severity, message, BTreeMap::new()));
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::candidate_enumerator::enumerate_candidates;
    use crate::types::{ClassId, Difficulty, RoomId, RoomType, SubjectId, SubjectKind, TeacherId};
    use std::collections::BTreeSet as BSet;

    #[test]
    fn flags_teacher_overallocation() {
        let class = ClassGroup {
            id: ClassId(1),
            name: "9A".into(),
            student_count: 20,
            required_subjects: BSet::new(),
        };
        let subject = Subject {
            id: SubjectId(1),
            name: "Math".into(),
            weekly_periods: 5,
            kind: SubjectKind::Theory,
            difficulty: Difficulty::Easy,
            required_room_type: RoomType::Classroom,
            requires_consecutive_periods: false,
        };
        let mut competencies = BSet::new();
        competencies.insert(subject.id);
        let mut availability = crate::types::Availability::new();
        for p in 3..10 {
            availability.set(0, p, false);
        }
        let teacher = Teacher {
            id: TeacherId(1),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            competencies,
            max_periods_week: 5,
            availability,
        };
        let room = Room {
            id: RoomId(1),
            name: "R1".into(),
            room_type: RoomType::Classroom,
            capacity: 30,
            availability: Default::default(),
        };
        let slots: Vec<TimeSlot> = (0..3)
            .map(|p| crate::types::TimeSlot {
                id: crate::types::TimeSlotId(p + 1),
                day_index: 0,
                period_index: p as u32,
                start_minutes: 0,
                end_minutes: 45,
            })
            .collect();
        let allocation = Allocation {
            id: crate::types::AllocationId(1),
            class_id: class.id,
            subject_id: subject.id,
            teacher_id: teacher.id,
        };
        let subjects = vec![subject.clone()];
        let teachers = vec![teacher.clone()];
        let classes = vec![class.clone()];
        let rooms = vec![room.clone()];
        let enum_result = enumerate_candidates(
            &[allocation],
            &classes,
            &subjects,
            &teachers,
            &rooms,
            &slots,
            &[],
        );
        let reports = generate_reports(
            SolverStatus::Infeasible,
            &enum_result,
            &[allocation],
            &subjects,
            &teachers,
            &classes,
            &rooms,
            &slots,
        );
        assert!(reports
            .iter()
            .any(|r| r.severity == ReportSeverity::Error
                && r.details.get("teacher").is_some()));
    }
}
