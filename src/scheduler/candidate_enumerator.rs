use crate::types::{
    Allocation, Candidate, ClassGroup, ClassId, Room, RoomId, Subject, SubjectId, Teacher,
    TeacherId, TimeSlot, TimeSlotId, TimetableEntry,
};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Secondary indexes over a candidate set, built once during enumeration
/// (Design Notes §9) so the Constraint Model Builder never linear-scans the
/// full candidate list while emitting H1-H5.
#[derive(Debug, Default)]
pub struct CandidateIndex {
    pub by_teacher_slot: BTreeMap<(TeacherId, TimeSlotId), Vec<usize>>,
    pub by_class_slot: BTreeMap<(ClassId, TimeSlotId), Vec<usize>>,
    pub by_room_slot: BTreeMap<(RoomId, TimeSlotId), Vec<usize>>,
    pub by_allocation_period: BTreeMap<(crate::types::AllocationId, u32), Vec<usize>>,
}

impl CandidateIndex {
    fn build(candidates: &[Candidate]) -> Self {
        let mut idx = CandidateIndex::default();
        for (i, c) in candidates.iter().enumerate() {
            idx.by_teacher_slot
                .entry((c.teacher_id, c.slot_id))
                .or_default()
                .push(i);
            idx.by_class_slot
                .entry((c.class_id, c.slot_id))
                .or_default()
                .push(i);
            idx.by_room_slot
                .entry((c.room_id, c.slot_id))
                .or_default()
                .push(i);
            idx.by_allocation_period
                .entry((c.allocation_id, c.period_index))
                .or_default()
                .push(i);
        }
        idx
    }
}

/// Outcome of candidate enumeration, including the diagnostics the Conflict
/// Reporter needs even when the subsequent solve succeeds.
pub struct EnumerationResult {
    pub candidates: Vec<Candidate>,
    pub index: CandidateIndex,
    /// (allocation, period_index) pairs that ended up with zero candidates.
    pub structurally_infeasible: Vec<(Allocation, u32)>,
    /// Allocations whose subject's required room type had no matching room,
    /// so enumeration fell back to the full room set.
    pub room_type_fallbacks: BTreeSet<SubjectId>,
    /// How many of each allocation's weekly periods are already satisfied
    /// by a locked entry and therefore were not enumerated at all.
    pub locked_period_counts: BTreeMap<crate::types::AllocationId, u32>,
}

pub fn enumerate_candidates(
    allocations: &[Allocation],
    classes: &[ClassGroup],
    subjects: &[Subject],
    teachers: &[Teacher],
    rooms: &[Room],
    slots: &[TimeSlot],
    locked_entries: &[TimetableEntry],
) -> EnumerationResult {
    let classes_by_id: BTreeMap<ClassId, &ClassGroup> = classes.iter().map(|c| (c.id, c)).collect();
    let subjects_by_id: BTreeMap<SubjectId, &Subject> = subjects.iter().map(|s| (s.id, s)).collect();
    let teachers_by_id: BTreeMap<TeacherId, &Teacher> = teachers.iter().map(|t| (t.id, t)).collect();

    let mut sorted_slots: Vec<&TimeSlot> = slots.iter().collect();
    sorted_slots.sort_by_key(|s| s.key());

    let mut sorted_rooms: Vec<&Room> = rooms.iter().collect();
    sorted_rooms.sort_by_key(|r| r.id);

    // Locked entries remove their (teacher|class|room, slot) from
    // availability for the remainder of the solve.
    let occupied_teacher_slot: HashSet<(TeacherId, TimeSlotId)> = locked_entries
        .iter()
        .map(|e| (e.teacher_id, e.time_slot_id))
        .collect();
    let occupied_class_slot: HashSet<(ClassId, TimeSlotId)> = locked_entries
        .iter()
        .map(|e| (e.class_id, e.time_slot_id))
        .collect();
    let occupied_room_slot: HashSet<(RoomId, TimeSlotId)> = locked_entries
        .iter()
        .map(|e| (e.room_id, e.time_slot_id))
        .collect();

    // Count locked entries already satisfying each allocation's triple, so
    // those period slots are not re-enumerated.
    let mut locked_period_counts: BTreeMap<crate::types::AllocationId, u32> = BTreeMap::new();
    for a in allocations {
        let count = locked_entries
            .iter()
            .filter(|e| {
                e.class_id == a.class_id && e.subject_id == a.subject_id && e.teacher_id == a.teacher_id
            })
            .count() as u32;
        if count > 0 {
            locked_period_counts.insert(a.id, count);
        }
    }

    let mut candidates = Vec::new();
    let mut structurally_infeasible = Vec::new();
    let mut room_type_fallbacks = BTreeSet::new();

    // Persistence order: allocations as given (already id-sorted by the
    // repository), then period index ascending, then slots by (day,
    // period), then rooms by id.
    for allocation in allocations {
        let Some(class) = classes_by_id.get(&allocation.class_id) else {
            continue;
        };
        let Some(subject) = subjects_by_id.get(&allocation.subject_id) else {
            continue;
        };
        let Some(teacher) = teachers_by_id.get(&allocation.teacher_id) else {
            continue;
        };

        let locked = locked_period_counts.get(&allocation.id).copied().unwrap_or(0);
        let periods_needed = subject.weekly_periods.saturating_sub(locked);

        let rooms_of_type: Vec<&&Room> = sorted_rooms
            .iter()
            .filter(|r| r.room_type == subject.required_room_type)
            .collect();
        let (candidate_rooms, used_fallback): (Vec<&Room>, bool) = if rooms_of_type.is_empty() {
            (sorted_rooms.iter().copied().collect(), true)
        } else {
            (rooms_of_type.into_iter().copied().collect(), false)
        };
        if used_fallback {
            room_type_fallbacks.insert(subject.id);
        }

        for p in 0..periods_needed {
            let mut emitted_for_period = 0usize;

            for slot in &sorted_slots {
                if !teacher.is_available(slot.day_index, slot.period_index) {
                    continue;
                }
                if occupied_teacher_slot.contains(&(teacher.id, slot.id)) {
                    continue;
                }
                if occupied_class_slot.contains(&(class.id, slot.id)) {
                    continue;
                }

                for room in &candidate_rooms {
                    if !room.is_available(slot.day_index, slot.period_index) {
                        continue;
                    }
                    if occupied_room_slot.contains(&(room.id, slot.id)) {
                        continue;
                    }
                    if room.capacity < class.student_count {
                        continue;
                    }

                    candidates.push(Candidate {
                        allocation_id: allocation.id,
                        class_id: class.id,
                        subject_id: subject.id,
                        teacher_id: teacher.id,
                        room_id: room.id,
                        slot_id: slot.id,
                        period_index: p,
                    });
                    emitted_for_period += 1;
                }
            }

            if emitted_for_period == 0 {
                structurally_infeasible.push(((*allocation), p));
            }
        }
    }

    let index = CandidateIndex::build(&candidates);

    EnumerationResult {
        candidates,
        index,
        structurally_infeasible,
        room_type_fallbacks,
        locked_period_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AllocationId, ClassId, Difficulty, RoomId, RoomType, SubjectId, SubjectKind, TeacherId,
        TimeSlotId,
    };
    use std::collections::BTreeSet;

    fn trivial_school() -> (Vec<Allocation>, Vec<ClassGroup>, Vec<Subject>, Vec<Teacher>, Vec<Room>, Vec<TimeSlot>) {
        let class = ClassGroup {
            id: ClassId(1),
            name: "9A".into(),
            student_count: 30,
            required_subjects: BTreeSet::new(),
        };
        let subject = Subject {
            id: SubjectId(1),
            name: "Math".into(),
            weekly_periods: 2,
            kind: SubjectKind::Theory,
            difficulty: Difficulty::Fair,
            required_room_type: RoomType::Classroom,
            requires_consecutive_periods: false,
        };
        let mut competencies = BTreeSet::new();
        competencies.insert(subject.id);
        let teacher = Teacher {
            id: TeacherId(1),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            competencies,
            max_periods_week: 20,
            availability: Default::default(),
        };
        let room = Room {
            id: RoomId(1),
            name: "R1".into(),
            room_type: RoomType::Classroom,
            capacity: 40,
            availability: Default::default(),
        };
        let slots: Vec<TimeSlot> = (0..20)
            .map(|i| TimeSlot {
                id: TimeSlotId(i + 1),
                day_index: (i / 4) as u8,
                period_index: (i % 4) as u32,
                start_minutes: 0,
                end_minutes: 45,
            })
            .collect();
        let allocation = Allocation {
            id: AllocationId(1),
            class_id: class.id,
            subject_id: subject.id,
            teacher_id: teacher.id,
        };
        (vec![allocation], vec![class], vec![subject], vec![teacher], vec![room], slots)
    }

    #[test]
    fn enumerates_candidates_for_every_free_slot() {
        let (allocations, classes, subjects, teachers, rooms, slots) = trivial_school();
        let result = enumerate_candidates(&allocations, &classes, &subjects, &teachers, &rooms, &slots, &[]);
        // 2 periods needed, each can land on any of the 20 slots x 1 room
        assert_eq!(result.candidates.len(), 2 * 20);
        assert!(result.structurally_infeasible.is_empty());
        assert!(result.room_type_fallbacks.is_empty());
    }

    #[test]
    fn falls_back_to_all_rooms_when_no_room_of_required_type_exists() {
        let (allocations, classes, mut subjects, teachers, rooms, slots) = trivial_school();
        subjects[0].required_room_type = RoomType::Lab;
        let result = enumerate_candidates(&allocations, &classes, &subjects, &teachers, &rooms, &slots, &[]);
        assert_eq!(result.candidates.len(), 2 * 20);
        assert!(result.room_type_fallbacks.contains(&subjects[0].id));
    }

    #[test]
    fn locked_entries_reduce_periods_needed_and_block_their_slot() {
        let (allocations, classes, subjects, teachers, rooms, slots) = trivial_school();
        let locked = TimetableEntry {
            id: crate::types::TimetableEntryId(1),
            teacher_id: teachers[0].id,
            class_id: classes[0].id,
            subject_id: subjects[0].id,
            room_id: rooms[0].id,
            time_slot_id: slots[0].id,
            is_locked: true,
        };
        let result = enumerate_candidates(&allocations, &classes, &subjects, &teachers, &rooms, &slots, &[locked]);
        // only 1 period left to enumerate, and the locked slot is excluded
        assert_eq!(result.candidates.len(), 19);
        assert!(result
            .candidates
            .iter()
            .all(|c| c.slot_id != slots[0].id));
    }

    #[test]
    fn candidate_list_for_a_two_slot_school_matches_snapshot() {
        // A school small enough that the ordering over allocation -> period
        // -> slot -> room is easy to eyeball in the committed snapshot.
        let class = ClassGroup {
            id: ClassId(1),
            name: "9A".into(),
            student_count: 10,
            required_subjects: BTreeSet::new(),
        };
        let subject = Subject {
            id: SubjectId(1),
            name: "Math".into(),
            weekly_periods: 1,
            kind: SubjectKind::Theory,
            difficulty: Difficulty::Fair,
            required_room_type: RoomType::Classroom,
            requires_consecutive_periods: false,
        };
        let mut competencies = BTreeSet::new();
        competencies.insert(subject.id);
        let teacher = Teacher {
            id: TeacherId(1),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            competencies,
            max_periods_week: 20,
            availability: Default::default(),
        };
        let room = Room {
            id: RoomId(1),
            name: "R1".into(),
            room_type: RoomType::Classroom,
            capacity: 40,
            availability: Default::default(),
        };
        let slots = vec![
            TimeSlot { id: TimeSlotId(1), day_index: 0, period_index: 0, start_minutes: 0, end_minutes: 45 },
            TimeSlot { id: TimeSlotId(2), day_index: 0, period_index: 1, start_minutes: 45, end_minutes: 90 },
        ];
        let allocation = Allocation { id: AllocationId(1), class_id: class.id, subject_id: subject.id, teacher_id: teacher.id };

        let result = enumerate_candidates(
            &[allocation],
            &[class],
            &[subject],
            &[teacher],
            &[room],
            &slots,
            &[],
        );
        insta::assert_json_snapshot!(result.candidates);
    }
}
