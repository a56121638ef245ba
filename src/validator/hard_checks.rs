use crate::types::{ClassGroup, Room, Subject, Teacher, TimeSlot, TimetableEntry};

/// The H2-H4-equivalent checks plus availability/capacity/type, evaluated
/// against a single proposed move. `other_entries` must already
/// exclude the entry being moved.
pub fn check_move(
    new_slot: &TimeSlot,
    room: &Room,
    teacher: &Teacher,
    class: &ClassGroup,
    subject: &Subject,
    all_rooms: &[Room],
    other_entries: &[TimetableEntry],
) -> Vec<String> {
    let mut violations = Vec::new();

    if !teacher.is_available(new_slot.day_index, new_slot.period_index) {
        violations.push(format!(
            "Teacher '{}' is not available at the requested time slot.",
            teacher.name
        ));
    }
    if !room.is_available(new_slot.day_index, new_slot.period_index) {
        violations.push(format!(
            "Room '{}' is not available at the requested time slot.",
            room.name
        ));
    }
    if room.capacity < class.student_count {
        violations.push(format!(
            "Room '{}' (capacity {}) cannot seat class '{}' ({} students).",
            room.name, room.capacity, class.name, class.student_count
        ));
    }

    let any_room_of_required_type = all_rooms.iter().any(|r| r.room_type == subject.required_room_type);
    if any_room_of_required_type && room.room_type != subject.required_room_type {
        violations.push(format!(
            "Room '{}' is of type {:?}, but subject '{}' requires {:?}.",
            room.name, room.room_type, subject.name, subject.required_room_type
        ));
    }

    if other_entries
        .iter()
        .any(|e| e.teacher_id == teacher.id && e.time_slot_id == new_slot.id)
    {
        violations.push(format!(
            "Teacher '{}' already has another lesson at this time slot.",
            teacher.name
        ));
    }
    if other_entries
        .iter()
        .any(|e| e.class_id == class.id && e.time_slot_id == new_slot.id)
    {
        violations.push(format!(
            "Class '{}' already has another lesson at this time slot.",
            class.name
        ));
    }
    if other_entries
        .iter()
        .any(|e| e.room_id == room.id && e.time_slot_id == new_slot.id)
    {
        violations.push(format!(
            "Room '{}' is already booked at this time slot.",
            room.name
        ));
    }

    violations
}
