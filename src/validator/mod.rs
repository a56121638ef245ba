mod hard_checks;

pub use hard_checks::*;

use crate::error::{Result, SchedulerError};
use crate::repository::Repository;
use crate::types::{RoomId, TimeSlotId, TimetableEntryId};

/// Runs §4.7: re-checks H2-H4-equivalent hard constraints for a proposed
/// move, excluding the entry being moved, plus availability/capacity/type.
/// Returns the list of human-readable violations; empty means the move is
/// valid. Never writes — the caller commits only on an empty result.
pub fn validate_move(
    repo: &dyn Repository,
    entry_id: TimetableEntryId,
    new_slot_id: TimeSlotId,
    new_room_id: Option<RoomId>,
) -> Result<Vec<String>> {
    let entry = repo
        .get_timetable_entry(entry_id)?
        .ok_or_else(|| SchedulerError::UnknownEntry(entry_id.to_string()))?;

    let slots = repo.list_timeslots()?;
    let new_slot = slots
        .iter()
        .find(|s| s.id == new_slot_id)
        .ok_or_else(|| SchedulerError::EditRejected(format!("time slot {new_slot_id} does not exist")))?;

    let room_id = new_room_id.unwrap_or(entry.room_id);
    let rooms = repo.list_rooms()?;
    let room = rooms
        .iter()
        .find(|r| r.id == room_id)
        .ok_or_else(|| SchedulerError::EditRejected(format!("room {room_id} does not exist")))?;

    let teachers = repo.list_teachers()?;
    let teacher = teachers
        .iter()
        .find(|t| t.id == entry.teacher_id)
        .ok_or_else(|| SchedulerError::EditRejected(format!("teacher {} does not exist", entry.teacher_id)))?;

    let classes = repo.list_classgroups()?;
    let class = classes
        .iter()
        .find(|c| c.id == entry.class_id)
        .ok_or_else(|| SchedulerError::EditRejected(format!("class {} does not exist", entry.class_id)))?;

    let subjects = repo.list_subjects()?;
    let subject = subjects
        .iter()
        .find(|s| s.id == entry.subject_id)
        .ok_or_else(|| SchedulerError::EditRejected(format!("subject {} does not exist", entry.subject_id)))?;

    let other_entries: Vec<_> = repo
        .list_timetable_entries()?
        .into_iter()
        .filter(|e| e.id != entry_id)
        .collect();

    Ok(hard_checks::check_move(
        new_slot, room, teacher, class, subject, &rooms, &other_entries,
    ))
}
