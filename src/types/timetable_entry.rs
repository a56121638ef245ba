use super::{ClassId, RoomId, SubjectId, TeacherId, TimeSlotId, TimetableEntryId};
use serde::{Deserialize, Serialize};

/// A persisted, scheduled lesson. Rows with `is_locked = false` are
/// destroyed and recreated on every solve; `is_locked = true` rows are
/// preserved and their resources are pre-consumed by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub id: TimetableEntryId,
    pub teacher_id: TeacherId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub room_id: RoomId,
    pub time_slot_id: TimeSlotId,
    pub is_locked: bool,
}
