use super::{AllocationId, ClassId, RoomId, SubjectId, TeacherId, TimeSlotId};
use serde::{Deserialize, Serialize};

/// A `(class, subject, teacher, room, slot, period-index)` tuple for which
/// the Constraint Model Builder will create a boolean decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub allocation_id: AllocationId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub slot_id: TimeSlotId,
    pub period_index: u32,
}
