use super::{AllocationId, ClassId, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

/// Declares that `teacher_id` teaches `subject_id` to `class_id`. The number
/// of lessons owed is `subject.weekly_periods`, looked up by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: AllocationId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
}
