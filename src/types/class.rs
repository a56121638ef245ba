use super::{ClassId, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: ClassId,
    pub name: String,
    pub student_count: u32,
    pub required_subjects: BTreeSet<SubjectId>,
}
