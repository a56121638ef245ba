use super::{Availability, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub email: String,
    pub competencies: BTreeSet<SubjectId>,
    pub max_periods_week: u32,
    #[serde(default)]
    pub availability: Availability,
}

impl Teacher {
    pub fn is_available(&self, day: u8, period: u32) -> bool {
        self.availability.is_available(day, period)
    }

    pub fn is_competent_in(&self, subject: SubjectId) -> bool {
        self.competencies.contains(&subject)
    }
}
