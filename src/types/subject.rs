use super::{RoomType, SubjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Theory,
    Practical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Fair,
    Difficult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub weekly_periods: u32,
    pub kind: SubjectKind,
    pub difficulty: Difficulty,
    pub required_room_type: RoomType,
    pub requires_consecutive_periods: bool,
}

impl Subject {
    pub fn is_difficult(&self) -> bool {
        self.difficulty == Difficulty::Difficult
    }
}
