use super::{Availability, RoomId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Classroom,
    Lab,
    ComputerLab,
    Gym,
    ArtRoom,
    MusicRoom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub room_type: RoomType,
    pub capacity: u32,
    #[serde(default)]
    pub availability: Availability,
}

impl Room {
    pub fn is_available(&self, day: u8, period: u32) -> bool {
        self.availability.is_available(day, period)
    }
}
