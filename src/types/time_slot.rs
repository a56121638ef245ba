use super::TimeSlotId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub day_index: u8,
    pub period_index: u32,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl TimeSlot {
    pub fn key(&self) -> (u8, u32) {
        (self.day_index, self.period_index)
    }
}
