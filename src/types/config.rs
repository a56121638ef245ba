use serde::{Deserialize, Serialize};

/// School-wide timetable configuration. Exactly one instance per deployment;
/// the core never reaches for it as global state, only as an explicit
/// argument (see Design Notes on "Global singletons").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchoolConfig {
    pub days_per_week: u8,
    pub lesson_start_minutes: u32,
    pub lesson_duration_min: u32,
    pub periods_before_break: u32,
    pub break_duration_min: u32,
    pub periods_after_break: u32,
    pub lunch_duration_min: u32,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        SchoolConfig {
            days_per_week: 5,
            lesson_start_minutes: 8 * 60,
            lesson_duration_min: 45,
            periods_before_break: 4,
            break_duration_min: 15,
            periods_after_break: 3,
            lunch_duration_min: 45,
        }
    }
}

impl SchoolConfig {
    pub fn periods_per_day(&self) -> u32 {
        self.periods_before_break + self.periods_after_break
    }

    pub fn total_slots(&self) -> u32 {
        self.days_per_week as u32 * self.periods_per_day()
    }
}
