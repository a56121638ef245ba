mod allocation;
mod availability;
mod candidate;
mod class;
mod config;
mod conflict_report;
mod room;
mod subject;
mod teacher;
mod time_slot;
mod timetable_entry;

pub use allocation::*;
pub use availability::*;
pub use candidate::*;
pub use class::*;
pub use config::*;
pub use conflict_report::*;
pub use room::*;
pub use subject::*;
pub use teacher::*;
pub use time_slot::*;
pub use timetable_entry::*;

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(SubjectId);
id_newtype!(TeacherId);
id_newtype!(ClassId);
id_newtype!(RoomId);
id_newtype!(TimeSlotId);
id_newtype!(AllocationId);
id_newtype!(TimetableEntryId);
