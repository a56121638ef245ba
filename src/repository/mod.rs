mod in_memory;
mod json_file;

pub use in_memory::InMemoryRepository;
pub use json_file::JsonFileRepository;

use crate::error::Result;
use crate::types::{
    Allocation, ClassGroup, ConflictReport, Room, SchoolConfig, Subject, Teacher, TimeSlot,
    TimetableEntry, TimetableEntryId, TimeSlotId, RoomId,
};

/// The core's only storage dependency. All list operations return
/// their entities in a stable, caller-independent order so that candidate
/// enumeration and constraint emission stay deterministic.
pub trait Repository {
    fn config(&self) -> Result<SchoolConfig>;

    /// Ordered by (day, period).
    fn list_timeslots(&self) -> Result<Vec<TimeSlot>>;
    fn list_classgroups(&self) -> Result<Vec<ClassGroup>>;
    fn list_teachers(&self) -> Result<Vec<Teacher>>;
    fn list_rooms(&self) -> Result<Vec<Room>>;
    fn list_subjects(&self) -> Result<Vec<Subject>>;
    fn list_allocations(&self) -> Result<Vec<Allocation>>;
    fn list_timetable_entries(&self) -> Result<Vec<TimetableEntry>>;
    fn list_conflict_reports(&self) -> Result<Vec<ConflictReport>>;

    /// Atomic delete-all + insert.
    fn replace_timeslots(&mut self, new_slots: Vec<TimeSlot>) -> Result<()>;

    /// Atomic: delete every entry with `is_locked == false`, then insert
    /// `new_entries`. Locked entries are left untouched.
    fn replace_nonlocked_entries(&mut self, new_entries: Vec<TimetableEntry>) -> Result<()>;

    /// Atomic delete-all + insert, in a transaction separate from
    /// `replace_nonlocked_entries`.
    fn replace_conflict_reports(&mut self, reports: Vec<ConflictReport>) -> Result<()>;

    fn get_timetable_entry(&self, id: TimetableEntryId) -> Result<Option<TimetableEntry>>;

    fn update_timetable_entry(
        &mut self,
        id: TimetableEntryId,
        new_slot: TimeSlotId,
        new_room: Option<RoomId>,
    ) -> Result<()>;
}
