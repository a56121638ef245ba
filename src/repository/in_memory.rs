use super::Repository;
use crate::error::{Result, SchedulerError};
use crate::types::{
    Allocation, ClassGroup, ConflictReport, Room, RoomId, SchoolConfig, Subject, Teacher,
    TimeSlot, TimeSlotId, TimetableEntry, TimetableEntryId,
};

/// A plain in-memory `Repository`, used by the test suite to exercise the
/// trait boundary without touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    pub config: SchoolConfig,
    pub timeslots: Vec<TimeSlot>,
    pub classgroups: Vec<ClassGroup>,
    pub teachers: Vec<Teacher>,
    pub rooms: Vec<Room>,
    pub subjects: Vec<Subject>,
    pub allocations: Vec<Allocation>,
    pub timetable_entries: Vec<TimetableEntry>,
    pub conflict_reports: Vec<ConflictReport>,
}

impl InMemoryRepository {
    pub fn new(config: SchoolConfig) -> Self {
        InMemoryRepository {
            config,
            ..Default::default()
        }
    }
}

impl Repository for InMemoryRepository {
    fn config(&self) -> Result<SchoolConfig> {
        Ok(self.config)
    }

    fn list_timeslots(&self) -> Result<Vec<TimeSlot>> {
        let mut slots = self.timeslots.clone();
        slots.sort_by_key(|s| s.key());
        Ok(slots)
    }

    fn list_classgroups(&self) -> Result<Vec<ClassGroup>> {
        let mut v = self.classgroups.clone();
        v.sort_by_key(|c| c.id);
        Ok(v)
    }

    fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let mut v = self.teachers.clone();
        v.sort_by_key(|t| t.id);
        Ok(v)
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        let mut v = self.rooms.clone();
        v.sort_by_key(|r| r.id);
        Ok(v)
    }

    fn list_subjects(&self) -> Result<Vec<Subject>> {
        let mut v = self.subjects.clone();
        v.sort_by_key(|s| s.id);
        Ok(v)
    }

    fn list_allocations(&self) -> Result<Vec<Allocation>> {
        let mut v = self.allocations.clone();
        v.sort_by_key(|a| a.id);
        Ok(v)
    }

    fn list_timetable_entries(&self) -> Result<Vec<TimetableEntry>> {
        let mut v = self.timetable_entries.clone();
        v.sort_by_key(|e| e.id);
        Ok(v)
    }

    fn list_conflict_reports(&self) -> Result<Vec<ConflictReport>> {
        Ok(self.conflict_reports.clone())
    }

    fn replace_timeslots(&mut self, new_slots: Vec<TimeSlot>) -> Result<()> {
        self.timeslots = new_slots;
        Ok(())
    }

    fn replace_nonlocked_entries(&mut self, new_entries: Vec<TimetableEntry>) -> Result<()> {
        self.timetable_entries.retain(|e| e.is_locked);
        self.timetable_entries.extend(new_entries);
        Ok(())
    }

    fn replace_conflict_reports(&mut self, reports: Vec<ConflictReport>) -> Result<()> {
        self.conflict_reports = reports;
        Ok(())
    }

    fn get_timetable_entry(&self, id: TimetableEntryId) -> Result<Option<TimetableEntry>> {
        Ok(self.timetable_entries.iter().find(|e| e.id == id).copied())
    }

    fn update_timetable_entry(
        &mut self,
        id: TimetableEntryId,
        new_slot: TimeSlotId,
        new_room: Option<RoomId>,
    ) -> Result<()> {
        let entry = self
            .timetable_entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| SchedulerError::UnknownEntry(id.to_string()))?;
        entry.time_slot_id = new_slot;
        if let Some(room) = new_room {
            entry.room_id = room;
        }
        Ok(())
    }
}
