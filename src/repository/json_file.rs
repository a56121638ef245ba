use super::Repository;
use crate::error::{Result, SchedulerError};
use crate::types::{
    Allocation, ClassGroup, ConflictReport, Room, RoomId, SchoolConfig, Subject, Teacher,
    TimeSlot, TimeSlotId, TimetableEntry, TimetableEntryId,
};
use std::fs;
use std::path::{Path, PathBuf};

/// A `Repository` backed by a directory of JSON files, one per entity kind,
/// plus a `config.toml`. This is a convenience implementation: the rest of
/// the crate depends only on the `Repository` trait, never on JSON or any
/// particular on-disk layout.
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        JsonFileRepository { dir: dir.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn load_json<T: serde::de::DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        let path = self.path(name);
        if !path.exists() {
            return Ok(T::default());
        }
        read_json(&path)
    }

    fn save_json<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SchedulerError::StorageError(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| SchedulerError::StorageError(e.to_string()))?;
        fs::write(&path, content).map_err(|e| SchedulerError::StorageError(e.to_string()))?;
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;
    serde_json::from_str(&content)
        .map_err(|e| {
            SchedulerError::JsonParse {
                file: path_str,
                message: e.to_string(),
            }
            .into()
        })
}

impl Repository for JsonFileRepository {
    fn config(&self) -> Result<SchoolConfig> {
        let path = self.path("config.toml");
        if !path.exists() {
            return Ok(SchoolConfig::default());
        }
        let content =
            fs::read_to_string(&path).map_err(|e| SchedulerError::FileRead {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(toml::from_str(&content).unwrap_or_default())
    }

    fn list_timeslots(&self) -> Result<Vec<TimeSlot>> {
        let mut slots: Vec<TimeSlot> = self.load_json("timeslots.json")?;
        slots.sort_by_key(|s| s.key());
        Ok(slots)
    }

    fn list_classgroups(&self) -> Result<Vec<ClassGroup>> {
        let mut v: Vec<ClassGroup> = self.load_json("classes.json")?;
        v.sort_by_key(|c| c.id);
        Ok(v)
    }

    fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let mut v: Vec<Teacher> = self.load_json("teachers.json")?;
        v.sort_by_key(|t| t.id);
        Ok(v)
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        let mut v: Vec<Room> = self.load_json("rooms.json")?;
        v.sort_by_key(|r| r.id);
        Ok(v)
    }

    fn list_subjects(&self) -> Result<Vec<Subject>> {
        let mut v: Vec<Subject> = self.load_json("subjects.json")?;
        v.sort_by_key(|s| s.id);
        Ok(v)
    }

    fn list_allocations(&self) -> Result<Vec<Allocation>> {
        let mut v: Vec<Allocation> = self.load_json("allocations.json")?;
        v.sort_by_key(|a| a.id);
        Ok(v)
    }

    fn list_timetable_entries(&self) -> Result<Vec<TimetableEntry>> {
        let mut v: Vec<TimetableEntry> = self.load_json("timetable_entries.json")?;
        v.sort_by_key(|e| e.id);
        Ok(v)
    }

    fn list_conflict_reports(&self) -> Result<Vec<ConflictReport>> {
        self.load_json("conflict_reports.json")
    }

    fn replace_timeslots(&mut self, new_slots: Vec<TimeSlot>) -> Result<()> {
        self.save_json("timeslots.json", &new_slots)
    }

    fn replace_nonlocked_entries(&mut self, new_entries: Vec<TimetableEntry>) -> Result<()> {
        let mut entries = self.list_timetable_entries()?;
        entries.retain(|e| e.is_locked);
        entries.extend(new_entries);
        self.save_json("timetable_entries.json", &entries)
    }

    fn replace_conflict_reports(&mut self, reports: Vec<ConflictReport>) -> Result<()> {
        self.save_json("conflict_reports.json", &reports)
    }

    fn get_timetable_entry(&self, id: TimetableEntryId) -> Result<Option<TimetableEntry>> {
        Ok(self
            .list_timetable_entries()?
            .into_iter()
            .find(|e| e.id == id))
    }

    fn update_timetable_entry(
        &mut self,
        id: TimetableEntryId,
        new_slot: TimeSlotId,
        new_room: Option<RoomId>,
    ) -> Result<()> {
        let mut entries = self.list_timetable_entries()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| SchedulerError::UnknownEntry(id.to_string()))?;
        entry.time_slot_id = new_slot;
        if let Some(room) = new_room {
            entry.room_id = room;
        }
        self.save_json("timetable_entries.json", &entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoomType, TimeSlotId};

    #[test]
    fn round_trips_timeslots_through_the_directory() {
        let dir = std::env::temp_dir().join(format!(
            "school-scheduler-test-{}",
            std::process::id()
        ));
        let mut repo = JsonFileRepository::open(&dir);
        let slots = vec![TimeSlot {
            id: TimeSlotId(1),
            day_index: 0,
            period_index: 0,
            start_minutes: 480,
            end_minutes: 525,
        }];
        repo.replace_timeslots(slots.clone()).unwrap();
        assert_eq!(repo.list_timeslots().unwrap(), slots);
        let _ = RoomType::Classroom;
        let _ = fs::remove_dir_all(&dir);
    }
}
