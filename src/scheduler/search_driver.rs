use crate::error::{Result, SchedulerError};
use crate::repository::Repository;
use crate::scheduler::backend::{resolved, ConstraintSolver, HighsSolver, SolverStatus};
use crate::scheduler::candidate_enumerator::enumerate_candidates;
use crate::scheduler::conflict_reporter::generate_reports;
use crate::scheduler::model_builder::build_model;
use crate::scheduler::time_slot_generator::generate_slots;
use crate::types::{TimetableEntry, TimetableEntryId};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Default wall-clock budget for `solve`.
pub const DEFAULT_TIME_LIMIT_SECONDS: u64 = 180;
/// Default parallel worker count; clamped down to the host's available
/// hardware threads if lower.
pub const DEFAULT_WORKERS: usize = 8;

/// Result of a `generate` call.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub status: SolverStatus,
    pub entries_written: usize,
    pub solve_time_ms: u64,
}

/// Runs §4.4: build candidates and constraints, solve under a time budget,
/// and either persist the winning assignments or hand off to the Conflict
/// Reporter. Returns `Err` only for a precondition failure or a model bug
/// (`MODEL_INVALID`); a solver `INFEASIBLE`/`UNKNOWN` result is a normal,
/// successful return with `status` set accordingly and no entries written.
pub fn generate(repo: &mut dyn Repository, time_limit_seconds: u64) -> Result<GenerateOutcome> {
    generate_with_progress(repo, time_limit_seconds, false)
}

pub fn generate_with_progress(
    repo: &mut dyn Repository,
    time_limit_seconds: u64,
    quiet: bool,
) -> Result<GenerateOutcome> {
    let start = Instant::now();
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    progress.set_message("Loading repository...");
    progress.set_position(5);
    let config = repo.config()?;
    let mut timeslots = repo.list_timeslots()?;
    let classes = repo.list_classgroups()?;
    let teachers = repo.list_teachers()?;
    let rooms = repo.list_rooms()?;
    let subjects = repo.list_subjects()?;
    let allocations = repo.list_allocations()?;

    if timeslots.is_empty() {
        progress.set_message("Generating time slots...");
        timeslots = generate_slots(&config);
        repo.replace_timeslots(timeslots.clone())?;
    }

    if timeslots.is_empty() {
        return Err(SchedulerError::PreconditionMissing(
            "no time slots are available and none could be generated".into(),
        )
        .into());
    }
    if allocations.is_empty() {
        return Err(SchedulerError::PreconditionMissing("no allocations exist".into()).into());
    }
    if rooms.is_empty() {
        return Err(SchedulerError::PreconditionMissing("no rooms exist".into()).into());
    }

    let existing_entries = repo.list_timetable_entries()?;
    let locked_entries: Vec<TimetableEntry> =
        existing_entries.into_iter().filter(|e| e.is_locked).collect();

    progress.set_message("Enumerating candidates...");
    progress.set_position(20);
    let enum_result = enumerate_candidates(
        &allocations,
        &classes,
        &subjects,
        &teachers,
        &rooms,
        &timeslots,
        &locked_entries,
    );

    progress.set_message("Building constraint model...");
    progress.set_position(40);
    let model = build_model(&config, &allocations, &subjects, &teachers, &enum_result, &timeslots);

    progress.set_message("Solving...");
    progress.set_position(60);
    let workers = DEFAULT_WORKERS.min(std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1));
    let solver = HighsSolver;
    let (status, values) = solver.solve(
        model.vars,
        model.objective,
        model.constraints,
        &model.candidate_vars,
        time_limit_seconds,
        workers,
    )?;

    if status == SolverStatus::ModelInvalid {
        return Err(SchedulerError::ModelInvalid("the solver rejected the emitted model".into()).into());
    }

    progress.set_message("Finalizing...");
    progress.set_position(90);

    // Reporter runs on non-success, and additionally whenever enumeration
    // already flagged structurally infeasible allocations, even if the
    // solve that followed still reached a success status. On a clean
    // success it does not run at all: e.g. a silent room-type fallback is
    // not an error and must produce no report.
    if !status.is_success() || !enum_result.structurally_infeasible.is_empty() {
        let reports = generate_reports(
            status,
            &enum_result,
            &allocations,
            &subjects,
            &teachers,
            &classes,
            &rooms,
            &timeslots,
        );
        repo.replace_conflict_reports(reports)?;
    }

    let mut entries_written = 0;
    if status.is_success() {
        let mut next_id = locked_entries.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        let mut new_entries = Vec::new();
        for (i, var) in model.candidate_vars.iter().enumerate() {
            if resolved(&values, *var) {
                let c = &enum_result.candidates[i];
                new_entries.push(TimetableEntry {
                    id: TimetableEntryId(next_id),
                    teacher_id: c.teacher_id,
                    class_id: c.class_id,
                    subject_id: c.subject_id,
                    room_id: c.room_id,
                    time_slot_id: c.slot_id,
                    is_locked: false,
                });
                next_id += 1;
            }
        }
        entries_written = new_entries.len();
        repo.replace_nonlocked_entries(new_entries)?;
        progress.finish_with_message("Timetable generated");
    } else {
        progress.finish_with_message("No timetable produced; see conflict reports");
    }

    Ok(GenerateOutcome {
        status,
        entries_written,
        solve_time_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::types::{
        Allocation, AllocationId, ClassGroup, ClassId, Difficulty, Room, RoomId, RoomType,
        SchoolConfig, Subject, SubjectId, SubjectKind, Teacher, TeacherId,
    };
    use std::collections::BTreeSet;

    fn trivial_repo() -> InMemoryRepository {
        let config = SchoolConfig {
            days_per_week: 5,
            lesson_start_minutes: 480,
            lesson_duration_min: 45,
            periods_before_break: 4,
            break_duration_min: 10,
            periods_after_break: 0,
            lunch_duration_min: 0,
        };
        let mut repo = InMemoryRepository::new(config);
        let class = ClassGroup {
            id: ClassId(1),
            name: "9A".into(),
            student_count: 30,
            required_subjects: BTreeSet::new(),
        };
        let subject = Subject {
            id: SubjectId(1),
            name: "Math".into(),
            weekly_periods: 2,
            kind: SubjectKind::Theory,
            difficulty: Difficulty::Easy,
            required_room_type: RoomType::Classroom,
            requires_consecutive_periods: false,
        };
        let mut competencies = BTreeSet::new();
        competencies.insert(subject.id);
        let teacher = Teacher {
            id: TeacherId(1),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            competencies,
            max_periods_week: 20,
            availability: Default::default(),
        };
        let room = Room {
            id: RoomId(1),
            name: "R1".into(),
            room_type: RoomType::Classroom,
            capacity: 40,
            availability: Default::default(),
        };
        let allocation = Allocation {
            id: AllocationId(1),
            class_id: class.id,
            subject_id: subject.id,
            teacher_id: teacher.id,
        };
        repo.classgroups.push(class);
        repo.subjects.push(subject);
        repo.teachers.push(teacher);
        repo.rooms.push(room);
        repo.allocations.push(allocation);
        repo
    }

    #[test]
    fn rejects_generation_with_no_allocations() {
        let mut repo = trivial_repo();
        repo.allocations.clear();
        let err = generate_with_progress(&mut repo, 5, true).unwrap_err();
        assert!(err.to_string().contains("allocations"));
    }

    #[test]
    fn a_silent_room_type_fallback_on_success_produces_no_conflict_reports() {
        let mut repo = trivial_repo();
        repo.subjects[0].required_room_type = RoomType::Lab;
        let outcome = generate_with_progress(&mut repo, 5, true).unwrap();
        assert!(outcome.status.is_success());
        assert_eq!(outcome.entries_written, 2);
        assert!(repo.list_conflict_reports().unwrap().is_empty());
    }
}
