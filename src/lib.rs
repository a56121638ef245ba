//! School Scheduler - constraint-based weekly timetable generator
//!
//! This library builds a weekly class timetable: an assignment of
//! (class, subject, teacher, room) tuples to discrete time slots that
//! satisfies a set of hard scheduling constraints and optimizes a weighted
//! sum of soft preferences, using Integer Linear Programming (MILP) as the
//! underlying solve engine.
//!
//! # Pipeline
//!
//! 1. **Repository**: reads the persisted domain entities.
//! 2. **Time-Slot Generator**: derives the weekly slot grid if none exists.
//! 3. **Candidate Enumerator**: produces feasible decision-variable tuples.
//! 4. **Constraint Model Builder**: emits hard constraints and a soft
//!    objective into a `good_lp` model.
//! 5. **Search Driver**: solves under a time budget and persists the result,
//!    or hands off to the Conflict Reporter.
//!
//! # Example
//!
//! ```no_run
//! use school_scheduler::repository::JsonFileRepository;
//! use school_scheduler::scheduler::generate;
//! use std::path::Path;
//!
//! let mut repo = JsonFileRepository::open(Path::new("./data/demo"));
//! let outcome = generate(&mut repo, 180).unwrap();
//! println!("{:?}", outcome.status);
//! ```

pub mod error;
pub mod repository;
pub mod reporter;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{Result, SchedulerError};
