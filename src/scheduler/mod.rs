pub mod backend;
pub mod candidate_enumerator;
pub mod conflict_reporter;
pub mod model_builder;
pub mod search_driver;
pub mod time_slot_generator;

pub use backend::{ConstraintSolver, HighsSolver, SolverStatus};
pub use candidate_enumerator::{enumerate_candidates, CandidateIndex, EnumerationResult};
pub use conflict_reporter::generate_reports;
pub use model_builder::{build_model, TimetableModel};
pub use search_driver::{generate, generate_with_progress, GenerateOutcome};
pub use time_slot_generator::generate_slots;
