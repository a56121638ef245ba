use thiserror::Error;

/// Domain-specific errors for the timetable solver.
#[derive(Error, Debug)]
pub enum SchedulerError {
    // Input/storage errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Storage operation failed: {0}")]
    StorageError(String),

    // Precondition / solve-start errors
    #[error("Cannot generate a timetable: {0}")]
    PreconditionMissing(String),

    // Solver terminal statuses that are not a usable solution
    #[error("No feasible timetable exists for the current input")]
    ModelInfeasible,

    #[error("Solver did not reach a decision within the time limit")]
    ModelUndecided,

    #[error("Solver reported the model as invalid: {0}")]
    ModelInvalid(String),

    #[error("ILP solver failed: {0}")]
    SolverFailed(String),

    // Manual edit validation
    #[error("Edit rejected: {0}")]
    EditRejected(String),

    #[error("Timetable entry '{0}' does not exist")]
    UnknownEntry(String),

    #[error("Duplicate ID found: {id_type} '{id}'")]
    DuplicateId { id_type: String, id: String },
}

/// Use anyhow::Result at application boundaries.
pub type Result<T> = anyhow::Result<T>;
