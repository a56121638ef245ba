use crate::error::Result;
use good_lp::{Constraint, Expression, ProblemVariables, Solution, SolverModel, Variable};
use std::collections::HashMap;

/// The five terminal statuses a CP-SAT-class engine can report.
/// `good_lp`'s HiGHS binding does not distinguish a proven-optimal solve
/// from one cut off by the time limit with a solution already in hand, so
/// both are reported as `Optimal` here (see `DESIGN.md`, Open Question 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    ModelInvalid,
    Unknown,
}

impl SolverStatus {
    pub fn is_success(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

/// The engine-agnostic seam the core depends on (Design Notes §9: "the
/// backend is addressed through an interface so the rest of the core is
/// engine-agnostic"). `query_vars` are the variables the caller needs
/// values for after a successful solve.
pub trait ConstraintSolver {
    fn solve(
        &self,
        vars: ProblemVariables,
        objective: Expression,
        constraints: Vec<Constraint>,
        query_vars: &[Variable],
        time_limit_seconds: u64,
        workers: usize,
    ) -> Result<(SolverStatus, HashMap<Variable, f64>)>;
}

/// `good_lp` + HiGHS, the only backend shipped. Engine version: pinned via
/// `good_lp = { version = "1.14", features = ["highs"] }` in `Cargo.toml`
/// (Design Notes §9 requires documenting the engine version).
pub struct HighsSolver;

impl ConstraintSolver for HighsSolver {
    fn solve(
        &self,
        vars: ProblemVariables,
        objective: Expression,
        constraints: Vec<Constraint>,
        query_vars: &[Variable],
        time_limit_seconds: u64,
        workers: usize,
    ) -> Result<(SolverStatus, HashMap<Variable, f64>)> {
        let workers = workers.max(1);
        let mut problem = vars
            .minimise(objective)
            .using(good_lp::solvers::highs::highs)
            .set_option("time_limit", time_limit_seconds as f64)
            .set_option("random_seed", 0.0)
            .set_option("threads", workers as f64);

        for constraint in constraints {
            problem = problem.with(constraint);
        }

        match problem.solve() {
            Ok(solution) => {
                let values = query_vars
                    .iter()
                    .map(|&v| (v, solution.value(v)))
                    .collect();
                Ok((SolverStatus::Optimal, values))
            }
            Err(good_lp::ResolutionError::Infeasible) => {
                Ok((SolverStatus::Infeasible, HashMap::new()))
            }
            Err(_) => Ok((SolverStatus::Unknown, HashMap::new())),
        }
    }
}

/// A variable whose value could not be retrieved from the solution is
/// treated as 0, never as an error.
pub fn resolved(values: &HashMap<Variable, f64>, var: Variable) -> bool {
    values.get(&var).copied().unwrap_or(0.0) > 0.5
}
