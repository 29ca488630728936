//! The planner: owns a grid, an agent set, a horizon, and (while solving) a
//! variable allocator, formula buffer and solver handle. Single-threaded
//! and synchronous: one caller, no shared state, the solver handle is
//! scoped to a single `plan` call on every exit path.

use crate::agent::AgentSet;
use crate::alloc::VarAllocator;
use crate::cardinality::Encoding;
use crate::decode::{self, Schedule};
use crate::encode;
use crate::error::PlannerError;
use crate::grid::Grid;
use crate::solver::{SatSolver, SolveOutcome, VarisatSolver};

/// Above this pairwise-clause estimate, `Planner::plan` logs a suggestion
/// to switch to `Encoding::SequentialCounter`.
const PAIRWISE_CLAUSE_WARN_THRESHOLD: u64 = 2_000_000;

/// Result of a successful `plan` call: either a schedule or the normal
/// "no solution at this horizon" outcome (not an error).
#[derive(Debug, Clone)]
pub enum PlanOutcome {
    Solved(Schedule),
    NoSolution,
}

pub struct Planner {
    grid: Grid,
    agents: AgentSet,
    horizon: u32,
    encoding: Encoding,
}

impl Planner {
    /// Validates every agent's start/goal against the grid; the planner is
    /// unusable if this fails.
    pub fn new(grid: Grid, agents: AgentSet, horizon: u32) -> Result<Self, PlannerError> {
        agents.validate_against(&grid)?;
        Ok(Planner {
            grid,
            agents,
            horizon,
            encoding: Encoding::default(),
        })
    }

    /// Opts into the O(n) sequential-counter cardinality encoding for F4
    /// and F6a instead of the canonical pairwise one.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    fn estimated_pairwise_clauses(&self) -> u64 {
        let cells = self.grid.num_cells() as u64;
        let agents = self.agents.len() as u64;
        let times = self.horizon as u64 + 1;
        // F4 at-most-one: C(cells,2) per (agent,time). F6a at-most-one:
        // C(agents,2) per (cell,time). Rough order-of-magnitude only.
        let f4 = agents * times * cells * cells / 2;
        let f6a = cells * times * agents * agents / 2;
        f4 + f6a
    }

    /// Builds the formula, hands it to the solver, and decodes the result.
    pub fn plan(&self) -> Result<PlanOutcome, PlannerError> {
        self.plan_with(&mut VarisatSolver::default())
    }

    /// Same as `plan`, but against a caller-supplied solver adapter: the
    /// seam that lets tests exercise `DimacsTextSolver` or a mock without
    /// touching `VarisatSolver`.
    pub fn plan_with(&self, solver: &mut dyn SatSolver) -> Result<PlanOutcome, PlannerError> {
        if self.encoding == Encoding::Pairwise {
            let estimate = self.estimated_pairwise_clauses();
            if estimate > PAIRWISE_CLAUSE_WARN_THRESHOLD {
                log::warn!(
                    "pairwise encoding estimated at ~{estimate} clauses for {} agents, \
                     {}x{} grid, horizon {}; consider Encoding::SequentialCounter",
                    self.agents.len(),
                    self.grid.width(),
                    self.grid.height(),
                    self.horizon
                );
            }
        }

        let mut alloc = VarAllocator::new();
        let formula = encode::build(&self.grid, &self.agents, self.horizon, self.encoding, &mut alloc);
        log::debug!(
            "encoded {} agents over horizon {} into {} variables, {} clauses",
            self.agents.len(),
            self.horizon,
            alloc.num_vars(),
            formula.len()
        );

        let started = std::time::Instant::now();
        let outcome = solver.solve(&formula)?;
        let elapsed = started.elapsed();

        match outcome {
            SolveOutcome::Unsat => {
                log::info!("no schedule exists within horizon {} ({elapsed:?})", self.horizon);
                Ok(PlanOutcome::NoSolution)
            }
            SolveOutcome::Sat(model) => {
                let schedule = decode::decode(&model, &alloc, &self.agents, self.horizon)?;
                log::info!(
                    "found a schedule for {} agents within horizon {} ({elapsed:?})",
                    self.agents.len(),
                    self.horizon
                );
                Ok(PlanOutcome::Solved(schedule))
            }
        }
    }

    /// Optional DIMACS serialization of the generated formula, for
    /// debugging or alternative solver backends.
    pub fn to_dimacs(&self) -> String {
        let mut alloc = VarAllocator::new();
        let formula = encode::build(&self.grid, &self.agents, self.horizon, self.encoding, &mut alloc);
        formula.to_dimacs(alloc.num_vars())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agents(&self) -> &AgentSet {
        &self.agents
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }
}

/// The language-neutral entry point:
/// `plan(W, H, agents, obstacles, T) -> schedule | NoSolution`.
pub fn plan(grid: Grid, agents: AgentSet, horizon: u32) -> Result<PlanOutcome, PlannerError> {
    Planner::new(grid, agents, horizon)?.plan()
}
