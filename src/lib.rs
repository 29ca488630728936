//! Multi-agent path finding on a 4-connected rectangular grid, reduced to
//! propositional satisfiability.
//!
//! This crate is the SAT encoder and solution decoder: it translates the
//! kinematic, occupancy and non-collision constraints of a bounded MAPF
//! instance into a CNF formula whose satisfying assignments are in
//! bijection with collision-free schedules, and inverts a model back into
//! one. The CDCL solver itself, scenario generation, and visualization are
//! treated as external concerns.

pub mod agent;
pub mod alloc;
pub mod cardinality;
pub mod decode;
pub mod encode;
pub mod error;
pub mod formula;
pub mod grid;
pub mod planner;
pub mod scenario;
pub mod solver;
pub mod validate;

pub use agent::{Agent, AgentSet};
pub use cardinality::Encoding;
pub use decode::Schedule;
pub use error::PlannerError;
pub use grid::{Cell, Grid};
pub use planner::{plan, PlanOutcome, Planner};
