use std::collections::HashSet;

use crate::error::PlannerError;
use crate::grid::{Cell, Grid};

/// `{id: integer (unique), start: Cell, goal: Cell}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    pub id: u32,
    pub start: Cell,
    pub goal: Cell,
}

/// Ordered list of agents with unique ids.
#[derive(Debug, Clone)]
pub struct AgentSet {
    agents: Vec<Agent>,
}

impl AgentSet {
    /// Requires a non-empty list of agents with pairwise-distinct ids.
    pub fn new(agents: Vec<Agent>) -> Result<Self, PlannerError> {
        if agents.is_empty() {
            return Err(PlannerError::InvalidInput(
                "at least one agent is required".into(),
            ));
        }
        let mut seen = HashSet::with_capacity(agents.len());
        for a in &agents {
            if !seen.insert(a.id) {
                return Err(PlannerError::InvalidInput(format!(
                    "duplicate agent id {}",
                    a.id
                )));
            }
        }
        Ok(AgentSet { agents })
    }

    /// Every start and goal must be in bounds and not on an obstacle.
    pub fn validate_against(&self, grid: &Grid) -> Result<(), PlannerError> {
        for a in &self.agents {
            for (label, cell) in [("start", a.start), ("goal", a.goal)] {
                if !grid.in_bounds(cell) {
                    return Err(PlannerError::InvalidInput(format!(
                        "agent {} {label} {cell} is out of bounds",
                        a.id
                    )));
                }
                if grid.is_obstacle(cell) {
                    return Err(PlannerError::InvalidInput(format!(
                        "agent {} {label} {cell} is on an obstacle",
                        a.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }
}
