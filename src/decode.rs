use std::collections::HashMap;

use crate::agent::AgentSet;
use crate::alloc::VarAllocator;
use crate::error::PlannerError;
use crate::grid::Cell;

/// Mapping from agent id to its sequence of cells, index `t` giving the
/// agent's cell at time `t`. Every vector has length exactly `T+1`.
#[derive(Debug, Clone)]
pub struct Schedule {
    paths: HashMap<u32, Vec<Cell>>,
}

impl Schedule {
    pub fn path(&self, agent_id: u32) -> Option<&[Cell]> {
        self.paths.get(&agent_id).map(Vec::as_slice)
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.paths.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Cell])> {
        self.paths.iter().map(|(&id, path)| (id, path.as_slice()))
    }
}

/// Inverts a satisfying model into a per-agent schedule.
///
/// Positive literals with no `(agent, cell, time)` meaning (auxiliary
/// cardinality-encoding variables) are silently ignored; only a *missing*
/// per-(agent,time) slot after all positives are consumed is a bug.
pub fn decode(
    model: &[isize],
    alloc: &VarAllocator,
    agents: &AgentSet,
    horizon: u32,
) -> Result<Schedule, PlannerError> {
    let mut paths: HashMap<u32, Vec<Option<Cell>>> = agents
        .iter()
        .map(|a| (a.id, vec![None; horizon as usize + 1]))
        .collect();

    for &lit in model {
        if lit <= 0 {
            continue;
        }
        let var = crate::alloc::VarId::from_positive_literal(lit);
        if let Some((agent_id, cell, t)) = alloc.resolve(var) {
            if let Some(slots) = paths.get_mut(&agent_id) {
                slots[t as usize] = Some(cell);
            }
        }
    }

    let mut schedule = HashMap::with_capacity(paths.len());
    for (agent_id, slots) in paths {
        let mut resolved = Vec::with_capacity(slots.len());
        for (t, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(c) => resolved.push(c),
                None => {
                    return Err(PlannerError::InconsistentModel(format!(
                        "agent {agent_id} has no assigned cell at time {t}"
                    )));
                }
            }
        }
        schedule.insert(agent_id, resolved);
    }

    Ok(Schedule { paths: schedule })
}
