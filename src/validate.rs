//! A separate validator: the decoder does not re-verify containment,
//! step-validity or collision-freedom, so the test suite (and any caller
//! that wants a second opinion) uses this instead.

use std::collections::HashMap;

use crate::agent::AgentSet;
use crate::decode::Schedule;
use crate::grid::{Cell, Grid};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Violation {
    #[error("agent {agent} does not start at its start cell")]
    WrongStart { agent: u32 },
    #[error("agent {agent} does not end at its goal cell")]
    WrongGoal { agent: u32 },
    #[error("agent {agent} at time {t} occupies an out-of-bounds or obstacle cell")]
    Containment { agent: u32, t: usize },
    #[error("agent {agent} makes an illegal step at time {t}")]
    IllegalStep { agent: u32, t: usize },
    #[error("agents {a} and {b} collide at cell at time {t}")]
    VertexCollision { a: u32, b: u32, t: usize },
    #[error("agents {a} and {b} swap across an edge at time {t}")]
    EdgeCollision { a: u32, b: u32, t: usize },
}

/// Checks start/goal correctness, containment, step validity, and
/// vertex/edge collision-freedom against a decoded schedule. Returns every
/// violation found rather than failing fast, which is more useful for
/// property-test shrinking and for debugging a broken encoder.
pub fn check_schedule(grid: &Grid, agents: &AgentSet, schedule: &Schedule) -> Vec<Violation> {
    let mut violations = Vec::new();

    for a in agents.iter() {
        let Some(path) = schedule.path(a.id) else {
            continue;
        };

        if path.first() != Some(&a.start) {
            violations.push(Violation::WrongStart { agent: a.id });
        }
        if path.last() != Some(&a.goal) {
            violations.push(Violation::WrongGoal { agent: a.id });
        }

        for (t, &cell) in path.iter().enumerate() {
            if !grid.in_bounds(cell) || grid.is_obstacle(cell) {
                violations.push(Violation::Containment { agent: a.id, t });
            }
        }

        for t in 0..path.len().saturating_sub(1) {
            let (c1, c2) = (path[t], path[t + 1]);
            let manhattan = c1.x.abs_diff(c2.x) as u32 + c1.y.abs_diff(c2.y) as u32;
            if manhattan > 1 {
                violations.push(Violation::IllegalStep { agent: a.id, t });
            }
        }
    }

    let paths: HashMap<u32, &[Cell]> = agents
        .iter()
        .filter_map(|a| schedule.path(a.id).map(|p| (a.id, p)))
        .collect();

    for (&a_id, a_path) in &paths {
        for (&b_id, b_path) in &paths {
            if a_id >= b_id {
                continue;
            }
            let len = a_path.len().min(b_path.len());
            for t in 0..len {
                if a_path[t] == b_path[t] {
                    violations.push(Violation::VertexCollision {
                        a: a_id,
                        b: b_id,
                        t,
                    });
                }
            }
            for t in 0..len.saturating_sub(1) {
                if a_path[t] == b_path[t + 1] && b_path[t] == a_path[t + 1] && a_path[t] != b_path[t] {
                    violations.push(Violation::EdgeCollision {
                        a: a_id,
                        b: b_id,
                        t,
                    });
                }
            }
        }
    }

    violations
}
