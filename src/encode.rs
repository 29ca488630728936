//! The clause builder: the six constraint families that together encode a
//! bounded MAPF instance as CNF.
//!
//! Construction order (F1 → F6b) is fixed for inspectability only; no
//! family depends on another's clauses being contiguous in the formula.

use itertools::Itertools;

use crate::agent::AgentSet;
use crate::alloc::VarAllocator;
use crate::cardinality::{self, Encoding};
use crate::formula::Formula;
use crate::grid::{Cell, Grid};

/// Builds the full formula for one planner instance: F1 through F6b.
pub fn build(
    grid: &Grid,
    agents: &AgentSet,
    horizon: u32,
    encoding: Encoding,
    alloc: &mut VarAllocator,
) -> Formula {
    let mut formula = Formula::new();
    let cells: Vec<Cell> = grid.cells().collect();

    f1_initial_placement(agents, alloc, &cells, &mut formula);
    f2_goal_placement(agents, horizon, alloc, &cells, &mut formula);
    f3_obstacle_exclusion(grid, agents, horizon, alloc, &mut formula);
    f4_exactly_one_position(agents, horizon, encoding, alloc, &cells, &mut formula);
    f5_kinematic_continuity(grid, agents, horizon, alloc, &cells, &mut formula);
    f6a_vertex_noncollision(agents, horizon, encoding, alloc, &cells, &mut formula);
    f6b_edge_noncollision(grid, agents, horizon, alloc, &mut formula);

    formula
}

/// F1. Initial placement: pin every agent to its start cell at t=0.
fn f1_initial_placement(
    agents: &AgentSet,
    alloc: &mut VarAllocator,
    cells: &[Cell],
    formula: &mut Formula,
) {
    for a in agents.iter() {
        formula.push(vec![alloc.alloc(a.id, a.start, 0).pos()]);
        for &c in cells {
            if c != a.start {
                formula.push(vec![alloc.alloc(a.id, c, 0).neg()]);
            }
        }
    }
}

/// F2. Goal placement: pin every agent to its goal cell at t=T.
fn f2_goal_placement(
    agents: &AgentSet,
    horizon: u32,
    alloc: &mut VarAllocator,
    cells: &[Cell],
    formula: &mut Formula,
) {
    for a in agents.iter() {
        formula.push(vec![alloc.alloc(a.id, a.goal, horizon).pos()]);
        for &c in cells {
            if c != a.goal {
                formula.push(vec![alloc.alloc(a.id, c, horizon).neg()]);
            }
        }
    }
}

/// F3. Obstacle exclusion: no agent may ever occupy an obstacle cell.
fn f3_obstacle_exclusion(
    grid: &Grid,
    agents: &AgentSet,
    horizon: u32,
    alloc: &mut VarAllocator,
    formula: &mut Formula,
) {
    for o in grid.obstacles() {
        for a in agents.iter() {
            for t in 0..=horizon {
                formula.push(vec![alloc.alloc(a.id, o, t).neg()]);
            }
        }
    }
}

/// F4. Exactly one position per agent per time: at-least-one over all
/// cells, plus at-most-one (encoding is a planner-level choice).
fn f4_exactly_one_position(
    agents: &AgentSet,
    horizon: u32,
    encoding: Encoding,
    alloc: &mut VarAllocator,
    cells: &[Cell],
    formula: &mut Formula,
) {
    for a in agents.iter() {
        for t in 0..=horizon {
            let vars: Vec<isize> = cells.iter().map(|&c| alloc.alloc(a.id, c, t).pos()).collect();
            formula.push(vars.clone());
            cardinality::at_most_one(&vars, encoding, alloc, formula);
        }
    }
}

/// F5. Kinematic continuity: being at `c` at `t` implies being at some
/// 4-neighbor-or-self at `t+1`.
fn f5_kinematic_continuity(
    grid: &Grid,
    agents: &AgentSet,
    horizon: u32,
    alloc: &mut VarAllocator,
    cells: &[Cell],
    formula: &mut Formula,
) {
    if horizon == 0 {
        return;
    }
    for a in agents.iter() {
        for t in 0..horizon {
            for &c in cells {
                let here = alloc.alloc(a.id, c, t).neg();
                let mut clause = vec![here];
                for n in grid.neighbors_with_stay(c) {
                    clause.push(alloc.alloc(a.id, n, t + 1).pos());
                }
                formula.push(clause);
            }
        }
    }
}

/// F6a. Vertex non-collision: at most one agent per cell per time.
fn f6a_vertex_noncollision(
    agents: &AgentSet,
    horizon: u32,
    encoding: Encoding,
    alloc: &mut VarAllocator,
    cells: &[Cell],
    formula: &mut Formula,
) {
    let ids: Vec<u32> = agents.iter().map(|a| a.id).collect();
    for t in 0..=horizon {
        for &c in cells {
            let vars: Vec<isize> = ids.iter().map(|&id| alloc.alloc(id, c, t).pos()).collect();
            cardinality::at_most_one(&vars, encoding, alloc, formula);
        }
    }
}

/// F6b. Edge non-collision: no pair of agents may swap cells across one
/// edge in a single step.
fn f6b_edge_noncollision(
    grid: &Grid,
    agents: &AgentSet,
    horizon: u32,
    alloc: &mut VarAllocator,
    formula: &mut Formula,
) {
    if horizon == 0 {
        return;
    }
    let agent_pairs: Vec<(u32, u32)> = agents
        .iter()
        .map(|a| a.id)
        .tuple_combinations()
        .collect();
    for t in 0..horizon {
        for c1 in grid.cells() {
            for c2 in grid.cardinal_neighbors(c1) {
                for &(a, b) in &agent_pairs {
                    let v_a_c1_t = alloc.alloc(a, c1, t).neg();
                    let v_b_c2_t = alloc.alloc(b, c2, t).neg();
                    let v_a_c2_t1 = alloc.alloc(a, c2, t + 1).neg();
                    let v_b_c1_t1 = alloc.alloc(b, c1, t + 1).neg();
                    formula.push(vec![v_a_c1_t, v_b_c2_t, v_a_c2_t1, v_b_c1_t1]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use crate::grid::Grid;
    use std::collections::HashSet;

    fn single_agent_grid() -> (Grid, AgentSet) {
        let grid = Grid::new(2, 2, HashSet::new()).unwrap();
        let agents = AgentSet::new(vec![Agent {
            id: 1,
            start: Cell::new(0, 0),
            goal: Cell::new(1, 1),
        }])
        .unwrap();
        (grid, agents)
    }

    #[test]
    fn f1_pins_start_and_forbids_other_cells_at_t0() {
        let (grid, agents) = single_agent_grid();
        let mut alloc = VarAllocator::new();
        let cells: Vec<Cell> = grid.cells().collect();
        let mut formula = Formula::new();
        f1_initial_placement(&agents, &mut alloc, &cells, &mut formula);
        // 1 unit clause for the start, 3 unit clauses forbidding the rest.
        assert_eq!(formula.len(), 4);
        assert!(formula.clauses().iter().any(|c| c.len() == 1 && c[0] > 0));
    }

    #[test]
    fn f3_forbids_obstacle_at_every_time() {
        let mut obstacles = HashSet::new();
        obstacles.insert(Cell::new(1, 0));
        let grid = Grid::new(2, 2, obstacles).unwrap();
        let agents = AgentSet::new(vec![Agent {
            id: 1,
            start: Cell::new(0, 0),
            goal: Cell::new(0, 1),
        }])
        .unwrap();
        let mut alloc = VarAllocator::new();
        let mut formula = Formula::new();
        f3_obstacle_exclusion(&grid, &agents, 3, &mut alloc, &mut formula);
        // One clause per (agent, time) pair: 1 agent * 4 time points.
        assert_eq!(formula.len(), 4);
        assert!(formula.clauses().iter().all(|c| c.len() == 1 && c[0] < 0));
    }

    #[test]
    fn f4_at_least_one_clause_covers_all_cells() {
        let (grid, agents) = single_agent_grid();
        let cells: Vec<Cell> = grid.cells().collect();
        let mut alloc = VarAllocator::new();
        let mut formula = Formula::new();
        f4_exactly_one_position(&agents, 0, Encoding::Pairwise, &mut alloc, &cells, &mut formula);
        let at_least_one = formula.clauses().iter().find(|c| c.len() == cells.len());
        assert!(at_least_one.is_some());
    }

    #[test]
    fn f6b_emits_quaternary_clauses_for_adjacent_cells() {
        let grid = Grid::new(2, 1, HashSet::new()).unwrap();
        let agents = AgentSet::new(vec![
            Agent {
                id: 1,
                start: Cell::new(0, 0),
                goal: Cell::new(1, 0),
            },
            Agent {
                id: 2,
                start: Cell::new(1, 0),
                goal: Cell::new(0, 0),
            },
        ])
        .unwrap();
        let mut alloc = VarAllocator::new();
        let mut formula = Formula::new();
        f6b_edge_noncollision(&grid, &agents, 1, &mut alloc, &mut formula);
        assert!(formula.clauses().iter().any(|c| c.len() == 4));
    }
}
