//! Property tests: start/goal/containment/step/collision invariants hold on
//! every solved schedule, and UNSAT soundness is verified by exhaustive
//! enumeration on grids small enough to brute-force.

use std::collections::HashSet;

use mapf_sat::validate::check_schedule;
use mapf_sat::{Agent, AgentSet, Cell, Grid, PlanOutcome, Planner};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every cell reachable from `start` to `goal` in exactly `horizon` steps,
/// respecting bounds/obstacles (stay is always a legal "step").
fn enumerate_paths(grid: &Grid, start: Cell, goal: Cell, horizon: u32) -> Vec<Vec<Cell>> {
    fn recurse(grid: &Grid, goal: Cell, remaining: u32, path: &mut Vec<Cell>, out: &mut Vec<Vec<Cell>>) {
        if remaining == 0 {
            if *path.last().unwrap() == goal {
                out.push(path.clone());
            }
            return;
        }
        let current = *path.last().unwrap();
        for next in grid.neighbors_with_stay(current) {
            if grid.is_obstacle(next) {
                continue;
            }
            path.push(next);
            recurse(grid, goal, remaining - 1, path, out);
            path.pop();
        }
    }

    let mut out = Vec::new();
    if grid.is_obstacle(start) || grid.is_obstacle(goal) {
        return out;
    }
    let mut path = vec![start];
    recurse(grid, goal, horizon, &mut path, &mut out);
    out
}

fn vertex_disjoint(paths: &[&Vec<Cell>]) -> bool {
    let len = paths[0].len();
    for t in 0..len {
        let mut seen = HashSet::new();
        for p in paths {
            if !seen.insert(p[t]) {
                return false;
            }
        }
    }
    true
}

fn edge_disjoint(paths: &[&Vec<Cell>]) -> bool {
    let len = paths[0].len();
    for t in 0..len.saturating_sub(1) {
        for i in 0..paths.len() {
            for j in (i + 1)..paths.len() {
                let (a, b) = (paths[i], paths[j]);
                if a[t] == b[t + 1] && b[t] == a[t + 1] && a[t] != b[t] {
                    return false;
                }
            }
        }
    }
    true
}

/// Exhaustively checks whether any joint assignment of per-agent candidate
/// paths is both vertex-disjoint and edge-disjoint.
fn any_collision_free_combination(candidates: &[Vec<Vec<Cell>>]) -> bool {
    fn recurse(candidates: &[Vec<Vec<Cell>>], idx: usize, chosen: &mut Vec<Vec<Cell>>) -> bool {
        if idx == candidates.len() {
            let refs: Vec<&Vec<Cell>> = chosen.iter().collect();
            return vertex_disjoint(&refs) && edge_disjoint(&refs);
        }
        for candidate in &candidates[idx] {
            chosen.push(candidate.clone());
            if recurse(candidates, idx + 1, chosen) {
                chosen.pop();
                return true;
            }
            chosen.pop();
        }
        false
    }

    if candidates.iter().any(Vec::is_empty) {
        return false;
    }
    let mut chosen = Vec::new();
    recurse(candidates, 0, &mut chosen)
}

struct RandomInstance {
    grid: Grid,
    agents: AgentSet,
    horizon: u32,
}

fn random_instance(rng: &mut StdRng) -> Option<RandomInstance> {
    let width = rng.random_range(1..=2);
    let height = rng.random_range(1..=2);
    let num_cells = width as usize * height as usize;
    if num_cells < 2 {
        return None;
    }

    let all_cells: Vec<Cell> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Cell::new(x, y)))
        .collect();

    // Obstruct at most one cell, leaving room for at least two agents.
    let mut obstacles = HashSet::new();
    if num_cells > 2 && rng.random_bool(0.3) {
        let idx = rng.random_range(0..all_cells.len());
        obstacles.insert(all_cells[idx]);
    }
    let grid = Grid::new(width, height, obstacles).ok()?;

    let free: Vec<Cell> = grid.cells().filter(|&c| !grid.is_obstacle(c)).collect();
    if free.len() < 2 {
        return None;
    }

    let num_agents = rng.random_range(1..=2.min(free.len() / 2).max(1));
    let mut pool = free.clone();
    let mut agents = Vec::new();
    for id in 0..num_agents {
        if pool.len() < 2 {
            break;
        }
        let si = rng.random_range(0..pool.len());
        let start = pool.remove(si);
        let gi = rng.random_range(0..pool.len());
        let goal = pool.remove(gi);
        agents.push(Agent {
            id: id as u32,
            start,
            goal,
        });
    }
    if agents.is_empty() {
        return None;
    }
    let agents = AgentSet::new(agents).ok()?;
    let horizon = rng.random_range(0..=3);

    Some(RandomInstance {
        grid,
        agents,
        horizon,
    })
}

#[test]
fn solved_schedules_always_satisfy_p1_through_p5() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut solved_count = 0;

    for _ in 0..200 {
        let Some(instance) = random_instance(&mut rng) else {
            continue;
        };
        let planner = Planner::new(
            instance.grid.clone(),
            instance.agents.clone(),
            instance.horizon,
        )
        .unwrap();

        if let PlanOutcome::Solved(schedule) = planner.plan().unwrap() {
            solved_count += 1;
            let violations = check_schedule(&instance.grid, &instance.agents, &schedule);
            assert!(
                violations.is_empty(),
                "solved schedule violated invariants: {violations:?}"
            );
        }
    }

    assert!(solved_count > 0, "expected at least some instances to be solvable");
}

#[test]
fn unsat_is_sound_against_exhaustive_enumeration() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut checked_unsat = 0;

    for _ in 0..100 {
        let Some(instance) = random_instance(&mut rng) else {
            continue;
        };
        // Keep the brute-force search tractable.
        if instance.horizon > 3 || instance.agents.len() > 2 {
            continue;
        }

        let planner = Planner::new(
            instance.grid.clone(),
            instance.agents.clone(),
            instance.horizon,
        )
        .unwrap();
        let outcome = planner.plan().unwrap();

        let candidates: Vec<Vec<Vec<Cell>>> = instance
            .agents
            .iter()
            .map(|a| enumerate_paths(&instance.grid, a.start, a.goal, instance.horizon))
            .collect();
        let brute_force_solvable = any_collision_free_combination(&candidates);

        match outcome {
            PlanOutcome::NoSolution => {
                checked_unsat += 1;
                assert!(
                    !brute_force_solvable,
                    "planner said NoSolution but brute force found a valid schedule"
                );
            }
            PlanOutcome::Solved(_) => {
                assert!(
                    brute_force_solvable,
                    "planner solved but brute force found no valid schedule"
                );
            }
        }
    }

    assert!(checked_unsat > 0, "expected at least some UNSAT instances in this sample");
}
