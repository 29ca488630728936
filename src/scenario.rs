//! Declarative scenario loading for the CLI. Not part of the core encoder
//! (input generation and file I/O are treated as external concerns); this
//! is a thin `serde`-backed convenience the binary uses to turn a JSON file
//! into the `Grid`/`AgentSet`/horizon triple `Planner::new` wants.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::agent::{Agent, AgentSet};
use crate::error::PlannerError;
use crate::grid::{Cell, Grid};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Planner(#[from] PlannerError),
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    width: u16,
    height: u16,
    horizon: u32,
    #[serde(default)]
    obstacles: Vec<[u16; 2]>,
    agents: Vec<ScenarioAgent>,
}

#[derive(Debug, Deserialize)]
struct ScenarioAgent {
    id: u32,
    start: [u16; 2],
    goal: [u16; 2],
}

/// A fully parsed scenario, ready to build a `Planner` from.
pub struct Scenario {
    pub grid: Grid,
    pub agents: AgentSet,
    pub horizon: u32,
}

impl Scenario {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let raw: ScenarioFile = serde_json::from_str(text)?;

        let obstacles: HashSet<Cell> = raw
            .obstacles
            .into_iter()
            .map(|[x, y]| Cell::new(x, y))
            .collect();
        let grid = Grid::new(raw.width, raw.height, obstacles)?;

        let agents = raw
            .agents
            .into_iter()
            .map(|a| Agent {
                id: a.id,
                start: Cell::new(a.start[0], a.start[1]),
                goal: Cell::new(a.goal[0], a.goal[1]),
            })
            .collect();
        let agents = AgentSet::new(agents)?;

        Ok(Scenario {
            grid,
            agents,
            horizon: raw.horizon,
        })
    }
}
