use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mapf_sat::planner::{PlanOutcome, Planner};
use mapf_sat::scenario::Scenario;
use mapf_sat::Encoding;

#[derive(Parser)]
#[command(author, version, about = "SAT-based multi-agent path finding")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a DIMACS CNF file for a scenario, without solving it.
    Generate {
        /// Path to a scenario JSON file.
        scenario: PathBuf,
        /// Output .cnf path.
        #[arg(short, long, default_value = "scenario.cnf")]
        output: PathBuf,
        /// Use the sequential-counter cardinality encoding instead of pairwise.
        #[arg(long)]
        sequential: bool,
    },
    /// Solve a scenario and print the resulting schedule.
    Solve {
        /// Path to a scenario JSON file.
        scenario: PathBuf,
        /// Use the sequential-counter cardinality encoding instead of pairwise.
        #[arg(long)]
        sequential: bool,
    },
}

fn encoding_for(sequential: bool) -> Encoding {
    if sequential {
        Encoding::SequentialCounter
    } else {
        Encoding::Pairwise
    }
}

fn build_planner(scenario_path: &PathBuf, sequential: bool) -> Result<Planner> {
    let scenario = Scenario::load(scenario_path)?;
    let planner = Planner::new(scenario.grid, scenario.agents, scenario.horizon)?
        .with_encoding(encoding_for(sequential));
    Ok(planner)
}

fn handle_generate(scenario: PathBuf, output: PathBuf, sequential: bool) -> Result<()> {
    let planner = build_planner(&scenario, sequential)?;
    let dimacs = planner.to_dimacs();
    fs::write(&output, &dimacs)?;

    let clause_count = dimacs.lines().skip(1).count();
    println!(
        "Wrote '{}' ({clause_count} clauses)",
        output.display()
    );
    Ok(())
}

fn handle_solve(scenario: PathBuf, sequential: bool) -> Result<()> {
    let planner = build_planner(&scenario, sequential)?;

    match planner.plan()? {
        PlanOutcome::Solved(schedule) => {
            let mut ids: Vec<u32> = schedule.agent_ids().collect();
            ids.sort_unstable();
            for id in ids {
                let path = schedule.path(id).expect("every agent has a path");
                let cells: Vec<String> = path.iter().map(|c| c.to_string()).collect();
                println!("agent {id}: {}", cells.join(" -> "));
            }
        }
        PlanOutcome::NoSolution => {
            println!("No solution within the given horizon.");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            scenario,
            output,
            sequential,
        } => handle_generate(scenario, output, sequential),
        Commands::Solve {
            scenario,
            sequential,
        } => handle_solve(scenario, sequential),
    }
}
