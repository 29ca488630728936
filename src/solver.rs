//! Thin interface over a CDCL SAT solver.
//!
//! The core treats the solver as a black-box oracle: feed clauses, run,
//! retrieve a model or an UNSAT sentinel. Resources are scoped to one
//! `solve` call on every exit path.

use varisat::{ExtendFormula, Lit, Solver};

use crate::error::PlannerError;
use crate::formula::Formula;

/// Outcome of a single solver invocation.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// Satisfiable; the model covers every variable the caller allocated.
    Sat(Vec<isize>),
    Unsat,
}

/// Capability set `{append_formula, solve, model}`. Both an in-process and
/// a text-based solver output contract are supported by equivalent
/// adapters implementing this trait.
pub trait SatSolver {
    fn solve(&mut self, formula: &Formula) -> Result<SolveOutcome, PlannerError>;
}

/// The default adapter: an in-process `varisat` solver, created and torn
/// down within a single `solve` call.
#[derive(Debug, Default)]
pub struct VarisatSolver;

impl SatSolver for VarisatSolver {
    fn solve(&mut self, formula: &Formula) -> Result<SolveOutcome, PlannerError> {
        let mut solver = Solver::new();
        for clause in formula.clauses() {
            if clause.is_empty() {
                return Err(PlannerError::SolverFailure(
                    "empty clause is trivially unsatisfiable".into(),
                ));
            }
            let lits: Vec<Lit> = clause.iter().map(|&lit| Lit::from_dimacs(lit)).collect();
            solver.add_clause(&lits);
        }

        let sat = solver
            .solve()
            .map_err(|e| PlannerError::SolverFailure(e.to_string()))?;

        if !sat {
            return Ok(SolveOutcome::Unsat);
        }

        let model = solver
            .model()
            .ok_or_else(|| PlannerError::SolverFailure("solver reported SAT with no model".into()))?;
        let literals = model.iter().map(|lit| lit.to_dimacs()).collect();
        Ok(SolveOutcome::Sat(literals))
    }
}

/// Parses the DIMACS-style text solver-output contract: a line starting
/// `s SATISFIABLE` or `s UNSATISFIABLE`, and on SAT, `v`-prefixed lines of
/// signed integers terminated by `0`. A second adapter alongside
/// `VarisatSolver`, for backends that only speak this text contract.
#[derive(Debug, Default)]
pub struct DimacsTextSolver;

impl DimacsTextSolver {
    pub fn parse(output: &str) -> Result<SolveOutcome, PlannerError> {
        let mut sat = None;
        let mut literals = Vec::new();
        for line in output.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix('s') {
                match rest.trim() {
                    "SATISFIABLE" => sat = Some(true),
                    "UNSATISFIABLE" => sat = Some(false),
                    other => {
                        return Err(PlannerError::SolverFailure(format!(
                            "unrecognized status line: s{other}"
                        )));
                    }
                }
            } else if let Some(rest) = line.strip_prefix('v') {
                for tok in rest.split_whitespace() {
                    let lit: isize = tok
                        .parse()
                        .map_err(|_| PlannerError::SolverFailure(format!("bad literal: {tok}")))?;
                    if lit != 0 {
                        literals.push(lit);
                    }
                }
            }
        }

        match sat {
            Some(true) => Ok(SolveOutcome::Sat(literals)),
            Some(false) => Ok(SolveOutcome::Unsat),
            None => Err(PlannerError::SolverFailure(
                "solver output had no status line".into(),
            )),
        }
    }
}
