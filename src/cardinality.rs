//! "At most one of these variables" encodings shared by F4 and F6a.
//!
//! The pairwise encoding is the canonical, simplest one; the ladder/
//! sequential encoding is an escape hatch for grids or horizons where the
//! Θ(n²) pairwise clause count becomes the bottleneck. Both produce the
//! same set of satisfying assignments over the input variables; the
//! ladder encoding just does it with O(n) clauses and n-1 auxiliary
//! variables instead (Sinz, "Towards an Optimal CNF Encoding of Boolean
//! Cardinality Constraints", 2005).

use itertools::Itertools;

use crate::alloc::VarAllocator;
use crate::formula::Formula;

/// Which at-most-one encoding the clause builder should use for F4 and F6a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Θ(n²) pairwise clauses. Simple, and fine for the grid sizes and
    /// horizons this tool targets.
    #[default]
    Pairwise,
    /// O(n) ladder/sequential-counter clauses, trading clause count for a
    /// linear number of auxiliary variables. Use for large grids/horizons.
    SequentialCounter,
}

/// Emits "at most one of `vars` is true" clauses under the chosen encoding.
pub fn at_most_one(vars: &[isize], encoding: Encoding, alloc: &mut VarAllocator, formula: &mut Formula) {
    match encoding {
        Encoding::Pairwise => at_most_one_pairwise(vars, formula),
        Encoding::SequentialCounter => at_most_one_sequential(vars, alloc, formula),
    }
}

fn at_most_one_pairwise(vars: &[isize], formula: &mut Formula) {
    for (v1, v2) in vars.iter().tuple_combinations() {
        formula.push(vec![-v1, -v2]);
    }
}

/// Ladder encoding: auxiliary `s_i` means "one of `vars[0..=i]` is true".
///   -x_0     ∨  s_0                 (seed the ladder)
///   -x_i     ∨  s_i     for i in 1..n-1   (register each later input)
///   -s_i     ∨  s_{i+1} for i in 0..n-2   (propagate the running flag)
///   -x_{i+1} ∨ -s_i     for i in 0..n-1   (forbid a second true)
/// The last family is what actually forbids two variables both being true;
/// the first two register every input into the ladder, and the third
/// keeps the flag from resetting once set.
fn at_most_one_sequential(vars: &[isize], alloc: &mut VarAllocator, formula: &mut Formula) {
    let n = vars.len();
    if n <= 1 {
        return;
    }
    let s: Vec<isize> = (0..n - 1).map(|_| alloc.alloc_aux().pos()).collect();

    formula.push(vec![-vars[0], s[0]]);
    for i in 1..n - 1 {
        formula.push(vec![-vars[i], s[i]]);
    }
    for i in 0..n - 1 {
        formula.push(vec![-vars[i + 1], -s[i]]);
        if i + 1 < n - 1 {
            formula.push(vec![-s[i], s[i + 1]]);
        }
    }
}
