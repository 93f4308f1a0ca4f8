//! The shared iterative-deepening search core.
//!
//! Every solver family is one instance of the same schema: a tuple of table
//! coordinates advanced in lockstep, an admissible lower bound over them,
//! and a goal predicate. The engine owns the deepening loop, the
//! move-adjacency and move-count filters, the canonical-path filter and the
//! emission of solution strings through the caller's callback.

/// Module for the cross solver.
pub mod cross;
/// Module for the EO-cross solver.
pub mod eocross;
/// Module for the sparse-database trainers.
pub mod freepair;
/// Module for the last-layer solvers.
pub mod lastlayer;
/// Module for the 2x2x2 solver.
pub mod pocket;
/// Module for the pseudo (rotation-admitting) solvers.
pub mod pseudo;
/// Module for the X-cross family and the F2L dispatch.
pub mod xcross;

pub use cross::CrossSolver;
pub use eocross::EoCrossSolver;
pub use freepair::{SparseTrainer, TrainerGoal};
pub use lastlayer::{LastLayerSolver, LlMode};
pub use pocket::{PersistentPocketSolver, PocketSolver};
pub use pseudo::{PseudoCrossSolver, PseudoXCrossSolver};
pub use xcross::{
    solve_f2l, Slot, SlotSolver, XCrossSolver, XxCrossSolver, XxxCrossSolver, XxxxCrossSolver,
};

pub const STATUS_SOLVED: &str = "Already solved.";
pub const STATUS_FINISHED: &str = "Search finished.";
pub const STATUS_UNSOLVABLE: &str = "Unsolvable.";

/// Sink for solution strings and status markers, driven from the DFS leaves.
pub type Update<'a> = &'a mut dyn FnMut(&str);

/// One coordinate tuple searched by the engine.
pub(crate) trait SearchSpace {
    type Coords: Copy + PartialEq;

    /// Advance every coordinate by generator `m`.
    fn advance(&self, c: &Self::Coords, m: usize) -> Self::Coords;

    /// Admissible lower bound on the remaining moves, already adjusted for
    /// unreached table cells (horizon + 1).
    fn bound(&self, c: &Self::Coords) -> u32;

    /// Full goal predicate, pruning zeros and auxiliary equalities included.
    fn is_goal(&self, c: &Self::Coords) -> bool;
}

/// Per-call knobs shared by all solver families.
pub(crate) struct SearchConfig<'a> {
    pub gen_count: usize,
    pub move_restrict: Vec<usize>,
    /// `(gen_count + 1) * gen_count` adjacency matrix, last row = no previous.
    pub ma2: Vec<bool>,
    /// Per-generator usage caps.
    pub move_caps: Vec<u32>,
    pub sol_num: usize,
    pub max_length: u32,
    /// Rotation and post-move tokens prepended to every solution line.
    pub prefix: String,
    /// Printable names of the generators, in column order.
    pub names: &'a [&'a str],
    /// Emit `depth=<d>` at every deepening step.
    pub depth_markers: bool,
    /// Fixed first deepening target; the root bound when absent.
    pub start_depth: Option<u32>,
    pub update: Update<'a>,
}

struct Dfs<'a, 'b, S: SearchSpace> {
    space: &'a S,
    cfg: &'a mut SearchConfig<'b>,
    root: S::Coords,
    sol: Vec<usize>,
    mc_tmp: Vec<u32>,
    count: usize,
}

impl<'a, 'b, S: SearchSpace> Dfs<'a, 'b, S> {
    /// Reject a candidate whose prefix already reaches the goal, or which
    /// contains a move that leaves every coordinate in place.
    fn canonical(&self) -> bool {
        let l = self.sol.len();
        let mut cur = self.root;
        for (i, &j) in self.sol.iter().enumerate() {
            let next = self.space.advance(&cur, j);
            if next == cur {
                return false;
            }
            cur = next;
            if i + 1 < l && self.space.is_goal(&cur) {
                return false;
            }
        }
        true
    }

    fn emit(&mut self) {
        let body = format_solution(&self.sol, self.cfg.names);
        let line = if self.cfg.prefix.is_empty() {
            body
        } else {
            format!("{} {}", self.cfg.prefix, body)
        };
        (self.cfg.update)(&line);
    }

    fn run(&mut self, c: &S::Coords, depth: u32, prev: usize) -> bool {
        let g = self.cfg.gen_count;
        for idx in 0..self.cfg.move_restrict.len() {
            let m = self.cfg.move_restrict[idx];
            if self.cfg.ma2[prev * g + m] || self.mc_tmp[m] >= self.cfg.move_caps[m] {
                continue;
            }
            let next = self.space.advance(c, m);
            if self.space.bound(&next) >= depth {
                continue;
            }
            self.sol.push(m);
            self.mc_tmp[m] += 1;
            let mut found = false;
            if depth == 1 {
                if self.space.is_goal(&next) && self.canonical() {
                    self.count += 1;
                    self.emit();
                    if self.count == self.cfg.sol_num {
                        found = true;
                    }
                }
            } else {
                found = self.run(&next, depth - 1, m);
            }
            self.sol.pop();
            self.mc_tmp[m] -= 1;
            if found {
                return true;
            }
        }
        false
    }
}

/// Space-join generator indices into a solution line.
fn format_solution(sol: &[usize], names: &[&str]) -> String {
    sol.iter()
        .map(|&m| names[m])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Iterative deepening over a search space. `root_prev` indexes the
/// adjacency row of the move played just before the search root
/// (`gen_count` for none).
pub(crate) fn run_search<S: SearchSpace>(
    space: &S,
    root: S::Coords,
    root_prev: usize,
    mut cfg: SearchConfig,
) {
    if space.is_goal(&root) {
        (cfg.update)(STATUS_SOLVED);
        return;
    }
    let start = cfg.start_depth.unwrap_or_else(|| space.bound(&root).max(1));
    let max_length = cfg.max_length;
    let gen_count = cfg.gen_count;
    let mut dfs = Dfs {
        space,
        cfg: &mut cfg,
        root,
        sol: Vec::new(),
        mc_tmp: vec![0; gen_count],
        count: 0,
    };
    for d in start..=max_length {
        if dfs.cfg.depth_markers {
            (dfs.cfg.update)(&format!("depth={d}"));
        }
        if dfs.run(&root, d, root_prev) {
            break;
        }
    }
    (cfg.update)(STATUS_FINISHED);
}
