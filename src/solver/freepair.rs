//! Sparse-database trainers over the X-cross coordinate.
//!
//! The composite space (190080 cross states x 24 corner x 24 edge) is too
//! large for a dense byte table, but everything reachable within a few plies
//! fits in hash sets. The trainer floods from the goal set once, keeps the
//! per-depth state lists as a hash heuristic, and runs the ordinary
//! deepening search against it.
//!
//! Two goal sets exist: the strict single target, and the free-pair set
//! where any state with the pair already joined by one of the four insert
//! algorithms (under any upper-face alignment) counts as solved. Free-pair
//! seeding only moves the slot coordinates; the cross stays put.

use crate::moves::{face_generators, format_indices, tokenize, Move};
use crate::options::face_axis_ma;
use crate::solver::xcross::{Slot, CROSS_EDGES_SOLVED};
use crate::solver::{run_search, SearchConfig, SearchSpace, Update};
use crate::sparse::{build_sparse_levels, SparseHeuristic, SparseLevels, NODES_UNKNOWN};
use crate::tables::{apply_indices, corner_move_table, edge_move_table, multi_move_table, rotate_alg};

const G: usize = 18;
const SIZE1: u64 = 190080;
const SIZE2: u64 = 24;
const SIZE3: u64 = 24;
const SIZE23: u64 = SIZE2 * SIZE3;

/// Measured nodes per depth from the strict single-goal flood.
const EXPECTED_STRICT: [u64; 9] = [
    1,
    15,
    182,
    2286,
    28611,
    349811,
    4169855,
    47547352,
    NODES_UNKNOWN,
];

/// Measured nodes per depth from the 17-seed free-pair flood.
const EXPECTED_FREE_PAIR: [u64; 9] = [
    17,
    294,
    3777,
    46949,
    561768,
    6741216,
    66869540,
    NODES_UNKNOWN,
    NODES_UNKNOWN,
];

/// The four pair-insert algorithms whose images seed the free-pair goal.
/// They lift the back-left pair out of its slot, so the free-pair goal set
/// belongs to [`Slot::BL`]; the strict goal works for any slot.
const PAIR_INSERTS: [&str; 4] = ["L U L'", "L U' L'", "B' U B", "B' U' B"];
const AUFS: [&str; 4] = ["", "U", "U2", "U'"];

/// Which states count as depth zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerGoal {
    /// Cross and pair solved in place.
    Strict,
    /// Cross solved, pair either in place or joined as a free pair.
    FreePair,
}

struct SparseSpace<'a> {
    multi_mt: &'a [u32],
    corner_mt: &'a [u32],
    edge_mt: &'a [u32],
    heuristic: &'a SparseHeuristic,
    goals: &'a [u64],
}

fn pack(c: &[u32; 3]) -> u64 {
    c[0] as u64 * SIZE23 + c[1] as u64 * SIZE3 + c[2] as u64
}

impl SearchSpace for SparseSpace<'_> {
    type Coords = [u32; 3];

    fn advance(&self, c: &[u32; 3], m: usize) -> [u32; 3] {
        [
            self.multi_mt[c[0] as usize * G + m],
            self.corner_mt[c[1] as usize * G + m],
            self.edge_mt[c[2] as usize * G + m],
        ]
    }

    fn bound(&self, c: &[u32; 3]) -> u32 {
        self.heuristic.bound(pack(c))
    }

    fn is_goal(&self, c: &[u32; 3]) -> bool {
        self.goals.contains(&pack(c))
    }
}

/// X-cross trainer backed by the sparse pattern database.
pub struct SparseTrainer {
    multi_mt: Vec<u32>,
    corner_mt: Vec<u32>,
    edge_mt: Vec<u32>,
    goals: Vec<u64>,
    heuristic: SparseHeuristic,
    ma: Vec<bool>,
    slot: Slot,
}

impl SparseTrainer {
    /// Flood the goal set to `db_depth` within `max_memory_kb` and keep the
    /// levels as the search heuristic.
    pub fn new(slot: Slot, goal: TrainerGoal, db_depth: usize, max_memory_kb: u64) -> Self {
        let gens = face_generators();
        let single = edge_move_table(&gens);
        let corner_mt = corner_move_table(&gens);
        let multi_mt = multi_move_table(4, 2, 12, SIZE1 as usize, &single, G);

        let solved = [
            CROSS_EDGES_SOLVED,
            slot.corner_coord(),
            slot.edge_coord(),
        ];
        let mut goals = vec![pack(&solved)];
        if goal == TrainerGoal::FreePair {
            for insert in PAIR_INSERTS {
                for auf in AUFS {
                    let alg = tokenize(&format!("{insert} {auf}"), G);
                    // Insert algorithms only touch the slot coordinates; the
                    // cross edges stay solved.
                    let c = [
                        solved[0],
                        apply_indices(&corner_mt, G, solved[1], &alg),
                        apply_indices(&single, G, solved[2], &alg),
                    ];
                    goals.push(pack(&c));
                }
            }
        }

        let expected: &[u64] = match goal {
            TrainerGoal::Strict => &EXPECTED_STRICT,
            TrainerGoal::FreePair => &EXPECTED_FREE_PAIR,
        };
        let db: SparseLevels = build_sparse_levels(
            &goals,
            (SIZE1, SIZE2, SIZE3),
            (&multi_mt, &corner_mt, &single),
            G,
            db_depth,
            max_memory_kb,
            expected,
        );
        let heuristic = SparseHeuristic::from_levels(&db);

        SparseTrainer {
            multi_mt,
            corner_mt,
            edge_mt: single,
            goals,
            heuristic,
            ma: face_axis_ma(),
            slot,
        }
    }

    pub fn start_search(
        &self,
        scramble: &str,
        rotation: &str,
        sol_num: usize,
        max_length: u32,
        restrict: &[Move],
        update: Update,
    ) {
        let rotation_alg = tokenize(rotation, 54);
        let alg = rotate_alg(&tokenize(scramble, G), &rotation_alg);
        let root = [
            apply_indices(&self.multi_mt, G, CROSS_EDGES_SOLVED, &alg),
            apply_indices(&self.corner_mt, G, self.slot.corner_coord(), &alg),
            apply_indices(&self.edge_mt, G, self.slot.edge_coord(), &alg),
        ];
        let space = SparseSpace {
            multi_mt: &self.multi_mt,
            corner_mt: &self.corner_mt,
            edge_mt: &self.edge_mt,
            heuristic: &self.heuristic,
            goals: &self.goals,
        };
        let cfg = SearchConfig {
            gen_count: G,
            move_restrict: restrict
                .iter()
                .map(|&m| m as usize)
                .filter(|&m| m < G)
                .collect(),
            ma2: self.ma.clone(),
            move_caps: vec![20; G],
            sol_num,
            max_length,
            prefix: format_indices(&rotation_alg),
            names: &crate::constants::MOVE_NAMES,
            depth_markers: false,
            start_depth: None,
            update,
        };
        run_search(&space, root, G, cfg);
    }
}
