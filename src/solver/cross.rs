//! Cross solver: the four bottom edges, tracked as two pair coordinates.

use crate::moves::{face_generators, format_indices, tokenize, Move};
use crate::options::face_axis_ma;
use crate::prune::pair_prune_table;
use crate::solver::{run_search, SearchConfig, SearchSpace, Update};
use crate::tables::{apply_indices, edge_move_table, multi_move_table, rotate_alg};

const PAIR_SIZE: usize = 24 * 22;
const G: usize = 18;

/// Solved coordinates of the two bottom edge pairs.
pub(crate) const CROSS_SOLVED: (u32, u32) = (416, 520);

pub struct CrossSolver {
    multi_mt: Vec<u32>,
    prune: Vec<u8>,
    ma: Vec<bool>,
}

struct CrossSpace<'a> {
    mt: &'a [u32],
    prune: &'a [u8],
}

impl SearchSpace for CrossSpace<'_> {
    type Coords = [u32; 2];

    fn advance(&self, c: &[u32; 2], m: usize) -> [u32; 2] {
        [
            self.mt[c[0] as usize * G + m],
            self.mt[c[1] as usize * G + m],
        ]
    }

    fn bound(&self, c: &[u32; 2]) -> u32 {
        self.prune[c[0] as usize * PAIR_SIZE + c[1] as usize] as u32
    }

    fn is_goal(&self, c: &[u32; 2]) -> bool {
        self.bound(c) == 0
    }
}

impl CrossSolver {
    pub fn new() -> Self {
        let gens = face_generators();
        let single = edge_move_table(&gens);
        let multi_mt = multi_move_table(2, 2, 12, PAIR_SIZE, &single, G);
        let all: Vec<usize> = (0..G).collect();
        let prune = pair_prune_table(
            PAIR_SIZE,
            PAIR_SIZE,
            9,
            &multi_mt,
            &multi_mt,
            G,
            &all,
            &[CROSS_SOLVED],
        );
        CrossSolver {
            multi_mt,
            prune,
            ma: face_axis_ma(),
        }
    }

    /// Enumerate cross solutions for a scramble, shortest first.
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
            apply_indices(&self.multi_mt, G, CROSS_SOLVED.0, &alg),
            apply_indices(&self.multi_mt, G, CROSS_SOLVED.1, &alg),
        ];
        let space = CrossSpace {
            mt: &self.multi_mt,
            prune: &self.prune,
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

impl Default for CrossSolver {
    fn default() -> Self {
        Self::new()
    }
}
