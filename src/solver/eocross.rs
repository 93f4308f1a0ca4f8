//! EO-cross solver: the bottom cross with every edge oriented.

use crate::moves::{face_generators, format_indices, tokenize, Move};
use crate::options::face_axis_ma;
use crate::prune::pair_prune_table;
use crate::solver::cross::CROSS_SOLVED;
use crate::solver::{run_search, SearchConfig, SearchSpace, Update};
use crate::tables::{
    apply_indices, edge_move_table, eo_move_table, multi_move_table, rotate_alg,
};

const PAIR_SIZE: usize = 24 * 22;
const G: usize = 18;

pub struct EoCrossSolver {
    multi_mt: Vec<u32>,
    eo_mt: Vec<u32>,
    prune: Vec<u8>,
    ma: Vec<bool>,
}

struct EoCrossSpace<'a> {
    mt: &'a [u32],
    eo_mt: &'a [u32],
    prune: &'a [u8],
}

impl SearchSpace for EoCrossSpace<'_> {
    type Coords = [u32; 3];

    fn advance(&self, c: &[u32; 3], m: usize) -> [u32; 3] {
        [
            self.mt[c[0] as usize * G + m],
            self.mt[c[1] as usize * G + m],
            self.eo_mt[c[2] as usize * G + m],
        ]
    }

    fn bound(&self, c: &[u32; 3]) -> u32 {
        self.prune[c[0] as usize * PAIR_SIZE + c[1] as usize] as u32
    }

    fn is_goal(&self, c: &[u32; 3]) -> bool {
        self.bound(c) == 0 && c[2] == 0
    }
}

impl EoCrossSolver {
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
        EoCrossSolver {
            multi_mt,
            eo_mt: eo_move_table(&gens),
            prune,
            ma: face_axis_ma(),
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
            apply_indices(&self.multi_mt, G, CROSS_SOLVED.0, &alg),
            apply_indices(&self.multi_mt, G, CROSS_SOLVED.1, &alg),
            apply_indices(&self.eo_mt, G, 0, &alg),
        ];
        let space = EoCrossSpace {
            mt: &self.multi_mt,
            eo_mt: &self.eo_mt,
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

impl Default for EoCrossSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::{CubieCube, Edge};
    use crate::moves::{parse_alg, FACE_MOVES};
    use crate::solver::{STATUS_FINISHED, STATUS_SOLVED};

    fn solve(solver: &EoCrossSolver, scramble: &str, num: usize, len: u32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solver.start_search(scramble, "", num, len, &FACE_MOVES, &mut update);
        lines
    }

    #[test]
    fn test_solved() {
        let solver = EoCrossSolver::new();
        assert_eq!(solve(&solver, "", 1, 6), vec![STATUS_SOLVED]);
    }

    #[test]
    fn test_flip_alone_blocks_goal() {
        let solver = EoCrossSolver::new();
        // F flips four edges while the cross solver alone would accept F'.
        let lines = solve(&solver, "F", 1, 3);
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
        for sol in &lines[..lines.len() - 1] {
            let cc = CubieCube::default()
                .apply_moves(&parse_alg("F"))
                .apply_moves(&parse_alg(sol));
            assert!(cc.eo.iter().all(|&o| o == 0));
            let bottom = [Edge::DB, Edge::DR, Edge::DF, Edge::DL];
            assert!((8..12).all(|i| cc.ep[i] == bottom[i - 8]));
        }
    }

    #[test]
    fn test_solutions_orient_all_edges() {
        let solver = EoCrossSolver::new();
        let lines = solve(&solver, "R U F", 3, 7);
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
        let sols = &lines[..lines.len() - 1];
        assert!(!sols.is_empty());
        for sol in sols {
            let cc = CubieCube::default()
                .apply_moves(&parse_alg("R U F"))
                .apply_moves(&parse_alg(sol));
            assert!(cc.eo.iter().all(|&o| o == 0), "{sol} leaves a flipped edge");
        }
    }
}
