//! Last-layer solvers: the OLL/PLL substeps, the last layer up to a final
//! U alignment, and the last layer with the alignment included.
//!
//! All three run over the same coordinate tuple: the four F2L slots (which
//! must survive the solution), the permutation coordinates of the four
//! upper-layer corners and edges, and the two full orientation coordinates.

use crate::moves::{face_generators, format_indices, tokenize, Move};
use crate::options::face_axis_ma;
use crate::prune::pair_prune_table;
use crate::solver::xcross::{Slot, CROSS_EDGES_SIZE, CROSS_EDGES_SOLVED, PRUNE_DEPTH};
use crate::solver::{run_search, SearchConfig, SearchSpace, Update};
use crate::tables::{
    apply_indices, corner_move_table, cp_move_table, edge_move_table, eo_move_table,
    co_move_table, ep_move_table, multi_move_table, rotate_alg,
};

const G: usize = 18;
const CP_SIZE: usize = 8 * 7 * 6 * 5;
const EP_SIZE: usize = 12 * 11 * 10 * 9;
/// Solved permutation coordinate of the four upper-layer edges.
const EP_SOLVED: u32 = 5860;

/// Which last-layer goal the search accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlMode {
    /// Solve only the flagged components; flagged permutations may end in
    /// any of their own U alignments.
    Substeps { cp: bool, co: bool, ep: bool, eo: bool },
    /// Whole last layer solved up to one shared final U alignment.
    LastLayer,
    /// Whole last layer solved exactly, alignment included.
    LastLayerWithAuf,
}

#[derive(Clone, Copy, PartialEq)]
struct LlCoords {
    cross: u32,
    corners: [u32; 4],
    edges: [u32; 4],
    cp: u32,
    co: u32,
    ep: u32,
    eo: u32,
}

struct LlSpace<'a> {
    multi_mt: &'a [u32],
    corner_mt: &'a [u32],
    edge_mt: &'a [u32],
    cp_mt: &'a [u32],
    co_mt: &'a [u32],
    ep_mt: &'a [u32],
    eo_mt: &'a [u32],
    prune: &'a [Vec<u8>; 4],
    /// (ep, cp) images of the solved last layer under the four alignments.
    auf_pairs: [(u32, u32); 4],
    mode: LlMode,
}

impl LlSpace<'_> {
    fn slots_solved(&self, c: &LlCoords) -> bool {
        for k in 0..4 {
            if self.prune[k][c.cross as usize * 24 + c.corners[k] as usize] != 0 {
                return false;
            }
            if c.edges[k] != Slot::ALL[k].edge_coord() {
                return false;
            }
        }
        true
    }
}

impl SearchSpace for LlSpace<'_> {
    type Coords = LlCoords;

    fn advance(&self, c: &LlCoords, m: usize) -> LlCoords {
        let mut next = LlCoords {
            cross: self.multi_mt[c.cross as usize * G + m],
            corners: [0; 4],
            edges: [0; 4],
            cp: self.cp_mt[c.cp as usize * G + m],
            co: self.co_mt[c.co as usize * G + m],
            ep: self.ep_mt[c.ep as usize * G + m],
            eo: self.eo_mt[c.eo as usize * G + m],
        };
        for k in 0..4 {
            next.corners[k] = self.corner_mt[c.corners[k] as usize * G + m];
            next.edges[k] = self.edge_mt[c.edges[k] as usize * G + m];
        }
        next
    }

    fn bound(&self, c: &LlCoords) -> u32 {
        let mut bound = 0;
        for k in 0..4 {
            let d = match self.prune[k][c.cross as usize * 24 + c.corners[k] as usize] {
                crate::prune::UNREACHED => PRUNE_DEPTH + 1,
                d => d as u32,
            };
            bound = bound.max(d);
        }
        bound
    }

    fn is_goal(&self, c: &LlCoords) -> bool {
        if !self.slots_solved(c) {
            return false;
        }
        match self.mode {
            LlMode::Substeps { cp, co, ep, eo } => {
                (!ep || self.auf_pairs.iter().any(|&(e, _)| e == c.ep))
                    && (!cp || self.auf_pairs.iter().any(|&(_, p)| p == c.cp))
                    && (!co || c.co == 0)
                    && (!eo || c.eo == 0)
            }
            LlMode::LastLayer => {
                self.auf_pairs.contains(&(c.ep, c.cp)) && c.co == 0 && c.eo == 0
            }
            LlMode::LastLayerWithAuf => {
                c.ep == EP_SOLVED && c.cp == 0 && c.co == 0 && c.eo == 0
            }
        }
    }
}

pub struct LastLayerSolver {
    multi_mt: Vec<u32>,
    corner_mt: Vec<u32>,
    edge_mt: Vec<u32>,
    cp_mt: Vec<u32>,
    co_mt: Vec<u32>,
    ep_mt: Vec<u32>,
    eo_mt: Vec<u32>,
    prune: [Vec<u8>; 4],
    auf_pairs: [(u32, u32); 4],
    ma: Vec<bool>,
}

impl LastLayerSolver {
    pub fn new() -> Self {
        let gens = face_generators();
        let single = edge_move_table(&gens);
        let corner_mt = corner_move_table(&gens);
        let multi_mt = multi_move_table(4, 2, 12, CROSS_EDGES_SIZE, &single, G);
        let cp_mt = multi_move_table(4, 1, 8, CP_SIZE, &cp_move_table(&gens), G);
        let ep_mt = multi_move_table(4, 1, 12, EP_SIZE, &ep_move_table(&gens), G);
        let co_mt = co_move_table(&gens);
        let eo_mt = eo_move_table(&gens);

        let all: Vec<usize> = (0..G).collect();
        let prune: Vec<Vec<u8>> = Slot::ALL
            .iter()
            .map(|slot| {
                pair_prune_table(
                    CROSS_EDGES_SIZE,
                    24,
                    PRUNE_DEPTH,
                    &multi_mt,
                    &corner_mt,
                    G,
                    &all,
                    &[(CROSS_EDGES_SOLVED, slot.corner_coord())],
                )
            })
            .collect();

        // The four alignments of the solved last layer, derived by pushing
        // the solved coordinates through the U columns.
        let mut auf_pairs = [(EP_SOLVED, 0u32); 4];
        for (k, pair) in auf_pairs.iter_mut().enumerate().skip(1) {
            *pair = (
                ep_mt[EP_SOLVED as usize * G + (k - 1)],
                cp_mt[k - 1],
            );
        }

        LastLayerSolver {
            multi_mt,
            corner_mt,
            edge_mt: single,
            cp_mt,
            co_mt,
            ep_mt,
            eo_mt,
            prune: prune.try_into().unwrap(),
            auf_pairs,
            ma: face_axis_ma(),
        }
    }

    pub fn start_search(
        &self,
        scramble: &str,
        rotation: &str,
        mode: LlMode,
        sol_num: usize,
        max_length: u32,
        restrict: &[Move],
        update: Update,
    ) {
        let rotation_alg = tokenize(rotation, 54);
        let alg = rotate_alg(&tokenize(scramble, G), &rotation_alg);

        let mut root = LlCoords {
            cross: apply_indices(&self.multi_mt, G, CROSS_EDGES_SOLVED, &alg),
            corners: [0; 4],
            edges: [0; 4],
            cp: apply_indices(&self.cp_mt, G, 0, &alg),
            co: apply_indices(&self.co_mt, G, 0, &alg),
            ep: apply_indices(&self.ep_mt, G, EP_SOLVED, &alg),
            eo: apply_indices(&self.eo_mt, G, 0, &alg),
        };
        for (k, slot) in Slot::ALL.iter().enumerate() {
            root.corners[k] = apply_indices(&self.corner_mt, G, slot.corner_coord(), &alg);
            root.edges[k] = apply_indices(&self.edge_mt, G, slot.edge_coord(), &alg);
        }

        let space = LlSpace {
            multi_mt: &self.multi_mt,
            corner_mt: &self.corner_mt,
            edge_mt: &self.edge_mt,
            cp_mt: &self.cp_mt,
            co_mt: &self.co_mt,
            ep_mt: &self.ep_mt,
            eo_mt: &self.eo_mt,
            prune: &self.prune,
            auf_pairs: self.auf_pairs,
            mode,
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

impl Default for LastLayerSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::CubieCube;
    use crate::moves::{parse_alg, Move};
    use crate::options::faces_to_moves;
    use crate::solver::{STATUS_FINISHED, STATUS_SOLVED};

    fn solve(
        solver: &LastLayerSolver,
        scramble: &str,
        mode: LlMode,
        num: usize,
        len: u32,
        faces: &str,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solver.start_search(
            scramble,
            "",
            mode,
            num,
            len,
            &faces_to_moves(faces),
            &mut update,
        );
        lines
    }

    fn solved_up_to_auf(scramble: &str, solution: &str) -> bool {
        let cc = CubieCube::default()
            .apply_moves(&parse_alg(scramble))
            .apply_moves(&parse_alg(solution));
        [None, Some(Move::U), Some(Move::U2), Some(Move::U3)]
            .iter()
            .any(|auf| {
                let fin = match auf {
                    Some(m) => cc.apply_move(*m),
                    None => cc,
                };
                fin == CubieCube::default()
            })
    }

    #[test]
    fn test_auf_only_scramble_counts_as_solved() {
        let solver = LastLayerSolver::new();
        assert_eq!(
            solve(&solver, "U", LlMode::LastLayer, 1, 4, "URF"),
            vec![STATUS_SOLVED]
        );
        // With the alignment included it has to be undone.
        let lines = solve(&solver, "U", LlMode::LastLayerWithAuf, 1, 2, "URF");
        assert_eq!(lines, vec!["U'".to_string(), STATUS_FINISHED.to_string()]);
    }

    #[test]
    fn test_last_layer_commutator() {
        let solver = LastLayerSolver::new();
        let lines = solve(&solver, "R U R' U'", LlMode::LastLayer, 1, 4, "RU");
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
        let sols = &lines[..lines.len() - 1];
        assert!(!sols.is_empty());
        for sol in sols {
            assert!(solved_up_to_auf("R U R' U'", sol), "{sol}");
        }
    }

    #[test]
    fn test_substeps_orientation_only() {
        let solver = LastLayerSolver::new();
        let mode = LlMode::Substeps {
            cp: false,
            co: true,
            ep: false,
            eo: true,
        };
        // The corner-twisting OLL case from a sune setup.
        let lines = solve(&solver, "R U2 R' U' R U' R'", mode, 1, 7, "RU");
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
        let sols = &lines[..lines.len() - 1];
        assert!(!sols.is_empty());
        for sol in sols {
            let cc = CubieCube::default()
                .apply_moves(&parse_alg("R U2 R' U' R U' R'"))
                .apply_moves(&parse_alg(sol));
            assert!(cc.co.iter().all(|&o| o == 0), "{sol} leaves twisted corners");
            assert!(cc.eo.iter().all(|&o| o == 0));
        }
    }

    #[test]
    fn test_substep_goals_ignore_unflagged_components() {
        let solver = LastLayerSolver::new();
        let mode = LlMode::Substeps {
            cp: false,
            co: false,
            ep: false,
            eo: true,
        };
        // An edge-permuting scramble with oriented edges needs nothing.
        assert_eq!(solve(&solver, "U2", mode, 1, 4, "RU"), vec![STATUS_SOLVED]);
    }
}
