//! The X-cross family: cross plus one to four solved F2L pairs.
//!
//! All four searchers share one shape: the 190080-state coordinate of the
//! four cross edges, plus a 24-state corner and a 24-state edge per tracked
//! slot. Each slot carries its own (cross, corner) pruning table; the slot
//! edge is checked exactly at the goal.

use crate::moves::{face_generators, format_indices, tokenize, Move};
use crate::options::face_axis_ma;
use crate::prune::pair_prune_table;
use crate::solver::{run_search, SearchConfig, SearchSpace, Update};
use crate::tables::{
    apply_indices, corner_move_table, edge_move_table, multi_move_table, rotate_alg,
};

pub(crate) const CROSS_EDGES_SIZE: usize = 190080;
pub(crate) const CROSS_EDGES_SOLVED: u32 = 187520;
const G: usize = 18;
/// Slot tables are flooded this deep; unfilled cells read as one more.
pub(crate) const PRUNE_DEPTH: u32 = 9;

/// The four F2L slots, by the bottom corner sitting in them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    BL = 0,
    BR = 1,
    FR = 2,
    FL = 3,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::BL, Slot::BR, Slot::FR, Slot::FL];

    /// Solved (slot, orientation) code of the slot's corner.
    pub(crate) fn corner_coord(self) -> u32 {
        3 * (4 + self as u32)
    }

    /// Solved (slot, orientation) code of the slot's edge.
    pub(crate) fn edge_coord(self) -> u32 {
        2 * self as u32
    }

    pub fn from_index(i: usize) -> Slot {
        Slot::ALL[i]
    }
}

/// Coordinates of an N-slot search: the cross plus one corner and one edge
/// per tracked slot.
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct SlotCoords<const N: usize> {
    pub cross: u32,
    pub corners: [u32; N],
    pub edges: [u32; N],
}

pub(crate) struct SlotSpace<'a, const N: usize> {
    pub multi_mt: &'a [u32],
    pub corner_mt: &'a [u32],
    pub edge_mt: &'a [u32],
    pub prune: &'a [Vec<u8>],
    pub edge_goals: [u32; N],
}

impl<const N: usize> SlotSpace<'_, N> {
    pub(crate) fn advance_coords(&self, c: &SlotCoords<N>, m: usize) -> SlotCoords<N> {
        let mut next = SlotCoords {
            cross: self.multi_mt[c.cross as usize * G + m],
            corners: [0; N],
            edges: [0; N],
        };
        for k in 0..N {
            next.corners[k] = self.corner_mt[c.corners[k] as usize * G + m];
            next.edges[k] = self.edge_mt[c.edges[k] as usize * G + m];
        }
        next
    }

    pub(crate) fn max_bound(&self, c: &SlotCoords<N>) -> u32 {
        let mut bound = 0;
        for k in 0..N {
            let d = match self.prune[k][c.cross as usize * 24 + c.corners[k] as usize] {
                crate::prune::UNREACHED => PRUNE_DEPTH + 1,
                d => d as u32,
            };
            bound = bound.max(d);
        }
        bound
    }

    pub(crate) fn slots_solved(&self, c: &SlotCoords<N>) -> bool {
        self.max_bound(c) == 0 && c.edges == self.edge_goals
    }
}

impl<const N: usize> SearchSpace for SlotSpace<'_, N> {
    type Coords = SlotCoords<N>;

    fn advance(&self, c: &Self::Coords, m: usize) -> Self::Coords {
        self.advance_coords(c, m)
    }

    fn bound(&self, c: &Self::Coords) -> u32 {
        self.max_bound(c)
    }

    fn is_goal(&self, c: &Self::Coords) -> bool {
        self.slots_solved(c)
    }
}

/// Cross-plus-N-pairs searcher; `XCrossSolver` through `XxxxCrossSolver`
/// are the four instantiations.
pub struct SlotSolver<const N: usize> {
    multi_mt: Vec<u32>,
    corner_mt: Vec<u32>,
    edge_mt: Vec<u32>,
    prune: Vec<Vec<u8>>,
    slots: [Slot; N],
    ma: Vec<bool>,
}

pub type XCrossSolver = SlotSolver<1>;
pub type XxCrossSolver = SlotSolver<2>;
pub type XxxCrossSolver = SlotSolver<3>;
pub type XxxxCrossSolver = SlotSolver<4>;

impl<const N: usize> SlotSolver<N> {
    pub fn new(slots: [Slot; N]) -> Self {
        let gens = face_generators();
        let single = edge_move_table(&gens);
        let corner_mt = corner_move_table(&gens);
        let multi_mt = multi_move_table(4, 2, 12, CROSS_EDGES_SIZE, &single, G);
        let all: Vec<usize> = (0..G).collect();
        let prune = slots
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
        SlotSolver {
            multi_mt,
            corner_mt,
            edge_mt: single,
            prune,
            slots,
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

        let mut root = SlotCoords {
            cross: CROSS_EDGES_SOLVED,
            corners: [0; N],
            edges: [0; N],
        };
        let mut edge_goals = [0u32; N];
        for (k, slot) in self.slots.iter().enumerate() {
            root.corners[k] = slot.corner_coord();
            root.edges[k] = slot.edge_coord();
            edge_goals[k] = slot.edge_coord();
        }
        root.cross = apply_indices(&self.multi_mt, G, root.cross, &alg);
        for k in 0..N {
            root.corners[k] = apply_indices(&self.corner_mt, G, root.corners[k], &alg);
            root.edges[k] = apply_indices(&self.edge_mt, G, root.edges[k], &alg);
        }

        let space = SlotSpace {
            multi_mt: &self.multi_mt,
            corner_mt: &self.corner_mt,
            edge_mt: &self.edge_mt,
            prune: &self.prune,
            edge_goals,
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

/// Dispatch an F2L request by its slot flags: zero enabled slots fall back
/// to the plain cross, four cover the whole first two layers. The restrict
/// string is a run of face letters.
pub fn solve_f2l(
    scramble: &str,
    rotation: &str,
    slot_flags: [bool; 4],
    sol_num: usize,
    max_length: u32,
    faces: &str,
    update: Update,
) {
    let restrict = crate::options::faces_to_moves(faces);
    let slots: Vec<Slot> = Slot::ALL
        .iter()
        .zip(slot_flags)
        .filter(|&(_, on)| on)
        .map(|(&s, _)| s)
        .collect();
    match slots.len() {
        0 => crate::solver::CrossSolver::new().start_search(
            scramble, rotation, sol_num, max_length, &restrict, update,
        ),
        1 => XCrossSolver::new([slots[0]])
            .start_search(scramble, rotation, sol_num, max_length, &restrict, update),
        2 => XxCrossSolver::new([slots[0], slots[1]])
            .start_search(scramble, rotation, sol_num, max_length, &restrict, update),
        3 => XxxCrossSolver::new([slots[0], slots[1], slots[2]])
            .start_search(scramble, rotation, sol_num, max_length, &restrict, update),
        _ => XxxxCrossSolver::new(Slot::ALL)
            .start_search(scramble, rotation, sol_num, max_length, &restrict, update),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::{Corner, CubieCube, Edge};
    use crate::moves::{parse_alg, FACE_MOVES};
    use crate::solver::{STATUS_FINISHED, STATUS_SOLVED};

    fn solve<const N: usize>(
        solver: &SlotSolver<N>,
        scramble: &str,
        num: usize,
        len: u32,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solver.start_search(scramble, "", num, len, &FACE_MOVES, &mut update);
        lines
    }

    fn xcross_solved(scramble: &str, solution: &str, slots: &[Slot]) -> bool {
        let cc = CubieCube::default()
            .apply_moves(&parse_alg(scramble))
            .apply_moves(&parse_alg(solution));
        let bottom_edges = [Edge::DB, Edge::DR, Edge::DF, Edge::DL];
        let cross_ok = (8..12).all(|i| cc.ep[i] == bottom_edges[i - 8] && cc.eo[i] == 0);
        let slots_ok = slots.iter().all(|&s| {
            let ci = 4 + s as usize;
            let ei = s as usize;
            cc.cp[ci] == Corner::try_from(ci as u8).unwrap()
                && cc.co[ci] == 0
                && cc.ep[ei] == Edge::try_from(ei as u8).unwrap()
                && cc.eo[ei] == 0
        });
        cross_ok && slots_ok
    }

    #[test]
    fn test_solved_scramble() {
        let solver = XCrossSolver::new([Slot::BL]);
        assert_eq!(solve(&solver, "", 3, 8), vec![STATUS_SOLVED]);
    }

    #[test]
    fn test_untouched_slot_reports_solved() {
        // The pair case scramble leaves the cross and the back-left slot
        // alone; only the front-right pair is pulled out.
        let solver = XCrossSolver::new([Slot::BL]);
        assert_eq!(solve(&solver, "R U R' U' F' U F", 3, 10), vec![STATUS_SOLVED]);
    }

    #[test]
    fn test_xcross_fr_canonical_solutions() {
        let solver = XCrossSolver::new([Slot::FR]);
        let lines = solve(&solver, "R U R' U' F' U F", 3, 10);
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
        let sols = &lines[..lines.len() - 1];
        assert!(!sols.is_empty());
        for sol in sols {
            assert!(parse_alg(sol).len() <= 10);
            assert!(xcross_solved("R U R' U' F' U F", sol, &[Slot::FR]));
            // No strict prefix may already complete the goal.
            let moves = parse_alg(sol);
            for cut in 1..moves.len() {
                let prefix = crate::moves::format_alg(&moves[..cut]);
                assert!(
                    !xcross_solved("R U R' U' F' U F", &prefix, &[Slot::FR]),
                    "prefix {prefix} of {sol} already solves the goal"
                );
            }
        }
    }

    #[test]
    fn test_xxcross_pair_of_slots() {
        let solver = XxCrossSolver::new([Slot::BL, Slot::FL]);
        let lines = solve(&solver, "L U L'", 2, 8);
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
        for sol in &lines[..lines.len() - 1] {
            assert!(xcross_solved("L U L'", sol, &[Slot::BL, Slot::FL]));
        }
    }

    #[test]
    fn test_f2l_dispatch_zero_slots_is_cross() {
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solve_f2l("R", "", [false; 4], 1, 2, "UDLRFB", &mut update);
        assert_eq!(lines[0], "R'");
    }
}
