//! Pseudo solvers: cross and X-cross variants that admit whole-cube
//! rotations inside the solution and a post-alignment offset at the end.
//!
//! The searches run over the 27-generator tables. A user-level move (54
//! token alphabet, wide moves included) is re-expressed for the current
//! orientation class through the reverse rotation map and the converter; a
//! rotation move advances no coordinate and consumes no depth, it only
//! permutes the interpretation of everything after it. A candidate counts
//! only if the orientation class it ends in is one of the allowed offsets.

use crate::constants::{FIRST_ROTATION, MOVE_NAMES, N_HTM_MOVES, ROTATION_MAP_REVERSE, WIDE_CONVERTER};
use crate::moves::{format_indices, htm_generators, tokenize, Move};
use crate::options::same_layer_ma_htm;
use crate::prune::{fill_pseudo_prune_table, UNREACHED};
use crate::solver::xcross::{Slot, CROSS_EDGES_SIZE, CROSS_EDGES_SOLVED};
use crate::solver::{Update, STATUS_FINISHED, STATUS_SOLVED, STATUS_UNSOLVABLE};
use crate::tables::{
    apply_indices, corner_move_table, edge_move_table, multi_move_table, rotate_alg, CENTER_MT,
};

const G: usize = N_HTM_MOVES;
const USER: usize = 54;
const PAIR_SIZE: usize = 24 * 22;

/// Coordinate tuple of one pseudo search; pruned over the first two values.
pub(crate) trait PseudoSpace {
    type Coords: Copy + PartialEq;

    fn advance(&self, c: &Self::Coords, m: usize) -> Self::Coords;

    /// Dense pruning value; [`UNREACHED`] cells are unreachable under the
    /// enabled moves and always prune.
    fn prune(&self, c: &Self::Coords) -> u8;

    /// Table goal: pruning zero plus the auxiliary equalities.
    fn tables_goal(&self, c: &Self::Coords) -> bool;
}

/// Per-search state of the rotation-aware DFS.
struct PseudoDfs<'a, S: PseudoSpace> {
    space: &'a S,
    /// Same-layer filter over the 27 generators, indexed by converted moves.
    ma: &'a [bool],
    /// User-level adjacency matrix, 55 rows of 54.
    ma2: &'a [bool],
    moves: Vec<usize>,
    rots: Vec<usize>,
    center_mt: &'a [[u8; 54]; 24],
    center_offset: &'a [u8],
    max_rot_count: u32,
    sol_num: usize,
    sol: Vec<usize>,
    count: usize,
    root: S::Coords,
    initial_center: usize,
    prefix: String,
}

impl<S: PseudoSpace> PseudoDfs<'_, S> {
    fn offset_allowed(&self, center: usize) -> bool {
        self.center_offset.iter().any(|&c| c as usize == center)
    }

    /// Replay the candidate from the root: reject no-op moves, rotation
    /// overruns, and any strict prefix that already reaches an allowed
    /// offset with the tables solved. Accept only if the final orientation
    /// class is an allowed offset.
    fn candidate_valid(&self) -> bool {
        let l = self.sol.len();
        let mut c = 0usize;
        let mut rot_count = 0u32;
        let mut center = self.initial_center;
        let mut cur = self.root;
        let mut tables_seen = false;
        let mut center_valid = false;
        for &j in &self.sol {
            if j >= FIRST_ROTATION {
                center = self.center_mt[center][j] as usize;
                c += 1;
                rot_count += 1;
                if rot_count > self.max_rot_count {
                    return false;
                }
                center_valid = self.offset_allowed(center);
                if c < l && center_valid && tables_seen {
                    return false;
                }
                continue;
            }
            let m = WIDE_CONVERTER[ROTATION_MAP_REVERSE[center][j] as usize] as usize;
            center = self.center_mt[center][j] as usize;
            let next = self.space.advance(&cur, m);
            if next == cur {
                return false;
            }
            c += 1;
            cur = next;
            center_valid = self.offset_allowed(center);
            if c < l && self.space.tables_goal(&cur) {
                tables_seen = true;
                if center_valid {
                    return false;
                }
            }
        }
        center_valid
    }

    fn emit(&mut self, update: Update) {
        let body: Vec<&str> = self.sol.iter().map(|&m| MOVE_NAMES[m]).collect();
        let line = if self.prefix.is_empty() {
            body.join(" ")
        } else {
            format!("{} {}", self.prefix, body.join(" "))
        };
        update(&line);
    }

    #[allow(clippy::too_many_arguments)]
    fn run(
        &mut self,
        cur: &S::Coords,
        depth: u32,
        prev: usize,
        center: usize,
        rot_count: u32,
        aprev: usize,
        update: &mut dyn FnMut(&str),
    ) -> bool {
        for idx in 0..self.moves.len() {
            let i = self.moves[idx];
            if self.ma2[aprev * USER + i] {
                continue;
            }
            let m = WIDE_CONVERTER[ROTATION_MAP_REVERSE[center][i] as usize] as usize;
            if self.ma[prev * G + m] {
                continue;
            }
            let next = self.space.advance(cur, m);
            let prune = self.space.prune(&next);
            if prune as u32 >= depth {
                continue;
            }
            self.sol.push(i);
            let mut found = false;
            if depth == 1 {
                if self.space.tables_goal(&next) && self.candidate_valid() {
                    self.count += 1;
                    self.emit(update);
                    if self.count == self.sol_num {
                        found = true;
                    }
                }
            } else {
                found = self.run(
                    &next,
                    depth - 1,
                    m,
                    self.center_mt[center][i] as usize,
                    rot_count,
                    i,
                    update,
                );
            }
            self.sol.pop();
            if found {
                return true;
            }
        }
        for idx in 0..self.rots.len() {
            let i = self.rots[idx];
            if self.ma2[aprev * USER + i] {
                continue;
            }
            if rot_count >= self.max_rot_count {
                continue;
            }
            let prune = self.space.prune(cur);
            if prune as u32 >= depth {
                continue;
            }
            self.sol.push(i);
            let mut found = false;
            if depth == 1 {
                if self.space.tables_goal(cur) && self.candidate_valid() {
                    self.count += 1;
                    self.emit(update);
                    if self.count == self.sol_num {
                        found = true;
                    }
                }
            } else {
                // Rotations consume no depth.
                found = self.run(
                    cur,
                    depth,
                    prev,
                    self.center_mt[center][i] as usize,
                    rot_count + 1,
                    i,
                    update,
                );
            }
            self.sol.pop();
            if found {
                return true;
            }
        }
        false
    }
}

/// Shared driver: rewrite the inputs, apply the post alignment, build the
/// restriction-aware pruning table and run the deepening loop.
#[allow(clippy::too_many_arguments)]
fn pseudo_search<S: PseudoSpace>(
    space: &S,
    root: S::Coords,
    root_prev: usize,
    initial_center: usize,
    prefix: String,
    restrict: &[usize],
    center_offset: &[u8],
    max_rot_count: u32,
    ma2: &[bool],
    ma: &[bool],
    sol_num: usize,
    max_length: u32,
    update: Update,
) {
    let root_prune = space.prune(&root);
    if root_prune == UNREACHED {
        update(STATUS_UNSOLVABLE);
        return;
    }
    if space.tables_goal(&root) && center_offset.contains(&(initial_center as u8)) {
        update(STATUS_SOLVED);
        return;
    }
    let mut moves = Vec::new();
    let mut rots = Vec::new();
    for &i in restrict {
        if i < FIRST_ROTATION {
            moves.push(i);
        } else {
            rots.push(i);
        }
    }
    let mut dfs = PseudoDfs {
        space,
        ma,
        ma2,
        moves,
        rots,
        center_mt: &CENTER_MT,
        center_offset,
        max_rot_count,
        sol_num,
        sol: Vec::new(),
        count: 0,
        root,
        initial_center,
        prefix,
    };
    let mut emitter = |s: &str| update(s);
    for d in 1..=max_length {
        if dfs.run(
            &root,
            d,
            root_prev,
            initial_center,
            0,
            USER,
            &mut emitter,
        ) {
            break;
        }
    }
    update(STATUS_FINISHED);
}

/// Fold the post alignment into a coordinate root: rotations only advance
/// the orientation class, face and wide moves advance the tables through
/// the converter. Returns the converted previous move and the class.
fn apply_post_alg<F: FnMut(usize)>(
    post: &[usize],
    mut advance: F,
) -> (usize, usize) {
    let mut center = 0usize;
    let mut prev = G;
    for &m in post {
        if m >= FIRST_ROTATION {
            center = CENTER_MT[center][m] as usize;
            continue;
        }
        let converted = WIDE_CONVERTER[ROTATION_MAP_REVERSE[center][m] as usize] as usize;
        prev = converted;
        center = CENTER_MT[center][m] as usize;
        advance(converted);
    }
    (prev, center)
}

/// Pseudo cross: the bottom cross solved up to any allowed orientation
/// offset.
pub struct PseudoCrossSolver {
    multi_mt: Vec<u32>,
    ma: Vec<bool>,
}

struct PseudoCrossSpace<'a> {
    mt: &'a [u32],
    prune: &'a [u8],
}

impl PseudoSpace for PseudoCrossSpace<'_> {
    type Coords = [u32; 2];

    fn advance(&self, c: &[u32; 2], m: usize) -> [u32; 2] {
        [
            self.mt[c[0] as usize * G + m],
            self.mt[c[1] as usize * G + m],
        ]
    }

    fn prune(&self, c: &[u32; 2]) -> u8 {
        self.prune[c[0] as usize * PAIR_SIZE + c[1] as usize]
    }

    fn tables_goal(&self, c: &[u32; 2]) -> bool {
        self.prune(c) == 0
    }
}

impl PseudoCrossSolver {
    pub fn new() -> Self {
        let gens = htm_generators();
        let single = edge_move_table(&gens);
        let multi_mt = multi_move_table(2, 2, 12, PAIR_SIZE, &single, G);
        PseudoCrossSolver {
            multi_mt,
            ma: same_layer_ma_htm(),
        }
    }

    /// The solved cross and its three bottom-turn misalignments.
    fn seeds(&self) -> Vec<(u32, u32)> {
        let mut seeds = vec![(416u32, 520u32)];
        for d in 3..6 {
            seeds.push((
                self.multi_mt[416 * G + d],
                self.multi_mt[520 * G + d],
            ));
        }
        seeds
    }

    #[allow(clippy::too_many_arguments)]
    pub fn start_search(
        &self,
        scramble: &str,
        rotation: &str,
        sol_num: usize,
        max_length: u32,
        restrict: &[Move],
        post_alg: &str,
        center_offset: &[u8],
        max_rot_count: u32,
        ma2: &[bool],
        update: Update,
    ) {
        let restrict: Vec<usize> = restrict.iter().map(|&m| m as usize).collect();
        let rotation_alg = tokenize(rotation, USER);
        let alg = rotate_alg(&tokenize(scramble, 18), &rotation_alg);
        let post = tokenize(post_alg, USER);

        // Restrictions are given in the solved frame; the flood and the
        // search run in the frame behind the post alignment.
        let mut tc = 0usize;
        for &m in &post {
            tc = CENTER_MT[tc][m] as usize;
        }
        let restrict_rotated: Vec<usize> = restrict
            .iter()
            .map(|&m| ROTATION_MAP_REVERSE[tc][m] as usize)
            .collect();

        let mut prune = vec![UNREACHED; PAIR_SIZE * PAIR_SIZE];
        let mut tags = vec![0u8; PAIR_SIZE * PAIR_SIZE];
        fill_pseudo_prune_table(
            &mut prune,
            &mut tags,
            PAIR_SIZE,
            20,
            &self.multi_mt,
            &self.multi_mt,
            &restrict_rotated,
            &CENTER_MT,
            &self.seeds(),
        );

        let mut root = [
            apply_indices(&self.multi_mt, G, 416, &alg),
            apply_indices(&self.multi_mt, G, 520, &alg),
        ];
        let space_mt = &self.multi_mt;
        let (root_prev, initial_center) = apply_post_alg(&post, |m| {
            root = [
                space_mt[root[0] as usize * G + m],
                space_mt[root[1] as usize * G + m],
            ];
        });

        let mut prefix = format_indices(&rotation_alg);
        let post_str = format_indices(&post);
        if !post_str.is_empty() {
            prefix = if prefix.is_empty() {
                post_str
            } else {
                format!("{prefix} {post_str}")
            };
        }

        let space = PseudoCrossSpace {
            mt: &self.multi_mt,
            prune: &prune,
        };
        pseudo_search(
            &space,
            root,
            root_prev,
            initial_center,
            prefix,
            &restrict,
            center_offset,
            max_rot_count,
            ma2,
            &self.ma,
            sol_num,
            max_length,
            update,
        );
    }
}

impl Default for PseudoCrossSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Pseudo X-cross: the cross plus one pair, where the pair may be built
/// into a different slot and the whole solution may end rotated.
pub struct PseudoXCrossSolver {
    multi_mt: Vec<u32>,
    corner_mt: Vec<u32>,
    edge_mt: Vec<u32>,
    ma: Vec<bool>,
}

struct PseudoXCrossSpace<'a> {
    multi_mt: &'a [u32],
    corner_mt: &'a [u32],
    edge_mt: &'a [u32],
    prune: &'a [u8],
    edge_goal: u32,
}

impl PseudoSpace for PseudoXCrossSpace<'_> {
    type Coords = [u32; 3];

    fn advance(&self, c: &[u32; 3], m: usize) -> [u32; 3] {
        [
            self.multi_mt[c[0] as usize * G + m],
            self.corner_mt[c[1] as usize * G + m],
            self.edge_mt[c[2] as usize * G + m],
        ]
    }

    fn prune(&self, c: &[u32; 3]) -> u8 {
        self.prune[c[0] as usize * 24 + c[1] as usize]
    }

    fn tables_goal(&self, c: &[u32; 3]) -> bool {
        self.prune(c) == 0 && c[2] == self.edge_goal
    }
}

impl PseudoXCrossSolver {
    pub fn new() -> Self {
        let gens = htm_generators();
        let single = edge_move_table(&gens);
        let corner_mt = corner_move_table(&gens);
        let multi_mt = multi_move_table(4, 2, 12, CROSS_EDGES_SIZE, &single, G);
        PseudoXCrossSolver {
            multi_mt,
            corner_mt,
            edge_mt: single,
            ma: same_layer_ma_htm(),
        }
    }

    /// Solved cross with the pair's corner in the pseudo slot, plus the
    /// three bottom-turn misalignments.
    fn seeds(&self, pslot: Slot) -> Vec<(u32, u32)> {
        let corner = pslot.corner_coord();
        let mut seeds = vec![(CROSS_EDGES_SOLVED, corner)];
        for d in 3..6 {
            seeds.push((
                self.multi_mt[CROSS_EDGES_SOLVED as usize * G + d],
                self.corner_mt[corner as usize * G + d],
            ));
        }
        seeds
    }

    #[allow(clippy::too_many_arguments)]
    pub fn start_search(
        &self,
        scramble: &str,
        rotation: &str,
        slot: Slot,
        pslot: Slot,
        sol_num: usize,
        max_length: u32,
        restrict: &[Move],
        post_alg: &str,
        center_offset: &[u8],
        max_rot_count: u32,
        ma2: &[bool],
        update: Update,
    ) {
        let restrict: Vec<usize> = restrict.iter().map(|&m| m as usize).collect();
        let rotation_alg = tokenize(rotation, USER);
        let alg = rotate_alg(&tokenize(scramble, 18), &rotation_alg);
        let post = tokenize(post_alg, USER);

        let mut tc = 0usize;
        for &m in &post {
            tc = CENTER_MT[tc][m] as usize;
        }
        let restrict_rotated: Vec<usize> = restrict
            .iter()
            .map(|&m| ROTATION_MAP_REVERSE[tc][m] as usize)
            .collect();

        let mut prune = vec![UNREACHED; CROSS_EDGES_SIZE * 24];
        let mut tags = vec![0u8; CROSS_EDGES_SIZE * 24];
        fill_pseudo_prune_table(
            &mut prune,
            &mut tags,
            24,
            20,
            &self.multi_mt,
            &self.corner_mt,
            &restrict_rotated,
            &CENTER_MT,
            &self.seeds(pslot),
        );

        let mut root = [
            apply_indices(&self.multi_mt, G, CROSS_EDGES_SOLVED, &alg),
            apply_indices(&self.corner_mt, G, pslot.corner_coord(), &alg),
            apply_indices(&self.edge_mt, G, slot.edge_coord(), &alg),
        ];
        let (multi_mt, corner_mt, edge_mt) = (&self.multi_mt, &self.corner_mt, &self.edge_mt);
        let (root_prev, initial_center) = apply_post_alg(&post, |m| {
            root = [
                multi_mt[root[0] as usize * G + m],
                corner_mt[root[1] as usize * G + m],
                edge_mt[root[2] as usize * G + m],
            ];
        });

        let mut prefix = format_indices(&rotation_alg);
        let post_str = format_indices(&post);
        if !post_str.is_empty() {
            prefix = if prefix.is_empty() {
                post_str
            } else {
                format!("{prefix} {post_str}")
            };
        }

        let space = PseudoXCrossSpace {
            multi_mt: &self.multi_mt,
            corner_mt: &self.corner_mt,
            edge_mt: &self.edge_mt,
            prune: &prune,
            edge_goal: slot.edge_coord(),
        };
        pseudo_search(
            &space,
            root,
            root_prev,
            initial_center,
            prefix,
            &restrict,
            center_offset,
            max_rot_count,
            ma2,
            &self.ma,
            sol_num,
            max_length,
            update,
        );
    }
}

impl Default for PseudoXCrossSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::parse_alg;
    use crate::options::build_ma2;

    const FACE_ID: &str = "U_U2_U-_D_D2_D-_L_L2_L-_R_R2_R-_F_F2_F-_B_B2_B-";

    fn face_restrict() -> Vec<Move> {
        parse_alg("U U2 U' D D2 D' L L2 L' R R2 R' F F2 F' B B2 B'")
    }

    #[test]
    fn test_exact_offset_matches_plain_cross() {
        let solver = PseudoCrossSolver::new();
        let ma2 = build_ma2(FACE_ID, "", &MOVE_NAMES);
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solver.start_search(
            "R", "", 1, 2, &face_restrict(), "", &[0], 0, &ma2, &mut update,
        );
        assert_eq!(lines[0], "R'");
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
    }

    #[test]
    fn test_misaligned_cross_is_pseudo_solved() {
        let solver = PseudoCrossSolver::new();
        let ma2 = build_ma2(FACE_ID, "", &MOVE_NAMES);
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        // D leaves a cross that is solved up to a bottom-turn offset.
        solver.start_search(
            "D", "", 1, 2, &face_restrict(), "", &[0], 0, &ma2, &mut update,
        );
        assert_eq!(lines, vec![STATUS_SOLVED.to_string()]);
    }

    #[test]
    fn test_unsolvable_under_restriction() {
        let solver = PseudoCrossSolver::new();
        let id = "U_U2_U-";
        let ma2 = build_ma2(id, "", &MOVE_NAMES);
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solver.start_search(
            "R",
            "",
            1,
            4,
            &parse_alg("U U2 U'"),
            "",
            &[0],
            0,
            &ma2,
            &mut update,
        );
        assert_eq!(lines, vec![STATUS_UNSOLVABLE.to_string()]);
    }

    #[test]
    fn test_rotation_branch_reaches_offset_goal() {
        let solver = PseudoCrossSolver::new();
        let id = "U_U2_U-_D_D2_D-_L_L2_L-_R_R2_R-_F_F2_F-_B_B2_B-_y_y2_y-";
        let ma2 = build_ma2(id, "", &MOVE_NAMES);
        let restrict = parse_alg("U U2 U' D D2 D' L L2 L' R R2 R' F F2 F' B B2 B' y y2 y'");
        // Class 1 is the y offset; one rotation move alone reaches it from a
        // solved cross.
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solver.start_search("", "", 1, 2, &restrict, "", &[1], 1, &ma2, &mut update);
        assert_eq!(lines[0], "y");
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
    }

    #[test]
    fn test_pseudo_xcross_pair_into_other_slot() {
        let solver = PseudoXCrossSolver::new();
        let ma2 = build_ma2(FACE_ID, "", &MOVE_NAMES);
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        // Strict slot equals pseudo slot and zero offsets: behaves like the
        // plain X-cross on a one-move scramble.
        solver.start_search(
            "R",
            "",
            Slot::BL,
            Slot::BL,
            1,
            3,
            &face_restrict(),
            "",
            &[0],
            0,
            &ma2,
            &mut update,
        );
        assert_eq!(lines[0], "R'");
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
    }

    #[test]
    fn test_post_alg_sets_search_frame() {
        let solver = PseudoCrossSolver::new();
        let ma2 = build_ma2(FACE_ID, "", &MOVE_NAMES);
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solver.start_search(
            "R D", "", 2, 3, &face_restrict(), "D'", &[0], 0, &ma2, &mut update,
        );
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
        let sols = &lines[..lines.len() - 1];
        assert!(!sols.is_empty());
        for sol in sols {
            assert!(sol.starts_with("D' "), "post alignment leads: {sol}");
        }
    }
}
