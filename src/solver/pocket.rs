//! 2x2x2 solver over the full corner permutation and orientation.
//!
//! A pocket cube has no centers, so the solved goal is the whole 24-element
//! orientation class of the identity: the pruning table is seeded with all
//! of them. The solver understands the 27-generator regime, a post-move
//! algorithm (pre-alignment), adjacency overrides and per-move caps, and
//! reports `depth=<d>` at every deepening step.

use crate::constants::{HTM_MOVE_NAMES, N_HTM_MOVES};
use crate::moves::{format_indices, htm_generators, tokenize, tokenize_htm};
use crate::options::{build_ma2, build_move_caps, restrict_indices};
use crate::prune::{fill_pair_prune_table, UNREACHED};
use crate::solver::{run_search, SearchConfig, SearchSpace, Update};
use crate::tables::{
    apply_indices, co_move_table, cp_move_table, multi_move_table, rotate_htm_alg,
    rotate_htm_move_reverse, CENTER_MT,
};

const G: usize = N_HTM_MOVES;
const CP_SIZE: usize = 40320;
const CO_SIZE: usize = 2187;

/// The six face-pair twists carrying the identity into each orientation
/// class, and the three vertical alignments on top of each.
const CLASS_ALGS: [&str; 6] = ["", "F2 B2", "F' B", "F B'", "L R'", "L' R"];
const ALIGN_ALGS: [&str; 3] = ["U D'", "U2 D2", "U' D"];

struct PocketSpace<'a> {
    cp_mt: &'a [u32],
    co_mt: &'a [u32],
    prune: &'a [u8],
    horizon: u32,
}

impl SearchSpace for PocketSpace<'_> {
    type Coords = [u32; 2];

    fn advance(&self, c: &[u32; 2], m: usize) -> [u32; 2] {
        [
            self.cp_mt[c[0] as usize * G + m],
            self.co_mt[c[1] as usize * G + m],
        ]
    }

    fn bound(&self, c: &[u32; 2]) -> u32 {
        match self.prune[c[0] as usize * CO_SIZE + c[1] as usize] {
            UNREACHED => self.horizon + 1,
            d => d as u32,
        }
    }

    fn is_goal(&self, c: &[u32; 2]) -> bool {
        self.prune[c[0] as usize * CO_SIZE + c[1] as usize] == 0
    }
}

pub struct PocketSolver {
    cp_mt: Vec<u32>,
    co_mt: Vec<u32>,
    prune: Vec<u8>,
    /// Set on first build; 255 cells are legitimate in a built table, so the
    /// contents cannot tell first use from reuse.
    prune_table_initialized: bool,
    prune_depth_built: u32,
}

impl PocketSolver {
    pub fn new() -> Self {
        let gens = htm_generators();
        let cp_mt = multi_move_table(8, 1, 8, CP_SIZE, &cp_move_table(&gens), G);
        let co_mt = co_move_table(&gens);
        PocketSolver {
            cp_mt,
            co_mt,
            prune: vec![UNREACHED; CP_SIZE * CO_SIZE],
            prune_table_initialized: false,
            prune_depth_built: 0,
        }
    }

    /// All 24 whole-cube reorientations of the solved state.
    fn goal_seeds(&self) -> Vec<(u32, u32)> {
        let mut seeds = Vec::with_capacity(24);
        for class_alg in CLASS_ALGS {
            let alg = tokenize_htm(class_alg);
            let cp = apply_indices(&self.cp_mt, G, 0, &alg);
            let co = apply_indices(&self.co_mt, G, 0, &alg);
            seeds.push((cp, co));
            for align_alg in ALIGN_ALGS {
                let alg = tokenize_htm(align_alg);
                seeds.push((
                    apply_indices(&self.cp_mt, G, cp, &alg),
                    apply_indices(&self.co_mt, G, co, &alg),
                ));
            }
        }
        seeds
    }

    fn build_prune(&mut self, prune_depth: u32, move_restrict: &[usize]) {
        let seeds = self.goal_seeds();
        fill_pair_prune_table(
            &mut self.prune,
            CO_SIZE,
            prune_depth,
            &self.cp_mt,
            &self.co_mt,
            G,
            move_restrict,
            &seeds,
        );
        self.prune_table_initialized = true;
        self.prune_depth_built = prune_depth;
    }

    /// Enumerate solutions, shortest first, printing `depth=<d>` markers.
    ///
    /// With `reuse` the pruning table survives from the previous call and is
    /// built only on first use; without it the table is reset and rebuilt.
    #[allow(clippy::too_many_arguments)]
    pub fn start_search(
        &mut self,
        scramble: &str,
        rotation: &str,
        sol_num: usize,
        max_length: u32,
        prune_depth: u32,
        restrict_id: &str,
        post_alg: &str,
        ma2_overrides: &str,
        mc_overrides: &str,
        reuse: bool,
        update: Update,
    ) {
        let move_restrict = restrict_indices(restrict_id, &HTM_MOVE_NAMES);
        let ma2 = build_ma2(restrict_id, ma2_overrides, &HTM_MOVE_NAMES);
        let move_caps = build_move_caps(restrict_id, mc_overrides, &HTM_MOVE_NAMES);

        let rotation_alg = tokenize(rotation, 54);
        let alg = rotate_htm_alg(&tokenize_htm(scramble), &rotation_alg);
        let post = tokenize_htm(post_alg);

        // Move restrictions are expressed in the solved-cube frame; the
        // pruning flood runs in the frame the post moves leave behind.
        let mut tc = 0usize;
        for &m in &post {
            tc = CENTER_MT[tc][if m < 18 { m } else { m + 18 }] as usize;
        }
        let restrict_rotated: Vec<usize> = move_restrict
            .iter()
            .map(|&m| rotate_htm_move_reverse(tc, m))
            .collect();

        if !reuse {
            self.prune.fill(UNREACHED);
            self.build_prune(prune_depth, &restrict_rotated);
        } else if !self.prune_table_initialized {
            self.build_prune(prune_depth, &restrict_rotated);
        }

        let mut root = [
            apply_indices(&self.cp_mt, G, 0, &alg),
            apply_indices(&self.co_mt, G, 0, &alg),
        ];
        let mut aprev = G;
        for &m in &post {
            aprev = m;
            root = [
                self.cp_mt[root[0] as usize * G + m],
                self.co_mt[root[1] as usize * G + m],
            ];
        }
        if !move_restrict.contains(&aprev) {
            aprev = G;
        }

        let space = PocketSpace {
            cp_mt: &self.cp_mt,
            co_mt: &self.co_mt,
            prune: &self.prune,
            horizon: self.prune_depth_built,
        };
        let mut prefix = format_indices(&rotation_alg);
        let post_str = post
            .iter()
            .map(|&m| HTM_MOVE_NAMES[m])
            .collect::<Vec<_>>()
            .join(" ");
        if !post_str.is_empty() {
            if prefix.is_empty() {
                prefix = post_str;
            } else {
                prefix = format!("{prefix} {post_str}");
            }
        }
        let cfg = SearchConfig {
            gen_count: G,
            move_restrict,
            ma2,
            move_caps,
            sol_num,
            max_length,
            prefix,
            names: &HTM_MOVE_NAMES,
            depth_markers: true,
            start_depth: Some(1),
            update,
        };
        run_search(&space, root, aprev, cfg);
    }
}

impl Default for PocketSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Table-owning wrapper for embedding: one instance, many solves, the
/// pruning table built once and kept.
pub struct PersistentPocketSolver {
    solver: PocketSolver,
}

impl PersistentPocketSolver {
    pub fn new() -> Self {
        PersistentPocketSolver {
            solver: PocketSolver::new(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn solve(
        &mut self,
        scramble: &str,
        rotation: &str,
        sol_num: usize,
        max_length: u32,
        prune_depth: u32,
        restrict_id: &str,
        post_alg: &str,
        ma2_overrides: &str,
        mc_overrides: &str,
        update: Update,
    ) {
        self.solver.start_search(
            scramble,
            rotation,
            sol_num,
            max_length,
            prune_depth,
            restrict_id,
            post_alg,
            ma2_overrides,
            mc_overrides,
            true,
            update,
        );
    }
}

impl Default for PersistentPocketSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::CubieCube;
    use crate::moves::parse_alg;
    use crate::solver::{STATUS_FINISHED, STATUS_SOLVED};

    const RUF: &str = "U_U2_U-_R_R2_R-_F_F2_F-";

    fn solve(solver: &mut PocketSolver, scramble: &str, num: usize, len: u32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solver.start_search(scramble, "", num, len, 8, RUF, "", "", "", true, &mut update);
        lines
    }

    fn corners_solved_up_to_reorientation(scramble: &str, solution: &str) -> bool {
        let cc = CubieCube::default()
            .apply_moves(&parse_alg(scramble))
            .apply_moves(&parse_alg(solution));
        // Any fixed corner cubie orientation class is fine for a pocket
        // cube; check relative solvedness against all 24 reorientations.
        let mut reorientations = Vec::new();
        for class in CLASS_ALGS {
            for align in ["", "U D'", "U2 D2", "U' D"] {
                let r = CubieCube::default()
                    .apply_moves(&parse_alg(class))
                    .apply_moves(&parse_alg(align));
                reorientations.push(r);
            }
        }
        reorientations
            .iter()
            .any(|r| r.cp == cc.cp && r.co == cc.co)
    }

    #[test]
    fn test_solved_scramble() {
        let mut solver = PocketSolver::new();
        assert_eq!(solve(&mut solver, "", 1, 4), vec![STATUS_SOLVED]);
        // A whole-cube reorientation of the corners is solved too.
        assert_eq!(solve(&mut solver, "F2 B2", 1, 4), vec![STATUS_SOLVED]);
    }

    #[test]
    fn test_depth_markers_and_inverse_found() {
        let mut solver = PocketSolver::new();
        let lines = solve(&mut solver, "R U R' U'", 8, 4);
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
        assert!(lines.contains(&"depth=1".to_string()));
        assert!(lines.contains(&"depth=4".to_string()));
        let sols: Vec<&String> = lines
            .iter()
            .filter(|l| !l.starts_with("depth=") && l.as_str() != STATUS_FINISHED)
            .collect();
        assert!(sols.iter().any(|s| s.as_str() == "U R U' R'"));
        for sol in sols {
            assert!(parse_alg(sol).len() <= 4);
            assert!(corners_solved_up_to_reorientation("R U R' U'", sol));
        }
    }

    #[test]
    fn test_tperm_scramble_within_fourteen() {
        let mut solver = PocketSolver::new();
        let lines = solve(&mut solver, "R U R' U' R' F R2 U' R' U' R U R' F'", 1, 14);
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
        let sols: Vec<&String> = lines
            .iter()
            .filter(|l| !l.starts_with("depth=") && l.as_str() != STATUS_FINISHED)
            .collect();
        assert_eq!(sols.len(), 1);
        assert!(parse_alg(sols[0]).len() <= 14);
        assert!(corners_solved_up_to_reorientation(
            "R U R' U' R' F R2 U' R' U' R U R' F'",
            sols[0]
        ));
    }

    #[test]
    fn test_post_alg_prefixes_output() {
        let mut solver = PocketSolver::new();
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        solver.start_search("R U R' U'", "", 1, 6, 8, RUF, "U", "", "", true, &mut update);
        let sol = lines
            .iter()
            .find(|l| !l.starts_with("depth=") && l.as_str() != STATUS_FINISHED)
            .unwrap();
        assert!(sol.starts_with("U "), "post moves lead the line: {sol}");
        // The emitted tail, played after the post move, must solve the cube.
        assert!(corners_solved_up_to_reorientation("R U R' U'", sol));
    }

    #[test]
    fn test_move_cap_override_blocks_solution() {
        let mut solver = PocketSolver::new();
        let mut lines = Vec::new();
        let mut update = |s: &str| lines.push(s.to_string());
        // The only 1-move fix is R', capped to zero uses.
        solver.start_search("R", "", 1, 1, 8, RUF, "", "", "R-:0", true, &mut update);
        assert!(!lines.iter().any(|l| l == "R'"));
        assert_eq!(lines.last().unwrap(), STATUS_FINISHED);
    }

    #[test]
    fn test_persistent_reuse_keeps_table() {
        let mut solver = PersistentPocketSolver::new();
        let mut first = Vec::new();
        let mut update = |s: &str| first.push(s.to_string());
        solver.solve("R", "", 1, 2, 8, RUF, "", "", "", &mut update);
        assert!(first.contains(&"R'".to_string()));
        assert!(solver.solver.prune_table_initialized);
        let mut second = Vec::new();
        let mut update = |s: &str| second.push(s.to_string());
        solver.solve("R2", "", 1, 2, 8, RUF, "", "", "", &mut update);
        assert!(second.contains(&"R2".to_string()));
    }
}
