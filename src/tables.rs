//! Precomputed move tables: `table[coord * G + g]` is the coordinate reached
//! from `coord` by generator `g`. Entries are raw successor coordinates;
//! every caller multiplies by the generator count itself.

use static_init::dynamic;

use crate::constants::{center_class, inverse_generator, CENTER_ORIENTATIONS, ROTATION_MAP};
use crate::coord::{array_to_index, index_to_array, index_to_o, o_to_index};
use crate::cubie::{Color, Corner, CubieCube, Edge};
use crate::moves::MOVE_CUBES;

/// (slot, orientation) table for one tracked edge: 24 rows.
pub fn edge_move_table(gens: &[CubieCube]) -> Vec<u32> {
    let g = gens.len();
    let mut mt = vec![u32::MAX; 24 * g];
    for i in 0..24 {
        let e = Edge::try_from((i / 2) as u8).unwrap();
        for (j, mv) in gens.iter().enumerate() {
            let (slot, ori) = CubieCube::edge_trace(mv, e, (i % 2) as u8);
            mt[i * g + j] = (2 * slot + ori as usize) as u32;
        }
    }
    mt
}

/// (slot, orientation) table for one tracked corner: 24 rows.
pub fn corner_move_table(gens: &[CubieCube]) -> Vec<u32> {
    let g = gens.len();
    let mut mt = vec![u32::MAX; 24 * g];
    for i in 0..24 {
        let c = Corner::try_from((i / 3) as u8).unwrap();
        for (j, mv) in gens.iter().enumerate() {
            let (slot, ori) = CubieCube::corner_trace(mv, c, (i % 3) as u8);
            mt[i * g + j] = (3 * slot + ori as usize) as u32;
        }
    }
    mt
}

/// Slot-only table for one tracked edge: 12 rows.
pub fn ep_move_table(gens: &[CubieCube]) -> Vec<u32> {
    let g = gens.len();
    let mut mt = vec![u32::MAX; 12 * g];
    for i in 0..12 {
        let e = Edge::try_from(i as u8).unwrap();
        for (j, mv) in gens.iter().enumerate() {
            let (slot, _) = CubieCube::edge_trace(mv, e, 0);
            mt[i * g + j] = slot as u32;
        }
    }
    mt
}

/// Slot-only table for one tracked corner: 8 rows.
pub fn cp_move_table(gens: &[CubieCube]) -> Vec<u32> {
    let g = gens.len();
    let mut mt = vec![u32::MAX; 8 * g];
    for i in 0..8 {
        let c = Corner::try_from(i as u8).unwrap();
        for (j, mv) in gens.iter().enumerate() {
            let (slot, _) = CubieCube::corner_trace(mv, c, 0);
            mt[i * g + j] = slot as u32;
        }
    }
    mt
}

/// Full edge orientation table: 2048 rows.
pub fn eo_move_table(gens: &[CubieCube]) -> Vec<u32> {
    let g = gens.len();
    let mut mt = vec![u32::MAX; 2048 * g];
    let mut eo = [0u8; 12];
    let mut new_eo = [0u8; 12];
    for i in 0..2048 {
        index_to_o(&mut eo, i, 2, 12);
        for (j, mv) in gens.iter().enumerate() {
            for k in 0..12 {
                new_eo[k] = (eo[mv.ep[k] as usize] + mv.eo[k]) % 2;
            }
            mt[i as usize * g + j] = o_to_index(&new_eo, 2, 12);
        }
    }
    mt
}

/// Full corner orientation table: 2187 rows.
pub fn co_move_table(gens: &[CubieCube]) -> Vec<u32> {
    let g = gens.len();
    let mut mt = vec![u32::MAX; 2187 * g];
    let mut co = [0u8; 8];
    let mut new_co = [0u8; 8];
    for i in 0..2187 {
        index_to_o(&mut co, i, 3, 8);
        for (j, mv) in gens.iter().enumerate() {
            for k in 0..8 {
                new_co[k] = (co[mv.cp[k] as usize] + mv.co[k]) % 3;
            }
            mt[i as usize * g + j] = o_to_index(&new_co, 3, 8);
        }
    }
    mt
}

/// Partial-permutation table over `n` tracked cubies. Each generator column
/// is filled together with its inverse column in the successor row, halving
/// the composition work.
pub fn multi_move_table(
    n: usize,
    c: u32,
    pn: usize,
    size: usize,
    single: &[u32],
    g: usize,
) -> Vec<u32> {
    let mut mt = vec![u32::MAX; size * g];
    let mut a = [0u32; 8];
    let mut b = [0u32; 8];
    for i in 0..size {
        index_to_array(&mut a[..n], i as u32, n, c, pn);
        for j in 0..g {
            if mt[i * g + j] != u32::MAX {
                continue;
            }
            for k in 0..n {
                b[k] = single[a[k] as usize * g + j];
            }
            let t = array_to_index(&mut b[..n], n, c, pn);
            mt[i * g + j] = t;
            mt[t as usize * g + inverse_generator(j)] = i as u32;
        }
    }
    mt
}

fn build_center_move_table() -> [[u8; 54]; 24] {
    let mut mt = [[0u8; 54]; 24];
    for (i, row) in CENTER_ORIENTATIONS.iter().enumerate() {
        let center: Vec<Color> = row.iter().map(|&c| Color::try_from(c).unwrap()).collect();
        for j in 0..54 {
            let mv = &MOVE_CUBES.states[j];
            let mut next = [Color::U; 6];
            for k in 0..6 {
                next[k] = center[mv.center[k] as usize];
            }
            mt[i][j] = center_class(&next) as u8;
        }
    }
    mt
}

/// Orientation-class transitions for all 54 moves, built once per process.
#[dynamic]
pub static CENTER_MT: [[u8; 54]; 24] = build_center_move_table();

/// Walk a coordinate through a move table.
pub fn apply_indices(mt: &[u32], g: usize, start: u32, alg: &[usize]) -> u32 {
    alg.iter()
        .fold(start, |c, &m| mt[c as usize * g + m])
}

/// Rewrite an algorithm into the frame reached by the given rotation
/// sequence (face and wide moves stay face and wide moves).
pub fn rotate_alg(alg: &[usize], rotations: &[usize]) -> Vec<usize> {
    if rotations.is_empty() {
        return alg.to_vec();
    }
    let mut class = 0usize;
    for &r in rotations {
        class = CENTER_MT[class][r] as usize;
    }
    alg.iter()
        .map(|&m| ROTATION_MAP[class][m] as usize)
        .collect()
}

/// Rewrite a 27-column generator through a frame change. Slice columns are
/// lifted into the alphabet, mapped, and folded back.
pub fn rotate_htm_move(class: usize, m: usize) -> usize {
    if m < 18 {
        ROTATION_MAP[class][m] as usize
    } else {
        ROTATION_MAP[class][m + 18] as usize - 18
    }
}

/// Inverse frame change of [`rotate_htm_move`].
pub fn rotate_htm_move_reverse(class: usize, m: usize) -> usize {
    use crate::constants::ROTATION_MAP_REVERSE;
    if m < 18 {
        ROTATION_MAP_REVERSE[class][m] as usize
    } else {
        ROTATION_MAP_REVERSE[class][m + 18] as usize - 18
    }
}

/// Rewrite a 27-column algorithm into the frame reached by the given
/// rotation sequence.
pub fn rotate_htm_alg(alg: &[usize], rotations: &[usize]) -> Vec<usize> {
    if rotations.is_empty() {
        return alg.to_vec();
    }
    let mut class = 0usize;
    for &r in rotations {
        class = CENTER_MT[class][r] as usize;
    }
    alg.iter().map(|&m| rotate_htm_move(class, m)).collect()
}
