//! Dense BFS pruning tables. One byte per composite state; 255 marks a cell
//! the flood never reached within the builder depth, read as "at least
//! builder depth + 1 moves remaining".

use crate::constants::{ROTATION_MAP_REVERSE, WIDE_CONVERTER};

pub const UNREACHED: u8 = 255;

/// Flood-fill distances over the product of two coordinates.
///
/// `seeds` are the depth-0 goal states; every enabled generator expands both
/// tables in lockstep. Stops early once a ply adds nothing.
pub fn fill_pair_prune_table(
    prune: &mut [u8],
    size2: usize,
    depth: u32,
    table1: &[u32],
    table2: &[u32],
    g: usize,
    move_restrict: &[usize],
    seeds: &[(u32, u32)],
) {
    let size = prune.len();
    let mut num = 0usize;
    for &(s1, s2) in seeds {
        let cell = s1 as usize * size2 + s2 as usize;
        if prune[cell] == UNREACHED {
            prune[cell] = 0;
            num += 1;
        }
    }
    let mut num_old = num;
    for d in 0..depth {
        let next_d = (d + 1) as u8;
        for i in 0..size {
            if prune[i] as u32 != d {
                continue;
            }
            let i1 = (i / size2) * g;
            let i2 = (i % size2) * g;
            for &j in move_restrict {
                let next = table1[i1 + j] as usize * size2 + table2[i2 + j] as usize;
                if prune[next] == UNREACHED {
                    prune[next] = next_d;
                    num += 1;
                }
            }
        }
        if num == num_old {
            break;
        }
        num_old = num;
    }
}

/// Allocate-and-fill convenience wrapper around [`fill_pair_prune_table`].
pub fn pair_prune_table(
    size1: usize,
    size2: usize,
    depth: u32,
    table1: &[u32],
    table2: &[u32],
    g: usize,
    move_restrict: &[usize],
    seeds: &[(u32, u32)],
) -> Vec<u8> {
    let mut prune = vec![UNREACHED; size1 * size2];
    fill_pair_prune_table(
        &mut prune,
        size2,
        depth,
        table1,
        table2,
        g,
        move_restrict,
        seeds,
    );
    prune
}

/// Rotation-aware flood fill for the pseudo solvers.
///
/// The enabled move list is expressed in the 54-token alphabet; every cell
/// carries the orientation class it was first reached in, and each user move
/// is re-expressed through the converter for that class. Enabled rotations
/// widen the expansion: the same user move is also probed from every
/// orientation one rotation away, without costing a ply.
///
/// Returns the per-cell orientation tags alongside the filled table.
#[allow(clippy::too_many_arguments)]
pub fn fill_pseudo_prune_table(
    prune: &mut [u8],
    tags: &mut [u8],
    size2: usize,
    depth: u32,
    table1: &[u32],
    table2: &[u32],
    move_restrict: &[usize],
    center_mt: &[[u8; 54]; 24],
    seeds: &[(u32, u32)],
) {
    let size = prune.len();
    let g = 27;
    let mut moves = Vec::new();
    let mut rots = Vec::new();
    for &i in move_restrict {
        if i < 45 {
            moves.push(i);
        } else {
            rots.push(i);
        }
    }
    let mut num = 0usize;
    for &(s1, s2) in seeds {
        let cell = s1 as usize * size2 + s2 as usize;
        if prune[cell] == UNREACHED {
            prune[cell] = 0;
            tags[cell] = 0;
            num += 1;
        }
    }
    let mut num_old = num;
    for d in 0..depth {
        let next_d = (d + 1) as u8;
        for i in 0..size {
            if prune[i] as u32 != d {
                continue;
            }
            let i1 = (i / size2) * g;
            let i2 = (i % size2) * g;
            let center = tags[i] as usize;
            for &j in &moves {
                let mut computed = [false; 27];
                let m = WIDE_CONVERTER[ROTATION_MAP_REVERSE[center][j] as usize] as usize;
                if computed[m] {
                    continue;
                }
                let next = table1[i1 + m] as usize * size2 + table2[i2 + m] as usize;
                if prune[next] == UNREACHED {
                    tags[next] = center_mt[center][j];
                    prune[next] = next_d;
                    num += 1;
                }
                computed[m] = true;
                for &r in &rots {
                    let center_r = center_mt[center][r] as usize;
                    let m = WIDE_CONVERTER[ROTATION_MAP_REVERSE[center_r][j] as usize] as usize;
                    if computed[m] {
                        continue;
                    }
                    let next = table1[i1 + m] as usize * size2 + table2[i2 + m] as usize;
                    if prune[next] == UNREACHED {
                        tags[next] = center_mt[center][j];
                        prune[next] = next_d;
                        num += 1;
                    }
                    computed[m] = true;
                }
            }
        }
        if num == num_old {
            break;
        }
        num_old = num;
    }
}
