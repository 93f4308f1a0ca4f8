//! Alphabet tables and the fixed rotation data shared by every solver.
//!
//! The 24 orientation classes index the reachable center permutations; the
//! rotation maps rewrite a move index as seen by an observer rotated into a
//! class, and the converter folds wide moves onto their face-plus-rotation
//! equivalents inside the 27-column table space.

use crate::cubie::Color;

/// All 54 move names, in table-column order.
#[rustfmt::skip]
pub const MOVE_NAMES: [&str; 54] = [
    "U", "U2", "U'", "D", "D2", "D'", "L", "L2", "L'", "R", "R2", "R'",
    "F", "F2", "F'", "B", "B2", "B'",
    "u", "u2", "u'", "d", "d2", "d'", "l", "l2", "l'", "r", "r2", "r'",
    "f", "f2", "f'", "b", "b2", "b'",
    "M", "M2", "M'", "E", "E2", "E'", "S", "S2", "S'",
    "x", "x2", "x'", "y", "y2", "y'", "z", "z2", "z'",
];

/// The 27 table-generator names: slice moves sit right after the face
/// turns, where the alphabet proper has the wide moves.
#[rustfmt::skip]
pub const HTM_MOVE_NAMES: [&str; 27] = [
    "U", "U2", "U'", "D", "D2", "D'", "L", "L2", "L'", "R", "R2", "R'",
    "F", "F2", "F'", "B", "B2", "B'",
    "M", "M2", "M'", "E", "E2", "E'", "S", "S2", "S'",
];

/// Face turns only.
pub const N_FACE_MOVES: usize = 18;
/// Face turns plus slice moves, the generator set of the 27-column tables.
pub const N_HTM_MOVES: usize = 27;
/// Everything the tokenizer understands.
pub const N_ALPHABET: usize = 54;
/// First rotation index in the alphabet.
pub const FIRST_ROTATION: usize = 45;

/// Index of the inverse generator inside the same alphabet: single and prime
/// swap, doubles stay.
pub fn inverse_generator(g: usize) -> usize {
    3 * (g / 3) + (2 - g % 3)
}

/// Find the orientation-class index of a center permutation.
pub fn center_class(center: &[Color; 6]) -> usize {
    CENTER_ORIENTATIONS
        .iter()
        .position(|row| row.iter().zip(center).all(|(&a, &b)| a == b as u8))
        .expect("center permutation is not one of the 24 reachable classes")
}

pub const ROTATION_MAP: [[u8; 54]; 24] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 53],
    [0, 1, 2, 3, 4, 5, 15, 16, 17, 12, 13, 14, 6, 7, 8, 9, 10, 11, 18, 19, 20, 21, 22, 23, 33, 34, 35, 30, 31, 32, 24, 25, 26, 27, 28, 29, 44, 43, 42, 39, 40, 41, 36, 37, 38, 51, 52, 53, 48, 49, 50, 47, 46, 45],
    [0, 1, 2, 3, 4, 5, 9, 10, 11, 6, 7, 8, 15, 16, 17, 12, 13, 14, 18, 19, 20, 21, 22, 23, 27, 28, 29, 24, 25, 26, 33, 34, 35, 30, 31, 32, 38, 37, 36, 39, 40, 41, 44, 43, 42, 47, 46, 45, 48, 49, 50, 53, 52, 51],
    [0, 1, 2, 3, 4, 5, 12, 13, 14, 15, 16, 17, 9, 10, 11, 6, 7, 8, 18, 19, 20, 21, 22, 23, 30, 31, 32, 33, 34, 35, 27, 28, 29, 24, 25, 26, 42, 43, 44, 39, 40, 41, 38, 37, 36, 53, 52, 51, 48, 49, 50, 45, 46, 47],
    [3, 4, 5, 0, 1, 2, 9, 10, 11, 6, 7, 8, 12, 13, 14, 15, 16, 17, 21, 22, 23, 18, 19, 20, 27, 28, 29, 24, 25, 26, 30, 31, 32, 33, 34, 35, 38, 37, 36, 41, 40, 39, 42, 43, 44, 47, 46, 45, 50, 49, 48, 51, 52, 53],
    [3, 4, 5, 0, 1, 2, 12, 13, 14, 15, 16, 17, 6, 7, 8, 9, 10, 11, 21, 22, 23, 18, 19, 20, 30, 31, 32, 33, 34, 35, 24, 25, 26, 27, 28, 29, 42, 43, 44, 41, 40, 39, 36, 37, 38, 53, 52, 51, 50, 49, 48, 47, 46, 45],
    [3, 4, 5, 0, 1, 2, 6, 7, 8, 9, 10, 11, 15, 16, 17, 12, 13, 14, 21, 22, 23, 18, 19, 20, 24, 25, 26, 27, 28, 29, 33, 34, 35, 30, 31, 32, 36, 37, 38, 41, 40, 39, 44, 43, 42, 45, 46, 47, 50, 49, 48, 53, 52, 51],
    [3, 4, 5, 0, 1, 2, 15, 16, 17, 12, 13, 14, 9, 10, 11, 6, 7, 8, 21, 22, 23, 18, 19, 20, 33, 34, 35, 30, 31, 32, 27, 28, 29, 24, 25, 26, 44, 43, 42, 41, 40, 39, 38, 37, 36, 51, 52, 53, 50, 49, 48, 45, 46, 47],
    [6, 7, 8, 9, 10, 11, 3, 4, 5, 0, 1, 2, 12, 13, 14, 15, 16, 17, 24, 25, 26, 27, 28, 29, 21, 22, 23, 18, 19, 20, 30, 31, 32, 33, 34, 35, 39, 40, 41, 38, 37, 36, 42, 43, 44, 48, 49, 50, 47, 46, 45, 51, 52, 53],
    [15, 16, 17, 12, 13, 14, 3, 4, 5, 0, 1, 2, 6, 7, 8, 9, 10, 11, 33, 34, 35, 30, 31, 32, 21, 22, 23, 18, 19, 20, 24, 25, 26, 27, 28, 29, 39, 40, 41, 42, 43, 44, 36, 37, 38, 48, 49, 50, 53, 52, 51, 47, 46, 45],
    [9, 10, 11, 6, 7, 8, 3, 4, 5, 0, 1, 2, 15, 16, 17, 12, 13, 14, 27, 28, 29, 24, 25, 26, 21, 22, 23, 18, 19, 20, 33, 34, 35, 30, 31, 32, 39, 40, 41, 36, 37, 38, 44, 43, 42, 48, 49, 50, 45, 46, 47, 53, 52, 51],
    [12, 13, 14, 15, 16, 17, 3, 4, 5, 0, 1, 2, 9, 10, 11, 6, 7, 8, 30, 31, 32, 33, 34, 35, 21, 22, 23, 18, 19, 20, 27, 28, 29, 24, 25, 26, 39, 40, 41, 44, 43, 42, 38, 37, 36, 48, 49, 50, 51, 52, 53, 45, 46, 47],
    [9, 10, 11, 6, 7, 8, 0, 1, 2, 3, 4, 5, 12, 13, 14, 15, 16, 17, 27, 28, 29, 24, 25, 26, 18, 19, 20, 21, 22, 23, 30, 31, 32, 33, 34, 35, 41, 40, 39, 36, 37, 38, 42, 43, 44, 50, 49, 48, 45, 46, 47, 51, 52, 53],
    [12, 13, 14, 15, 16, 17, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 30, 31, 32, 33, 34, 35, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 41, 40, 39, 44, 43, 42, 36, 37, 38, 50, 49, 48, 51, 52, 53, 47, 46, 45],
    [6, 7, 8, 9, 10, 11, 0, 1, 2, 3, 4, 5, 15, 16, 17, 12, 13, 14, 24, 25, 26, 27, 28, 29, 18, 19, 20, 21, 22, 23, 33, 34, 35, 30, 31, 32, 41, 40, 39, 38, 37, 36, 44, 43, 42, 50, 49, 48, 47, 46, 45, 53, 52, 51],
    [15, 16, 17, 12, 13, 14, 0, 1, 2, 3, 4, 5, 9, 10, 11, 6, 7, 8, 33, 34, 35, 30, 31, 32, 18, 19, 20, 21, 22, 23, 27, 28, 29, 24, 25, 26, 41, 40, 39, 42, 43, 44, 38, 37, 36, 50, 49, 48, 53, 52, 51, 45, 46, 47],
    [12, 13, 14, 15, 16, 17, 6, 7, 8, 9, 10, 11, 3, 4, 5, 0, 1, 2, 30, 31, 32, 33, 34, 35, 24, 25, 26, 27, 28, 29, 21, 22, 23, 18, 19, 20, 36, 37, 38, 44, 43, 42, 39, 40, 41, 45, 46, 47, 51, 52, 53, 50, 49, 48],
    [6, 7, 8, 9, 10, 11, 15, 16, 17, 12, 13, 14, 3, 4, 5, 0, 1, 2, 24, 25, 26, 27, 28, 29, 33, 34, 35, 30, 31, 32, 21, 22, 23, 18, 19, 20, 44, 43, 42, 38, 37, 36, 39, 40, 41, 51, 52, 53, 47, 46, 45, 50, 49, 48],
    [15, 16, 17, 12, 13, 14, 9, 10, 11, 6, 7, 8, 3, 4, 5, 0, 1, 2, 33, 34, 35, 30, 31, 32, 27, 28, 29, 24, 25, 26, 21, 22, 23, 18, 19, 20, 38, 37, 36, 42, 43, 44, 39, 40, 41, 47, 46, 45, 53, 52, 51, 50, 49, 48],
    [9, 10, 11, 6, 7, 8, 12, 13, 14, 15, 16, 17, 3, 4, 5, 0, 1, 2, 27, 28, 29, 24, 25, 26, 30, 31, 32, 33, 34, 35, 21, 22, 23, 18, 19, 20, 42, 43, 44, 36, 37, 38, 39, 40, 41, 53, 52, 51, 45, 46, 47, 50, 49, 48],
    [15, 16, 17, 12, 13, 14, 6, 7, 8, 9, 10, 11, 0, 1, 2, 3, 4, 5, 33, 34, 35, 30, 31, 32, 24, 25, 26, 27, 28, 29, 18, 19, 20, 21, 22, 23, 36, 37, 38, 42, 43, 44, 41, 40, 39, 45, 46, 47, 53, 52, 51, 48, 49, 50],
    [9, 10, 11, 6, 7, 8, 15, 16, 17, 12, 13, 14, 0, 1, 2, 3, 4, 5, 27, 28, 29, 24, 25, 26, 33, 34, 35, 30, 31, 32, 18, 19, 20, 21, 22, 23, 44, 43, 42, 36, 37, 38, 41, 40, 39, 51, 52, 53, 45, 46, 47, 48, 49, 50],
    [12, 13, 14, 15, 16, 17, 9, 10, 11, 6, 7, 8, 0, 1, 2, 3, 4, 5, 30, 31, 32, 33, 34, 35, 27, 28, 29, 24, 25, 26, 18, 19, 20, 21, 22, 23, 38, 37, 36, 44, 43, 42, 41, 40, 39, 47, 46, 45, 51, 52, 53, 48, 49, 50],
    [6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 0, 1, 2, 3, 4, 5, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 18, 19, 20, 21, 22, 23, 42, 43, 44, 38, 37, 36, 41, 40, 39, 53, 52, 51, 47, 46, 45, 48, 49, 50],
];

pub const ROTATION_MAP_REVERSE: [[u8; 54]; 24] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 53],
    [0, 1, 2, 3, 4, 5, 12, 13, 14, 15, 16, 17, 9, 10, 11, 6, 7, 8, 18, 19, 20, 21, 22, 23, 30, 31, 32, 33, 34, 35, 27, 28, 29, 24, 25, 26, 42, 43, 44, 39, 40, 41, 38, 37, 36, 53, 52, 51, 48, 49, 50, 45, 46, 47],
    [0, 1, 2, 3, 4, 5, 9, 10, 11, 6, 7, 8, 15, 16, 17, 12, 13, 14, 18, 19, 20, 21, 22, 23, 27, 28, 29, 24, 25, 26, 33, 34, 35, 30, 31, 32, 38, 37, 36, 39, 40, 41, 44, 43, 42, 47, 46, 45, 48, 49, 50, 53, 52, 51],
    [0, 1, 2, 3, 4, 5, 15, 16, 17, 12, 13, 14, 6, 7, 8, 9, 10, 11, 18, 19, 20, 21, 22, 23, 33, 34, 35, 30, 31, 32, 24, 25, 26, 27, 28, 29, 44, 43, 42, 39, 40, 41, 36, 37, 38, 51, 52, 53, 48, 49, 50, 47, 46, 45],
    [3, 4, 5, 0, 1, 2, 9, 10, 11, 6, 7, 8, 12, 13, 14, 15, 16, 17, 21, 22, 23, 18, 19, 20, 27, 28, 29, 24, 25, 26, 30, 31, 32, 33, 34, 35, 38, 37, 36, 41, 40, 39, 42, 43, 44, 47, 46, 45, 50, 49, 48, 51, 52, 53],
    [3, 4, 5, 0, 1, 2, 12, 13, 14, 15, 16, 17, 6, 7, 8, 9, 10, 11, 21, 22, 23, 18, 19, 20, 30, 31, 32, 33, 34, 35, 24, 25, 26, 27, 28, 29, 42, 43, 44, 41, 40, 39, 36, 37, 38, 53, 52, 51, 50, 49, 48, 47, 46, 45],
    [3, 4, 5, 0, 1, 2, 6, 7, 8, 9, 10, 11, 15, 16, 17, 12, 13, 14, 21, 22, 23, 18, 19, 20, 24, 25, 26, 27, 28, 29, 33, 34, 35, 30, 31, 32, 36, 37, 38, 41, 40, 39, 44, 43, 42, 45, 46, 47, 50, 49, 48, 53, 52, 51],
    [3, 4, 5, 0, 1, 2, 15, 16, 17, 12, 13, 14, 9, 10, 11, 6, 7, 8, 21, 22, 23, 18, 19, 20, 33, 34, 35, 30, 31, 32, 27, 28, 29, 24, 25, 26, 44, 43, 42, 41, 40, 39, 38, 37, 36, 51, 52, 53, 50, 49, 48, 45, 46, 47],
    [9, 10, 11, 6, 7, 8, 0, 1, 2, 3, 4, 5, 12, 13, 14, 15, 16, 17, 27, 28, 29, 24, 25, 26, 18, 19, 20, 21, 22, 23, 30, 31, 32, 33, 34, 35, 41, 40, 39, 36, 37, 38, 42, 43, 44, 50, 49, 48, 45, 46, 47, 51, 52, 53],
    [9, 10, 11, 6, 7, 8, 12, 13, 14, 15, 16, 17, 3, 4, 5, 0, 1, 2, 27, 28, 29, 24, 25, 26, 30, 31, 32, 33, 34, 35, 21, 22, 23, 18, 19, 20, 42, 43, 44, 36, 37, 38, 39, 40, 41, 53, 52, 51, 45, 46, 47, 50, 49, 48],
    [9, 10, 11, 6, 7, 8, 3, 4, 5, 0, 1, 2, 15, 16, 17, 12, 13, 14, 27, 28, 29, 24, 25, 26, 21, 22, 23, 18, 19, 20, 33, 34, 35, 30, 31, 32, 39, 40, 41, 36, 37, 38, 44, 43, 42, 48, 49, 50, 45, 46, 47, 53, 52, 51],
    [9, 10, 11, 6, 7, 8, 15, 16, 17, 12, 13, 14, 0, 1, 2, 3, 4, 5, 27, 28, 29, 24, 25, 26, 33, 34, 35, 30, 31, 32, 18, 19, 20, 21, 22, 23, 44, 43, 42, 36, 37, 38, 41, 40, 39, 51, 52, 53, 45, 46, 47, 48, 49, 50],
    [6, 7, 8, 9, 10, 11, 3, 4, 5, 0, 1, 2, 12, 13, 14, 15, 16, 17, 24, 25, 26, 27, 28, 29, 21, 22, 23, 18, 19, 20, 30, 31, 32, 33, 34, 35, 39, 40, 41, 38, 37, 36, 42, 43, 44, 48, 49, 50, 47, 46, 45, 51, 52, 53],
    [6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 0, 1, 2, 3, 4, 5, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 18, 19, 20, 21, 22, 23, 42, 43, 44, 38, 37, 36, 41, 40, 39, 53, 52, 51, 47, 46, 45, 48, 49, 50],
    [6, 7, 8, 9, 10, 11, 0, 1, 2, 3, 4, 5, 15, 16, 17, 12, 13, 14, 24, 25, 26, 27, 28, 29, 18, 19, 20, 21, 22, 23, 33, 34, 35, 30, 31, 32, 41, 40, 39, 38, 37, 36, 44, 43, 42, 50, 49, 48, 47, 46, 45, 53, 52, 51],
    [6, 7, 8, 9, 10, 11, 15, 16, 17, 12, 13, 14, 3, 4, 5, 0, 1, 2, 24, 25, 26, 27, 28, 29, 33, 34, 35, 30, 31, 32, 21, 22, 23, 18, 19, 20, 44, 43, 42, 38, 37, 36, 39, 40, 41, 51, 52, 53, 47, 46, 45, 50, 49, 48],
    [15, 16, 17, 12, 13, 14, 6, 7, 8, 9, 10, 11, 0, 1, 2, 3, 4, 5, 33, 34, 35, 30, 31, 32, 24, 25, 26, 27, 28, 29, 18, 19, 20, 21, 22, 23, 36, 37, 38, 42, 43, 44, 41, 40, 39, 45, 46, 47, 53, 52, 51, 48, 49, 50],
    [15, 16, 17, 12, 13, 14, 0, 1, 2, 3, 4, 5, 9, 10, 11, 6, 7, 8, 33, 34, 35, 30, 31, 32, 18, 19, 20, 21, 22, 23, 27, 28, 29, 24, 25, 26, 41, 40, 39, 42, 43, 44, 38, 37, 36, 50, 49, 48, 53, 52, 51, 45, 46, 47],
    [15, 16, 17, 12, 13, 14, 9, 10, 11, 6, 7, 8, 3, 4, 5, 0, 1, 2, 33, 34, 35, 30, 31, 32, 27, 28, 29, 24, 25, 26, 21, 22, 23, 18, 19, 20, 38, 37, 36, 42, 43, 44, 39, 40, 41, 47, 46, 45, 53, 52, 51, 50, 49, 48],
    [15, 16, 17, 12, 13, 14, 3, 4, 5, 0, 1, 2, 6, 7, 8, 9, 10, 11, 33, 34, 35, 30, 31, 32, 21, 22, 23, 18, 19, 20, 24, 25, 26, 27, 28, 29, 39, 40, 41, 42, 43, 44, 36, 37, 38, 48, 49, 50, 53, 52, 51, 47, 46, 45],
    [12, 13, 14, 15, 16, 17, 6, 7, 8, 9, 10, 11, 3, 4, 5, 0, 1, 2, 30, 31, 32, 33, 34, 35, 24, 25, 26, 27, 28, 29, 21, 22, 23, 18, 19, 20, 36, 37, 38, 44, 43, 42, 39, 40, 41, 45, 46, 47, 51, 52, 53, 50, 49, 48],
    [12, 13, 14, 15, 16, 17, 3, 4, 5, 0, 1, 2, 9, 10, 11, 6, 7, 8, 30, 31, 32, 33, 34, 35, 21, 22, 23, 18, 19, 20, 27, 28, 29, 24, 25, 26, 39, 40, 41, 44, 43, 42, 38, 37, 36, 48, 49, 50, 51, 52, 53, 45, 46, 47],
    [12, 13, 14, 15, 16, 17, 9, 10, 11, 6, 7, 8, 0, 1, 2, 3, 4, 5, 30, 31, 32, 33, 34, 35, 27, 28, 29, 24, 25, 26, 18, 19, 20, 21, 22, 23, 38, 37, 36, 44, 43, 42, 41, 40, 39, 47, 46, 45, 51, 52, 53, 48, 49, 50],
    [12, 13, 14, 15, 16, 17, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 30, 31, 32, 33, 34, 35, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 41, 40, 39, 44, 43, 42, 36, 37, 38, 50, 49, 48, 51, 52, 53, 47, 46, 45],
];

pub const CENTER_ORIENTATIONS: [[u8; 6]; 24] = [
    [0, 1, 2, 3, 4, 5],
    [0, 1, 4, 5, 3, 2],
    [0, 1, 3, 2, 5, 4],
    [0, 1, 5, 4, 2, 3],
    [1, 0, 3, 2, 4, 5],
    [1, 0, 4, 5, 2, 3],
    [1, 0, 2, 3, 5, 4],
    [1, 0, 5, 4, 3, 2],
    [3, 2, 0, 1, 4, 5],
    [3, 2, 4, 5, 1, 0],
    [3, 2, 1, 0, 5, 4],
    [3, 2, 5, 4, 0, 1],
    [2, 3, 1, 0, 4, 5],
    [2, 3, 4, 5, 0, 1],
    [2, 3, 0, 1, 5, 4],
    [2, 3, 5, 4, 1, 0],
    [5, 4, 2, 3, 0, 1],
    [5, 4, 0, 1, 3, 2],
    [5, 4, 3, 2, 1, 0],
    [5, 4, 1, 0, 2, 3],
    [4, 5, 2, 3, 1, 0],
    [4, 5, 1, 0, 3, 2],
    [4, 5, 3, 2, 0, 1],
    [4, 5, 0, 1, 2, 3],
];

pub const WIDE_CONVERTER: [u8; 45] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 3, 4, 5, 0, 1, 2, 9, 10, 11, 6, 7, 8, 15, 16, 17, 12, 13, 14, 18, 19, 20, 21, 22, 23, 24, 25, 26];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::CubieCube;
    use crate::moves::Move;

    #[test]
    fn test_rotation_maps_are_inverse_permutations() {
        for c in 0..24 {
            for m in 0..54 {
                assert_eq!(
                    ROTATION_MAP_REVERSE[c][ROTATION_MAP[c][m] as usize] as usize,
                    m
                );
            }
        }
    }

    #[test]
    fn test_identity_class_maps_identically() {
        for m in 0..54 {
            assert_eq!(ROTATION_MAP[0][m] as usize, m);
            assert_eq!(ROTATION_MAP_REVERSE[0][m] as usize, m);
        }
    }

    #[test]
    fn test_center_classes_match_rotation_states() {
        assert_eq!(center_class(&crate::cubie::SOLVED_CUBIE_CUBE.center), 0);
        for m in [Move::x, Move::y, Move::z, Move::x2, Move::y3] {
            let cc = CubieCube::default().apply_move(m);
            let class = center_class(&cc.center);
            for (i, &color) in CENTER_ORIENTATIONS[class].iter().enumerate() {
                assert_eq!(color, cc.center[i] as u8);
            }
        }
    }

    #[test]
    fn test_converter_folds_wides_onto_faces() {
        // u is D plus a rotation, r is L plus a rotation.
        assert_eq!(WIDE_CONVERTER[Move::Uw as usize], Move::D as u8);
        assert_eq!(WIDE_CONVERTER[Move::Rw as usize], Move::L as u8);
        // Slice moves land in the dedicated columns 18..27.
        assert_eq!(WIDE_CONVERTER[Move::M as usize], 18);
        assert_eq!(WIDE_CONVERTER[Move::S3 as usize], 26);
        for m in 0..18 {
            assert_eq!(WIDE_CONVERTER[m] as usize, m);
        }
    }

    #[test]
    fn test_inverse_generator_involution() {
        for g in 0..54 {
            assert_eq!(inverse_generator(inverse_generator(g)), g);
            assert_eq!(g / 3, inverse_generator(g) / 3);
        }
        assert_eq!(inverse_generator(0), 2);
        assert_eq!(inverse_generator(1), 1);
    }

    #[test]
    fn test_rotation_map_keeps_sections() {
        for c in 0..24 {
            for m in 0..54 {
                let mapped = ROTATION_MAP[c][m] as usize;
                assert_eq!(m / 18, mapped / 18, "class {c} move {m}");
            }
        }
    }
}
