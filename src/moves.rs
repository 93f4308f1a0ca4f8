use std::{fmt, str::FromStr};

use static_init::dynamic;

use crate::constants::MOVE_NAMES;
use crate::cubie::{Color, CubieCube, SOLVED_CUBIE_CUBE};
use crate::cubie::{Corner::*, Edge::*};
use crate::error::Error;

/// The full move alphabet, in table-column order.
///
/// Face Turns: U D L R F B, each clockwise ($), double ($2) and
/// counter-clockwise ($3, printed $').
/// Wide Moves (two layers, printed lower case): Uw..Bw. On the cubie level a
/// wide move is the opposite face's turn plus a whole-cube rotation.
/// Slice Moves: M follows the L direction, E follows D, S follows F.
/// Cube Rotations: x follows R, y follows U, z follows F. Rotations never
/// touch the cubie arrays, they only permute the centers.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    U, U2, U3,
    D, D2, D3,
    L, L2, L3,
    R, R2, R3,
    F, F2, F3,
    B, B2, B3,
    Uw, Uw2, Uw3,
    Dw, Dw2, Dw3,
    Lw, Lw2, Lw3,
    Rw, Rw2, Rw3,
    Fw, Fw2, Fw3,
    Bw, Bw2, Bw3,
    M, M2, M3,
    E, E2, E3,
    S, S2, S3,
    x, x2, x3,
    y, y2, y3,
    z, z2, z3,
}

use Move::*;

/// The 18 face turns, the default restriction of the non-pseudo solvers.
pub const FACE_MOVES: [Move; 18] = [
    U, U2, U3, D, D2, D3, L, L2, L3, R, R2, R3, F, F2, F3, B, B2, B3,
];

pub const ALL_MOVES: [Move; 54] = [
    U, U2, U3, D, D2, D3, L, L2, L3, R, R2, R3, F, F2, F3, B, B2, B3, Uw, Uw2, Uw3, Dw, Dw2, Dw3,
    Lw, Lw2, Lw3, Rw, Rw2, Rw3, Fw, Fw2, Fw3, Bw, Bw2, Bw3, M, M2, M3, E, E2, E3, S, S2, S3, x,
    x2, x3, y, y2, y3, z, z2, z3,
];

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", MOVE_NAMES[*self as usize])
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Wide moves are accepted in both common notations (u / Uw).
        let s = match s {
            "Uw" => "u",
            "Uw2" => "u2",
            "Uw'" => "u'",
            "Dw" => "d",
            "Dw2" => "d2",
            "Dw'" => "d'",
            "Lw" => "l",
            "Lw2" => "l2",
            "Lw'" => "l'",
            "Rw" => "r",
            "Rw2" => "r2",
            "Rw'" => "r'",
            "Fw" => "f",
            "Fw2" => "f2",
            "Fw'" => "f'",
            "Bw" => "b",
            "Bw2" => "b2",
            "Bw'" => "b'",
            other => other,
        };
        MOVE_NAMES
            .iter()
            .position(|&n| n == s)
            .map(|i| ALL_MOVES[i])
            .ok_or(Error::InvalidScramble)
    }
}

impl Move {
    /// Index of this move in the table-column alphabet.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_rotation(self) -> bool {
        self as usize >= 45
    }

    /// Single turns and primes swap, doubles are their own inverse.
    pub fn get_inverse(self) -> Self {
        let i = self as usize;
        ALL_MOVES[3 * (i / 3) + (2 - i % 3)]
    }
}

/// The six basic face turns described by permutations and changes in orientation.
///
/// U_MOVE
pub const U_MOVE: CubieCube = CubieCube {
    center: [Color::U, Color::D, Color::L, Color::R, Color::F, Color::B],
    cp: [UFL, UBL, UBR, URF, DBL, DRB, DRF, DLF],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [BL, BR, FR, FL, UL, UB, UR, UF, DB, DR, DF, DL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The six basic face turns described by permutations and changes in orientation.
///
/// D_MOVE
pub const D_MOVE: CubieCube = CubieCube {
    center: [Color::U, Color::D, Color::L, Color::R, Color::F, Color::B],
    cp: [UBL, UBR, URF, UFL, DRB, DRF, DLF, DBL],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [BL, BR, FR, FL, UB, UR, UF, UL, DR, DF, DL, DB],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The six basic face turns described by permutations and changes in orientation.
///
/// L_MOVE
pub const L_MOVE: CubieCube = CubieCube {
    center: [Color::U, Color::D, Color::L, Color::R, Color::F, Color::B],
    cp: [DBL, UBR, URF, UBL, DLF, DRB, DRF, UFL], // permutation of the corners
    co: [2, 0, 0, 1, 1, 0, 0, 2],                 // changes of the orientations of the corners
    ep: [DL, BR, FR, UL, UB, UR, UF, BL, DB, DR, DF, FL], // permutation of the edges
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],     // changes of the orientations of the edges
};

/// The six basic face turns described by permutations and changes in orientation.
///
/// R_MOVE
pub const R_MOVE: CubieCube = CubieCube {
    center: [Color::U, Color::D, Color::L, Color::R, Color::F, Color::B],
    cp: [UBL, URF, DRF, UFL, DBL, UBR, DRB, DLF],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [BL, UR, DR, FL, UB, FR, UF, UL, DB, BR, DF, DL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The six basic face turns described by permutations and changes in orientation.
///
/// F_MOVE
pub const F_MOVE: CubieCube = CubieCube {
    center: [Color::U, Color::D, Color::L, Color::R, Color::F, Color::B],
    cp: [UBL, UBR, UFL, DLF, DBL, DRB, URF, DRF],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [BL, BR, UF, DF, UB, UR, FL, UL, DB, DR, FR, DL],
    eo: [0, 0, 1, 1, 0, 0, 1, 0, 0, 0, 1, 0],
};

/// The six basic face turns described by permutations and changes in orientation.
///
/// B_MOVE
pub const B_MOVE: CubieCube = CubieCube {
    center: [Color::U, Color::D, Color::L, Color::R, Color::F, Color::B],
    cp: [UBR, DRB, URF, UFL, UBL, DBL, DRF, DLF],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UB, DB, FR, FL, BR, UR, UF, UL, BL, DR, DF, DL],
    eo: [1, 1, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
};

/// Whole-cube rotation around the R axis: centers only.
pub const X_ROT: CubieCube = CubieCube {
    center: [Color::F, Color::B, Color::L, Color::R, Color::D, Color::U],
    ..SOLVED_CUBIE_CUBE
};

/// Whole-cube rotation around the U axis: centers only.
pub const Y_ROT: CubieCube = CubieCube {
    center: [Color::U, Color::D, Color::F, Color::B, Color::R, Color::L],
    ..SOLVED_CUBIE_CUBE
};

/// Whole-cube rotation around the F axis: centers only.
pub const Z_ROT: CubieCube = CubieCube {
    center: [Color::L, Color::R, Color::D, Color::U, Color::F, Color::B],
    ..SOLVED_CUBIE_CUBE
};

pub struct AllMoveCubes {
    /// One composed cubie state per alphabet entry, in [`ALL_MOVES`] order.
    pub states: [CubieCube; 54],
}

impl AllMoveCubes {
    pub fn new() -> Self {
        let mut states = [CubieCube::default(); 54];
        let faces = [U_MOVE, D_MOVE, L_MOVE, R_MOVE, F_MOVE, B_MOVE];
        for (f, &base) in faces.iter().enumerate() {
            states[3 * f] = base;
            states[3 * f + 1] = base * base;
            states[3 * f + 2] = base * base * base;
        }
        let rots = [X_ROT, Y_ROT, Z_ROT];
        for (r, &base) in rots.iter().enumerate() {
            states[45 + 3 * r] = base;
            states[45 + 3 * r + 1] = base * base;
            states[45 + 3 * r + 2] = base * base * base;
        }
        // Wide moves: the opposite face turn re-framed by a rotation.
        for k in 0..3 {
            states[Uw as usize + k] = states[D as usize + k] * states[y as usize + k];
            states[Dw as usize + k] = states[U as usize + k] * states[y as usize + 2 - k];
            states[Lw as usize + k] = states[R as usize + k] * states[x as usize + 2 - k];
            states[Rw as usize + k] = states[L as usize + k] * states[x as usize + k];
            states[Fw as usize + k] = states[B as usize + k] * states[z as usize + k];
            states[Bw as usize + k] = states[F as usize + k] * states[z as usize + 2 - k];
        }
        // Slice moves: both outer layers counter-turned plus a rotation.
        for k in 0..3 {
            states[M as usize + k] =
                states[R as usize + k] * states[L as usize + 2 - k] * states[x as usize + 2 - k];
            states[E as usize + k] =
                states[U as usize + k] * states[D as usize + 2 - k] * states[y as usize + 2 - k];
            states[S as usize + k] =
                states[F as usize + 2 - k] * states[B as usize + k] * states[z as usize + k];
        }
        Self { states }
    }
}

/// All 54 composed move cubes, built once per process.
#[dynamic]
pub static MOVE_CUBES: AllMoveCubes = AllMoveCubes::new();

/// The 18 face-turn generators, in table-column order.
pub fn face_generators() -> Vec<CubieCube> {
    MOVE_CUBES.states[..18].to_vec()
}

/// The 27 half-turn-metric generators: 18 face turns plus the 9 slice moves.
/// Wide moves are not generators; they are re-expressed as the opposite face
/// plus a rotation through the converter table.
pub fn htm_generators() -> Vec<CubieCube> {
    let mut gens = MOVE_CUBES.states[..18].to_vec();
    gens.extend_from_slice(&MOVE_CUBES.states[36..45]);
    gens
}

/// Tokenize a space separated algorithm into alphabet indices, keeping only
/// tokens below `limit`. Malformed tokens are silently dropped.
pub fn tokenize(s: &str, limit: usize) -> Vec<usize> {
    s.split_whitespace()
        .filter_map(|t| Move::from_str(t).ok())
        .map(|m| m as usize)
        .filter(|&m| m < limit)
        .collect()
}

/// Tokenize into the 27-column table space: face turns keep their index,
/// slice moves fold down next to them, everything else is dropped.
pub fn tokenize_htm(s: &str) -> Vec<usize> {
    s.split_whitespace()
        .filter_map(|t| Move::from_str(t).ok())
        .filter_map(|m| match m as usize {
            i if i < 18 => Some(i),
            i if (36..45).contains(&i) => Some(i - 18),
            _ => None,
        })
        .collect()
}

/// Parse a space separated algorithm, dropping malformed tokens.
pub fn parse_alg(s: &str) -> Vec<Move> {
    s.split_whitespace()
        .filter_map(|t| Move::from_str(t).ok())
        .collect()
}

/// Space-join alphabet indices back into a move string.
pub fn format_indices(alg: &[usize]) -> String {
    alg.iter()
        .map(|&m| MOVE_NAMES[m])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Space-join moves back into a move string.
pub fn format_alg(alg: &[Move]) -> String {
    alg.iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn inverse_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.get_inverse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::CubieCube;

    #[test]
    fn test_parse_print_round_trip() {
        let s = "R U2 R' u M' E2 x' z b2";
        let alg = parse_alg(s);
        assert_eq!(format_alg(&alg), s);
    }

    #[test]
    fn test_tokenizer_drops_garbage() {
        assert_eq!(tokenize("R  W T' U2", 18), vec![9, 1]);
        assert_eq!(tokenize("R u", 18), vec![9]);
        assert_eq!(tokenize("R u", 54), vec![9, 18]);
    }

    #[test]
    fn test_inverse_pairs() {
        assert_eq!(U.get_inverse(), U3);
        assert_eq!(U3.get_inverse(), U);
        assert_eq!(F2.get_inverse(), F2);
        assert_eq!(Rw.get_inverse(), Rw3);
        assert_eq!(z3.get_inverse(), z);
        for &m in &ALL_MOVES {
            let cc = CubieCube::default().apply_move(m).apply_move(m.get_inverse());
            assert_eq!(cc, CubieCube::default());
        }
    }

    #[test]
    fn test_wide_equals_face_plus_rotation() {
        // u and D differ only by frame: same cubie action.
        let u_wide = MOVE_CUBES.states[Uw as usize];
        let d = MOVE_CUBES.states[D as usize];
        assert_eq!(u_wide.cp, d.cp);
        assert_eq!(u_wide.ep, d.ep);
        assert_ne!(u_wide.center, d.center);
    }

    #[test]
    fn test_slice_moves_match_reference_data() {
        // M from the composed table against the hand-checked reference row.
        let m = MOVE_CUBES.states[M as usize];
        let expect_cp = [3usize, 2, 6, 7, 0, 1, 5, 4];
        let expect_co = [2u8, 1, 2, 1, 1, 2, 1, 2];
        for i in 0..8 {
            assert_eq!(m.cp[i] as usize, expect_cp[i]);
            assert_eq!(m.co[i], expect_co[i]);
        }
        let e = MOVE_CUBES.states[E as usize];
        let expect_ep = [0usize, 1, 2, 3, 7, 4, 5, 6, 11, 8, 9, 10];
        for i in 0..12 {
            assert_eq!(e.ep[i] as usize, expect_ep[i]);
        }
        let s = MOVE_CUBES.states[S as usize];
        let expect_eo = [1u8, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1, 0];
        assert_eq!(s.eo, expect_eo);
    }

    #[test]
    fn test_all_moves_valid() {
        for &m in &ALL_MOVES {
            assert!(MOVE_CUBES.states[m as usize].verify().is_ok(), "{m}");
        }
    }
}
