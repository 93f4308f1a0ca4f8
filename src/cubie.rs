use std::fmt;
use std::ops::Mul;

use self::{Corner::*, Edge::*};
use crate::error::Error;
use crate::moves::{Move, MOVE_CUBES};

/// Represents the 6 face colors, in the face order used throughout the
/// crate: Up, Down, Left, Right, Front, Back.
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy, Hash)]
pub enum Color {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Color {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::U),
            1 => Ok(Color::D),
            2 => Ok(Color::L),
            3 => Ok(Color::R),
            4 => Ok(Color::F),
            5 => Ok(Color::B),
            _ => Err(Error::InvalidColor),
        }
    }
}

/// Represents the 8 corners on the cube, described by the layers they sit on.
/// Slots 0..3 are the upper layer, 4..7 the bottom layer.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Eq, Hash)]
pub enum Corner {
    UBL, UBR, URF, UFL, DBL, DRB, DRF, DLF,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Corner {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UBL),
            1 => Ok(UBR),
            2 => Ok(URF),
            3 => Ok(UFL),
            4 => Ok(DBL),
            5 => Ok(DRB),
            6 => Ok(DRF),
            7 => Ok(DLF),
            _ => Err(Error::InvalidCorner),
        }
    }
}

/// Represents the 12 edges on the cube. Slots 0..3 are the equator layer,
/// 4..7 the upper layer, 8..11 the bottom layer.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Eq, Hash)]
pub enum Edge {
    BL, BR, FR, FL, UB, UR, UF, UL, DB, DR, DF, DL,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Edge {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BL),
            1 => Ok(BR),
            2 => Ok(FR),
            3 => Ok(FL),
            4 => Ok(UB),
            5 => Ok(UR),
            6 => Ok(UF),
            7 => Ok(UL),
            8 => Ok(DB),
            9 => Ok(DR),
            10 => Ok(DF),
            11 => Ok(DL),
            _ => Err(Error::InvalidEdge),
        }
    }
}

pub const ALL_CORNERS: [Corner; 8] = [UBL, UBR, URF, UFL, DBL, DRB, DRF, DLF];
pub const ALL_EDGES: [Edge; 12] = [BL, BR, FR, FL, UB, UR, UF, UL, DB, DR, DF, DL];

/// Cube on the cubie level.
///
/// Whole-cube rotations are modelled as center permutations only; the cubie
/// arrays always stay in the fixed spatial frame.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CubieCube {
    /// Center permutation, relative to SOLVED_CUBIE_CUBE.
    pub center: [Color; 6],
    /// Corner permutation, relative to SOLVED_CUBIE_CUBE.
    pub cp: [Corner; 8],
    /// Corner orientation, 3 possible values: 0 (oriented), 1 (twisted clockwise), 2 (twisted counter-clockwise).
    pub co: [u8; 8],
    /// Edge permutation, relative to SOLVED_CUBIE_CUBE.
    pub ep: [Edge; 12],
    /// Edge orientation, 2 possible values: 0 (oriented), 1 (flipped).
    pub eo: [u8; 12],
}

/// Solved cube on the cubie level.
pub const SOLVED_CUBIE_CUBE: CubieCube = CubieCube {
    center: [Color::U, Color::D, Color::L, Color::R, Color::F, Color::B],
    cp: [UBL, UBR, URF, UFL, DBL, DRB, DRF, DLF],
    co: [0; 8],
    ep: [BL, BR, FR, FL, UB, UR, UF, UL, DB, DR, DF, DL],
    eo: [0; 12],
};

impl Default for CubieCube {
    fn default() -> Self {
        SOLVED_CUBIE_CUBE
    }
}

impl Mul for CubieCube {
    type Output = Self;

    /// Composition: each slot of `rhs` names the slot of `self` it draws
    /// from, and its orientation digit is added on top.
    fn mul(self, rhs: CubieCube) -> Self::Output {
        let mut out = self;
        for (slot, (&src, &twist)) in rhs.cp.iter().zip(&rhs.co).enumerate() {
            out.cp[slot] = self.cp[src as usize];
            out.co[slot] = (self.co[src as usize] + twist) % 3;
        }
        for (slot, (&src, &flip)) in rhs.ep.iter().zip(&rhs.eo).enumerate() {
            out.ep[slot] = self.ep[src as usize];
            out.eo[slot] = (self.eo[src as usize] + flip) % 2;
        }
        for (slot, &src) in rhs.center.iter().enumerate() {
            out.center[slot] = self.center[src as usize];
        }
        out
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (c, o) in self.cp.iter().zip(&self.co) {
            write!(f, "({c},{o})")?;
        }
        for (e, o) in self.ep.iter().zip(&self.eo) {
            write!(f, "({e},{o})")?;
        }
        Ok(())
    }
}

impl From<&Vec<Move>> for CubieCube {
    fn from(moves: &Vec<Move>) -> Self {
        moves
            .iter()
            .fold(SOLVED_CUBIE_CUBE, |cc, &m| cc.apply_move(m))
    }
}

impl CubieCube {
    /// Applies a move to the current state.
    pub fn apply_move(self, m: Move) -> Self {
        self * MOVE_CUBES.states[m as usize]
    }

    /// Applies the sequence of moves to the current state.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |acc, &m| acc.apply_move(m))
    }

    /// Follow a single edge cubie through a move.
    ///
    /// The cubie is assumed to sit in its home slot with orientation `ori`;
    /// only its destination slot and orientation are computed, nothing else.
    /// This is the subset composition used to fill per-cubie move tables
    /// without composing full states.
    pub fn edge_trace(mv: &CubieCube, e: Edge, ori: u8) -> (usize, u8) {
        let slot = mv.ep.iter().position(|&x| x == e).unwrap();
        (slot, (ori + mv.eo[slot]) % 2)
    }

    /// Follow a single corner cubie through a move. See [`CubieCube::edge_trace`].
    pub fn corner_trace(mv: &CubieCube, c: Corner, ori: u8) -> (usize, u8) {
        let slot = mv.cp.iter().position(|&x| x == c).unwrap();
        (slot, (ori + mv.co[slot]) % 3)
    }

    /// Give the parity of the corner permutation.
    pub fn corner_parity(&self) -> bool {
        let mut s = 0;
        for i in (1..8).rev() {
            for j in (0..i).rev() {
                if self.cp[j] > self.cp[i] {
                    s += 1;
                }
            }
        }
        (s % 2) == 0
    }

    /// Give the parity of the edge permutation. A solvable cube has the same corner and edge parity.
    pub fn edge_parity(&self) -> bool {
        let mut s = 0;
        for i in (1..12).rev() {
            for j in (0..i).rev() {
                if self.ep[j] > self.ep[i] {
                    s += 1;
                }
            }
        }
        (s % 2) == 0
    }

    /// Check if this cubie cube is a valid permutation-with-orientation state.
    pub fn verify(&self) -> Result<bool, Error> {
        let mut edge_count = [0; 12];
        for e in self.ep {
            edge_count[e as usize] += 1;
        }
        if edge_count.iter().any(|&c| c != 1) {
            return Err(Error::InvalidEdge);
        }
        if self.eo.iter().map(|&o| o as u32).sum::<u32>() % 2 != 0 {
            return Err(Error::InvalidEdge);
        }

        let mut corner_count = [0; 8];
        for c in self.cp {
            corner_count[c as usize] += 1;
        }
        if corner_count.iter().any(|&c| c != 1) {
            return Err(Error::InvalidCorner);
        }
        if self.co.iter().map(|&o| o as u32).sum::<u32>() % 3 != 0 {
            return Err(Error::InvalidCorner);
        }

        let mut center_count = [0; 6];
        for c in self.center {
            center_count[c as usize] += 1;
        }
        if center_count.iter().any(|&c| c != 1) {
            return Err(Error::InvalidColor);
        }

        if self.edge_parity() != self.corner_parity() {
            return Err(Error::InvalidCubieValue);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move::*;

    #[test]
    fn test_eq() {
        assert_eq!(CubieCube::default(), SOLVED_CUBIE_CUBE);
    }

    #[test]
    fn test_face_turn_order() {
        for m in [U, D, L, R, F, B] {
            let mut cc = CubieCube::default();
            for _ in 0..4 {
                cc = cc.apply_move(m);
            }
            assert_eq!(cc, CubieCube::default(), "{m} has order 4");
        }
    }

    #[test]
    fn test_invariants_preserved() {
        let moves = vec![R, U, R3, U3, F2, M, E, S, Rw, y, L, D2, B3, x];
        let mut cc = CubieCube::default();
        for &m in &moves {
            cc = cc.apply_move(m);
            assert!(cc.verify().is_ok(), "invalid state after {m}");
        }
    }

    #[test]
    fn test_sexy_move_order_six() {
        let sexy = vec![R, U, R3, U3];
        let mut cc = CubieCube::default();
        for _ in 0..6 {
            cc = cc.apply_moves(&sexy);
        }
        assert_eq!(cc, CubieCube::default());
    }

    #[test]
    fn test_slice_is_outer_pair_plus_rotation() {
        // E leaves the same cubie arrangement as U D' up to the frame change.
        let e = CubieCube::default().apply_move(E);
        let ud = CubieCube::default().apply_moves(&[U, D3]);
        assert_eq!(e.cp, ud.cp);
        assert_eq!(e.ep, ud.ep);
        assert_ne!(e.center, ud.center);
    }

    #[test]
    fn test_rotations_fix_cubies() {
        for m in [x, x2, x3, y, y2, y3, z, z2, z3] {
            let cc = CubieCube::default().apply_move(m);
            assert_eq!(cc.cp, SOLVED_CUBIE_CUBE.cp);
            assert_eq!(cc.ep, SOLVED_CUBIE_CUBE.ep);
        }
    }

    #[test]
    fn test_edge_trace_matches_full_compose() {
        for m in [U, D, L, R, F, B, M2, S] {
            let mv = MOVE_CUBES.states[m as usize];
            for e in ALL_EDGES {
                let full = CubieCube::default().apply_move(m);
                let slot_full = full.ep.iter().position(|&edge| edge == e).unwrap();
                let (slot, ori) = CubieCube::edge_trace(&mv, e, 0);
                assert_eq!(slot, slot_full);
                assert_eq!(ori, full.eo[slot_full]);
            }
        }
    }

    #[test]
    fn test_corner_trace_matches_full_compose() {
        for m in [U, D, L, R, F, B] {
            let mv = MOVE_CUBES.states[m as usize];
            for c in ALL_CORNERS {
                let full = CubieCube::default().apply_move(m);
                let slot_full = full.cp.iter().position(|&corner| corner == c).unwrap();
                let (slot, ori) = CubieCube::corner_trace(&mv, c, 0);
                assert_eq!(slot, slot_full);
                assert_eq!(ori, full.co[slot_full]);
            }
        }
    }

    #[test]
    fn test_parity() {
        let cc = CubieCube::default();
        assert!(cc.corner_parity());
        assert!(cc.edge_parity());

        let cc = CubieCube::from(&vec![R, U, R3, U3, R3, F, R, F3]);
        assert_eq!(cc.corner_parity(), cc.edge_parity());
    }
}
