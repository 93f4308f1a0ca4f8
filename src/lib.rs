//! # RCross
//! `RCross` - crate for rubiks cube cross/xcross training solvers.
//!
//! Every solver follows the same pattern: cubie-level move algebra at the
//! bottom, dense integer coordinates over the tracked cubies, precomputed
//! move tables, BFS pruning tables (dense or sparse), and an iterative
//! deepening search that streams solutions through a callback, shortest
//! first.

pub mod error;
/// Module containing the move alphabet and rotation constants.
pub mod constants;
/// Module for represent a cube on the cubie level.
pub mod cubie;
/// Module for represent moves.
pub mod moves;
/// Module for coordinate encoders.
pub mod coord;
/// Module for precomputed move tables.
pub mod tables;
/// Module for dense pruning tables.
pub mod prune;
/// Module for the sparse BFS pattern database.
pub mod sparse;
/// Module for option-string decoding.
pub mod options;
/// Module for Solvers.
pub mod solver;

use rand::random;

use moves::{Move, ALL_MOVES};

/// Length of a generated scramble.
const SCRAMBLE_LEN: usize = 25;

/// Generate a random scramble formula: face turns only, no two consecutive
/// turns of the same face.
pub fn scramble() -> Vec<Move> {
    let mut seq = Vec::with_capacity(SCRAMBLE_LEN);
    let mut last_face = usize::MAX;
    while seq.len() < SCRAMBLE_LEN {
        let face = random::<usize>() % 6;
        if face == last_face {
            continue;
        }
        last_face = face;
        let order = random::<usize>() % 3;
        seq.push(ALL_MOVES[3 * face + order]);
    }
    seq
}

#[cfg(test)]
mod tests {
    use crate::cubie::CubieCube;
    use crate::scramble;

    #[test]
    fn test_scramble() {
        let r = scramble();
        assert_eq!(r.len(), 25);
        for w in r.windows(2) {
            assert_ne!(w[0] as usize / 3, w[1] as usize / 3, "same face twice");
        }
        assert!(CubieCube::default().apply_moves(&r).verify().is_ok());
    }
}
