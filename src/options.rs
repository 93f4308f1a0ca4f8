//! Decoding of the caller-supplied option strings.
//!
//! Every format is forgiving: unknown move tokens and unparsable numbers
//! are silently dropped, matching the behaviour the hosts rely on.

use std::str::FromStr;

use crate::moves::Move;

/// Split an underscore-separated move-restrict id, unescaping `-` to `'`
/// (`U_U2_U-_R` reads as U U2 U' R).
pub fn parse_restrict_id(id: &str) -> Vec<String> {
    id.split('_')
        .filter(|t| !t.is_empty())
        .map(|t| t.replacen('-', "'", 1))
        .collect()
}

/// Positions of a move-restrict id inside the given alphabet, dropping
/// everything the alphabet does not name.
pub fn restrict_indices(id: &str, names: &[&str]) -> Vec<usize> {
    parse_restrict_id(id)
        .iter()
        .filter_map(|t| names.iter().position(|n| n == t))
        .collect()
}

/// A run of face letters, each expanded to its three turn orders
/// (the F2L pages pass restrictions this way).
pub fn faces_to_moves(faces: &str) -> Vec<Move> {
    let mut moves = Vec::new();
    for c in faces.chars() {
        for suffix in ["", "2", "'"] {
            if let Ok(m) = Move::from_str(&format!("{c}{suffix}")) {
                moves.push(m);
            }
        }
    }
    moves
}

fn sanitize_override(token: &str) -> String {
    if token == "EMPTY" {
        String::new()
    } else {
        token.replacen('-', "'", 1)
    }
}

/// Priority of a move's base letter within its rotation axis. Lower turns
/// first; a later base directly after an earlier one on the same axis is
/// redundant and gets forbidden by default.
fn axis_order(base: char) -> Option<(u8, u8)> {
    match base {
        'U' => Some((0, 0)),
        'D' => Some((0, 1)),
        'E' => Some((0, 2)),
        'u' => Some((0, 3)),
        'd' => Some((0, 4)),
        'y' => Some((0, 5)),
        'L' => Some((1, 0)),
        'R' => Some((1, 1)),
        'M' => Some((1, 2)),
        'l' => Some((1, 3)),
        'r' => Some((1, 4)),
        'x' => Some((1, 5)),
        'F' => Some((2, 0)),
        'B' => Some((2, 1)),
        'S' => Some((2, 2)),
        'f' => Some((2, 3)),
        'b' => Some((2, 4)),
        'z' => Some((2, 5)),
        _ => None,
    }
}

fn forbidden_by_default(prev: &str, next: &str) -> bool {
    let (Some(p), Some(n)) = (prev.chars().next(), next.chars().next()) else {
        return false;
    };
    if p == n {
        return true;
    }
    match (axis_order(p), axis_order(n)) {
        (Some((pa, po)), Some((na, no))) => pa == na && po > no,
        _ => false,
    }
}

/// Build the move-adjacency prohibition matrix over `cols` generators, with
/// one extra row for "no previous move".
///
/// The default pattern forbids same-face repeats and the non-canonical
/// ordering of commuting moves on one axis, over the enabled moves only.
/// `overrides` is a pipe-separated list of `prev~next` pairs (move tokens,
/// `EMPTY` for the no-previous row) toggling individual cells.
pub fn build_ma2(restrict_id: &str, overrides: &str, names: &[&str]) -> Vec<bool> {
    let active = parse_restrict_id(restrict_id);
    let cols = names.len();
    let mut ma2 = vec![false; (cols + 1) * cols];

    let index_of = |token: &str| -> Option<usize> { names.iter().position(|&n| n == token) };

    let mut rows: Vec<String> = active.clone();
    rows.push(String::new());
    for row in &rows {
        for col in &active {
            if !forbidden_by_default(row, col) {
                continue;
            }
            let Some(ci) = index_of(col) else { continue };
            let ri = if row.is_empty() {
                cols
            } else {
                match index_of(row) {
                    Some(r) => r,
                    None => continue,
                }
            };
            ma2[ri * cols + ci] = true;
        }
    }

    for part in overrides.split('|') {
        let Some((row_raw, col_raw)) = part.split_once('~') else {
            continue;
        };
        let row = sanitize_override(row_raw);
        let col = sanitize_override(col_raw);
        let Some(ci) = index_of(&col) else { continue };
        let ri = if row.is_empty() {
            cols
        } else {
            match index_of(&row) {
                Some(r) => r,
                None => continue,
            }
        };
        ma2[ri * cols + ci] = !ma2[ri * cols + ci];
    }
    ma2
}

/// Face-turn adjacency matrix with the axis rule baked in for all 18 moves:
/// same face, or same axis with the later face first.
pub fn face_axis_ma() -> Vec<bool> {
    let mut ma = Vec::with_capacity(19 * 18);
    for prev in 0..19 {
        for i in 0..18 {
            let forbidden = prev < 18
                && (i / 3 == prev / 3
                    || ((i / 3) / 2 == (prev / 3) / 2 && (prev / 3) % 2 > (i / 3) % 2));
            ma.push(forbidden);
        }
    }
    ma
}

/// Same-layer adjacency matrix over the 27 table generators, used inside the
/// rotation-aware searches where the axis canonicalisation cannot be applied
/// in the rotated frame.
pub fn same_layer_ma_htm() -> Vec<bool> {
    let mut ma = vec![false; 28 * 27];
    for prev in 0..28 {
        for i in 0..27 {
            if prev < 27 && i / 3 == prev / 3 && (prev < 18) == (i < 18) {
                ma[prev * 27 + i] = true;
            }
        }
    }
    ma
}

/// Per-move usage caps: 20 for every enabled move, then `move:cap` tokens
/// (underscore-separated) override individual caps. Bad numbers are ignored.
pub fn build_move_caps(restrict_id: &str, caps: &str, names: &[&str]) -> Vec<u32> {
    let index_of = |token: &str| -> Option<usize> { names.iter().position(|&n| n == token) };
    let mut mc = vec![0u32; names.len()];
    for token in parse_restrict_id(restrict_id) {
        if let Some(i) = index_of(&token) {
            mc[i] = 20;
        }
    }
    for part in caps.split('_') {
        let Some((move_raw, value)) = part.split_once(':') else {
            continue;
        };
        let token = sanitize_override(move_raw);
        let (Some(i), Ok(cap)) = (index_of(&token), value.parse::<u32>()) else {
            continue;
        };
        mc[i] = cap;
    }
    mc
}

/// Names of the 24 orientation classes as y/x/z prefix pairs, in class
/// order. The pseudo pages send pipe-separated `first_second` pairs.
const ORIENTATION_CLASS_NAMES: [&str; 24] = [
    "", "y", "y2", "y'", "z2", "z2 y", "z2 y2", "z2 y'", "z'", "z' y", "z' y2", "z' y'", "z",
    "z y", "z y2", "z y'", "x'", "x' y", "x' y2", "x' y'", "x", "x y", "x y2", "x y'",
];

/// Decode the allowed ending orientation classes of a pseudo search.
pub fn parse_center_offsets(s: &str) -> Vec<u8> {
    let mut offsets = Vec::new();
    for part in s.split('|') {
        if part.is_empty() {
            continue;
        }
        let Some((first_raw, second_raw)) = part.split_once('_') else {
            continue;
        };
        let first = sanitize_override(first_raw);
        let second = sanitize_override(second_raw);
        let key = match (first.is_empty(), second.is_empty()) {
            (false, false) => format!("{first} {second}"),
            (true, false) => second,
            _ => first,
        };
        if let Some(class) = ORIENTATION_CLASS_NAMES.iter().position(|&n| n == key) {
            offsets.push(class as u8);
        }
    }
    offsets
}

/// Decode space-separated F2L slot tags into the BL/BR/FR/FL flag array.
pub fn parse_slot_flags(s: &str) -> [bool; 4] {
    let mut flags = [false; 4];
    for token in s.split_whitespace() {
        match token {
            "BL" => flags[0] = true,
            "BR" => flags[1] = true,
            "FR" => flags[2] = true,
            "FL" => flags[3] = true,
            _ => {}
        }
    }
    flags
}

/// Decode space-separated last-layer tags into the CP/CO/EP/EO flag array.
pub fn parse_ll_flags(s: &str) -> [bool; 4] {
    let mut flags = [false; 4];
    for token in s.split_whitespace() {
        match token {
            "CP" => flags[0] = true,
            "CO" => flags[1] = true,
            "EP" => flags[2] = true,
            "EO" => flags[3] = true,
            _ => {}
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restrict_id_unescaping() {
        assert_eq!(parse_restrict_id("U_U2_U-_R"), vec!["U", "U2", "U'", "R"]);
        let names = &crate::constants::HTM_MOVE_NAMES;
        assert_eq!(restrict_indices("U_U2_U-_R", names), vec![0, 1, 2, 9]);
        assert_eq!(restrict_indices("M_M2_M-", names), vec![18, 19, 20]);
        // Unknown tokens vanish.
        assert_eq!(restrict_indices("U_Q_R_u", names), vec![0, 9]);
    }

    #[test]
    fn test_axis_boundary_defaults() {
        let ma = face_axis_ma();
        let (u, d2, d) = (0usize, 4usize, 3usize);
        // U after D2 is forbidden, D after U is allowed.
        assert!(ma[d2 * 18 + u]);
        assert!(!ma[u * 18 + d]);
        // Same face always forbidden, fresh start never.
        assert!(ma[u * 18 + 1]);
        assert!(!ma[18 * 18 + u]);
    }

    #[test]
    fn test_build_ma2_default_and_override() {
        let id = "U_U2_U-_D_D2_D-_R_R2_R-";
        let names = &crate::constants::HTM_MOVE_NAMES;
        let ma2 = build_ma2(id, "", names);
        let (u, d) = (0usize, 3usize);
        // D then U forbidden by the axis order, U then D allowed.
        assert!(ma2[d * 27 + u]);
        assert!(!ma2[u * 27 + d]);
        // Toggling flips both directions independently.
        let ma2 = build_ma2(id, "D~U|U~D", names);
        assert!(!ma2[d * 27 + u]);
        assert!(ma2[u * 27 + d]);
        // EMPTY targets the no-previous row.
        let ma2 = build_ma2(id, "EMPTY~U2", names);
        assert!(ma2[27 * 27 + 1]);
    }

    #[test]
    fn test_move_caps() {
        let mc = build_move_caps(
            "U_U2_U-_R",
            "R:2_U2:0_Z:9_R2:x",
            &crate::constants::HTM_MOVE_NAMES,
        );
        assert_eq!(mc[0], 20);
        assert_eq!(mc[1], 0);
        assert_eq!(mc[9], 2);
        // Disabled moves stay at zero, junk tokens are dropped.
        assert_eq!(mc[3], 0);
        assert_eq!(mc[10], 0);
    }

    #[test]
    fn test_center_offsets() {
        assert_eq!(parse_center_offsets("EMPTY_EMPTY"), vec![0]);
        assert_eq!(parse_center_offsets("EMPTY_y|EMPTY_y-"), vec![1, 3]);
        assert_eq!(parse_center_offsets("z2_y2"), vec![6]);
        assert_eq!(parse_center_offsets("x_EMPTY|x_y"), vec![20, 21]);
    }

    #[test]
    fn test_slot_and_ll_flags() {
        assert_eq!(parse_slot_flags("BL FR"), [true, false, true, false]);
        assert_eq!(parse_ll_flags("CP CO EP EO"), [true; 4]);
        assert_eq!(parse_ll_flags("EO junk"), [false, false, false, true]);
    }
}
