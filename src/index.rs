//! Subspace indexing functions: project a full [`CubeState`] onto an
//! integer identifying its position within some reduced view, used both to
//! build pattern databases and to look heuristic values up in them.

use crate::cube::CubeState;
use crate::math::{choose, rank_combination, rank_partial_permutation, rank_permutation};

const CORNER_ORIENTATIONS: u64 = 2187; // 3^7
const EDGE_SUBSET_ARRANGEMENTS: u64 = 665_280; // 12P6
const EDGE_SUBSET_ORIENTATIONS: u64 = 64; // 2^6

/// Size of the corner PDB: 8! * 3^7.
pub const CORNER_DB_SIZE: usize = 40_320 * 2187;
/// Size of either edge-subset PDB: 12P6 * 2^6.
pub const EDGE_DB_SIZE: usize = (EDGE_SUBSET_ARRANGEMENTS * EDGE_SUBSET_ORIENTATIONS) as usize;
/// Size of the sign-constrained edge permutation PDB: 12!/2.
pub const EDGE_PERM_DB_SIZE: usize = 239_500_800;
/// Size of the Thistlethwaite G1 index: edge orientation, 2^11.
pub const THISTLE_G1_SIZE: usize = 2048;
/// Size of the Thistlethwaite G2 index: corner orientation * C(12,4).
pub const THISTLE_G2_SIZE: usize = (CORNER_ORIENTATIONS * 495) as usize;

fn corner_orientation_index(co: &[u8; 8]) -> u64 {
    co[..7].iter().enumerate().fold(0u64, |acc, (i, &o)| acc + o as u64 * 3u64.pow(i as u32))
}

/// Rank of the 8-corner permutation (Lehmer code) times its 3^7 orientation
/// index.
pub fn corner_index(cube: &CubeState) -> u64 {
    rank_permutation(&cube.cp) * CORNER_ORIENTATIONS + corner_orientation_index(&cube.co)
}

fn position_of(perm: &[u8], piece: u8) -> u8 {
    perm.iter()
        .position(|&p| p == piece)
        .expect("piece must appear exactly once in a valid permutation") as u8
}

/// Rank of where the given 6 edge pieces currently sit (nPk over 12), times
/// their 2^6 orientation index. Used for both the G1 subset (pieces 0..6)
/// and the G2 subset (pieces 6..12) — the two are symmetric complements of
/// each other.
fn edge_subset_index(cube: &CubeState, piece_ids: &[u8; 6]) -> u64 {
    let positions: Vec<u8> = piece_ids.iter().map(|&p| position_of(&cube.ep, p)).collect();
    let perm_rank = rank_partial_permutation(&positions, 12);
    let orient_index: u64 = piece_ids
        .iter()
        .enumerate()
        .map(|(i, &p)| cube.eo[position_of(&cube.ep, p) as usize] as u64 * (1 << i))
        .sum();
    perm_rank * EDGE_SUBSET_ORIENTATIONS + orient_index
}

const EDGE_G1_PIECES: [u8; 6] = [0, 1, 2, 3, 4, 5];
const EDGE_G2_PIECES: [u8; 6] = [6, 7, 8, 9, 10, 11];

pub fn edge_g1_index(cube: &CubeState) -> u64 {
    edge_subset_index(cube, &EDGE_G1_PIECES)
}

pub fn edge_g2_index(cube: &CubeState) -> u64 {
    edge_subset_index(cube, &EDGE_G2_PIECES)
}

/// Sign-constrained rank of the full 12-edge permutation: the Lehmer-code
/// digit for the second-to-last element is exactly the permutation's
/// parity bit (swapping the last two remaining elements in Lehmer
/// construction always flips parity), so dividing the full rank by 2 is a
/// bijection from one fixed parity class onto `0..12!/2`.
pub fn edge_permutation_index(cube: &CubeState) -> u64 {
    rank_permutation(&cube.ep) / 2
}

/// Edge orientation as an 11-bit index.
pub fn thistle_g1_index(cube: &CubeState) -> u64 {
    cube.eo[..11].iter().enumerate().fold(0u64, |acc, (i, &o)| acc + (o as u64) << i)
}

const M_SLICE_PIECES: [u8; 4] = [4, 5, 6, 7]; // FR, FL, BL, BR

/// Corner orientation times the combination rank of which four slots hold
/// the M-slice pieces.
pub fn thistle_g2_index(cube: &CubeState) -> u64 {
    let mut slots: Vec<u8> = (0u8..12)
        .filter(|&slot| M_SLICE_PIECES.contains(&cube.ep[slot as usize]))
        .collect();
    slots.sort_unstable();
    let combo_rank = rank_combination(&slots);
    corner_orientation_index(&cube.co) * 495 + combo_rank
}
