//! The facelet (sticker) representation: a 54-character string of face
//! colors, and the one-directional conversion into the cubie-level
//! [`CubeState`] the searchers operate on.
use std::convert::TryFrom;

use crate::cube::CubeState;
use crate::error::Error;

/// A sticker color, named after the face it belongs to on a solved cube.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl TryFrom<char> for Color {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'U' => Ok(Color::U),
            'R' => Ok(Color::R),
            'F' => Ok(Color::F),
            'D' => Ok(Color::D),
            'L' => Ok(Color::L),
            'B' => Ok(Color::B),
            _ => Err(Error::InvalidFacelet(format!("unknown facelet color '{c}'"))),
        }
    }
}

/// The 54 stickers, in U(0..9) R(9..18) F(18..27) D(27..36) L(36..45)
/// B(45..54) order, each face read left-to-right, top-to-bottom as seen
/// head-on with U on top and F toward the viewer.
#[derive(Debug, Clone, Copy)]
pub struct FaceletCube {
    pub facelets: [Color; 54],
}

impl TryFrom<&str> for FaceletCube {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 54 {
            return Err(Error::InvalidFacelet(format!(
                "expected 54 facelets, got {}",
                chars.len()
            )));
        }
        let mut facelets = [Color::U; 54];
        let mut counts = [0u8; 6];
        for (i, &c) in chars.iter().enumerate() {
            let color = Color::try_from(c)?;
            counts[color as usize] += 1;
            facelets[i] = color;
        }
        if counts.iter().any(|&n| n != 9) {
            return Err(Error::InvalidFacelet(
                "every color must appear exactly 9 times".into(),
            ));
        }
        const CENTERS: [(usize, Color); 6] = [
            (4, Color::U),
            (13, Color::R),
            (22, Color::F),
            (31, Color::D),
            (40, Color::L),
            (49, Color::B),
        ];
        for (idx, expected) in CENTERS {
            if facelets[idx] != expected {
                return Err(Error::InvalidFacelet(
                    "center facelets must match a solved cube's face identity".into(),
                ));
            }
        }
        Ok(FaceletCube { facelets })
    }
}

/// Which three facelets make up each corner, in my fixed slot order
/// (ULB, URB, URF, ULF, DLF, DLB, DRB, DRF); the first entry of every
/// triplet is always the cube's U/D facelet, which is what orientation is
/// measured against.
const CORNER_FACELET: [[usize; 3]; 8] = [
    [0, 36, 47],  // ULB
    [2, 45, 11],  // URB
    [8, 9, 20],   // URF
    [6, 18, 38],  // ULF
    [27, 44, 24], // DLF
    [33, 53, 42], // DLB
    [35, 17, 51], // DRB
    [29, 26, 15], // DRF
];

const CORNER_COLOR: [[Color; 3]; 8] = [
    [Color::U, Color::L, Color::B], // ULB
    [Color::U, Color::B, Color::R], // URB
    [Color::U, Color::R, Color::F], // URF
    [Color::U, Color::F, Color::L], // ULF
    [Color::D, Color::L, Color::F], // DLF
    [Color::D, Color::B, Color::L], // DLB
    [Color::D, Color::R, Color::B], // DRB
    [Color::D, Color::F, Color::R], // DRF
];

/// Which two facelets make up each edge, in my fixed slot order (UB, UR,
/// UF, UL, FR, FL, BL, BR, DF, DR, DB, DL).
const EDGE_FACELET: [[usize; 2]; 12] = [
    [1, 46],  // UB
    [5, 10],  // UR
    [7, 19],  // UF
    [3, 37],  // UL
    [23, 12], // FR
    [21, 41], // FL
    [50, 39], // BL
    [48, 14], // BR
    [28, 25], // DF
    [32, 16], // DR
    [34, 52], // DB
    [30, 43], // DL
];

const EDGE_COLOR: [[Color; 2]; 12] = [
    [Color::U, Color::B], // UB
    [Color::U, Color::R], // UR
    [Color::U, Color::F], // UF
    [Color::U, Color::L], // UL
    [Color::F, Color::R], // FR
    [Color::F, Color::L], // FL
    [Color::B, Color::L], // BL
    [Color::B, Color::R], // BR
    [Color::D, Color::F], // DF
    [Color::D, Color::R], // DR
    [Color::D, Color::B], // DB
    [Color::D, Color::L], // DL
];

impl TryFrom<&FaceletCube> for CubeState {
    type Error = Error;

    fn try_from(fc: &FaceletCube) -> Result<Self, Self::Error> {
        let mut cp = [0u8; 8];
        let mut co = [0u8; 8];
        for (slot, facelet_idxs) in CORNER_FACELET.iter().enumerate() {
            let colors = facelet_idxs.map(|i| fc.facelets[i]);
            let ori = colors
                .iter()
                .position(|&c| c == Color::U || c == Color::D)
                .ok_or_else(|| Error::InvalidFacelet("corner has no U/D facelet".into()))?;
            let col1 = colors[(ori + 1) % 3];
            let col2 = colors[(ori + 2) % 3];
            let piece = CORNER_COLOR
                .iter()
                .position(|c| c[1] == col1 && c[2] == col2)
                .ok_or_else(|| Error::InvalidFacelet("no corner matches these three stickers".into()))?;
            cp[slot] = piece as u8;
            co[slot] = ori as u8;
        }

        let mut ep = [0u8; 12];
        let mut eo = [0u8; 12];
        for (slot, facelet_idxs) in EDGE_FACELET.iter().enumerate() {
            let c0 = fc.facelets[facelet_idxs[0]];
            let c1 = fc.facelets[facelet_idxs[1]];
            let mut found = None;
            for (piece, colors) in EDGE_COLOR.iter().enumerate() {
                if colors[0] == c0 && colors[1] == c1 {
                    found = Some((piece, 0));
                    break;
                }
                if colors[0] == c1 && colors[1] == c0 {
                    found = Some((piece, 1));
                    break;
                }
            }
            let (piece, ori) =
                found.ok_or_else(|| Error::InvalidFacelet("no edge matches these two stickers".into()))?;
            ep[slot] = piece as u8;
            eo[slot] = ori as u8;
        }

        let state = CubeState { cp, co, ep, eo };
        state.validate()?;
        Ok(state)
    }
}
