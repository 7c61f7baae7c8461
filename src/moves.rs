//! The 18 quarter/half turns and the whole-cube rotations.
use std::{fmt, str::FromStr};

use self::Move::*;
use crate::error::Error;

/// One of the six faces a [`Move`] turns.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    /// The face on the opposite side of the cube, used by the move pruner
    /// to collapse commuting opposite-face pairs.
    pub fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }
}

/// A single face turn: clockwise, double, or counter-clockwise (`$3` is the
/// idiomatic rendering of `$'` since Rust identifiers can't hold an
/// apostrophe — `Display`/`FromStr` still speak standard cube notation).
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

/// All 18 moves, face by face, quarter/half/quarter-reverse within a face.
#[rustfmt::skip]
pub const ALL_MOVES: [Move; 18] = [
    U, U2, U3, D, D2, D3, L, L2, L3, R, R2, R3, F, F2, F3, B, B2, B3,
];

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(U),
            "U'" => Ok(U3),
            "U2" => Ok(U2),
            "D" => Ok(D),
            "D'" => Ok(D3),
            "D2" => Ok(D2),
            "L" => Ok(L),
            "L'" => Ok(L3),
            "L2" => Ok(L2),
            "R" => Ok(R),
            "R'" => Ok(R3),
            "R2" => Ok(R2),
            "F" => Ok(F),
            "F'" => Ok(F3),
            "F2" => Ok(F2),
            "B" => Ok(B),
            "B'" => Ok(B3),
            "B2" => Ok(B2),
            _ => Err(Error::InvalidMove(s.to_string())),
        }
    }
}

impl Move {
    /// The face this move turns and how many quarter turns (1, 2 or 3)
    /// to apply that face's tabulated quarter-turn cube.
    #[rustfmt::skip]
    pub fn quarter_turns(self) -> (Face, u8) {
        match self {
            U => (Face::U, 1), U2 => (Face::U, 2), U3 => (Face::U, 3),
            D => (Face::D, 1), D2 => (Face::D, 2), D3 => (Face::D, 3),
            L => (Face::L, 1), L2 => (Face::L, 2), L3 => (Face::L, 3),
            R => (Face::R, 1), R2 => (Face::R, 2), R3 => (Face::R, 3),
            F => (Face::F, 1), F2 => (Face::F, 2), F3 => (Face::F, 3),
            B => (Face::B, 1), B2 => (Face::B, 2), B3 => (Face::B, 3),
        }
    }

    pub fn face(self) -> Face {
        self.quarter_turns().0
    }

    pub fn is_same_face(self, other: Move) -> bool {
        self.face() == other.face()
    }

    /// Inverse of [`Move::quarter_turns`]: the move that turns `face` by
    /// `quarters` quarter turns (mod 4; 0 has no corresponding move).
    /// Used by the solver's move-sequence simplifier to re-fold two
    /// same-face moves into one.
    pub fn from_quarter_turns(face: Face, quarters: u8) -> Option<Self> {
        let quarters = quarters % 4;
        match (face, quarters) {
            (_, 0) => None,
            (Face::U, 1) => Some(U),
            (Face::U, 2) => Some(U2),
            (Face::U, 3) => Some(U3),
            (Face::D, 1) => Some(D),
            (Face::D, 2) => Some(D2),
            (Face::D, 3) => Some(D3),
            (Face::L, 1) => Some(L),
            (Face::L, 2) => Some(L2),
            (Face::L, 3) => Some(L3),
            (Face::R, 1) => Some(R),
            (Face::R, 2) => Some(R2),
            (Face::R, 3) => Some(R3),
            (Face::F, 1) => Some(F),
            (Face::F, 2) => Some(F2),
            (Face::F, 3) => Some(F3),
            (Face::B, 1) => Some(B),
            (Face::B, 2) => Some(B2),
            (Face::B, 3) => Some(B3),
            _ => unreachable!("quarters was reduced mod 4"),
        }
    }

    pub fn get_inverse(self) -> Self {
        match self {
            U => U3, U3 => U, U2 => U2,
            D => D3, D3 => D, D2 => D2,
            L => L3, L3 => L, L2 => L2,
            R => R3, R3 => R, R2 => R2,
            F => F3, F3 => F, F2 => F2,
            B => B3, B3 => B, B2 => B2,
        }
    }
}

/// A whole-cube rotation, used only to bring a cube into a fixed
/// orientation before indexing it — never part of a solution's
/// move list.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Rotation {
    X,
    X2,
    X3,
    Y,
    Y2,
    Y3,
    Z,
    Z2,
    Z3,
}
