//! Error define.

use thiserror::Error;

/// Errors produced by the cube model, pattern-database persistence and the
/// searchers built on top of them.
#[derive(Error, Debug)]
pub enum Error {
    /// A cube state fails one of the three parity invariants: the
    /// corner/edge permutation parities disagree, or an orientation sum is
    /// not a multiple of 3 (corners) / 2 (edges).
    #[error("cube state violates a parity invariant and cannot be solved")]
    InvalidCube,

    /// A facelet string was the wrong length, used a color outside
    /// {U,R,F,D,L,B}, or did not have exactly 9 facelets of each color.
    #[error("invalid facelet string: {0}")]
    InvalidFacelet(String),

    /// A move token did not match one of the 18 standard notations.
    #[error("invalid move token: {0}")]
    InvalidMove(String),

    /// A pattern-database file's header did not match what was expected:
    /// bad magic, unsupported version, or an entry count that disagrees
    /// with the subspace this database indexes.
    #[error("pattern database file {path} is malformed: {reason}")]
    PdbFormat { path: String, reason: String },

    /// Filesystem failure reading or writing a table.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failure decoding an auxiliary `bincode`-framed table (move tables,
    /// edge-merge table). The four Korf pattern databases use the custom
    /// `PDB1` framing and do not go through this path.
    #[error(transparent)]
    Decode(#[from] bincode::error::DecodeError),

    /// Failure encoding an auxiliary `bincode`-framed table.
    #[error(transparent)]
    Encode(#[from] bincode::error::EncodeError),
}
