//! # cubecracker
//! `cubecracker`: crate for manipulating and solving the 3x3 Rubik's cube
//! with Korf's pattern-database IDA* search and Thistlethwaite's four-stage
//! group-reduction search.

/// Error define.
pub mod error;

/// Fixed-point combinatorics: factorial, binomial, and rank/unrank helpers
/// shared by the indexers.
pub mod math;

/// Module for representing a cube on the cubie (corner/edge permutation and
/// orientation) level.
pub mod cube;

/// Module for representing moves and whole-cube rotations.
pub mod moves;

/// Module for representing a cube on the facelet level.
pub mod facelet;

/// Move pruning: collapses search branches that can't lead to a new state.
pub mod pruner;

/// Per-stage legal move sets (the four move stores a Thistlethwaite search
/// steps through, plus the full 18-move set Korf search uses).
pub mod movestore;

/// Pattern database storage: a depth-per-state byte table, nibble-packed on
/// disk and inflated to one byte per entry in memory.
pub mod pdb;

/// Search goals: what subspace a stage searches and how a cube's state maps
/// to a coordinate within it.
pub mod goal;

/// Coordinate functions mapping a cube to indices into the various pattern
/// databases.
pub mod index;

/// IDDFS-based pattern database construction.
pub mod indexer;

/// BFS searcher, also used to build the corner pattern database.
pub mod bfs;

/// IDA* searcher.
pub mod idastar;

/// Solver orchestrators and the worker pool that builds their pattern
/// databases.
pub mod solver;

/// Module containing functions for scrambling the cube.
pub mod scramble;

use std::{fs, path::Path};
use bincode::{
    config::{self, Configuration},
    decode_from_slice, encode_to_vec,
    error::DecodeError,
    Decode, Encode,
};
use crate::error::Error;

const CONFIG: Configuration = config::standard();

fn write_table<P, T: Encode>(path: P, table: &T) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let encoded = encode_to_vec(table, CONFIG)?;
    fs::write(path, encoded)?;
    Ok(())
}

fn decode_table<T: Decode<()>>(bytes: &[u8]) -> Result<T, Error> {
    let (decoded, written) = decode_from_slice(bytes, CONFIG)?;
    let additional = bytes.len() - written;

    if additional != 0 {
        return Err(DecodeError::UnexpectedEnd { additional })?;
    }
    Ok(decoded)
}
