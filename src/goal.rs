//! Goals: predicates and subspace projections consumed by the
//! searchers and the PDB indexer.

use crate::cube::CubeState;
use crate::index;
use crate::pdb::PatternDatabase;

/// Which 6-edge subset an [`Goal::EdgeDatabase`] projects onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSubset {
    G1,
    G2,
}

/// A search goal: either "is this cube in set S" (solving goals) or "which
/// subspace cell does this cube occupy" (database-building goals, which are
/// never satisfied — their purpose is to drive the indexer over every
/// reachable state).
#[derive(Debug, Clone, Copy)]
pub enum Goal {
    /// Cube is in the canonical (solved-color) orientation. This crate's
    /// `CubeState` is only ever constructed already canonically oriented
    /// (`FaceletCube`'s center check enforces it), so this is trivially
    /// always satisfied — see DESIGN.md for why the original source's
    /// whole-cube-rotation search has no work left to do here.
    Orient,
    Solve,
    CornerDatabase,
    EdgeDatabase(EdgeSubset),
    EdgePermutationDatabase,
    /// Edge orientation solved: G0 -> G1.
    ThistleG0G1,
    /// Corner orientation solved and M-slice edges in the M-slice: G1 -> G2.
    ThistleG1G2,
    /// Corner permutation in the reachable G3 coset: G2 -> G3 (corners).
    ThistleG2G3Corners,
    /// Fully solved (reachable with half turns only once the corner
    /// condition above holds): G2 -> G3 (edges).
    ThistleG2G3Edges,
}

impl Goal {
    pub fn description(&self) -> &'static str {
        match self {
            Goal::Orient => "cube is in canonical orientation",
            Goal::Solve => "cube is solved",
            Goal::CornerDatabase => "enumerate the corner subspace",
            Goal::EdgeDatabase(EdgeSubset::G1) => "enumerate the edge-G1 subspace",
            Goal::EdgeDatabase(EdgeSubset::G2) => "enumerate the edge-G2 subspace",
            Goal::EdgePermutationDatabase => "enumerate the edge-permutation subspace",
            Goal::ThistleG0G1 => "edge orientation solved (G0 -> G1)",
            Goal::ThistleG1G2 => "corner orientation solved, M-slice edges placed (G1 -> G2)",
            Goal::ThistleG2G3Corners => "corner permutation in the G3 coset (G2 -> G3 corners)",
            Goal::ThistleG2G3Edges => "fully solved (G2 -> G3 edges)",
        }
    }

    /// Whether this goal is a database-building goal (never satisfied by
    /// construction).
    pub fn is_database_goal(&self) -> bool {
        matches!(
            self,
            Goal::CornerDatabase | Goal::EdgeDatabase(_) | Goal::EdgePermutationDatabase
        )
    }

    pub fn is_satisfied(&self, cube: &CubeState) -> bool {
        match self {
            Goal::Orient => true,
            Goal::Solve => cube.is_solved(),
            Goal::CornerDatabase | Goal::EdgeDatabase(_) | Goal::EdgePermutationDatabase => false,
            Goal::ThistleG0G1 => cube.eo.iter().all(|&o| o == 0),
            Goal::ThistleG1G2 => {
                cube.co.iter().all(|&o| o == 0)
                    && (4..8usize).all(|slot| (4u8..8).contains(&cube.ep[slot]))
            }
            Goal::ThistleG2G3Corners => {
                !crate::cube::permutation_parity(&cube.cp) && cube.co.iter().all(|&o| o == 0)
            }
            Goal::ThistleG2G3Edges => cube.is_solved(),
        }
    }

    /// The subspace index this goal projects a cube onto. Only meaningful
    /// for database-building goals and for `ThistleG0G1`/`ThistleG1G2`,
    /// whose stages consult a pattern database during their own search.
    /// The remaining two Thistlethwaite stages search small enough spaces
    /// that their `find_goal` calls dedup on `CubeState` directly rather
    /// than through a subspace index, so they have no projection here.
    pub fn database_index(&self, cube: &CubeState) -> u64 {
        match self {
            Goal::CornerDatabase => index::corner_index(cube),
            Goal::EdgeDatabase(EdgeSubset::G1) => index::edge_g1_index(cube),
            Goal::EdgeDatabase(EdgeSubset::G2) => index::edge_g2_index(cube),
            Goal::EdgePermutationDatabase => index::edge_permutation_index(cube),
            Goal::ThistleG0G1 => index::thistle_g1_index(cube),
            Goal::ThistleG1G2 => index::thistle_g2_index(cube),
            Goal::Orient | Goal::Solve | Goal::ThistleG2G3Corners | Goal::ThistleG2G3Edges => {
                unreachable!("{:?} is not a subspace-indexed goal", self)
            }
        }
    }

    /// For database-building goals: write `depth` into `db` at this cube's
    /// index. Returns `true` iff a previously-unset cell was written.
    pub fn index(&self, cube: &CubeState, depth: u8, db: &mut PatternDatabase) -> bool {
        debug_assert!(self.is_database_goal());
        db.set_num_moves(self.database_index(cube), depth)
    }

    /// Size of the subspace this goal enumerates or keys a pattern
    /// database with.
    pub fn subspace_size(&self) -> usize {
        match self {
            Goal::CornerDatabase => index::CORNER_DB_SIZE,
            Goal::EdgeDatabase(_) => index::EDGE_DB_SIZE,
            Goal::EdgePermutationDatabase => index::EDGE_PERM_DB_SIZE,
            Goal::ThistleG0G1 => index::THISTLE_G1_SIZE,
            Goal::ThistleG1G2 => index::THISTLE_G2_SIZE,
            Goal::Orient | Goal::Solve | Goal::ThistleG2G3Corners | Goal::ThistleG2G3Edges => {
                unreachable!("{:?} is not a subspace-indexed goal", self)
            }
        }
    }
}
