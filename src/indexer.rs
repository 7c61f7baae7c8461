//! PDB indexer: builds a pattern database by iterative-deepening DFS
//! from the solved cube, recording the minimum depth at which every
//! reachable subspace state first appears.

use tracing::debug;

use crate::cube::CubeState;
use crate::goal::Goal;
use crate::movestore::MoveStore;
use crate::pdb::PatternDatabase;
use crate::pruner::prune;

struct Frame {
    cube: CubeState,
    prev: Option<crate::moves::Move>,
    depth: u8,
}

/// Builds `goal`'s pattern database by enumerating every state reachable
/// under `move_store`. Non-recursive: the frontier at a single depth can be
/// far larger than a comfortable native call-stack budget for the edge
/// PDBs, so the traversal keeps its own explicit stack instead of
/// recursing.
pub fn build_pattern_database(goal: Goal, move_store: MoveStore) -> PatternDatabase {
    let size = goal.subspace_size();
    let mut db = PatternDatabase::new(size);
    let mut seen = PatternDatabase::new(size);

    let solved = CubeState::SOLVED;
    goal.index(&solved, 0, &mut db);

    let mut indexed_count: u64 = 1;
    let mut cur_depth: u8 = 0;

    while (indexed_count as usize) < size {
        cur_depth += 1;
        seen.reset();
        seen.set_num_moves(goal.database_index(&solved), 0);

        let mut stack: Vec<Frame> = vec![Frame {
            cube: solved,
            prev: None,
            depth: 0,
        }];

        while let Some(frame) = stack.pop() {
            for i in 0..move_store.count() {
                let m = move_store.get(i);
                if frame.depth > 0 && prune(m, frame.prev) {
                    continue;
                }
                let next_cube = frame.cube.moved(m);
                let next_depth = frame.depth + 1;
                let seen_idx = goal.database_index(&next_cube);
                if seen.get_num_moves(seen_idx) <= next_depth {
                    continue;
                }
                seen.set_num_moves(seen_idx, next_depth);

                if next_depth == cur_depth {
                    if goal.index(&next_cube, cur_depth, &mut db) {
                        indexed_count += 1;
                    }
                } else {
                    stack.push(Frame {
                        cube: next_cube,
                        prev: Some(m),
                        depth: next_depth,
                    });
                }
            }
        }

        debug!(
            goal = goal.description(),
            depth = cur_depth,
            indexed = indexed_count,
            total = size,
            "indexer completed a depth iteration"
        );
    }

    db
}
