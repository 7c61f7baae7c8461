//! BFS searcher: level-by-level search from solved, used both to
//! solve short goals and to build the corner pattern database without the
//! multi-gigabyte move-list frontier a naive BFS would need.

use std::collections::HashSet;

use tracing::debug;

use crate::cube::CubeState;
use crate::goal::Goal;
use crate::movestore::MoveStore;
use crate::moves::Move;
use crate::pdb::PatternDatabase;
use crate::pruner::prune;

struct PathFrame {
    cube: CubeState,
    parent: Option<usize>,
    mv: Option<Move>,
}

/// Finds the shortest move sequence from `cube` reaching `goal`, searching
/// only `move_store`'s legal moves. Frames live in a flat arena and each
/// only points at its parent, so the frontier cost is one `CubeState` and
/// one `usize` per node rather than a cloned move vector per node.
pub fn find_goal(goal: &Goal, cube: CubeState, move_store: MoveStore) -> Vec<Move> {
    if goal.is_satisfied(&cube) {
        return Vec::new();
    }

    let mut arena = vec![PathFrame {
        cube,
        parent: None,
        mv: None,
    }];
    let mut visited = HashSet::new();
    visited.insert(cube);
    let mut frontier = vec![0usize];

    loop {
        let mut next_frontier = Vec::new();
        for &idx in &frontier {
            let frame_cube = arena[idx].cube;
            let frame_prev = arena[idx].mv;
            for i in 0..move_store.count() {
                let m = move_store.get(i);
                if frame_prev.is_some() && prune(m, frame_prev) {
                    continue;
                }
                let next_cube = frame_cube.moved(m);
                if !visited.insert(next_cube) {
                    continue;
                }
                arena.push(PathFrame {
                    cube: next_cube,
                    parent: Some(idx),
                    mv: Some(m),
                });
                let new_idx = arena.len() - 1;
                if goal.is_satisfied(&next_cube) {
                    return reconstruct(&arena, new_idx);
                }
                next_frontier.push(new_idx);
            }
        }
        assert!(
            !next_frontier.is_empty(),
            "BFS exhausted the reachable state space without satisfying the goal"
        );
        frontier = next_frontier;
    }
}

fn reconstruct(arena: &[PathFrame], mut idx: usize) -> Vec<Move> {
    let mut moves = Vec::new();
    while let Some(m) = arena[idx].mv {
        moves.push(m);
        idx = arena[idx].parent.expect("a node with a move always has a parent");
    }
    moves.reverse();
    moves
}

/// Builds `goal`'s pattern database with a BFS that records depths only —
/// no per-node move list — suited to the corner database, whose move-list
/// BFS the original source notes can reach several gigabytes.
pub fn index_goal(goal: Goal, move_store: MoveStore) -> PatternDatabase {
    let size = goal.subspace_size();
    let mut db = PatternDatabase::new(size);
    let solved = CubeState::SOLVED;
    goal.index(&solved, 0, &mut db);

    let mut frontier = vec![solved];
    let mut indexed: u64 = 1;
    let mut depth: u8 = 0;

    while (indexed as usize) < size && !frontier.is_empty() {
        depth += 1;
        let mut next_frontier = Vec::new();
        for cube in &frontier {
            for i in 0..move_store.count() {
                let m = move_store.get(i);
                let next_cube = cube.moved(m);
                if goal.index(&next_cube, depth, &mut db) {
                    indexed += 1;
                    next_frontier.push(next_cube);
                }
            }
        }
        debug!(goal = goal.description(), depth, indexed, total = size, "BFS indexer level complete");
        frontier = next_frontier;
    }

    db
}
