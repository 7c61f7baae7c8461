//! IDA* searcher: depth-first iterative deepening bounded by
//! `g + h <= B`, admitting a pluggable pattern-database heuristic.

use crate::cube::CubeState;
use crate::goal::Goal;
use crate::index;
use crate::movestore::MoveStore;
use crate::moves::Move;
use crate::pdb::PatternDatabase;
use crate::pruner::prune;

/// Outcome of one bounded DFS pass: either the goal was found, or the
/// smallest bound that would need to be tried next (mirroring the
/// "FOUND or new bound" pseudocode convention without a magic infinity
/// sentinel escaping observably — `u8::MAX` stands in for infinity only
/// inside this module).
#[derive(Debug, PartialEq, Eq)]
enum SearchOutcome {
    Found,
    Bound(u8),
}

const INFINITY: u8 = u8::MAX;

/// The admissible heuristic consulted at every search node. A tagged enum
/// rather than a trait object, since a single variant is fixed for an
/// entire search and the lookup sits on the hottest path in the crate.
#[derive(Clone, Copy)]
pub enum Heuristic<'a> {
    /// The Korf composite: the max of the four pattern-database lookups
    ///.
    Korf {
        corner: &'a PatternDatabase,
        edge_g1: &'a PatternDatabase,
        edge_g2: &'a PatternDatabase,
        edge_perm: &'a PatternDatabase,
    },
    /// A single pattern database, used for Thistlethwaite stage A (the G1
    /// orientation table).
    Single { db: &'a PatternDatabase, index_fn: fn(&CubeState) -> u64 },
    /// No heuristic information; used for the Thistlethwaite stages that
    /// search a small enough move-restricted space for plain IDA* to be
    /// fast without one.
    Zero,
}

impl Heuristic<'_> {
    pub fn height(&self, cube: &CubeState) -> u8 {
        match self {
            Heuristic::Korf {
                corner,
                edge_g1,
                edge_g2,
                edge_perm,
            } => {
                let c = corner.get_num_moves(index::corner_index(cube));
                let g1 = edge_g1.get_num_moves(index::edge_g1_index(cube));
                let g2 = edge_g2.get_num_moves(index::edge_g2_index(cube));
                let ep = edge_perm.get_num_moves(index::edge_permutation_index(cube));
                c.max(g1).max(g2).max(ep)
            }
            Heuristic::Single { db, index_fn } => db.get_num_moves(index_fn(cube)),
            Heuristic::Zero => 0,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    cube: &mut CubeState,
    g: u8,
    prev: Option<Move>,
    bound: u8,
    goal: &Goal,
    move_store: MoveStore,
    heuristic: &Heuristic,
    history: &mut Vec<Move>,
) -> SearchOutcome {
    let f = g.saturating_add(heuristic.height(cube));
    if f > bound {
        return SearchOutcome::Bound(f);
    }
    if goal.is_satisfied(cube) {
        return SearchOutcome::Found;
    }
    let mut min = INFINITY;
    for i in 0..move_store.count() {
        let m = move_store.get(i);
        if prune(m, prev) {
            continue;
        }
        cube.apply_move(m);
        history.push(m);
        let outcome = dfs(cube, g + 1, Some(m), bound, goal, move_store, heuristic, history);
        match outcome {
            SearchOutcome::Found => return SearchOutcome::Found,
            SearchOutcome::Bound(t) => min = min.min(t),
        }
        history.pop();
        cube.apply_move(m.get_inverse());
    }
    SearchOutcome::Bound(min)
}

/// Finds a shortest-or-near-shortest move sequence solving `goal` from
/// `cube` using `move_store`'s legal moves and `heuristic` as the
/// admissible lower bound. Never fails to terminate on a legal cube; if the
/// bound escapes to infinity this is an invariant breach, not a normal
/// failure mode, and panics rather than returning an error.
pub fn find_goal(goal: &Goal, cube: CubeState, move_store: MoveStore, heuristic: &Heuristic) -> Vec<Move> {
    let mut working = cube;
    let mut bound = heuristic.height(&working);
    let mut history = Vec::new();
    loop {
        match dfs(&mut working, 0, None, bound, goal, move_store, heuristic, &mut history) {
            SearchOutcome::Found => return history,
            SearchOutcome::Bound(t) => {
                assert_ne!(t, INFINITY, "IDA* exhausted the search space on what should be a solvable cube");
                bound = t;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::moves::Move;

    #[test]
    fn test_already_solved_returns_empty_with_zero_heuristic() {
        let moves = find_goal(&Goal::Solve, CubeState::SOLVED, MoveStore::Twist, &Heuristic::Zero);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_single_move_scramble_with_zero_heuristic() {
        let mut c = CubeState::SOLVED;
        c.apply_move(Move::R);
        let moves = find_goal(&Goal::Solve, c, MoveStore::Twist, &Heuristic::Zero);
        assert_eq!(moves, vec![Move::R3]);
    }

    #[test]
    fn test_sexy_move_reverses_and_inverts() {
        let mut c = CubeState::SOLVED;
        for m in [Move::R, Move::U, Move::R3, Move::U3] {
            c.apply_move(m);
        }
        let moves = find_goal(&Goal::Solve, c, MoveStore::Twist, &Heuristic::Zero);
        assert_eq!(moves, vec![Move::U, Move::R, Move::U3, Move::R3]);
    }

    #[test]
    fn test_single_pdb_heuristic_solves_thistle_g0g1() {
        let db = crate::indexer::build_pattern_database(Goal::ThistleG0G1, MoveStore::Twist);
        let heuristic = Heuristic::Single {
            db: &db,
            index_fn: crate::index::thistle_g1_index,
        };
        let mut c = CubeState::SOLVED;
        c.apply_move(Move::F);
        let moves = find_goal(&Goal::ThistleG0G1, c, MoveStore::Twist, &heuristic);
        let mut check = c;
        for m in &moves {
            check.apply_move(*m);
        }
        assert!(Goal::ThistleG0G1.is_satisfied(&check));
    }
}
