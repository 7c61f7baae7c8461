//! Integration tests: the six end-to-end scenarios and the universal,
//! PDB, and searcher properties run against the crate's public interface
//! rather than any single module's internals.
//!
//! Scenarios that require the full four-PDB Korf build are marked
//! `#[ignore]` — building `corner.pdb` and `edge_perm.pdb` from scratch
//! enumerates tens of millions of states and is not something a routine
//! test run should pay for. Run them explicitly with
//! `cargo test -- --ignored`.

use std::convert::TryFrom;
use std::sync::mpsc;
use std::time::Duration;

use proptest::prelude::*;

use cubecracker::cube::{permutation_parity, CubeState};
use cubecracker::goal::Goal;
use cubecracker::idastar::{find_goal as idastar_find_goal, Heuristic};
use cubecracker::indexer::build_pattern_database;
use cubecracker::movestore::MoveStore;
use cubecracker::moves::{Move, ALL_MOVES};
use cubecracker::pruner::prune;
use cubecracker::scramble::scramble_from_str;
use cubecracker::solver::{KorfSolver, SolverConfig, ThistlethwaiteSolver, WorkerPool};

fn apply_all(cube: CubeState, moves: &[Move]) -> CubeState {
    let mut c = cube;
    for &m in moves {
        c.apply_move(m);
    }
    c
}

fn thistlethwaite_ready<'p>(pool: &'p WorkerPool, data_dir: std::path::PathBuf) -> ThistlethwaiteSolver<'p> {
    let solver = ThistlethwaiteSolver::new_solver(
        SolverConfig {
            data_dir,
            threads: 2,
            max_nodes: None,
        },
        pool,
    );
    let (tx, rx) = mpsc::channel();
    solver.initialize(move || tx.send(()).unwrap());
    rx.recv_timeout(Duration::from_secs(60)).expect("G1 table build did not complete in time");
    solver
}

// --- Concrete end-to-end scenarios (spec section 8) -----------------------

#[test]
fn scenario_1_solved_cube_solves_to_empty_sequence() {
    let pool = WorkerPool::new(2);
    let solver = thistlethwaite_ready(&pool, std::env::temp_dir().join("cubecracker_it_scenario1"));
    let solution = solver.solve(CubeState::SOLVED).unwrap();
    assert!(solution.is_empty());
}

#[test]
fn scenario_2_single_r_scramble_solves_to_r_prime() {
    let pool = WorkerPool::new(2);
    let solver = thistlethwaite_ready(&pool, std::env::temp_dir().join("cubecracker_it_scenario2"));
    let scramble = scramble_from_str("R").unwrap();
    let cube = apply_all(CubeState::SOLVED, &scramble);
    let solution = solver.solve(cube).unwrap();
    let solved = apply_all(cube, &solution);
    assert!(solved.is_solved());
    assert_eq!(solution, vec![Move::R3]);
}

#[test]
fn scenario_3_sexy_move_scramble_solves_correctly() {
    let pool = WorkerPool::new(2);
    let solver = thistlethwaite_ready(&pool, std::env::temp_dir().join("cubecracker_it_scenario3"));
    let scramble = scramble_from_str("R U R' U'").unwrap();
    let cube = apply_all(CubeState::SOLVED, &scramble);
    let solution = solver.solve(cube).unwrap();
    let solved = apply_all(cube, &solution);
    assert!(solved.is_solved());
}

#[test]
fn scenario_4_repeated_uldr_scramble_solves_within_twenty_moves() {
    let pool = WorkerPool::new(2);
    let solver = thistlethwaite_ready(&pool, std::env::temp_dir().join("cubecracker_it_scenario4"));
    let one_rep = scramble_from_str("U L D R").unwrap();
    let mut cube = CubeState::SOLVED;
    for _ in 0..14 {
        cube = apply_all(cube, &one_rep);
    }
    let solution = solver.solve(cube).unwrap();
    let solved = apply_all(cube, &solution);
    assert!(solved.is_solved());
    assert!(solution.len() <= 20, "solution had {} moves", solution.len());
}

#[test]
#[ignore = "builds the full four-PDB Korf set; run with `cargo test -- --ignored`"]
fn scenario_5_superflip_solves_in_exactly_twenty_moves_under_korf() {
    let pool = WorkerPool::new(4);
    let solver = KorfSolver::new_solver(
        SolverConfig {
            data_dir: std::env::temp_dir().join("cubecracker_it_scenario5_pdbs"),
            threads: 4,
            max_nodes: None,
        },
        &pool,
    );
    let (tx, rx) = mpsc::channel();
    solver.initialize(move || tx.send(()).unwrap());
    rx.recv_timeout(Duration::from_secs(3600)).expect("Korf PDB build did not complete in time");

    let mut superflip = CubeState::SOLVED;
    superflip.eo = [1; 12];
    let solution = solver.solve(superflip).unwrap();
    let solved = apply_all(superflip, &solution);
    assert!(solved.is_solved());
    assert_eq!(solution.len(), 20);
}

#[test]
#[ignore = "builds the full four-PDB Korf set; run with `cargo test -- --ignored`"]
fn scenario_6_corrupted_pdb_file_is_rebuilt_and_solve_still_succeeds() {
    let data_dir = std::env::temp_dir().join("cubecracker_it_scenario6_pdbs");
    std::fs::create_dir_all(&data_dir).unwrap();

    let pool = WorkerPool::new(4);
    let config = SolverConfig {
        data_dir: data_dir.clone(),
        threads: 4,
        max_nodes: None,
    };
    let solver = KorfSolver::new_solver(config.clone(), &pool);
    let (tx, rx) = mpsc::channel();
    solver.initialize(move || tx.send(()).unwrap());
    rx.recv_timeout(Duration::from_secs(3600)).expect("Korf PDB build did not complete in time");

    // Flip the magic byte so the next load is rejected as malformed — the
    // file format has no payload checksum, so corruption is only ever
    // detected at the header (magic/version/size), matching how
    // `PatternDatabase::from_file` validates a loaded table.
    let corner_path = data_dir.join("corner.pdb");
    let mut bytes = std::fs::read(&corner_path).unwrap();
    bytes[0] ^= 0xFF;
    std::fs::write(&corner_path, &bytes).unwrap();

    let solver2 = KorfSolver::new_solver(config, &pool);
    let (tx2, rx2) = mpsc::channel();
    solver2.initialize(move || tx2.send(()).unwrap());
    rx2.recv_timeout(Duration::from_secs(3600)).expect("rebuild after corruption did not complete in time");

    let mut c = CubeState::SOLVED;
    c.apply_move(Move::R);
    c.apply_move(Move::U);
    let solution = solver2.solve(c).unwrap();
    let solved = apply_all(c, &solution);
    assert!(solved.is_solved());
}

// --- Universal invariants ---------------------------------------------------

proptest! {
    #[test]
    fn round_trip_via_reverse_invert(seq in prop::collection::vec(0..18u8, 1..100)) {
        let moves: Vec<Move> = seq.iter().map(|&i| ALL_MOVES[i as usize]).collect();
        let scrambled = apply_all(CubeState::SOLVED, &moves);
        let undo: Vec<Move> = moves.iter().rev().map(|m| m.get_inverse()).collect();
        let restored = apply_all(scrambled, &undo);
        prop_assert_eq!(restored, CubeState::SOLVED);
    }

    #[test]
    fn parity_invariants_hold_after_every_prefix(seq in prop::collection::vec(0..18u8, 1..100)) {
        let moves: Vec<Move> = seq.iter().map(|&i| ALL_MOVES[i as usize]).collect();
        let mut c = CubeState::SOLVED;
        for m in moves {
            c.apply_move(m);
            prop_assert!(c.validate().is_ok());
        }
    }

    #[test]
    fn rank_unrank_roundtrips_over_eight_element_permutations(rank in 0u64..40_320) {
        let perm = cubecracker::math::unrank_permutation(rank, 8);
        prop_assert_eq!(cubecracker::math::rank_permutation(&perm), rank);
    }

    #[test]
    fn pruner_never_prunes_at_the_search_root(i in 0..18u8) {
        let m = ALL_MOVES[i as usize];
        prop_assert!(!prune(m, None));
    }

    #[test]
    fn unpruned_sequences_have_no_adjacent_same_face_or_descending_opposite_pair(
        seq in prop::collection::vec(0..18u8, 1..60)
    ) {
        let mut kept: Vec<Move> = Vec::new();
        let mut prev: Option<Move> = None;
        for &i in &seq {
            let m = ALL_MOVES[i as usize];
            if prune(m, prev) {
                continue;
            }
            kept.push(m);
            prev = Some(m);
        }
        for pair in kept.windows(2) {
            prop_assert!(!pair[0].is_same_face(pair[1]));
            let (a, b) = (pair[0].face(), pair[1].face());
            if a == b.opposite() {
                prop_assert!((b as u8) >= (a as u8));
            }
        }
    }
}

// --- PDB and searcher properties (spot-checked against the small, fast
// Thistlethwaite G1 subspace rather than the full Korf PDBs) ---------------

#[test]
fn thistle_g1_database_is_fully_populated_and_solved_is_zero() {
    let db = build_pattern_database(Goal::ThistleG0G1, MoveStore::Twist);
    assert_eq!(db.get_num_moves(0), 0);
    for i in 0..db.size() {
        assert_ne!(db.get_num_moves(i as u64), 0xF, "cell {i} never reached");
    }
}

#[test]
fn thistle_g1_database_is_depth_lipschitz_over_one_move() {
    let db = build_pattern_database(Goal::ThistleG0G1, MoveStore::Twist);
    let goal = Goal::ThistleG0G1;
    let mut c = CubeState::SOLVED;
    for m in [Move::F, Move::R, Move::U2, Move::B3] {
        let before = db.get_num_moves(goal.database_index(&c));
        c.apply_move(m);
        let after = db.get_num_moves(goal.database_index(&c));
        assert!((before as i16 - after as i16).abs() <= 1);
    }
}

#[test]
fn thistle_g1_heuristic_never_overestimates_the_bfs_optimal_distance() {
    use cubecracker::bfs;
    let db = build_pattern_database(Goal::ThistleG0G1, MoveStore::Twist);
    let heuristic = Heuristic::Single {
        db: &db,
        index_fn: cubecracker::index::thistle_g1_index,
    };
    for scramble_moves in [vec![Move::F], vec![Move::F, Move::B], vec![Move::F, Move::R, Move::F3]] {
        let cube = apply_all(CubeState::SOLVED, &scramble_moves);
        let optimal = bfs::find_goal(&Goal::ThistleG0G1, cube, MoveStore::Twist).len() as u8;
        assert!(heuristic.height(&cube) <= optimal, "heuristic overestimated for {scramble_moves:?}");
    }
}

#[test]
fn bfs_returns_optimal_length_at_short_scrambles() {
    use cubecracker::bfs;
    let mut cube = CubeState::SOLVED;
    for m in [Move::R, Move::U, Move::F] {
        cube.apply_move(m);
    }
    let solution = bfs::find_goal(&Goal::Solve, cube, MoveStore::Twist);
    assert_eq!(solution.len(), 3);
}

#[test]
fn idastar_returns_a_valid_solving_sequence_on_a_random_legal_cube() {
    let mut cube = CubeState::SOLVED;
    for m in [Move::R, Move::U2, Move::F3, Move::D, Move::L2, Move::B] {
        cube.apply_move(m);
    }
    let solution = idastar_find_goal(&Goal::Solve, cube, MoveStore::Twist, &Heuristic::Zero);
    let solved = apply_all(cube, &solution);
    assert!(solved.is_solved());
}

#[test]
fn both_searchers_return_empty_on_an_already_solved_cube() {
    use cubecracker::bfs;
    assert!(bfs::find_goal(&Goal::Solve, CubeState::SOLVED, MoveStore::Twist).is_empty());
    assert!(idastar_find_goal(&Goal::Solve, CubeState::SOLVED, MoveStore::Twist, &Heuristic::Zero).is_empty());
}

#[test]
fn permutation_parity_of_cp_and_ep_agree_after_a_scramble() {
    let mut c = CubeState::SOLVED;
    for m in [Move::R, Move::U, Move::R3, Move::U3, Move::F2] {
        c.apply_move(m);
    }
    assert_eq!(permutation_parity(&c.cp), permutation_parity(&c.ep));
}

#[test]
fn facelet_string_with_wrong_center_is_rejected() {
    let mut s = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB".to_string();
    s.replace_range(4..5, "R");
    assert!(cubecracker::facelet::FaceletCube::try_from(s.as_str()).is_err());
}
