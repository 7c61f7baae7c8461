//! Solver orchestrators: chain goals, assemble move lists, and own
//! the pattern databases a search needs.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::bfs;
use crate::cube::CubeState;
use crate::error::Error;
use crate::goal::{EdgeSubset, Goal};
use crate::idastar::{self, Heuristic};
use crate::indexer;
use crate::movestore::MoveStore;
use crate::moves::Move;
use crate::pdb::PatternDatabase;

/// Ambient configuration threaded through both orchestrators: where the
/// pattern databases live on disk, how many worker threads to dispatch PDB
/// builds to, and an optional node ceiling so property tests can bound a
/// search instead of letting it run unattended.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub data_dir: PathBuf,
    pub threads: usize,
    pub max_nodes: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            data_dir: PathBuf::from("pdb"),
            // "four workers suffice for the four-PDB build".
            threads: 4,
            max_nodes: None,
        }
    }
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed-size worker pool: a job channel drained by a small, fixed set of
/// threads, rather than a per-call `thread::spawn` or an external
/// work-stealing scheduler — the PDB build's job shape (four independent,
/// long-running, one-shot jobs followed by a single join) doesn't need one
///.
pub struct WorkerPool {
    sender: Option<mpsc::Sender<Job>>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        let (tx, rx) = mpsc::channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));
        let mut handles = Vec::with_capacity(threads);
        for _ in 0..threads {
            let rx = Arc::clone(&rx);
            handles.push(thread::spawn(move || loop {
                let job = { rx.lock().expect("worker pool mutex poisoned").recv() };
                match job {
                    Ok(job) => job(),
                    Err(_) => break,
                }
            }));
        }
        WorkerPool { sender: Some(tx), handles }
    }

    /// Queue a job. Runs on whichever worker thread is free next.
    pub fn dispatch<F: FnOnce() + Send + 'static>(&self, job: F) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(Box::new(job));
        }
    }

    /// Close the job channel and block until every worker thread has
    /// drained it and exited.
    pub fn join(mut self) {
        self.sender.take();
        for handle in self.handles.drain(..) {
            handle.join().expect("worker pool thread panicked");
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.sender.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn pdb_path(data_dir: &Path, file_name: &str) -> PathBuf {
    data_dir.join(file_name)
}

/// Loads `goal`'s pattern database from `path` if present and well-formed,
/// otherwise builds it with `builder` and writes it back. A write failure
/// is logged and non-fatal — the in-memory table just built is still
/// usable for the current process.
fn ensure_pdb(goal: Goal, path: &Path, builder: fn(Goal) -> PatternDatabase) -> PatternDatabase {
    let size = goal.subspace_size();
    match PatternDatabase::from_file(path, size) {
        Ok(db) => {
            debug!(path = %path.display(), goal = goal.description(), "loaded pattern database from disk");
            db
        }
        Err(e) => {
            warn!(path = %path.display(), goal = goal.description(), error = %e, "pattern database missing or invalid, rebuilding");
            let db = builder(goal);
            db.save_best_effort(&path);
            db
        }
    }
}

/// The four pattern databases the Korf heuristic consults, already
/// inflated to byte form for branch-free lookup.
struct KorfPdbs {
    corner: PatternDatabase,
    edge_g1: PatternDatabase,
    edge_g2: PatternDatabase,
    edge_perm: PatternDatabase,
}

/// Optimal solver built on Korf's composite pattern-database heuristic.
/// Constructing one does not build the PDBs; call
/// [`KorfSolver::initialize`] first.
pub struct KorfSolver<'p> {
    config: SolverConfig,
    pool: &'p WorkerPool,
    pdbs: Arc<Mutex<Option<KorfPdbs>>>,
    solving: AtomicBool,
}

impl<'p> KorfSolver<'p> {
    /// Constructs in-memory structures without building any pattern
    /// database — the pool is borrowed, not owned, since it outlives
    /// any one solver built on top of it.
    pub fn new_solver(config: SolverConfig, pool: &'p WorkerPool) -> Self {
        KorfSolver {
            config,
            pool,
            pdbs: Arc::new(Mutex::new(None)),
            solving: AtomicBool::new(false),
        }
    }

    /// Schedules the four independent PDB builds on the pool; `on_ready`
    /// fires exactly once, from whichever worker thread's completion makes
    /// the atomic counter reach the job count. Consumers must not call
    /// [`Self::solve`] before it fires.
    pub fn initialize<F: FnOnce() + Send + 'static>(&self, on_ready: F) {
        let slots: Arc<[Mutex<Option<PatternDatabase>>; 4]> =
            Arc::new([Mutex::new(None), Mutex::new(None), Mutex::new(None), Mutex::new(None)]);
        let completed = Arc::new(AtomicUsize::new(0));
        let on_ready: Arc<Mutex<Option<Box<dyn FnOnce() + Send>>>> = Arc::new(Mutex::new(Some(Box::new(on_ready))));
        let pdbs = Arc::clone(&self.pdbs);
        let data_dir = self.config.data_dir.clone();

        let jobs: [(usize, &'static str, Goal, fn(Goal) -> PatternDatabase); 4] = [
            (0, "corner.pdb", Goal::CornerDatabase, |g| bfs::index_goal(g, MoveStore::Twist)),
            (1, "edgeG1.pdb", Goal::EdgeDatabase(EdgeSubset::G1), |g| {
                indexer::build_pattern_database(g, MoveStore::Twist)
            }),
            (2, "edgeG2.pdb", Goal::EdgeDatabase(EdgeSubset::G2), |g| {
                indexer::build_pattern_database(g, MoveStore::Twist)
            }),
            (3, "edge_perm.pdb", Goal::EdgePermutationDatabase, |g| {
                indexer::build_pattern_database(g, MoveStore::Twist)
            }),
        ];

        for (slot, file_name, goal, builder) in jobs {
            let slots = Arc::clone(&slots);
            let completed = Arc::clone(&completed);
            let on_ready = Arc::clone(&on_ready);
            let pdbs = Arc::clone(&pdbs);
            let path = pdb_path(&data_dir, file_name);
            self.pool.dispatch(move || {
                let db = ensure_pdb(goal, &path, builder);
                *slots[slot].lock().expect("pdb slot mutex poisoned") = Some(db);

                if completed.fetch_add(1, Ordering::SeqCst) + 1 == slots.len() {
                    let mut corner = slots[0].lock().unwrap().take().expect("corner pdb slot filled");
                    let mut edge_g1 = slots[1].lock().unwrap().take().expect("edge_g1 pdb slot filled");
                    let mut edge_g2 = slots[2].lock().unwrap().take().expect("edge_g2 pdb slot filled");
                    let mut edge_perm = slots[3].lock().unwrap().take().expect("edge_perm pdb slot filled");
                    corner.inflate();
                    edge_g1.inflate();
                    edge_g2.inflate();
                    edge_perm.inflate();
                    *pdbs.lock().expect("korf pdb mutex poisoned") = Some(KorfPdbs {
                        corner,
                        edge_g1,
                        edge_g2,
                        edge_perm,
                    });
                    info!("Korf pattern databases ready");
                    if let Some(callback) = on_ready.lock().expect("on_ready mutex poisoned").take() {
                        callback();
                    }
                }
            });
        }
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Solves `cube` with IDA* over all 18 moves, using the composite
    /// pattern-database heuristic. Panics if called before `initialize`'s
    /// `on_ready` has fired, matching the driver contract.
    pub fn solve(&self, cube: CubeState) -> Result<Vec<Move>, Error> {
        cube.validate()?;
        self.solving.store(true, Ordering::SeqCst);
        let guard = self.pdbs.lock().expect("korf pdb mutex poisoned");
        let pdbs = guard.as_ref().expect("solve() called before initialize()'s on_ready fired");
        let heuristic = Heuristic::Korf {
            corner: &pdbs.corner,
            edge_g1: &pdbs.edge_g1,
            edge_g2: &pdbs.edge_g2,
            edge_perm: &pdbs.edge_perm,
        };
        let moves = idastar::find_goal(&Goal::Solve, cube, MoveStore::Twist, &heuristic);
        self.solving.store(false, Ordering::SeqCst);
        Ok(simplify(moves))
    }
}

/// Four-stage group-reduction solver. Only the G0->G1 stage consults a
/// pattern database; the remaining stages
/// search small enough move-restricted spaces to do without one.
pub struct ThistlethwaiteSolver<'p> {
    #[allow(dead_code)]
    config: SolverConfig,
    pool: &'p WorkerPool,
    g1_pdb: Arc<Mutex<Option<PatternDatabase>>>,
    solving: AtomicBool,
}

impl<'p> ThistlethwaiteSolver<'p> {
    pub fn new_solver(config: SolverConfig, pool: &'p WorkerPool) -> Self {
        ThistlethwaiteSolver {
            config,
            pool,
            g1_pdb: Arc::new(Mutex::new(None)),
            solving: AtomicBool::new(false),
        }
    }

    /// The G1 table isn't part of the persisted four-file PDB set — it's
    /// cheap enough (2048 entries) to rebuild every run, so this never
    /// touches `config.data_dir`.
    pub fn initialize<F: FnOnce() + Send + 'static>(&self, on_ready: F) {
        let g1_pdb = Arc::clone(&self.g1_pdb);
        self.pool.dispatch(move || {
            let db = bfs::index_goal(Goal::ThistleG0G1, MoveStore::Twist);
            *g1_pdb.lock().expect("g1 pdb mutex poisoned") = Some(db);
            info!("Thistlethwaite G1 pattern database ready");
            on_ready();
        });
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    pub fn solve(&self, cube: CubeState) -> Result<Vec<Move>, Error> {
        cube.validate()?;
        self.solving.store(true, Ordering::SeqCst);

        let guard = self.g1_pdb.lock().expect("g1 pdb mutex poisoned");
        let g1_pdb = guard.as_ref().expect("solve() called before initialize()'s on_ready fired");
        let heuristic = Heuristic::Single {
            db: g1_pdb,
            index_fn: crate::index::thistle_g1_index,
        };

        let mut moves = Vec::new();
        let mut cube = cube;

        let stage_a = idastar::find_goal(&Goal::ThistleG0G1, cube, MoveStore::Twist, &heuristic);
        apply_and_extend(&mut cube, &mut moves, stage_a);
        debug!(moves = moves.len(), "Thistlethwaite stage A (G0 -> G1) complete");

        let stage_b = bfs::find_goal(&Goal::ThistleG1G2, cube, MoveStore::G1Twist);
        apply_and_extend(&mut cube, &mut moves, stage_b);
        debug!(moves = moves.len(), "Thistlethwaite stage B (G1 -> G2) complete");

        let stage_c = idastar::find_goal(&Goal::ThistleG2G3Corners, cube, MoveStore::G2Twist, &Heuristic::Zero);
        apply_and_extend(&mut cube, &mut moves, stage_c);
        debug!(moves = moves.len(), "Thistlethwaite stage C (G2 -> G3 corners) complete");

        let stage_d = bfs::find_goal(&Goal::ThistleG2G3Edges, cube, MoveStore::G3Twist);
        apply_and_extend(&mut cube, &mut moves, stage_d);
        debug!(moves = moves.len(), "Thistlethwaite stage D (G2 -> G3 edges) complete");

        self.solving.store(false, Ordering::SeqCst);
        Ok(simplify(moves))
    }
}

fn apply_and_extend(cube: &mut CubeState, moves: &mut Vec<Move>, stage_moves: Vec<Move>) {
    for m in &stage_moves {
        cube.apply_move(*m);
    }
    moves.extend(stage_moves);
}

/// Collapses adjacent same-face moves to a single equivalent move,
/// reducing run length to fixpoint in one left-to-right pass: popping the
/// previous move back off before re-pushing exposes it to the *next*
/// comparison too, so a run of any length collapses completely rather than
/// only pairwise.
fn simplify(moves: Vec<Move>) -> Vec<Move> {
    let mut out: Vec<Move> = Vec::with_capacity(moves.len());
    for m in moves {
        if let Some(&last) = out.last() {
            if last.is_same_face(m) {
                let (face, qa) = last.quarter_turns();
                let (_, qb) = m.quarter_turns();
                out.pop();
                if let Some(merged) = Move::from_quarter_turns(face, qa + qb) {
                    out.push(merged);
                }
                continue;
            }
        }
        out.push(m);
    }
    out
}

/// Driver-facing notation conversion: thin wrappers over `Display`
/// and `FromStr` so the solver's public interface doesn't leak the trait
/// machinery to callers that just want a string.
pub fn move_to_string(m: Move) -> String {
    m.to_string()
}

pub fn string_to_move(s: &str) -> Result<Move, Error> {
    s.parse()
}
