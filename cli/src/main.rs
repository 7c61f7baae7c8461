use std::convert::TryFrom;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use cubecracker::cube::CubeState;
use cubecracker::error::Error;
use cubecracker::facelet::FaceletCube;
use cubecracker::scramble::{random_scramble, scramble_from_str, scramble_to_str};
use cubecracker::solver::{KorfSolver, SolverConfig, ThistlethwaiteSolver, WorkerPool};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    Korf,
    Thistlethwaite,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves the cube from a scramble string or a 54-facelet string")]
    #[clap(group(
        clap::ArgGroup::new("state")
            .required(true)
            .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Korf)]
        algorithm: Algorithm,

        #[arg(short, long, default_value = "pdb")]
        data_dir: PathBuf,

        #[arg(short, long, default_value_t = 4)]
        threads: usize,
    },

    #[command(about = "generates a random scramble")]
    Scramble {
        #[arg(short, long, default_value_t = 25)]
        length: usize,
    },
}

fn cube_from_scramble(s: &str) -> Result<CubeState, Error> {
    let moves = scramble_from_str(s)?;
    let mut cube = CubeState::SOLVED;
    for m in moves {
        cube.apply_move(m);
    }
    Ok(cube)
}

fn cube_from_facelet(s: &str) -> Result<CubeState, Error> {
    let fc = FaceletCube::try_from(s)?;
    CubeState::try_from(&fc)
}

fn solve(scramble: Option<String>, facelet: Option<String>, algorithm: Algorithm, data_dir: PathBuf, threads: usize) -> Result<(), Error> {
    let cube = match (scramble, facelet) {
        (Some(s), _) => cube_from_scramble(&s)?,
        (None, Some(f)) => cube_from_facelet(&f)?,
        (None, None) => unreachable!("clap enforces exactly one of scramble/facelet"),
    };

    let pool = WorkerPool::new(threads);
    let config = SolverConfig { data_dir, threads, max_nodes: None };

    let start = Instant::now();
    let solution = match algorithm {
        Algorithm::Korf => {
            let solver = KorfSolver::new_solver(config, &pool);
            let (tx, rx) = mpsc::channel();
            solver.initialize(move || tx.send(()).unwrap());
            rx.recv().expect("pattern database build thread hung up");
            solver.solve(cube)?
        }
        Algorithm::Thistlethwaite => {
            let solver = ThistlethwaiteSolver::new_solver(config, &pool);
            let (tx, rx) = mpsc::channel();
            solver.initialize(move || tx.send(()).unwrap());
            rx.recv().expect("pattern database build thread hung up");
            solver.solve(cube)?
        }
    };
    let elapsed = start.elapsed();

    println!("Solution: {}", scramble_to_str(&solution)?.trim());
    println!("Move count: {}", solution.len());
    println!("Solve time: {elapsed:?}");

    pool.join();
    Ok(())
}

fn scramble(length: usize) -> Result<(), Error> {
    let moves = random_scramble(length);
    println!("Scramble: {}", scramble_to_str(&moves)?.trim());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt::init();
    let program = Cli::parse();

    let result = match program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            algorithm,
            data_dir,
            threads,
        }) => solve(scramble, facelet, algorithm, data_dir, threads),
        Some(Commands::Scramble { length }) => scramble(length),
        None => Ok(()),
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
