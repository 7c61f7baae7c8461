use std::str::FromStr;

use rand::seq::SliceRandom;

use crate::error::Error;
use crate::moves::{Move, ALL_MOVES};

pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace()
        .map(|word| Move::from_str(word.trim()))
        .collect()
}

pub fn scramble_to_str(s: &Vec<Move>) -> Result<String, Error> {
    let result: String = s
        .iter()
        .map(|m| Move::to_string(m))
        .fold("".to_string(), |acc, x| format!("{} {}", acc, x));
    Ok(result)
}

/// Generates a random scramble of `length` moves, rejecting a move that
/// shares a face with its predecessor so the scramble doesn't waste turns
/// that would just cancel or merge.
pub fn random_scramble(length: usize) -> Vec<Move> {
    let mut rng = rand::thread_rng();
    let mut moves = Vec::with_capacity(length);
    let mut prev: Option<Move> = None;
    while moves.len() < length {
        let m = *ALL_MOVES.choose(&mut rng).expect("ALL_MOVES is non-empty");
        if prev.is_some_and(|p| p.is_same_face(m)) {
            continue;
        }
        prev = Some(m);
        moves.push(m);
    }
    moves
}
