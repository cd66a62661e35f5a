//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The seeker maximizes `-manhattan(seeker, target)`. The target is assumed
//! to minimize the same score, moving from its current tile with the same
//! move generator. This is a worst-case model, not a prediction of how the
//! target is actually controlled.

use super::open_neighbors;
use crate::grid::{Position, Walkable};

/// Plies searched when a caller has no preference: one move each.
pub const DEFAULT_DEPTH: u32 = 2;

fn evaluate(seeker: Position, target: Position) -> i32 {
    -seeker.manhattan(target)
}

fn minimax<W: Walkable + ?Sized>(
    seeker: Position,
    target: Position,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    grid: &W,
) -> i32 {
    if depth == 0 {
        return evaluate(seeker, target);
    }

    if maximizing {
        let mut best = i32::MIN;
        let mut any = false;
        for next in open_neighbors(seeker, grid) {
            any = true;
            best = best.max(minimax(next, target, depth - 1, alpha, beta, false, grid));
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        if any { best } else { evaluate(seeker, target) }
    } else {
        let mut best = i32::MAX;
        let mut any = false;
        for next in open_neighbors(target, grid) {
            any = true;
            best = best.min(minimax(seeker, next, depth - 1, alpha, beta, true, grid));
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        if any { best } else { evaluate(seeker, target) }
    }
}

/// Best single step for a seeker at `current` chasing `target`.
///
/// `depth` counts plies including the seeker's own first move and is
/// clamped to at least 1. The first move reaching the maximal score in
/// search order wins. Returns `current` when no neighbor is open.
#[must_use]
pub fn adversarial_move<W: Walkable + ?Sized>(
    current: Position,
    target: Position,
    grid: &W,
    depth: u32,
) -> Position {
    let depth = depth.max(1);
    let mut alpha = i32::MIN;
    let beta = i32::MAX;
    let mut best_score = i32::MIN;
    let mut best_move = None;

    for next in open_neighbors(current, grid) {
        let score = minimax(next, target, depth - 1, alpha, beta, false, grid);
        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(next);
        }
        alpha = alpha.max(best_score);
    }

    tracing::trace!(%current, %target, score = best_score, "adversarial move");
    best_move.unwrap_or(current)
}
