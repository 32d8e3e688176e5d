use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::*;

use super::eval_cache::EvalCache;
use super::evaluation::Score;

/// Minimax recursivo com poda alfa-beta. As pretas maximizam e as brancas
/// minimizam; o corte é o clássico `alpha >= beta` em ambos os ramos.
///
/// A recursão termina numa posição decidida (a avaliação devolve ±infinito)
/// ou em profundidade 0 (avaliação com cache). Cada filho é um clone
/// independente: nenhum tabuleiro ancestral é mutado.
pub fn minimax(
    board: &Board,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    cache: &EvalCache,
    nodes: &AtomicU64,
) -> Score {
    nodes.fetch_add(1, Ordering::Relaxed);

    if board.has_winner() || depth == 0 {
        return cache.analyze(board);
    }

    let moves = board.get_legal_moves();
    if moves.is_empty() {
        return cache.analyze(board);
    }

    if board.to_move() == Player::Black {
        let mut best = f64::NEG_INFINITY;
        for pair in &moves {
            let mut child = board.clone();
            child.apply_move(pair);
            let score = minimax(&child, depth - 1, alpha, beta, cache, nodes);
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = f64::INFINITY;
        for pair in &moves {
            let mut child = board.clone();
            child.apply_move(pair);
            let score = minimax(&child, depth - 1, alpha, beta, cache, nodes);
            best = best.min(score);
            beta = beta.min(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}
