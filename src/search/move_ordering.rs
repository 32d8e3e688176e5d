use std::cmp::Ordering;

use crate::core::*;

use super::eval_cache::EvalCache;
use super::evaluation::Score;

/// Ordena os lances de raiz pela avaliação a um lance de profundidade:
/// descendente quando jogam as pretas, ascendente quando jogam as brancas.
///
/// A ordenação é estável, pelo que lances com a mesma avaliação mantêm a
/// ordem de geração e o índice pós-ordenação desempata a busca de forma
/// determinista.
pub fn order_root_moves(
    board: &Board,
    moves: Vec<MovePair>,
    cache: &EvalCache,
) -> Vec<(MovePair, Score)> {
    let maximizing = board.to_move() == Player::Black;

    let mut scored: Vec<(MovePair, Score)> = moves
        .into_iter()
        .map(|pair| {
            let mut child = board.clone();
            child.apply_move(&pair);
            (pair, cache.analyze(&child))
        })
        .collect();

    scored.sort_by(|a, b| {
        let ord = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
        if maximizing {
            ord.reverse()
        } else {
            ord
        }
    });

    scored
}
