use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::core::*;

use super::alpha_beta::minimax;
use super::eval_cache::EvalCache;
use super::evaluation::{ConceptWeights, Score};
use super::move_ordering::order_root_moves;

/// Fachada do motor: avaliação com cache e busca de melhor lance com
/// paralelismo na raiz da árvore.
pub struct Engine {
    cache: Arc<EvalCache>,
    nodes: Arc<AtomicU64>,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_weights(ConceptWeights::default())
    }

    pub fn with_weights(weights: ConceptWeights) -> Self {
        Engine {
            cache: Arc::new(EvalCache::new(weights)),
            nodes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Avaliação heurística memoizada da posição.
    pub fn analyze(&self, board: &Board) -> Score {
        self.cache.analyze(board)
    }

    /// Nós visitados desde a criação do motor.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Busca o melhor lance para o jogador atual.
    ///
    /// Os lances de raiz são ordenados pela avaliação a um lance e repartidos
    /// por um pool de exatamente `threads` trabalhadores; cada tarefa clona o
    /// tabuleiro, aplica o seu lance e corre minimax sequencial até
    /// `depth - 1` com uma janela (-inf, +inf) própria. O chamador bloqueia
    /// até todas as tarefas terminarem. Empates resolvem-se pelo índice de
    /// ordenação, não pela ordem de chegada.
    pub fn get_best_move(
        &self,
        board: &Board,
        depth: u8,
        threads: usize,
    ) -> Result<(MovePair, Score), ShobuError> {
        let root_moves = board.get_legal_moves();
        if root_moves.is_empty() {
            return Err(ShobuError::NoLegalMoves);
        }

        let maximizing = board.to_move() == Player::Black;
        let ordered = order_root_moves(board, root_moves, &self.cache);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()
            .map_err(|e| ShobuError::SearchFailure {
                reason: e.to_string(),
            })?;

        let cache = self.cache.clone();
        let nodes = self.nodes.clone();

        // par_iter preserva a ordem de entrada no Vec de saída, pelo que o
        // desempate por índice sobrevive ao paralelismo.
        let results: Vec<(MovePair, Score)> = panic::catch_unwind(AssertUnwindSafe(|| {
            pool.install(|| {
                ordered
                    .par_iter()
                    .map(|(pair, _)| {
                        let mut child = board.clone();
                        child.apply_move(pair);
                        let score = minimax(
                            &child,
                            depth.saturating_sub(1),
                            f64::NEG_INFINITY,
                            f64::INFINITY,
                            &cache,
                            &nodes,
                        );
                        (*pair, score)
                    })
                    .collect()
            })
        }))
        .map_err(|_| ShobuError::SearchFailure {
            reason: "a search worker panicked".to_string(),
        })?;

        let mut best = results[0];
        for candidate in &results[1..] {
            let better = if maximizing {
                candidate.1 > best.1
            } else {
                candidate.1 < best.1
            };
            if better {
                best = *candidate;
            }
        }
        Ok(best)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
