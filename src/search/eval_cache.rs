use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::core::Board;

use super::evaluation::{ConceptWeights, Evaluator, Score};

/// Cache de avaliações partilhada entre as tarefas da busca, com a
/// serialização canónica da posição como chave.
///
/// Um falhanço calcula fora do lock e publica depois: duas tarefas podem
/// recalcular o mesmo valor numa corrida (a heurística é pura e
/// determinista), mas o mapa nunca fica num estado parcial.
pub struct EvalCache {
    evaluator: Evaluator,
    table: Mutex<HashMap<String, Score>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EvalCache {
    pub fn new(weights: ConceptWeights) -> Self {
        EvalCache {
            evaluator: Evaluator::new(weights),
            table: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Avaliação memoizada da posição.
    pub fn analyze(&self, board: &Board) -> Score {
        let key = board.serialize();

        if let Some(&score) = self.table.lock().unwrap().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return score;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let score = self.evaluator.evaluate(board);
        self.table.lock().unwrap().insert(key, score);
        score
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.table.lock().unwrap().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn second_lookup_is_memoized() {
        let cache = EvalCache::new(ConceptWeights::default());
        let board = Board::new();

        let first = cache.analyze(&board);
        let second = cache.analyze(&board);

        assert_eq!(first, second);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_lookups_agree_on_one_entry() {
        let cache = Arc::new(EvalCache::new(ConceptWeights::default()));
        let board = Board::new();
        let expected = cache.analyze(&board);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let board = board.clone();
                thread::spawn(move || cache.analyze(&board))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_resets_table_and_counters() {
        let cache = EvalCache::new(ConceptWeights::default());
        cache.analyze(&Board::new());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 0);
    }
}
