// Ficheiro: src/moves/mod.rs
// Descrição: Declara os submódulos para a geração de lances de cada fase.

pub mod aggressive;
pub mod passive;

use crate::core::*;

/// Gera o conjunto completo de pares (passivo, agressivo) legais do jogador
/// atual: primeiro os deslizes passivos nos tabuleiros próprios, depois o
/// emparelhamento agressivo nos tabuleiros ligados.
pub fn generate_legal_moves(board: &Board) -> Vec<MovePair> {
    let mut pairs = Vec::with_capacity(128);
    for (passive, passive_board) in passive::generate_passive_moves(board) {
        aggressive::pair_with_aggressive(board, passive, passive_board, &mut pairs);
    }
    pairs
}
