// Ficheiro: src/core/error.rs
// Descrição: Enum de erros do motor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShobuError {
    /// A string de serialização não obedece à gramática do formato.
    #[error("malformed serialization: {reason}")]
    MalformedSerialization { reason: String },

    /// `make_move` recebeu um par que não pertence ao conjunto legal.
    #[error("illegal move requested")]
    IllegalMove,

    /// `undo_move` sem lances no histórico.
    #[error("no moves to undo")]
    EmptyHistory,

    /// Busca pedida numa posição sem lances legais.
    #[error("no legal moves in this position")]
    NoLegalMoves,

    /// Falha ao construir o pool de busca ou pânico num trabalhador.
    #[error("search failed: {reason}")]
    SearchFailure { reason: String },
}

impl ShobuError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ShobuError::MalformedSerialization {
            reason: reason.into(),
        }
    }
}
