// Ficheiro: src/core/board.rs
// Descrição: Módulo que contém a struct Board e os seus métodos principais.

use std::fmt;

use super::error::ShobuError;
use super::types::*;
use crate::moves;

/// Conteúdo de uma casa: vazia ou ocupada por uma cor.
pub type Cell = Option<Player>;

fn cell_to_int(cell: Cell) -> i8 {
    match cell {
        Some(player) => player.sign(),
        None => 0,
    }
}

fn cell_to_char(cell: Cell) -> char {
    match cell {
        Some(Player::Black) => 'B',
        Some(Player::White) => 'W',
        None => '.',
    }
}

/// Um sub-tabuleiro 4x4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubBoard {
    cells: [[Cell; 4]; 4],
}

impl SubBoard {
    pub fn empty() -> Self {
        SubBoard {
            cells: [[None; 4]; 4],
        }
    }

    /// Posição inicial: coluna preta em y=0, coluna branca em y=3.
    fn start() -> Self {
        let mut sb = SubBoard::empty();
        for x in 0..4 {
            sb.set(Coord::new(x, 0), Some(Player::Black));
            sb.set(Coord::new(x, 3), Some(Player::White));
        }
        sb
    }

    #[inline(always)]
    pub fn get(&self, at: Coord) -> Cell {
        debug_assert!(at.valid());
        self.cells[at.y as usize][at.x as usize]
    }

    #[inline(always)]
    pub fn set(&mut self, at: Coord, cell: Cell) {
        debug_assert!(at.valid());
        self.cells[at.y as usize][at.x as usize] = cell;
    }

    pub fn count(&self, player: Player) -> u32 {
        let mut total = 0;
        for row in &self.cells {
            for cell in row {
                if *cell == Some(player) {
                    total += 1;
                }
            }
        }
        total
    }
}

/// O estado completo do jogo: quatro sub-tabuleiros ligados, jogador a mover,
/// contador de turnos e histórico de lances para desfazer.
#[derive(Debug, Clone)]
pub struct Board {
    boards: [SubBoard; 4],
    to_move: Player,
    turn: f64,
    history: Vec<(MovePair, String)>,
    root_serial: String,
    winner: Option<Player>,
}

impl Board {
    /// Cria um novo tabuleiro na posição inicial padrão.
    pub fn new() -> Self {
        let mut board = Board {
            boards: [SubBoard::start(); 4],
            to_move: Player::Black,
            turn: 1.0,
            history: Vec::new(),
            root_serial: String::new(),
            winner: None,
        };
        board.root_serial = board.serialize();
        board
    }

    /// Reconstrói um tabuleiro a partir de uma string de serialização.
    ///
    /// Formato: `<sb0>||<sb1>||<sb2>||<sb3>&&<turno>&&<jogador>`, sub-tabuleiros
    /// na ordem blackLeft, blackRight, whiteLeft, whiteRight, cada um com 16
    /// valores em {-1,0,1} percorridos por y e depois por x, unidos por `;`.
    pub fn from_serial(serial: &str) -> Result<Self, ShobuError> {
        let parts: Vec<&str> = serial.split("&&").collect();
        if parts.len() != 3 {
            return Err(ShobuError::malformed(
                "expected <boards>&&<turn>&&<player>",
            ));
        }

        let sections: Vec<&str> = parts[0].split("||").collect();
        if sections.len() != 4 {
            return Err(ShobuError::malformed("expected four sub-boards"));
        }

        let mut boards = [SubBoard::empty(); 4];
        for (i, section) in sections.iter().enumerate() {
            let values: Vec<&str> = section.split(';').collect();
            if values.len() != 16 {
                return Err(ShobuError::malformed(
                    "expected sixteen cells per sub-board",
                ));
            }
            for (j, value) in values.iter().enumerate() {
                let cell = match *value {
                    "1" => Some(Player::Black),
                    "-1" => Some(Player::White),
                    "0" => None,
                    _ => {
                        return Err(ShobuError::malformed(
                            "cell values must be -1, 0 or 1",
                        ))
                    }
                };
                let at = Coord::new((j % 4) as i8, (j / 4) as i8);
                boards[i].set(at, cell);
            }
        }

        let turn: f64 = parts[1]
            .parse()
            .map_err(|_| ShobuError::malformed("unparseable turn counter"))?;
        if !turn.is_finite() || turn < 1.0 || (turn * 2.0).fract() != 0.0 {
            return Err(ShobuError::malformed(
                "turn counter must be a half-step from 1",
            ));
        }

        let to_move = match parts[2] {
            "1" => Player::Black,
            "-1" => Player::White,
            _ => return Err(ShobuError::malformed("current player must be 1 or -1")),
        };

        let mut board = Board {
            boards,
            to_move,
            turn,
            history: Vec::new(),
            root_serial: String::new(),
            winner: None,
        };
        board.root_serial = board.serialize();
        board.refresh_winner();
        Ok(board)
    }

    #[inline(always)]
    pub fn sub_board(&self, id: BoardId) -> &SubBoard {
        &self.boards[id.index()]
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Contador de turnos: começa em 1 e avança 0.5 por meio-lance.
    pub fn turn(&self) -> f64 {
        self.turn
    }

    pub fn turn_number(&self) -> u32 {
        self.turn.floor() as u32
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self) -> Option<&MovePair> {
        self.history.last().map(|(pair, _)| pair)
    }

    /// Serialização canónica da posição (ver `from_serial`).
    pub fn serialize(&self) -> String {
        let mut sections = Vec::with_capacity(4);
        for id in BoardId::ALL {
            let sb = self.sub_board(id);
            let mut cells = Vec::with_capacity(16);
            for y in 0..4 {
                for x in 0..4 {
                    cells.push(cell_to_int(sb.get(Coord::new(x, y))).to_string());
                }
            }
            sections.push(cells.join(";"));
        }
        format!(
            "{}&&{}&&{}",
            sections.join("||"),
            self.turn,
            self.to_move.sign()
        )
    }

    /// Gera os lances legais do jogador atual. Numa posição já decidida não
    /// há lances.
    pub fn get_legal_moves(&self) -> Vec<MovePair> {
        if self.winner.is_some() {
            return Vec::new();
        }
        moves::generate_legal_moves(self)
    }

    /// Aplica um par de lances depois de o validar contra o conjunto legal.
    /// Um par ilegal é rejeitado sem alterar o tabuleiro.
    pub fn make_move(&mut self, pair: &MovePair) -> Result<(), ShobuError> {
        if !self.get_legal_moves().contains(pair) {
            return Err(ShobuError::IllegalMove);
        }
        self.apply_move(pair);
        Ok(())
    }

    /// Aplica um par sem validação. A busca gera os filhos a partir do
    /// conjunto legal, pelo que a validação vive só em `make_move`.
    pub(crate) fn apply_move(&mut self, pair: &MovePair) {
        // Lance passivo: esvazia a origem, ocupa o destino.
        {
            let sb = &mut self.boards[pair.passive_board.index()];
            let piece = sb.get(pair.passive.start);
            sb.set(pair.passive.start, None);
            sb.set(pair.passive.end, piece);
        }

        // Lance agressivo: desloca a peça e empurra qualquer bloqueadora um
        // passo além do destino, ou para fora do tabuleiro.
        {
            let direction = pair.aggressive.direction();
            let beyond = pair.aggressive.end + direction;
            let sb = &mut self.boards[pair.aggressive_board.index()];

            let mover = sb.get(pair.aggressive.start);
            let on_end = sb.get(pair.aggressive.end);
            let pushed = if on_end.is_some() {
                on_end
            } else if pair.aggressive.magnitude() == 2 {
                let middle = pair.aggressive.start + direction;
                let on_middle = sb.get(middle);
                sb.set(middle, None);
                on_middle
            } else {
                None
            };

            sb.set(pair.aggressive.start, None);
            sb.set(pair.aggressive.end, mover);

            if pushed.is_some() && beyond.valid() {
                sb.set(beyond, pushed);
            }
        }

        self.turn += 0.5;
        self.to_move = !self.to_move;
        self.refresh_winner();
        let serial = self.serialize();
        self.history.push((*pair, serial));
    }

    /// Desfaz o último lance repondo o instantâneo serializado anterior.
    pub fn undo_move(&mut self) -> Result<(), ShobuError> {
        if self.history.pop().is_none() {
            return Err(ShobuError::EmptyHistory);
        }
        let snapshot = match self.history.last() {
            Some((_, serial)) => serial.clone(),
            None => self.root_serial.clone(),
        };
        self.load_snapshot(&snapshot);
        Ok(())
    }

    fn load_snapshot(&mut self, serial: &str) {
        // Os instantâneos vêm de serialize(), o parse não pode falhar.
        let restored =
            Board::from_serial(serial).expect("history snapshots are well-formed");
        self.boards = restored.boards;
        self.to_move = restored.to_move;
        self.turn = restored.turn;
        self.winner = restored.winner;
    }

    /// Um sub-tabuleiro sem peças de uma cor dá a vitória à cor contrária.
    fn refresh_winner(&mut self) {
        self.winner = None;
        for id in BoardId::ALL {
            let sb = self.sub_board(id);
            if sb.count(Player::Black) == 0 {
                self.winner = Some(Player::White);
                return;
            }
            if sb.count(Player::White) == 0 {
                self.winner = Some(Player::Black);
                return;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |id: BoardId, y: i8| -> String {
            (0..4)
                .map(|x| cell_to_char(self.sub_board(id).get(Coord::new(x, y))).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };

        let mut lines = Vec::with_capacity(9);
        for y in (0..4).rev() {
            lines.push(format!(
                "{} | {}",
                row(BoardId::WhiteLeft, y),
                row(BoardId::WhiteRight, y)
            ));
        }
        lines.push("--------+--------".to_string());
        for y in (0..4).rev() {
            lines.push(format!(
                "{} | {}",
                row(BoardId::BlackLeft, y),
                row(BoardId::BlackRight, y)
            ));
        }
        write!(f, "{}", lines.join("\n"))
    }
}
