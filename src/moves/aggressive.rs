// Ficheiro: src/moves/aggressive.rs
// Descrição: Emparelhamento dos lances agressivos nos tabuleiros ligados,
// incluindo a física dos empurrões.

use crate::core::*;

/// Empareja um lance passivo com todos os lances agressivos admissíveis.
/// O lance agressivo usa o mesmo vetor de deslocamento e tem de ser jogado
/// num dos dois tabuleiros ligados ao tabuleiro passivo.
pub fn pair_with_aggressive(
    board: &Board,
    passive: Move,
    passive_board: BoardId,
    out: &mut Vec<MovePair>,
) {
    let player = board.to_move();
    let displacement = passive.difference();
    let direction = passive.direction();
    let magnitude = passive.magnitude();

    for id in passive_board.linked() {
        let sb = board.sub_board(id);
        for y in 0..4 {
            for x in 0..4 {
                let start = Coord::new(x, y);
                if sb.get(start) != Some(player) {
                    continue;
                }
                let end = start + displacement;
                if !end.valid() {
                    continue;
                }

                let legal = if magnitude == 1 {
                    legal_magnitude_one(sb, player, end, direction)
                } else {
                    legal_magnitude_two(sb, player, start, end, direction)
                };

                if legal {
                    out.push(MovePair {
                        passive,
                        passive_board,
                        aggressive: Move::new(start, end),
                        aggressive_board: id,
                    });
                }
            }
        }
    }
}

/// Magnitude 1: destino vazio, ou peça contrária empurrável (a casa atrás
/// dela está vazia ou fora do tabuleiro). Peça própria no destino é ilegal.
fn legal_magnitude_one(sb: &SubBoard, player: Player, end: Coord, direction: Coord) -> bool {
    match sb.get(end) {
        None => true,
        Some(p) if p == player => false,
        Some(_) => {
            let behind = end + direction;
            !behind.valid() || sb.get(behind).is_none()
        }
    }
}

/// Magnitude 2: deslize limpo com meio e destino vazios; peça própria em
/// qualquer um dos dois é ilegal; exatamente uma peça contrária (XOR) é
/// empurrável se a casa além do destino estiver vazia ou fora do tabuleiro.
fn legal_magnitude_two(
    sb: &SubBoard,
    player: Player,
    start: Coord,
    end: Coord,
    direction: Coord,
) -> bool {
    let on_middle = sb.get(start + direction);
    let on_end = sb.get(end);

    if on_middle.is_none() && on_end.is_none() {
        return true;
    }
    if on_middle == Some(player) || on_end == Some(player) {
        return false;
    }
    if (on_middle == Some(!player)) ^ (on_end == Some(!player)) {
        let beyond = end + direction;
        return !beyond.valid() || sb.get(beyond).is_none();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(
        black_left: &str,
        black_right: &str,
        white_left: &str,
        white_right: &str,
        player: i8,
    ) -> Board {
        Board::from_serial(&format!(
            "{}||{}||{}||{}&&1&&{}",
            black_left, black_right, white_left, white_right, player
        ))
        .unwrap()
    }

    // Passivo fixo no blackLeft com deslocamento (1, 0): preta em (0, 2).
    const PASSIVE_HOME: &str = "0;0;0;0;0;0;0;0;1;0;0;0;0;0;0;-1";
    const QUIET: &str = "1;0;0;0;0;0;0;0;0;0;0;0;0;0;0;-1";

    fn pairs_on_white_left(white_left: &str, displacement: Coord) -> Vec<MovePair> {
        let board = board_from(PASSIVE_HOME, QUIET, white_left, QUIET, 1);
        let start = Coord::new(0, 2);
        let passive = Move::new(start, start + displacement);
        let mut out = Vec::new();
        pair_with_aggressive(&board, passive, BoardId::BlackLeft, &mut out);
        out.into_iter()
            .filter(|pair| pair.aggressive_board == BoardId::WhiteLeft)
            .collect()
    }

    #[test]
    fn own_piece_on_the_destination_is_illegal() {
        // Pretas em (0,0) e (1,0): a da esquerda não pode deslizar para a direita.
        let pairs = pairs_on_white_left("1;1;0;0;0;0;0;0;0;0;0;0;0;0;0;-1", Coord::new(1, 0));
        assert!(!pairs
            .iter()
            .any(|p| p.aggressive.start == Coord::new(0, 0)));
        assert!(pairs
            .iter()
            .any(|p| p.aggressive.start == Coord::new(1, 0)));
    }

    #[test]
    fn push_into_empty_space_is_legal() {
        // Branca em (1,0) com (2,0) vazia: empurrável.
        let pairs = pairs_on_white_left("1;-1;0;0;0;0;0;0;0;0;0;0;0;0;0;-1", Coord::new(1, 0));
        assert!(pairs
            .iter()
            .any(|p| p.aggressive == Move::new(Coord::new(0, 0), Coord::new(1, 0))));
    }

    #[test]
    fn push_blocked_behind_is_illegal() {
        // Branca em (1,0) com outra peça em (2,0): nada a fazer.
        let pairs = pairs_on_white_left("1;-1;-1;0;0;0;0;0;0;0;0;0;0;0;0;-1", Coord::new(1, 0));
        assert!(!pairs
            .iter()
            .any(|p| p.aggressive == Move::new(Coord::new(0, 0), Coord::new(1, 0))));
    }

    #[test]
    fn magnitude_two_rejects_two_blockers() {
        // Duas brancas no caminho: XOR falha.
        let pairs = pairs_on_white_left("1;-1;-1;0;0;0;0;0;0;0;0;0;0;0;0;-1", Coord::new(2, 0));
        assert!(!pairs
            .iter()
            .any(|p| p.aggressive.start == Coord::new(0, 0)));
    }

    #[test]
    fn magnitude_two_pushes_a_single_blocker() {
        // Uma só branca no destino, (3,0) livre: legal.
        let pairs = pairs_on_white_left("1;0;-1;0;0;0;0;0;0;0;0;0;0;0;0;-1", Coord::new(2, 0));
        assert!(pairs
            .iter()
            .any(|p| p.aggressive == Move::new(Coord::new(0, 0), Coord::new(2, 0))));
    }

    #[test]
    fn magnitude_two_push_to_the_edge_is_legal() {
        // Branca no destino (3,0): além fica fora do tabuleiro, empurra para fora.
        let pairs = pairs_on_white_left("0;1;0;-1;0;0;0;0;0;0;0;0;0;0;0;-1", Coord::new(2, 0));
        assert!(pairs
            .iter()
            .any(|p| p.aggressive == Move::new(Coord::new(1, 0), Coord::new(3, 0))));
    }

    #[test]
    fn aggressive_moves_only_on_linked_boards() {
        let board = Board::new();
        for pair in board.get_legal_moves() {
            assert!(pair.passive_board.linked().contains(&pair.aggressive_board));
            assert_eq!(pair.aggressive.difference(), pair.passive.difference());
        }
    }
}
