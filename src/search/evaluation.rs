use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::*;

pub type Score = f64;

pub const BLACK_WIN: Score = f64::INFINITY;
pub const WHITE_WIN: Score = f64::NEG_INFINITY;

fn default_weight() -> f64 {
    1.0
}

/// Pesos configuráveis dos quatro conceitos da avaliação. O perfil chega de
/// um carregador de configuração externo; qualquer chave omitida vale 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConceptWeights {
    #[serde(rename = "Material", default = "default_weight")]
    pub material: f64,
    #[serde(rename = "Support", default = "default_weight")]
    pub support: f64,
    #[serde(rename = "Mobility", default = "default_weight")]
    pub mobility: f64,
    #[serde(rename = "Aggression", default = "default_weight")]
    pub aggression: f64,
}

impl Default for ConceptWeights {
    fn default() -> Self {
        ConceptWeights {
            material: 1.0,
            support: 1.0,
            mobility: 1.0,
            aggression: 1.0,
        }
    }
}

impl ConceptWeights {
    /// Constrói os pesos a partir de um mapeamento nome -> peso.
    pub fn from_map(map: &HashMap<String, f64>) -> Self {
        let get = |key: &str| map.get(key).copied().unwrap_or(1.0);
        ConceptWeights {
            material: get("Material"),
            support: get("Support"),
            mobility: get("Mobility"),
            aggression: get("Aggression"),
        }
    }
}

/// Avaliação heurística da posição. Cada sub-tabuleiro contribui com
/// material, mobilidade, suporte e agressão; positivo favorece as pretas.
pub struct Evaluator {
    weights: ConceptWeights,
}

impl Evaluator {
    pub fn new(weights: ConceptWeights) -> Self {
        Evaluator { weights }
    }

    pub fn weights(&self) -> &ConceptWeights {
        &self.weights
    }

    fn material_curve(&self, n: f64) -> f64 {
        (6.0 * (n - 0.85)).ln() * self.weights.material
    }

    fn support_curve(&self, n: f64) -> f64 {
        0.75 * (n / 1.5).sqrt() * self.weights.support
    }

    fn mobility_curve(&self, n: f64) -> f64 {
        if (0.0..=2.0).contains(&n) {
            let t = n / 2.0;
            2.0 * t * t * (3.0 - 2.0 * t) * self.weights.mobility
        } else {
            (0.5 * (n - 1.0).sqrt() + 1.5) * self.weights.mobility
        }
    }

    fn aggression_curve(&self, n: f64) -> f64 {
        0.35 * n.sqrt() * self.weights.aggression
    }

    /// Avalia a posição completa. Um sub-tabuleiro sem peças de uma cor
    /// decide o jogo inteiro: ±infinito, sem misturar com os restantes.
    pub fn evaluate(&self, board: &Board) -> Score {
        let mut total = 0.0;

        for id in BoardId::ALL {
            let sb = board.sub_board(id);
            let black = sb.count(Player::Black);
            let white = sb.count(Player::White);

            if black == 0 {
                return WHITE_WIN;
            }
            if white == 0 {
                return BLACK_WIN;
            }

            // Acumuladores por cor: [pretas, brancas]; mobilidade por direção.
            let mut support = [0.0f64; 2];
            let mut aggression = [0.0f64; 2];
            let mut mobility = [[0.0f64; 8]; 2];

            for y in 0..4 {
                for x in 0..4 {
                    let origin = Coord::new(x, y);
                    let piece = match sb.get(origin) {
                        Some(piece) => piece,
                        None => continue,
                    };
                    let side = piece.index();

                    for (d, dir) in DIRECTIONS.iter().enumerate() {
                        for mag in MAGNITUDES {
                            let target = origin + *dir * mag;
                            if !target.valid() {
                                continue;
                            }
                            match sb.get(target) {
                                None => {
                                    mobility[side][d] += if mag == 1 { 0.5 } else { 1.0 }
                                }
                                Some(p) if p == piece => {
                                    support[side] += if mag == 1 { 1.0 } else { 0.25 }
                                }
                                Some(_) => {
                                    aggression[side] += if mag == 1 { 1.0 } else { 0.35 }
                                }
                            }
                        }
                    }
                }
            }

            total += self.material_curve(black as f64) - self.material_curve(white as f64);
            for d in 0..8 {
                total += self.mobility_curve(mobility[0][d]) - self.mobility_curve(mobility[1][d]);
            }
            total += self.aggression_curve(aggression[0]) - self.aggression_curve(aggression[1]);
            total += self.support_curve(support[0]) - self.support_curve(support[1]);
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse_board(white_left: &str) -> Board {
        let quiet = "1;0;0;0;0;0;0;0;0;0;0;0;0;0;0;-1";
        Board::from_serial(&format!(
            "{q}||{q}||{wl}||{q}&&1&&1",
            q = quiet,
            wl = white_left
        ))
        .unwrap()
    }

    #[test]
    fn start_position_is_balanced() {
        let evaluator = Evaluator::new(ConceptWeights::default());
        let score = evaluator.evaluate(&Board::new());
        assert!(score.abs() < 1e-9, "start position should score 0, got {score}");
    }

    #[test]
    fn missing_color_short_circuits_to_infinity() {
        let evaluator = Evaluator::new(ConceptWeights::default());

        // whiteLeft sem brancas: vitória preta.
        let board = sparse_board("1;0;0;0;0;0;0;0;0;0;0;0;0;0;0;0");
        assert_eq!(evaluator.evaluate(&board), BLACK_WIN);

        // whiteLeft sem pretas: vitória branca.
        let board = sparse_board("-1;0;0;0;0;0;0;0;0;0;0;0;0;0;0;0");
        assert_eq!(evaluator.evaluate(&board), WHITE_WIN);
    }

    #[test]
    fn material_weight_scales_the_material_term() {
        // Pesos restantes a zero isolam o termo de material.
        let weights = |material| ConceptWeights {
            material,
            support: 0.0,
            mobility: 0.0,
            aggression: 0.0,
        };

        // Assimetria: whiteLeft com 2 pretas e 1 branca.
        let board = sparse_board("1;0;0;1;0;0;0;0;0;0;0;0;0;0;0;-1");

        let base = Evaluator::new(weights(1.0)).evaluate(&board);
        let doubled = Evaluator::new(weights(2.0)).evaluate(&board);

        assert!(base > 0.0, "black material advantage should score positive");
        assert!((doubled - 2.0 * base).abs() < 1e-9);
        assert!(doubled.abs() > base.abs());
    }

    #[test]
    fn weights_default_to_one_for_missing_keys() {
        let mut map = HashMap::new();
        map.insert("Material".to_string(), 2.5);
        let weights = ConceptWeights::from_map(&map);
        assert_eq!(weights.material, 2.5);
        assert_eq!(weights.support, 1.0);
        assert_eq!(weights.mobility, 1.0);
        assert_eq!(weights.aggression, 1.0);
    }
}
