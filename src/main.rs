// Motor Shobu - Demonstração da geração de lances e da busca paralela
use std::time::Instant;

use shobu::search::Engine;
use shobu::*;

fn main() {
    println!("=== SHOBU: POSIÇÃO INICIAL ===\n");

    let mut board = Board::new();
    println!("{}\n", board);
    println!("Serialização: {}\n", board.serialize());

    let start = Instant::now();
    let moves = board.get_legal_moves();
    let generation_time = start.elapsed();
    println!("✅ Lances legais: {}", moves.len());
    println!("⏱️  Tempo de geração: {:.2}μs\n", generation_time.as_micros());

    if let Some(first) = moves.first() {
        println!("Primeiro lance gerado:\n{}\n", first);
    }

    let engine = Engine::new();
    let threads = num_cpus::get().max(1);
    println!("=== BUSCA ALFA-BETA (threads: {}) ===\n", threads);

    for _ in 0..4 {
        let depth = 2;
        let start = Instant::now();
        match engine.get_best_move(&board, depth, threads) {
            Ok((pair, score)) => {
                let elapsed = start.elapsed();
                let nodes = engine.nodes_searched();
                let nps = if elapsed.as_secs_f64() > 0.0 {
                    (nodes as f64 / elapsed.as_secs_f64()) as u64
                } else {
                    0
                };

                println!("🎯 Turno {} ({:?} a mover, profundidade {}):", board.turn_number(), board.to_move(), depth);
                println!("{}", pair);
                println!("   Score: {:.3}", score);
                println!("   Nodes acumulados: {} (NPS: {})", nodes, nps);
                println!("   Cache: {} posições", engine.cache_len());
                println!("   Tempo: {:.2}ms\n", elapsed.as_millis());

                board
                    .make_move(&pair)
                    .expect("o lance escolhido pela busca é legal");
            }
            Err(e) => {
                println!("❌ Busca falhou: {}", e);
                break;
            }
        }

        if board.has_winner() {
            println!("🏆 Vencedor: {:?}", board.winner());
            break;
        }
    }

    println!("=== POSIÇÃO FINAL (turno {}) ===\n", board.turn_number());
    println!("{}", board);
}
