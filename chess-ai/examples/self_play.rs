//! 电脑自对弈示例
//!
//! 运行方式:
//! ```bash
//! cargo run -p chess-ai --example self_play
//!
//! # 指定白方/黑方难度，启用外部引擎
//! cargo run -p chess-ai --features http-oracle --example self_play -- hard easy oracle
//! ```

use std::env;

use chess_ai::{AiBackend, AiConfig, AiPlayer, Difficulty, HttpOracle};
use chess_core::{Game, GameRecord, Side, INITIAL_FEN};

const MAX_PLIES: usize = 200;

fn parse_difficulty(arg: Option<&String>, default: Difficulty) -> Difficulty {
    match arg.map(|s| s.to_lowercase()).as_deref() {
        Some("beginner") => Difficulty::Beginner,
        Some("easy") => Difficulty::Easy,
        Some("medium") => Difficulty::Medium,
        Some("hard") => Difficulty::Hard,
        _ => default,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();
    let white_level = parse_difficulty(args.get(1), Difficulty::Medium);
    let black_level = parse_difficulty(args.get(2), Difficulty::Beginner);
    let backend = match args.get(3).map(String::as_str) {
        Some("oracle") => AiBackend::Oracle,
        _ => AiBackend::Search,
    };

    println!("=== 国际象棋自对弈 ===");
    println!("白方: {:?}  黑方: {:?}  后端: {:?}\n", white_level, black_level, backend);

    let mut white = AiPlayer::new(AiConfig::from_difficulty(white_level).with_backend(backend))
        .with_oracle(Box::new(HttpOracle::with_defaults()?));
    let mut black = AiPlayer::new(AiConfig::from_difficulty(black_level));

    let mut game = Game::new();
    while !game.outcome().is_over() && game.history().len() < MAX_PLIES {
        let player = match game.side_to_move() {
            Side::White => &mut white,
            Side::Black => &mut black,
        };
        if player.play_turn(&mut game).await?.is_none() {
            break;
        }
    }

    let mut record = GameRecord::from_game(&game, INITIAL_FEN, white_level.name(), black_level.name());
    record.set_ai_difficulty(&format!("{} vs {}", white_level.name(), black_level.name()));

    println!("\n{}", record.to_move_text());
    println!("\n结果: {:?}", game.outcome());
    println!("最终局面: {}", game.fen());
    println!(
        "白方损失: {:?}\n黑方损失: {:?}",
        game.captured().lost_by(Side::White),
        game.captured().lost_by(Side::Black)
    );

    Ok(())
}
