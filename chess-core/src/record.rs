//! 棋谱记录格式
//!
//! 单局棋谱的 JSON 导出与回放。

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::{Game, MoveRecord, Outcome};

/// 棋谱版本
pub const RECORD_VERSION: &str = "1.0";

/// 对局元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 白方玩家名
    pub white_player: String,
    /// 黑方玩家名
    pub black_player: String,
    /// 对局日期
    pub date: String,
    /// 对局结果
    pub result: Outcome,
    /// AI 难度（人机对局）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_difficulty: Option<String>,
}

/// 完整的棋谱记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 元数据
    pub metadata: GameMetadata,
    /// 初始局面 FEN
    pub initial_fen: String,
    /// 走法列表
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// 从对局生成棋谱
    pub fn from_game(game: &Game, initial_fen: &str, white_player: &str, black_player: &str) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                white_player: white_player.to_string(),
                black_player: black_player.to_string(),
                date: Utc::now().format("%Y-%m-%d").to_string(),
                result: game.outcome(),
                ai_difficulty: None,
            },
            initial_fen: initial_fen.to_string(),
            moves: game.history().to_vec(),
        }
    }

    /// 设置 AI 难度
    pub fn set_ai_difficulty(&mut self, difficulty: &str) {
        self.metadata.ai_difficulty = Some(difficulty.to_string());
    }

    /// 按记录重新走一遍，得到对局
    pub fn replay(&self) -> Result<Game> {
        let mut game = Game::from_fen(&self.initial_fen)?;
        for mv in &self.moves {
            game.play_coordinate(&mv.notation)?;
        }
        Ok(game)
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 生成按回合编号的走法文本，如 `1. e2e4 e7e5`
    pub fn to_move_text(&self) -> String {
        let mut output = String::new();
        for (i, mv) in self.moves.iter().enumerate() {
            if i % 2 == 0 {
                if i > 0 {
                    output.push(' ');
                }
                output.push_str(&format!("{}. {}", i / 2 + 1, mv.notation));
            } else {
                output.push_str(&format!(" {}", mv.notation));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::INITIAL_FEN;
    use crate::piece::Side;

    fn scholars_mate() -> Game {
        let mut game = Game::new();
        for text in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
            game.play_coordinate(text).unwrap();
        }
        game
    }

    #[test]
    fn test_game_record_json() {
        let game = scholars_mate();
        let mut record = GameRecord::from_game(&game, INITIAL_FEN, "玩家1", "AI");
        record.set_ai_difficulty("Easy");

        let json = record.to_json().unwrap();
        let parsed = GameRecord::from_json(&json).unwrap();

        assert_eq!(parsed.metadata.white_player, "玩家1");
        assert_eq!(parsed.metadata.result, Outcome::Checkmate { winner: Side::White });
        assert_eq!(parsed.moves.len(), 7);
        assert_eq!(parsed.metadata.ai_difficulty.as_deref(), Some("Easy"));
    }

    #[test]
    fn test_replay() {
        let game = scholars_mate();
        let record = GameRecord::from_game(&game, INITIAL_FEN, "a", "b");
        let replayed = record.replay().unwrap();
        assert_eq!(replayed.state(), game.state());
        assert_eq!(replayed.captured(), game.captured());
    }

    #[test]
    fn test_move_text() {
        let game = scholars_mate();
        let record = GameRecord::from_game(&game, INITIAL_FEN, "a", "b");
        assert_eq!(
            record.to_move_text(),
            "1. e2e4 e7e5 2. f1c4 b8c6 3. d1h5 g8f6 4. h5f7"
        );
    }
}
