//! 国际象棋 AI 引擎
//!
//! 包含:
//! - 棋局评估函数（子力 + 位置分值表）
//! - Minimax + Alpha-Beta 搜索
//! - 难度档位与随机选择策略
//! - 外部引擎接口（超时后回退到内部搜索）

mod config;
mod difficulty;
mod error;
mod evaluate;
pub mod oracle;
mod player;
mod search;

pub use config::{AiBackend, AiConfig};
pub use difficulty::{Difficulty, DifficultyPolicy, TierParams, TOLERANCE_CP};
pub use error::OracleError;
pub use evaluate::Evaluator;
pub use oracle::{HttpOracle, HttpOracleConfig, MoveOracle, MoveParser, OracleRequest, OracleResponse};
pub use player::{AiPlayer, Decision, DecisionSource};
pub use search::{AiEngine, ScoredMove, MATE_SCORE};
