//! 电脑棋手
//!
//! 把难度策略、内部搜索和外部引擎组合成一次"选一步棋"的操作。

use std::time::Duration;

use chess_core::{
    BoardState, Fen, Game, Move, MoveExecutor, MoveGenerator, MoveStatus, PieceType, Side,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::{AiBackend, AiConfig};
use crate::difficulty::{Difficulty, DifficultyPolicy};
use crate::error::OracleError;
use crate::oracle::{MoveOracle, MoveParser, OracleRequest, OracleResponse};
use crate::search::AiEngine;

/// 走法来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    Search,
    Oracle,
}

/// 电脑选出的走法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mv: Move,
    /// 升变棋子（仅升变走法）
    pub promotion: Option<PieceType>,
    pub source: DecisionSource,
    /// 内部搜索给出的分数
    pub score: Option<i32>,
}

/// 电脑棋手
pub struct AiPlayer {
    config: AiConfig,
    engine: AiEngine,
    rng: ChaCha8Rng,
    oracle: Option<Box<dyn MoveOracle>>,
}

impl AiPlayer {
    pub fn new(config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            engine: AiEngine::new(Side::White),
            rng,
            oracle: None,
        }
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    /// 设置外部引擎
    pub fn with_oracle(mut self, oracle: Box<dyn MoveOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// 上一次内部搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.engine.nodes_searched()
    }

    /// 选择走法，无合法走法时返回 None
    ///
    /// 外部引擎后端先查询外部引擎，任何失败都回退到内部搜索。
    pub async fn choose_move(&mut self, state: &BoardState) -> Option<Decision> {
        if MoveGenerator::generate_legal(state).is_empty() {
            return None;
        }

        if self.config.backend == AiBackend::Oracle {
            match self.query_oracle(state).await {
                Ok(decision) => {
                    info!("Using oracle move {}", decision.mv);
                    return Some(decision);
                }
                Err(e) => warn!("Oracle failed, falling back to search: {}", e),
            }
        }

        self.choose_move_local(state)
    }

    /// 只用内部搜索和难度策略选择走法
    pub fn choose_move_local(&mut self, state: &BoardState) -> Option<Decision> {
        let params = self.config.params;
        let scored = self.engine.score_moves(state, params.depth);
        let chosen = DifficultyPolicy::select(&scored, params.blunder_rate, &mut self.rng)?;

        info!(
            "{} chose {} (score {}, depth {})",
            self.config.difficulty.name(),
            chosen.mv,
            chosen.score,
            params.depth
        );

        Some(Decision {
            mv: chosen.mv,
            promotion: self.promotion_for(state, &chosen.mv, None),
            source: DecisionSource::Search,
            score: Some(chosen.score),
        })
    }

    /// 为对局选一步并提交，对局结束时返回 None
    pub async fn play_turn(&mut self, game: &mut Game) -> chess_core::Result<Option<Decision>> {
        if game.outcome().is_over() {
            return Ok(None);
        }

        let state = *game.state();
        let Some(decision) = self.choose_move(&state).await else {
            return Ok(None);
        };

        let status = game.play_move(decision.mv, decision.promotion)?;
        debug_assert!(matches!(status, MoveStatus::Committed { .. }));
        Ok(Some(decision))
    }

    async fn query_oracle(&self, state: &BoardState) -> Result<Decision, OracleError> {
        let oracle = self
            .oracle
            .as_ref()
            .ok_or_else(|| OracleError::Unavailable("no oracle configured".to_string()))?;

        let request = OracleRequest {
            fen: Fen::to_string(state),
            depth: self.config.params.oracle_depth,
            skill: self.config.params.oracle_skill,
        };
        debug!("Querying {} oracle: {:?}", oracle.name(), request);

        let timeout_ms = self.config.oracle_timeout_ms;
        let response = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            oracle.best_move(&request),
        )
        .await
        .map_err(|_| OracleError::Timeout(timeout_ms))?
        .map_err(|e| OracleError::Unavailable(format!("{e:#}")))?;

        let text = match response {
            OracleResponse::BestMove(text) => text,
            OracleResponse::NotReady => return Err(OracleError::NotReady),
        };

        let (mv, promotion) = MoveParser::parse_and_validate(&text, state)?;
        Ok(Decision {
            mv,
            promotion: self.promotion_for(state, &mv, promotion),
            source: DecisionSource::Oracle,
            score: None,
        })
    }

    /// 升变走法使用给定棋子或配置的升变棋子
    fn promotion_for(&self, state: &BoardState, mv: &Move, given: Option<PieceType>) -> Option<PieceType> {
        if !MoveExecutor::requires_promotion(state, mv) {
            return None;
        }
        let configured = if self.config.promotion_piece.is_promotion_target() {
            self.config.promotion_piece
        } else {
            PieceType::Queen
        };
        Some(given.unwrap_or(configured))
    }
}
