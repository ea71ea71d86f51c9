//! 对局状态
//!
//! 唯一的权威局面，外加待升变状态机、吃子记录和走法历史。
//! 只有提交走法或完成升变会修改它。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::BoardState;
use crate::error::{ChessError, Result};
use crate::executor::MoveExecutor;
use crate::fen::Fen;
use crate::moves::{Move, MoveGenerator};
use crate::notation::Notation;
use crate::piece::{Piece, PieceType, Side, Square};

/// 对局结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// 进行中
    InProgress,
    /// 将死
    Checkmate { winner: Side },
    /// 逼和
    Stalemate,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// 升变状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Normal,
    /// 兵已走到底线，等待选择升变棋子；棋盘与走子方都还没有变化
    PendingPromotion(Move),
}

/// 吃子记录，按被吃棋子的原阵营分开，只追加
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedMaterial {
    /// 白方损失的棋子
    pub white: Vec<PieceType>,
    /// 黑方损失的棋子
    pub black: Vec<PieceType>,
}

impl CapturedMaterial {
    fn record(&mut self, piece: Piece) {
        match piece.side {
            Side::White => self.white.push(piece.piece_type),
            Side::Black => self.black.push(piece.piece_type),
        }
    }

    /// 指定阵营损失的棋子
    pub fn lost_by(&self, side: Side) -> &[PieceType] {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }
}

/// 走法记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 坐标记谱，如 "e2e4"、"a7a8q"
    pub notation: String,
    /// 走棋方
    pub side: Side,
    /// 被吃的棋子
    pub captured: Option<Piece>,
    /// 走后局面的 FEN
    pub fen_after: String,
}

/// 一次走棋请求的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// 已提交
    Committed { captured: Option<Piece> },
    /// 进入待升变状态，需要调用 [`Game::resolve_promotion`]
    PromotionPending,
}

/// 对局
#[derive(Debug, Clone)]
pub struct Game {
    state: BoardState,
    phase: GamePhase,
    captured: CapturedMaterial,
    history: Vec<MoveRecord>,
}

impl Game {
    /// 从初始局面开始新对局
    pub fn new() -> Self {
        Self::from_state(BoardState::initial())
    }

    /// 从指定局面开始
    pub fn from_state(state: BoardState) -> Self {
        Self {
            state,
            phase: GamePhase::Normal,
            captured: CapturedMaterial::default(),
            history: Vec::new(),
        }
    }

    /// 从 FEN 开始
    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self::from_state(Fen::parse(fen)?))
    }

    /// 当前局面（只读）
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// 当前走子方
    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move
    }

    /// 当前局面的 FEN
    pub fn fen(&self) -> String {
        Fen::to_string(&self.state)
    }

    /// 当前走子方全部合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        MoveGenerator::generate_legal(&self.state)
    }

    /// 指定格子上棋子的合法走法；不是走子方的棋子时返回空
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        match self.state.board.get(square) {
            Some(piece) if piece.side == self.state.side_to_move => {
                MoveGenerator::legal_moves_from(&self.state, square)
            }
            _ => Vec::new(),
        }
    }

    /// 对局结果
    pub fn outcome(&self) -> Outcome {
        if !self.legal_moves().is_empty() {
            return Outcome::InProgress;
        }
        if self.is_check() {
            Outcome::Checkmate {
                winner: self.state.side_to_move.opponent(),
            }
        } else {
            Outcome::Stalemate
        }
    }

    /// 走子方是否被将军
    pub fn is_check(&self) -> bool {
        MoveGenerator::is_in_check(&self.state.board, self.state.side_to_move)
    }

    /// 吃子记录
    pub fn captured(&self) -> &CapturedMaterial {
        &self.captured
    }

    /// 走法历史
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// 升变状态
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// 等待升变的走法
    pub fn pending_promotion(&self) -> Option<Move> {
        match self.phase {
            GamePhase::PendingPromotion(mv) => Some(mv),
            GamePhase::Normal => None,
        }
    }

    /// 按起止格走棋（交互方使用），兵到底线时进入待升变状态
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveStatus> {
        let mv = self.find_legal(from, to)?;
        self.play_move(mv, None)
    }

    /// 走棋并直接指定升变棋子
    pub fn play_with_promotion(&mut self, from: Square, to: Square, promotion: PieceType) -> Result<MoveStatus> {
        let mv = self.find_legal(from, to)?;
        self.play_move(mv, Some(promotion))
    }

    /// 走一个合法走法；`promotion` 为空且需要升变时进入待升变状态
    pub fn play_move(&mut self, mv: Move, promotion: Option<PieceType>) -> Result<MoveStatus> {
        self.ensure_accepting()?;
        let mv = self.find_legal(mv.from, mv.to)?;

        if promotion.is_none() && MoveExecutor::requires_promotion(&self.state, &mv) {
            debug!("Promotion pending for {}", mv);
            self.phase = GamePhase::PendingPromotion(mv);
            return Ok(MoveStatus::PromotionPending);
        }

        self.commit(mv, promotion)
    }

    /// 走棋，需要升变时自动升变为后（电脑一方使用，不会进入待升变状态）
    pub fn play_auto_queen(&mut self, mv: Move) -> Result<MoveStatus> {
        let promotion = MoveExecutor::requires_promotion(&self.state, &mv).then_some(PieceType::Queen);
        self.play_move(mv, promotion)
    }

    /// 以坐标记谱走棋，如 "e2e4"、"e7e8q"
    ///
    /// 升变走法缺少升变字母时进入待升变状态。
    pub fn play_coordinate(&mut self, text: &str) -> Result<MoveStatus> {
        let parsed = Notation::parse_coordinate(text)?;
        let mv = self.find_legal(parsed.from, parsed.to)?;
        if parsed.promotion.is_some() && !MoveExecutor::requires_promotion(&self.state, &mv) {
            return Err(ChessError::InvalidNotation {
                text: text.to_string(),
            });
        }
        self.play_move(mv, parsed.promotion)
    }

    /// 选择升变棋子，提交等待中的走法
    pub fn resolve_promotion(&mut self, piece_type: PieceType) -> Result<MoveStatus> {
        let GamePhase::PendingPromotion(mv) = self.phase else {
            return Err(ChessError::NoPendingPromotion);
        };
        if !piece_type.is_promotion_target() {
            return Err(ChessError::InvalidPromotion(piece_type));
        }

        self.phase = GamePhase::Normal;
        self.commit(mv, Some(piece_type))
    }

    fn ensure_accepting(&self) -> Result<()> {
        if self.phase != GamePhase::Normal {
            return Err(ChessError::PromotionPending);
        }
        if self.outcome().is_over() {
            return Err(ChessError::GameOver);
        }
        Ok(())
    }

    fn find_legal(&self, from: Square, to: Square) -> Result<Move> {
        self.ensure_accepting()?;
        self.legal_moves_from(from)
            .into_iter()
            .find(|m| m.to == to)
            .ok_or(ChessError::InvalidMove { from, to })
    }

    fn commit(&mut self, mv: Move, promotion: Option<PieceType>) -> Result<MoveStatus> {
        let side = self.state.side_to_move;
        let applied = MoveExecutor::apply(&self.state, &mv, promotion)?;
        let promotion = MoveExecutor::requires_promotion(&self.state, &mv)
            .then_some(promotion)
            .flatten();

        self.state = applied.state;
        if let Some(piece) = applied.captured {
            self.captured.record(piece);
        }

        let notation = Notation::to_coordinate(&mv, promotion);
        info!("{:?} played {}", side, notation);
        self.history.push(MoveRecord {
            notation,
            side,
            captured: applied.captured,
            fen_after: Fen::to_string(&self.state),
        });

        let outcome = self.outcome();
        if outcome.is_over() {
            info!("Game over: {:?}", outcome);
        }

        Ok(MoveStatus::Committed {
            captured: applied.captured,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
