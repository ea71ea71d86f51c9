//! 错误类型定义

use thiserror::Error;

use crate::piece::{PieceType, Square};

/// 国际象棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 走法不在当前局面的合法走法集合中
    #[error("Invalid move: {from} -> {to}")]
    InvalidMove { from: Square, to: Square },

    /// 有兵待升变，必须先选择升变棋子
    #[error("A promotion is pending and must be resolved first")]
    PromotionPending,

    /// 没有待升变的走法
    #[error("No promotion is pending")]
    NoPendingPromotion,

    /// 兵到达底线但未提供升变棋子
    #[error("Move reaches the last rank and needs a promotion piece")]
    PromotionRequired,

    /// 不能升变为该棋子
    #[error("Cannot promote to {0:?}")]
    InvalidPromotion(PieceType),

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 无效的坐标记谱
    #[error("Invalid move notation: {text}")]
    InvalidNotation { text: String },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
