//! 走法执行
//!
//! 把一个合法走法作用于局面，产生新的局面。所有副作用（吃子、车的易位、
//! 过路兵、升变、易位权、步数）都体现在返回的状态里，原局面不被修改。

use crate::board::{BoardState, WingRights};
use crate::constants::{KINGSIDE_ROOK_COL, KING_HOME_COL, QUEENSIDE_ROOK_COL};
use crate::error::{ChessError, Result};
use crate::moves::{Move, MoveKind};
use crate::piece::{Piece, PieceType, Side, Square};

/// 执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// 走后的局面
    pub state: BoardState,
    /// 被吃掉的棋子（包括过路兵）
    pub captured: Option<Piece>,
}

/// 走法执行器
pub struct MoveExecutor;

impl MoveExecutor {
    /// 走法是否会让兵到达底线（需要选择升变棋子）
    pub fn requires_promotion(state: &BoardState, mv: &Move) -> bool {
        match state.board.get(mv.from) {
            Some(piece) => {
                piece.piece_type == PieceType::Pawn && mv.to.row == piece.side.promotion_row()
            }
            None => false,
        }
    }

    /// 执行走法
    ///
    /// 兵到达底线时必须提供升变棋子，否则返回 [`ChessError::PromotionRequired`]，
    /// 由调用方进入待升变状态。非升变走法忽略 `promotion`。
    pub fn apply(state: &BoardState, mv: &Move, promotion: Option<PieceType>) -> Result<Applied> {
        let promotion = if Self::requires_promotion(state, mv) {
            match promotion {
                Some(piece_type) if piece_type.is_promotion_target() => Some(piece_type),
                Some(piece_type) => return Err(ChessError::InvalidPromotion(piece_type)),
                None => return Err(ChessError::PromotionRequired),
            }
        } else {
            None
        };

        Ok(Self::apply_unchecked(state, mv, promotion))
    }

    /// 执行走法，兵到底线时自动升变为后（搜索和电脑一方使用）
    pub fn apply_auto_queen(state: &BoardState, mv: &Move) -> Applied {
        let promotion = Self::requires_promotion(state, mv).then_some(PieceType::Queen);
        Self::apply_unchecked(state, mv, promotion)
    }

    fn apply_unchecked(state: &BoardState, mv: &Move, promotion: Option<PieceType>) -> Applied {
        let mut next = *state;
        let Some(piece) = state.board.get(mv.from) else {
            // 起始格为空：不是由本局面生成的走法，原样返回
            return Applied {
                state: next,
                captured: None,
            };
        };
        let side = piece.side;

        // 1. 移动棋子
        let mut captured = next.board.move_piece(mv.from, mv.to);

        // 2. 吃过路兵：被吃的兵与起始格同行、与目标格同列
        if mv.kind == MoveKind::EnPassant {
            let victim = Square::new_unchecked(mv.from.row, mv.to.col);
            captured = next.board.get(victim);
            next.board.set(victim, None);
        }

        // 3. 易位：车移到王越过的格子
        if let Some((rook_from, rook_to)) = Self::castling_rook_path(mv) {
            next.board.move_piece(rook_from, rook_to);
        }

        // 4. 升变
        if let Some(piece_type) = promotion {
            next.board.set(mv.to, Some(Piece::new(piece_type, side)));
        }

        // 5. 易位权
        if piece.piece_type == PieceType::King {
            *next.castling.side_mut(side) = WingRights::NONE;
        }
        if piece.piece_type == PieceType::Rook {
            Self::revoke_rook_right(&mut next, side, mv.from);
        }
        if let Some(victim) = captured {
            if victim.piece_type == PieceType::Rook {
                Self::revoke_rook_right(&mut next, victim.side, mv.to);
            }
        }

        // 6. 吃过路兵目标
        next.en_passant = if mv.kind == MoveKind::DoublePush {
            Some(Square::new_unchecked((mv.from.row + mv.to.row) / 2, mv.from.col))
        } else {
            None
        };

        // 7. 步数与走子方
        if piece.piece_type == PieceType::Pawn || captured.is_some() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }
        if side == Side::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }
        next.side_to_move = side.opponent();

        Applied {
            state: next,
            captured,
        }
    }

    /// 易位时车的起止格
    fn castling_rook_path(mv: &Move) -> Option<(Square, Square)> {
        let row = mv.from.row;
        match mv.kind {
            MoveKind::CastleKingside => Some((
                Square::new_unchecked(row, KINGSIDE_ROOK_COL),
                Square::new_unchecked(row, KING_HOME_COL + 1),
            )),
            MoveKind::CastleQueenside => Some((
                Square::new_unchecked(row, QUEENSIDE_ROOK_COL),
                Square::new_unchecked(row, KING_HOME_COL - 1),
            )),
            _ => None,
        }
    }

    /// 车离开（或在）初始角格时，取消对应一侧的易位权
    fn revoke_rook_right(state: &mut BoardState, side: Side, square: Square) {
        if square.row != side.back_row() {
            return;
        }
        let rights = state.castling.side_mut(side);
        match square.col {
            KINGSIDE_ROOK_COL => rights.king_side = false,
            QUEENSIDE_ROOK_COL => rights.queen_side = false,
            _ => {}
        }
    }
}
