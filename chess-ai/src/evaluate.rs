//! 棋局评估函数
//!
//! 子力 + 位置分值表，不含机动性、王安全和兵形。

use chess_core::{Board, Piece, PieceType, Side, Square};

/// 评估器
pub struct Evaluator;

/// 棋子位置分值表（白方视角，第 0 行是第 8 横线，黑方需要上下镜像）
/// 索引为 row * 8 + col
mod position_tables {
    #[rustfmt::skip]
    pub const PAWN: [i32; 64] = [
         0,  0,  0,  0,  0,  0,  0,  0,
        50, 50, 50, 50, 50, 50, 50, 50,
        10, 10, 20, 30, 30, 20, 10, 10,
         5,  5, 10, 25, 25, 10,  5,  5,
         0,  0,  0, 20, 20,  0,  0,  0,
         5, -5,-10,  0,  0,-10, -5,  5,
         5, 10, 10,-20,-20, 10, 10,  5,
         0,  0,  0,  0,  0,  0,  0,  0,
    ];

    #[rustfmt::skip]
    pub const KNIGHT: [i32; 64] = [
        -50,-40,-30,-30,-30,-30,-40,-50,
        -40,-20,  0,  0,  0,  0,-20,-40,
        -30,  0, 10, 15, 15, 10,  0,-30,
        -30,  5, 15, 20, 20, 15,  5,-30,
        -30,  0, 15, 20, 20, 15,  0,-30,
        -30,  5, 10, 15, 15, 10,  5,-30,
        -40,-20,  0,  5,  5,  0,-20,-40,
        -50,-40,-30,-30,-30,-30,-40,-50,
    ];

    #[rustfmt::skip]
    pub const BISHOP: [i32; 64] = [
        -20,-10,-10,-10,-10,-10,-10,-20,
        -10,  0,  0,  0,  0,  0,  0,-10,
        -10,  0,  5, 10, 10,  5,  0,-10,
        -10,  5,  5, 10, 10,  5,  5,-10,
        -10,  0, 10, 10, 10, 10,  0,-10,
        -10, 10, 10, 10, 10, 10, 10,-10,
        -10,  5,  0,  0,  0,  0,  5,-10,
        -20,-10,-10,-10,-10,-10,-10,-20,
    ];

    #[rustfmt::skip]
    pub const ROOK: [i32; 64] = [
         0,  0,  0,  0,  0,  0,  0,  0,
         5, 10, 10, 10, 10, 10, 10,  5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
         0,  0,  0,  5,  5,  0,  0,  0,
    ];

    #[rustfmt::skip]
    pub const QUEEN: [i32; 64] = [
        -20,-10,-10, -5, -5,-10,-10,-20,
        -10,  0,  0,  0,  0,  0,  0,-10,
        -10,  0,  5,  5,  5,  5,  0,-10,
         -5,  0,  5,  5,  5,  5,  0, -5,
          0,  0,  5,  5,  5,  5,  0, -5,
        -10,  5,  5,  5,  5,  5,  0,-10,
        -10,  0,  5,  0,  0,  0,  0,-10,
        -20,-10,-10, -5, -5,-10,-10,-20,
    ];

    /// 中局王的位置分
    #[rustfmt::skip]
    pub const KING: [i32; 64] = [
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -20,-30,-30,-40,-40,-30,-30,-20,
        -10,-20,-20,-20,-20,-20,-20,-10,
         20, 20,  0,  0,  0,  0, 20, 20,
         20, 30, 10,  0,  0, 10, 30, 20,
    ];
}

impl Evaluator {
    /// 评估棋局，正值对 `perspective` 有利
    pub fn evaluate(board: &Board, perspective: Side) -> i32 {
        let mut score = 0;

        for (square, piece) in board.all_pieces() {
            let piece_score = Self::evaluate_piece(square, piece);
            if piece.side == perspective {
                score += piece_score;
            } else {
                score -= piece_score;
            }
        }

        score
    }

    /// 评估单个棋子的价值（包括位置分）
    fn evaluate_piece(square: Square, piece: Piece) -> i32 {
        piece.value() + Self::position_bonus(square, piece)
    }

    /// 获取位置加成分
    fn position_bonus(square: Square, piece: Piece) -> i32 {
        let row = match piece.side {
            Side::White => square.row as usize,
            // 黑方镜像（行翻转）
            Side::Black => 7 - square.row as usize,
        };
        let index = row * 8 + square.col as usize;

        match piece.piece_type {
            PieceType::Pawn => position_tables::PAWN[index],
            PieceType::Knight => position_tables::KNIGHT[index],
            PieceType::Bishop => position_tables::BISHOP[index],
            PieceType::Rook => position_tables::ROOK[index],
            PieceType::Queen => position_tables::QUEEN[index],
            PieceType::King => position_tables::KING[index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Fen;

    #[test]
    fn test_initial_evaluation() {
        let board = Board::initial();
        assert_eq!(Evaluator::evaluate(&board, Side::White), 0);
        assert_eq!(Evaluator::evaluate(&board, Side::Black), 0);
    }

    #[test]
    fn test_perspective_is_antisymmetric() {
        let state = Fen::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        let white = Evaluator::evaluate(&state.board, Side::White);
        let black = Evaluator::evaluate(&state.board, Side::Black);
        assert_eq!(white, -black);
    }

    #[test]
    fn test_material_advantage() {
        // 白方多一个后
        let state = Fen::parse("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(Evaluator::evaluate(&state.board, Side::White) > 800);
        assert!(Evaluator::evaluate(&state.board, Side::Black) < -800);
    }

    #[test]
    fn test_mirrored_tables() {
        // 同一兵在对称位置上得分相同
        let white = Fen::parse("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1").unwrap();
        let black = Fen::parse("4k3/8/8/3p4/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(
            Evaluator::evaluate(&white.board, Side::White),
            Evaluator::evaluate(&black.board, Side::Black)
        );
    }

    #[test]
    fn test_centralized_knight_scores_higher() {
        let center = Fen::parse("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        let corner = Fen::parse("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        assert!(
            Evaluator::evaluate(&center.board, Side::White)
                > Evaluator::evaluate(&corner.board, Side::White)
        );
    }
}
