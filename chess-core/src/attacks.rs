//! 攻击检测
//!
//! 判断某个格子是否处于对方棋子的攻击之下，供合法性过滤、易位检查和
//! 终局判定共用。

use crate::board::Board;
use crate::piece::{Piece, PieceType, Side, Square};

/// 马的 8 个跳跃偏移
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// 王的 8 个相邻方向（同时也是后的滑行方向）
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 直线方向（车）
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 斜线方向（象）
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 攻击检测
pub struct Attacks;

impl Attacks {
    /// 检查 `square` 是否被 `defender` 的对方攻击
    pub fn is_attacked(board: &Board, square: Square, defender: Side) -> bool {
        let attacker = defender.opponent();

        Self::attacked_by_pawn(board, square, attacker)
            || Self::attacked_by_leaper(board, square, attacker, PieceType::Knight, &KNIGHT_OFFSETS)
            || Self::attacked_by_leaper(board, square, attacker, PieceType::King, &KING_OFFSETS)
            || Self::attacked_by_slider(board, square, attacker, &ORTHOGONAL, PieceType::Rook)
            || Self::attacked_by_slider(board, square, attacker, &DIAGONAL, PieceType::Bishop)
    }

    /// 兵从斜前方攻击：白兵向第 0 行前进，因此从目标格下方一行发起攻击
    fn attacked_by_pawn(board: &Board, square: Square, attacker: Side) -> bool {
        let pawn = Some(Piece::new(PieceType::Pawn, attacker));
        let d_row = -attacker.forward();
        [-1i8, 1i8]
            .iter()
            .filter_map(|&d_col| square.offset(d_row, d_col))
            .any(|from| board.get(from) == pawn)
    }

    fn attacked_by_leaper(
        board: &Board,
        square: Square,
        attacker: Side,
        piece_type: PieceType,
        offsets: &[(i8, i8)],
    ) -> bool {
        let target = Some(Piece::new(piece_type, attacker));
        offsets
            .iter()
            .filter_map(|&(d_row, d_col)| square.offset(d_row, d_col))
            .any(|from| board.get(from) == target)
    }

    /// 沿射线查找第一个棋子，是对方的 `slider` 或后即为受攻击
    fn attacked_by_slider(
        board: &Board,
        square: Square,
        attacker: Side,
        directions: &[(i8, i8)],
        slider: PieceType,
    ) -> bool {
        for &(d_row, d_col) in directions {
            let mut current = square;
            while let Some(next) = current.offset(d_row, d_col) {
                if let Some(piece) = board.get(next) {
                    if piece.side == attacker
                        && (piece.piece_type == slider || piece.piece_type == PieceType::Queen)
                    {
                        return true;
                    }
                    break;
                }
                current = next;
            }
        }
        false
    }
}
