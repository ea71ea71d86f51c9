//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::piece::{Piece, PieceType, Side, Square};

/// 初始底线排列（a 线到 h 线）
const BACK_RANK: [PieceType; BOARD_SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 棋盘
///
/// 8x8 定长数组，按值复制，搜索时每个分支各持一份。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for side in [Side::White, Side::Black] {
            let back = side.back_row();
            let pawns = side.pawn_row();
            for (col, piece_type) in BACK_RANK.iter().enumerate() {
                let col = col as u8;
                board.set(Square::new_unchecked(back, col), Some(Piece::new(*piece_type, side)));
                board.set(Square::new_unchecked(pawns, col), Some(Piece::new(PieceType::Pawn, side)));
            }
        }

        board
    }

    /// 获取指定格子的棋子
    pub fn get(&self, square: Square) -> Option<Piece> {
        if square.is_valid() {
            self.squares[square.row as usize][square.col as usize]
        } else {
            None
        }
    }

    /// 设置指定格子的棋子
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if square.is_valid() {
            self.squares[square.row as usize][square.col as usize] = piece;
        }
    }

    /// 移动棋子（不检查规则），返回目标格原有的棋子
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 查找指定阵营的王
    pub fn find_king(&self, side: Side) -> Option<Square> {
        Square::all().find(|&square| {
            self.get(square) == Some(Piece::new(PieceType::King, side))
        })
    }

    /// 获取指定阵营的所有棋子位置
    pub fn pieces(&self, side: Side) -> Vec<(Square, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.side == side)
            .collect()
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|square| self.get(square).map(|piece| (square, piece)))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 单方易位权
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WingRights {
    /// 短易位（王翼）
    pub king_side: bool,
    /// 长易位（后翼）
    pub queen_side: bool,
}

impl WingRights {
    pub const ALL: WingRights = WingRights {
        king_side: true,
        queen_side: true,
    };

    pub const NONE: WingRights = WingRights {
        king_side: false,
        queen_side: false,
    };
}

/// 双方易位权
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: WingRights,
    pub black: WingRights,
}

impl CastlingRights {
    /// 开局时四项易位权俱全
    pub fn all() -> Self {
        Self {
            white: WingRights::ALL,
            black: WingRights::ALL,
        }
    }

    /// 无任何易位权
    pub fn none() -> Self {
        Self {
            white: WingRights::NONE,
            black: WingRights::NONE,
        }
    }

    /// 获取一方的易位权
    pub fn side(&self, side: Side) -> WingRights {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// 获取一方易位权的可变引用
    pub fn side_mut(&mut self, side: Side) -> &mut WingRights {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

/// 完整的局面状态（棋盘、走子方、易位权、吃过路兵目标、步数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Side,
    /// 易位权
    pub castling: CastlingRights,
    /// 吃过路兵的目标格（上一步双步推进时越过的格子）
    pub en_passant: Option<Square>,
    /// 半回合计数（自上次兵走或吃子以来的步数）
    pub halfmove_clock: u32,
    /// 完整回合数（黑方走完后 +1）
    pub fullmove_number: u32,
}

impl BoardState {
    /// 创建初始状态
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Side::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// 从棋盘创建状态（无易位权、无吃过路兵目标）
    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}
