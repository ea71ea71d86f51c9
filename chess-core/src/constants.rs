//! 规则常量定义

/// 棋盘边长（行数与列数）
pub const BOARD_SIZE: usize = 8;

/// 白方底线所在行（第 1 横线）
pub const WHITE_BACK_ROW: u8 = 7;

/// 黑方底线所在行（第 8 横线）
pub const BLACK_BACK_ROW: u8 = 0;

/// 白方兵的起始行
pub const WHITE_PAWN_ROW: u8 = 6;

/// 黑方兵的起始行
pub const BLACK_PAWN_ROW: u8 = 1;

/// 王的初始列（e 线）
pub const KING_HOME_COL: u8 = 4;

/// 短易位一侧车的初始列（h 线）
pub const KINGSIDE_ROOK_COL: u8 = 7;

/// 长易位一侧车的初始列（a 线）
pub const QUEENSIDE_ROOK_COL: u8 = 0;
