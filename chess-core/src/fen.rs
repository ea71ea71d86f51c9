//! FEN 格式解析和生成
//!
//! 格式：
//! `<棋盘> <走子方> <易位权> <过路兵目标> <半回合计数> <回合数>`
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`

use crate::board::{Board, BoardState, CastlingRights};
use crate::constants::BOARD_SIZE;
use crate::error::ChessError;
use crate::piece::{Piece, Side, Square};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为局面
    pub fn parse(fen: &str) -> Result<BoardState, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(Self::invalid(format!("Expected 6 fields, got {}", parts.len())));
        }

        let board = Self::parse_board(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(Self::invalid(format!("Invalid side to move: {}", other))),
        };

        let castling = Self::parse_castling(parts[2])?;

        let en_passant = match parts[3] {
            "-" => None,
            text => Some(
                Square::parse(text)
                    .ok_or_else(|| Self::invalid(format!("Invalid en passant square: {}", text)))?,
            ),
        };
        // 目标格必须在刚走过两格的对方兵身后
        if let Some(square) = en_passant {
            let expected_row = match side_to_move {
                Side::White => 2,
                Side::Black => 5,
            };
            if square.row != expected_row {
                return Err(Self::invalid(format!(
                    "En passant square {} does not match side to move",
                    square
                )));
            }
        }

        let halfmove_clock = parts[4]
            .parse()
            .map_err(|_| Self::invalid(format!("Invalid halfmove clock: {}", parts[4])))?;

        let fullmove_number: u32 = parts[5]
            .parse()
            .map_err(|_| Self::invalid(format!("Invalid fullmove number: {}", parts[5])))?;
        if fullmove_number == 0 {
            return Err(Self::invalid("Fullmove number must be at least 1".to_string()));
        }

        Ok(BoardState {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// 解析棋盘部分，第一段是第 0 行（第 8 横线）
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(Self::invalid(format!("Expected 8 ranks, got {}", rows.len())));
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= BOARD_SIZE {
                    return Err(Self::invalid(format!("Rank {} has too many squares", row_idx)));
                }

                if let Some(empty_count) = c.to_digit(10) {
                    if empty_count == 0 {
                        return Err(Self::invalid(format!("Zero run length in rank {}", row_idx)));
                    }
                    col += empty_count as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    board.set(Square::new_unchecked(row_idx as u8, col as u8), Some(piece));
                    col += 1;
                } else {
                    return Err(Self::invalid(format!("Invalid piece character: {}", c)));
                }
            }

            if col != BOARD_SIZE {
                return Err(Self::invalid(format!(
                    "Rank {} has {} squares, expected 8",
                    row_idx, col
                )));
            }
        }

        Ok(board)
    }

    fn parse_castling(text: &str) -> Result<CastlingRights, ChessError> {
        let mut rights = CastlingRights::none();
        if text == "-" {
            return Ok(rights);
        }

        for c in text.chars() {
            match c {
                'K' => rights.white.king_side = true,
                'Q' => rights.white.queen_side = true,
                'k' => rights.black.king_side = true,
                'q' => rights.black.queen_side = true,
                _ => return Err(Self::invalid(format!("Invalid castling rights: {}", text))),
            }
        }

        Ok(rights)
    }

    /// 将局面转换为 FEN 字符串
    pub fn to_string(state: &BoardState) -> String {
        let en_passant = state
            .en_passant
            .map(|square| square.name())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {} {} {}",
            Self::board_to_string(&state.board),
            state.side_to_move.to_fen_char(),
            Self::castling_to_string(&state.castling),
            en_passant,
            state.halfmove_clock,
            state.fullmove_number
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as u8 {
            let mut text = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Square::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        text.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    text.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }

            rows.push(text);
        }

        rows.join("/")
    }

    fn castling_to_string(rights: &CastlingRights) -> String {
        let flags = [
            (rights.white.king_side, 'K'),
            (rights.white.queen_side, 'Q'),
            (rights.black.king_side, 'k'),
            (rights.black.queen_side, 'q'),
        ];
        let text: String = flags.iter().filter(|(on, _)| *on).map(|(_, c)| *c).collect();
        if text.is_empty() {
            "-".to_string()
        } else {
            text
        }
    }

    /// 解析初始局面
    pub fn initial() -> BoardState {
        BoardState::initial()
    }

    fn invalid(reason: String) -> ChessError {
        ChessError::InvalidFen { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::MoveExecutor;
    use crate::moves::MoveGenerator;
    use crate::piece::PieceType;

    #[test]
    fn test_parse_initial_fen() {
        let state = Fen::parse(INITIAL_FEN).unwrap();
        assert_eq!(state, BoardState::initial());
        assert_eq!(Fen::to_string(&BoardState::initial()), INITIAL_FEN);
    }

    #[test]
    fn test_parse_custom_fen() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K2R w K d6 7 42";
        let state = Fen::parse(fen).unwrap();

        assert_eq!(state.side_to_move, Side::White);
        assert!(state.castling.white.king_side);
        assert!(!state.castling.white.queen_side);
        assert!(!state.castling.black.king_side);
        assert_eq!(state.en_passant, Square::parse("d6"));
        assert_eq!(state.halfmove_clock, 7);
        assert_eq!(state.fullmove_number, 42);
        assert_eq!(
            state.board.get(Square::parse("h1").unwrap()),
            Some(Piece::new(PieceType::Rook, Side::White))
        );
        assert_eq!(Fen::to_string(&state), fen);
    }

    #[test]
    fn test_fen_roundtrip_along_a_game() {
        // 沿着一局棋的每个局面做往返
        let mut state = BoardState::initial();
        for _ in 0..30 {
            let fen = Fen::to_string(&state);
            assert_eq!(Fen::parse(&fen).unwrap(), state, "roundtrip failed for {}", fen);

            let moves = MoveGenerator::generate_legal(&state);
            let Some(mv) = moves.last() else {
                break;
            };
            state = MoveExecutor::apply_auto_queen(&state, mv).state;
        }
    }

    #[test]
    fn test_no_castling_rights() {
        let state = Fen::parse("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(state.castling, CastlingRights::none());
        assert!(Fen::to_string(&state).contains(" b - - "));
    }

    #[test]
    fn test_invalid_fen() {
        // 字段数不对
        assert!(Fen::parse("8/8/8/8/8/8/8/8 w").is_err());

        // 横线数不对
        assert!(Fen::parse("8/8/8 w - - 0 1").is_err());

        // 列数不对
        assert!(Fen::parse("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Fen::parse("7/8/8/8/8/8/8/8 w - - 0 1").is_err());

        // 无效字符
        assert!(Fen::parse("4x3/8/8/8/8/8/8/8 w - - 0 1").is_err());

        // 无效走子方、易位权、过路兵格、计数
        assert!(Fen::parse("8/8/8/8/8/8/8/8 x - - 0 1").is_err());
        assert!(Fen::parse("8/8/8/8/8/8/8/8 w KX - 0 1").is_err());
        assert!(Fen::parse("8/8/8/8/8/8/8/8 w - z9 0 1").is_err());
        assert!(Fen::parse("8/8/8/8/8/8/8/8 w - - a 1").is_err());
        assert!(Fen::parse("8/8/8/8/8/8/8/8 w - - 0 0").is_err());
    }

    #[test]
    fn test_en_passant_square_must_match_side() {
        // 白方走棋时目标格只能在第 6 横线，黑方走棋时只能在第 3 横线
        assert!(Fen::parse("4k3/8/8/8/8/8/4PP2/4K3 w - e3 0 1").is_err());
        assert!(Fen::parse("4k3/4pp2/8/8/8/8/8/4K3 b - e6 0 1").is_err());
        assert!(Fen::parse("4k3/8/8/8/8/8/8/4K3 w - e4 0 1").is_err());

        assert!(Fen::parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").is_ok());
        assert!(Fen::parse("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").is_ok());
    }
}
