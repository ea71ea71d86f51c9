//! 走法生成和合法性过滤

use serde::{Deserialize, Serialize};

use crate::attacks::{Attacks, DIAGONAL, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL};
use crate::board::{Board, BoardState};
use crate::constants::{KINGSIDE_ROOK_COL, KING_HOME_COL, QUEENSIDE_ROOK_COL};
use crate::piece::{Piece, PieceType, Side, Square};

/// 走法类型
///
/// 只标记走法的种类，移动车、移除过路兵等副作用由执行器推导。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Normal,
    /// 兵从起始行前进两格
    DoublePush,
    /// 吃过路兵
    EnPassant,
    /// 短易位
    CastleKingside,
    /// 长易位
    CastleQueenside,
}

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
    /// 走法类型
    pub kind: MoveKind,
}

impl Move {
    /// 创建普通走法
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Normal,
        }
    }

    /// 创建指定类型的走法
    pub fn with_kind(from: Square, to: Square, kind: MoveKind) -> Self {
        Self { from, to, kind }
    }

    /// 是否为易位
    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成当前走子方的所有伪合法走法（不考虑王是否被将）
    pub fn generate_pseudo_legal(state: &BoardState) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (square, piece) in state.board.pieces(state.side_to_move) {
            Self::generate_piece_moves(state, square, piece, &mut moves);
        }

        moves
    }

    /// 生成指定格子上棋子的伪合法走法；格子为空时返回空列表
    pub fn moves_from(state: &BoardState, square: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = state.board.get(square) {
            Self::generate_piece_moves(state, square, piece, &mut moves);
        }
        moves
    }

    /// 生成当前走子方的所有合法走法
    pub fn generate_legal(state: &BoardState) -> Vec<Move> {
        Self::generate_pseudo_legal(state)
            .into_iter()
            .filter(|mv| Self::is_legal(state, mv))
            .collect()
    }

    /// 生成指定格子上棋子的合法走法（按该棋子所属阵营判定）
    pub fn legal_moves_from(state: &BoardState, square: Square) -> Vec<Move> {
        Self::moves_from(state, square)
            .into_iter()
            .filter(|mv| Self::is_legal(state, mv))
            .collect()
    }

    /// 伪合法走法是否合法：走完后己方王不能被攻击，易位不能从被将军的格子出发或穿过被攻击的格子
    pub fn is_legal(state: &BoardState, mv: &Move) -> bool {
        let Some(piece) = state.board.get(mv.from) else {
            return false;
        };
        let side = piece.side;

        if mv.is_castle() {
            let step: i8 = if mv.kind == MoveKind::CastleKingside { 1 } else { -1 };
            let Some(transit) = mv.from.offset(0, step) else {
                return false;
            };
            if Attacks::is_attacked(&state.board, mv.from, side)
                || Attacks::is_attacked(&state.board, transit, side)
            {
                return false;
            }
        }

        // 在副本上模拟走法
        let mut scratch = state.board;
        scratch.move_piece(mv.from, mv.to);
        if mv.kind == MoveKind::EnPassant {
            scratch.set(Square::new_unchecked(mv.from.row, mv.to.col), None);
        }

        let king_square = if piece.piece_type == PieceType::King {
            Some(mv.to)
        } else {
            scratch.find_king(side)
        };

        match king_square {
            Some(king) => !Attacks::is_attacked(&scratch, king, side),
            // 没有王的局面（测试用残局）不做限制
            None => true,
        }
    }

    /// 检查指定阵营是否被将军
    pub fn is_in_check(board: &Board, side: Side) -> bool {
        match board.find_king(side) {
            Some(king) => Attacks::is_attacked(board, king, side),
            None => false,
        }
    }

    /// 检查当前走子方是否被将死
    pub fn is_checkmate(state: &BoardState) -> bool {
        Self::is_in_check(&state.board, state.side_to_move) && Self::generate_legal(state).is_empty()
    }

    /// 检查当前走子方是否无子可动但未被将军（逼和）
    pub fn is_stalemate(state: &BoardState) -> bool {
        !Self::is_in_check(&state.board, state.side_to_move) && Self::generate_legal(state).is_empty()
    }

    /// 生成指定棋子的所有伪合法走法
    fn generate_piece_moves(state: &BoardState, square: Square, piece: Piece, moves: &mut Vec<Move>) {
        let board = &state.board;
        match piece.piece_type {
            PieceType::Pawn => Self::generate_pawn_moves(state, square, piece.side, moves),
            PieceType::Knight => Self::generate_leaper_moves(board, square, piece.side, &KNIGHT_OFFSETS, moves),
            PieceType::Bishop => Self::generate_slider_moves(board, square, piece.side, &DIAGONAL, moves),
            PieceType::Rook => Self::generate_slider_moves(board, square, piece.side, &ORTHOGONAL, moves),
            PieceType::Queen => Self::generate_slider_moves(board, square, piece.side, &KING_OFFSETS, moves),
            PieceType::King => {
                Self::generate_leaper_moves(board, square, piece.side, &KING_OFFSETS, moves);
                Self::generate_castling_moves(state, square, piece.side, moves);
            }
        }
    }

    /// 生成兵的走法
    fn generate_pawn_moves(state: &BoardState, from: Square, side: Side, moves: &mut Vec<Move>) {
        let board = &state.board;
        let forward = side.forward();

        // 前进一格，起始行可再前进一格
        if let Some(one) = from.offset(forward, 0) {
            if board.get(one).is_none() {
                moves.push(Move::new(from, one));

                if from.row == side.pawn_row() {
                    if let Some(two) = one.offset(forward, 0) {
                        if board.get(two).is_none() {
                            moves.push(Move::with_kind(from, two, MoveKind::DoublePush));
                        }
                    }
                }
            }
        }

        // 斜吃，包括吃过路兵
        for d_col in [-1i8, 1i8] {
            let Some(to) = from.offset(forward, d_col) else {
                continue;
            };
            match board.get(to) {
                Some(target) if target.side != side => moves.push(Move::new(from, to)),
                Some(_) => {}
                None if state.en_passant == Some(to) => {
                    // 被吃的兵与起始格同行、与目标格同列
                    let victim = Square::new_unchecked(from.row, to.col);
                    if board.get(victim) == Some(Piece::new(PieceType::Pawn, side.opponent())) {
                        moves.push(Move::with_kind(from, to, MoveKind::EnPassant));
                    }
                }
                None => {}
            }
        }
    }

    /// 生成马、王这类单步跳跃棋子的走法
    fn generate_leaper_moves(
        board: &Board,
        from: Square,
        side: Side,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(d_row, d_col) in offsets {
            if let Some(to) = from.offset(d_row, d_col) {
                Self::try_add_move(board, from, to, side, moves);
            }
        }
    }

    /// 生成车、象、后的走法
    fn generate_slider_moves(
        board: &Board,
        from: Square,
        side: Side,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(d_row, d_col) in directions {
            let mut current = from;
            while let Some(to) = current.offset(d_row, d_col) {
                if let Some(target) = board.get(to) {
                    // 遇到棋子：对方的可以吃，无论如何射线到此为止
                    if target.side != side {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
                moves.push(Move::new(from, to));
                current = to;
            }
        }
    }

    /// 生成易位候选；是否经过被攻击的格子交给合法性过滤判断
    fn generate_castling_moves(state: &BoardState, from: Square, side: Side, moves: &mut Vec<Move>) {
        let back = side.back_row();
        if from != Square::new_unchecked(back, KING_HOME_COL) {
            return;
        }

        let rights = state.castling.side(side);
        let rook = Some(Piece::new(PieceType::Rook, side));

        if rights.king_side
            && state.board.get(Square::new_unchecked(back, KINGSIDE_ROOK_COL)) == rook
            && Self::path_clear(&state.board, back, KING_HOME_COL + 1, KINGSIDE_ROOK_COL)
        {
            moves.push(Move::with_kind(
                from,
                Square::new_unchecked(back, KING_HOME_COL + 2),
                MoveKind::CastleKingside,
            ));
        }

        if rights.queen_side
            && state.board.get(Square::new_unchecked(back, QUEENSIDE_ROOK_COL)) == rook
            && Self::path_clear(&state.board, back, QUEENSIDE_ROOK_COL + 1, KING_HOME_COL)
        {
            moves.push(Move::with_kind(
                from,
                Square::new_unchecked(back, KING_HOME_COL - 2),
                MoveKind::CastleQueenside,
            ));
        }
    }

    /// `[start_col, end_col)` 之间的格子是否全空
    fn path_clear(board: &Board, row: u8, start_col: u8, end_col: u8) -> bool {
        (start_col..end_col).all(|col| board.get(Square::new_unchecked(row, col)).is_none())
    }

    /// 尝试添加走法（目标格为空或为对方棋子）
    fn try_add_move(board: &Board, from: Square, to: Square, side: Side, moves: &mut Vec<Move>) {
        match board.get(to) {
            Some(target) if target.side == side => {}
            _ => moves.push(Move::new(from, to)),
        }
    }
}
