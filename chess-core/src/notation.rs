//! 坐标记谱
//!
//! 与外部引擎交互时使用的走法编码：起始格 + 目标格 + 可选的小写升变字母，
//! 例如 `e2e4`、`e7e8q`。

use crate::board::BoardState;
use crate::error::ChessError;
use crate::executor::MoveExecutor;
use crate::moves::{Move, MoveGenerator};
use crate::piece::{PieceType, Square};

/// 解析后的坐标走法（尚未与局面匹配）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

/// 坐标记谱
pub struct Notation;

impl Notation {
    /// 把走法编码为坐标记谱
    pub fn to_coordinate(mv: &Move, promotion: Option<PieceType>) -> String {
        let mut text = format!("{}{}", mv.from, mv.to);
        if let Some(piece_type) = promotion {
            text.push(piece_type.to_char());
        }
        text
    }

    /// 解析 4 或 5 个字符的坐标记谱
    pub fn parse_coordinate(text: &str) -> Result<CoordinateMove, ChessError> {
        let invalid = || ChessError::InvalidNotation {
            text: text.to_string(),
        };

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }

        let from = Square::parse(&text[0..2]).ok_or_else(invalid)?;
        let to = Square::parse(&text[2..4]).ok_or_else(invalid)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) if c.is_ascii_lowercase() => {
                let piece_type = PieceType::from_char(c).ok_or_else(invalid)?;
                if !piece_type.is_promotion_target() {
                    return Err(invalid());
                }
                Some(piece_type)
            }
            Some(_) => return Err(invalid()),
        };

        Ok(CoordinateMove { from, to, promotion })
    }

    /// 在当前局面的合法走法中查找坐标记谱对应的走法
    ///
    /// 升变走法缺少升变字母时视为无效；非升变走法带升变字母同样无效。
    pub fn find_legal(state: &BoardState, text: &str) -> Result<(Move, Option<PieceType>), ChessError> {
        let parsed = Self::parse_coordinate(text)?;

        let mv = MoveGenerator::generate_legal(state)
            .into_iter()
            .find(|m| m.from == parsed.from && m.to == parsed.to)
            .ok_or(ChessError::InvalidMove {
                from: parsed.from,
                to: parsed.to,
            })?;

        if MoveExecutor::requires_promotion(state, &mv) != parsed.promotion.is_some() {
            return Err(ChessError::InvalidNotation {
                text: text.to_string(),
            });
        }

        Ok((mv, parsed.promotion))
    }
}
