//! 外部引擎走法解析器
//!
//! 从应答文本中取出坐标记谱，并在当前局面的合法走法中验证。

use chess_core::{BoardState, Move, Notation, PieceType};
use tracing::{debug, warn};

use crate::error::OracleError;

/// 走法解析器
pub struct MoveParser;

impl MoveParser {
    /// 取出走法记号
    ///
    /// 带 `bestmove` 前缀时取其后的第一个记号，否则取第一个记号。
    pub fn extract_token(text: &str) -> Result<&str, OracleError> {
        let mut tokens = text.split_whitespace();
        let first = tokens
            .next()
            .ok_or_else(|| OracleError::Malformed("empty response".to_string()))?;

        let token = if first == "bestmove" {
            tokens
                .next()
                .ok_or_else(|| OracleError::Malformed(text.to_string()))?
        } else {
            first
        };

        if token == "(none)" {
            return Err(OracleError::Malformed(text.to_string()));
        }
        Ok(token)
    }

    /// 解析并验证走法
    pub fn parse_and_validate(
        text: &str,
        state: &BoardState,
    ) -> Result<(Move, Option<PieceType>), OracleError> {
        let token = Self::extract_token(text)?;
        debug!("Oracle move token: {}", token);

        Notation::find_legal(state, token).map_err(|e| {
            warn!("Oracle suggested unusable move {}: {}", token, e);
            OracleError::Malformed(format!("{token}: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Fen, MoveKind};

    #[test]
    fn test_extract_token() {
        assert_eq!(MoveParser::extract_token("e2e4").unwrap(), "e2e4");
        assert_eq!(
            MoveParser::extract_token("bestmove g1f3 ponder d7d5").unwrap(),
            "g1f3"
        );
        assert_eq!(MoveParser::extract_token("  bestmove a7a8q\n").unwrap(), "a7a8q");
    }

    #[test]
    fn test_extract_token_malformed() {
        assert!(matches!(
            MoveParser::extract_token(""),
            Err(OracleError::Malformed(_))
        ));
        assert!(MoveParser::extract_token("bestmove").is_err());
        assert!(MoveParser::extract_token("bestmove (none)").is_err());
    }

    #[test]
    fn test_parse_and_validate() {
        let state = BoardState::initial();
        let (mv, promotion) = MoveParser::parse_and_validate("bestmove e2e4 ponder e7e5", &state).unwrap();
        assert_eq!(mv.kind, MoveKind::DoublePush);
        assert_eq!(promotion, None);
    }

    #[test]
    fn test_rejects_illegal_and_garbage() {
        let state = BoardState::initial();
        assert!(matches!(
            MoveParser::parse_and_validate("e2e5", &state),
            Err(OracleError::Malformed(_))
        ));
        assert!(MoveParser::parse_and_validate("hello world", &state).is_err());
        // 黑方的走法
        assert!(MoveParser::parse_and_validate("e7e5", &state).is_err());
    }

    #[test]
    fn test_promotion_letter() {
        let state = Fen::parse("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let (_, promotion) = MoveParser::parse_and_validate("bestmove a7a8n", &state).unwrap();
        assert_eq!(promotion, Some(PieceType::Knight));
    }
}
