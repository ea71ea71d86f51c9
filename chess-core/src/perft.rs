//! Perft 节点计数，用于和已知数据比对走法生成是否正确

use crate::board::BoardState;
use crate::executor::MoveExecutor;
use crate::moves::MoveGenerator;
use crate::notation::Notation;
use crate::piece::PieceType;

/// 统计 `depth` 层后的叶子节点数，升变按四种选择分别计数
pub fn perft(state: &BoardState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0u64;
    for mv in MoveGenerator::generate_legal(state) {
        if MoveExecutor::requires_promotion(state, &mv) {
            for piece_type in PieceType::PROMOTIONS {
                if let Ok(applied) = MoveExecutor::apply(state, &mv, Some(piece_type)) {
                    nodes += perft(&applied.state, depth - 1);
                }
            }
        } else {
            let applied = MoveExecutor::apply_auto_queen(state, &mv);
            nodes += perft(&applied.state, depth - 1);
        }
    }
    nodes
}

/// 按第一步拆分的节点数，便于定位差异
pub fn perft_divide(state: &BoardState, depth: u8) -> Vec<(String, u64)> {
    let mut result = Vec::new();
    if depth == 0 {
        return result;
    }

    for mv in MoveGenerator::generate_legal(state) {
        if MoveExecutor::requires_promotion(state, &mv) {
            for piece_type in PieceType::PROMOTIONS {
                if let Ok(applied) = MoveExecutor::apply(state, &mv, Some(piece_type)) {
                    let label = Notation::to_coordinate(&mv, Some(piece_type));
                    result.push((label, perft(&applied.state, depth - 1)));
                }
            }
        } else {
            let applied = MoveExecutor::apply_auto_queen(state, &mv);
            result.push((Notation::to_coordinate(&mv, None), perft(&applied.state, depth - 1)));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn test_perft_initial_shallow() {
        let state = BoardState::initial();
        assert_eq!(perft(&state, 0), 1);
        assert_eq!(perft(&state, 1), 20);
        assert_eq!(perft(&state, 2), 400);
    }

    #[test]
    fn test_perft_divide_sums() {
        let state = BoardState::initial();
        let divide = perft_divide(&state, 2);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }

    #[test]
    fn test_perft_divide_expands_root_promotions() {
        let state = Fen::parse("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let divide = perft_divide(&state, 1);

        assert_eq!(divide.len() as u64, perft(&state, 1));
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 9);
        for label in ["a7a8q", "a7a8r", "a7a8b", "a7a8n"] {
            assert!(divide.iter().any(|(l, _)| l == label), "missing {}", label);
        }

        let deeper = perft_divide(&state, 2);
        assert_eq!(deeper.iter().map(|(_, n)| n).sum::<u64>(), perft(&state, 2));
    }
}
