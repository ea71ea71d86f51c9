//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝，固定深度，不使用置换表和走法排序。

use chess_core::{BoardState, Move, MoveExecutor, MoveGenerator, Side};
use tracing::debug;

use crate::evaluate::Evaluator;

/// 将死分值，实际返回 `MATE_SCORE + 剩余深度`，越早将死分值越高
pub const MATE_SCORE: i32 = 100_000;

const INFINITY: i32 = 1_000_000;

/// 带分数的走法（分数为走棋方视角）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// AI 引擎
pub struct AiEngine {
    perspective: Side,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎，分数以 `perspective` 一方为正
    pub fn new(perspective: Side) -> Self {
        Self {
            perspective,
            nodes_searched: 0,
        }
    }

    pub fn perspective(&self) -> Side {
        self.perspective
    }

    /// Alpha-Beta 搜索
    ///
    /// `maximizing` 为 true 时轮到引擎一方走。无子可动时，被将军返回将死分，否则为和棋 0 分。
    pub fn minimax(
        &mut self,
        state: &BoardState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return Evaluator::evaluate(&state.board, self.perspective);
        }

        let moves = MoveGenerator::generate_legal(state);

        if moves.is_empty() {
            if MoveGenerator::is_in_check(&state.board, state.side_to_move) {
                let mate = MATE_SCORE + depth as i32;
                return if maximizing { -mate } else { mate };
            }
            // 困毙
            return 0;
        }

        if maximizing {
            let mut best = -INFINITY;
            for mv in moves {
                let next = MoveExecutor::apply_auto_queen(state, &mv).state;
                let score = self.minimax(&next, depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in moves {
                let next = MoveExecutor::apply_auto_queen(state, &mv).state;
                let score = self.minimax(&next, depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// 给当前局面每个合法走法打分
    ///
    /// 引擎视角切换为当前走棋方。每个走法执行后以 `depth - 1` 层搜索对方的最佳应对。
    pub fn score_moves(&mut self, state: &BoardState, depth: u8) -> Vec<ScoredMove> {
        self.perspective = state.side_to_move;
        self.nodes_searched = 0;

        let scored: Vec<ScoredMove> = MoveGenerator::generate_legal(state)
            .into_iter()
            .map(|mv| {
                let next = MoveExecutor::apply_auto_queen(state, &mv).state;
                let score = self.minimax(&next, depth.saturating_sub(1), -INFINITY, INFINITY, false);
                ScoredMove { mv, score }
            })
            .collect();

        debug!(
            "Scored {} moves at depth {}: nodes={}, best={:?}",
            scored.len(),
            depth,
            self.nodes_searched,
            scored.iter().map(|s| s.score).max()
        );
        scored
    }

    /// 搜索最佳走法，无合法走法时返回 None
    pub fn best_move(&mut self, state: &BoardState, depth: u8) -> Option<ScoredMove> {
        self.score_moves(state, depth)
            .into_iter()
            .reduce(|best, candidate| if candidate.score > best.score { candidate } else { best })
    }

    /// 获取搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Fen, Notation};

    #[test]
    fn test_search_initial_position() {
        let state = BoardState::initial();
        let mut engine = AiEngine::new(Side::White);

        let scored = engine.score_moves(&state, 2);
        assert_eq!(scored.len(), 20);
        assert!(engine.nodes_searched() > 20);
    }

    #[test]
    fn test_finds_mate_in_one() {
        // 白后 h5 走到 f7 将死
        let state = Fen::parse("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4").unwrap();
        let mut engine = AiEngine::new(Side::White);

        let best = engine.best_move(&state, 2).unwrap();
        assert_eq!(Notation::to_coordinate(&best.mv, None), "h5f7");
        assert!(best.score >= MATE_SCORE);
    }

    #[test]
    fn test_finds_back_rank_mate_for_black() {
        let state = Fen::parse("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
        // 打分时视角切换为走棋方
        let mut engine = AiEngine::new(Side::White);
        let best = engine.best_move(&state, 2).unwrap();
        assert_eq!(engine.perspective(), Side::Black);
        assert_eq!(Notation::to_coordinate(&best.mv, None), "a8a1");
        assert_eq!(best.score, MATE_SCORE + 1);
    }

    #[test]
    fn test_takes_hanging_queen() {
        let state = Fen::parse("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let mut engine = AiEngine::new(Side::White);
        let best = engine.best_move(&state, 1).unwrap();
        assert_eq!(Notation::to_coordinate(&best.mv, None), "d1d5");
    }

    #[test]
    fn test_mate_and_stalemate_scores() {
        let mut engine = AiEngine::new(Side::White);

        // 黑方被将死，轮到黑方（对手）走
        let mated = Fen::parse("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(engine.minimax(&mated, 3, -INFINITY, INFINITY, false), MATE_SCORE + 3);

        // 剩余深度越大分越高，越早将死越好
        assert!(
            engine.minimax(&mated, 3, -INFINITY, INFINITY, false)
                > engine.minimax(&mated, 1, -INFINITY, INFINITY, false)
        );

        let stalemate = Fen::parse("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(engine.minimax(&stalemate, 2, -INFINITY, INFINITY, false), 0);
    }

    #[test]
    fn test_no_moves_returns_none() {
        let mated = Fen::parse("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let mut engine = AiEngine::new(Side::Black);
        assert!(engine.best_move(&mated, 2).is_none());
    }

    #[test]
    fn test_pruning_matches_full_search_score() {
        // 剪枝不改变最佳分
        let state = Fen::parse("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
        let mut engine = AiEngine::new(Side::White);
        let pruned = engine.minimax(&state, 2, -INFINITY, INFINITY, true);

        let full = MoveGenerator::generate_legal(&state)
            .into_iter()
            .map(|mv| {
                let next = MoveExecutor::apply_auto_queen(&state, &mv).state;
                MoveGenerator::generate_legal(&next)
                    .into_iter()
                    .map(|reply| {
                        let leaf = MoveExecutor::apply_auto_queen(&next, &reply).state;
                        Evaluator::evaluate(&leaf.board, Side::White)
                    })
                    .min()
                    .unwrap_or(0)
            })
            .max()
            .unwrap();
        assert_eq!(pruned, full);
    }
}
