//! 难度档位与走法选择策略
//!
//! 每个档位决定搜索深度、失误概率以及交给外部引擎的强度参数。
//! 选择时先给每个合法走法打分，再按失误概率决定从较差的一半中随机挑，
//! 还是在最佳分附近的走法中随机挑。

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::search::ScoredMove;

/// 与最佳分相差不超过该值（厘兵）的走法视为同样好
pub const TOLERANCE_CP: i32 = 10;

/// AI 难度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 入门：depth=1，一半概率失误
    Beginner,
    /// 简单：depth=2，30% 概率失误
    Easy,
    /// 中等：depth=3，10% 概率失误
    #[default]
    Medium,
    /// 困难：depth=4，不失误
    Hard,
}

/// 档位参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    /// 内部搜索深度（半回合）
    pub depth: u8,
    /// 从较差一半走法中选择的概率
    pub blunder_rate: f64,
    /// 外部引擎强度
    pub oracle_skill: u8,
    /// 外部引擎搜索深度
    pub oracle_depth: u8,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    pub fn params(&self) -> TierParams {
        match self {
            Difficulty::Beginner => TierParams {
                depth: 1,
                blunder_rate: 0.5,
                oracle_skill: 0,
                oracle_depth: 1,
            },
            Difficulty::Easy => TierParams {
                depth: 2,
                blunder_rate: 0.3,
                oracle_skill: 3,
                oracle_depth: 3,
            },
            Difficulty::Medium => TierParams {
                depth: 3,
                blunder_rate: 0.1,
                oracle_skill: 8,
                oracle_depth: 8,
            },
            Difficulty::Hard => TierParams {
                depth: 4,
                blunder_rate: 0.0,
                oracle_skill: 15,
                oracle_depth: 12,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// 难度策略
pub struct DifficultyPolicy;

impl DifficultyPolicy {
    /// 按失误概率从打分后的走法中选一个，列表为空时返回 None
    pub fn select<R: Rng + ?Sized>(
        scored: &[ScoredMove],
        blunder_rate: f64,
        rng: &mut R,
    ) -> Option<ScoredMove> {
        if scored.is_empty() {
            return None;
        }

        let blunder = blunder_rate > 0.0 && rng.gen_bool(blunder_rate.min(1.0));
        let pool = if blunder {
            Self::lower_half(scored)
        } else {
            Self::near_best(scored)
        };

        let choice = pool.choose(rng).copied();
        if let Some(chosen) = choice {
            debug!(
                "Policy picked {} (score {}, blunder={}, pool={})",
                chosen.mv,
                chosen.score,
                blunder,
                pool.len()
            );
        }
        choice
    }

    /// 分数最低的 max(1, n/2) 个走法
    pub fn lower_half(scored: &[ScoredMove]) -> Vec<ScoredMove> {
        let mut sorted = scored.to_vec();
        sorted.sort_by_key(|s| s.score);
        sorted.truncate((scored.len() / 2).max(1));
        sorted
    }

    /// 与最佳分相差不超过 TOLERANCE_CP 的走法
    pub fn near_best(scored: &[ScoredMove]) -> Vec<ScoredMove> {
        let Some(best) = scored.iter().map(|s| s.score).max() else {
            return Vec::new();
        };
        scored
            .iter()
            .filter(|s| s.score >= best.saturating_sub(TOLERANCE_CP))
            .copied()
            .collect()
    }
}
