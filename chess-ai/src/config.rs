//! AI 配置

use std::path::Path;

use anyhow::{Context, Result};
use chess_core::PieceType;
use serde::{Deserialize, Serialize};

use crate::difficulty::{Difficulty, TierParams};

/// AI 后端类型
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiBackend {
    /// 内部搜索（Alpha-Beta）
    #[default]
    Search,
    /// 外部引擎，失败时回退到内部搜索
    Oracle,
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 档位参数，默认取自 `difficulty`，可单独覆盖
    pub params: TierParams,
    pub backend: AiBackend,
    /// 外部引擎查询超时（毫秒）
    pub oracle_timeout_ms: u64,
    /// 电脑一方升变时选择的棋子
    pub promotion_piece: PieceType,
    /// 随机种子，None 时使用系统熵
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            params: difficulty.params(),
            backend: AiBackend::Search,
            oracle_timeout_ms: 2000,
            promotion_piece: PieceType::Queen,
            seed: None,
        }
    }

    pub fn with_backend(mut self, backend: AiBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read AI config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse AI config {}", path.display()))
    }

    /// 保存为 JSON 文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self).context("Failed to serialize AI config")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write AI config {}", path.display()))
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}
