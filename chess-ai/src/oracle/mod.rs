//! 外部引擎接口
//!
//! 通过 FEN 向外部引擎请求最佳走法。查询失败、超时、未就绪或返回非法走法时
//! 由 [`crate::AiPlayer`] 回退到内部搜索。

mod client;
mod parser;

pub use client::{HttpOracle, HttpOracleConfig};
pub use parser::MoveParser;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 外部引擎请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    /// 当前局面 FEN
    pub fen: String,
    /// 搜索深度
    pub depth: u8,
    /// 引擎强度
    pub skill: u8,
}

/// 外部引擎应答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleResponse {
    /// 走法文本，形如 `e2e4` 或 `bestmove e2e4 ponder e7e5`
    BestMove(String),
    /// 引擎尚未准备好
    NotReady,
}

/// 外部走法来源
///
/// 传输层失败以 `Err` 返回。
#[async_trait]
pub trait MoveOracle: Send + Sync {
    async fn best_move(&self, request: &OracleRequest) -> Result<OracleResponse>;

    /// 用于日志的名称
    fn name(&self) -> &str {
        "oracle"
    }
}
