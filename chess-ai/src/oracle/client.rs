//! HTTP 外部引擎客户端
//!
//! 以 `GET {base_url}?fen=..&depth=..&skill=..` 查询，应答为
//! `{ "success": bool, "bestmove": "bestmove e2e4 ponder e7e5" }`。

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(feature = "http-oracle")]
use anyhow::Context;
#[cfg(feature = "http-oracle")]
use tracing::{debug, info};

use super::{MoveOracle, OracleRequest, OracleResponse};
#[cfg(not(feature = "http-oracle"))]
use crate::error::OracleError;

/// HTTP 客户端配置
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpOracleConfig {
    /// 服务地址
    pub base_url: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for HttpOracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://stockfish.online/api/s/v2.php".to_string(),
            timeout_secs: 10,
        }
    }
}

/// 服务应答体
#[cfg(feature = "http-oracle")]
#[derive(Deserialize)]
struct BestMoveResponse {
    success: bool,
    #[serde(default)]
    bestmove: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

/// HTTP 外部引擎
#[cfg(feature = "http-oracle")]
pub struct HttpOracle {
    config: HttpOracleConfig,
    client: reqwest::Client,
}

#[cfg(feature = "http-oracle")]
impl HttpOracle {
    pub fn new(config: HttpOracleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpOracleConfig::default())
    }

    pub fn config(&self) -> &HttpOracleConfig {
        &self.config
    }
}

#[cfg(feature = "http-oracle")]
#[async_trait]
impl MoveOracle for HttpOracle {
    async fn best_move(&self, request: &OracleRequest) -> Result<OracleResponse> {
        debug!(
            "Querying oracle: fen={}, depth={}, skill={}",
            request.fen, request.depth, request.skill
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("fen", request.fen.clone()),
                ("depth", request.depth.to_string()),
                ("skill", request.skill.to_string()),
            ])
            .send()
            .await
            .context(format!("Failed to reach oracle ({})", self.config.base_url))?
            .error_for_status()
            .context("Oracle returned error status")?;

        let body: BestMoveResponse = response
            .json()
            .await
            .context("Failed to parse oracle response")?;

        match (body.success, body.bestmove) {
            (true, Some(text)) => {
                info!("Oracle answered: {}", text);
                Ok(OracleResponse::BestMove(text))
            }
            _ => {
                debug!("Oracle not ready: {:?}", body.data);
                Ok(OracleResponse::NotReady)
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// 未启用 http-oracle feature 时的占位实现
#[cfg(not(feature = "http-oracle"))]
pub struct HttpOracle {
    config: HttpOracleConfig,
}

#[cfg(not(feature = "http-oracle"))]
impl HttpOracle {
    pub fn new(config: HttpOracleConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpOracleConfig::default())
    }

    pub fn config(&self) -> &HttpOracleConfig {
        &self.config
    }
}

#[cfg(not(feature = "http-oracle"))]
#[async_trait]
impl MoveOracle for HttpOracle {
    async fn best_move(&self, _request: &OracleRequest) -> Result<OracleResponse> {
        Err(OracleError::Unavailable(
            "http-oracle feature not enabled. Compile with --features http-oracle".to_string(),
        )
        .into())
    }

    fn name(&self) -> &str {
        "http"
    }
}
