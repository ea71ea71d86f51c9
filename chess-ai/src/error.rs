//! 外部引擎错误
//!
//! 这些错误都不是致命的，调用方一律回退到内部搜索。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("oracle timed out after {0} ms")]
    Timeout(u64),

    #[error("oracle not ready")]
    NotReady,

    #[error("malformed oracle response: {0}")]
    Malformed(String),
}
