//! 全局错误类型定义

use thiserror::Error;
use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum FavhashError {
    // 定位相关错误
    #[error("Target page fetch failed: {0}")]
    FetchError(String),
    #[error("HTML parse failed: {0}")]
    ParseError(String),
    #[error("Reference resolution failed: {0}")]
    ResolutionError(String),
    #[error("No favicon found: {0}")]
    NotFoundError(String),
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    // 指纹相关错误
    #[error("Cannot fingerprint empty input")]
    EmptyInputError,

    // Shodan 相关错误
    #[error("API key error: {0}")]
    ApiKeyError(String),
    #[error("Shodan search failed: {0}")]
    SearchError(String),

    // 网络相关错误
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ReqwestError),

    // 序列化/反序列化错误
    #[error("JSON parse failed: {0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("URL parse failed: {0}")]
    UrlError(#[from] UrlParseError),
}

impl FavhashError {
    /// 页面阶段的错误（拉取失败/解析失败）只中断 HTML 发现，定位继续走常见路径探测
    pub fn is_fallback_trigger(&self) -> bool {
        matches!(
            self,
            Self::FetchError(_) | Self::ParseError(_) | Self::HttpError(_)
        )
    }
}

// 全局Result类型
pub type FavResult<T> = Result<T, FavhashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_trigger() {
        assert!(FavhashError::FetchError("refused".into()).is_fallback_trigger());
        assert!(FavhashError::ParseError("binary".into()).is_fallback_trigger());
        assert!(!FavhashError::NotFoundError("none".into()).is_fallback_trigger());
        assert!(!FavhashError::EmptyInputError.is_fallback_trigger());
    }
}
