//! 候选校验：状态码 + Content-Type 白名单 + 内容长度
//! 传输错误在此吸收为 Verdict::Unreachable，不向上传播

use std::fmt;

use tracing::debug;
use url::Url;

use crate::transport::{FetchResponse, Fetcher, ProbeMethod};

/// 单次校验的判定结果（附带失败原因，便于日志）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Unreachable(String),
    BadStatus(u16),
    MissingContentType,
    BadContentType(String),
    EmptyContent,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Unreachable(e) => write!(f, "unreachable ({})", e),
            Self::BadStatus(status) => write!(f, "status {}", status),
            Self::MissingContentType => write!(f, "no content-type"),
            Self::BadContentType(ct) => write!(f, "content-type {}", ct),
            Self::EmptyContent => write!(f, "empty content"),
        }
    }
}

/// favicon 校验器
#[derive(Debug, Clone, Copy)]
pub struct FaviconValidator<'a> {
    content_types: &'a [String],
    method: ProbeMethod,
}

impl<'a> FaviconValidator<'a> {
    pub fn new(content_types: &'a [String], method: ProbeMethod) -> Self {
        Self {
            content_types,
            method,
        }
    }

    /// 对响应做纯判定
    /// 1. 状态码必须为 2xx
    /// 2. Content-Type 必须以白名单中某一项开头（忽略大小写）
    /// 3. 可知的内容长度必须大于 0；长度未知视为通过
    pub fn check(&self, response: &FetchResponse) -> Verdict {
        if !response.is_success() {
            return Verdict::BadStatus(response.status);
        }

        let Some(content_type) = response.content_type() else {
            return Verdict::MissingContentType;
        };
        let allowed = self
            .content_types
            .iter()
            .any(|prefix| content_type.starts_with(&prefix.to_ascii_lowercase()));
        if !allowed {
            return Verdict::BadContentType(content_type);
        }

        match response.content_length() {
            Some(0) => Verdict::EmptyContent,
            _ => Verdict::Valid,
        }
    }

    /// 发起探测并判定；通过校验时交回响应，供后续直接取用响应体
    pub async fn probe<F: Fetcher>(&self, fetcher: &F, url: &Url) -> Result<FetchResponse, Verdict> {
        let response = fetcher
            .fetch(url, self.method)
            .await
            .map_err(|e| Verdict::Unreachable(e.to_string()));
        let verdict = match &response {
            Ok(response) => self.check(response),
            Err(verdict) => verdict.clone(),
        };
        debug!("Validate {} -> {}", url, verdict);

        match verdict {
            Verdict::Valid => response,
            rejected => Err(rejected),
        }
    }
}
