//! 目标地址规范化与引用解析

use url::Url;

use crate::error::{FavResult, FavhashError};

/// 缺少协议时补全的默认协议
const DEFAULT_SCHEME: &str = "https://";

/// 规范化目标输入为绝对 URL
/// 规则：
/// 1. 输入不含 `://` 时补全 `https://`
/// 2. 仅接受 http/https 协议
/// 3. 必须包含主机名
pub fn normalize_target(input: &str) -> FavResult<Url> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FavhashError::InvalidTarget("empty target".to_string()));
    }

    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, input)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| FavhashError::InvalidTarget(format!("{}: {}", input, e)))?;
    ensure_web_url(&url).map_err(|reason| FavhashError::InvalidTarget(format!("{}: {}", input, reason)))?;
    Ok(url)
}

/// 将候选引用（可能为相对路径）解析为绝对 URL
/// 空引用、非法引用、非 http/https 结果均视为解析失败
pub fn resolve_reference(base: &Url, reference: &str) -> FavResult<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(FavhashError::ResolutionError("empty reference".to_string()));
    }

    let resolved = base
        .join(reference)
        .map_err(|e| FavhashError::ResolutionError(format!("{}: {}", reference, e)))?;
    ensure_web_url(&resolved)
        .map_err(|reason| FavhashError::ResolutionError(format!("{}: {}", reference, reason)))?;
    Ok(resolved)
}

/// 以目标的协议与主机（含端口）拼接常见路径，丢弃原路径、查询串与片段
pub fn origin_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    url
}

fn ensure_web_url(url: &Url) -> Result<(), &'static str> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err("unsupported scheme");
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host");
    }
    Ok(())
}
