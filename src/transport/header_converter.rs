//! 响应头归一化：reqwest HeaderMap → 小写键、单值的 HashMap

use std::collections::HashMap;

use reqwest::header::HeaderMap;
use tracing::warn;

/// 单个响应最多保留的头条目数
const MAX_HEADER_ENTRIES: usize = 1000;

pub struct HeaderConverter;

impl HeaderConverter {
    /// 同名头取第一个非空且可按 ASCII 读取的值，无可用值的头直接丢弃
    pub fn flatten(header_map: &HeaderMap) -> HashMap<String, String> {
        if header_map.len() > MAX_HEADER_ENTRIES {
            warn!(
                "Response carries {} header entries, keeping the first {}",
                header_map.len(),
                MAX_HEADER_ENTRIES
            );
        }

        let mut flat = HashMap::new();
        for (name, value) in header_map.iter().take(MAX_HEADER_ENTRIES) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            // HeaderName 已是小写
            flat.entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
        flat
    }
}
