//! favicon 指纹计算
//! 与 Shodan `http.favicon.hash` 字段约定一致：
//! 原始字节 → 标准 base64（带填充、不换行）→ 对 base64 文本做 MurmurHash3 x86_32（seed = 0）→ 按补码解释为 i32
//!
//! 注意 MurmurHash3 的输入是 base64 文本而非原始字节，两者结果不同且互不兼容

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use murmurhash3::murmurhash3_x86_32;
use tracing::debug;

use crate::error::{FavResult, FavhashError};

/// MurmurHash3 种子
const MMH3_SEED: u32 = 0;

/// 计算 favicon 指纹
pub fn fingerprint(bytes: &[u8]) -> FavResult<i32> {
    if bytes.is_empty() {
        return Err(FavhashError::EmptyInputError);
    }

    let encoded = STANDARD.encode(bytes);
    let digest = murmurhash3_x86_32(encoded.as_bytes(), MMH3_SEED);
    let hash = digest as i32;

    debug!("Fingerprinted {} bytes -> {}", bytes.len(), hash);
    Ok(hash)
}
