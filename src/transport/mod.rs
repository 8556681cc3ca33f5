//! 传输模块：定位器与分析器通过 `Fetcher` 发起请求，不直接依赖具体 HTTP 客户端
pub mod header_converter;
pub mod http_client;

use std::collections::HashMap;
use std::future::Future;

use url::Url;

use crate::error::FavResult;

// 导出核心接口
pub use self::header_converter::HeaderConverter;
pub use self::http_client::ReqwestFetcher;

/// 探测方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMethod {
    #[default]
    Get,
    Head,
}

/// 一次请求的结果（Header 名统一小写，多值取第一个非空值）
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub method: ProbeMethod,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// 小写后的 Content-Type
    pub fn content_type(&self) -> Option<String> {
        self.header("content-type")
            .map(|v| v.trim().to_ascii_lowercase())
    }

    /// 传输层可知的内容长度
    /// 优先取 Content-Length；GET 请求缺少该头时以实际响应体长度为准；HEAD 缺少则未知
    pub fn content_length(&self) -> Option<u64> {
        match self.header("content-length").and_then(|v| v.trim().parse().ok()) {
            Some(len) => Some(len),
            None if self.method == ProbeMethod::Get => Some(self.body.len() as u64),
            None => None,
        }
    }
}

/// 抓取能力抽象
/// 传输层错误（连接失败/超时/响应不可读）以 Err 返回，非 2xx 状态码仍为 Ok
pub trait Fetcher {
    fn fetch(
        &self,
        url: &Url,
        method: ProbeMethod,
    ) -> impl Future<Output = FavResult<FetchResponse>> + Send;
}

impl<T: Fetcher> Fetcher for &T {
    fn fetch(
        &self,
        url: &Url,
        method: ProbeMethod,
    ) -> impl Future<Output = FavResult<FetchResponse>> + Send {
        (**self).fetch(url, method)
    }
}
