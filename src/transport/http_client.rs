//! reqwest 实现的抓取器
//! 超时、User-Agent 取自全局配置；重定向沿用 reqwest 默认策略

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{FetchResponse, Fetcher, HeaderConverter, ProbeMethod};
use crate::config::GlobalConfig;
use crate::error::FavResult;

/// 基于 reqwest 异步客户端的抓取器
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(config: &GlobalConfig) -> FavResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url, method: ProbeMethod) -> FavResult<FetchResponse> {
        let request = match method {
            ProbeMethod::Get => self.client.get(url.clone()),
            ProbeMethod::Head => self.client.head(url.clone()),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = HeaderConverter::flatten(response.headers());
        let body = match method {
            ProbeMethod::Get => response.bytes().await?.to_vec(),
            ProbeMethod::Head => Vec::new(),
        };

        debug!("{:?} {} -> {} ({} bytes)", method, url, status, body.len());
        Ok(FetchResponse {
            status,
            headers,
            body,
            method,
        })
    }
}
