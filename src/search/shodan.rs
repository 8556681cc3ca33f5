//! Shodan 客户端
//! 仅覆盖两个接口：API Key 状态查询 + 按 favicon 指纹检索主机

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::model::{ApiInfo, SearchResponse};
use crate::config::GlobalConfig;
use crate::error::{FavResult, FavhashError};

/// Shodan 中 favicon 指纹字段名
pub const FAVICON_HASH_FIELD: &str = "http.favicon.hash";

/// 生成固定谓词查询：`http.favicon.hash:<hash>`
pub fn favicon_query(hash: i32) -> String {
    format!("{}:{}", FAVICON_HASH_FIELD, hash)
}

/// Shodan REST 客户端
#[derive(Debug, Clone)]
pub struct ShodanClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl ShodanClient {
    pub fn new(api_key: impl Into<String>, config: &GlobalConfig) -> FavResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FavhashError::ApiKeyError("empty API key".to_string()));
        }

        let mut base_url = Url::parse(&config.shodan_base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> FavResult<Url> {
        let mut url = self.base_url.join(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// 查询 API Key 状态（计划类型、剩余额度）
    /// 非 200 状态码视为 Key 无效
    pub async fn api_info(&self) -> FavResult<ApiInfo> {
        let url = self.endpoint("api-info", &[])?;
        let response = self.client.get(url).send().await?;

        if response.status().as_u16() != 200 {
            return Err(FavhashError::ApiKeyError(format!(
                "api-info returned status {}",
                response.status()
            )));
        }

        let info: ApiInfo = decode(response).await?;
        info!(
            "Shodan plan: {}, query credits: {}, scan credits: {}",
            info.plan, info.query_credits, info.scan_credits
        );
        Ok(info)
    }

    /// 按 favicon 指纹检索主机
    pub async fn search(&self, hash: i32) -> FavResult<SearchResponse> {
        let query = favicon_query(hash);
        let url = self.endpoint("shodan/host/search", &[("query", &query)])?;
        debug!("Shodan search: {}", query);

        let response = self.client.get(url).send().await?;
        if response.status().as_u16() != 200 {
            return Err(FavhashError::SearchError(format!(
                "Shodan API returned status code {}",
                response.status().as_u16()
            )));
        }

        let result: SearchResponse = decode(response).await?;
        info!("Shodan search returned {} matches (total {})", result.matches.len(), result.total);
        Ok(result)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> FavResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::test_support::serve_once;

    fn client_for(base: &Url) -> ShodanClient {
        let config = ConfigManager::custom()
            .shodan_base_url(base.as_str())
            .build();
        ShodanClient::new("TESTKEY", &config).unwrap()
    }

    #[test]
    fn test_favicon_query() {
        assert_eq!(favicon_query(-964311617), "http.favicon.hash:-964311617");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            ShodanClient::new(" ", &GlobalConfig::default()),
            Err(FavhashError::ApiKeyError(_))
        ));
    }

    #[test]
    fn test_endpoint_under_base_path() {
        let config = ConfigManager::custom()
            .shodan_base_url("http://127.0.0.1:9000/proxy")
            .build();
        let client = ShodanClient::new("K", &config).unwrap();
        let url = client.endpoint("api-info", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/proxy/api-info?key=K");
    }

    #[tokio::test]
    async fn test_api_info() {
        let body = br#"{"query_credits": 100, "scan_credits": 0, "plan": "dev", "https": false, "unlocked": false}"#;
        let (base, request) = serve_once("200 OK", &[("Content-Type", "application/json")], body).await;

        let info = client_for(&base).api_info().await.unwrap();
        assert_eq!(info.plan, "dev");
        assert_eq!(info.query_credits, 100);
        assert!(info.is_limited());
        assert!(request.await.unwrap().starts_with("GET /api-info?key=TESTKEY HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_api_info_rejected_key() {
        let (base, _request) = serve_once("401 Unauthorized", &[], b"{\"error\": \"invalid\"}").await;
        assert!(matches!(
            client_for(&base).api_info().await,
            Err(FavhashError::ApiKeyError(_))
        ));
    }

    #[tokio::test]
    async fn test_search() {
        let body = br#"{"matches": [{"ip_str": "203.0.113.7", "port": 443}], "total": 1}"#;
        let (base, request) = serve_once("200 OK", &[("Content-Type", "application/json")], body).await;

        let result = client_for(&base).search(-964311617).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.matches[0].ip, "203.0.113.7");

        let raw = request.await.unwrap();
        let request_line = raw.lines().next().unwrap();
        assert!(request_line.starts_with("GET /shodan/host/search?key=TESTKEY&query=http.favicon.hash%3A-964311617 "));
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let (base, _request) = serve_once("503 Service Unavailable", &[], b"").await;
        assert!(matches!(
            client_for(&base).search(1).await,
            Err(FavhashError::SearchError(_))
        ));
    }
}
