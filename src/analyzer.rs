//! 分析流程编排
//! 目标规范化 → 定位 favicon → 下载 → 计算指纹 →（可选）Shodan 检索

use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::config::GlobalConfig;
use crate::error::{FavResult, FavhashError};
use crate::fingerprint::fingerprint;
use crate::locator::FaviconLocator;
use crate::search::{favicon_query, ApiInfo, SearchResponse, ShodanClient};
use crate::target::normalize_target;
use crate::transport::{Fetcher, ProbeMethod, ReqwestFetcher};

/// 分析结果
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub target: String,
    pub favicon_url: String,
    pub hash: i32,
    pub shodan_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_info: Option<ApiInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchResponse>,
    /// 受限计划且检索结果为空：结果可能被计划限制截断
    pub limited_plan_hint: bool,
}

/// favicon 分析器
pub struct FaviconAnalyzer<F> {
    locator: FaviconLocator<F>,
}

impl FaviconAnalyzer<ReqwestFetcher> {
    /// 使用 reqwest 抓取器创建分析器
    pub fn from_config(config: &GlobalConfig) -> FavResult<Self> {
        let fetcher = ReqwestFetcher::new(config)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: Fetcher> FaviconAnalyzer<F> {
    pub fn with_fetcher(fetcher: F, config: &GlobalConfig) -> Self {
        Self {
            locator: FaviconLocator::from_global(fetcher, config),
        }
    }

    /// 下载 favicon 字节
    pub async fn download(&self, url: &Url) -> FavResult<Vec<u8>> {
        let response = self.locator.fetcher().fetch(url, ProbeMethod::Get).await?;
        if !response.is_success() {
            return Err(FavhashError::FetchError(format!(
                "favicon {} returned status {}",
                url, response.status
            )));
        }
        Ok(response.body)
    }

    /// 只计算指纹，不访问 Shodan
    pub async fn hash_target(&self, target: &str) -> FavResult<AnalysisReport> {
        let target = normalize_target(target)?;
        info!("Target URL: {}", target);

        let located = self.locator.locate_favicon(&target).await?;
        let favicon_url = located.url.clone();
        // GET 校验已取回图标字节；HEAD 校验时才需要再次下载
        let bytes = match located.body() {
            Some(body) => body.to_vec(),
            None => self.download(&favicon_url).await?,
        };
        let hash = fingerprint(&bytes)?;
        info!("Favicon MMH3 hash: {}", hash);

        Ok(AnalysisReport {
            target: target.to_string(),
            favicon_url: favicon_url.to_string(),
            hash,
            shodan_query: favicon_query(hash),
            api_info: None,
            search: None,
            limited_plan_hint: false,
        })
    }

    /// 完整流程：先确认 API Key 可用，再计算指纹并检索
    pub async fn analyze(&self, target: &str, shodan: Option<&ShodanClient>) -> FavResult<AnalysisReport> {
        let Some(shodan) = shodan else {
            return self.hash_target(target).await;
        };

        let api_info = shodan.api_info().await?;
        if api_info.is_limited() {
            warn!("Using a {} API key, results might be limited", api_info.plan);
        }

        let mut report = self.hash_target(target).await?;
        let search = shodan.search(report.hash).await?;

        report.limited_plan_hint = search.total == 0 && api_info.is_limited();
        report.api_info = Some(api_info);
        report.search = Some(search);
        Ok(report)
    }
}
