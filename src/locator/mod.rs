//! 定位模块：为目标站点找到一个通过校验的 favicon 地址
//! 流程：
//! 1. 拉取并解析目标页面（失败只影响依赖页面的策略）
//! 2. 按配置顺序执行策略，第一个返回结果的策略胜出
//! 3. 全部策略落空时返回 NotFoundError
pub mod manifest;
pub mod selector;
pub mod strategy;
pub mod validator;

use tracing::{debug, info, warn};
use url::Url;

use crate::config::{GlobalConfig, LocatorConfig};
use crate::error::{FavResult, FavhashError};
use crate::extractor::HtmlDocument;
use crate::target::normalize_target;
use crate::transport::{FetchResponse, Fetcher, ProbeMethod};

// 导出核心接口
pub use self::selector::IconSelector;
pub use self::strategy::{LocateContext, StrategyKind};
pub use self::validator::{FaviconValidator, Verdict};

/// 定位结果：通过校验的地址及校验时拿到的响应
#[derive(Debug, Clone)]
pub struct LocatedFavicon {
    pub url: Url,
    pub response: FetchResponse,
}

impl LocatedFavicon {
    /// GET 校验时已取回的图标字节；HEAD 校验没有响应体
    pub fn body(&self) -> Option<&[u8]> {
        match self.response.method {
            ProbeMethod::Get => Some(&self.response.body),
            ProbeMethod::Head => None,
        }
    }
}

/// favicon 定位器
#[derive(Debug, Clone)]
pub struct FaviconLocator<F> {
    fetcher: F,
    config: LocatorConfig,
    max_page_size: usize,
}

impl<F: Fetcher> FaviconLocator<F> {
    pub fn new(fetcher: F, config: LocatorConfig) -> Self {
        Self {
            fetcher,
            config,
            max_page_size: GlobalConfig::default().max_page_size,
        }
    }

    pub fn from_global(fetcher: F, config: &GlobalConfig) -> Self {
        Self {
            fetcher,
            config: config.locator.clone(),
            max_page_size: config.max_page_size,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub(crate) fn validator(&self) -> FaviconValidator<'_> {
        FaviconValidator::new(&self.config.content_types, self.config.probe_method)
    }

    /// 拉取并解析目标页面
    /// 抓取器错误原样返回；非 2xx 状态码：FetchError；响应体不是 HTML：ParseError
    pub async fn load_page(&self, target: &Url) -> FavResult<HtmlDocument> {
        let response = self.fetcher.fetch(target, ProbeMethod::Get).await?;

        if !response.is_success() {
            return Err(FavhashError::FetchError(format!(
                "{} returned status {}",
                target, response.status
            )));
        }

        HtmlDocument::parse(&response.body, self.max_page_size)
    }

    /// 定位 favicon，返回已通过校验的绝对地址
    pub async fn locate(&self, target: &Url) -> FavResult<Url> {
        self.locate_favicon(target).await.map(|found| found.url)
    }

    /// 定位 favicon，同时交回校验响应
    /// 页面阶段只有可回退的错误（拉取/解析失败）会被吸收，其余错误直接返回
    pub async fn locate_favicon(&self, target: &Url) -> FavResult<LocatedFavicon> {
        info!("Locating favicon for {}", target);

        let mut page_error = None;
        let needs_page = self.config.strategies.iter().any(StrategyKind::needs_page);
        let page = if needs_page {
            match self.load_page(target).await {
                Ok(doc) => Some(doc),
                Err(e) if e.is_fallback_trigger() => {
                    warn!("HTML discovery unavailable for {}: {}", target, e);
                    page_error = Some(e);
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let ctx = LocateContext {
            target,
            page: page.as_ref(),
        };
        for kind in &self.config.strategies {
            debug!("Running strategy {}", kind);
            if let Some(found) = self.run_strategy(*kind, &ctx).await {
                info!("Favicon found via {}: {}", kind, found.url);
                return Ok(found);
            }
            debug!("Strategy {} found nothing", kind);
        }

        Err(FavhashError::NotFoundError(match page_error {
            Some(e) => format!("{} (target page unavailable: {})", target, e),
            None => target.to_string(),
        }))
    }

    /// 规范化目标字符串后定位
    pub async fn locate_target(&self, target: &str) -> FavResult<Url> {
        let url = normalize_target(target)?;
        self.locate(&url).await
    }
}
