//! 定位策略
//! 每个策略返回 Option<LocatedFavicon>：Some 即已通过校验的结果，None 交给下一个策略
//! 策略内部的单个候选问题（无匹配/解析失败/校验失败）只记录日志并跳过

use std::fmt;

use tracing::debug;
use url::Url;

use super::manifest::{default_manifest_url, WebAppManifest};
use super::selector::IconSelector;
use super::{FaviconLocator, LocatedFavicon};
use crate::extractor::HtmlDocument;
use crate::target::{origin_path, resolve_reference};
use crate::transport::{Fetcher, ProbeMethod};

/// 策略种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// 页面 link/meta 声明的图标
    HtmlDeclared,
    /// 常见路径探测
    CommonPaths,
    /// Web App Manifest 中的 icons
    WebManifest,
}

impl StrategyKind {
    /// 是否需要目标页面的解析结果
    pub fn needs_page(&self) -> bool {
        matches!(self, Self::HtmlDeclared | Self::WebManifest)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HtmlDeclared => "html-declared",
            Self::CommonPaths => "common-paths",
            Self::WebManifest => "web-manifest",
        };
        f.write_str(name)
    }
}

/// 定位上下文：目标地址 + 页面解析结果（拉取/解析失败时为 None）
#[derive(Debug, Clone, Copy)]
pub struct LocateContext<'a> {
    pub target: &'a Url,
    pub page: Option<&'a HtmlDocument>,
}

impl<F: Fetcher> FaviconLocator<F> {
    pub(crate) async fn run_strategy(&self, kind: StrategyKind, ctx: &LocateContext<'_>) -> Option<LocatedFavicon> {
        match kind {
            StrategyKind::HtmlDeclared => self.html_declared(ctx).await,
            StrategyKind::CommonPaths => self.common_paths(ctx.target).await,
            StrategyKind::WebManifest => self.web_manifest(ctx).await,
        }
    }

    /// 按选择器优先级逐个尝试：每个选择器只取文档中第一个命中元素
    pub async fn html_declared(&self, ctx: &LocateContext<'_>) -> Option<LocatedFavicon> {
        let doc = ctx.page?;
        let validator = self.validator();

        for selector in &self.config.selectors {
            let Some(reference) = selector.find(doc) else {
                continue;
            };
            debug!("Found {}: {}", selector, reference);

            let url = match resolve_reference(ctx.target, reference) {
                Ok(url) => url,
                Err(e) => {
                    debug!("Skip {}: {}", selector, e);
                    continue;
                }
            };

            if let Ok(response) = validator.probe(&self.fetcher, &url).await {
                return Some(LocatedFavicon { url, response });
            }
        }
        None
    }

    /// 以目标协议与主机拼接常见路径，第一个通过校验者胜出
    pub async fn common_paths(&self, target: &Url) -> Option<LocatedFavicon> {
        let validator = self.validator();

        for path in &self.config.common_paths {
            let url = origin_path(target, path);
            debug!("Trying: {}", url);
            if let Ok(response) = validator.probe(&self.fetcher, &url).await {
                return Some(LocatedFavicon { url, response });
            }
        }
        None
    }

    /// manifest 位置：页面声明的 link[rel="manifest"] 优先，否则为站点根目录 /manifest.json
    /// manifest 拉取或反序列化失败均视为未命中
    pub async fn web_manifest(&self, ctx: &LocateContext<'_>) -> Option<LocatedFavicon> {
        let manifest_url = ctx
            .page
            .and_then(|doc| IconSelector::link_rel("manifest").find(doc))
            .and_then(|href| resolve_reference(ctx.target, href).ok())
            .unwrap_or_else(|| default_manifest_url(ctx.target));
        debug!("Reading manifest: {}", manifest_url);

        let response = match self.fetcher.fetch(&manifest_url, ProbeMethod::Get).await {
            Ok(resp) if resp.is_success() => resp,
            Ok(resp) => {
                debug!("Manifest {} returned status {}", manifest_url, resp.status);
                return None;
            }
            Err(e) => {
                debug!("Manifest {} unreachable: {}", manifest_url, e);
                return None;
            }
        };

        let manifest = match WebAppManifest::from_bytes(&response.body) {
            Ok(manifest) => manifest,
            Err(e) => {
                debug!("Manifest {} is not valid JSON: {}", manifest_url, e);
                return None;
            }
        };

        let validator = self.validator();
        for src in manifest.icon_sources() {
            let Ok(url) = resolve_reference(&manifest_url, src) else {
                debug!("Skip manifest icon: {}", src);
                continue;
            };
            if let Ok(response) = validator.probe(&self.fetcher, &url).await {
                return Some(LocatedFavicon { url, response });
            }
        }
        None
    }
}
