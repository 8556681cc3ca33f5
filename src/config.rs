//! 全局配置管理,存储所有可配置项

use once_cell::sync::Lazy;

use crate::locator::selector::IconSelector;
use crate::locator::strategy::StrategyKind;
use crate::transport::ProbeMethod;

/// Shodan 官方 API 地址
pub const SHODAN_API_BASE: &str = "https://api.shodan.io/";

/// HTML 声明图标的默认查询顺序（优先级从高到低）
static DEFAULT_SELECTORS: Lazy<Vec<IconSelector>> = Lazy::new(|| {
    vec![
        IconSelector::link_rel("shortcut icon"),
        IconSelector::link_rel("icon"),
        IconSelector::link_rel("apple-touch-icon"),
        IconSelector::link_rel("apple-touch-icon-precomposed"),
        IconSelector::link_rel("mask-icon"),
        IconSelector::link_rel("fluid-icon"),
        IconSelector::new("meta", "property", "og:image", "content"),
    ]
});

/// 常见 favicon 路径（根目录 / 静态资源目录 / CMS 特定目录）
static DEFAULT_COMMON_PATHS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "/favicon.ico",
        "/favicon.png",
        "/favicon.svg",
        "/favicon.gif",
        "/assets/favicon.ico",
        "/assets/favicon.png",
        "/assets/img/favicon.ico",
        "/assets/images/favicon.ico",
        "/static/favicon.ico",
        "/static/favicon.png",
        "/static/img/favicon.ico",
        "/static/images/favicon.ico",
        "/images/favicon.ico",
        "/images/favicon.png",
        "/img/favicon.ico",
        "/img/favicon.png",
        "/public/favicon.ico",
        "/public/favicon.png",
        "/resources/favicon.ico",
        "/resources/images/favicon.ico",
        "/wp-content/themes/favicon.ico",
        "/wp-content/uploads/favicon.ico",
        "/misc/favicon.ico",
        "/sites/default/files/favicon.ico",
        "/templates/favicon.ico",
        "/media/favicon.ico",
        "/skin/frontend/default/default/favicon.ico",
        "/apple-touch-icon.png",
        "/apple-touch-icon-precomposed.png",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
});

/// 允许的 Content-Type 前缀
static DEFAULT_CONTENT_TYPES: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "image/x-icon",
        "image/vnd.microsoft.icon",
        "image/ico",
        "image/icon",
        "image/png",
        "image/gif",
        "image/svg+xml",
        "application/octet-stream",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
});

/// 定位器配置：三份有序列表 + 探测方式 + 策略顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    pub selectors: Vec<IconSelector>,
    pub common_paths: Vec<String>,
    pub content_types: Vec<String>,
    pub probe_method: ProbeMethod,
    pub strategies: Vec<StrategyKind>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_SELECTORS.clone(),
            common_paths: DEFAULT_COMMON_PATHS.clone(),
            content_types: DEFAULT_CONTENT_TYPES.clone(),
            probe_method: ProbeMethod::Get,
            strategies: vec![StrategyKind::HtmlDeclared, StrategyKind::CommonPaths],
        }
    }
}

impl LocatorConfig {
    /// 启用 Web App Manifest 策略：排在常见路径探测之前，未配置常见路径时追加到末尾
    pub fn with_manifest(mut self) -> Self {
        if self.strategies.contains(&StrategyKind::WebManifest) {
            return self;
        }
        let at = self
            .strategies
            .iter()
            .position(|kind| *kind == StrategyKind::CommonPaths)
            .unwrap_or(self.strategies.len());
        self.strategies.insert(at, StrategyKind::WebManifest);
        self
    }

    pub fn with_probe_method(mut self, method: ProbeMethod) -> Self {
        self.probe_method = method;
        self
    }
}

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    // 请求 User-Agent
    pub user_agent: String,
    // 目标页面最大解析长度（字节），超出部分截断
    pub max_page_size: usize,
    // Shodan API 地址
    pub shodan_base_url: String,
    // 是否启用详细日志
    pub verbose: bool,
    // 定位器配置
    pub locator: LocatorConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            http_timeout: 10,
            user_agent: format!("favhash/{}", env!("CARGO_PKG_VERSION")),
            max_page_size: 2 * 1024 * 1024,
            shodan_base_url: SHODAN_API_BASE.to_string(),
            verbose: false,
            locator: LocatorConfig::default(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn max_page_size(mut self, size: usize) -> Self {
        self.config.max_page_size = size;
        self
    }

    pub fn shodan_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.shodan_base_url = url.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn locator(mut self, locator: LocatorConfig) -> Self {
        self.config.locator = locator;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists() {
        let config = LocatorConfig::default();
        assert_eq!(config.selectors.len(), 7);
        let order: Vec<String> = config.selectors.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            order,
            vec![
                r#"link[rel="shortcut icon"] -> href"#,
                r#"link[rel="icon"] -> href"#,
                r#"link[rel="apple-touch-icon"] -> href"#,
                r#"link[rel="apple-touch-icon-precomposed"] -> href"#,
                r#"link[rel="mask-icon"] -> href"#,
                r#"link[rel="fluid-icon"] -> href"#,
                r#"meta[property="og:image"] -> content"#,
            ]
        );
        assert!(config.common_paths.len() >= 12);
        assert_eq!(config.common_paths[0], "/favicon.ico");
        assert!(config.common_paths.iter().all(|p| p.starts_with('/')));
        assert_eq!(config.content_types.len(), 8);
        assert_eq!(
            config.strategies,
            vec![StrategyKind::HtmlDeclared, StrategyKind::CommonPaths]
        );
    }

    #[test]
    fn test_with_manifest_is_idempotent() {
        let config = LocatorConfig::default().with_manifest().with_manifest();
        assert_eq!(
            config.strategies,
            vec![
                StrategyKind::HtmlDeclared,
                StrategyKind::WebManifest,
                StrategyKind::CommonPaths
            ]
        );

        let html_only = LocatorConfig {
            strategies: vec![StrategyKind::HtmlDeclared],
            ..LocatorConfig::default()
        }
        .with_manifest();
        assert_eq!(
            html_only.strategies,
            vec![StrategyKind::HtmlDeclared, StrategyKind::WebManifest]
        );
    }

    #[test]
    fn test_builder() {
        let config = ConfigManager::custom()
            .http_timeout(3)
            .user_agent("probe/1.0")
            .verbose(true)
            .build();
        assert_eq!(config.http_timeout, 3);
        assert_eq!(config.user_agent, "probe/1.0");
        assert!(config.verbose);
        assert_eq!(config.shodan_base_url, SHODAN_API_BASE);
    }
}
