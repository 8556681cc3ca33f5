//! favhash - favicon 定位与 Shodan 兼容 MMH3 指纹计算

// 导出全局错误类型
pub use self::error::{FavhashError, FavResult};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, GlobalConfig, LocatorConfig};

// 导出目标处理接口
pub use self::target::{normalize_target, resolve_reference};

// 导出提取模块核心接口
pub use self::extractor::{AttrSelector, HtmlDocument};

// 导出传输模块核心接口
pub use self::transport::{FetchResponse, Fetcher, ProbeMethod, ReqwestFetcher};

// 导出定位模块核心接口
pub use self::locator::{
    FaviconLocator, FaviconValidator, IconSelector, LocatedFavicon, StrategyKind, Verdict,
};

// 导出指纹计算接口
pub use self::fingerprint::fingerprint;

// 导出检索模块核心接口
pub use self::search::{favicon_query, ApiInfo, SearchResponse, ShodanClient};

// 导出分析流程接口
pub use self::analyzer::{AnalysisReport, FaviconAnalyzer};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod target;
pub mod extractor;
pub mod transport;
pub mod locator;
pub mod fingerprint;
pub mod search;
pub mod analyzer;

#[cfg(test)]
mod test_support;
