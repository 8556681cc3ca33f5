//! 检索模块：Shodan 同源资产检索
pub mod model;
pub mod shodan;

// 导出核心接口
pub use self::model::{ApiInfo, HostMatch, Location, SearchResponse};
pub use self::shodan::{favicon_query, ShodanClient, FAVICON_HASH_FIELD};
