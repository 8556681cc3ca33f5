//! 提取模块：HTML 分词与属性选择
pub mod html_extractor;
pub mod selector;

// 导出核心接口
pub use self::html_extractor::{HtmlDocument, HtmlElement};
pub use self::selector::AttrSelector;
