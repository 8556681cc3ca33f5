//! 属性选择器：`tag[attr="value"]` 形式的单属性等值匹配

use std::fmt;

use super::html_extractor::HtmlElement;

/// 单属性等值选择器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSelector {
    pub tag: String,
    pub attr: String,
    pub value: String,
}

impl AttrSelector {
    pub fn new(tag: &str, attr: &str, value: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attr: attr.to_ascii_lowercase(),
            value: value.to_string(),
        }
    }

    /// 标签名、属性名精确匹配；属性值按 ASCII 忽略大小写整值比较
    pub fn matches(&self, element: &HtmlElement) -> bool {
        element.name == self.tag
            && element
                .attr(&self.attr)
                .is_some_and(|v| v.eq_ignore_ascii_case(&self.value))
    }
}

impl fmt::Display for AttrSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}=\"{}\"]", self.tag, self.attr, self.value)
    }
}
