//! 图标声明选择器：匹配规则 + 取值属性

use std::fmt;

use crate::extractor::{AttrSelector, HtmlDocument};

/// 一条图标声明查询，例如 `link[rel="icon"]` → `href`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSelector {
    pub selector: AttrSelector,
    pub target_attr: String,
}

impl IconSelector {
    pub fn new(tag: &str, attr: &str, value: &str, target_attr: &str) -> Self {
        Self {
            selector: AttrSelector::new(tag, attr, value),
            target_attr: target_attr.to_ascii_lowercase(),
        }
    }

    /// `link[rel="<rel>"]` → `href`
    pub fn link_rel(rel: &str) -> Self {
        Self::new("link", "rel", rel, "href")
    }

    /// 文档中第一个命中元素的引用值
    pub fn find<'a>(&self, doc: &'a HtmlDocument) -> Option<&'a str> {
        doc.select_first_attr(&self.selector, &self.target_attr)
    }
}

impl fmt::Display for IconSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.selector, self.target_attr)
    }
}
