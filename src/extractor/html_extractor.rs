//! HTML标签提取器
//! 负责把页面字节流切成「标签 + 属性」序列，供属性选择器按文档顺序查询

use std::borrow::Cow;
use std::cell::RefCell;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts
};
use markup5ever::interface::Attribute;
use tendril::StrTendril;
use tracing::debug;

use super::selector::AttrSelector;
use crate::error::{FavResult, FavhashError};

/// 二进制探测窗口：该范围内出现 NUL 字节即判定为非文本
const BINARY_SNIFF_LEN: usize = 1024;

/// 开始标签快照（标签名与属性名均为小写）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

impl HtmlElement {
    /// 获取属性值（同名属性取第一个）
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Default)]
struct HtmlExtractor {
    elements: RefCell<Vec<HtmlElement>>,
}

impl TokenSink for HtmlExtractor {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(Tag {
            kind: TagKind::StartTag,
            name,
            attrs,
            ..
        }) = token
        {
            self.push_element(name.as_ref(), &attrs);
        }
        TokenSinkResult::Continue
    }
}

impl HtmlExtractor {
    fn push_element(&self, name: &str, attrs: &[Attribute]) {
        if attrs.is_empty() {
            return;
        }
        let attrs = attrs
            .iter()
            .map(|attr| (attr.name.local.as_ref().to_string(), attr.value.to_string()))
            .collect();
        self.elements.borrow_mut().push(HtmlElement {
            name: name.to_string(),
            attrs,
        });
    }
}

/// 解析后的页面：带属性的开始标签，保持文档顺序
#[derive(Debug, Default, Clone)]
pub struct HtmlDocument {
    elements: Vec<HtmlElement>,
}

impl HtmlDocument {
    /// 解析页面字节流
    /// 1. 探测窗口内含 NUL 字节：不是 HTML，返回 ParseError
    ///    UTF-16 编码的页面同样含 NUL 字节，也会落入此分支，定位随后改走常见路径探测
    /// 2. 超过 max_len 的部分截断（图标声明位于 head，截断不影响定位）
    /// 3. 非 UTF-8 字节按替换字符处理，分词器本身容错
    pub fn parse(body: &[u8], max_len: usize) -> FavResult<Self> {
        let sniff = &body[..body.len().min(BINARY_SNIFF_LEN)];
        if sniff.contains(&0) {
            return Err(FavhashError::ParseError(
                "response body is binary, not HTML".to_string(),
            ));
        }

        let body = if body.len() > max_len {
            debug!("Page body truncated from {} to {} bytes", body.len(), max_len);
            &body[..max_len]
        } else {
            body
        };
        let html: Cow<str> = String::from_utf8_lossy(body);

        let tokenizer = Tokenizer::new(HtmlExtractor::default(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html.as_ref()));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        let elements = tokenizer.sink.elements.into_inner();
        debug!("HTML parsed, {} attributed elements", elements.len());
        Ok(Self { elements })
    }

    /// 文档顺序中第一个命中选择器的元素
    pub fn select_first(&self, selector: &AttrSelector) -> Option<&HtmlElement> {
        self.elements.iter().find(|el| selector.matches(el))
    }

    /// 第一个命中元素的指定属性；命中元素缺少该属性时返回 None
    pub fn select_first_attr(&self, selector: &AttrSelector, attr: &str) -> Option<&str> {
        self.select_first(selector).and_then(|el| el.attr(attr))
    }
}
