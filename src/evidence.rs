//! 页面证据快照
//! 由外部采集协作方（浏览器侧）一次性构造，单次检测期间不可变；
//! 引擎只读访问，绝不回触环境全局状态。

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use url::Url;

/// DOM 选择器匹配谓词
/// 采集方可用闭包桥接真实 DOM 查询，测试/离线场景可用已命中选择器集合
pub trait DomMatcher: Send + Sync {
    fn matches(&self, selector: &str) -> bool;
}

impl DomMatcher for FxHashSet<String> {
    fn matches(&self, selector: &str) -> bool {
        self.contains(selector)
    }
}

impl<F> DomMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, selector: &str) -> bool {
        self(selector)
    }
}

/// 单个 meta 标签描述
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaTag {
    pub name: Option<String>,
    pub property: Option<String>,
    pub content: String,
}

/// 单次检测运行的只读证据快照
pub struct PageEvidence {
    /// 页面存在的全局标识符名称集合
    pub globals: FxHashSet<String>,
    /// DOM 选择器匹配谓词
    dom: Box<dyn DomMatcher>,
    /// script 源 URL 列表（有序）
    pub script_urls: Vec<String>,
    /// meta 标签列表
    pub meta_tags: Vec<MetaTag>,
    /// 原始 Cookie 串
    pub cookie_string: String,
    /// 样式表链接 URL 列表
    pub stylesheet_urls: Vec<String>,
    /// 内联样式文本块列表
    pub inline_styles: Vec<String>,
    /// 响应头（名称统一小写；尽力采集，可为空）
    pub headers: FxHashMap<String, String>,
    /// 原始页面标记（可选）
    pub markup: Option<String>,
    /// 页面 URL（可选，供主机名/协议类钩子使用）
    pub page_url: Option<Url>,
    /// 采样元素自有属性键（可选，供框架内部键扫描钩子使用）
    pub dom_own_keys: Vec<String>,
    /// 采集方捕获的版本提示表（如 "React" → "18.2.0"）
    pub version_hints: FxHashMap<String, String>,
}

impl PageEvidence {
    pub fn builder() -> PageEvidenceBuilder {
        PageEvidenceBuilder::default()
    }

    /// 选择器匹配查询
    pub fn dom_matches(&self, selector: &str) -> bool {
        self.dom.matches(selector)
    }
}

impl fmt::Debug for PageEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEvidence")
            .field("globals", &self.globals)
            .field("script_urls", &self.script_urls)
            .field("meta_tags", &self.meta_tags)
            .field("cookie_string", &self.cookie_string)
            .field("stylesheet_urls", &self.stylesheet_urls)
            .field("inline_styles", &self.inline_styles.len())
            .field("headers", &self.headers)
            .field("markup_len", &self.markup.as_ref().map(|m| m.len()))
            .field("page_url", &self.page_url)
            .finish_non_exhaustive()
    }
}

/// 证据快照构建器
#[derive(Default)]
pub struct PageEvidenceBuilder {
    globals: FxHashSet<String>,
    dom: Option<Box<dyn DomMatcher>>,
    script_urls: Vec<String>,
    meta_tags: Vec<MetaTag>,
    cookie_string: String,
    stylesheet_urls: Vec<String>,
    inline_styles: Vec<String>,
    headers: FxHashMap<String, String>,
    markup: Option<String>,
    page_url: Option<Url>,
    dom_own_keys: Vec<String>,
    version_hints: FxHashMap<String, String>,
}

impl PageEvidenceBuilder {
    pub fn global(mut self, name: impl Into<String>) -> Self {
        self.globals.insert(name.into());
        self
    }

    pub fn globals<I: IntoIterator<Item = S>, S: Into<String>>(mut self, names: I) -> Self {
        self.globals.extend(names.into_iter().map(Into::into));
        self
    }

    /// 注入任意 DOM 匹配谓词（闭包或自定义实现）
    pub fn dom_matcher(mut self, matcher: impl DomMatcher + 'static) -> Self {
        self.dom = Some(Box::new(matcher));
        self
    }

    /// 以"已命中选择器集合"作为 DOM 谓词
    pub fn matched_selectors<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        selectors: I,
    ) -> Self {
        let set: FxHashSet<String> = selectors.into_iter().map(Into::into).collect();
        self.dom = Some(Box::new(set));
        self
    }

    pub fn script_url(mut self, url: impl Into<String>) -> Self {
        self.script_urls.push(url.into());
        self
    }

    pub fn meta_name(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.meta_tags.push(MetaTag {
            name: Some(name.into()),
            property: None,
            content: content.into(),
        });
        self
    }

    pub fn meta_property(mut self, property: impl Into<String>, content: impl Into<String>) -> Self {
        self.meta_tags.push(MetaTag {
            name: None,
            property: Some(property.into()),
            content: content.into(),
        });
        self
    }

    pub fn cookie_string(mut self, cookies: impl Into<String>) -> Self {
        self.cookie_string = cookies.into();
        self
    }

    pub fn stylesheet_url(mut self, url: impl Into<String>) -> Self {
        self.stylesheet_urls.push(url.into());
        self
    }

    pub fn inline_style(mut self, css: impl Into<String>) -> Self {
        self.inline_styles.push(css.into());
        self
    }

    /// 响应头名称统一转小写存储
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = Some(markup.into());
        self
    }

    pub fn page_url(mut self, url: Url) -> Self {
        self.page_url = Some(url);
        self
    }

    pub fn dom_own_key(mut self, key: impl Into<String>) -> Self {
        self.dom_own_keys.push(key.into());
        self
    }

    pub fn version_hint(mut self, key: impl Into<String>, version: impl Into<String>) -> Self {
        self.version_hints.insert(key.into(), version.into());
        self
    }

    pub fn build(self) -> PageEvidence {
        PageEvidence {
            globals: self.globals,
            // 默认谓词：空命中集合（任何选择器都不命中）
            dom: self.dom.unwrap_or_else(|| Box::new(FxHashSet::default())),
            script_urls: self.script_urls,
            meta_tags: self.meta_tags,
            cookie_string: self.cookie_string,
            stylesheet_urls: self.stylesheet_urls,
            inline_styles: self.inline_styles,
            headers: self.headers,
            markup: self.markup,
            page_url: self.page_url,
            dom_own_keys: self.dom_own_keys,
            version_hints: self.version_hints,
        }
    }
}
