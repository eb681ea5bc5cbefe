//! 自定义检测钩子与版本解析钩子
//! 设计说明：原始实现允许签名携带任意内联函数；这里收敛为封闭的参数化
//! 钩子集合，目录保持纯声明式，钩子逻辑在本模块内独立可测。
//! 每个钩子返回显式 Result：失败即零贡献/无版本，由调用方记录日志后继续。

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::HookError;
use crate::evidence::PageEvidence;
use crate::utils::VersionExtractor;

/// 全局正则缓存（懒编译，进程级复用，按模式字符串作 Key）
static REGEX_CACHE: Lazy<RwLock<FxHashMap<String, Arc<Regex>>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

/// 获取编译后的正则（懒加载 + 全局缓存）
/// 逻辑：读锁查缓存 → 未命中则编译后写锁入缓存
pub(crate) fn cached_regex(pattern: &str) -> Result<Arc<Regex>, HookError> {
    {
        let cache = REGEX_CACHE.read().unwrap();
        if let Some(re) = cache.get(pattern) {
            return Ok(re.clone());
        }
    }

    let compiled = Arc::new(Regex::new(pattern)?);
    let mut cache = REGEX_CACHE.write().unwrap();
    Ok(cache
        .entry(pattern.to_string())
        .or_insert(compiled)
        .clone())
}

/// 计数阈值档位：命中数达到 `at_least` 时贡献 `add`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tier {
    pub at_least: usize,
    pub add: u32,
}

/// 档位取值：取所有满足阈值的档位中贡献最高者
fn tier_score(tiers: &[Tier], count: usize) -> u32 {
    tiers
        .iter()
        .filter(|t| count >= t.at_least)
        .map(|t| t.add)
        .max()
        .unwrap_or(0)
}

/// 自定义检测钩子（封闭参数化集合，`kind` 标签区分）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DetectorCheck {
    /// 指定全局标识符存在
    GlobalPresent { name: String, add: u32 },
    /// 任一全局标识符存在
    AnyGlobalPresent { names: Vec<String>, add: u32 },
    /// DOM 选择器命中
    SelectorPresent { selector: String, add: u32 },
    /// 任一 DOM 选择器命中
    AnySelectorPresent { selectors: Vec<String>, add: u32 },
    /// 任一 script URL 包含子串
    ScriptUrlContains { needle: String, add: u32 },
    /// 任一 script URL 匹配正则
    ScriptUrlRegex { pattern: String, add: u32 },
    /// 原始 Cookie 串包含子串
    CookieContains { needle: String, add: u32 },
    /// 指定 name 的 meta 标签存在
    MetaNamePresent { name: String, add: u32 },
    /// name/property 前缀命中的 meta 标签计数，按档位取值
    MetaPrefixCount { prefix: String, tiers: Vec<Tier> },
    /// 采样元素自有属性键前缀扫描（框架内部键，如 __reactFiber$）
    DomInternalKeyPrefix { prefixes: Vec<String>, add: u32 },
    /// 单个内联样式块中 CSS 自定义属性命中计数（取各块最大值），按档位取值
    CssCustomPropertyCount { properties: Vec<String>, tiers: Vec<Tier> },
    /// 原始标记上命中的正则模式计数，按档位取值（如工具类 CSS 密度）
    MarkupRegexCount { patterns: Vec<String>, tiers: Vec<Tier> },
    /// 页面主机名包含任一后缀
    HostnameSuffix { suffixes: Vec<String>, add: u32 },
    /// 页面协议为 https
    HttpsScheme { add: u32 },
}

impl DetectorCheck {
    /// 对一份证据快照求值，返回置信度贡献
    /// 依赖的可选证据字段未采集时返回 MissingEvidence，由调用方归零处理
    pub fn evaluate(&self, evidence: &PageEvidence) -> Result<u32, HookError> {
        match self {
            DetectorCheck::GlobalPresent { name, add } => {
                Ok(if evidence.globals.contains(name) { *add } else { 0 })
            }
            DetectorCheck::AnyGlobalPresent { names, add } => {
                Ok(if names.iter().any(|n| evidence.globals.contains(n)) {
                    *add
                } else {
                    0
                })
            }
            DetectorCheck::SelectorPresent { selector, add } => {
                Ok(if evidence.dom_matches(selector) { *add } else { 0 })
            }
            DetectorCheck::AnySelectorPresent { selectors, add } => {
                Ok(if selectors.iter().any(|s| evidence.dom_matches(s)) {
                    *add
                } else {
                    0
                })
            }
            DetectorCheck::ScriptUrlContains { needle, add } => {
                Ok(if evidence.script_urls.iter().any(|u| u.contains(needle)) {
                    *add
                } else {
                    0
                })
            }
            DetectorCheck::ScriptUrlRegex { pattern, add } => {
                let re = cached_regex(pattern)?;
                Ok(if evidence.script_urls.iter().any(|u| re.is_match(u)) {
                    *add
                } else {
                    0
                })
            }
            DetectorCheck::CookieContains { needle, add } => {
                Ok(if evidence.cookie_string.contains(needle) {
                    *add
                } else {
                    0
                })
            }
            DetectorCheck::MetaNamePresent { name, add } => {
                let hit = evidence
                    .meta_tags
                    .iter()
                    .any(|m| m.name.as_deref() == Some(name.as_str()));
                Ok(if hit { *add } else { 0 })
            }
            DetectorCheck::MetaPrefixCount { prefix, tiers } => {
                let count = evidence
                    .meta_tags
                    .iter()
                    .filter(|m| {
                        m.name.as_deref().is_some_and(|n| n.starts_with(prefix.as_str()))
                            || m.property
                                .as_deref()
                                .is_some_and(|p| p.starts_with(prefix.as_str()))
                    })
                    .count();
                Ok(tier_score(tiers, count))
            }
            DetectorCheck::DomInternalKeyPrefix { prefixes, add } => {
                let hit = evidence
                    .dom_own_keys
                    .iter()
                    .any(|k| prefixes.iter().any(|p| k.starts_with(p)));
                Ok(if hit { *add } else { 0 })
            }
            DetectorCheck::CssCustomPropertyCount { properties, tiers } => {
                // 每个内联样式块单独计数，取最大值后套档位
                let best = evidence
                    .inline_styles
                    .iter()
                    .map(|block| properties.iter().filter(|p| block.contains(p.as_str())).count())
                    .max()
                    .unwrap_or(0);
                Ok(tier_score(tiers, best))
            }
            DetectorCheck::MarkupRegexCount { patterns, tiers } => {
                let markup = evidence
                    .markup
                    .as_deref()
                    .ok_or(HookError::MissingEvidence("markup"))?;
                let mut count = 0usize;
                for pattern in patterns {
                    let re = cached_regex(pattern)?;
                    if re.is_match(markup) {
                        count += 1;
                    }
                }
                Ok(tier_score(tiers, count))
            }
            DetectorCheck::HostnameSuffix { suffixes, add } => {
                let url = evidence
                    .page_url
                    .as_ref()
                    .ok_or(HookError::MissingEvidence("page_url"))?;
                let hit = url
                    .host_str()
                    .is_some_and(|host| suffixes.iter().any(|s| host.contains(s.as_str())));
                Ok(if hit { *add } else { 0 })
            }
            DetectorCheck::HttpsScheme { add } => {
                let url = evidence
                    .page_url
                    .as_ref()
                    .ok_or(HookError::MissingEvidence("page_url"))?;
                Ok(if url.scheme() == "https" { *add } else { 0 })
            }
        }
    }
}

/// 版本解析钩子
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VersionResolver {
    /// 从采集方提供的版本提示表中查找（如 "React" → "18.2.0"）
    EvidenceHint { key: String },
    /// 对 script URL 正则捕获后按模板拼装版本号
    ScriptUrlPattern {
        pattern: String,
        #[serde(default = "default_version_template")]
        template: String,
    },
}

fn default_version_template() -> String {
    "$1".to_string()
}

impl VersionResolver {
    /// 解析版本号，未命中返回 Ok(None)
    pub fn resolve(&self, evidence: &PageEvidence) -> Result<Option<String>, HookError> {
        match self {
            VersionResolver::EvidenceHint { key } => {
                Ok(evidence.version_hints.get(key).cloned())
            }
            VersionResolver::ScriptUrlPattern { pattern, template } => {
                let re = cached_regex(pattern)?;
                for url in &evidence.script_urls {
                    if let Some(captures) = re.captures(url) {
                        return Ok(VersionExtractor::extract(template, &captures));
                    }
                }
                Ok(None)
            }
        }
    }
}
