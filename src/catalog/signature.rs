//! 签名数据模型
//! 一条签名 = 一项技术的声明式检测描述：九个独立证据模式组 + 可选钩子

use std::collections::BTreeMap;

use serde::Deserialize;

use super::category::Category;
use super::hooks::{DetectorCheck, VersionResolver};

/// Meta 标签匹配模式
/// `name` 模式：content 为空表示存在性检测，否则要求 content 包含匹配
/// `property` 模式：仅存在性检测，content 字段不参与匹配
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetaPattern {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// 九个独立证据模式组
/// `js` 与 `globals` 语义独立、分别计分：同一标识符出现在两组会获得双重加分，
/// 这是对源目录可观测行为的刻意保留（加载器会对此类条目输出警告）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternSet {
    /// 全局标识符名称（window 级）
    pub js: Vec<String>,
    /// CSS 选择器
    pub dom: Vec<String>,
    /// script 源 URL 子串
    pub scripts: Vec<String>,
    /// 全局标识符名称（独立于 `js` 的第二组）
    pub globals: Vec<String>,
    /// Meta 标签模式
    pub meta: Vec<MetaPattern>,
    /// 响应头名称 → 期望子串（空串表示存在性检测）
    /// BTreeMap 保证证据轨迹的确定性输出顺序
    pub headers: BTreeMap<String, String>,
    /// Cookie 子串
    pub cookies: Vec<String>,
    /// 原始页面标记子串
    pub html: Vec<String>,
    /// 样式表 URL 或内联样式文本子串
    pub css: Vec<String>,
}

/// 一项技术的完整签名
#[derive(Debug, Clone)]
pub struct Signature {
    /// 唯一展示名称（目录主键）
    pub name: String,
    /// 所属分类
    pub category: Category,
    /// 证据模式组
    pub patterns: PatternSet,
    /// 可选权重：统一覆盖 js/dom/scripts/globals 四组的默认贡献值
    /// meta/css/cookie/header/html 始终使用固定常量，不受其影响
    pub weight: Option<u32>,
    /// 自定义检测钩子（有序列表，贡献值求和后整体计入）
    pub custom_detection: Vec<DetectorCheck>,
    /// 可选版本解析钩子
    pub version: Option<VersionResolver>,
}

impl Signature {
    /// 创建空模式签名（测试与程序化构造入口）
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            patterns: PatternSet::default(),
            weight: None,
            custom_detection: Vec::new(),
            version: None,
        }
    }
}
