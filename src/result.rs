//! 检测结果模型：单技术中间结果 + 分类聚合输出

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::catalog::Category;

/// 单签名评分的中间结果
/// `evidence_trail`：只要产生过任何贡献就非空，低于阈值时同样保留
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub detected: bool,
    /// 最终置信度（钳制到 0..=100）
    pub confidence: u8,
    pub version: Option<String>,
    /// 命中的子检查描述（有序）
    pub evidence_trail: Vec<String>,
}

/// 输出层单技术结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechResult {
    pub name: String,
    pub slug: String,
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl fmt::Display for TechResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) if !v.is_empty() => write!(f, "{} {} ({}%)", self.name, v, self.confidence),
            _ => write!(f, "{} ({}%)", self.name, self.confidence),
        }
    }
}

/// 分类聚合结果
/// 全部分类恒存在（空桶以空序列呈现，不省略），调用方以此区分
/// "全页零检出"与"分类缺失"；BTreeMap 保证逐字节确定性的序列化输出
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategorizedResult {
    buckets: BTreeMap<Category, Vec<TechResult>>,
}

impl CategorizedResult {
    /// 预置全部分类的空结果
    pub(crate) fn new() -> Self {
        Self {
            buckets: Category::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    /// 追加一条检出；分类不在既有桶内时静默丢弃
    pub(crate) fn push(&mut self, category: Category, tech: TechResult) {
        match self.buckets.get_mut(&category) {
            Some(bucket) => bucket.push(tech),
            None => log::debug!(
                "Dropping detection for unrecognized category bucket: {} ({})",
                category,
                tech.name
            ),
        }
    }

    /// 桶内稳定排序：置信度降序，同分保持目录申报顺序
    pub(crate) fn sort_buckets(&mut self) {
        for bucket in self.buckets.values_mut() {
            bucket.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        }
    }

    /// 指定分类的检出序列（恒存在）
    pub fn get(&self, category: Category) -> &[TechResult] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 是否检出过任何技术
    pub fn has_any(&self) -> bool {
        self.buckets.values().any(|b| !b.is_empty())
    }

    /// 检出总数
    pub fn tech_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// 按分类枚举顺序迭代 (分类, 检出序列)
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[TechResult])> {
        self.buckets.iter().map(|(c, b)| (*c, b.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech(name: &str, confidence: u8) -> TechResult {
        TechResult {
            name: name.to_string(),
            slug: crate::utils::slugify(name),
            confidence,
            version: None,
        }
    }

    #[test]
    fn test_all_categories_present_when_empty() {
        let result = CategorizedResult::new();
        assert!(!result.has_any());
        assert_eq!(result.iter().count(), Category::ALL.len());
        for (_, bucket) in result.iter() {
            assert!(bucket.is_empty());
        }
    }

    #[test]
    fn test_stable_sort_keeps_declaration_order_on_ties() {
        let mut result = CategorizedResult::new();
        result.push(Category::Libraries, tech("First", 60));
        result.push(Category::Libraries, tech("Second", 90));
        result.push(Category::Libraries, tech("Third", 60));
        result.sort_buckets();

        let names: Vec<&str> = result
            .get(Category::Libraries)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        // 同为 60 分的 First/Third 保持推入顺序
        assert_eq!(names, vec!["Second", "First", "Third"]);
    }

    #[test]
    fn test_serialization_includes_empty_buckets() {
        let result = CategorizedResult::new();
        let json = serde_json::to_value(&result).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), Category::ALL.len());
        assert!(map.contains_key("reverse-proxies"));
        assert!(map["frameworks"].as_array().unwrap().is_empty());
    }
}
