//! 签名目录加载与校验
//! 加载期 fail-fast：名称重复、未知分类、缺失模式组都直接拒绝整个目录，
//! 让目录作者在第一时间获得反馈（与聚合层对未知分类桶的运行期静默丢弃
//! 形成刻意对比）。

use std::collections::BTreeMap;

use log::warn;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::CatalogError;

use super::category::Category;
use super::hooks::{DetectorCheck, VersionResolver};
use super::signature::{MetaPattern, PatternSet, Signature};

/// 原始签名记录（外部 JSON 模式，camelCase 键）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSignature {
    name: String,
    category: String,
    patterns: RawPatternSet,
    #[serde(default)]
    weight: Option<u32>,
    #[serde(default)]
    custom_detection: Vec<DetectorCheck>,
    #[serde(default)]
    version: Option<VersionResolver>,
}

/// 原始模式组：九个键全部必须出现（允许空），缺键单独报错
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPatternSet {
    js: Option<Vec<String>>,
    dom: Option<Vec<String>>,
    scripts: Option<Vec<String>>,
    globals: Option<Vec<String>>,
    meta: Option<Vec<MetaPattern>>,
    headers: Option<BTreeMap<String, String>>,
    cookies: Option<Vec<String>>,
    html: Option<Vec<String>>,
    css: Option<Vec<String>>,
}

/// 不可变签名目录
/// 进程启动时加载一次，Arc 共享给并发检测运行；`Vec` 保序，
/// 申报顺序即聚合层稳定排序的同分决胜顺序
#[derive(Debug, Clone)]
pub struct SignatureCatalog {
    signatures: Vec<Signature>,
}

impl SignatureCatalog {
    /// 从 JSON 文本加载目录（外部配置入口）
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let raw_signatures: Vec<RawSignature> = serde_json::from_str(raw)?;
        let mut signatures = Vec::with_capacity(raw_signatures.len());
        for raw_sig in raw_signatures {
            signatures.push(validate_raw(raw_sig)?);
        }
        Self::from_signatures(signatures)
    }

    /// 从程序化构造的签名列表建目录（测试与内嵌目录共用入口）
    pub fn from_signatures(signatures: Vec<Signature>) -> Result<Self, CatalogError> {
        if signatures.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = FxHashSet::default();
        for sig in &signatures {
            if !seen.insert(sig.name.as_str()) {
                return Err(CatalogError::DuplicateName(sig.name.clone()));
            }
            flag_duplicated_identifiers(sig);
        }

        Ok(Self { signatures })
    }

    /// 按申报顺序的签名切片
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// 按名称查找签名
    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.name == name)
    }
}

/// 单条原始记录的校验与标准化
fn validate_raw(raw: RawSignature) -> Result<Signature, CatalogError> {
    let category: Category =
        raw.category
            .parse()
            .map_err(|_| CatalogError::UnknownCategory {
                tech: raw.name.clone(),
                category: raw.category.clone(),
            })?;

    let tech = &raw.name;
    let missing = |group: &'static str| CatalogError::MissingPatternGroup {
        tech: tech.clone(),
        group,
    };

    let patterns = PatternSet {
        js: raw.patterns.js.ok_or_else(|| missing("js"))?,
        dom: raw.patterns.dom.ok_or_else(|| missing("dom"))?,
        scripts: raw.patterns.scripts.ok_or_else(|| missing("scripts"))?,
        globals: raw.patterns.globals.ok_or_else(|| missing("globals"))?,
        meta: raw.patterns.meta.ok_or_else(|| missing("meta"))?,
        headers: raw.patterns.headers.ok_or_else(|| missing("headers"))?,
        cookies: raw.patterns.cookies.ok_or_else(|| missing("cookies"))?,
        html: raw.patterns.html.ok_or_else(|| missing("html"))?,
        css: raw.patterns.css.ok_or_else(|| missing("css"))?,
    };

    Ok(Signature {
        name: raw.name,
        category,
        patterns,
        weight: raw.weight,
        custom_detection: raw.custom_detection,
        version: raw.version,
    })
}

/// 标记 js 与 globals 同列一个标识符的条目
/// 该重复会导致双重加分；按可观测行为保留语义，仅在加载期告警提示目录作者
fn flag_duplicated_identifiers(sig: &Signature) {
    for ident in &sig.patterns.js {
        if sig.patterns.globals.contains(ident) {
            warn!(
                "Signature `{}` lists `{}` in both `js` and `globals`; it will score twice",
                sig.name, ident
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_PATTERNS: &str = r#"{
        "js": [], "dom": [], "scripts": [], "globals": [],
        "meta": [], "headers": {}, "cookies": [], "html": [], "css": []
    }"#;

    fn entry(name: &str, category: &str) -> String {
        format!(
            r#"{{ "name": "{}", "category": "{}", "patterns": {} }}"#,
            name, category, MINIMAL_PATTERNS
        )
    }

    #[test]
    fn test_load_valid_catalog_keeps_order() {
        let json = format!(
            "[{},{},{}]",
            entry("React", "frameworks"),
            entry("Vue.js", "frameworks"),
            entry("jQuery", "libraries")
        );
        let catalog = SignatureCatalog::from_json_str(&json).unwrap();
        assert_eq!(catalog.len(), 3);
        let names: Vec<&str> = catalog.signatures().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["React", "Vue.js", "jQuery"]);
        assert!(catalog.get("jQuery").is_some());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let json = format!("[{},{}]", entry("React", "frameworks"), entry("React", "libraries"));
        let err = SignatureCatalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName(name) if name == "React"));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let json = format!("[{}]", entry("Solana", "blockchain"));
        let err = SignatureCatalog::from_json_str(&json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownCategory { tech, category }
                if tech == "Solana" && category == "blockchain"
        ));
    }

    #[test]
    fn test_missing_pattern_group_rejected() {
        // 缺 cookies 键
        let json = r#"[{
            "name": "X", "category": "misc",
            "patterns": {
                "js": [], "dom": [], "scripts": [], "globals": [],
                "meta": [], "headers": {}, "html": [], "css": []
            }
        }]"#;
        let err = SignatureCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingPatternGroup { tech, group }
                if tech == "X" && group == "cookies"
        ));
    }

    #[test]
    fn test_unknown_hook_kind_fails_parse() {
        let json = format!(
            r#"[{{ "name": "X", "category": "misc", "patterns": {},
                 "customDetection": [ {{ "kind": "no-such-kind", "add": 10 }} ] }}]"#,
            MINIMAL_PATTERNS
        );
        let err = SignatureCatalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = SignatureCatalog::from_json_str("[]").unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn test_js_globals_overlap_loads_with_warning() {
        let _ = env_logger::builder().is_test(true).try_init();
        // 行为保留：同列标识符的条目照常加载（仅告警）
        let json = r#"[{
            "name": "Vue.js", "category": "frameworks",
            "patterns": {
                "js": ["Vue"], "dom": [], "scripts": [], "globals": ["Vue"],
                "meta": [], "headers": {}, "cookies": [], "html": [], "css": []
            }
        }]"#;
        let catalog = SignatureCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
