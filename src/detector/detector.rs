//! 技术检测器核心
//! 核心职责：
//! 1. 持有不可变签名目录（Arc 共享，跨并发运行只读）
//! 2. 对每条签名独立运行评分引擎（签名之间互不观察结果）
//! 3. 按分类聚桶并稳定排序（置信度降序，同分保持目录申报顺序）
//! 4. 在聚合前对"证据不可得"短路，保证空结果与采集失败可区分

use std::sync::Arc;

use log::debug;

use crate::analyzer::score_signature;
use crate::catalog::SignatureCatalog;
use crate::error::{TechlensError, TlResult};
use crate::evidence::PageEvidence;
use crate::result::{CategorizedResult, Detection, TechResult};
use crate::utils::slugify;

/// 技术检测器
/// 同步纯计算：单次检测无 I/O、无阻塞；多次运行各持独立快照即可并发
#[derive(Debug, Clone)]
pub struct TechDetector {
    /// 签名目录（Arc 保证多线程共享）
    catalog: Arc<SignatureCatalog>,
}

impl TechDetector {
    /// 用已校验的目录创建检测器
    pub fn new(catalog: SignatureCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// 共享既有目录创建检测器（零拷贝）
    pub fn from_shared(catalog: Arc<SignatureCatalog>) -> Self {
        Self { catalog }
    }

    /// 使用内嵌默认目录创建检测器（仅 embedded-catalog 特性开启时可用）
    #[cfg(feature = "embedded-catalog")]
    pub fn with_embedded_catalog() -> Self {
        Self {
            catalog: crate::catalog::embedded_catalog(),
        }
    }

    pub fn catalog(&self) -> &SignatureCatalog {
        &self.catalog
    }

    /// 核心检测方法：遍历目录全部签名，聚桶并稳定排序
    /// 求值顺序不影响输出（除声明的同分决胜外）
    pub fn detect(&self, evidence: &PageEvidence) -> CategorizedResult {
        let mut result = CategorizedResult::new();

        for sig in self.catalog.signatures() {
            let detection = score_signature(sig, evidence);
            if !detection.detected {
                continue;
            }
            debug!(
                "Detected | tech: {} | confidence: {} | trail: {:?}",
                sig.name, detection.confidence, detection.evidence_trail
            );
            result.push(
                sig.category,
                TechResult {
                    name: sig.name.clone(),
                    slug: slugify(&sig.name),
                    confidence: detection.confidence,
                    version: detection.version,
                },
            );
        }

        result.sort_buckets();
        debug!(
            "Detection run complete | catalog: {} | detected: {}",
            self.catalog.len(),
            result.tech_count()
        );
        result
    }

    /// 协作方边界入口：采集方未能产出快照时短路为 EvidenceUnavailable，
    /// 绝不把采集失败与"零技术检出"的合法空结果混为一谈
    pub fn try_detect(&self, snapshot: Option<&PageEvidence>) -> TlResult<CategorizedResult> {
        match snapshot {
            Some(evidence) => Ok(self.detect(evidence)),
            None => Err(TechlensError::EvidenceUnavailable(
                "no page evidence snapshot was captured".to_string(),
            )),
        }
    }

    /// 单签名评分明细（含证据轨迹），用于调试与结果解释
    pub fn score(&self, tech_name: &str, evidence: &PageEvidence) -> Option<Detection> {
        self.catalog
            .get(tech_name)
            .map(|sig| score_signature(sig, evidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Signature, SignatureCatalog};

    fn catalog_of(sigs: Vec<Signature>) -> SignatureCatalog {
        SignatureCatalog::from_signatures(sigs).unwrap()
    }

    fn js_sig(name: &str, category: Category, ident: &str, weight: Option<u32>) -> Signature {
        let mut sig = Signature::new(name, category);
        sig.patterns.js = vec![ident.to_string()];
        sig.weight = weight;
        sig
    }

    /// 场景 C：空证据快照 → 每个分类都是空序列
    #[test]
    fn test_empty_evidence_gives_all_empty_buckets() {
        let detector = TechDetector::new(catalog_of(vec![
            js_sig("React", Category::Frameworks, "React", Some(40)),
            js_sig("jQuery", Category::Libraries, "jQuery", None),
        ]));

        let result = detector.detect(&PageEvidence::builder().build());
        assert!(!result.has_any());
        for (_, bucket) in result.iter() {
            assert!(bucket.is_empty());
        }
    }

    #[test]
    fn test_try_detect_distinguishes_unavailable_evidence() {
        let detector =
            TechDetector::new(catalog_of(vec![js_sig("React", Category::Frameworks, "React", None)]));

        let err = detector.try_detect(None).unwrap_err();
        assert!(matches!(err, TechlensError::EvidenceUnavailable(_)));

        let empty = PageEvidence::builder().build();
        let ok = detector.try_detect(Some(&empty)).unwrap();
        assert!(!ok.has_any());
    }

    #[test]
    fn test_bucketing_and_stable_tie_break() {
        // 三条同分签名 + 一条高分签名，验证目录申报顺序的同分决胜
        let detector = TechDetector::new(catalog_of(vec![
            js_sig("Lodash", Category::Libraries, "_", None),
            js_sig("Axios", Category::Libraries, "axios", Some(80)),
            js_sig("Moment.js", Category::Libraries, "moment", None),
            js_sig("D3.js", Category::Libraries, "d3", None),
        ]));

        let ev = PageEvidence::builder()
            .globals(["_", "axios", "moment", "d3"])
            .build();
        let result = detector.detect(&ev);

        let names: Vec<&str> = result
            .get(Category::Libraries)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        // Axios 80 分居首；其余 30 分按申报顺序
        assert_eq!(names, vec!["Axios", "Lodash", "Moment.js", "D3.js"]);
        assert!(result.get(Category::Frameworks).is_empty());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let detector = TechDetector::new(catalog_of(vec![
            js_sig("React", Category::Frameworks, "React", Some(40)),
            js_sig("jQuery", Category::Libraries, "jQuery", None),
        ]));

        let ev = PageEvidence::builder().globals(["React", "jQuery"]).build();
        let first = serde_json::to_string(&detector.detect(&ev)).unwrap();
        let second = serde_json::to_string(&detector.detect(&ev)).unwrap();
        assert_eq!(first, second); // 逐字节一致

        let value: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert_eq!(value["frameworks"][0]["slug"], "react");
        assert_eq!(value["libraries"][0]["slug"], "jquery");
    }

    #[test]
    fn test_score_exposes_trail() {
        let detector =
            TechDetector::new(catalog_of(vec![js_sig("React", Category::Frameworks, "React", None)]));
        let ev = PageEvidence::builder().global("React").build();

        let detection = detector.score("React", &ev).unwrap();
        assert_eq!(detection.evidence_trail, vec!["JS: React"]);
        assert!(detector.score("Unknown", &ev).is_none());
    }

    #[test]
    fn test_detector_is_send_sync_clone() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<TechDetector>();
    }
}
