use crate::analyzer::common::{ScoreTrail, DEFAULT_GLOBAL_WEIGHT};
use crate::analyzer::SignalAnalyzer;
use crate::catalog::Signature;
use crate::evidence::PageEvidence;

// Global 标识符分析器
// 与 JsAnalyzer 结构相同但作用于独立的 `globals` 模式组：
// 同一标识符同时声明在 js 与 globals 时获得双重加分（刻意保留的加法语义）
pub struct GlobalAnalyzer;

impl SignalAnalyzer for GlobalAnalyzer {
    const TYPE_NAME: &'static str = "Global";

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail) {
        let points = sig.weight.unwrap_or(DEFAULT_GLOBAL_WEIGHT);
        for ident in &sig.patterns.globals {
            if evidence.globals.contains(ident) {
                score.add(&sig.name, Self::TYPE_NAME, ident, points);
            }
        }
    }
}
