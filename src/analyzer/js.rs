use crate::analyzer::common::{ScoreTrail, DEFAULT_JS_WEIGHT};
use crate::analyzer::SignalAnalyzer;
use crate::catalog::Signature;
use crate::evidence::PageEvidence;

// JS 全局标识符分析器
pub struct JsAnalyzer;

impl SignalAnalyzer for JsAnalyzer {
    const TYPE_NAME: &'static str = "JS";

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail) {
        let points = sig.weight.unwrap_or(DEFAULT_JS_WEIGHT);
        for ident in &sig.patterns.js {
            // 每个命中的标识符独立计分，不去重
            if evidence.globals.contains(ident) {
                score.add(&sig.name, Self::TYPE_NAME, ident, points);
            }
        }
    }
}
