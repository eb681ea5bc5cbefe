use crate::analyzer::common::{ScoreTrail, DEFAULT_DOM_WEIGHT};
use crate::analyzer::SignalAnalyzer;
use crate::catalog::Signature;
use crate::evidence::PageEvidence;

// DOM 选择器分析器
pub struct DomAnalyzer;

impl SignalAnalyzer for DomAnalyzer {
    const TYPE_NAME: &'static str = "DOM";

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail) {
        let points = sig.weight.unwrap_or(DEFAULT_DOM_WEIGHT);
        for selector in &sig.patterns.dom {
            if evidence.dom_matches(selector) {
                score.add(&sig.name, Self::TYPE_NAME, selector, points);
            }
        }
    }
}
