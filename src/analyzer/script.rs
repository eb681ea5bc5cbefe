use crate::analyzer::common::{ScoreTrail, DEFAULT_SCRIPT_WEIGHT};
use crate::analyzer::SignalAnalyzer;
use crate::catalog::Signature;
use crate::evidence::PageEvidence;

// Script 源 URL 分析器
pub struct ScriptAnalyzer;

impl SignalAnalyzer for ScriptAnalyzer {
    const TYPE_NAME: &'static str = "Script";

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail) {
        let points = sig.weight.unwrap_or(DEFAULT_SCRIPT_WEIGHT);
        for needle in &sig.patterns.scripts {
            // 每个子串模式最多计分一次，命中任意一个 script URL 即算
            if evidence.script_urls.iter().any(|url| url.contains(needle)) {
                score.add(&sig.name, Self::TYPE_NAME, needle, points);
            }
        }
    }
}
