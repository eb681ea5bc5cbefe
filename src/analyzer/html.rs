use crate::analyzer::common::{ScoreTrail, HTML_WEIGHT};
use crate::analyzer::SignalAnalyzer;
use crate::catalog::Signature;
use crate::evidence::PageEvidence;

// 原始标记分析器：子串包含匹配，markup 未采集时静默零贡献
pub struct HtmlAnalyzer;

impl SignalAnalyzer for HtmlAnalyzer {
    const TYPE_NAME: &'static str = "HTML";

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail) {
        let Some(markup) = evidence.markup.as_deref() else {
            return;
        };
        for needle in &sig.patterns.html {
            if markup.contains(needle) {
                score.add(&sig.name, Self::TYPE_NAME, needle, HTML_WEIGHT);
            }
        }
    }
}
