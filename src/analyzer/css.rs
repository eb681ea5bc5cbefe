use crate::analyzer::common::{ScoreTrail, CSS_INLINE_WEIGHT, CSS_LINK_WEIGHT};
use crate::analyzer::SignalAnalyzer;
use crate::catalog::Signature;
use crate::evidence::PageEvidence;

// CSS 分析器
// 同一模式对样式表链接与内联样式分别独立判定，两者可同时命中（35 + 25）
pub struct CssAnalyzer;

impl SignalAnalyzer for CssAnalyzer {
    const TYPE_NAME: &'static str = "CSS";

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail) {
        for pattern in &sig.patterns.css {
            if evidence
                .stylesheet_urls
                .iter()
                .any(|url| url.contains(pattern))
            {
                score.add(&sig.name, "CSS Link", pattern, CSS_LINK_WEIGHT);
            }

            if evidence
                .inline_styles
                .iter()
                .any(|block| block.contains(pattern))
            {
                score.add(&sig.name, "CSS Inline", pattern, CSS_INLINE_WEIGHT);
            }
        }
    }
}
