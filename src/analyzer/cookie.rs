use crate::analyzer::common::{ScoreTrail, COOKIE_WEIGHT};
use crate::analyzer::SignalAnalyzer;
use crate::catalog::Signature;
use crate::evidence::PageEvidence;

// Cookie 分析器：子串包含匹配原始 Cookie 串
pub struct CookieAnalyzer;

impl SignalAnalyzer for CookieAnalyzer {
    const TYPE_NAME: &'static str = "Cookie";

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail) {
        for needle in &sig.patterns.cookies {
            if evidence.cookie_string.contains(needle) {
                score.add(&sig.name, Self::TYPE_NAME, needle, COOKIE_WEIGHT);
            }
        }
    }
}
