use crate::analyzer::common::{ScoreTrail, HEADER_WEIGHT};
use crate::analyzer::SignalAnalyzer;
use crate::catalog::Signature;
use crate::evidence::PageEvidence;

// 响应头分析器
// 规则名以 `-` 结尾时按头名称前缀匹配（如 `x-amz-`），否则精确名称查找；
// 期望值为空串 = 存在性检测，否则对头值做大小写不敏感的包含匹配。
// 采集方无法提供响应头时证据为空表，静默零贡献。
pub struct HeaderAnalyzer;

impl SignalAnalyzer for HeaderAnalyzer {
    const TYPE_NAME: &'static str = "Header";

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail) {
        for (rule_name, expected) in &sig.patterns.headers {
            let rule_name_lower = rule_name.to_ascii_lowercase();
            let expected_lower = expected.to_ascii_lowercase();

            let hit = if rule_name_lower.ends_with('-') {
                evidence.headers.iter().any(|(name, value)| {
                    name.starts_with(&rule_name_lower)
                        && (expected_lower.is_empty()
                            || value.to_ascii_lowercase().contains(&expected_lower))
                })
            } else {
                evidence.headers.get(&rule_name_lower).is_some_and(|value| {
                    expected_lower.is_empty()
                        || value.to_ascii_lowercase().contains(&expected_lower)
                })
            };

            if hit {
                score.add(&sig.name, Self::TYPE_NAME, rule_name, HEADER_WEIGHT);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn sig_with_header(name: &str, expected: &str) -> Signature {
        let mut sig = Signature::new("Srv", Category::WebServers);
        sig.patterns
            .headers
            .insert(name.to_string(), expected.to_string());
        sig
    }

    #[test]
    fn test_presence_only_header() {
        let sig = sig_with_header("cf-ray", "");
        let ev = PageEvidence::builder().header("CF-Ray", "8a2b-SJC").build();
        let mut score = ScoreTrail::default();
        HeaderAnalyzer::analyze(&sig, &ev, &mut score);
        assert_eq!(score.total(), HEADER_WEIGHT);
    }

    #[test]
    fn test_value_containment_case_insensitive() {
        let sig = sig_with_header("server", "cloudflare");
        let ev = PageEvidence::builder().header("Server", "Cloudflare").build();
        let mut score = ScoreTrail::default();
        HeaderAnalyzer::analyze(&sig, &ev, &mut score);
        assert_eq!(score.total(), HEADER_WEIGHT);

        let miss = PageEvidence::builder().header("Server", "nginx/1.21").build();
        let mut score = ScoreTrail::default();
        HeaderAnalyzer::analyze(&sig, &miss, &mut score);
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn test_prefix_rule_name() {
        let sig = sig_with_header("x-amz-", "");
        let ev = PageEvidence::builder()
            .header("x-amz-request-id", "ABCDEF")
            .build();
        let mut score = ScoreTrail::default();
        HeaderAnalyzer::analyze(&sig, &ev, &mut score);
        assert_eq!(score.total(), HEADER_WEIGHT);
    }

    #[test]
    fn test_empty_headers_silently_contribute_nothing() {
        let sig = sig_with_header("server", "nginx");
        let ev = PageEvidence::builder().build();
        let mut score = ScoreTrail::default();
        HeaderAnalyzer::analyze(&sig, &ev, &mut score);
        assert_eq!(score.total(), 0);
    }
}
