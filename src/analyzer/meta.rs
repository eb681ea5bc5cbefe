use crate::analyzer::common::{ScoreTrail, META_NAME_WEIGHT, META_PROPERTY_WEIGHT};
use crate::analyzer::SignalAnalyzer;
use crate::catalog::Signature;
use crate::evidence::PageEvidence;

// Meta 标签分析器
// name 模式：content 为空 = 存在性检测，否则要求标签 content 包含期望子串，固定 40 分
// property 模式：仅存在性检测（content 不参与），固定 30 分
pub struct MetaAnalyzer;

impl SignalAnalyzer for MetaAnalyzer {
    const TYPE_NAME: &'static str = "Meta";

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail) {
        for pattern in &sig.patterns.meta {
            if let Some(name) = pattern.name.as_deref() {
                let hit = evidence.meta_tags.iter().any(|tag| {
                    tag.name.as_deref() == Some(name)
                        && (pattern.content.is_empty() || tag.content.contains(&pattern.content))
                });
                if hit {
                    score.add(&sig.name, Self::TYPE_NAME, name, META_NAME_WEIGHT);
                }
            } else if let Some(property) = pattern.property.as_deref() {
                let hit = evidence
                    .meta_tags
                    .iter()
                    .any(|tag| tag.property.as_deref() == Some(property));
                if hit {
                    score.add(&sig.name, Self::TYPE_NAME, property, META_PROPERTY_WEIGHT);
                }
            }
        }
    }
}
