//! 单证据源分析器与单签名评分入口
//! 评分模型：各证据源独立加法贡献，全部求值、互不短路；
//! 阈值判定针对钳制前的原始累计分，输出置信度钳制到 0..=100。

use log::debug;

pub mod common;
pub mod cookie;
pub mod css;
pub mod dom;
pub mod global;
pub mod header;
pub mod html;
pub mod js;
pub mod meta;
pub mod script;

use crate::catalog::Signature;
use crate::evidence::PageEvidence;
use crate::result::Detection;

use common::{ScoreTrail, DETECTION_THRESHOLD};
use cookie::CookieAnalyzer;
use css::CssAnalyzer;
use dom::DomAnalyzer;
use global::GlobalAnalyzer;
use header::HeaderAnalyzer;
use html::HtmlAnalyzer;
use js::JsAnalyzer;
use meta::MetaAnalyzer;
use script::ScriptAnalyzer;

/// 单证据源分析器抽象
/// 每个实现只负责一个模式组：读取签名对应模式与证据快照，向累加器计分
pub trait SignalAnalyzer {
    /// 分析器类型名称，用于日志与证据轨迹前缀
    const TYPE_NAME: &'static str;

    fn analyze(sig: &Signature, evidence: &PageEvidence, score: &mut ScoreTrail);
}

/// 对单条签名求值：自定义钩子 → 九个模式组 → 版本解析 → 阈值判定
///
/// 失败隔离：自定义钩子与版本钩子的运行期错误只记日志、按零贡献/无版本
/// 处理，绝不中断剩余模式组或其他签名的评估
pub fn score_signature(sig: &Signature, evidence: &PageEvidence) -> Detection {
    let mut score = ScoreTrail::default();

    // 1. 自定义检测钩子：各检查项求值后求和，整体以原值计入（不乘权重）
    let mut custom_total = 0u32;
    for check in &sig.custom_detection {
        match check.evaluate(evidence) {
            Ok(points) => custom_total = custom_total.saturating_add(points),
            Err(e) => {
                // 归零恢复：单个检查项失败不影响其余检查项
                debug!("[Custom] hook failed | tech: {} | {}", sig.name, e);
            }
        }
    }
    if custom_total > 0 {
        score.add_custom(&sig.name, custom_total);
    }

    // 2. 九个独立模式组，全部求值
    JsAnalyzer::analyze(sig, evidence, &mut score);
    DomAnalyzer::analyze(sig, evidence, &mut score);
    ScriptAnalyzer::analyze(sig, evidence, &mut score);
    GlobalAnalyzer::analyze(sig, evidence, &mut score);
    MetaAnalyzer::analyze(sig, evidence, &mut score);
    CssAnalyzer::analyze(sig, evidence, &mut score);
    CookieAnalyzer::analyze(sig, evidence, &mut score);
    HeaderAnalyzer::analyze(sig, evidence, &mut score);
    HtmlAnalyzer::analyze(sig, evidence, &mut score);

    // 3. 版本解析（失败隔离，映射为 None）
    let version = match sig.version.as_ref().map(|v| v.resolve(evidence)) {
        Some(Ok(version)) => version,
        Some(Err(e)) => {
            debug!("[Version] hook failed | tech: {} | {}", sig.name, e);
            None
        }
        None => None,
    };

    // 4. 阈值针对未钳制的原始累计分判定
    let raw_total = score.total();
    Detection {
        detected: raw_total >= DETECTION_THRESHOLD,
        confidence: raw_total.min(100) as u8,
        version,
        evidence_trail: score.into_trail(),
    }
}
