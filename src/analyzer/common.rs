//! 评分累加器与贡献常量
//! 权重语义：js/dom/scripts/globals 四组可被签名 `weight` 统一覆盖；
//! meta/css/cookie/header/html 为固定常量，目录作者无法因漏写 weight
//! 而意外削弱这些强结构信号。

use log::debug;

/// 检出阈值（针对钳制前的原始累计分判定）
pub const DETECTION_THRESHOLD: u32 = 25;

/// js 组默认贡献
pub const DEFAULT_JS_WEIGHT: u32 = 30;
/// dom 组默认贡献
pub const DEFAULT_DOM_WEIGHT: u32 = 25;
/// scripts 组默认贡献
pub const DEFAULT_SCRIPT_WEIGHT: u32 = 35;
/// globals 组默认贡献
pub const DEFAULT_GLOBAL_WEIGHT: u32 = 30;

/// meta name 模式固定贡献
pub const META_NAME_WEIGHT: u32 = 40;
/// meta property 模式固定贡献
pub const META_PROPERTY_WEIGHT: u32 = 30;
/// css 模式命中样式表链接的固定贡献
pub const CSS_LINK_WEIGHT: u32 = 35;
/// css 模式命中内联样式的固定贡献
pub const CSS_INLINE_WEIGHT: u32 = 25;
/// cookie 模式固定贡献
pub const COOKIE_WEIGHT: u32 = 30;
/// header 模式固定贡献（存在性/包含匹配同值）
pub const HEADER_WEIGHT: u32 = 30;
/// html 模式固定贡献
pub const HTML_WEIGHT: u32 = 25;

/// 单签名评分累加器：原始累计分（不钳制） + 有序证据轨迹
#[derive(Debug, Default)]
pub struct ScoreTrail {
    total: u32,
    trail: Vec<String>,
}

impl ScoreTrail {
    /// 记录一次模式组命中
    /// 饱和累加：原始分最终钳制到 100，极端目录的巨额贡献不允许绕回
    pub fn add(&mut self, tech_name: &str, signal_type: &str, label: &str, points: u32) {
        debug!(
            "[{}] hit | tech: {} | evidence: {} | +{}",
            signal_type, tech_name, label, points
        );
        self.total = self.total.saturating_add(points);
        self.trail.push(format!("{}: {}", signal_type, label));
    }

    /// 记录自定义钩子的整体贡献（原值计入，不乘权重）
    pub fn add_custom(&mut self, tech_name: &str, points: u32) {
        debug!("[Custom] hit | tech: {} | +{}", tech_name, points);
        self.total = self.total.saturating_add(points);
        self.trail.push(format!("Custom: {}%", points));
    }

    /// 钳制前的原始累计分
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn into_trail(self) -> Vec<String> {
        self.trail
    }
}
