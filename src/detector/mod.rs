//! 检测模块：签名目录 × 证据快照 → 分类聚合结果
pub mod detector;
pub mod global;

// 导出核心接口
pub use self::detector::TechDetector;
pub use self::global::{detect, init_global_detector};

#[cfg(feature = "embedded-catalog")]
pub use self::global::init_global_detector_embedded;
