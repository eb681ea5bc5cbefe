//! techlens - 声明式多信号 Web 技术栈识别引擎

// 签名目录：分类枚举、签名模型、钩子、加载校验
pub mod catalog;
// 页面证据快照（由外部采集协作方构造，引擎只读）
pub mod evidence;
// 检测模块：签名聚合评分核心逻辑
pub mod detector;
// 单证据源分析器（JS/DOM/Script/Global/Meta/CSS/Cookie/Header/HTML）
pub mod analyzer;
// 检测结果模型
pub mod result;
// 全局错误类型
pub mod error;
// 通用工具模块
pub mod utils;

// 导出全局错误类型
pub use self::error::{CatalogError, HookError, TechlensError, TlResult};

// 导出签名目录核心结构体与钩子
pub use crate::catalog::{
    Category, DetectorCheck, MetaPattern, PatternSet, Signature, SignatureCatalog, Tier,
    VersionResolver,
};
#[cfg(feature = "embedded-catalog")]
pub use crate::catalog::embedded_catalog;

// 导出证据快照核心接口
pub use crate::evidence::{DomMatcher, MetaTag, PageEvidence, PageEvidenceBuilder};

// 导出结果模型
pub use crate::result::{CategorizedResult, Detection, TechResult};

// 导出检测模块核心接口（包含全局单例封装接口）
pub use crate::detector::{detect, init_global_detector, TechDetector};
#[cfg(feature = "embedded-catalog")]
pub use crate::detector::init_global_detector_embedded;

// 导出评分入口与通用工具
pub use crate::analyzer::score_signature;
pub use crate::utils::{slugify, VersionExtractor};
