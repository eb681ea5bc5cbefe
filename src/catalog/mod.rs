//! 签名目录模块：分类枚举、签名数据模型、钩子集合、加载与校验
pub mod category;
pub mod signature;
pub mod hooks;
pub mod loader;
#[cfg(feature = "embedded-catalog")]
pub mod embedded;

// 统一导出核心公共接口
pub use category::Category;
pub use hooks::{DetectorCheck, Tier, VersionResolver};
pub use loader::SignatureCatalog;
pub use signature::{MetaPattern, PatternSet, Signature};

#[cfg(feature = "embedded-catalog")]
pub use embedded::embedded_catalog;
