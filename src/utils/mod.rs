//! 工具模块：提供通用工具函数
pub mod slug;
pub mod version_extractor;

pub use self::slug::slugify;
pub use self::version_extractor::VersionExtractor;
