//! 全局错误类型定义
//! 基于 thiserror 实现类型安全处理：目录错误 fail-fast，钩子错误局部恢复
use thiserror::Error;

use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;

/// 签名目录错误（加载期校验失败，致命）
/// 调用方不得对加载失败的目录发起检测
#[derive(Error, Debug)]
pub enum CatalogError {
    /// 目录 JSON 解析失败（格式错误/未知钩子 kind）
    #[error("Catalog parse failed: {0}")]
    Parse(#[from] SerdeJsonError),

    /// 技术名称重复（`name` 是目录主键）
    #[error("Duplicate signature name: {0}")]
    DuplicateName(String),

    /// 分类不在固定枚举内
    #[error("Unknown category `{category}` in signature `{tech}`")]
    UnknownCategory { tech: String, category: String },

    /// 缺失模式组键（允许空列表，但键必须出现）
    #[error("Signature `{tech}` is missing pattern group `{group}`")]
    MissingPatternGroup { tech: String, group: &'static str },

    /// 目录为空
    #[error("Catalog contains no signatures")]
    Empty,
}

/// 检测/版本钩子运行期错误
/// 恢复策略：记一条 debug 日志，按零贡献/无版本处理，不中断其余评估
#[derive(Error, Debug)]
pub enum HookError {
    /// 钩子正则编译失败
    #[error("Hook regex compilation failed: {0}")]
    Regex(#[from] RegexError),

    /// 钩子依赖的可选证据字段未被采集
    #[error("Required evidence field not captured: {0}")]
    MissingEvidence(&'static str),
}

/// crate 顶层错误
#[derive(Error, Debug)]
pub enum TechlensError {
    /// 目录相关错误
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// 证据采集协作方未能产出快照
    /// 与"零技术检出"的合法空结果严格区分
    #[error("Evidence unavailable: {0}")]
    EvidenceUnavailable(String),

    /// 检测器初始化失败
    #[error("Detector initialization failed: {0}")]
    DetectorInitError(String),
}

/// 全局 Result 类型别名
pub type TlResult<T> = Result<T, TechlensError>;
