//! 全局检测器单例管理
//! 核心职责：
//! 1. 维护进程生命周期内唯一的 TechDetector 实例
//! 2. 幂等初始化（OnceCell 保证仅一次成功）
//! 3. embedded-catalog 特性开启时支持懒加载默认目录

use once_cell::sync::OnceCell;

use crate::catalog::SignatureCatalog;
use crate::error::{TechlensError, TlResult};
use crate::evidence::PageEvidence;
use crate::result::CategorizedResult;

use super::detector::TechDetector;

/// 全局检测器实例 - 线程安全单例
static GLOBAL_DETECTOR: OnceCell<TechDetector> = OnceCell::new();

/// 用自定义目录初始化全局检测器
/// 幂等设计：已初始化则直接返回 Ok(())
pub fn init_global_detector(catalog: SignatureCatalog) -> TlResult<()> {
    if GLOBAL_DETECTOR.get().is_some() {
        log::debug!("Global detector already initialized, skip reinitialization");
        return Ok(());
    }

    GLOBAL_DETECTOR
        .set(TechDetector::new(catalog))
        .map_err(|_| {
            TechlensError::DetectorInitError(
                "instance already initialized by another thread".to_string(),
            )
        })?;

    log::info!("Global TechDetector initialized with custom catalog");
    Ok(())
}

/// 用内嵌默认目录初始化全局检测器（仅 embedded-catalog 特性开启时可用）
#[cfg(feature = "embedded-catalog")]
pub fn init_global_detector_embedded() -> TlResult<()> {
    if GLOBAL_DETECTOR.get().is_some() {
        log::debug!("Global detector already initialized, skip reinitialization");
        return Ok(());
    }

    GLOBAL_DETECTOR
        .set(TechDetector::with_embedded_catalog())
        .map_err(|_| {
            TechlensError::DetectorInitError(
                "instance already initialized by another thread".to_string(),
            )
        })?;

    log::info!("Global TechDetector initialized with embedded catalog");
    Ok(())
}

/// 获取全局检测器实例
/// embedded-catalog 开启时自动懒加载默认目录；否则要求先手动初始化
fn get_global_detector() -> TlResult<&'static TechDetector> {
    #[cfg(feature = "embedded-catalog")]
    {
        Ok(GLOBAL_DETECTOR.get_or_init(TechDetector::with_embedded_catalog))
    }

    #[cfg(not(feature = "embedded-catalog"))]
    {
        GLOBAL_DETECTOR.get().ok_or_else(|| {
            TechlensError::DetectorInitError(
                "global detector not initialized, call init_global_detector first".to_string(),
            )
        })
    }
}

/// 全局检测入口（简化封装）
pub fn detect(evidence: &PageEvidence) -> TlResult<CategorizedResult> {
    Ok(get_global_detector()?.detect(evidence))
}
