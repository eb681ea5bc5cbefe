//! 内嵌默认签名目录
//! 目录是配置数据而非代码：JSON 文件随 crate 打包，首次访问时懒加载并
//! 完成全量校验。内嵌目录损坏属于发布错误，直接 panic 给出明确提示。

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::loader::SignatureCatalog;

static CATALOG_JSON: &str = include_str!("../../data/catalog.json");

/// 全局懒加载的内嵌目录单例 - 进程内仅一份实例，线程安全
static EMBEDDED_CATALOG: Lazy<Arc<SignatureCatalog>> = Lazy::new(|| {
    let catalog = SignatureCatalog::from_json_str(CATALOG_JSON).unwrap_or_else(|e| {
        panic!("Embedded signature catalog is malformed: {}", e);
    });
    log::debug!("Embedded catalog loaded | signatures: {}", catalog.len());
    Arc::new(catalog)
});

/// 获取内嵌目录（Arc 克隆仅增加引用计数）
pub fn embedded_catalog() -> Arc<SignatureCatalog> {
    EMBEDDED_CATALOG.clone()
}
