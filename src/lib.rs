// ==========================================
// 服装业务管理系统 - 主数据批量导入核心库
// ==========================================
// 技术栈: Rust + 远程数据平台 (REST)
// 系统定位: 业务管理应用的批量导入子系统（宿主 UI 驱动）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 远程数据访问
pub mod repository;

// 导入层 - 批量导入管道
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CancelToken, ImportPhase, ParentConflict};

// 领域实体
pub use domain::{
    CustomerRecord, FabricColorRecord, FabricRecord, FailedGroup, ImportProgress, ImportResult,
    ProductRecord, RawRow, RowGroup, ValidatedRow,
};

// 导入层
pub use importer::{
    BulkImporter, BulkImporterImpl, CsvReader, ExcelReader, ImportError, ImportPreview,
    ImportSpec, RowValidator, UniversalTableReader,
};

// API
pub use api::{ImportApi, ImportSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "服装业务管理系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
