// ==========================================
// 服装业务管理系统 - 领域层
// ==========================================
// 职责: 导入管道实体 + 主数据记录类型
// ==========================================

pub mod customer;
pub mod fabric;
pub mod import;
pub mod product;
pub mod types;

// 重导出核心实体
pub use customer::CustomerRecord;
pub use fabric::{FabricColorRecord, FabricRecord};
pub use import::{
    FailedGroup, ImportProgress, ImportResult, RawRow, RowGroup, ValidatedRow,
};
pub use product::ProductRecord;
pub use types::{CancelToken, ImportPhase, ParentConflict};
