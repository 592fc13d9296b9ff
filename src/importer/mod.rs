// ==========================================
// 服装业务管理系统 - 导入层
// ==========================================
// 职责: 批量表格导入管道（解析 → 校验 → 分组 → 逐组写入 → 汇总）
// 支持: CSV / Excel
// ==========================================

// 模块声明
pub mod bulk_importer_impl;
pub mod bulk_importer_trait;
pub mod error;
pub mod grouper;
pub mod import_spec;
pub mod progress;
pub mod row_validator;
pub mod specs;
pub mod table_reader;

// 重导出核心类型
pub use bulk_importer_impl::BulkImporterImpl;
pub use bulk_importer_trait::{BulkImporter, ImportPreview};
pub use error::{ImportError, ImportPipelineResult};
pub use grouper::group_rows;
pub use import_spec::{csv_template, group_key, ImportSpec};
pub use progress::{CollectingProgress, NullProgress, ProgressSink, RunStats};
pub use row_validator::{CrossRule, FieldRule, RowValidator, RuleKind};
pub use specs::{CustomerImportSpec, FabricImportSpec, ProductImportSpec};
pub use table_reader::{CsvReader, ExcelReader, UniversalTableReader};
