// ==========================================
// 服装业务管理系统 - 批量导入 Trait
// ==========================================
// 职责: 定义批量导入主接口（不包含实现）
// ==========================================

use crate::domain::types::CancelToken;
use crate::domain::{ImportResult, ValidatedRow};
use crate::importer::error::ImportError;
use crate::importer::import_spec::ImportSpec;
use crate::importer::progress::ProgressSink;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// ImportPreview - 预览结果
// ==========================================
// 用途: 对话框确认前展示的截断行 + 全量计数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreview {
    pub rows: Vec<ValidatedRow>, // 前 K 行（K 由配置决定）
    pub parsed: usize,           // 全量数据行数
    pub valid: usize,
    pub invalid: usize,
}

// ==========================================
// BulkImporter Trait
// ==========================================
// 用途: 批量导入主接口
// 实现者: BulkImporterImpl
#[async_trait]
pub trait BulkImporter: Send + Sync {
    /// 解析并校验文件，返回预览
    ///
    /// # 参数
    /// - file_path: 表格文件路径（.csv/.xlsx/.xls）
    /// - spec: 实体导入规格
    ///
    /// # 返回
    /// - Ok(ImportPreview): 截断预览行与全量计数
    /// - Err(MissingColumns): 表头缺少必需列（任何行处理前失败）
    async fn preview_file(
        &self,
        file_path: &Path,
        spec: &dyn ImportSpec,
    ) -> Result<ImportPreview, ImportError>;

    /// 解析并校验原始 CSV 文本，返回预览
    async fn preview_str(
        &self,
        text: &str,
        spec: &dyn ImportSpec,
    ) -> Result<ImportPreview, ImportError>;

    /// 从文件执行完整导入
    ///
    /// # 参数
    /// - file_path: 表格文件路径
    /// - spec: 实体导入规格
    /// - sink: 进度回调（每个分组结束后调用一次）
    /// - cancel: 取消令牌（组间边界检查）
    ///
    /// # 返回
    /// - Ok(ImportResult): 运行结果（部分分组失败也返回 Ok）
    /// - Err: 解析失败，或逐组写入开始前的传输失败
    ///
    /// # 导入流程（5个阶段）
    /// 1. 文件解析（表头契约检查）
    /// 2. 逐行校验（全部规则，不短路）
    /// 3. 有效行按父键分组
    /// 4. 预解析远程已有父键（此处失败中止整次运行）
    /// 5. 逐组串行持久化 + 进度汇报（单组失败不中止后续分组）
    async fn import_file(
        &self,
        file_path: &Path,
        spec: &dyn ImportSpec,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<ImportResult, ImportError>;

    /// 从原始 CSV 文本执行完整导入
    async fn import_str(
        &self,
        text: &str,
        spec: &dyn ImportSpec,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<ImportResult, ImportError>;
}
