// ==========================================
// 批量导入API
// ==========================================
// 职责: 封装批量导入相关功能，供宿主 UI 调用
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::import_session::ImportSession;
use crate::config::ConfigManager;
use crate::domain::types::CancelToken;
use crate::domain::{FailedGroup, ImportResult};
use crate::importer::{
    csv_template, BulkImporter, BulkImporterImpl, ImportPreview, ImportSpec, ProgressSink,
};
use crate::repository::{BucketStorage, ObjectStorage, PostgrestTableApi};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 运行ID（用于日志追溯）
    pub run_id: String,
    /// 解析出的数据行数
    pub parsed: usize,
    /// 通过校验的行数
    pub valid: usize,
    /// 未通过校验的行数
    pub invalid: usize,
    /// 新建父实体数
    pub parents_created: usize,
    /// 复用/更新的已有父实体数
    pub parents_reused: usize,
    /// 写入的子记录数
    pub children_created: usize,
    /// 失败分组明细
    pub failed_groups: Vec<FailedGroup>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
    /// 本地化汇总文案（toast 直接展示）
    pub message: String,
    /// 每个失败分组一行的本地化错误文案
    pub failure_messages: Vec<String>,
}

impl From<ImportResult> for ImportApiResponse {
    fn from(result: ImportResult) -> Self {
        let message = result.summary();
        let failure_messages = result.failure_lines();
        Self {
            run_id: result.run_id,
            parsed: result.parsed,
            valid: result.valid,
            invalid: result.invalid,
            parents_created: result.parents_created,
            parents_reused: result.parents_reused,
            children_created: result.children_created,
            failed_groups: result.failed_groups,
            elapsed_ms: result.elapsed_time.as_millis() as i64,
            message,
            failure_messages,
        }
    }
}

/// 导入API
pub struct ImportApi {
    importer: Arc<dyn BulkImporter>,
    storage: Option<Arc<dyn ObjectStorage>>,
}

impl ImportApi {
    /// 由已有导入器创建（测试场景可注入内存实现）
    pub fn new(importer: Arc<dyn BulkImporter>) -> Self {
        Self {
            importer,
            storage: None,
        }
    }

    /// 附加对象存储（图片上传能力）
    pub fn with_storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// 由配置构建完整的远程访问栈
    pub fn from_config(config: ConfigManager) -> ApiResult<Self> {
        let repo = PostgrestTableApi::new(config.remote())?;
        let storage = BucketStorage::new(config.remote())?;
        let importer = BulkImporterImpl::new(repo, config);

        Ok(Self {
            importer: Arc::new(importer),
            storage: Some(Arc::new(storage)),
        })
    }

    /// 为一种实体打开导入对话框会话
    pub fn session(&self, spec: Box<dyn ImportSpec>) -> ImportSession {
        ImportSession::new(Arc::clone(&self.importer), spec)
    }

    /// 解析并校验文件，返回预览
    pub async fn preview_file(
        &self,
        file_path: &Path,
        spec: &dyn ImportSpec,
    ) -> ApiResult<ImportPreview> {
        Ok(self.importer.preview_file(file_path, spec).await?)
    }

    /// 执行完整导入
    ///
    /// # 参数
    /// - file_path: 表格文件路径
    /// - spec: 实体导入规格
    /// - sink: 进度回调
    /// - cancel: 取消令牌
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果（含本地化文案）
    /// - Err(ApiError): 解析失败或运行级传输失败
    pub async fn import_file(
        &self,
        file_path: &Path,
        spec: &dyn ImportSpec,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> ApiResult<ImportApiResponse> {
        let result = self.importer.import_file(file_path, spec, sink, cancel).await?;
        Ok(result.into())
    }

    /// 生成模板 CSV（表头 + 一条示例行），供下载按钮使用
    pub fn csv_template(&self, spec: &dyn ImportSpec) -> String {
        csv_template(spec)
    }

    /// 上传图片并返回公开 URL
    ///
    /// # 说明
    /// 图片列为机会性补充，不参与导入管道的校验与分组
    pub async fn upload_image(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ApiResult<String> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| ApiError::InternalError("未配置对象存储".to_string()))?;
        Ok(storage.upload(bucket, path, bytes, content_type).await?)
    }
}
