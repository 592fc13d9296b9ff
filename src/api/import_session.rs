// ==========================================
// 服装业务管理系统 - 导入对话框会话
// ==========================================
// 职责: 驱动导入对话框的状态机
// 状态: Idle → FileSelected → Parsed → Previewing → Importing
//       → Completed | Aborted
// 红线: 选择文件即解析；Importing 之前关闭丢弃全部临时实体；
//       非法转换返回 InvalidStateTransition
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::{CancelToken, ImportPhase};
use crate::domain::ImportResult;
use crate::importer::{BulkImporter, ImportPreview, ImportSpec, ProgressSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 会话数据来源（预览与导入各自完整读取）
#[derive(Clone)]
enum SessionSource {
    File(PathBuf),
    Text(String),
}

pub struct ImportSession {
    importer: Arc<dyn BulkImporter>,
    spec: Box<dyn ImportSpec>,
    phase: ImportPhase,
    source: Option<SessionSource>,
    preview: Option<ImportPreview>,
    result: Option<ImportResult>,
    cancel: CancelToken,
}

impl ImportSession {
    pub fn new(importer: Arc<dyn BulkImporter>, spec: Box<dyn ImportSpec>) -> Self {
        Self {
            importer,
            spec,
            phase: ImportPhase::Idle,
            source: None,
            preview: None,
            result: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn phase(&self) -> ImportPhase {
        self.phase
    }

    /// 取消令牌副本；宿主 UI 可在导入期间从其他任务触发取消
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// 导入结束后的结果（仅 Completed 状态可读）
    pub fn result(&self) -> Option<&ImportResult> {
        self.result.as_ref()
    }

    fn transition_error(&self, to: ImportPhase) -> ApiError {
        ApiError::InvalidStateTransition {
            from: self.phase.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }

    /// Importing 之前允许（重新）选择文件
    fn can_select(&self) -> bool {
        matches!(
            self.phase,
            ImportPhase::Idle
                | ImportPhase::FileSelected
                | ImportPhase::Parsed
                | ImportPhase::Previewing
        )
    }

    /// 选择文件；解析随即触发
    ///
    /// # 返回
    /// - Ok(&ImportPreview): 解析完成，会话进入 Parsed
    /// - Err: 解析失败（如缺少必需列），会话回到 Idle
    pub async fn select_file(&mut self, file_path: &Path) -> ApiResult<&ImportPreview> {
        if !self.can_select() {
            return Err(self.transition_error(ImportPhase::FileSelected));
        }

        self.phase = ImportPhase::FileSelected;
        debug!(path = %file_path.display(), "文件已选择，开始解析");

        match self.importer.preview_file(file_path, self.spec.as_ref()).await {
            Ok(preview) => {
                self.source = Some(SessionSource::File(file_path.to_path_buf()));
                self.phase = ImportPhase::Parsed;
                Ok(self.preview.insert(preview))
            }
            Err(e) => {
                self.discard();
                self.phase = ImportPhase::Idle;
                Err(e.into())
            }
        }
    }

    /// 直接提交 CSV 文本（浏览器上传场景）
    pub async fn select_text(&mut self, text: &str) -> ApiResult<&ImportPreview> {
        if !self.can_select() {
            return Err(self.transition_error(ImportPhase::FileSelected));
        }

        self.phase = ImportPhase::FileSelected;

        match self.importer.preview_str(text, self.spec.as_ref()).await {
            Ok(preview) => {
                self.source = Some(SessionSource::Text(text.to_string()));
                self.phase = ImportPhase::Parsed;
                Ok(self.preview.insert(preview))
            }
            Err(e) => {
                self.discard();
                self.phase = ImportPhase::Idle;
                Err(e.into())
            }
        }
    }

    /// 进入预览态并读取截断行
    pub fn preview(&mut self) -> ApiResult<&ImportPreview> {
        if !matches!(self.phase, ImportPhase::Parsed | ImportPhase::Previewing) {
            return Err(self.transition_error(ImportPhase::Previewing));
        }

        self.phase = ImportPhase::Previewing;
        self.preview
            .as_ref()
            .ok_or_else(|| ApiError::InternalError("预览数据缺失".to_string()))
    }

    /// 确认导入；阻塞至运行结束
    ///
    /// # 返回
    /// - Ok(&ImportResult): 运行结束（部分分组失败也算结束），会话进入 Completed
    /// - Err: 运行级失败（解析或逐组写入前的传输失败），会话进入 Aborted
    pub async fn confirm(&mut self, sink: &dyn ProgressSink) -> ApiResult<&ImportResult> {
        if !matches!(self.phase, ImportPhase::Parsed | ImportPhase::Previewing) {
            return Err(self.transition_error(ImportPhase::Importing));
        }

        let source = self
            .source
            .clone()
            .ok_or_else(|| ApiError::InternalError("会话数据来源缺失".to_string()))?;

        self.phase = ImportPhase::Importing;
        info!(entity = self.spec.entity_name(), "开始导入");

        let outcome = match source {
            SessionSource::File(path) => {
                self.importer
                    .import_file(&path, self.spec.as_ref(), sink, &self.cancel)
                    .await
            }
            SessionSource::Text(text) => {
                self.importer
                    .import_str(&text, self.spec.as_ref(), sink, &self.cancel)
                    .await
            }
        };

        match outcome {
            Ok(result) => {
                self.preview = None;
                self.phase = ImportPhase::Completed;
                Ok(&*self.result.insert(result))
            }
            Err(e) => {
                self.discard();
                self.phase = ImportPhase::Aborted;
                Err(e.into())
            }
        }
    }

    /// 关闭对话框
    ///
    /// # 说明
    /// - Completed 之前关闭 → Aborted，丢弃全部临时实体
    /// - Completed 之后关闭保持 Completed（结果可继续读取）
    pub fn close(&mut self) -> ImportPhase {
        if self.phase != ImportPhase::Completed {
            self.cancel.cancel();
            self.discard();
            self.result = None;
            self.phase = ImportPhase::Aborted;
        }
        self.phase
    }

    fn discard(&mut self) {
        self.source = None;
        self.preview = None;
    }
}
