// ==========================================
// 服装业务管理系统 - 批量导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到远程表
// 流程: 解析 → 校验 → 分组 → 预解析已有父键 → 逐组写入 → 汇总
// 红线: 分组严格串行写入（控制远程负载，保证进度百分比含义）；
//       单组失败只记入结果，不中止后续分组
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::types::{CancelToken, ParentConflict};
use crate::domain::{ImportProgress, ImportResult, RawRow, RowGroup, ValidatedRow};
use crate::importer::bulk_importer_trait::{BulkImporter, ImportPreview};
use crate::importer::error::ImportError;
use crate::importer::grouper::group_rows;
use crate::importer::import_spec::{group_key, ImportSpec};
use crate::importer::progress::{ProgressSink, RunStats};
use crate::importer::row_validator::RowValidator;
use crate::importer::table_reader::{CsvReader, UniversalTableReader};
use crate::repository::RemoteTableApi;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const DEFAULT_PREVIEW_ROW_LIMIT: usize = 4;
const DEFAULT_CHILD_CHUNK_SIZE: usize = 500;

/// 单个分组的写入结果
struct GroupOutcome {
    parent_created: bool,
    children_written: usize,
}

// ==========================================
// BulkImporterImpl - 批量导入器实现
// ==========================================
pub struct BulkImporterImpl<R, C>
where
    R: RemoteTableApi,
    C: ImportConfigReader,
{
    // 远程数据访问
    repo: R,

    // 配置读取器
    config: C,
}

impl<R, C> BulkImporterImpl<R, C>
where
    R: RemoteTableApi,
    C: ImportConfigReader,
{
    /// 创建新的 BulkImporter 实例
    ///
    /// # 参数
    /// - repo: 远程表访问实现
    /// - config: 导入调优配置
    pub fn new(repo: R, config: C) -> Self {
        Self { repo, config }
    }

    /// 对全部原始行执行规格的列规则与跨列规则
    fn validate_rows(spec: &dyn ImportSpec, raw_rows: Vec<RawRow>) -> Vec<ValidatedRow> {
        let validator = RowValidator::new(spec.field_rules(), spec.cross_rules());
        raw_rows
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| validator.validate(raw, idx + 1))
            .collect()
    }

    /// 校验行集合折叠为预览
    async fn build_preview(
        &self,
        spec: &dyn ImportSpec,
        raw_rows: Vec<RawRow>,
    ) -> ImportPreview {
        let limit = self
            .config
            .preview_row_limit()
            .await
            .unwrap_or(DEFAULT_PREVIEW_ROW_LIMIT);

        let validated = Self::validate_rows(spec, raw_rows);
        let parsed = validated.len();
        let valid = validated.iter().filter(|r| r.is_valid).count();

        ImportPreview {
            rows: validated.into_iter().take(limit).collect(),
            parsed,
            valid,
            invalid: parsed - valid,
        }
    }

    /// 写入单个分组：解析/创建父实体，再批量写入子记录
    async fn persist_group(
        &self,
        spec: &dyn ImportSpec,
        group: &RowGroup,
        existing_keys: &HashSet<String>,
        chunk_size: usize,
    ) -> anyhow::Result<GroupOutcome> {
        let key = group.parent_key.as_str();
        let already_exists = existing_keys.contains(key);

        // === 父实体 ===
        match spec.parent_conflict() {
            ParentConflict::Reuse => {
                if already_exists {
                    // 远程已有同键父实体，复用其标识，不重复创建
                    debug!(parent_key = key, "父实体已存在，复用");
                } else {
                    let payload = spec.build_parent(group)?;
                    self.repo.insert(spec.parent_table(), payload).await?;
                }
            }
            ParentConflict::Merge => {
                let payload = spec.build_parent(group)?;
                self.repo
                    .upsert_many(
                        spec.parent_table(),
                        vec![payload],
                        spec.parent_key_column(),
                    )
                    .await?;
            }
        }

        // === 子记录 ===
        // 一组一次批量写；超过分片上限时按片提交
        let mut children_written = 0;
        if let Some(child_table) = spec.child_table() {
            let children = spec.build_children(group, key)?;
            for chunk in children.chunks(chunk_size.max(1)) {
                children_written += self
                    .repo
                    .upsert_many(child_table, chunk.to_vec(), spec.child_conflict_column())
                    .await?;
            }
        }

        Ok(GroupOutcome {
            parent_created: !already_exists,
            children_written,
        })
    }

    /// 核心运行：校验 → 分组 → 预解析 → 逐组写入 → 汇总
    async fn run(
        &self,
        spec: &dyn ImportSpec,
        raw_rows: Vec<RawRow>,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<ImportResult, ImportError> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4().to_string();

        info!(
            run_id = %run_id,
            entity = spec.entity_name(),
            rows = raw_rows.len(),
            "开始批量导入"
        );

        // === 步骤 1: 逐行校验 ===
        debug!("步骤 1: 逐行校验");
        let validated = Self::validate_rows(spec, raw_rows);
        let parsed = validated.len();
        let (valid_rows, invalid_rows): (Vec<ValidatedRow>, Vec<ValidatedRow>) =
            validated.into_iter().partition(|r| r.is_valid);
        let valid = valid_rows.len();
        let invalid = invalid_rows.len();
        info!(valid = valid, invalid = invalid, "行校验完成");

        // === 步骤 2: 按父键分组 ===
        debug!("步骤 2: 按父键分组");
        let groups = group_rows(valid_rows, |raw| group_key(spec, raw));
        let total_groups = groups.len();
        info!(groups = total_groups, "分组完成");

        // === 步骤 3: 预解析远程已有父键 ===
        // 在任何分组写入前一次性批量查询；此处传输/认证失败中止整次运行
        debug!("步骤 3: 预解析已有父键");
        let keys: Vec<String> = groups.iter().map(|g| g.parent_key.clone()).collect();
        let existing_keys: HashSet<String> = self
            .repo
            .select_keys_in(spec.parent_table(), spec.parent_key_column(), &keys)
            .await
            .map_err(|e| {
                warn!(run_id = %run_id, error = %e, "父键预解析失败，运行中止");
                ImportError::from(e)
            })?
            .into_iter()
            .collect();
        debug!(existing = existing_keys.len(), "父键预解析完成");

        // === 步骤 4: 逐组串行写入 ===
        debug!("步骤 4: 逐组串行写入");
        let chunk_size = self
            .config
            .child_chunk_size()
            .await
            .unwrap_or(DEFAULT_CHILD_CHUNK_SIZE);

        let mut stats = RunStats::new(parsed, valid, invalid);
        let mut processed = 0;

        for group in &groups {
            // 组间边界检查取消请求；已发出的远程调用不回滚
            if cancel.is_cancelled() {
                warn!(
                    run_id = %run_id,
                    remaining = total_groups - processed,
                    "导入被取消，剩余分组未写入"
                );
                for remaining in groups.iter().skip(processed) {
                    stats.record_failure(
                        &remaining.parent_key,
                        crate::i18n::t("import.cancelled"),
                    );
                }
                break;
            }

            match self
                .persist_group(spec, group, &existing_keys, chunk_size)
                .await
            {
                Ok(outcome) => {
                    if outcome.parent_created {
                        stats.parents_created += 1;
                    } else {
                        stats.parents_reused += 1;
                    }
                    stats.children_created += outcome.children_written;
                }
                Err(e) => {
                    // 单组失败记入结果，继续处理后续分组
                    warn!(
                        run_id = %run_id,
                        parent_key = %group.parent_key,
                        error = %e,
                        "分组持久化失败"
                    );
                    stats.record_failure(&group.parent_key, e.to_string());
                }
            }

            processed += 1;
            sink.on_progress(ImportProgress::new(processed, total_groups));
        }

        // === 步骤 5: 固化结果 ===
        let result = stats.into_result(run_id.clone(), spec, start_time.elapsed());
        info!(
            run_id = %run_id,
            parents_created = result.parents_created,
            parents_reused = result.parents_reused,
            children_created = result.children_created,
            failed_groups = result.failed_groups.len(),
            elapsed_ms = result.elapsed_time.as_millis() as u64,
            "批量导入完成"
        );

        Ok(result)
    }
}

#[async_trait::async_trait]
impl<R, C> BulkImporter for BulkImporterImpl<R, C>
where
    R: RemoteTableApi + Send + Sync,
    C: ImportConfigReader + Send + Sync,
{
    async fn preview_file(
        &self,
        file_path: &Path,
        spec: &dyn ImportSpec,
    ) -> Result<ImportPreview, ImportError> {
        let raw_rows = UniversalTableReader::read(file_path, spec.required_columns())?;
        Ok(self.build_preview(spec, raw_rows).await)
    }

    async fn preview_str(
        &self,
        text: &str,
        spec: &dyn ImportSpec,
    ) -> Result<ImportPreview, ImportError> {
        let raw_rows = CsvReader::read_str(text, spec.required_columns())?;
        Ok(self.build_preview(spec, raw_rows).await)
    }

    #[instrument(skip(self, file_path, spec, sink, cancel), fields(entity = spec.entity_name()))]
    async fn import_file(
        &self,
        file_path: &Path,
        spec: &dyn ImportSpec,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<ImportResult, ImportError> {
        // 预览与导入分别各自完整读文件（预览只截断展示，不截断导入）
        let raw_rows = UniversalTableReader::read(file_path, spec.required_columns())?;
        self.run(spec, raw_rows, sink, cancel).await
    }

    #[instrument(skip(self, text, spec, sink, cancel), fields(entity = spec.entity_name()))]
    async fn import_str(
        &self,
        text: &str,
        spec: &dyn ImportSpec,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<ImportResult, ImportError> {
        let raw_rows = CsvReader::read_str(text, spec.required_columns())?;
        self.run(spec, raw_rows, sink, cancel).await
    }
}
