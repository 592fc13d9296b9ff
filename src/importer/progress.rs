// ==========================================
// 服装业务管理系统 - 进度与结果汇报
// ==========================================
// 职责: 进度事件回调 + 运行计数累积
// 红线: 不使用全局可变进度计数；编排器是唯一写方，
//       UI 通过回调只读消费
// ==========================================

use crate::domain::{FailedGroup, ImportProgress, ImportResult};
use crate::importer::import_spec::ImportSpec;
use chrono::Utc;
use std::sync::Mutex;
use std::time::Duration;

// ==========================================
// ProgressSink Trait
// ==========================================
// 用途: 每个分组结束（无论成败）后接收一次进度事件
// 实现者: 宿主 UI 的进度条适配、测试用收集器
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, progress: ImportProgress);
}

/// 丢弃进度事件（无进度条的调用场景）
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_progress(&self, _progress: ImportProgress) {}
}

/// 收集全部进度事件，测试断言用
#[derive(Default)]
pub struct CollectingProgress {
    events: Mutex<Vec<ImportProgress>>,
}

impl CollectingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ImportProgress> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl ProgressSink for CollectingProgress {
    fn on_progress(&self, progress: ImportProgress) {
        if let Ok(mut events) = self.events.lock() {
            events.push(progress);
        }
    }
}

// ==========================================
// RunStats - 运行计数累积器
// ==========================================
// 生命周期: 仅在一次导入运行内；运行结束转换为不可变 ImportResult
#[derive(Debug, Default)]
pub struct RunStats {
    pub parsed: usize,
    pub valid: usize,
    pub invalid: usize,
    pub parents_created: usize,
    pub parents_reused: usize,
    pub children_created: usize,
    pub failed_groups: Vec<FailedGroup>,
}

impl RunStats {
    pub fn new(parsed: usize, valid: usize, invalid: usize) -> Self {
        Self {
            parsed,
            valid,
            invalid,
            ..Self::default()
        }
    }

    /// 记录一个持久化失败的分组
    pub fn record_failure(&mut self, parent_key: &str, error: String) {
        self.failed_groups.push(FailedGroup {
            parent_key: parent_key.to_string(),
            error,
        });
    }

    /// 固化为最终结果
    pub fn into_result(
        self,
        run_id: String,
        spec: &dyn ImportSpec,
        elapsed_time: Duration,
    ) -> ImportResult {
        ImportResult {
            run_id,
            entity: spec.entity_name().to_string(),
            entity_plural: spec.entity_plural().to_string(),
            child_plural: spec.child_plural().map(str::to_string),
            parsed: self.parsed,
            valid: self.valid,
            invalid: self.invalid,
            parents_created: self.parents_created,
            parents_reused: self.parents_reused,
            children_created: self.children_created,
            failed_groups: self.failed_groups,
            completed_at: Utc::now(),
            elapsed_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::specs::FabricImportSpec;

    #[test]
    fn test_collecting_progress_keeps_order() {
        let sink = CollectingProgress::new();
        sink.on_progress(ImportProgress::new(1, 2));
        sink.on_progress(ImportProgress::new(2, 2));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(events[0].percent < events[1].percent);
    }

    #[test]
    fn test_into_result_carries_labels_and_counts() {
        let mut stats = RunStats::new(5, 4, 1);
        stats.parents_created = 2;
        stats.children_created = 4;
        stats.record_failure("LINEN", "remote rejected".to_string());

        let result = stats.into_result(
            "run-1".to_string(),
            &FabricImportSpec,
            Duration::from_millis(10),
        );

        assert_eq!(result.entity, "fabric");
        assert_eq!(result.child_plural.as_deref(), Some("variants"));
        assert_eq!(result.parsed, 5);
        assert_eq!(result.failed_groups.len(), 1);
        assert!(!result.is_clean());
    }
}
