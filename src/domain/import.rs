// ==========================================
// 服装业务管理系统 - 导入管道实体
// ==========================================
// 职责: 一次导入运行期间的中间产物与最终结果
// 生命周期: RawRow/ValidatedRow/RowGroup 仅在单次运行内存活；
//           ImportResult 是唯一可在运行结束后保留的实体
// ==========================================

use crate::i18n;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// 原始行记录（列名 → 单元格文本）
///
/// 解析器保证每个声明列都以 key 存在，缺失单元格为空字符串
pub type RawRow = HashMap<String, String>;

// ==========================================
// ValidatedRow - 校验后的行
// ==========================================
// 不变式: is_valid == errors.is_empty()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedRow {
    pub raw: RawRow,
    pub row_number: usize, // 数据行号（表头为第 0 行，数据从 1 起）
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidatedRow {
    /// 由校验错误列表构造，保证不变式成立
    pub fn new(raw: RawRow, row_number: usize, errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            raw,
            row_number,
            errors,
        }
    }

    /// 预览表格中展示的错误串（多条错误以分号拼接）
    pub fn error_text(&self) -> String {
        self.errors.join("; ")
    }
}

// ==========================================
// RowGroup - 父键分组
// ==========================================
// 不变式: 组内所有行共享同一 parent_key；组序 = 文件中首次出现序
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowGroup {
    pub parent_key: String,
    pub rows: Vec<ValidatedRow>,
}

// ==========================================
// FailedGroup - 持久化失败的分组
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedGroup {
    pub parent_key: String,
    pub error: String,
}

// ==========================================
// ImportProgress - 进度事件
// ==========================================
// 每个分组结束（无论成败）后由编排器发出一次
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImportProgress {
    pub groups_processed: usize,
    pub total_groups: usize,
    pub percent: f64,
}

impl ImportProgress {
    pub fn new(groups_processed: usize, total_groups: usize) -> Self {
        let percent = if total_groups == 0 {
            100.0
        } else {
            (groups_processed as f64 / total_groups as f64) * 100.0
        };
        Self {
            groups_processed,
            total_groups,
            percent,
        }
    }
}

// ==========================================
// ImportResult - 导入结果
// ==========================================
// 用途: 导入接口返回值，运行结束后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub run_id: String,            // 运行 ID（UUID）
    pub entity: String,            // 父实体单数标签（如 "fabric"）
    pub entity_plural: String,     // 父实体复数标签（如 "fabrics"）
    pub child_plural: Option<String>, // 子实体复数标签（平面实体为 None）
    pub parsed: usize,             // 解析出的数据行数
    pub valid: usize,              // 通过校验的行数
    pub invalid: usize,            // 未通过校验的行数
    pub parents_created: usize,    // 新建父实体数
    pub parents_reused: usize,     // 复用/更新的已有父实体数
    pub children_created: usize,   // 写入的子记录数
    pub failed_groups: Vec<FailedGroup>,
    pub completed_at: DateTime<Utc>,
    pub elapsed_time: Duration,
}

impl ImportResult {
    /// 是否全部分组成功
    pub fn is_clean(&self) -> bool {
        self.failed_groups.is_empty()
    }

    /// 本地化的汇总文案，供宿主 UI 直接展示
    pub fn summary(&self) -> String {
        let parents = self.parents_created.to_string();
        let children = self.children_created.to_string();
        let rows = self.parsed.to_string();

        let mut text = match &self.child_plural {
            Some(child) => i18n::t_with_args(
                "import.summary",
                &[
                    ("parents", &parents),
                    ("entity", &self.entity_plural),
                    ("children", &children),
                    ("child", child),
                    ("rows", &rows),
                ],
            ),
            None => i18n::t_with_args(
                "import.summary_flat",
                &[
                    ("parents", &parents),
                    ("entity", &self.entity_plural),
                    ("rows", &rows),
                ],
            ),
        };

        if !self.failed_groups.is_empty() {
            let failed = self.failed_groups.len().to_string();
            text.push_str(&i18n::t_with_args(
                "import.summary_failed_suffix",
                &[("failed", &failed)],
            ));
        }

        text
    }

    /// 每个失败分组一行的本地化错误文案
    pub fn failure_lines(&self) -> Vec<String> {
        self.failed_groups
            .iter()
            .map(|f| {
                i18n::t_with_args(
                    "import.group_error",
                    &[
                        ("entity", &self.entity),
                        ("key", &f.parent_key),
                        ("message", &f.error),
                    ],
                )
            })
            .collect()
    }
}
