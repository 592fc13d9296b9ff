// ==========================================
// 服装业务管理系统 - 领域共享类型
// ==========================================
// 职责: 导入管道的状态枚举与控制原语
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ==========================================
// ImportPhase - 导入对话框状态机
// ==========================================
// 转换: Idle → FileSelected → Parsed → Previewing → Importing
//       → Completed | Aborted
// 红线: Importing 一定以 Completed 结束（带结果对象），不允许静默悬挂
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportPhase {
    Idle,         // 未选择文件
    FileSelected, // 已选择文件（解析随即触发）
    Parsed,       // 解析完成，行已校验
    Previewing,   // 用户正在预览前 K 行
    Importing,    // 逐组写入远程表
    Completed,    // 导入结束（结果可读）
    Aborted,      // 对话框在 Importing 之前关闭，临时实体已丢弃
}

impl ImportPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportPhase::Idle => "Idle",
            ImportPhase::FileSelected => "FileSelected",
            ImportPhase::Parsed => "Parsed",
            ImportPhase::Previewing => "Previewing",
            ImportPhase::Importing => "Importing",
            ImportPhase::Completed => "Completed",
            ImportPhase::Aborted => "Aborted",
        }
    }
}

// ==========================================
// ParentConflict - 父实体键冲突策略
// ==========================================
// Reuse: 远程已存在同键父实体时直接复用其标识（不写入）
// Merge: 以冲突键 upsert，远程已存在时更新字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentConflict {
    Reuse,
    Merge,
}

// ==========================================
// CancelToken - 导入取消令牌
// ==========================================
// 用途: 宿主 UI 在组间边界请求停止逐组写入
// 说明: 只在组与组之间检查，已发出的远程调用不会被中断
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消（幂等）
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
