// ==========================================
// 服装业务管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

fn join_columns(columns: &[String]) -> String {
    columns.join(", ")
}

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    // ===== 表头契约错误 =====
    // 必需列缺失时整次运行在任何行处理前中止
    #[error("缺少必需列: {}", join_columns(.0))]
    MissingColumns(Vec<String>),

    // ===== 运行级错误 =====
    // 逐组写入开始前的传输/认证失败，中止整次运行；
    // 组内写入失败不会走到这里，而是记入结果的 failed_groups
    #[error("远程平台不可达: {0}")]
    Transport(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<RepositoryError>
// 网络失败与认证失败在运行级统一视为传输错误
impl From<RepositoryError> for ImportError {
    fn from(err: RepositoryError) -> Self {
        ImportError::Transport(err.to_string())
    }
}

/// Result 类型别名
pub type ImportPipelineResult<T> = Result<T, ImportError>;
