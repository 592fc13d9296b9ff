// ==========================================
// 服装业务管理系统 - API层错误类型
// ==========================================
// 职责: 将导入层/仓储层错误转换为面向 UI 的错误
// ==========================================

use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 业务规则错误 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ===== 导入错误 =====
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ===== 远程访问错误 =====
    #[error("远程平台访问失败: {0}")]
    TransportError(String),

    #[error("对象存储访问失败: {0}")]
    StorageError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ImportError 转换
// 目的: 将导入层错误转换为用户可理解的业务错误
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            // 表头契约失败属于用户数据问题
            ImportError::MissingColumns(_) => ApiError::ValidationError(err.to_string()),
            ImportError::Transport(msg) => ApiError::TransportError(msg),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Transport(msg) => ApiError::TransportError(msg),
            RepositoryError::AuthFailed(msg) => ApiError::TransportError(msg),
            RepositoryError::StorageRejected { .. } => ApiError::StorageError(err.to_string()),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(e) => ApiError::Other(e),
            other => ApiError::TransportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
