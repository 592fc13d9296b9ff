// ==========================================
// 服装业务管理系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 传输层错误 =====
    #[error("网络传输失败: {0}")]
    Transport(String),

    #[error("远程认证失败: {0}")]
    AuthFailed(String),

    // ===== 远程表错误 =====
    #[error("远程表 {table} 拒绝写入 (HTTP {status}): {message}")]
    RemoteRejected {
        table: String,
        status: u16,
        message: String,
    },

    // ===== 对象存储错误 =====
    #[error("对象存储上传失败 (bucket: {bucket}): {message}")]
    StorageRejected { bucket: String, message: String },

    // ===== 数据格式错误 =====
    #[error("响应解析失败: {0}")]
    InvalidResponse(String),

    #[error("序列化失败: {0}")]
    Serialization(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<reqwest::Error>
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            RepositoryError::Transport(err.to_string())
        } else if err.is_decode() {
            RepositoryError::InvalidResponse(err.to_string())
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
