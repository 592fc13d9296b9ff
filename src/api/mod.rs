// ==========================================
// 服装业务管理系统 - API 层
// ==========================================
// 职责: 面向宿主 UI 的业务接口与对话框状态机
// ==========================================

pub mod error;
pub mod import_api;
pub mod import_session;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse};
pub use import_session::ImportSession;
