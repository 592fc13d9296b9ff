// ==========================================
// 服装业务管理系统 - 数据仓储层
// ==========================================
// 职责: 远程数据平台访问（表 CRUD + 对象存储）
// 红线: Repository 不含业务规则，只做数据读写
// ==========================================

pub mod error;
pub mod object_storage;
pub mod postgrest_api;
pub mod remote_table_api;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use object_storage::{BucketStorage, ObjectStorage};
pub use postgrest_api::PostgrestTableApi;
pub use remote_table_api::RemoteTableApi;
