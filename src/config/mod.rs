// ==========================================
// 服装业务管理系统 - 配置层
// ==========================================
// 职责: 远程端点配置 + 导入调优参数
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心类型
pub use config_manager::{ConfigManager, RemoteConfig};
pub use import_config_trait::ImportConfigReader;
