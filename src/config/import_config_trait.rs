// ==========================================
// 服装业务管理系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的调优参数读取接口
// 实现者: ConfigManager
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取预览行数上限
    ///
    /// # 返回
    /// - usize: 预览表格展示的最大数据行数
    ///
    /// # 默认值
    /// - 4
    async fn preview_row_limit(&self) -> Result<usize, Box<dyn Error>>;

    /// 获取子记录单次写入分片大小
    ///
    /// # 返回
    /// - usize: 一次批量写请求包含的最大子记录数
    ///
    /// # 默认值
    /// - 500
    ///
    /// # 用途
    /// - 控制单次请求负载，避免超过远程平台的请求体限制
    async fn child_chunk_size(&self) -> Result<usize, Box<dyn Error>>;
}
