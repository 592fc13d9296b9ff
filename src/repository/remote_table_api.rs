// ==========================================
// 服装业务管理系统 - 远程表访问 Trait
// ==========================================
// 职责: 定义导入管道所需的远程表原语（不包含实现）
// 原语: 按唯一键查询 / 插入 / 批量插入 / 按冲突键 upsert
// ==========================================

use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

// ==========================================
// RemoteTableApi Trait
// ==========================================
// 用途: 远程数据平台的表级数据访问
// 实现者: PostgrestTableApi（REST）、测试用内存实现
#[async_trait]
pub trait RemoteTableApi: Send + Sync {
    /// 批量检查唯一键是否已存在
    ///
    /// # 参数
    /// - table: 表名
    /// - key_column: 唯一键列名
    /// - keys: 待检查的键列表
    ///
    /// # 返回
    /// - Ok(Vec<String>): 远程已存在的键子集
    async fn select_keys_in(
        &self,
        table: &str,
        key_column: &str,
        keys: &[String],
    ) -> RepositoryResult<Vec<String>>;

    /// 按唯一键查询单行
    ///
    /// # 返回
    /// - Ok(Some(row)): 命中
    /// - Ok(None): 不存在
    async fn find_by_key(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
    ) -> RepositoryResult<Option<Value>>;

    /// 插入单行
    async fn insert(&self, table: &str, row: Value) -> RepositoryResult<()>;

    /// 批量插入（一次请求）
    ///
    /// # 返回
    /// - Ok(usize): 提交的行数
    async fn insert_many(&self, table: &str, rows: Vec<Value>) -> RepositoryResult<usize>;

    /// 按冲突键批量 upsert（一次请求）
    ///
    /// # 参数
    /// - conflict_column: 自然键列；远程已存在同键行时更新而非重复插入
    async fn upsert_many(
        &self,
        table: &str,
        rows: Vec<Value>,
        conflict_column: &str,
    ) -> RepositoryResult<usize>;
}

// ==========================================
// Arc 转发实现
// ==========================================
// 用途: 多个会话共享同一远程客户端
#[async_trait]
impl<T: RemoteTableApi + ?Sized> RemoteTableApi for Arc<T> {
    async fn select_keys_in(
        &self,
        table: &str,
        key_column: &str,
        keys: &[String],
    ) -> RepositoryResult<Vec<String>> {
        (**self).select_keys_in(table, key_column, keys).await
    }

    async fn find_by_key(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
    ) -> RepositoryResult<Option<Value>> {
        (**self).find_by_key(table, key_column, key).await
    }

    async fn insert(&self, table: &str, row: Value) -> RepositoryResult<()> {
        (**self).insert(table, row).await
    }

    async fn insert_many(&self, table: &str, rows: Vec<Value>) -> RepositoryResult<usize> {
        (**self).insert_many(table, rows).await
    }

    async fn upsert_many(
        &self,
        table: &str,
        rows: Vec<Value>,
        conflict_column: &str,
    ) -> RepositoryResult<usize> {
        (**self).upsert_many(table, rows, conflict_column).await
    }
}
