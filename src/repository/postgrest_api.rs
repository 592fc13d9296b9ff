// ==========================================
// 服装业务管理系统 - 远程表访问实现 (REST)
// ==========================================
// 职责: 通过数据平台的 PostgREST 风格接口实现 RemoteTableApi
// 约定: /rest/v1/{table}，apikey + Bearer 认证
// ==========================================

use crate::config::RemoteConfig;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::remote_table_api::RemoteTableApi;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

// 单次远程调用超时；挂死的网络调用不允许无限期阻塞进度
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct PostgrestTableApi {
    client: reqwest::Client,
    base_url: String,
}

impl PostgrestTableApi {
    /// 创建新的 PostgrestTableApi 实例
    ///
    /// # 参数
    /// - config: 远程端点配置（base_url + api_key）
    pub fn new(config: &RemoteConfig) -> RepositoryResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| RepositoryError::InternalError(format!("api_key 非法: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| RepositoryError::InternalError(format!("api_key 非法: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// 非 2xx 响应统一转换为仓储错误
    async fn check_status(
        table: &str,
        response: reqwest::Response,
    ) -> RepositoryResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RepositoryError::AuthFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        Err(RepositoryError::RemoteRejected {
            table: table.to_string(),
            status: status.as_u16(),
            message: body,
        })
    }

    /// PostgREST in.(...) 过滤器的值列表（双引号包裹，转义内部引号）
    fn in_filter(keys: &[String]) -> String {
        let quoted: Vec<String> = keys
            .iter()
            .map(|k| format!("\"{}\"", k.replace('"', "\\\"")))
            .collect();
        format!("in.({})", quoted.join(","))
    }
}

#[async_trait]
impl RemoteTableApi for PostgrestTableApi {
    async fn select_keys_in(
        &self,
        table: &str,
        key_column: &str,
        keys: &[String],
    ) -> RepositoryResult<Vec<String>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        debug!(table = table, keys = keys.len(), "批量检查已存在键");
        let response = self
            .client
            .get(self.table_url(table))
            .query(&[
                (key_column, Self::in_filter(keys).as_str()),
                ("select", key_column),
            ])
            .send()
            .await?;
        let response = Self::check_status(table, response).await?;

        let rows: Vec<Value> = response.json().await?;
        let mut existing = Vec::with_capacity(rows.len());
        for row in rows {
            match row.get(key_column).and_then(Value::as_str) {
                Some(key) => existing.push(key.to_string()),
                None => {
                    return Err(RepositoryError::InvalidResponse(format!(
                        "响应行缺少键列 {}",
                        key_column
                    )))
                }
            }
        }
        Ok(existing)
    }

    async fn find_by_key(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
    ) -> RepositoryResult<Option<Value>> {
        let filter = format!("eq.{}", urlencoding::encode(key));
        let response = self
            .client
            .get(self.table_url(table))
            .query(&[(key_column, filter.as_str()), ("select", "*")])
            .send()
            .await?;
        let response = Self::check_status(table, response).await?;

        let mut rows: Vec<Value> = response.json().await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    async fn insert(&self, table: &str, row: Value) -> RepositoryResult<()> {
        self.insert_many(table, vec![row]).await?;
        Ok(())
    }

    async fn insert_many(&self, table: &str, rows: Vec<Value>) -> RepositoryResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let count = rows.len();
        debug!(table = table, rows = count, "批量插入");
        let response = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await?;
        Self::check_status(table, response).await?;
        Ok(count)
    }

    async fn upsert_many(
        &self,
        table: &str,
        rows: Vec<Value>,
        conflict_column: &str,
    ) -> RepositoryResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let count = rows.len();
        debug!(table = table, rows = count, conflict = conflict_column, "批量 upsert");
        let response = self
            .client
            .post(self.table_url(table))
            .query(&[("on_conflict", conflict_column)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&rows)
            .send()
            .await?;
        Self::check_status(table, response).await?;
        Ok(count)
    }
}
