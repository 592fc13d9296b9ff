// ==========================================
// 服装业务管理系统 - 对象存储访问
// ==========================================
// 职责: 图片等二进制文件上传，返回公开访问 URL
// 说明: 导入管道本身不依赖存储；图片列由宿主 UI 机会性上传
// ==========================================

use crate::config::RemoteConfig;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;

const UPLOAD_TIMEOUT_SECS: u64 = 60;

// ==========================================
// ObjectStorage Trait
// ==========================================
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// 上传二进制对象
    ///
    /// # 参数
    /// - bucket: 存储桶名
    /// - path: 桶内路径（如 "main_COTTON_1700000000.jpg"）
    /// - bytes: 文件内容
    /// - content_type: MIME 类型
    ///
    /// # 返回
    /// - Ok(String): 公开可解析的 URL
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> RepositoryResult<String>;
}

// ==========================================
// BucketStorage - 存储服务 REST 实现
// ==========================================
pub struct BucketStorage {
    client: reqwest::Client,
    base_url: String,
}

impl BucketStorage {
    pub fn new(config: &RemoteConfig) -> RepositoryResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| RepositoryError::InternalError(format!("api_key 非法: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| RepositoryError::InternalError(format!("api_key 非法: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }
}

#[async_trait]
impl ObjectStorage for BucketStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> RepositoryResult<String> {
        debug!(bucket = bucket, path = path, size = bytes.len(), "上传对象");

        let response = self
            .client
            .post(self.object_url(bucket, path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::StorageRejected {
                bucket: bucket.to_string(),
                message: format!("HTTP {}: {}", status.as_u16(), body),
            });
        }

        Ok(self.public_url(bucket, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_shape() {
        let config = RemoteConfig {
            base_url: "https://demo.example.co".to_string(),
            api_key: "key".to_string(),
            image_bucket: "fabric".to_string(),
            avatar_bucket: "avatars".to_string(),
        };
        let storage = BucketStorage::new(&config).unwrap();
        assert_eq!(
            storage.public_url("fabric", "main_COTTON_1.jpg"),
            "https://demo.example.co/storage/v1/object/public/fabric/main_COTTON_1.jpg"
        );
    }
}
