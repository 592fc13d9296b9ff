// ==========================================
// 服装业务管理系统 - 配置管理器
// ==========================================
// 职责: 远程端点配置加载（环境变量 / TOML 文件）+ 导入调优参数
// 优先级: 显式构造 > 环境变量 > 用户配置目录下的 config.toml
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};

// ===== 默认值 =====
const DEFAULT_PREVIEW_ROW_LIMIT: usize = 4;
const DEFAULT_CHILD_CHUNK_SIZE: usize = 500;
const DEFAULT_IMAGE_BUCKET: &str = "fabric";
const DEFAULT_AVATAR_BUCKET: &str = "avatars";

// ===== 环境变量 =====
const ENV_BASE_URL: &str = "MASTERS_API_URL";
const ENV_API_KEY: &str = "MASTERS_API_KEY";

// ==========================================
// RemoteConfig - 远程数据平台端点
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String, // 平台根地址（如 https://xyz.example.co）
    pub api_key: String,  // 服务密钥（apikey + Bearer）

    #[serde(default = "default_image_bucket")]
    pub image_bucket: String, // 面料/商品图片桶
    #[serde(default = "default_avatar_bucket")]
    pub avatar_bucket: String, // 客户头像桶
}

fn default_image_bucket() -> String {
    DEFAULT_IMAGE_BUCKET.to_string()
}

fn default_avatar_bucket() -> String {
    DEFAULT_AVATAR_BUCKET.to_string()
}

// ==========================================
// ConfigFile - config.toml 结构
// ==========================================
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    remote: RemoteConfig,
    #[serde(default)]
    import: ImportTuning,
}

#[derive(Debug, Clone, Deserialize)]
struct ImportTuning {
    #[serde(default = "default_preview_limit")]
    preview_row_limit: usize,
    #[serde(default = "default_chunk_size")]
    child_chunk_size: usize,
}

impl Default for ImportTuning {
    fn default() -> Self {
        Self {
            preview_row_limit: DEFAULT_PREVIEW_ROW_LIMIT,
            child_chunk_size: DEFAULT_CHILD_CHUNK_SIZE,
        }
    }
}

fn default_preview_limit() -> usize {
    DEFAULT_PREVIEW_ROW_LIMIT
}

fn default_chunk_size() -> usize {
    DEFAULT_CHILD_CHUNK_SIZE
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    remote: RemoteConfig,
    tuning: ImportTuning,
}

impl ConfigManager {
    /// 由显式远程配置创建（调优参数取默认值）
    pub fn new(remote: RemoteConfig) -> Self {
        Self {
            remote,
            tuning: ImportTuning::default(),
        }
    }

    /// 从环境变量加载；缺失时回退到用户配置目录下的 config.toml
    pub fn load() -> Result<Self, Box<dyn Error>> {
        match (std::env::var(ENV_BASE_URL), std::env::var(ENV_API_KEY)) {
            (Ok(base_url), Ok(api_key)) => Ok(Self::new(RemoteConfig {
                base_url,
                api_key,
                image_bucket: default_image_bucket(),
                avatar_bucket: default_avatar_bucket(),
            })),
            _ => {
                let path = Self::default_config_path()
                    .ok_or_else(|| format!("未设置 {}/{}，且无法定位用户配置目录", ENV_BASE_URL, ENV_API_KEY))?;
                Self::from_file(&path)
            }
        }
    }

    /// 从 TOML 配置文件加载
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("配置文件读取失败 ({}): {}", path.display(), e))?;
        let file: ConfigFile = toml::from_str(&raw)?;
        Ok(Self {
            remote: file.remote,
            tuning: file.import,
        })
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("masters-import").join("config.toml"))
    }

    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn preview_row_limit(&self) -> Result<usize, Box<dyn Error>> {
        Ok(self.tuning.preview_row_limit.max(1))
    }

    async fn child_chunk_size(&self) -> Result<usize, Box<dyn Error>> {
        Ok(self.tuning.child_chunk_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn remote_fixture() -> RemoteConfig {
        RemoteConfig {
            base_url: "https://demo.example.co".to_string(),
            api_key: "key".to_string(),
            image_bucket: default_image_bucket(),
            avatar_bucket: default_avatar_bucket(),
        }
    }

    #[tokio::test]
    async fn test_defaults() {
        let config = ConfigManager::new(remote_fixture());
        assert_eq!(config.preview_row_limit().await.unwrap(), 4);
        assert_eq!(config.child_chunk_size().await.unwrap(), 500);
    }

    #[tokio::test]
    async fn test_from_file_overrides_tuning() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[remote]").unwrap();
        writeln!(temp_file, "base_url = \"https://demo.example.co\"").unwrap();
        writeln!(temp_file, "api_key = \"secret\"").unwrap();
        writeln!(temp_file, "[import]").unwrap();
        writeln!(temp_file, "preview_row_limit = 10").unwrap();
        writeln!(temp_file, "child_chunk_size = 50").unwrap();

        let config = ConfigManager::from_file(temp_file.path()).unwrap();
        assert_eq!(config.remote().api_key, "secret");
        assert_eq!(config.remote().image_bucket, "fabric");
        assert_eq!(config.preview_row_limit().await.unwrap(), 10);
        assert_eq!(config.child_chunk_size().await.unwrap(), 50);
    }

    #[test]
    fn test_from_file_missing() {
        let result = ConfigManager::from_file(Path::new("non_existent_config.toml"));
        assert!(result.is_err());
    }
}
