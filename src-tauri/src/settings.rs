use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::models::AppSettings;

/// 应用配置管理（settings.json），只在启动时读取
pub struct SettingsManager {
    path: PathBuf,
    data: AppSettings,
}

impl SettingsManager {
    /// 读取配置；文件不存在时写入默认配置，文件损坏时使用默认值
    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => {
                serde_json::from_slice::<AppSettings>(&bytes).unwrap_or_else(|e| {
                    warn!("配置文件解析失败，使用默认配置: {}", e);
                    AppSettings::default()
                })
            }
            Ok(_) => Self::write_defaults(&path).await?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::write_defaults(&path).await?,
            // 文件存在但无法读取时不覆盖
            Err(e) => {
                warn!("配置文件读取失败，使用默认配置: {:?}: {}", path, e);
                AppSettings::default()
            }
        };

        Ok(Self {
            path,
            data: initial,
        })
    }

    async fn write_defaults(path: &Path) -> Result<AppSettings> {
        let default = AppSettings::default();
        let json = serde_json::to_string_pretty(&default)?;
        tokio::fs::write(path, json).await?;
        info!("已写入默认配置: {:?}", path);
        Ok(default)
    }

    pub fn get(&self) -> &AppSettings {
        &self.data
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
