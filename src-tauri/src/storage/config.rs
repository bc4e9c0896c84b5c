// 存储配置定义

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 默认数据库文件名（与可执行文件放在同一目录）
pub const DEFAULT_DB_FILE: &str = "ict_analysis.db";

/// 宏观经济与 ICT 数据表
pub const MACRO_TABLE: &str = "macro_ict_data";
/// 预测结果表
pub const FORECAST_TABLE: &str = "forecast_results";
/// 指标说明表
pub const DESCRIPTION_TABLE: &str = "indicator_description";

/// 数据库读取配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// 数据库文件路径
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// 根据设置中的覆盖路径解析数据库位置
    ///
    /// 相对路径以 `base_dir`（可执行文件所在目录）为基准
    pub fn resolve(override_path: Option<&str>, base_dir: &Path) -> Self {
        let db_path = match override_path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) if Path::new(path).is_absolute() => PathBuf::from(path),
            Some(path) => base_dir.join(path),
            None => base_dir.join(DEFAULT_DB_FILE),
        };
        Self { db_path }
    }

    /// 可执行文件所在目录
    pub fn executable_dir() -> Result<PathBuf> {
        let exe = std::env::current_exe().context("无法获取可执行文件路径")?;
        exe.parent()
            .map(Path::to_path_buf)
            .context("可执行文件没有父目录")
    }

    pub fn display_path(&self) -> String {
        self.db_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_next_to_executable() {
        let config = StoreConfig::resolve(None, Path::new("/opt/ict"));
        assert_eq!(config.db_path, PathBuf::from("/opt/ict/ict_analysis.db"));
    }

    #[test]
    fn test_resolve_relative_override() {
        let config = StoreConfig::resolve(Some("data/other.db"), Path::new("/opt/ict"));
        assert_eq!(config.db_path, PathBuf::from("/opt/ict/data/other.db"));
    }

    #[test]
    fn test_resolve_blank_override_uses_default() {
        let config = StoreConfig::resolve(Some("   "), Path::new("/opt/ict"));
        assert_eq!(config.db_path, PathBuf::from("/opt/ict/ict_analysis.db"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_absolute_override() {
        let config = StoreConfig::resolve(Some("/srv/ict.db"), Path::new("/opt/ict"));
        assert_eq!(config.db_path, PathBuf::from("/srv/ict.db"));
    }
}
