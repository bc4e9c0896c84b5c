// 存储领域管理器
//
// 负责数据库配置和启动时加载的数据快照
// 加载只在启动时进行一次，结果（数据或致命错误）在整个会话内复用

use std::sync::Arc;

use crate::error::DashboardError;
use crate::models::StoreStatus;
use crate::storage::{DashboardData, Database, StoreConfig};

/// 存储领域管理器 - 负责数据快照
pub struct StorageDomain {
    config: StoreConfig,
    data: Result<Arc<DashboardData>, DashboardError>,
}

impl StorageDomain {
    /// 读取数据库并创建存储领域管理器
    pub async fn load(config: StoreConfig) -> Self {
        let data = Database::load(&config).await.map(Arc::new);
        Self { config, data }
    }

    /// 获取数据快照；加载失败时返回同一个致命错误
    pub fn get_data(&self) -> Result<Arc<DashboardData>, DashboardError> {
        self.data.clone()
    }

    /// 获取数据库状态
    pub fn get_status(&self) -> StoreStatus {
        match &self.data {
            Ok(data) => StoreStatus {
                path: self.config.display_path(),
                loaded: true,
                macro_rows: data.macro_table.row_count(),
                forecast_rows: data.forecast_table.row_count(),
                description_rows: data.description_table.row_count(),
                error: None,
            },
            Err(e) => StoreStatus {
                path: self.config.display_path(),
                loaded: false,
                macro_rows: 0,
                forecast_rows: 0,
                description_rows: 0,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_status_after_successful_load() {
        let temp_dir = tempdir().unwrap();
        let path = fixtures::write_sample_store(temp_dir.path()).await;

        let domain = StorageDomain::load(StoreConfig::new(&path)).await;
        let status = domain.get_status();
        assert!(status.loaded);
        assert_eq!(status.macro_rows, 15);
        assert_eq!(status.forecast_rows, 7);
        assert_eq!(status.description_rows, 3);
        assert!(domain.get_data().is_ok());
    }

    #[tokio::test]
    async fn test_load_failure_is_kept_for_the_session() {
        let temp_dir = tempdir().unwrap();
        let domain = StorageDomain::load(StoreConfig::new(temp_dir.path().join("none.db"))).await;

        let status = domain.get_status();
        assert!(!status.loaded);
        assert!(status.error.is_some());

        // 每次请求都得到同一个错误，不会重试
        let first = domain.get_data().unwrap_err();
        let second = domain.get_data().unwrap_err();
        assert_eq!(first, second);
    }
}
