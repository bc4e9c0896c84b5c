// ICT 分析与预测仪表盘 - Tauri应用主库

// 声明模块
#[cfg(feature = "desktop")]
pub mod app;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod domains;
pub mod error;
pub mod logger;
pub mod models;
pub mod presentation;
pub mod scenario;
pub mod settings;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use domains::{DashboardDomain, StorageDomain};
use presentation::RenderContext;
use scenario::ScenarioCoefficients;
use settings::SettingsManager;
use storage::StoreConfig;

#[cfg(feature = "desktop")]
pub use app::run;
pub use error::DashboardError;

/// 应用状态（按领域分组）
///
/// - 存储领域：启动时加载的只读数据快照
/// - 仪表盘领域：回归系数与渲染参数
/// - 设置：启动时读取的配置
#[derive(Clone)]
pub struct AppState {
    /// 存储领域管理器
    pub storage_domain: Arc<StorageDomain>,
    /// 仪表盘领域管理器
    pub dashboard_domain: Arc<DashboardDomain>,
    /// 设置管理器
    pub settings: Arc<SettingsManager>,
}

impl AppState {
    /// 读取配置、加载数据并构造应用状态
    ///
    /// 数据加载失败不会中断启动，错误保存在存储领域中，由页面展示
    pub async fn initialize(config_dir: &Path, base_dir: &Path) -> anyhow::Result<Self> {
        let settings = SettingsManager::new(config_dir.join("settings.json")).await?;
        let app_settings = settings.get().clone();
        info!("配置已加载: {:?}", settings.path());

        let store_config = StoreConfig::resolve(app_settings.database_path.as_deref(), base_dir);
        let storage_domain = StorageDomain::load(store_config).await;

        let dashboard_domain = DashboardDomain::new(
            ScenarioCoefficients::default(),
            RenderContext::from_settings(&app_settings),
        );

        Ok(Self {
            storage_domain: Arc::new(storage_domain),
            dashboard_domain: Arc::new(dashboard_domain),
            settings: Arc::new(settings),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{ScenarioInput, WidgetValues};
    use crate::storage::fixtures;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_initialize_resolves_store_next_to_base_dir() {
        let temp_dir = tempdir().unwrap();
        fixtures::write_sample_store(temp_dir.path()).await;

        let state = AppState::initialize(&temp_dir.path().join("config"), temp_dir.path())
            .await
            .unwrap();

        assert!(state.storage_domain.get_status().loaded);
        let data = state.storage_domain.get_data().unwrap();
        let defaults = ScenarioInput::default();
        let response = state
            .dashboard_domain
            .render(Ok(data.as_ref()), &WidgetValues::from(&defaults), &defaults)
            .unwrap();
        assert_eq!(response.page.panels.len(), 3);
    }

    #[tokio::test]
    async fn test_initialize_without_store_still_starts() {
        let temp_dir = tempdir().unwrap();

        let state = AppState::initialize(&temp_dir.path().join("config"), temp_dir.path())
            .await
            .unwrap();

        let status = state.storage_domain.get_status();
        assert!(!status.loaded);
        assert!(matches!(
            state.storage_domain.get_data(),
            Err(DashboardError::StoreUnavailable { .. })
        ));
    }
}
