//! 应用程序初始化和启动
//!
//! 负责 Tauri 应用的完整启动流程，包括：
//! - 日志系统初始化
//! - 配置读取与数据库路径解析
//! - 启动时一次性加载数据
//! - Tauri Builder 配置
//! - 命令注册

use tauri::Manager;
use tracing::{error, info, warn};

use crate::commands::*;
use crate::logger;
use crate::storage::StoreConfig;
use crate::AppState;

/// 应用程序入口点
///
/// 初始化并启动 Tauri 应用，包含以下步骤：
/// 1. 日志系统初始化
/// 2. 应用配置目录与可执行文件目录解析
/// 3. 读取配置、加载数据
/// 4. Tauri 命令注册
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // guard 需要在整个运行期间存活
    let _log_guard = match logger::init(&logger::log_dir()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("日志系统初始化失败: {}", e);
            None
        }
    };

    tauri::Builder::default()
        .setup(|app| {
            info!("初始化 ICT 仪表盘...");

            let config_dir = app.path().app_config_dir()?;
            let base_dir = StoreConfig::executable_dir()?;

            let state = tauri::async_runtime::block_on(AppState::initialize(&config_dir, &base_dir))
                .map_err(|e| {
                    error!("应用状态初始化失败: {}", e);
                    e
                })?;

            let status = state.storage_domain.get_status();
            if status.loaded {
                info!("数据库已加载: {}", status.path);
            } else {
                warn!(
                    "数据库加载失败，页面将显示错误: {}",
                    status.error.as_deref().unwrap_or_default()
                );
            }

            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            render_dashboard,
            get_default_inputs,
            get_store_status,
            get_app_config,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
