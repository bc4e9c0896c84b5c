//! 配置管理命令

use crate::models::AppSettings;
use crate::AppState;

/// 获取应用配置（启动时读取，运行期间只读）
#[tauri::command]
pub async fn get_app_config(state: tauri::State<'_, AppState>) -> Result<AppSettings, String> {
    Ok(state.settings.get().clone())
}
