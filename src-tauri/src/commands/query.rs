//! 仪表盘查询命令
//!
//! 提供页面渲染所需的接口，包括：
//! - 完整页面渲染（输入解析、情景计算、表格与图表）
//! - 默认输入值
//! - 数据库状态查询

use tracing::{error, warn};

use crate::models::*;
use crate::AppState;

/// 渲染整个仪表盘页面
///
/// # 参数
/// - `widgets`: 四个输入框当前的原始文本
/// - `last_valid`: 上一次被接受的输入，解析失败的字段回退到这里；首次渲染时为空，使用默认值
///
/// # 返回
/// - `Ok(RenderResponse)`: 页面与被拒绝的输入
/// - `Err(String)`: 数据不可用时的致命错误信息
#[tauri::command]
pub async fn render_dashboard(
    state: tauri::State<'_, AppState>,
    widgets: WidgetValues,
    last_valid: Option<ScenarioInput>,
) -> Result<RenderResponse, String> {
    let last_valid = last_valid.unwrap_or_default();
    let data = state.storage_domain.get_data();
    let response = state
        .dashboard_domain
        .render(data.as_deref(), &widgets, &last_valid)
        .map_err(|e| {
            error!("页面渲染失败: {}", e);
            e.to_string()
        })?;

    for rejection in &response.rejected {
        warn!(
            "输入 {} 无效: {:?}，保留 {}",
            rejection.field.key(),
            rejection.value,
            rejection.reverted_to
        );
    }
    Ok(response)
}

/// 获取输入框默认值
#[tauri::command]
pub async fn get_default_inputs() -> Result<ScenarioInput, String> {
    Ok(ScenarioInput::default())
}

/// 获取数据库状态
#[tauri::command]
pub async fn get_store_status(state: tauri::State<'_, AppState>) -> Result<StoreStatus, String> {
    Ok(state.storage_domain.get_status())
}
