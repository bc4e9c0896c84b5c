// 数据模型模块 - 应用配置与对外返回的结构

use serde::{Deserialize, Serialize};

// 重新导出其他模块的类型
pub use crate::presentation::DashboardPage;
pub use crate::scenario::{InputRejection, ScenarioInput, WidgetValues};
pub use crate::storage::{DashboardData, ForecastRecord, IndicatorDescription, MacroRecord};

/// 界面语言
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

/// 图表尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 420,
        }
    }
}

/// 持久化的应用配置（settings.json）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// 数据库路径覆盖，相对路径以可执行文件目录为基准
    pub database_path: Option<String>,
    /// 界面语言
    pub locale: Locale,
    /// 预测图使用的模型类型
    pub forecast_model: String,
    /// 图表尺寸
    pub chart: ChartSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            locale: Locale::default(),
            forecast_model: "SARIMAX".to_string(),
            chart: ChartSettings::default(),
        }
    }
}

/// 数据库状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStatus {
    pub path: String,
    pub loaded: bool,
    pub macro_rows: usize,
    pub forecast_rows: usize,
    pub description_rows: usize,
    pub error: Option<String>,
}

/// 渲染命令的返回值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResponse {
    pub page: DashboardPage,
    /// 被拒绝并已回退的输入
    pub rejected: Vec<InputRejection>,
}
