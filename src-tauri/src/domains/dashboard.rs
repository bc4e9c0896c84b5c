// 仪表盘领域管理器
//
// 负责一次完整的渲染请求：解析输入 -> 计算情景 -> 构造页面

use crate::error::DashboardError;
use crate::models::RenderResponse;
use crate::presentation::{self, RenderContext};
use crate::scenario::{ScenarioCoefficients, ScenarioInput, WidgetValues};
use crate::storage::DashboardData;

/// 仪表盘领域管理器 - 持有启动时确定的系数与渲染参数
#[derive(Debug, Clone)]
pub struct DashboardDomain {
    coefficients: ScenarioCoefficients,
    context: RenderContext,
}

impl DashboardDomain {
    pub fn new(coefficients: ScenarioCoefficients, context: RenderContext) -> Self {
        Self {
            coefficients,
            context,
        }
    }

    /// 处理一次渲染请求
    ///
    /// 数据加载失败时整页不渲染，直接返回致命错误
    pub fn render(
        &self,
        data: Result<&DashboardData, &DashboardError>,
        widgets: &WidgetValues,
        last_valid: &ScenarioInput,
    ) -> Result<RenderResponse, DashboardError> {
        let data = data.map_err(Clone::clone)?;
        let parsed = ScenarioInput::from_widgets(widgets, last_valid);
        let page = presentation::render(data, &parsed.input, &self.coefficients, &self.context);
        Ok(RenderResponse {
            page,
            rejected: parsed.rejections,
        })
    }
}
