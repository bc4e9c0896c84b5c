//! 页面渲染
//!
//! 由已加载的数据和一次输入快照构造完整的页面描述 [`DashboardPage`]：
//! - 标题
//! - 三个可折叠的数据表面板（原样展示所有行与列）
//! - ICT 历史折线图与预测图（含置信区间上下界）
//! - 四个数值输入框（两列）
//! - 计算结果横幅
//!
//! 渲染是纯函数，不保存任何跨请求状态。

pub mod chart;
pub mod labels;

use serde::Serialize;

use crate::models::{AppSettings, ChartSettings, Locale};
use crate::scenario::{ScenarioCoefficients, ScenarioField, ScenarioInput};
use crate::storage::{filter_by_model, DashboardData, DataTable, ForecastRecord, MacroRecord};
use chart::{ChartSpec, Trace};
use labels::Labels;

/// 渲染参数（启动时由配置构造）
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub locale: Locale,
    pub forecast_model: String,
    pub chart: ChartSettings,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

impl RenderContext {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            locale: settings.locale,
            forecast_model: settings.forecast_model.clone(),
            chart: settings.chart,
        }
    }

    fn labels(&self) -> &'static Labels {
        Labels::for_locale(self.locale)
    }
}

/// 可折叠的数据表面板
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePanel {
    pub title: String,
    pub expanded: bool,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TablePanel {
    fn from_table(title: String, table: &DataTable) -> Self {
        Self {
            title,
            expanded: false,
            columns: table.columns.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.display()).collect())
                .collect(),
        }
    }
}

/// 图表：数据描述与渲染好的 SVG
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub heading: String,
    pub caption: Option<String>,
    pub spec: ChartSpec,
    pub svg: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberField {
    pub field: ScenarioField,
    pub label: String,
    pub value: f64,
    pub column: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerStyle {
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBanner {
    pub style: BannerStyle,
    pub value: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSection {
    pub heading: String,
    pub fields: Vec<NumberField>,
    pub banner: ResultBanner,
}

/// 完整的页面描述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub title: String,
    pub panels: Vec<TablePanel>,
    pub history_chart: ChartView,
    pub forecast_chart: ChartView,
    pub scenario: ScenarioSection,
}

/// 渲染整页
pub fn render(
    data: &DashboardData,
    input: &ScenarioInput,
    coefficients: &ScenarioCoefficients,
    ctx: &RenderContext,
) -> DashboardPage {
    let labels = ctx.labels();

    let panels = vec![
        TablePanel::from_table(labels.macro_panel.to_string(), &data.macro_table),
        TablePanel::from_table(
            Labels::with_model(labels.forecast_panel, &ctx.forecast_model),
            &data.forecast_table,
        ),
        TablePanel::from_table(labels.description_panel.to_string(), &data.description_table),
    ];

    let mut history_chart = history_chart(&data.macro_records, ctx);
    history_chart.caption = data.description_of("ict_services").map(str::to_string);

    let forecasts = filter_by_model(&data.forecasts, &ctx.forecast_model);
    let forecast_chart = forecast_chart(&forecasts, ctx);

    DashboardPage {
        title: labels.title.to_string(),
        panels,
        history_chart,
        forecast_chart,
        scenario: scenario_section(input, coefficients, ctx),
    }
}

fn year_span(years: impl Iterator<Item = i64>) -> Option<(i64, i64)> {
    years.fold(None, |acc, y| match acc {
        None => Some((y, y)),
        Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
    })
}

fn chart_view(heading: String, spec: ChartSpec, ctx: &RenderContext) -> ChartView {
    let svg = chart::render_svg(&spec, &ctx.chart, ctx.labels().no_data);
    ChartView {
        heading,
        caption: None,
        spec,
        svg,
    }
}

/// ICT 服务历史折线图（宏观表全部行）
pub fn history_chart(records: &[MacroRecord], ctx: &RenderContext) -> ChartView {
    let labels = ctx.labels();
    let spec = ChartSpec {
        x_label: labels.axis_year.to_string(),
        y_label: labels.axis_ict.to_string(),
        traces: vec![Trace::new(
            labels.ict_trace,
            records.iter().map(|r| (r.year, r.ict_services)),
        )],
    };
    let heading = Labels::with_years(
        labels.history_heading,
        year_span(records.iter().map(|r| r.year)),
    );
    chart_view(heading, spec, ctx)
}

/// 预测图：预测值为折线加标记，上下界为点线
///
/// `records` 应当已经按模型类型筛选过
pub fn forecast_chart(records: &[ForecastRecord], ctx: &RenderContext) -> ChartView {
    let labels = ctx.labels();
    let spec = ChartSpec {
        x_label: labels.axis_year.to_string(),
        y_label: labels.axis_ict.to_string(),
        traces: vec![
            Trace::new(
                labels.forecast_trace,
                records.iter().map(|r| (r.year, r.forecast_value)),
            ),
            Trace::new(labels.lower_trace, records.iter().map(|r| (r.year, r.lower_bound)))
                .lines()
                .dotted(),
            Trace::new(labels.upper_trace, records.iter().map(|r| (r.year, r.upper_bound)))
                .lines()
                .dotted(),
        ],
    };
    let heading = Labels::with_years(
        &Labels::with_model(labels.forecast_heading, &ctx.forecast_model),
        year_span(records.iter().map(|r| r.year)),
    );
    chart_view(heading, spec, ctx)
}

/// 结果文本，保留两位小数
pub fn banner_text(value: f64, locale: Locale) -> String {
    let labels = Labels::for_locale(locale);
    format!("{}: {:.2} {}", labels.result_prefix, value, labels.result_unit)
}

fn scenario_section(
    input: &ScenarioInput,
    coefficients: &ScenarioCoefficients,
    ctx: &RenderContext,
) -> ScenarioSection {
    let labels = ctx.labels();
    let fields = ScenarioField::ALL
        .iter()
        .map(|field| NumberField {
            field: *field,
            label: labels.field(*field).to_string(),
            value: input.get(*field),
            column: field.column(),
        })
        .collect();

    let value = coefficients.predict(input);
    ScenarioSection {
        heading: labels.scenario_heading.to_string(),
        fields,
        banner: ResultBanner {
            style: BannerStyle::Success,
            value,
            text: banner_text(value, ctx.locale),
        },
    }
}
