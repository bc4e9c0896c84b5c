// 数据模型定义 - 数据库表与强类型记录

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// 单元格值（SQLite 动态类型）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl CellValue {
    /// 按数值读取，整数与可解析的文本都接受
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(v) => Some(*v as f64),
            CellValue::Real(v) => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Null => None,
        }
    }

    /// 按年份读取，接受整数值的浮点（如 2010.0）
    pub fn as_year(&self) -> Option<i64> {
        match self {
            CellValue::Integer(v) => Some(*v),
            CellValue::Real(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            CellValue::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// 表格面板中的显示文本
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Integer(v) => v.to_string(),
            CellValue::Real(v) => format!("{:?}", v),
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// 从数据库读取的原始表，保留列顺序与行顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| DashboardError::query(&self.name, format!("缺少列 {}", name)))
    }

    fn cell(&self, row: usize, column: usize) -> &CellValue {
        static NULL: CellValue = CellValue::Null;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    fn year_at(&self, row: usize, column: usize) -> Result<i64> {
        let cell = self.cell(row, column);
        cell.as_year().ok_or_else(|| {
            DashboardError::query(
                &self.name,
                format!("第 {} 行的年份无效: {:?}", row + 1, cell),
            )
        })
    }

    /// NULL 视为缺失值（图表中的断点），其他非数值视为格式错误
    fn decimal_at(&self, row: usize, column: usize) -> Result<Option<f64>> {
        let cell = self.cell(row, column);
        if cell.is_null() {
            return Ok(None);
        }
        cell.as_f64().map(Some).ok_or_else(|| {
            DashboardError::query(
                &self.name,
                format!(
                    "第 {} 行的列 {} 不是数值: {:?}",
                    row + 1,
                    self.columns[column],
                    cell
                ),
            )
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// 宏观经济记录（每年一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRecord {
    pub year: i64,
    pub ict_services: Option<f64>,
    /// 其余由表结构决定的列，按表中顺序
    pub extra: Vec<(String, CellValue)>,
}

impl MacroRecord {
    pub fn from_table(table: &DataTable) -> Result<Vec<Self>> {
        let year_col = table.require_column("year")?;
        let ict_col = table.require_column("ict_services")?;

        (0..table.row_count())
            .map(|row| {
                let extra = table
                    .columns
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != year_col && *i != ict_col)
                    .map(|(i, name)| (name.clone(), table.cell(row, i).clone()))
                    .collect();
                Ok(Self {
                    year: table.year_at(row, year_col)?,
                    ict_services: table.decimal_at(row, ict_col)?,
                    extra,
                })
            })
            .collect()
    }
}

/// 预测结果记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub year: i64,
    pub model_type: String,
    pub forecast_value: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

impl ForecastRecord {
    pub fn from_table(table: &DataTable) -> Result<Vec<Self>> {
        let year_col = table.require_column("year")?;
        let model_col = table.require_column("model_type")?;
        let value_col = table.require_column("forecast_value")?;
        let lower_col = table.require_column("lower_bound")?;
        let upper_col = table.require_column("upper_bound")?;

        (0..table.row_count())
            .map(|row| {
                Ok(Self {
                    year: table.year_at(row, year_col)?,
                    model_type: table.cell(row, model_col).display(),
                    forecast_value: table.decimal_at(row, value_col)?,
                    lower_bound: table.decimal_at(row, lower_col)?,
                    upper_bound: table.decimal_at(row, upper_col)?,
                })
            })
            .collect()
    }
}

/// 指标说明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDescription {
    pub indicator: String,
    pub description: String,
}

impl IndicatorDescription {
    const INDICATOR_COLUMNS: [&'static str; 5] = [
        "indicator",
        "indicator_name",
        "indicator_code",
        "code",
        "name",
    ];

    pub fn from_table(table: &DataTable) -> Result<Vec<Self>> {
        if table.columns.len() < 2 {
            return Err(DashboardError::query(
                &table.name,
                "至少需要指标列和说明列",
            ));
        }

        let description = table.column_index("description");
        // 未识别到指标列时取第一个不是说明列的列
        let indicator_col = Self::INDICATOR_COLUMNS
            .iter()
            .find_map(|name| table.column_index(name))
            .or_else(|| (0..table.columns.len()).find(|i| Some(*i) != description))
            .unwrap_or(0);
        let description_col = description
            .or_else(|| (0..table.columns.len()).find(|i| *i != indicator_col))
            .unwrap_or(1);

        Ok((0..table.row_count())
            .map(|row| Self {
                indicator: table.cell(row, indicator_col).display(),
                description: table.cell(row, description_col).display(),
            })
            .collect())
    }
}

/// 启动时一次性加载的全部数据（只读）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub macro_table: DataTable,
    pub forecast_table: DataTable,
    pub description_table: DataTable,
    pub macro_records: Vec<MacroRecord>,
    pub forecasts: Vec<ForecastRecord>,
    pub descriptions: Vec<IndicatorDescription>,
}

impl DashboardData {
    /// 将三张原始表解码为强类型记录
    pub fn from_tables(
        macro_table: DataTable,
        forecast_table: DataTable,
        description_table: DataTable,
    ) -> Result<Self> {
        let macro_records = MacroRecord::from_table(&macro_table)?;
        let forecasts = ForecastRecord::from_table(&forecast_table)?;
        let descriptions = IndicatorDescription::from_table(&description_table)?;

        Ok(Self {
            macro_table,
            forecast_table,
            description_table,
            macro_records,
            forecasts,
            descriptions,
        })
    }

    /// 查找指标说明
    pub fn description_of(&self, indicator: &str) -> Option<&str> {
        self.descriptions
            .iter()
            .find(|d| d.indicator == indicator)
            .map(|d| d.description.as_str())
    }
}

/// 按模型类型筛选预测记录（精确匹配，保持原顺序，不修改输入）
pub fn filter_by_model(records: &[ForecastRecord], model_type: &str) -> Vec<ForecastRecord> {
    records
        .iter()
        .filter(|r| r.model_type == model_type)
        .cloned()
        .collect()
}
