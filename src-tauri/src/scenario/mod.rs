//! 线性情景计算器
//!
//! 用固定权重的线性回归公式，根据通胀、GDP、失业率和研发占比四个输入
//! 估算 ICT 服务规模：
//!
//! ```text
//! result = const + w_inflation*inflation + w_gdp*gdp
//!        + w_unemployment*unemployment + w_rnd*rnd
//! ```
//!
//! 输入不做范围检查，负值或极端值按线性公式直接得出结果。

pub mod input;

use serde::{Deserialize, Serialize};

pub use input::{parse_decimal, InputRejection, ParsedInput, ScenarioField, WidgetValues};

/// 回归系数（构造后不可变）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCoefficients {
    pub constant: f64,
    pub inflation: f64,
    pub gdp: f64,
    pub unemployment: f64,
    pub rnd: f64,
}

impl Default for ScenarioCoefficients {
    fn default() -> Self {
        Self {
            constant: -9587.10,
            inflation: 59.54,
            gdp: 43.45,
            unemployment: 94.29,
            rnd: 7968.23,
        }
    }
}

impl ScenarioCoefficients {
    /// 按固定顺序从左到右累加
    pub fn predict(&self, input: &ScenarioInput) -> f64 {
        self.constant
            + self.inflation * input.inflation
            + self.gdp * input.gdp
            + self.unemployment * input.unemployment
            + self.rnd * input.rnd
    }
}

/// 一次渲染使用的输入快照
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// 通胀（%）
    pub inflation: f64,
    /// GDP（万亿）
    pub gdp: f64,
    /// 失业率（%）
    pub unemployment: f64,
    /// 研发支出占 GDP 比例（%）
    pub rnd: f64,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            inflation: 7.0,
            gdp: 150.0,
            unemployment: 4.5,
            rnd: 1.0,
        }
    }
}

impl ScenarioInput {
    pub fn get(&self, field: ScenarioField) -> f64 {
        match field {
            ScenarioField::Inflation => self.inflation,
            ScenarioField::Gdp => self.gdp,
            ScenarioField::Unemployment => self.unemployment,
            ScenarioField::Rnd => self.rnd,
        }
    }

    pub fn set(&mut self, field: ScenarioField, value: f64) {
        match field {
            ScenarioField::Inflation => self.inflation = value,
            ScenarioField::Gdp => self.gdp = value,
            ScenarioField::Unemployment => self.unemployment = value,
            ScenarioField::Rnd => self.rnd = value,
        }
    }
}

/// 使用默认系数计算
pub fn predict(inflation: f64, gdp: f64, unemployment: f64, rnd: f64) -> f64 {
    ScenarioCoefficients::default().predict(&ScenarioInput {
        inflation,
        gdp,
        unemployment,
        rnd,
    })
}
