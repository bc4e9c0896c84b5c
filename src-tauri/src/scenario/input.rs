// 情景输入解析 - 输入框文本到数值的转换

use serde::{Deserialize, Serialize};

use super::ScenarioInput;
use crate::error::DashboardError;

/// 四个输入字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioField {
    Inflation,
    Gdp,
    Unemployment,
    Rnd,
}

impl ScenarioField {
    pub const ALL: [ScenarioField; 4] = [
        ScenarioField::Inflation,
        ScenarioField::Gdp,
        ScenarioField::Unemployment,
        ScenarioField::Rnd,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ScenarioField::Inflation => "inflation",
            ScenarioField::Gdp => "gdp",
            ScenarioField::Unemployment => "unemployment",
            ScenarioField::Rnd => "rnd",
        }
    }

    /// 两列布局：通胀、GDP 在第一列，失业率、研发在第二列
    pub fn column(&self) -> u8 {
        match self {
            ScenarioField::Inflation | ScenarioField::Gdp => 0,
            ScenarioField::Unemployment | ScenarioField::Rnd => 1,
        }
    }
}

/// 前端输入框中的原始文本
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetValues {
    pub inflation: String,
    pub gdp: String,
    pub unemployment: String,
    pub rnd: String,
}

impl WidgetValues {
    pub fn get(&self, field: ScenarioField) -> &str {
        match field {
            ScenarioField::Inflation => &self.inflation,
            ScenarioField::Gdp => &self.gdp,
            ScenarioField::Unemployment => &self.unemployment,
            ScenarioField::Rnd => &self.rnd,
        }
    }
}

impl From<&ScenarioInput> for WidgetValues {
    fn from(input: &ScenarioInput) -> Self {
        Self {
            inflation: input.inflation.to_string(),
            gdp: input.gdp.to_string(),
            unemployment: input.unemployment.to_string(),
            rnd: input.rnd.to_string(),
        }
    }
}

/// 被拒绝的输入（字段已回退到上一次有效值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRejection {
    pub field: ScenarioField,
    pub value: String,
    pub reverted_to: f64,
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedInput {
    pub input: ScenarioInput,
    pub rejections: Vec<InputRejection>,
}

/// 解析十进制数，接受 `.` 或单个 `,` 作为小数点
pub fn parse_decimal(field: ScenarioField, raw: &str) -> Result<f64, DashboardError> {
    let reject = || DashboardError::InputParseError {
        field: field.key().to_string(),
        value: raw.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.matches(',').count() > 1 {
        return Err(reject());
    }
    let normalized = trimmed.replace(',', ".");

    // f64 的解析器接受 "inf"、"NaN"，输入框只接受有限数
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(reject()),
    }
}

impl ScenarioInput {
    /// 由输入框文本构造快照，无效字段回退到 `last_valid` 中的值
    pub fn from_widgets(raw: &WidgetValues, last_valid: &ScenarioInput) -> ParsedInput {
        let mut input = *last_valid;
        let mut rejections = Vec::new();

        for field in ScenarioField::ALL {
            match parse_decimal(field, raw.get(field)) {
                Ok(value) => input.set(field, value),
                Err(_) => rejections.push(InputRejection {
                    field,
                    value: raw.get(field).to_string(),
                    reverted_to: last_valid.get(field),
                }),
            }
        }

        ParsedInput { input, rejections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_accepts_common_forms() {
        assert_eq!(parse_decimal(ScenarioField::Gdp, "150").unwrap(), 150.0);
        assert_eq!(parse_decimal(ScenarioField::Gdp, " 4.5 ").unwrap(), 4.5);
        assert_eq!(parse_decimal(ScenarioField::Gdp, "4,5").unwrap(), 4.5);
        assert_eq!(parse_decimal(ScenarioField::Gdp, "-2.25").unwrap(), -2.25);
        assert_eq!(parse_decimal(ScenarioField::Gdp, "1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_decimal_rejects_invalid() {
        for raw in ["", "   ", "abc", "1,2,3", "1.2.3", "NaN", "inf", "-infinity"] {
            match parse_decimal(ScenarioField::Rnd, raw) {
                Err(DashboardError::InputParseError { field, value }) => {
                    assert_eq!(field, "rnd");
                    assert_eq!(value, raw);
                }
                other => panic!("{:?} 应被拒绝，实际为 {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_from_widgets_reverts_invalid_fields() {
        let last_valid = ScenarioInput::default();
        let raw = WidgetValues {
            inflation: "8.5".into(),
            gdp: "abc".into(),
            unemployment: "".into(),
            rnd: "2".into(),
        };

        let parsed = ScenarioInput::from_widgets(&raw, &last_valid);
        assert_eq!(parsed.input.inflation, 8.5);
        assert_eq!(parsed.input.gdp, 150.0);
        assert_eq!(parsed.input.unemployment, 4.5);
        assert_eq!(parsed.input.rnd, 2.0);

        let fields: Vec<_> = parsed.rejections.iter().map(|r| r.field).collect();
        assert_eq!(fields, vec![ScenarioField::Gdp, ScenarioField::Unemployment]);
        assert_eq!(parsed.rejections[0].reverted_to, 150.0);
    }

    #[test]
    fn test_widget_values_round_trip_defaults() {
        let defaults = ScenarioInput::default();
        let parsed = ScenarioInput::from_widgets(&WidgetValues::from(&defaults), &defaults);
        assert!(parsed.rejections.is_empty());
        assert_eq!(parsed.input, defaults);
    }

    #[test]
    fn test_field_layout() {
        let first_column: Vec<_> = ScenarioField::ALL
            .iter()
            .filter(|f| f.column() == 0)
            .map(|f| f.key())
            .collect();
        assert_eq!(first_column, vec!["inflation", "gdp"]);
    }
}
