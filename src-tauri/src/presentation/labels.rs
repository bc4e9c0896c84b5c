// 界面文案（按语言）

use crate::models::Locale;
use crate::scenario::ScenarioField;

/// 一套界面文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub macro_panel: &'static str,
    /// `{model}` 会被替换为模型名
    pub forecast_panel: &'static str,
    pub description_panel: &'static str,
    pub history_heading: &'static str,
    pub forecast_heading: &'static str,
    pub scenario_heading: &'static str,
    pub axis_year: &'static str,
    pub axis_ict: &'static str,
    pub ict_trace: &'static str,
    pub forecast_trace: &'static str,
    pub lower_trace: &'static str,
    pub upper_trace: &'static str,
    pub no_data: &'static str,
    pub inflation: &'static str,
    pub gdp: &'static str,
    pub unemployment: &'static str,
    pub rnd: &'static str,
    pub result_prefix: &'static str,
    pub result_unit: &'static str,
}

const EN: Labels = Labels {
    title: "📊 Interactive ICT analysis and forecasting",
    macro_panel: "📁 Show macroeconomic data",
    forecast_panel: "📈 {model} forecast",
    description_panel: "🧾 Indicator descriptions",
    history_heading: "ICT services dynamics",
    forecast_heading: "{model} forecast of ICT services",
    scenario_heading: "📌 Custom scenario: compute your own forecast",
    axis_year: "Year",
    axis_ict: "ICT (trillion currency units)",
    ict_trace: "ICT services",
    forecast_trace: "Forecast",
    lower_trace: "Lower bound",
    upper_trace: "Upper bound",
    no_data: "No data",
    inflation: "Inflation (%)",
    gdp: "GDP (trillion currency units)",
    unemployment: "Unemployment (%)",
    rnd: "R&D (% of GDP)",
    result_prefix: "Forecast ICT services volume",
    result_unit: "trillion currency units",
};

const RU: Labels = Labels {
    title: "📊 Интерактивный анализ ИКТ и прогнозирование",
    macro_panel: "📁 Показать макроэкономические данные",
    forecast_panel: "📈 Прогноз {model}",
    description_panel: "🧾 Описание показателей",
    history_heading: "Динамика ИКТ-услуг",
    forecast_heading: "Прогноз ИКТ-услуг по {model}",
    scenario_heading: "📌 Пользовательский сценарий: рассчитай свой прогноз",
    axis_year: "Год",
    axis_ict: "ИКТ (трлн руб.)",
    ict_trace: "ИКТ-услуги",
    forecast_trace: "Прогноз",
    lower_trace: "Нижняя граница",
    upper_trace: "Верхняя граница",
    no_data: "Нет данных",
    inflation: "Инфляция (%)",
    gdp: "ВВП (трлн руб.)",
    unemployment: "Безработица (%)",
    rnd: "НИОКР (% от ВВП)",
    result_prefix: "Прогноз объёма ИКТ-услуг",
    result_unit: "трлн руб.",
};

impl Labels {
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::En => &EN,
            Locale::Ru => &RU,
        }
    }

    pub fn field(&self, field: ScenarioField) -> &'static str {
        match field {
            ScenarioField::Inflation => self.inflation,
            ScenarioField::Gdp => self.gdp,
            ScenarioField::Unemployment => self.unemployment,
            ScenarioField::Rnd => self.rnd,
        }
    }

    /// 标题后附加年份区间，如 "ICT services dynamics, 2010–2024"
    pub fn with_years(heading: &str, years: Option<(i64, i64)>) -> String {
        match years {
            Some((first, last)) if first == last => format!("{}, {}", heading, first),
            Some((first, last)) => format!("{}, {}–{}", heading, first, last),
            None => heading.to_string(),
        }
    }

    pub fn with_model(template: &str, model: &str) -> String {
        template.replace("{model}", model)
    }
}
