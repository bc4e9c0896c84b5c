//! 时间序列折线图
//!
//! 图表先描述为 [`ChartSpec`]（轨迹数据 + 轴标签），再渲染成独立的 SVG 文档。
//! 渲染是纯函数：相同的输入得到逐字节相同的输出。

use serde::Serialize;

use crate::models::ChartSettings;

/// 默认配色（依次分配给各条轨迹）
const PALETTE: [&str; 4] = ["#636efa", "#ef553b", "#00cc96", "#ab63fa"];

const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 150.0;
const MARGIN_TOP: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 56.0;
const MARKER_RADIUS: f64 = 3.5;
const TARGET_TICKS: f64 = 6.0;
const MAX_TICK_DECIMALS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    Lines,
    LinesMarkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    Solid,
    Dot,
}

/// 一条轨迹；`y` 中的 `None` 或非有限值在折线上形成断点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<i64>,
    pub y: Vec<Option<f64>>,
    pub mode: TraceMode,
    pub dash: LineDash,
}

impl Trace {
    pub fn new(
        name: impl Into<String>,
        points: impl IntoIterator<Item = (i64, Option<f64>)>,
    ) -> Self {
        let (x, y) = points.into_iter().unzip();
        Self {
            name: name.into(),
            x,
            y,
            mode: TraceMode::LinesMarkers,
            dash: LineDash::Solid,
        }
    }

    pub fn lines(mut self) -> Self {
        self.mode = TraceMode::Lines;
        self
    }

    pub fn dotted(mut self) -> Self {
        self.dash = LineDash::Dot;
        self
    }

    fn points(&self) -> impl Iterator<Item = (f64, Option<f64>)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(x, y)| (*x as f64, y.filter(|v| v.is_finite())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    fn x_range(&self) -> Option<(f64, f64)> {
        let xs = self.traces.iter().flat_map(|t| t.x.iter().map(|x| *x as f64));
        min_max(xs)
    }

    fn y_range(&self) -> Option<(f64, f64)> {
        let ys = self
            .traces
            .iter()
            .flat_map(|t| t.points().filter_map(|(_, y)| y));
        min_max(ys)
    }

    fn has_points(&self) -> bool {
        self.traces.iter().any(|t| t.points().any(|(_, y)| y.is_some()))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// 将数据坐标映射到像素坐标
struct Scale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Scale {
    fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// 1、2、5 × 10^n 形式的刻度步长
fn nice_step(span: f64, target: f64) -> f64 {
    let raw = span / target;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// 跨度下溢或溢出时步长为 0 或非有限值，此时只保留一个刻度
fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite()) {
        return vec![lo];
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn tick_label(v: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10() - 1e-9).ceil().clamp(0.0, MAX_TICK_DECIMALS) as usize
    };
    // 加 0.0 消除 "-0"
    format!("{:.*}", decimals, v + 0.0)
}

/// 轴范围：单点时左右各扩展 1，否则按比例留白
fn padded(lo: f64, hi: f64, ratio: f64) -> (f64, f64) {
    if lo == hi {
        (lo - 1.0, hi + 1.0)
    } else {
        let pad = (hi - lo) * ratio;
        (lo - pad, hi + pad)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 渲染为 SVG 文档
pub fn render_svg(spec: &ChartSpec, size: &ChartSettings, no_data: &str) -> String {
    let width = f64::from(size.width.max(320));
    let height = f64::from(size.height.max(200));
    let plot_left = MARGIN_LEFT;
    let plot_right = width - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = height - MARGIN_BOTTOM;

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\" font-size=\"12\">\n",
        w = width,
        h = height
    );
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"#e5ecf6\"/>\n",
        plot_left,
        plot_top,
        plot_right - plot_left,
        plot_bottom - plot_top
    ));

    // 轴标题
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\">{}</text>\n",
        (plot_left + plot_right) / 2.0,
        height - 12.0,
        escape_xml(&spec.x_label)
    ));
    svg.push_str(&format!(
        "<text x=\"16\" y=\"{y:.2}\" text-anchor=\"middle\" transform=\"rotate(-90 16 {y:.2})\">{}</text>\n",
        escape_xml(&spec.y_label),
        y = (plot_top + plot_bottom) / 2.0
    ));

    let (Some((x_lo, x_hi)), Some((y_lo, y_hi)), true) =
        (spec.x_range(), spec.y_range(), spec.has_points())
    else {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"#555\">{}</text>\n",
            (plot_left + plot_right) / 2.0,
            (plot_top + plot_bottom) / 2.0,
            escape_xml(no_data)
        ));
        svg.push_str("</svg>\n");
        return svg;
    };

    let x_domain = padded(x_lo, x_hi, 0.03);
    let y_domain = padded(y_lo, y_hi, 0.08);
    let x_scale = Scale {
        domain: x_domain,
        range: (plot_left, plot_right),
    };
    let y_scale = Scale {
        domain: y_domain,
        range: (plot_bottom, plot_top),
    };

    // 年份刻度至少为 1
    let x_step = nice_step(x_domain.1 - x_domain.0, TARGET_TICKS).max(1.0);
    for tick in ticks(x_domain.0, x_domain.1, x_step) {
        let px = x_scale.map(tick);
        svg.push_str(&format!(
            "<line x1=\"{px:.2}\" y1=\"{:.2}\" x2=\"{px:.2}\" y2=\"{:.2}\" stroke=\"#ffffff\"/>\n",
            plot_top,
            plot_bottom,
            px = px
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\">{}</text>\n",
            px,
            plot_bottom + 18.0,
            tick_label(tick, x_step)
        ));
    }

    let y_step = nice_step(y_domain.1 - y_domain.0, TARGET_TICKS);
    for tick in ticks(y_domain.0, y_domain.1, y_step) {
        let py = y_scale.map(tick);
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{py:.2}\" x2=\"{:.2}\" y2=\"{py:.2}\" stroke=\"#ffffff\"/>\n",
            plot_left,
            plot_right,
            py = py
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\">{}</text>\n",
            plot_left - 6.0,
            py + 4.0,
            tick_label(tick, y_step)
        ));
    }

    for (index, trace) in spec.traces.iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        let dash = match trace.dash {
            LineDash::Solid => "",
            LineDash::Dot => " stroke-dasharray=\"2,4\"",
        };

        let path = trace_path(trace, &x_scale, &y_scale);
        if !path.is_empty() {
            svg.push_str(&format!(
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"{}/>\n",
                path, color, dash
            ));
        }

        if trace.mode == TraceMode::LinesMarkers {
            for (x, y) in trace.points() {
                if let Some(y) = y {
                    svg.push_str(&format!(
                        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"/>\n",
                        x_scale.map(x),
                        y_scale.map(y),
                        MARKER_RADIUS,
                        color
                    ));
                }
            }
        }

        // 图例
        let legend_y = plot_top + 12.0 + index as f64 * 20.0;
        let legend_x = plot_right + 12.0;
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{ly:.2}\" x2=\"{:.2}\" y2=\"{ly:.2}\" stroke=\"{}\" stroke-width=\"2\"{}/>\n",
            legend_x,
            legend_x + 24.0,
            color,
            dash,
            ly = legend_y
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\">{}</text>\n",
            legend_x + 30.0,
            legend_y + 4.0,
            escape_xml(&trace.name)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// 连续的有效点连成一段，遇到缺失值断开
fn trace_path(trace: &Trace, x_scale: &Scale, y_scale: &Scale) -> String {
    let mut path = String::new();
    let mut pen_down = false;
    for (x, y) in trace.points() {
        match y {
            Some(y) => {
                if !path.is_empty() {
                    path.push(' ');
                }
                let command = if pen_down { 'L' } else { 'M' };
                path.push_str(&format!("{}{:.2},{:.2}", command, x_scale.map(x), y_scale.map(y)));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> ChartSpec {
        ChartSpec {
            x_label: "Year".into(),
            y_label: "ICT (trillion currency units)".into(),
            traces: vec![
                Trace::new(
                    "Forecast",
                    vec![(2025, Some(5.4)), (2026, Some(5.7)), (2027, Some(6.0))],
                ),
                Trace::new("Lower bound", vec![(2025, Some(5.0)), (2026, None), (2027, Some(5.2))])
                    .lines()
                    .dotted(),
            ],
        }
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(10.0, 5.0), 2.0);
        assert_eq!(nice_step(14.0, 6.0), 5.0);
        assert!((nice_step(0.9, 6.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(tick_label(2010.0, 2.0), "2010");
        assert_eq!(tick_label(0.30000000000000004, 0.1), "0.3");
        assert_eq!(tick_label(-0.0, 0.5), "0.0");
    }

    #[test]
    fn test_degenerate_step_yields_single_tick() {
        assert_eq!(ticks(0.0, 1.0, 0.0), vec![0.0]);
        assert_eq!(ticks(-1.0, 1.0, f64::INFINITY), vec![-1.0]);
        assert_eq!(ticks(0.0, 1.0, f64::NAN), vec![0.0]);
        assert_eq!(tick_label(0.5, 0.0), format!("{:.12}", 0.5));
    }

    #[test]
    fn test_render_subnormal_span() {
        let spec = ChartSpec {
            x_label: "Year".into(),
            y_label: "ICT".into(),
            traces: vec![Trace::new(
                "ICT services",
                vec![(2010, Some(0.0)), (2011, Some(5e-324))],
            )],
        };
        let svg = render_svg(&spec, &ChartSettings::default(), "No data");
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn test_render_is_deterministic() {
        let spec = sample_spec();
        let size = ChartSettings::default();
        assert_eq!(render_svg(&spec, &size, "No data"), render_svg(&spec, &size, "No data"));
    }

    #[test]
    fn test_render_contains_traces_and_labels() {
        let svg = render_svg(&sample_spec(), &ChartSettings::default(), "No data");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">Year</text>"));
        assert!(svg.contains(">ICT (trillion currency units)</text>"));
        assert!(svg.contains(">Forecast</text>"));
        assert!(svg.contains("stroke-dasharray=\"2,4\""));
        // 只有第一条轨迹带标记点
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(!svg.contains("No data"));
    }

    #[test]
    fn test_missing_value_breaks_the_line() {
        let spec = sample_spec();
        let x_scale = Scale {
            domain: (2025.0, 2027.0),
            range: (0.0, 100.0),
        };
        let y_scale = Scale {
            domain: (5.0, 6.0),
            range: (100.0, 0.0),
        };
        let path = trace_path(&spec.traces[1], &x_scale, &y_scale);
        assert_eq!(path.matches('M').count(), 2);
        assert!(!path.contains('L'));
    }

    #[test]
    fn test_empty_chart_shows_note() {
        let spec = ChartSpec {
            x_label: "Year".into(),
            y_label: "ICT".into(),
            traces: vec![Trace::new("Forecast", Vec::new())],
        };
        let svg = render_svg(&spec, &ChartSettings::default(), "No data");
        assert!(svg.contains(">No data</text>"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_text_is_escaped() {
        let spec = ChartSpec {
            x_label: "R&D <share>".into(),
            y_label: "y".into(),
            traces: vec![],
        };
        let svg = render_svg(&spec, &ChartSettings::default(), "No data");
        assert!(svg.contains("R&amp;D &lt;share&gt;"));
    }
}
