use crate::aggregate::{Aggregate, CorrelationMatrix};
use crate::table::Value;
use serde::Serialize;

/// Chart kinds the dashboard draws
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Placeholder drawn when a control has nothing selected
    Empty,

    /// Trend of a count over an ordered numeric axis, one line per attrition value
    Line,

    /// Categorical axis against a mean or count, one series per color dimension
    Bar,

    /// Share of a metric across a category
    Pie,

    /// Categorical axis with bars stacked by attrition value
    StackedBar,

    /// Correlation matrix
    Heatmap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Orientation {
    #[serde(rename = "v")]
    Vertical,
    #[serde(rename = "h")]
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Group,
    Stack,
}

/// Axis tick formatting
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TickFormat {
    Auto,
    /// Values in [0,1] shown as percentages
    Percent,
    /// Whole-number ticks from `start` every `step`
    Linear { start: i64, step: i64 },
    /// Explicit labels at the given positions
    Labels { values: Vec<i64>, text: Vec<String> },
}

impl TickFormat {
    pub fn integer() -> Self {
        TickFormat::Linear { start: 0, step: 1 }
    }

    fn is_auto(&self) -> bool {
        matches!(self, TickFormat::Auto)
    }
}

/// Styling options for chart generation
///
/// The default is the dashboard theme: light steel blue paper, black text,
/// centered titles and a 500 ms transition.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleConfig {
    pub background: String,
    pub font_color: String,
    pub title_color: String,
    pub center_title: bool,
    pub legend_title: Option<String>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub x_tick: TickFormat,
    pub y_tick: TickFormat,

    /// Display order of the categorical axis and of the series; values not
    /// listed follow in their natural order.
    pub category_order: Vec<String>,

    /// Category value → color name
    pub color_map: Vec<(String, String)>,
    pub transition_ms: Option<u32>,

    /// Width and height in pixels
    pub size: Option<(u32, u32)>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: "LightSteelBlue".to_string(),
            font_color: "black".to_string(),
            title_color: "black".to_string(),
            center_title: true,
            legend_title: None,
            x_title: None,
            y_title: None,
            x_tick: TickFormat::Auto,
            y_tick: TickFormat::Auto,
            category_order: Vec::new(),
            color_map: Vec::new(),
            transition_ms: Some(500),
            size: None,
        }
    }
}

impl StyleConfig {
    pub fn axis_titles(mut self, x: Option<&str>, y: Option<&str>) -> Self {
        self.x_title = x.map(str::to_string);
        self.y_title = y.map(str::to_string);
        self
    }

    pub fn legend(mut self, title: &str) -> Self {
        self.legend_title = Some(title.to_string());
        self
    }

    pub fn x_tick(mut self, tick: TickFormat) -> Self {
        self.x_tick = tick;
        self
    }

    pub fn y_tick(mut self, tick: TickFormat) -> Self {
        self.y_tick = tick;
        self
    }

    pub fn order(mut self, order: &[&str]) -> Self {
        self.category_order = order.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn colors(mut self, map: &[(&str, &str)]) -> Self {
        self.color_map = map.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self
    }

    pub fn no_transition(mut self) -> Self {
        self.transition_ms = None;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    fn color_for(&self, category: &str) -> Option<String> {
        self.color_map
            .iter()
            .find(|(k, _)| k == category)
            .map(|(_, c)| c.clone())
    }

    /// Stable sort of `values` by their position in `category_order`.
    fn ordered(&self, mut values: Vec<Value>) -> Vec<Value> {
        let rank = |v: &Value| {
            let label = v.to_string();
            self.category_order
                .iter()
                .position(|c| *c == label)
                .unwrap_or(self.category_order.len())
        };
        values.sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.cmp(b)));
        values
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub orientation: Orientation,
    /// Positions on the categorical (or ordered numeric) axis
    pub categories: Vec<Value>,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartData {
    None,
    Series(Vec<Series>),
    Slices(Vec<Slice>),
    Matrix(CorrelationMatrix),
}

impl ChartData {
    fn is_none(&self) -> bool {
        matches!(self, ChartData::None)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "TickFormat::is_auto")]
    pub tick: TickFormat,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_order: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub paper_bgcolor: String,
    pub font_color: String,
    pub title_font_color: String,
    pub legend_title_font_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<BarMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Declarative, renderer-agnostic description of one chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "ChartData::is_none")]
    pub data: ChartData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

impl ChartSpec {
    /// The designated chart for an empty selection
    pub fn empty() -> Self {
        ChartSpec {
            kind: ChartKind::Empty,
            title: None,
            data: ChartData::None,
            x_axis: None,
            y_axis: None,
            layout: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == ChartKind::Empty
    }

    fn styled(kind: ChartKind, title: String, data: ChartData, style: &StyleConfig) -> Self {
        ChartSpec {
            kind,
            title: Some(title),
            data,
            x_axis: None,
            y_axis: None,
            layout: Some(layout(style, None)),
        }
    }
}

fn layout(style: &StyleConfig, barmode: Option<BarMode>) -> Layout {
    Layout {
        paper_bgcolor: style.background.clone(),
        font_color: style.font_color.clone(),
        title_font_color: style.title_color.clone(),
        legend_title_font_color: style.font_color.clone(),
        title_x: style.center_title.then_some(0.5),
        legend_title: style.legend_title.clone(),
        transition_ms: style.transition_ms,
        barmode,
        width: style.size.map(|(w, _)| w),
        height: style.size.map(|(_, h)| h),
    }
}

fn axis(title: &Option<String>, tick: &TickFormat, order: &[String]) -> Axis {
    Axis {
        title: title.clone(),
        tick: tick.clone(),
        category_order: order.to_vec(),
    }
}

/// One series per value of the key at `series_pos`, points along `axis_pos`
/// in the order given by `categories`.
fn series_by(
    agg: &Aggregate,
    axis_pos: usize,
    series_pos: usize,
    categories: &[Value],
    series_names: &[Value],
    orientation: Orientation,
    style: &StyleConfig,
) -> Vec<Series> {
    series_names
        .iter()
        .map(|name| {
            let (cats, values): (Vec<Value>, Vec<f64>) = categories
                .iter()
                .filter_map(|cat| {
                    agg.rows
                        .iter()
                        .find(|r| r.key.get(axis_pos) == Some(cat) && r.key.get(series_pos) == Some(name))
                        .map(|r| (cat.clone(), r.value))
                })
                .unzip();
            let name = name.to_string();
            Series {
                color: style.color_for(&name),
                name,
                orientation,
                categories: cats,
                values,
            }
        })
        .collect()
}

/// Line chart of `agg` keyed by (x, series), e.g. (MonthlyIncome, Attrition).
///
/// With a single key the chart has one line named after that key.
pub fn line_chart(agg: &Aggregate, title: &str, style: &StyleConfig) -> ChartSpec {
    let series_pos = if agg.group_by.len() > 1 { 1 } else { 0 };
    let xs = agg.key_values(0);

    let series = if series_pos == 0 {
        let values = xs
            .iter()
            .filter_map(|x| agg.rows.iter().find(|r| r.key.first() == Some(x)).map(|r| r.value))
            .collect();
        vec![Series {
            name: agg.group_by.first().cloned().unwrap_or_default(),
            color: None,
            orientation: Orientation::Vertical,
            categories: xs,
            values,
        }]
    } else {
        let names = style.ordered(agg.key_values(series_pos));
        series_by(agg, 0, series_pos, &xs, &names, Orientation::Vertical, style)
    };

    let mut spec = ChartSpec::styled(ChartKind::Line, title.to_string(), ChartData::Series(series), style);
    spec.x_axis = Some(axis(&style.x_title, &style.x_tick, &[]));
    spec.y_axis = Some(axis(&style.y_title, &style.y_tick, &[]));
    spec
}

/// Histogram-style bar chart: the first key is the categorical axis, the
/// second key (or the first again) is the color dimension.
pub fn bar_chart(agg: &Aggregate, orientation: Orientation, title: &str, style: &StyleConfig) -> ChartSpec {
    let series_pos = if agg.group_by.len() > 1 { 1 } else { 0 };
    let categories = style.ordered(agg.key_values(0));
    let names = if series_pos == 0 {
        categories.clone()
    } else {
        agg.key_values(series_pos)
    };

    let series = series_by(agg, 0, series_pos, &categories, &names, orientation, style);
    let mut spec = ChartSpec::styled(ChartKind::Bar, title.to_string(), ChartData::Series(series), style);
    let order = style.category_order.as_slice();
    let none: &[String] = &[];
    let (x_order, y_order) = match orientation {
        Orientation::Vertical => (order, none),
        Orientation::Horizontal => (none, order),
    };
    spec.x_axis = Some(axis(&style.x_title, &style.x_tick, x_order));
    spec.y_axis = Some(axis(&style.y_title, &style.y_tick, y_order));
    if let Some(layout) = spec.layout.as_mut() {
        layout.barmode = Some(BarMode::Group);
    }
    spec
}

/// Pie of the measured values per category; the total goes into the title.
pub fn pie_chart(agg: &Aggregate, title: &str, style: &StyleConfig) -> ChartSpec {
    let labels = style.ordered(agg.key_values(0));
    let slices = labels
        .iter()
        .filter_map(|label| {
            agg.rows.iter().find(|r| r.key.first() == Some(label)).map(|r| {
                let label = label.to_string();
                Slice {
                    color: style.color_for(&label),
                    label,
                    value: r.value,
                }
            })
        })
        .collect();

    let title = format!("{} (n={})", title, agg.total().round() as i64);
    ChartSpec::styled(ChartKind::Pie, title, ChartData::Slices(slices), style)
}

/// Bars over the first key stacked by the second key.
pub fn stacked_bar_chart(agg: &Aggregate, title: &str, style: &StyleConfig) -> ChartSpec {
    let xs = agg.key_values(0);
    let series_pos = if agg.group_by.len() > 1 { 1 } else { 0 };
    let names = style.ordered(agg.key_values(series_pos));

    let series = series_by(agg, 0, series_pos, &xs, &names, Orientation::Vertical, style);
    ChartSpec {
        kind: ChartKind::StackedBar,
        title: Some(title.to_string()),
        data: ChartData::Series(series),
        x_axis: Some(axis(&style.x_title, &style.x_tick, &[])),
        y_axis: Some(axis(&style.y_title, &style.y_tick, &[])),
        layout: Some(layout(style, Some(BarMode::Stack))),
    }
}

pub fn heatmap(matrix: &CorrelationMatrix, title: &str, style: &StyleConfig) -> ChartSpec {
    ChartSpec::styled(ChartKind::Heatmap, title.to_string(), ChartData::Matrix(matrix.clone()), style)
}
