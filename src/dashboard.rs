//! Page assembly: headline cards, the charts built once at startup, and the
//! row layout tying static charts and control outputs together.

use crate::aggregate::{
    Grouping, aggregate_count, aggregate_count_by, aggregate_mean_attrition, correlation_matrix, mean_of, sum_of,
};
use crate::chart::{self, ChartSpec, Orientation, StyleConfig, TickFormat};
use crate::context::{DashboardContext, ViewName};
use crate::controller::{ChartUpdate, FilterController};
use crate::controls::{self, ControlDef};
use crate::error::Result;
use crate::loader::BaseTable;
use crate::recode::{ATTRITION, EDUCATION, EDUCATION_LEVELS, MONTHLY_INCOME};
use log::info;
use serde::Serialize;

pub const PAGE_TITLE: &str = "Employee Attrition Analysis";

pub const SUMMARY: [&str; 6] = [
    "Evaluating against pay and benefits, the highest rates of attrition are seen with the lowest monthly income, \
     lowest percent salary increase, and lowest stock option level.",
    "Evaluating against employee length of service and promotion status, the highest rates of attrition occur among \
     employees working at the company for 4 years or less or have not received a promotion within the last 3 to 7 years.",
    "Longer commute distances are related to higher levels of attrition.",
    "Roles that require rare travel make up a higher rate of overall attrition than frequent or no travel. \
     Consideration: Is rare travel too much or not enough?",
    "There is a 31% attrition rate among employees who worked overtime, compared to 10% attrition for those who \
     did not work overtime.",
    "Job role seems to be a factor in attrition, with Sales Representative having the highest rate of attrition \
     at 40%, followed by Laboratory Technician at 24% and HR at 23%.",
];

/// Headline figure shown above the charts
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    pub title: &'static str,
    pub value: String,
}

/// One chart position on the page. Static charts carry their figure;
/// interactive ones name the control that renders them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSlot {
    pub id: &'static str,
    /// Bootstrap-style column span out of 12
    pub width: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<ChartSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Row {
    Cards { cards: Vec<Card> },
    Charts { slots: Vec<ChartSlot> },
    Summary { paragraphs: Vec<&'static str> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageLayout {
    pub title: &'static str,
    pub sidebar: Vec<&'static ControlDef>,
    pub rows: Vec<Row>,
}

/// Everything the page needs, computed once from the loaded table
pub struct Dashboard {
    context: DashboardContext,
    static_charts: Vec<(&'static str, ChartSpec)>,
    cards: Vec<Card>,
}

impl Dashboard {
    pub fn build(table: &BaseTable) -> Result<Self> {
        let context = DashboardContext::build(table)?;
        let cards = headline_cards(&context)?;
        let static_charts = static_charts(&context)?;
        info!(
            "Dashboard ready: {} cards, {} static charts, {} controls",
            cards.len(),
            static_charts.len(),
            controls::CONTROLS.len()
        );
        Ok(Dashboard {
            context,
            static_charts,
            cards,
        })
    }

    pub fn context(&self) -> &DashboardContext {
        &self.context
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn static_chart(&self, id: &str) -> Option<&ChartSpec> {
        self.static_charts.iter().find(|(k, _)| *k == id).map(|(_, spec)| spec)
    }

    pub fn controller(&self) -> FilterController<'_> {
        FilterController::new(&self.context)
    }

    pub fn on_filter_change(&self, control_id: &str, values: &[String]) -> Result<ChartUpdate> {
        self.controller().on_filter_change(control_id, values)
    }

    /// Every interactive chart with its control's default selection
    pub fn initial_figures(&self) -> Result<Vec<ChartUpdate>> {
        self.controller().render_all_defaults()
    }

    pub fn page(&self) -> PageLayout {
        let rows = vec![
            Row::Cards {
                cards: self.cards.clone(),
            },
            self.chart_row(&["fig_income1a", "fig_percent_salary_increase", "fig_stock_options"], 4),
            self.chart_row(&["fig_current_role", "fig_promotion", "fig_yrs_at_co"], 4),
            self.chart_row(&["commute-chart", "employee-attributes-1", "ot-percent"], 4),
            self.chart_row(&["fig_gender_ed_level"], 12),
            self.chart_row(&["fig_gender_ed_field"], 12),
            self.chart_row(&["chart-jobrole-checkbox"], 12),
            self.chart_row(&["dept_pct_pie", "chart-with-dropdown"], 6),
            self.chart_row(&["work_balance_pie", "perf_rating_pie"], 6),
            self.chart_row(&["satisfaction_area_chart"], 12),
            self.chart_row(&["fig_correlation"], 12),
            Row::Summary {
                paragraphs: SUMMARY.to_vec(),
            },
        ];

        PageLayout {
            title: PAGE_TITLE,
            sidebar: controls::CONTROLS.iter().collect(),
            rows,
        }
    }

    fn chart_row(&self, ids: &[&'static str], width: u8) -> Row {
        let slots = ids
            .iter()
            .map(|&id| ChartSlot {
                id,
                width,
                figure: self.static_chart(id).cloned(),
                control: controls::find_by_output(id).map(|c| c.id),
            })
            .collect();
        Row::Charts { slots }
    }
}

fn headline_cards(ctx: &DashboardContext) -> Result<Vec<Card>> {
    let base = ctx.view(ViewName::Base);
    let employees = sum_of(base, "EmployeeCount")?;
    let rate = mean_of(ctx.view(ViewName::Travel), ATTRITION)?;
    let tenure = mean_of(base, "YearsAtCompany")?;

    Ok(vec![
        Card {
            title: "Total Number of Employees:",
            value: employees.to_string(),
        },
        Card {
            title: "Overall Percent of Attrition:",
            value: format!("{:.0}%", rate * 100.0),
        },
        Card {
            title: "Average Employee Yrs at Company:",
            value: format!("{:.0}", tenure),
        },
    ])
}

/// Column, chart title and x-axis title of each count-by-attrition line chart
const LINE_CHARTS: [(&str, &str, &str, &str); 5] = [
    ("fig_percent_salary_increase", "PercentSalaryHike", "Percent Salary Increase vs. Attrition", "Percent Salary Increase"),
    ("fig_stock_options", "StockOptionLevel", "Stock Option Level vs. Attrition", "Stock Option Level"),
    ("fig_promotion", "YearsSinceLastPromotion", "Years Since Last Promotion vs. Attrition", "Years Since Last Promotion"),
    ("fig_yrs_at_co", "YearsAtCompany", "Years at Company vs. Attrition", "Years at Company"),
    ("fig_current_role", "YearsInCurrentRole", "Years in Current Role vs. Attrition", "Years in Current Role"),
];

fn static_charts(ctx: &DashboardContext) -> Result<Vec<(&'static str, ChartSpec)>> {
    let base = ctx.view(ViewName::Base);
    let counts = |x_title: &str| {
        StyleConfig::default()
            .legend("Attrition")
            .axis_titles(Some(x_title), Some("Count"))
    };

    let mut charts = Vec::new();

    let income = aggregate_count_by(
        base,
        &[Grouping::rounded(MONTHLY_INCOME, 1000), Grouping::column(ATTRITION)],
    )?;
    charts.push((
        "fig_income1a",
        chart::line_chart(&income, "Monthly Income vs. Attrition", &counts("Monthly Income")),
    ));

    for (id, column, title, x_title) in LINE_CHARTS {
        let agg = aggregate_count(base, &[column, ATTRITION])?;
        let mut style = counts(x_title);
        if column == "StockOptionLevel" {
            style = style.x_tick(TickFormat::integer());
        }
        charts.push((id, chart::line_chart(&agg, title, &style)));
    }

    let rate_style = |x_title: &str| {
        StyleConfig::default()
            .axis_titles(Some(x_title), Some("Avg Rate of Attrition"))
            .y_tick(TickFormat::Percent)
    };

    let by_level = aggregate_mean_attrition(ctx.view(ViewName::Education), &[EDUCATION, "Gender"])?;
    charts.push((
        "fig_gender_ed_level",
        chart::bar_chart(
            &by_level,
            Orientation::Vertical,
            "Average Rate of Attrition by Gender and Education Level",
            &rate_style("Education Level").order(&EDUCATION_LEVELS),
        ),
    ));

    let by_field = aggregate_mean_attrition(ctx.view(ViewName::Travel), &["EducationField", "Gender"])?;
    charts.push((
        "fig_gender_ed_field",
        chart::bar_chart(
            &by_field,
            Orientation::Vertical,
            "Average Rate of Attrition by Gender and Field of Education",
            &rate_style("Field of Education"),
        ),
    ));

    let matrix = correlation_matrix(ctx.view(ViewName::Department))?;
    charts.push((
        "fig_correlation",
        chart::heatmap(
            &matrix,
            "Correlation Between Employee Attributes",
            &StyleConfig::default().size(1000, 1000),
        ),
    ));

    Ok(charts)
}
