use crate::aggregate::{aggregate_attrition_total, aggregate_count, aggregate_mean_attrition};
use crate::chart::{self, ChartSpec, Orientation, StyleConfig, TickFormat};
use crate::context::{DashboardContext, ViewName};
use crate::controls::{self, ControlDef, DEPARTMENT_COLORS, InteractiveChart};
use crate::error::{DashboardError, Result};
use crate::recode::{
    ATTRITION, BUSINESS_TRAVEL, COMMUTE_GROUP, COMMUTE_GROUPS, DEPARTMENT, OVERTIME, PERFORMANCE_LEVELS,
    PERFORMANCE_RATING, WORK_LIFE_BALANCE, WORK_LIFE_LEVELS,
};
use crate::table::DerivedView;
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeSet;

/// Per-control render state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlState {
    /// At least one option selected
    Active(BTreeSet<String>),
    /// Nothing selected; the chart is drawn empty
    Suppressed,
}

impl ControlState {
    pub fn from_selection(values: &[String]) -> Self {
        if values.is_empty() {
            ControlState::Suppressed
        } else {
            ControlState::Active(values.iter().cloned().collect())
        }
    }
}

/// New figure for one output slot
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartUpdate {
    pub output_id: &'static str,
    pub figure: ChartSpec,
}

/// Turns filter-change events into chart specifications
///
/// Holds nothing but a reference to the immutable context, so every render
/// starts from the same views and only the selection passed in matters.
pub struct FilterController<'a> {
    ctx: &'a DashboardContext,
}

impl<'a> FilterController<'a> {
    pub fn new(ctx: &'a DashboardContext) -> Self {
        FilterController { ctx }
    }

    /// Handle a `(control_id, selected_values)` event.
    ///
    /// # Errors
    /// * `UnknownControl` if no control has this id
    /// * `UnknownOption` if a value is outside the control's option domain
    pub fn on_filter_change(&self, control_id: &str, values: &[String]) -> Result<ChartUpdate> {
        let def = controls::find(control_id)
            .ok_or_else(|| DashboardError::UnknownControl(control_id.to_string()))?;

        if let Some(bad) = values.iter().find(|v| !def.offers(v)) {
            return Err(DashboardError::UnknownOption {
                control: control_id.to_string(),
                value: bad.clone(),
            });
        }

        let state = ControlState::from_selection(values);
        debug!("Control {} is {:?}", control_id, state);

        let figure = match state {
            ControlState::Suppressed => ChartSpec::empty(),
            ControlState::Active(selection) => self.render(def, &selection)?,
        };

        Ok(ChartUpdate {
            output_id: def.output_id,
            figure,
        })
    }

    /// The chart a control shows when the page first loads.
    pub fn render_default(&self, control_id: &str) -> Result<ChartUpdate> {
        let def = controls::find(control_id)
            .ok_or_else(|| DashboardError::UnknownControl(control_id.to_string()))?;
        self.on_filter_change(control_id, &def.default_selection())
    }

    pub fn render_all_defaults(&self) -> Result<Vec<ChartUpdate>> {
        controls::CONTROLS
            .iter()
            .map(|def| self.render_default(def.id))
            .collect()
    }

    fn render(&self, def: &ControlDef, selection: &BTreeSet<String>) -> Result<ChartSpec> {
        let style = StyleConfig::default();

        match def.chart {
            InteractiveChart::CommuteRate => {
                let Some(view) = self.filtered(def, ViewName::Commute, COMMUTE_GROUP, selection)? else {
                    return Ok(ChartSpec::empty());
                };
                let agg = aggregate_mean_attrition(&view, &[COMMUTE_GROUP])?;
                let style = style
                    .order(&COMMUTE_GROUPS)
                    .legend("Commute Distance")
                    .axis_titles(Some("Rate of Attrition"), Some("Commute Distance"))
                    .x_tick(TickFormat::Percent);
                Ok(chart::bar_chart(
                    &agg,
                    Orientation::Horizontal,
                    "Avg Rate of Attrition vs. Commute Distance",
                    &style,
                ))
            }
            InteractiveChart::TravelShare => {
                let Some(view) = self.filtered(def, ViewName::Attrition, BUSINESS_TRAVEL, selection)? else {
                    return Ok(ChartSpec::empty());
                };
                let agg = aggregate_attrition_total(&view, &[BUSINESS_TRAVEL])?;
                Ok(chart::pie_chart(
                    &agg,
                    "Total Attrition - Percent Breakout by Job Travel",
                    &style.legend("Travel Frequency"),
                ))
            }
            InteractiveChart::OvertimeRate => {
                let Some(view) = self.filtered(def, ViewName::Attrition, OVERTIME, selection)? else {
                    return Ok(ChartSpec::empty());
                };
                let agg = aggregate_mean_attrition(&view, &[OVERTIME])?;
                let style = style
                    .legend("Overtime Required")
                    .axis_titles(Some("Overtime Required"), None)
                    .y_tick(TickFormat::Percent);
                Ok(chart::bar_chart(
                    &agg,
                    Orientation::Vertical,
                    "Avg Rate of Attrition vs. Overtime Status",
                    &style,
                ))
            }
            InteractiveChart::JobRoleRate => {
                let Some(view) = self.filtered(def, ViewName::Travel, "JobRole", selection)? else {
                    return Ok(ChartSpec::empty());
                };
                let agg = aggregate_mean_attrition(&view, &["JobRole"])?;
                let style = style.axis_titles(None, Some("Job Role")).x_tick(TickFormat::Percent);
                Ok(chart::bar_chart(
                    &agg,
                    Orientation::Horizontal,
                    "Average Rate of Attrition by Job Role",
                    &style,
                ))
            }
            InteractiveChart::DepartmentShare => {
                let Some(view) = self.filtered(def, ViewName::Travel, DEPARTMENT, selection)? else {
                    return Ok(ChartSpec::empty());
                };
                let agg = aggregate_attrition_total(&view, &[DEPARTMENT])?;
                let style = style
                    .colors(&DEPARTMENT_COLORS)
                    .legend("Department")
                    .no_transition();
                Ok(chart::pie_chart(
                    &agg,
                    "Total Attrition - Percent Breakout by Department",
                    &style,
                ))
            }
            InteractiveChart::DepartmentRate => {
                let Some(view) = self.filtered(def, ViewName::Travel, DEPARTMENT, selection)? else {
                    return Ok(ChartSpec::empty());
                };
                let agg = aggregate_mean_attrition(&view, &[DEPARTMENT])?;
                let style = style.colors(&DEPARTMENT_COLORS).x_tick(TickFormat::Percent);
                Ok(chart::bar_chart(
                    &agg,
                    Orientation::Horizontal,
                    "Average Rate of Attrition by Department",
                    &style,
                ))
            }
            InteractiveChart::WorkLifeShare => {
                let Some(view) = self.filtered(def, ViewName::WorkLife, WORK_LIFE_BALANCE, selection)? else {
                    return Ok(ChartSpec::empty());
                };
                let agg = aggregate_attrition_total(&view, &[WORK_LIFE_BALANCE])?;
                let style = style
                    .order(&WORK_LIFE_LEVELS)
                    .legend("Work Life Balance Rating")
                    .no_transition();
                Ok(chart::pie_chart(
                    &agg,
                    "Total Attrition - Percent Breakout by Work Life Balance Rating",
                    &style,
                ))
            }
            InteractiveChart::PerformanceShare => {
                let Some(view) = self.filtered(def, ViewName::Performance, PERFORMANCE_RATING, selection)? else {
                    return Ok(ChartSpec::empty());
                };
                let agg = aggregate_attrition_total(&view, &[PERFORMANCE_RATING])?;
                let style = style
                    .order(&PERFORMANCE_LEVELS)
                    .legend("Performance Rating")
                    .no_transition();
                Ok(chart::pie_chart(
                    &agg,
                    "Total Attrition - Percent Breakout by Performance Rating",
                    &style,
                ))
            }
            InteractiveChart::SatisfactionBreakdown => {
                // a dropdown carries one value; take the first in option order
                match def.options.iter().find(|o| selection.contains(&o.value)) {
                    Some(choice) => self.satisfaction_breakdown(&choice.value, style),
                    None => Ok(ChartSpec::empty()),
                }
            }
        }
    }

    /// The view restricted to the selected categories, `None` when nothing
    /// is left to aggregate.
    fn filtered(
        &self,
        def: &ControlDef,
        view: ViewName,
        column: &str,
        selection: &BTreeSet<String>,
    ) -> Result<Option<DerivedView>> {
        let filtered = self.ctx.view(view).filter_in(column, selection)?;
        if filtered.is_empty() {
            warn!("Selection {:?} on {} matches no rows", selection, def.id);
            return Ok(None);
        }
        Ok(Some(filtered))
    }

    fn satisfaction_breakdown(&self, rating: &str, style: StyleConfig) -> Result<ChartSpec> {
        let view = self.ctx.view(ViewName::Satisfaction);
        let agg = aggregate_count(view, &[rating, ATTRITION])?;
        let style = style
            .legend("Attrition")
            .axis_titles(Some("Satisfaction Rating"), None)
            .x_tick(TickFormat::Labels {
                values: vec![1, 2, 3, 4],
                text: ["1: Low", "2: Medium", "3: High", "4: Very High"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            });
        Ok(chart::stacked_bar_chart(&agg, "Attrition vs. Satisfaction Ratings", &style))
    }
}
