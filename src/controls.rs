//! Fixed configuration of the sidebar controls.
//!
//! Each control owns one output chart. Its identifier, option domain and
//! default selection never change at runtime.

use lazy_static::lazy_static;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Any subset of the options; all checked by default
    Checklist,
    /// Exactly one option; the first is selected by default
    Dropdown,
}

/// The interactive chart a control drives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractiveChart {
    CommuteRate,
    TravelShare,
    OvertimeRate,
    JobRoleRate,
    DepartmentShare,
    DepartmentRate,
    WorkLifeShare,
    PerformanceShare,
    SatisfactionBreakdown,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlOption {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlDef {
    pub id: &'static str,
    pub output_id: &'static str,
    pub prompt: &'static str,
    pub kind: ControlKind,
    pub options: Vec<ControlOption>,
    #[serde(skip)]
    pub chart: InteractiveChart,
}

impl ControlDef {
    fn new(
        id: &'static str,
        output_id: &'static str,
        prompt: &'static str,
        kind: ControlKind,
        options: &[(&str, &str)],
        chart: InteractiveChart,
    ) -> Self {
        ControlDef {
            id,
            output_id,
            prompt,
            kind,
            options: options
                .iter()
                .map(|(label, value)| ControlOption {
                    label: label.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            chart,
        }
    }

    pub fn offers(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// The selection every control starts with
    pub fn default_selection(&self) -> Vec<String> {
        match self.kind {
            ControlKind::Checklist => self.options.iter().map(|o| o.value.clone()).collect(),
            ControlKind::Dropdown => self.options.iter().take(1).map(|o| o.value.clone()).collect(),
        }
    }
}

pub const DEPARTMENT_COLORS: [(&str, &str); 3] = [
    ("Human Resources", "red"),
    ("Research & Development", "green"),
    ("Sales", "blue"),
];

lazy_static! {
    pub static ref CONTROLS: Vec<ControlDef> = vec![
        ControlDef::new(
            "commute_group_selections",
            "commute-chart",
            "Select to update Avg Attrition vs. Commute chart:",
            ControlKind::Checklist,
            &[
                ("1 to 5 miles", "1 to 5 miles"),
                ("6 to 10 miles", "6 to 10 miles"),
                ("11 to 20 miles", "11 to 20 miles"),
                ("Over 20 miles", "Over 20 miles"),
            ],
            InteractiveChart::CommuteRate,
        ),
        ControlDef::new(
            "emp-attributes-checkbox-1",
            "employee-attributes-1",
            "Select to update Breakout by Travel Freq chart:",
            ControlKind::Checklist,
            &[
                ("No Travel", "Non-Travel"),
                ("Travel Rarely", "Travel_Rarely"),
                ("Travel Frequently", "Travel_Frequently"),
            ],
            InteractiveChart::TravelShare,
        ),
        ControlDef::new(
            "ot-checkbox-1",
            "ot-percent",
            "Select to update Avg Rate of Attrition vs. Overtime chart:",
            ControlKind::Checklist,
            &[("Yes", "Yes"), ("No", "No")],
            InteractiveChart::OvertimeRate,
        ),
        ControlDef::new(
            "jobrole-checkboxes",
            "chart-jobrole-checkbox",
            "Select to update Rate of Attrition by Job Role chart:",
            ControlKind::Checklist,
            &[
                ("Healthcare Rep", "Healthcare Representative"),
                ("HR", "Human Resources"),
                ("Lab Tech", "Laboratory Technician"),
                ("Manager", "Manager"),
                ("Mfg Dir", "Manufacturing Director"),
                ("Research Dir", "Research Director"),
                ("Research Scientist", "Research Scientist"),
                ("Sales Exec", "Sales Executive"),
                ("Sales Rep", "Sales Representative"),
            ],
            InteractiveChart::JobRoleRate,
        ),
        ControlDef::new(
            "dept-pie-checkbox",
            "dept_pct_pie",
            "Select to update Percent Breakout by Dept chart:",
            ControlKind::Checklist,
            &[
                ("HR", "Human Resources"),
                ("R&D", "Research & Development"),
                ("Sales", "Sales"),
            ],
            InteractiveChart::DepartmentShare,
        ),
        ControlDef::new(
            "dept-dropdown",
            "chart-with-dropdown",
            "Select to update Avg Rate of Attrition by Dept chart:",
            ControlKind::Checklist,
            &[
                ("HR", "Human Resources"),
                ("R&D", "Research & Development"),
                ("Sales", "Sales"),
            ],
            InteractiveChart::DepartmentRate,
        ),
        ControlDef::new(
            "work-balance-checklist",
            "work_balance_pie",
            "Select to update Avg Rate of Attrition vs. Work Life Balance chart:",
            ControlKind::Checklist,
            &[
                ("Bad (1)", "Bad"),
                ("Good (2)", "Good"),
                ("Better (3)", "Better"),
                ("Best (4)", "Best"),
            ],
            InteractiveChart::WorkLifeShare,
        ),
        ControlDef::new(
            "perf-rating-checkbox",
            "perf_rating_pie",
            "Select to update Avg Rate of Attrition vs. Performance Rating chart:",
            ControlKind::Checklist,
            &[("Excellent (3)", "Excellent"), ("Outstanding (4)", "Outstanding")],
            InteractiveChart::PerformanceShare,
        ),
        ControlDef::new(
            "satisfaction-x-axis",
            "satisfaction_area_chart",
            "Select to update Attrition vs. Satisfaction chart:",
            ControlKind::Dropdown,
            &[
                ("Environment Satisfaction", "Environment Satisfaction"),
                ("Job Involvement", "Job Involvement"),
                ("Job Satisfaction", "Job Satisfaction"),
                ("Relationship Satisfaction", "Relationship Satisfaction"),
            ],
            InteractiveChart::SatisfactionBreakdown,
        ),
    ];
}

pub fn find(id: &str) -> Option<&'static ControlDef> {
    CONTROLS.iter().find(|c| c.id == id)
}

pub fn find_by_output(output_id: &str) -> Option<&'static ControlDef> {
    CONTROLS.iter().find(|c| c.output_id == output_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_and_outputs_are_unique() {
        let ids: HashSet<_> = CONTROLS.iter().map(|c| c.id).collect();
        let outputs: HashSet<_> = CONTROLS.iter().map(|c| c.output_id).collect();
        assert_eq!(ids.len(), CONTROLS.len());
        assert_eq!(outputs.len(), CONTROLS.len());
    }

    #[test]
    fn checklists_default_to_everything() {
        let commute = find("commute_group_selections").unwrap();
        assert_eq!(
            commute.default_selection(),
            vec!["1 to 5 miles", "6 to 10 miles", "11 to 20 miles", "Over 20 miles"]
        );
        assert!(commute.offers("Over 20 miles"));
        assert!(!commute.offers("Over 30 miles"));
    }

    #[test]
    fn dropdown_defaults_to_first_option() {
        let satisfaction = find_by_output("satisfaction_area_chart").unwrap();
        assert_eq!(satisfaction.kind, ControlKind::Dropdown);
        assert_eq!(satisfaction.default_selection(), vec!["Environment Satisfaction"]);
    }

    #[test]
    fn unknown_control_is_absent() {
        assert!(find("last-promotion-checklist").is_none());
    }
}
