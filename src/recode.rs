//! Re-coding, bucketing and renaming steps used to build the named views.
//!
//! Every step takes a view and returns a new one with the same row count.
//! Mappings are total over their documented domain: a value outside it is a
//! data-quality defect reported as `UnmappedCategory`.

use crate::error::{DashboardError, Result};
use crate::table::{DerivedView, Value};

pub const ATTRITION: &str = "Attrition";
pub const BUSINESS_TRAVEL: &str = "BusinessTravel";
pub const DEPARTMENT: &str = "Department";
pub const OVERTIME: &str = "OverTime";
pub const EDUCATION: &str = "Education";
pub const PERFORMANCE_RATING: &str = "PerformanceRating";
pub const WORK_LIFE_BALANCE: &str = "WorkLifeBalance";
pub const DISTANCE_FROM_HOME: &str = "DistanceFromHome";
pub const MONTHLY_INCOME: &str = "MonthlyIncome";
pub const COMMUTE_GROUP: &str = "CommuteGroup";
pub const MONTHLY_INCOME_GROUP: &str = "MonthlyIncomeGroup";

pub const EDUCATION_LEVELS: [&str; 5] = ["Below College", "College", "Bachelor", "Master", "Doctor"];
pub const PERFORMANCE_LEVELS: [&str; 4] = ["Low", "Good", "Excellent", "Outstanding"];
pub const WORK_LIFE_LEVELS: [&str; 4] = ["Bad", "Good", "Better", "Best"];
pub const COMMUTE_GROUPS: [&str; 4] = ["1 to 5 miles", "6 to 10 miles", "11 to 20 miles", "Over 20 miles"];

pub const SATISFACTION_RENAMES: [(&str, &str); 4] = [
    ("EnvironmentSatisfaction", "Environment Satisfaction"),
    ("JobInvolvement", "Job Involvement"),
    ("JobSatisfaction", "Job Satisfaction"),
    ("RelationshipSatisfaction", "Relationship Satisfaction"),
];

/// Columns holding the same value in every row of the dataset
pub const CONSTANT_COLUMNS: [&str; 2] = ["EmployeeCount", "StandardHours"];

fn unmapped(column: &str, value: &Value) -> DashboardError {
    DashboardError::UnmappedCategory {
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Map text values through a fixed table, failing on anything else.
fn recode_text(view: &DerivedView, column: &str, table: &[(&str, Value)]) -> Result<DerivedView> {
    view.map_column(column, |v| match v {
        Value::Text(s) => table
            .iter()
            .find(|(from, _)| *from == s.as_str())
            .map(|(_, to)| to.clone())
            .ok_or_else(|| unmapped(column, v)),
        _ => Err(unmapped(column, v)),
    })
}

/// Map integer codes 1..=labels.len() to their labels.
fn recode_ordinal_label(view: &DerivedView, column: &str, labels: &[&str]) -> Result<DerivedView> {
    view.map_column(column, |v| {
        v.as_int()
            .filter(|n| *n >= 1 && (*n as usize) <= labels.len())
            .map(|n| Value::text(labels[n as usize - 1]))
            .ok_or_else(|| unmapped(column, v))
    })
}

/// Attrition "Yes"/"No" → 1/0
pub fn recode_attrition_numeric(view: &DerivedView) -> Result<DerivedView> {
    recode_text(view, ATTRITION, &[("Yes", Value::Int(1)), ("No", Value::Int(0))])
}

/// Business travel frequency → ordinal code
pub fn recode_business_travel_ordinal(view: &DerivedView) -> Result<DerivedView> {
    recode_text(
        view,
        BUSINESS_TRAVEL,
        &[
            ("Non-Travel", Value::Int(1)),
            ("Travel_Frequently", Value::Int(2)),
            ("Travel_Rarely", Value::Int(3)),
        ],
    )
}

/// Short department names for chart labels; other departments pass through.
pub fn shorten_department_labels(view: &DerivedView) -> Result<DerivedView> {
    view.map_column(DEPARTMENT, |v| {
        Ok(match v {
            Value::Text(s) if s == "Human Resources" => Value::text("HR"),
            Value::Text(s) if s == "Research & Development" => Value::text("R & D"),
            other => other.clone(),
        })
    })
}

pub fn recode_overtime_numeric(view: &DerivedView) -> Result<DerivedView> {
    recode_text(view, OVERTIME, &[("Yes", Value::Int(1)), ("No", Value::Int(0))])
}

pub fn recode_education_label(view: &DerivedView) -> Result<DerivedView> {
    recode_ordinal_label(view, EDUCATION, &EDUCATION_LEVELS)
}

pub fn recode_performance_label(view: &DerivedView) -> Result<DerivedView> {
    recode_ordinal_label(view, PERFORMANCE_RATING, &PERFORMANCE_LEVELS)
}

pub fn recode_work_life_balance_label(view: &DerivedView) -> Result<DerivedView> {
    recode_ordinal_label(view, WORK_LIFE_BALANCE, &WORK_LIFE_LEVELS)
}

/// Commute distance in miles → bucket label, `None` below one mile
///
/// Intervals are half-open: [1,5), [5,10), [10,20), [20,∞).
pub fn bucket_commute_distance(distance: i64) -> Option<&'static str> {
    match distance {
        d if d < 1 => None,
        d if d < 5 => Some(COMMUTE_GROUPS[0]),
        d if d < 10 => Some(COMMUTE_GROUPS[1]),
        d if d < 20 => Some(COMMUTE_GROUPS[2]),
        _ => Some(COMMUTE_GROUPS[3]),
    }
}

/// Monthly income → $1,000-wide band label, `None` below $1,000
pub fn bucket_monthly_income(income: i64) -> Option<String> {
    match income {
        i if i < 1000 => None,
        i if i >= 10_000 => Some("$10,000 or more".to_string()),
        i => {
            let thousands = i / 1000;
            Some(format!("${},000-${},999", thousands, thousands))
        }
    }
}

pub fn add_commute_group(view: &DerivedView) -> Result<DerivedView> {
    view.derive_column(DISTANCE_FROM_HOME, COMMUTE_GROUP, |v| {
        Value::from(v.as_int().and_then(bucket_commute_distance))
    })
}

pub fn add_income_group(view: &DerivedView) -> Result<DerivedView> {
    view.derive_column(MONTHLY_INCOME, MONTHLY_INCOME_GROUP, |v| {
        v.as_int()
            .and_then(bucket_monthly_income)
            .map(Value::Text)
            .unwrap_or(Value::Null)
    })
}

/// Satisfaction columns with spaced, display-ready names
pub fn rename_satisfaction_columns(view: &DerivedView) -> Result<DerivedView> {
    Ok(view.rename_columns(&SATISFACTION_RENAMES))
}

pub fn drop_constant_columns(view: &DerivedView) -> Result<DerivedView> {
    Ok(view.drop_columns(&CONSTANT_COLUMNS))
}
