use crate::error::{DashboardError, Result};
use crate::recode::ATTRITION;
use crate::table::{DerivedView, Value};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// What each aggregate row measures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Number of rows in the group
    Count,
    /// Mean of the 0/1 attrition indicator, the group's attrition rate
    MeanAttrition,
    /// Sum of the attrition indicator, the number of leavers
    AttritionTotal,
}

/// How one key of a group is derived from a row
#[derive(Clone, Debug, PartialEq)]
pub enum Grouping {
    Column(String),
    /// Integer column rounded to the nearest multiple, ties to even
    Rounded { column: String, nearest: i64 },
}

impl Grouping {
    pub fn column(name: &str) -> Self {
        Grouping::Column(name.to_string())
    }

    pub fn rounded(name: &str, nearest: i64) -> Self {
        Grouping::Rounded {
            column: name.to_string(),
            nearest,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Grouping::Column(c) | Grouping::Rounded { column: c, .. } => c,
        }
    }

    fn key(&self, value: &Value) -> Value {
        match (self, value) {
            (Grouping::Rounded { nearest, .. }, Value::Int(n)) => {
                Value::Int(round_half_even(*n, *nearest))
            }
            _ => value.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: Vec<Value>,
    pub count: usize,
    pub value: f64,
}

/// Grouped summary of a view, rows in ascending key order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Aggregate {
    pub group_by: Vec<String>,
    pub measure: Measure,
    pub rows: Vec<AggregateRow>,
}

impl Aggregate {
    /// Sum of the measured values over all groups.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    /// Distinct values of the key at `position`, in ascending key order.
    pub fn key_values(&self, position: usize) -> Vec<Value> {
        self.rows
            .iter()
            .filter_map(|row| row.key.get(position).cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Row counts per distinct combination of `group_by` values.
pub fn aggregate_count(view: &DerivedView, group_by: &[&str]) -> Result<Aggregate> {
    aggregate(view, &columns(group_by), Measure::Count)
}

/// Attrition rate per distinct combination of `group_by` values.
///
/// Needs the numeric attrition column (see
/// [`recode_attrition_numeric`](crate::recode::recode_attrition_numeric)).
pub fn aggregate_mean_attrition(view: &DerivedView, group_by: &[&str]) -> Result<Aggregate> {
    aggregate(view, &columns(group_by), Measure::MeanAttrition)
}

/// Number of leavers per distinct combination of `group_by` values.
pub fn aggregate_attrition_total(view: &DerivedView, group_by: &[&str]) -> Result<Aggregate> {
    aggregate(view, &columns(group_by), Measure::AttritionTotal)
}

/// Row counts with derived keys, e.g. income rounded to the nearest thousand.
pub fn aggregate_count_by(view: &DerivedView, groupings: &[Grouping]) -> Result<Aggregate> {
    aggregate(view, groupings, Measure::Count)
}

fn columns(names: &[&str]) -> Vec<Grouping> {
    names.iter().map(|n| Grouping::column(n)).collect()
}

/// Shared two-pass grouping
///
/// Pass 1 computes every row's key (applying rounding where asked), pass 2
/// groups on the finished keys, so rows whose rounded keys coincide always
/// merge. Rows with a null key component are left out.
pub fn aggregate(view: &DerivedView, groupings: &[Grouping], measure: Measure) -> Result<Aggregate> {
    if view.is_empty() {
        return Err(DashboardError::EmptyInput(view.name().to_string()));
    }

    let key_columns = groupings
        .iter()
        .map(|g| view.column(g.name()))
        .collect::<Result<Vec<_>>>()?;

    let indicator = match measure {
        Measure::Count => None,
        Measure::MeanAttrition | Measure::AttritionTotal => Some(numeric_column(view, ATTRITION)?),
    };

    // pass 1
    let keys: Vec<Option<Vec<Value>>> = (0..view.row_count())
        .map(|row| {
            groupings
                .iter()
                .zip(&key_columns)
                .map(|(g, col)| {
                    let v = &col[row];
                    if v.is_null() { None } else { Some(g.key(v)) }
                })
                .collect()
        })
        .collect();

    // pass 2
    let mut groups: BTreeMap<Vec<Value>, (usize, i64)> = BTreeMap::new();
    for (row, key) in keys.into_iter().enumerate() {
        let Some(key) = key else { continue };
        let entry = groups.entry(key).or_insert((0, 0));
        entry.0 += 1;
        if let Some(ind) = &indicator {
            entry.1 += ind[row];
        }
    }

    let rows = groups
        .into_iter()
        .map(|(key, (count, sum))| {
            let value = match measure {
                Measure::Count => count as f64,
                // every group holds at least one row
                Measure::MeanAttrition => sum as f64 / count as f64,
                Measure::AttritionTotal => sum as f64,
            };
            AggregateRow { key, count, value }
        })
        .collect();

    Ok(Aggregate {
        group_by: groupings.iter().map(|g| g.name().to_string()).collect(),
        measure,
        rows,
    })
}

fn numeric_column(view: &DerivedView, column: &str) -> Result<Vec<i64>> {
    view.column(column)?
        .iter()
        .map(|v| {
            v.as_int().ok_or_else(|| DashboardError::NonNumericColumn {
                view: view.name().to_string(),
                column: column.to_string(),
            })
        })
        .collect()
}

/// Round to the nearest multiple of `nearest`, halfway cases to the even
/// multiple (2500 → 2000, 3500 → 4000).
pub fn round_half_even(n: i64, nearest: i64) -> i64 {
    if nearest <= 1 {
        return n;
    }
    let q = n.div_euclid(nearest);
    let twice_rem = 2 * n.rem_euclid(nearest);
    let down = q * nearest;
    if twice_rem < nearest || (twice_rem == nearest && q.rem_euclid(2) == 0) {
        down
    } else {
        down + nearest
    }
}

pub fn mean_of(view: &DerivedView, column: &str) -> Result<f64> {
    if view.is_empty() {
        return Err(DashboardError::EmptyInput(view.name().to_string()));
    }
    let values = numeric_column(view, column)?;
    Ok(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

pub fn sum_of(view: &DerivedView, column: &str) -> Result<i64> {
    Ok(numeric_column(view, column)?.iter().sum())
}

/// Pearson correlation between every pair of integer columns
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// `None` where either column has no variance
    pub values: Vec<Vec<Option<f64>>>,
}

pub fn correlation_matrix(view: &DerivedView) -> Result<CorrelationMatrix> {
    if view.is_empty() {
        return Err(DashboardError::EmptyInput(view.name().to_string()));
    }

    let numeric: Vec<(String, Vec<f64>)> = view
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .map(|c| {
            let xs = c.values.iter().filter_map(Value::as_int).map(|n| n as f64).collect();
            (c.name.clone(), xs)
        })
        .collect();

    let values = numeric
        .iter()
        .map(|(_, a)| numeric.iter().map(|(_, b)| pearson(a, b)).collect())
        .collect();

    Ok(CorrelationMatrix {
        labels: numeric.into_iter().map(|(name, _)| name).collect(),
        values,
    })
}

fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }
    Some(cov / (var_a.sqrt() * var_b.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn departments() -> DerivedView {
        DerivedView::from_columns(
            "attrition",
            vec![
                Column::new(
                    "Department",
                    vec!["Human Resources".into(), "Sales".into(), "Sales".into()],
                ),
                Column::new(ATTRITION, vec![1.into(), 0.into(), 1.into()]),
            ],
        )
    }

    #[test]
    fn mean_attrition_by_department() {
        let agg = aggregate_mean_attrition(&departments(), &["Department"]).unwrap();
        assert_eq!(agg.rows.len(), 2);
        assert_eq!(agg.rows[0].key, vec![Value::text("Human Resources")]);
        assert_eq!(agg.rows[0].value, 1.0);
        assert_eq!(agg.rows[0].count, 1);
        assert_eq!(agg.rows[1].key, vec![Value::text("Sales")]);
        assert_eq!(agg.rows[1].value, 0.5);
        assert_eq!(agg.rows[1].count, 2);
    }

    #[test]
    fn counts_sum_to_row_count() {
        let view = departments();
        let agg = aggregate_count(&view, &["Department", ATTRITION]).unwrap();
        assert_eq!(agg.rows.len(), 3);
        assert_eq!(agg.total() as usize, view.row_count());
    }

    #[test]
    fn attrition_total_counts_leavers() {
        let agg = aggregate_attrition_total(&departments(), &["Department"]).unwrap();
        let totals: Vec<f64> = agg.rows.iter().map(|r| r.value).collect();
        assert_eq!(totals, vec![1.0, 1.0]);
        assert_eq!(agg.total(), 2.0);
    }

    #[test]
    fn empty_view_is_rejected() {
        let view = departments()
            .filter_in("Department", &Default::default())
            .unwrap();
        assert_eq!(
            aggregate_count(&view, &["Department"]).unwrap_err(),
            DashboardError::EmptyInput("attrition".to_string())
        );
    }

    #[test]
    fn mean_needs_numeric_attrition() {
        let view = DerivedView::from_columns(
            "raw",
            vec![
                Column::new("Department", vec!["Sales".into()]),
                Column::new(ATTRITION, vec!["Yes".into()]),
            ],
        );
        assert!(matches!(
            aggregate_mean_attrition(&view, &["Department"]),
            Err(DashboardError::NonNumericColumn { .. })
        ));
    }

    #[test]
    fn null_keys_are_skipped() {
        let view = DerivedView::from_columns(
            "commute",
            vec![
                Column::new("CommuteGroup", vec![Value::Null, "1 to 5 miles".into()]),
                Column::new(ATTRITION, vec![1.into(), 0.into()]),
            ],
        );
        let agg = aggregate_mean_attrition(&view, &["CommuteGroup"]).unwrap();
        assert_eq!(agg.rows.len(), 1);
        assert_eq!(agg.rows[0].value, 0.0);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        assert_eq!(round_half_even(2500, 1000), 2000);
        assert_eq!(round_half_even(3500, 1000), 4000);
        assert_eq!(round_half_even(2501, 1000), 3000);
        assert_eq!(round_half_even(1499, 1000), 1000);
        assert_eq!(round_half_even(19_999, 1000), 20_000);
        assert_eq!(round_half_even(7, 1), 7);
    }

    #[test]
    fn rounded_keys_merge_in_one_pass() {
        let view = DerivedView::from_columns(
            "base",
            vec![
                Column::new("MonthlyIncome", vec![2100.into(), 1900.into(), 2100.into(), 5000.into()]),
                Column::new(ATTRITION, vec!["No".into(), "No".into(), "Yes".into(), "No".into()]),
            ],
        );
        let agg = aggregate_count_by(
            &view,
            &[Grouping::rounded("MonthlyIncome", 1000), Grouping::column(ATTRITION)],
        )
        .unwrap();

        let rows: Vec<(Vec<Value>, f64)> = agg.rows.iter().map(|r| (r.key.clone(), r.value)).collect();
        assert_eq!(
            rows,
            vec![
                (vec![Value::Int(2000), Value::text("No")], 2.0),
                (vec![Value::Int(2000), Value::text("Yes")], 1.0),
                (vec![Value::Int(5000), Value::text("No")], 1.0),
            ]
        );
        assert_eq!(agg.group_by, vec!["MonthlyIncome", ATTRITION]);
    }

    #[test]
    fn rows_are_ordered_by_key_regardless_of_input_order() {
        let view = DerivedView::from_columns(
            "years",
            vec![Column::new("YearsAtCompany", vec![5.into(), 1.into(), 10.into(), 1.into()])],
        );
        let agg = aggregate_count(&view, &["YearsAtCompany"]).unwrap();
        assert_eq!(
            agg.key_values(0),
            vec![Value::Int(1), Value::Int(5), Value::Int(10)]
        );
    }

    #[test]
    fn key_values_are_sorted_at_every_position() {
        let view = DerivedView::from_columns(
            "attrition",
            vec![
                Column::new("Department", vec!["HR".into(), "Sales".into(), "Sales".into()]),
                Column::new("Gender", vec!["Male".into(), "Female".into(), "Male".into()]),
            ],
        );
        let agg = aggregate_count(&view, &["Department", "Gender"]).unwrap();
        // rows run (HR, Male), (Sales, Female), (Sales, Male)
        assert_eq!(agg.key_values(1), vec![Value::text("Female"), Value::text("Male")]);
        assert_eq!(agg.key_values(0), vec![Value::text("HR"), Value::text("Sales")]);
    }

    #[test]
    fn correlation_of_linear_columns() {
        let view = DerivedView::from_columns(
            "numbers",
            vec![
                Column::new("A", vec![1.into(), 2.into(), 3.into()]),
                Column::new("B", vec![2.into(), 4.into(), 6.into()]),
                Column::new("C", vec![3.into(), 2.into(), 1.into()]),
                Column::new("Flat", vec![1.into(), 1.into(), 1.into()]),
                Column::new("Label", vec!["x".into(), "y".into(), "z".into()]),
            ],
        );
        let m = correlation_matrix(&view).unwrap();
        assert_eq!(m.labels, vec!["A", "B", "C", "Flat"]);
        let ab = m.values[0][1].unwrap();
        let ac = m.values[0][2].unwrap();
        assert!((ab - 1.0).abs() < 1e-12);
        assert!((ac + 1.0).abs() < 1e-12);
        assert_eq!(m.values[0][3], None);
        assert_eq!(m.values[3][3], None);
    }

    #[test]
    fn summary_helpers() {
        let view = departments();
        assert!((mean_of(&view, ATTRITION).unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(sum_of(&view, ATTRITION).unwrap(), 2);
    }
}
