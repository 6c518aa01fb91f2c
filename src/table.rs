use crate::error::{DashboardError, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A single cell of a view
///
/// The dataset only carries integers and text, so values stay hashable and
/// totally ordered, which is what grouping needs. `Null` marks an unclassified
/// bucket and sorts before everything else.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
}

impl Value {
    pub fn text(s: &str) -> Self {
        Value::Text(s.to_string())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Option<&str>> for Value {
    fn from(s: Option<&str>) -> Self {
        s.map(Value::from).unwrap_or(Value::Null)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// True when every value is an integer, i.e. the column can take part in
    /// numeric summaries such as the correlation matrix.
    pub fn is_numeric(&self) -> bool {
        !self.values.is_empty() && self.values.iter().all(|v| v.as_int().is_some())
    }
}

/// An immutable, fully materialized projection of the employee table
///
/// Every transformation returns a new view. Re-coding keeps the row count;
/// only [`DerivedView::filter_in`] drops rows, and it is used by the
/// interactive controller on a per-render copy.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedView {
    name: String,
    columns: Vec<Column>,
    rows: usize,
}

impl DerivedView {
    pub(crate) fn from_columns(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        debug_assert!(columns.iter().all(|c| c.values.len() == rows));
        DerivedView {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Result<&[Value]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| DashboardError::UnknownColumn {
                view: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Same data under a different view name
    pub fn renamed(&self, name: &str) -> Self {
        DerivedView {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// Replace every value of `column` with `f(value)`.
    pub fn map_column<F>(&self, column: &str, f: F) -> Result<Self>
    where
        F: Fn(&Value) -> Result<Value>,
    {
        let mut view = self.clone();
        let idx = self.column_index(column)?;
        view.columns[idx].values = self.columns[idx]
            .values
            .iter()
            .map(f)
            .collect::<Result<Vec<_>>>()?;
        Ok(view)
    }

    /// Append (or overwrite) `target`, computed row by row from `source`.
    pub fn derive_column<F>(&self, source: &str, target: &str, f: F) -> Result<Self>
    where
        F: Fn(&Value) -> Value,
    {
        let values: Vec<Value> = self.column(source)?.iter().map(f).collect();
        let mut view = self.clone();
        match view.columns.iter_mut().find(|c| c.name == target) {
            Some(existing) => existing.values = values,
            None => view.columns.push(Column::new(target, values)),
        }
        Ok(view)
    }

    /// Cosmetic rename of columns. Names not present are ignored.
    pub fn rename_columns(&self, renames: &[(&str, &str)]) -> Self {
        let mut view = self.clone();
        for column in view.columns.iter_mut() {
            if let Some((_, to)) = renames.iter().find(|(from, _)| *from == column.name) {
                column.name = to.to_string();
            }
        }
        view
    }

    pub fn drop_columns(&self, names: &[&str]) -> Self {
        let mut view = self.clone();
        view.columns.retain(|c| !names.contains(&c.name.as_str()));
        view
    }

    /// Rows whose `column` value, as displayed, is a member of `selection`.
    /// Null never matches.
    pub fn filter_in(&self, column: &str, selection: &BTreeSet<String>) -> Result<Self> {
        let keep: Vec<bool> = self
            .column(column)?
            .iter()
            .map(|v| !v.is_null() && selection.contains(&v.to_string()))
            .collect();

        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = c
                    .values
                    .iter()
                    .zip(&keep)
                    .filter(|(_, k)| **k)
                    .map(|(v, _)| v.clone())
                    .collect();
                Column::new(c.name.clone(), values)
            })
            .collect::<Vec<_>>();

        let rows = keep.iter().filter(|k| **k).count();
        Ok(DerivedView {
            name: self.name.clone(),
            columns,
            rows,
        })
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| DashboardError::UnknownColumn {
                view: self.name.clone(),
                column: name.to_string(),
            })
    }
}
