/*!
# Employee Attrition Dashboard

An interactive analytics dashboard over the IBM HR employee attrition dataset, built in Rust.

## Overview

The dataset is loaded once from CSV, re-coded into a fixed set of read-only derived views,
and summarized into chart specifications: plain serializable descriptions that any
charting front end can draw. Sidebar controls filter the interactive charts; every other
chart is computed once at startup.

## Architecture

### Data Layer
- **Loader** - Reads the CSV into typed employee records (fails fast on missing or malformed data)
- **Derived-View Builder** - Applies total re-coding rules (attrition → 1/0, travel → ordinal,
  education/performance/work-life labels, commute and income buckets) and materializes nine
  named views that never change afterwards

### Analysis Layer
- **Aggregation** - Counts, attrition rates and leaver totals per group, two-pass grouping for
  rounded keys, Pearson correlation matrix
- **Chart Builder** - Line, bar, pie, stacked-bar and heatmap specifications with a shared theme

### Interaction Layer
- **Controls** - Static registry of sidebar checklists and dropdowns, each owning one chart
- **Filter Controller** - Maps `(control, selection)` events to a new chart; an empty selection
  always yields the empty chart
- **Dashboard** - Headline cards, static charts and the page layout

### Web Layer (feature `web`)
- axum routes serving the HTML shells, the page layout and chart updates as JSON

## Modules

- **error**: `DashboardError` and the crate `Result`
- **table**: `Value`, `Column` and the immutable `DerivedView`
- **record**: `EmployeeRecord`, one dataset row
- **loader**: CSV loading into a `BaseTable`
- **recode**: re-coding rules and bucket functions
- **context**: `DashboardContext` holding every named view
- **aggregate**: grouping, measures and correlation
- **chart**: `ChartSpec` and its builders
- **controls**: the control registry
- **controller**: filter/render state machine
- **dashboard**: page assembly
- **config**: startup settings
- **app**: routing (feature `web`)

## REST API Endpoints

- `GET /`, `GET /about`, `GET /dashboard` - HTML pages
- `GET /api/layout` - Page layout with static charts
- `GET /api/initial` - Interactive charts under default selections
- `POST /api/control/{control_id}` - New chart for a selection
*/

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod context;
pub mod controller;
pub mod controls;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod recode;
pub mod record;
pub mod table;

#[cfg(feature = "web")]
pub mod app;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::{Aggregate, AggregateRow, CorrelationMatrix, Grouping, Measure};
pub use chart::{ChartKind, ChartSpec, StyleConfig};
pub use config::Config;
pub use context::{DashboardContext, ViewName};
pub use controller::{ChartUpdate, ControlState, FilterController};
pub use dashboard::{Dashboard, PageLayout};
pub use error::{DashboardError, Result};
pub use loader::{BaseTable, load};
pub use record::EmployeeRecord;
pub use table::{DerivedView, Value};
