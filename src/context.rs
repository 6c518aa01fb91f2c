use crate::error::Result;
use crate::loader::BaseTable;
use crate::recode::*;
use crate::table::DerivedView;
use log::{debug, info};

/// Names of the derived views built at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewName {
    /// Raw dataset columns
    Base,
    /// Constant columns dropped, numeric attrition
    Attrition,
    /// `Attrition` plus ordinal business travel and the income group
    Travel,
    /// `Travel` with short department names and numeric overtime
    Department,
    /// `Attrition` plus the commute group
    Commute,
    /// `Travel` with education labels
    Education,
    /// Raw columns with display names for the satisfaction ratings
    Satisfaction,
    /// `Travel` with performance labels
    Performance,
    /// `Travel` with work-life-balance labels
    WorkLife,
}

impl ViewName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewName::Base => "base",
            ViewName::Attrition => "attrition",
            ViewName::Travel => "travel",
            ViewName::Department => "department",
            ViewName::Commute => "commute",
            ViewName::Education => "education",
            ViewName::Satisfaction => "satisfaction",
            ViewName::Performance => "performance",
            ViewName::WorkLife => "work_life",
        }
    }
}

/// Every derived view, materialized once and read-only afterwards
///
/// Build it at startup and hand out `&DashboardContext` (or an `Arc` of the
/// dashboard owning it) to whatever renders charts.
#[derive(Clone, Debug)]
pub struct DashboardContext {
    base: DerivedView,
    attrition: DerivedView,
    travel: DerivedView,
    department: DerivedView,
    commute: DerivedView,
    education: DerivedView,
    satisfaction: DerivedView,
    performance: DerivedView,
    work_life: DerivedView,
}

impl DashboardContext {
    /// Run every re-coding step over the base table.
    ///
    /// # Errors
    /// * `UnmappedCategory` if the dataset holds a value a re-coding does not
    ///   cover. This is a data-quality defect and should halt startup.
    pub fn build(table: &BaseTable) -> Result<Self> {
        let base = table.view();

        let attrition = step(&base, ViewName::Attrition, &[drop_constant_columns, recode_attrition_numeric])?;
        let travel = step(&attrition, ViewName::Travel, &[recode_business_travel_ordinal, add_income_group])?;
        let department = step(&travel, ViewName::Department, &[shorten_department_labels, recode_overtime_numeric])?;
        let commute = step(&attrition, ViewName::Commute, &[add_commute_group])?;
        let education = step(&travel, ViewName::Education, &[recode_education_label])?;
        let satisfaction = step(&base, ViewName::Satisfaction, &[rename_satisfaction_columns])?;
        let performance = step(&travel, ViewName::Performance, &[recode_performance_label])?;
        let work_life = step(&travel, ViewName::WorkLife, &[recode_work_life_balance_label])?;

        info!("Built 9 derived views over {} rows", base.row_count());

        Ok(DashboardContext {
            base,
            attrition,
            travel,
            department,
            commute,
            education,
            satisfaction,
            performance,
            work_life,
        })
    }

    pub fn view(&self, name: ViewName) -> &DerivedView {
        match name {
            ViewName::Base => &self.base,
            ViewName::Attrition => &self.attrition,
            ViewName::Travel => &self.travel,
            ViewName::Department => &self.department,
            ViewName::Commute => &self.commute,
            ViewName::Education => &self.education,
            ViewName::Satisfaction => &self.satisfaction,
            ViewName::Performance => &self.performance,
            ViewName::WorkLife => &self.work_life,
        }
    }

    pub fn views(&self) -> impl Iterator<Item = &DerivedView> {
        [
            &self.base,
            &self.attrition,
            &self.travel,
            &self.department,
            &self.commute,
            &self.education,
            &self.satisfaction,
            &self.performance,
            &self.work_life,
        ]
        .into_iter()
    }

    pub fn row_count(&self) -> usize {
        self.base.row_count()
    }
}

type Step = fn(&DerivedView) -> Result<DerivedView>;

fn step(from: &DerivedView, name: ViewName, steps: &[Step]) -> Result<DerivedView> {
    let mut view = from.renamed(name.as_str());
    for f in steps {
        view = f(&view)?;
    }
    debug!("View {} has columns {:?}", name.as_str(), view.column_names());
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::fixtures::employee;
    use crate::table::Value;

    fn table() -> BaseTable {
        BaseTable::from_records(vec![
            employee("Human Resources", "Yes", 1),
            employee("Sales", "No", 12),
            employee("Research & Development", "Yes", 0),
        ])
        .unwrap()
    }

    #[test]
    fn every_view_keeps_the_row_count() {
        let ctx = DashboardContext::build(&table()).unwrap();
        assert_eq!(ctx.views().count(), 9);
        for view in ctx.views() {
            assert_eq!(view.row_count(), 3, "view {}", view.name());
        }
    }

    #[test]
    fn views_carry_their_recodings() {
        let ctx = DashboardContext::build(&table()).unwrap();

        let attrition = ctx.view(ViewName::Attrition);
        assert_eq!(attrition.name(), "attrition");
        assert_eq!(attrition.column("Attrition").unwrap()[0], Value::Int(1));
        assert!(!attrition.has_column("EmployeeCount"));

        let department = ctx.view(ViewName::Department);
        assert_eq!(department.column("Department").unwrap()[0], Value::text("HR"));
        assert_eq!(department.column("OverTime").unwrap()[0], Value::Int(1));
        assert_eq!(department.column("BusinessTravel").unwrap()[0], Value::Int(3));

        let commute = ctx.view(ViewName::Commute);
        assert_eq!(
            commute.column("CommuteGroup").unwrap(),
            &[Value::text("1 to 5 miles"), Value::text("11 to 20 miles"), Value::Null]
        );

        let travel = ctx.view(ViewName::Travel);
        assert_eq!(travel.column("MonthlyIncomeGroup").unwrap()[0], Value::text("$5,000-$5,999"));

        let satisfaction = ctx.view(ViewName::Satisfaction);
        assert!(satisfaction.has_column("Environment Satisfaction"));
        // the satisfaction view keeps raw attrition labels
        assert_eq!(satisfaction.column("Attrition").unwrap()[0], Value::text("Yes"));

        assert_eq!(
            ctx.view(ViewName::WorkLife).column("WorkLifeBalance").unwrap()[0],
            Value::text("Bad")
        );
        assert_eq!(
            ctx.view(ViewName::Performance).column("PerformanceRating").unwrap()[0],
            Value::text("Excellent")
        );
        assert_eq!(
            ctx.view(ViewName::Education).column("Education").unwrap()[0],
            Value::text("Bachelor")
        );
    }

    #[test]
    fn unmapped_value_halts_the_build() {
        let mut bad = employee("Sales", "No", 3);
        bad.business_travel = "Travel_Sometimes".to_string();
        let table = BaseTable::from_records(vec![employee("Sales", "Yes", 2), bad]).unwrap();

        assert_eq!(
            DashboardContext::build(&table).unwrap_err(),
            DashboardError::UnmappedCategory {
                column: "BusinessTravel".to_string(),
                value: "Travel_Sometimes".to_string()
            }
        );
    }
}
