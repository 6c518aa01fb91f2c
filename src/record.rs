use crate::table::{Column, Value};
use serde::{Deserialize, Serialize};

/// One employee row, named after the dataset's header columns
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeRecord {
    pub age: i64,
    pub attrition: String,
    pub business_travel: String,
    pub daily_rate: i64,
    pub department: String,
    pub distance_from_home: i64,
    pub education: i64,
    pub education_field: String,
    pub employee_count: i64,
    pub employee_number: i64,
    pub environment_satisfaction: i64,
    pub gender: String,
    pub hourly_rate: i64,
    pub job_involvement: i64,
    pub job_level: i64,
    pub job_role: String,
    pub job_satisfaction: i64,
    pub marital_status: String,
    pub monthly_income: i64,
    pub monthly_rate: i64,
    pub num_companies_worked: i64,
    pub over18: String,
    pub over_time: String,
    pub percent_salary_hike: i64,
    pub performance_rating: i64,
    pub relationship_satisfaction: i64,
    pub standard_hours: i64,
    pub stock_option_level: i64,
    pub total_working_years: i64,
    pub training_times_last_year: i64,
    pub work_life_balance: i64,
    pub years_at_company: i64,
    pub years_in_current_role: i64,
    pub years_since_last_promotion: i64,
    pub years_with_curr_manager: i64,
}

type Extractor = fn(&EmployeeRecord) -> Value;

// Header order of the dataset file.
const FIELDS: &[(&str, Extractor)] = &[
    ("Age", |r| Value::Int(r.age)),
    ("Attrition", |r| Value::text(&r.attrition)),
    ("BusinessTravel", |r| Value::text(&r.business_travel)),
    ("DailyRate", |r| Value::Int(r.daily_rate)),
    ("Department", |r| Value::text(&r.department)),
    ("DistanceFromHome", |r| Value::Int(r.distance_from_home)),
    ("Education", |r| Value::Int(r.education)),
    ("EducationField", |r| Value::text(&r.education_field)),
    ("EmployeeCount", |r| Value::Int(r.employee_count)),
    ("EmployeeNumber", |r| Value::Int(r.employee_number)),
    ("EnvironmentSatisfaction", |r| Value::Int(r.environment_satisfaction)),
    ("Gender", |r| Value::text(&r.gender)),
    ("HourlyRate", |r| Value::Int(r.hourly_rate)),
    ("JobInvolvement", |r| Value::Int(r.job_involvement)),
    ("JobLevel", |r| Value::Int(r.job_level)),
    ("JobRole", |r| Value::text(&r.job_role)),
    ("JobSatisfaction", |r| Value::Int(r.job_satisfaction)),
    ("MaritalStatus", |r| Value::text(&r.marital_status)),
    ("MonthlyIncome", |r| Value::Int(r.monthly_income)),
    ("MonthlyRate", |r| Value::Int(r.monthly_rate)),
    ("NumCompaniesWorked", |r| Value::Int(r.num_companies_worked)),
    ("Over18", |r| Value::text(&r.over18)),
    ("OverTime", |r| Value::text(&r.over_time)),
    ("PercentSalaryHike", |r| Value::Int(r.percent_salary_hike)),
    ("PerformanceRating", |r| Value::Int(r.performance_rating)),
    ("RelationshipSatisfaction", |r| Value::Int(r.relationship_satisfaction)),
    ("StandardHours", |r| Value::Int(r.standard_hours)),
    ("StockOptionLevel", |r| Value::Int(r.stock_option_level)),
    ("TotalWorkingYears", |r| Value::Int(r.total_working_years)),
    ("TrainingTimesLastYear", |r| Value::Int(r.training_times_last_year)),
    ("WorkLifeBalance", |r| Value::Int(r.work_life_balance)),
    ("YearsAtCompany", |r| Value::Int(r.years_at_company)),
    ("YearsInCurrentRole", |r| Value::Int(r.years_in_current_role)),
    ("YearsSinceLastPromotion", |r| Value::Int(r.years_since_last_promotion)),
    ("YearsWithCurrManager", |r| Value::Int(r.years_with_curr_manager)),
];

/// Column-major copy of the records, one column per dataset header
pub fn to_columns(records: &[EmployeeRecord]) -> Vec<Column> {
    FIELDS
        .iter()
        .map(|(name, extract)| Column::new(*name, records.iter().map(extract).collect()))
        .collect()
}

pub fn header_names() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|(name, _)| *name)
}
