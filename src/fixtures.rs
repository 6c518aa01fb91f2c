//! Synthetic employees shared by the unit tests.

use crate::loader::BaseTable;
use crate::record::EmployeeRecord;

pub(crate) fn employee(department: &str, attrition: &str, distance: i64) -> EmployeeRecord {
    EmployeeRecord {
        age: 35,
        attrition: attrition.to_string(),
        business_travel: "Travel_Rarely".to_string(),
        daily_rate: 800,
        department: department.to_string(),
        distance_from_home: distance,
        education: 3,
        education_field: "Life Sciences".to_string(),
        employee_count: 1,
        employee_number: 1,
        environment_satisfaction: 2,
        gender: "Female".to_string(),
        hourly_rate: 60,
        job_involvement: 3,
        job_level: 2,
        job_role: "Sales Executive".to_string(),
        job_satisfaction: 4,
        marital_status: "Single".to_string(),
        monthly_income: 5993,
        monthly_rate: 19479,
        num_companies_worked: 1,
        over18: "Y".to_string(),
        over_time: "Yes".to_string(),
        percent_salary_hike: 11,
        performance_rating: 3,
        relationship_satisfaction: 1,
        standard_hours: 80,
        stock_option_level: 0,
        total_working_years: 8,
        training_times_last_year: 2,
        work_life_balance: 1,
        years_at_company: 6,
        years_in_current_role: 4,
        years_since_last_promotion: 0,
        years_with_curr_manager: 5,
    }
}

/// Twelve employees varied enough that every control option matches rows
pub(crate) fn workforce() -> Vec<EmployeeRecord> {
    let departments = ["Human Resources", "Research & Development", "Sales"];
    let travel = ["Non-Travel", "Travel_Rarely", "Travel_Frequently"];
    let roles = [
        "Healthcare Representative",
        "Human Resources",
        "Laboratory Technician",
        "Manager",
        "Manufacturing Director",
        "Research Director",
        "Research Scientist",
        "Sales Executive",
        "Sales Representative",
    ];
    let fields = ["Life Sciences", "Medical", "Marketing"];

    (0..12)
        .map(|i: i64| {
            let idx = i as usize;
            let mut e = employee(
                departments[idx % 3],
                if i % 4 == 1 { "Yes" } else { "No" },
                [1, 4, 5, 12, 21, 9][idx % 6],
            );
            e.employee_number = i + 1;
            e.age = 25 + i * 3;
            e.business_travel = travel[idx % 3].to_string();
            e.job_role = roles[idx % 9].to_string();
            e.education = i % 5 + 1;
            e.education_field = fields[idx % 3].to_string();
            e.gender = (if i % 2 == 0 { "Male" } else { "Female" }).to_string();
            e.over_time = (if i % 4 == 0 { "Yes" } else { "No" }).to_string();
            e.monthly_income = 1500 + i * 900;
            e.percent_salary_hike = 11 + i % 4;
            e.performance_rating = 3 + i % 2;
            e.work_life_balance = i % 4 + 1;
            e.environment_satisfaction = i % 4 + 1;
            e.job_involvement = (i + 1) % 4 + 1;
            e.job_satisfaction = (i + 2) % 4 + 1;
            e.relationship_satisfaction = (i + 3) % 4 + 1;
            e.stock_option_level = i % 4;
            e.years_at_company = i % 7;
            e.years_in_current_role = i % 5;
            e.years_since_last_promotion = i % 3;
            e
        })
        .collect()
}

pub(crate) fn workforce_table() -> BaseTable {
    BaseTable::from_records(workforce()).expect("fixture has rows")
}
