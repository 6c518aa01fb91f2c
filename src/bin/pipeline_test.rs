use attrition::chart::ChartData;
use attrition::{BaseTable, ChartKind, Dashboard, DashboardError, EmployeeRecord, ViewName};
use std::assert;

// Helper to build a row every re-coding accepts
fn employee(i: i64) -> EmployeeRecord {
    let departments = ["Human Resources", "Research & Development", "Sales"];
    let travel = ["Non-Travel", "Travel_Rarely", "Travel_Frequently"];
    let idx = i as usize;
    EmployeeRecord {
        age: 30 + i,
        attrition: (if i % 3 == 0 { "Yes" } else { "No" }).to_string(),
        business_travel: travel[idx % 3].to_string(),
        department: departments[(idx / 3) % 3].to_string(),
        distance_from_home: 1 + i * 3,
        education: i % 5 + 1,
        education_field: "Medical".to_string(),
        employee_count: 1,
        employee_number: i + 1,
        environment_satisfaction: i % 4 + 1,
        gender: (if i % 2 == 0 { "Male" } else { "Female" }).to_string(),
        job_involvement: i % 4 + 1,
        job_role: "Research Scientist".to_string(),
        job_satisfaction: (i + 1) % 4 + 1,
        marital_status: "Married".to_string(),
        monthly_income: 2000 + i * 750,
        over18: "Y".to_string(),
        over_time: (if i % 2 == 0 { "Yes" } else { "No" }).to_string(),
        percent_salary_hike: 12,
        performance_rating: 3 + i % 2,
        relationship_satisfaction: 2,
        standard_hours: 80,
        work_life_balance: i % 4 + 1,
        years_at_company: i,
        ..Default::default()
    }
}

fn build() -> Dashboard {
    let records = (0..9).map(employee).collect();
    let table = BaseTable::from_records(records).unwrap();
    Dashboard::build(&table).unwrap()
}

fn test_views_keep_rows() {
    println!("\n====== Testing derived views ======");
    let dashboard = build();
    for view in dashboard.context().views() {
        assert_eq!(view.row_count(), 9);
        println!("✓ View {} has 9 rows", view.name());
    }
    let commute = dashboard.context().view(ViewName::Commute);
    assert!(commute.has_column("CommuteGroup"));
    println!("✓ Commute view carries CommuteGroup");
}

fn test_cards() {
    println!("\n====== Testing headline cards ======");
    let dashboard = build();
    let values: Vec<&str> = dashboard.cards().iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["9", "33%", "4"]);
    println!("✓ Cards read {:?}", values);
}

fn test_filter_cycle() {
    println!("\n====== Testing filter cycle ======");
    let dashboard = build();
    let selection: Vec<String> = vec!["Yes".to_string(), "No".to_string()];

    let first = dashboard.on_filter_change("ot-checkbox-1", &selection).unwrap();
    assert_eq!(first.output_id, "ot-percent");
    assert_eq!(first.figure.kind, ChartKind::Bar);
    println!("✓ Overtime chart rendered");

    let cleared = dashboard.on_filter_change("ot-checkbox-1", &[]).unwrap();
    assert!(cleared.figure.is_empty());
    println!("✓ Empty selection clears the chart");

    let again = dashboard.on_filter_change("ot-checkbox-1", &selection).unwrap();
    assert_eq!(first, again);
    println!("✓ Reselecting restores the chart");

    let ChartData::Series(series) = &again.figure.data else {
        panic!("overtime chart should hold series");
    };
    let rates: Vec<f64> = series.iter().flat_map(|s| s.values.iter().copied()).collect();
    // overtime on even employees: 0, 2, 4, 6, 8 with leavers 0 and 6
    assert_eq!(rates, vec![0.25, 0.4]);
    println!("✓ Rates by overtime are {:?}", rates);
}

fn test_errors() {
    println!("\n====== Testing error handling ======");
    let dashboard = build();
    let err = dashboard.on_filter_change("missing-control", &[]).unwrap_err();
    assert!(matches!(err, DashboardError::UnknownControl(_)));
    println!("✓ Unknown control rejected: {}", err);

    let err = dashboard
        .on_filter_change("dept-pie-checkbox", &["Marketing".to_string()])
        .unwrap_err();
    assert!(matches!(err, DashboardError::UnknownOption { .. }));
    println!("✓ Unknown option rejected: {}", err);

    let empty = BaseTable::from_records(Vec::new());
    assert!(matches!(empty, Err(DashboardError::DataUnavailable(_))));
    println!("✓ Empty dataset rejected");
}

fn main() {
    test_views_keep_rows();
    test_cards();
    test_filter_cycle();
    test_errors();
    println!("\nAll pipeline tests passed!");
}
