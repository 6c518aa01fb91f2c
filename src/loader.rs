use crate::error::{DashboardError, Result};
use crate::record::{self, EmployeeRecord};
use crate::table::DerivedView;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The immutable employee table read at startup
#[derive(Clone, Debug, PartialEq)]
pub struct BaseTable {
    records: Vec<EmployeeRecord>,
}

impl BaseTable {
    /// Wrap already-parsed records. An empty record set is treated the same as
    /// an empty file.
    pub fn from_records(records: Vec<EmployeeRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(DashboardError::DataUnavailable(
                "dataset contains no rows".to_string(),
            ));
        }
        Ok(BaseTable { records })
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The root view every named view is derived from, with the raw dataset
    /// columns under their header names.
    pub fn view(&self) -> DerivedView {
        DerivedView::from_columns("base", record::to_columns(&self.records))
    }
}

/// Load the employee dataset from a delimited file
///
/// The file must have a header row naming every column of
/// [`EmployeeRecord`]; extra columns are ignored.
///
/// # Errors
/// * `DataUnavailable` if the file cannot be opened, a row does not match the
///   expected schema, or the file has no data rows
///
/// # Examples
/// ```no_run
/// use attrition::loader::load;
///
/// match load("ibm_emp_att_dataset.csv") {
///     Ok(table) => println!("Loaded {} employees", table.len()),
///     Err(e) => eprintln!("Error loading dataset: {}", e),
/// }
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<BaseTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        DashboardError::DataUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;

    let table = from_reader(file)?;
    info!("Loaded {} employee rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse the dataset from any reader, e.g. an in-memory buffer.
pub fn from_reader<R: Read>(reader: R) -> Result<BaseTable> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| DashboardError::DataUnavailable(format!("header: {}", e)))?;
    if let Some(missing) = record::header_names().find(|name| !headers.iter().any(|h| h == *name)) {
        return Err(DashboardError::DataUnavailable(format!("missing column {}", missing)));
    }

    let records = rdr
        .deserialize::<EmployeeRecord>()
        .enumerate()
        .map(|(i, row)| {
            // header is line 1
            row.map_err(|e| {
                DashboardError::DataUnavailable(format!("row {}: {}", i + 2, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    BaseTable::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;
    use std::io::Write;

    fn csv_of(records: &[EmployeeRecord]) -> Vec<u8> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for r in records {
            writer.serialize(r).unwrap();
        }
        writer.into_inner().unwrap()
    }

    fn employee(attrition: &str, department: &str) -> EmployeeRecord {
        EmployeeRecord {
            attrition: attrition.to_string(),
            department: department.to_string(),
            employee_count: 1,
            ..Default::default()
        }
    }

    #[test]
    fn loads_rows_from_file() {
        let bytes = csv_of(&[employee("Yes", "Sales"), employee("No", "Human Resources")]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let table = load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].department, "Human Resources");

        let view = table.view();
        assert_eq!(view.row_count(), 2);
        assert_eq!(view.column("Attrition").unwrap()[0], Value::text("Yes"));
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = load("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable(_)));
    }

    #[test]
    fn header_only_file_is_data_unavailable() {
        let bytes = csv_of(&[employee("No", "Sales")]);
        let header = String::from_utf8(bytes).unwrap();
        let header = header.lines().next().unwrap().to_string();

        let err = from_reader(header.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            DashboardError::DataUnavailable("dataset contains no rows".to_string())
        );
    }

    #[test]
    fn schema_mismatch_names_the_missing_column() {
        let err = from_reader("Age,Attrition\n41,Yes\n".as_bytes()).unwrap_err();
        assert_eq!(
            err,
            DashboardError::DataUnavailable("missing column BusinessTravel".to_string())
        );
    }

    #[test]
    fn empty_input_is_data_unavailable() {
        let err = from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable(_)));
    }

    #[test]
    fn unparsable_number_reports_row() {
        let bytes = csv_of(&[employee("No", "Sales")]);
        let text = String::from_utf8(bytes).unwrap();
        // Age is the first column
        let broken = text.replacen("\n0,", "\nforty,", 1);

        match from_reader(broken.as_bytes()) {
            Err(DashboardError::DataUnavailable(msg)) => assert!(msg.starts_with("row 2")),
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
    }
}
