//! CSV persistence and parser property tests

use proptest::prelude::*;
use tempfile::tempdir;
use torque_wizard::backend::parser::extract_int;
use torque_wizard::session::{export_csv, import_csv};

#[test]
fn exported_session_reads_back_identically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.csv");

    let values: Vec<i64> = (0..500).map(|i| (i * 13 - 3000) % 777).collect();
    export_csv(&path, &values).unwrap();

    let trace = import_csv(&path).unwrap();
    let read_back: Vec<i64> = trace.points.iter().map(|p| p[1] as i64).collect();
    assert_eq!(read_back, values);
}

proptest! {
    #[test]
    fn csv_round_trips_arbitrary_values(values in proptest::collection::vec(any::<i32>(), 0..200)) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prop.csv");

        let values: Vec<i64> = values.into_iter().map(i64::from).collect();
        export_csv(&path, &values).unwrap();

        let trace = import_csv(&path).unwrap();
        let read_back: Vec<i64> = trace.points.iter().map(|p| p[1] as i64).collect();
        prop_assert_eq!(read_back, values);
    }

    #[test]
    fn extract_int_round_trips_formatted_values(value in any::<i32>(), prefix in "[a-zA-Z :]{0,8}", suffix in "[a-zA-Z ]{0,8}") {
        let line = format!("{}{}{}", prefix, value, suffix);
        prop_assert_eq!(extract_int(&line), Some(i64::from(value)));
    }

    #[test]
    fn extract_int_never_panics(line in ".*") {
        let _ = extract_int(&line);
    }
}
