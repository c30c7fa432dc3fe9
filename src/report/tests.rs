use std::fs;
use std::path::Path;
use crate::fitting::{FitError, Gaussian, Lorentzian, PeakParameters};
use crate::report::{read_xy_columns, write_channel_profile, write_fit_parameters, ReportError};

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_read_xy_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "curve.csv", "x,y,note\n0,1.5,a\n1, 2.25 ,b\n2.5,-3e2,c\n");

    let dataset = read_xy_columns(&path).unwrap();

    assert_eq!(dataset.x(), &[0.0, 1.0, 2.5]);
    assert_eq!(dataset.y(), &[1.5, 2.25, -300.0]);
}

#[test]
fn test_read_header_only_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "empty.csv", "Pixel Index,Red\n");

    assert!(read_xy_columns(&path).unwrap().is_empty());
}

#[test]
fn test_read_reports_bad_field_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "bad.csv", "x,y\n0,1\n1,oops\n");

    match read_xy_columns(&path).unwrap_err() {
        ReportError::Parse { line, column, value } => {
            assert_eq!(line, 3);
            assert_eq!(column, 2);
            assert_eq!(value, "oops");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_read_single_column_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "narrow.csv", "x\n0\n1\n");

    assert!(matches!(
        read_xy_columns(&path).unwrap_err(),
        ReportError::MissingColumns { line: 2, found: 1 }
    ));
}

#[test]
fn test_read_non_finite_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "nan.csv", "x,y\n0,1\nNaN,2\n");

    assert!(matches!(
        read_xy_columns(&path).unwrap_err(),
        ReportError::InvalidData(FitError::NonFiniteData { column: "x", row: 1 })
    ));
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        read_xy_columns(dir.path().join("absent.csv")).unwrap_err(),
        ReportError::Csv(_)
    ));
}

#[test]
fn test_channel_profile_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile_red.csv");

    write_channel_profile(&path, "Red", &[10, 20, 65535]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "Pixel Index,Red\n0,10\n1,20\n2,65535\n");
}

#[test]
fn test_channel_profile_reads_back_as_fit_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile_green.csv");
    write_channel_profile(&path, "Green", &[5, 7, 9, 7]).unwrap();

    let dataset = read_xy_columns(&path).unwrap();

    assert_eq!(dataset.x(), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(dataset.y(), &[5.0, 7.0, 9.0, 7.0]);
}

#[test]
fn test_fit_parameters_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fit_parameters.csv");
    let params = PeakParameters {
        lorentzians: [
            Lorentzian { amplitude: 100.0, center: 30.0, width: 2.0 },
            Lorentzian { amplitude: 80.5, center: 50.25, width: 3.0 },
            Lorentzian { amplitude: 60.0, center: 70.0, width: 2.5 },
        ],
        gaussian: Gaussian { amplitude: 20.0, center: 50.0, sigma: 25.0 },
    };

    write_fit_parameters(&path, &params).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "Function,Center,Height,Width",
            "Lorentzian1,30,100,2",
            "Lorentzian2,50.25,80.5,3",
            "Lorentzian3,70,60,2.5",
            "Gaussian,50,20,25",
        ]
    );
}
