mod common;

use common::{run_log, ResultDir};
use sweep_results::{check_integrity, Error};

fn expected_names() -> Vec<String> {
    let mut names = Vec::new();
    for threads in [2, 4, 8] {
        for core in [12, 20] {
            names.push(format!("64_200_c{core}_u28_t{threads}"));
        }
    }
    names
}

#[test]
fn test_complete_directory() {
    let content = run_log(10.0, &[("kernelA", 1, 1.0, 1.0)]);
    let files: Vec<(String, &str)> = expected_names()
        .into_iter()
        .map(|n| (n, content.as_str()))
        .collect();
    let files: Vec<(&str, &str)> = files.iter().map(|(n, c)| (n.as_str(), *c)).collect();
    let dir = ResultDir::new("reference_64", &files);
    dir.write("notes.txt", "");

    let report = check_integrity(dir.path(), expected_names()).unwrap();
    assert!(report.is_complete(), "{report:?}");
}

#[test]
fn test_missing_and_empty_files() {
    let content = run_log(10.0, &[("kernelA", 1, 1.0, 1.0)]);
    let dir = ResultDir::new(
        "reference_64",
        &[
            ("64_200_c12_u28_t2", &content),
            ("64_200_c20_u28_t2", ""),
            ("64_200_c12_u28_t4", &content),
            ("64_200_c20_u28_t4", &content),
            ("64_200_c20_u28_t8", ""),
        ],
    );

    let report = check_integrity(dir.path(), expected_names()).unwrap();
    assert!(!report.is_complete());
    assert_eq!(
        report.missing.iter().collect::<Vec<_>>(),
        ["64_200_c12_u28_t8"]
    );
    assert_eq!(
        report.empty.iter().collect::<Vec<_>>(),
        ["64_200_c20_u28_t2", "64_200_c20_u28_t8"]
    );
}

#[test]
fn test_nothing_expected() {
    let dir = ResultDir::new("reference_64", &[]);
    let report = check_integrity(dir.path(), Vec::<&str>::new()).unwrap();
    assert!(report.is_complete());
}

#[test]
fn test_unreadable_directory() {
    let dir = ResultDir::new("reference_64", &[]);
    assert!(matches!(
        check_integrity(dir.path().join("missing"), ["64_200_c12_u28_t2"]),
        Err(Error::Io { .. })
    ));
}
