mod common;

use common::{run_log, ResultDir};
use sweep_results::{
    build_static_table, build_static_tables,
    metrics::{ed2p, mlups},
    Error, Implementation, Record, ScanCfg, Value,
};

fn reference_dir() -> ResultDir {
    ResultDir::new(
        "reference_64",
        &[
            (
                "64_200_c20_u28_t8",
                &run_log(
                    120.5,
                    &[
                        ("kernelA", 1, 5.0, 10.0),
                        ("kernelB", 1, 3.0, 2.5),
                        ("kernelA", 2, 7.0, 12.0),
                    ],
                ),
            ),
            (
                "64_200_c12_u12_t2",
                &run_log(300.0, &[("kernelA", 1, 9.0, 4.0), ("kernelB", 1, 6.0, 1.0)]),
            ),
        ],
    )
}

#[test]
fn test_static_rows() {
    let dir = reference_dir();
    let scan = build_static_table(dir.path(), &ScanCfg::default()).unwrap();
    assert!(scan.report.is_clean(), "report: {:?}", scan.report);
    assert_eq!(scan.report.files_scanned, 2);
    assert_eq!(scan.table.len(), 2);

    // Rows follow file name order.
    let first = &scan.table[0];
    assert_eq!(first.key.file_name(), "64_200_c12_u12_t2");
    assert_eq!(first.total_energy, 5.0);
    assert_eq!(first.runtime_ms, 300.0);

    let row = &scan.table[1];
    assert_eq!(row.key.file_name(), "64_200_c20_u28_t8");
    assert_eq!(row.key.implementation, Implementation::Reference);
    assert_eq!(row.total_energy, 24.5, "sum of all kernel energies");
    assert_eq!(row.runtime_ms, 120.5, "runtime from the #C line");
    assert_eq!(row.edp, 2952.0);
    assert_eq!(row.ed2p, ed2p(24.5, 120.5));
    assert_eq!(row.mlups, mlups(120.5, 64, 200));
}

#[test]
fn test_problem_files_are_reported_not_fatal() {
    let dir = reference_dir();
    dir.write("64_200_c14_u14_t4", "kernelA,1,5.0,10.0\n");
    dir.write("64_200_c16_u16_t4", "");
    dir.write("notes.txt", "not a result file\n");
    dir.write(".DS_Store", "");
    dir.write(
        "64_200_c18_u18_t4",
        "kernelA,1,5.0,10.0\nkernelA,1,garbage\n#Compute time : 50.0\n",
    );

    let scan = build_static_table(dir.path(), &ScanCfg::default()).unwrap();
    let report = &scan.report;

    assert_eq!(scan.table.len(), 3, "two clean files plus the one with a bad line");
    assert_eq!(report.files_scanned, 6, "hidden entries are not scanned");
    assert_eq!(report.empty_files(), vec![dir.path().join("64_200_c16_u16_t4")]);
    assert_eq!(report.skipped_line_count(), 1);
    assert_eq!(
        report
            .skipped_lines_by_file()
            .get(&dir.path().join("64_200_c18_u18_t4")),
        Some(&1)
    );

    let skipped: Vec<(&str, &Error)> = report
        .skipped_files()
        .map(|i| (i.file.as_deref().unwrap(), &i.error))
        .collect();
    assert_eq!(skipped.len(), 2, "skipped: {skipped:?}");
    assert!(matches!(skipped[0], ("64_200_c14_u14_t4", Error::MissingRuntimeMarker)));
    assert!(matches!(
        skipped[1],
        ("notes.txt", Error::MalformedFilename { field: "size", .. })
    ));

    let partial = scan
        .table
        .iter()
        .find(|r| r.key.file_name() == "64_200_c18_u18_t4")
        .unwrap();
    assert_eq!(partial.total_energy, 10.0);
    assert_eq!(partial.runtime_ms, 50.0);
}

#[test]
fn test_hidden_entries_can_be_scanned() {
    let dir = reference_dir();
    dir.write(".DS_Store", "");
    let cfg = ScanCfg::default().with_skip_hidden(false);
    let scan = build_static_table(dir.path(), &cfg).unwrap();
    assert_eq!(scan.table.len(), 2);
    assert_eq!(scan.report.skipped_files().count(), 1);
}

#[test]
fn test_empty_directory() {
    let dir = ResultDir::new("reference_64", &[]);
    let scan = build_static_table(dir.path(), &ScanCfg::default()).unwrap();
    assert!(scan.table.is_empty());
    assert!(scan.report.has_empty_directory());
    assert!(scan.report.empty_files().is_empty());
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = ResultDir::new("reference_64", &[]);
    let missing = dir.path().join("nope");
    assert!(matches!(
        build_static_table(&missing, &ScanCfg::default()),
        Err(Error::Io { .. })
    ));
}

#[test]
fn test_invalid_histogram_config() {
    let dir = reference_dir();
    let cfg = ScanCfg::default().with_hist_sigfig(9);
    assert!(matches!(
        build_static_table(dir.path(), &cfg),
        Err(Error::HistogramConfig)
    ));
}

#[test]
fn test_explicit_implementation_tag() {
    let dir = reference_dir();
    let cfg = ScanCfg::default().with_implementation(Implementation::Avx2St);
    let scan = build_static_table(dir.path(), &cfg).unwrap();
    assert!(scan
        .table
        .iter()
        .all(|r| r.key.implementation == Implementation::Avx2St));
}

#[test]
fn test_concatenated_tables_and_columns() {
    let reference = reference_dir();
    let avx = ResultDir::new(
        "reference_avx_64",
        &[(
            "64_200_c20_u28_t8",
            &run_log(80.0, &[("kernelA", 1, 4.0, 8.0)]),
        )],
    );

    let scan = build_static_tables([reference.path(), avx.path()], &ScanCfg::default()).unwrap();
    assert_eq!(scan.table.len(), 3);
    assert_eq!(scan.report.files_scanned, 3);

    let implementations = scan.table.column("Implementation").unwrap();
    assert_eq!(
        implementations,
        vec![
            Value::Text("Reference".to_owned()),
            Value::Text("Reference".to_owned()),
            Value::Text("AVX2".to_owned()),
        ]
    );
    assert!(scan.table.column("Kernel Name").is_none());

    let map = scan.table[2].to_map();
    assert_eq!(map.len(), 11);
    assert_eq!(map["Threads"], Value::Int(8));
    assert_eq!(map["Core"].as_f64(), Some(2.0));
    assert_eq!(map["Runtime"], Value::Real(80.0));
}

#[test]
fn test_issues_name_their_directory() {
    let content = format!(
        "{}kernelA,1,garbage\n",
        run_log(120.5, &[("kernelA", 1, 5.0, 10.0)])
    );
    let reference = ResultDir::new("reference_64", &[("64_200_c20_u28_t8", &content)]);
    let avx = ResultDir::new("reference_avx_64", &[("64_200_c20_u28_t8", &content)]);

    let scan = build_static_tables([reference.path(), avx.path()], &ScanCfg::default()).unwrap();
    assert_eq!(scan.table.len(), 2);

    let by_file = scan.report.skipped_lines_by_file();
    assert_eq!(by_file.len(), 2, "{by_file:?}");
    assert_eq!(by_file[&reference.path().join("64_200_c20_u28_t8")], 1);
    assert_eq!(by_file[&avx.path().join("64_200_c20_u28_t8")], 1);

    let dirs: Vec<_> = scan.report.issues.iter().map(|i| i.dir.as_path()).collect();
    assert_eq!(dirs, [reference.path(), avx.path()]);
}

#[test]
fn test_invalid_utf8_line_is_skipped() {
    let dir = ResultDir::new("reference_64", &[]);
    let mut content = run_log(120.5, &[("kernelA", 1, 5.0, 10.0), ("kernelB", 1, 3.0, 2.5)]);
    content.push_str("kernelC,1,");
    let mut bytes = content.into_bytes();
    bytes.extend_from_slice(b"\xff,1.0\n\xffgarbage\n");
    dir.write_bytes("64_200_c20_u28_t8", &bytes);

    let scan = build_static_table(dir.path(), &ScanCfg::default()).unwrap();
    assert_eq!(scan.table.len(), 1, "report: {:?}", scan.report);
    assert_eq!(scan.table[0].total_energy, 12.5);
    assert_eq!(scan.table[0].runtime_ms, 120.5);
    assert_eq!(scan.report.skipped_line_count(), 2);
    assert_eq!(scan.report.skipped_files().count(), 0);
}

#[test]
fn test_first_runtime_marker_wins() {
    let content = format!(
        "{}#Compute time : 99.0\n",
        run_log(120.5, &[("kernelA", 1, 5.0, 10.0)])
    );
    let dir = ResultDir::new("reference_64", &[("64_200_c20_u28_t8", &content)]);
    let scan = build_static_table(dir.path(), &ScanCfg::default()).unwrap();
    assert!(scan.report.is_clean());
    assert_eq!(scan.table[0].runtime_ms, 120.5);
}
