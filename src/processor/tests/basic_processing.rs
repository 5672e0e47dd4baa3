//! Basic processing integration tests

use super::*;
use crate::config::Config;
use crate::processor::{FileProcessor, OutputTargets};
use tempfile::TempDir;

#[tokio::test]
async fn test_basic_processing_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_station_file(
        temp_dir.path(),
        "Stacje_klimat.csv",
        &[CANONICAL, UNRECOVERABLE, SPLIT_NAME, MISSING_SECONDS],
    );

    let processor = FileProcessor::new(Config::default()).unwrap();
    let report = processor
        .process_file(&input, &OutputTargets::default())
        .await
        .unwrap();

    assert_eq!(report.stats.lines_read, 4);
    assert_eq!(report.stats.records_accepted, 3);
    assert_eq!(report.stats.records_rejected, 1);
    assert_eq!(report.stats.names_merged, 1);
    assert_eq!(report.stats.seconds_filled, 1);

    let expected_output = temp_dir.path().join("correct-Stacje_klimat.csv");
    assert_eq!(report.output.as_ref().unwrap().path, expected_output);

    let written = fs::read_to_string(&expected_output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            CANONICAL,
            "350 249190560 Nowy-Targ 49 28 40 20 01 15 K 1951 2020 70 12 0 3 5",
            "350 Hel 54 36 0 18 48 0 1 K 1951 2020 70 12 0 3 5",
        ]
    );
    assert!(written.ends_with('\n'));
}

#[tokio::test]
async fn test_rejections_reported_with_identifier() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_station_file(temp_dir.path(), "stations.csv", &[UNRECOVERABLE]);

    let processor = FileProcessor::new(Config::default()).unwrap();
    let report = processor
        .process_file(&input, &OutputTargets::default())
        .await
        .unwrap();

    assert_eq!(report.normalized.rejections.len(), 1);
    let rejection = &report.normalized.rejections[0];
    assert_eq!(rejection.identifier(), "12345");
    assert_eq!(rejection.raw.line_number, 2);
    assert!(rejection.message().contains("malformed station record"));

    // Nothing accepted still produces an (empty) output file
    let written = fs::read_to_string(report.output.unwrap().path).unwrap();
    assert!(written.is_empty());
}

#[tokio::test]
async fn test_explicit_output_and_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_station_file(temp_dir.path(), "stations.csv", &[CANONICAL, UNRECOVERABLE]);
    let output = temp_dir.path().join("out").join("normalized.txt");
    let report_path = temp_dir.path().join("out").join("rejected.tsv");

    let processor = FileProcessor::new(Config::default()).unwrap();
    let targets = OutputTargets {
        output: Some(output.clone()),
        report: Some(report_path.clone()),
        dry_run: false,
    };
    let report = processor.process_file(&input, &targets).await.unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        format!("{CANONICAL}\n")
    );
    assert_eq!(report.report.unwrap().lines, 1);
    let tsv = fs::read_to_string(&report_path).unwrap();
    assert!(tsv.contains("3\t12345\tsentinel at index 8, expected 9\t"));
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_station_file(temp_dir.path(), "stations.csv", &[CANONICAL]);

    let processor = FileProcessor::new(Config::default()).unwrap();
    let targets = OutputTargets {
        dry_run: true,
        ..Default::default()
    };
    let report = processor.process_file(&input, &targets).await.unwrap();

    assert!(report.output.is_none());
    assert_eq!(report.stats.records_accepted, 1);
    assert!(!temp_dir.path().join("correct-stations.csv").exists());
}

#[tokio::test]
async fn test_normalized_output_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_station_file(
        temp_dir.path(),
        "stations.csv",
        &[CANONICAL, SPLIT_NAME, MISSING_SECONDS],
    );

    let processor = FileProcessor::new(Config::default()).unwrap();
    let first = processor
        .process_file(&input, &OutputTargets::default())
        .await
        .unwrap();

    // Re-running on the output (with a fresh header) changes nothing
    let first_output = fs::read_to_string(first.output.unwrap().path).unwrap();
    let records: Vec<&str> = first_output.lines().collect();
    let again = write_station_file(temp_dir.path(), "again.csv", &records);
    let second = processor
        .process_file(&again, &OutputTargets::default())
        .await
        .unwrap();

    let second_output = fs::read_to_string(second.output.unwrap().path).unwrap();
    assert_eq!(first_output, second_output);
    assert_eq!(second.stats.names_merged, 0);
    assert_eq!(second.stats.seconds_filled, 0);
}
