/// Integration tests for the application layer
mod test_utilities;

use cbom_bench::prelude::*;
use std::fs;
use tempfile::TempDir;
use test_utilities::mocks::*;

const ALPHA_URL: &str = "https://github.com/acme/alpha";
const BETA_URL: &str = "https://github.com/acme/beta";

const CBOMKIT_ALPHA: &str = r#"[{
    "projectIdentifier": "alpha",
    "bom": {
        "bomFormat": "CycloneDX",
        "components": [
            {"type": "cryptographic-asset", "cryptoProperties": {"assetType": "algorithm"}},
            {"type": "cryptographic-asset", "cryptoProperties": {"assetType": "algorithm"}},
            {"type": "cryptographic-asset", "cryptoProperties": {"assetType": "related-crypto-material"}}
        ]
    }
}]"#;

const CDXGEN_ALPHA: &str = r#"{
    "bomFormat": "CycloneDX",
    "components": [
        {"type": "cryptographic-asset", "cryptoProperties": {"assetType": "algorithm"}},
        {"type": "library"}
    ]
}"#;

const CDXGEN_BETA: &str = r#"{"bomFormat": "CycloneDX", "components": []}"#;

fn metrics_json() -> String {
    format!(
        r#"{{
    "alpha": {{
        "cbomkit": {{"duration": 12.5, "url": "{alpha}"}},
        "cdxgen": {{"duration": 3.0, "url": "{alpha}"}}
    }},
    "beta": {{
        "cdxgen": {{"duration": 1.0, "url": "{beta}"}}
    }}
}}"#,
        alpha = ALPHA_URL,
        beta = BETA_URL
    )
}

fn sample_source() -> MockCbomSource {
    MockCbomSource::new()
        .with_cbom("cbomkit", "alpha", CBOMKIT_ALPHA)
        .with_cbom("cdxgen", "alpha", CDXGEN_ALPHA)
        .with_cbom("cdxgen", "beta", CDXGEN_BETA)
}

fn request(fetch_sizes: bool) -> AnalysisRequest {
    AnalysisRequest::new(ToolName::defaults(), fetch_sizes, "Java")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} to be close to {}",
        actual,
        expected
    );
}

#[tokio::test]
async fn test_compare_tools_happy_path() {
    let sizes = MockSizeProvider::new().with_size(ALPHA_URL, 2048, Some(1024));
    let progress_reporter = MockProgressReporter::new();
    let use_case = CompareToolsUseCase::new(
        sample_source(),
        MockMetricsReader::new(&metrics_json()),
        Some(sizes.clone()),
        progress_reporter.clone(),
    );

    let response = use_case.execute(request(true)).await.unwrap();
    assert_eq!(response.files_analyzed, 3);
    assert_eq!(response.failed_files, 0);
    assert!(!response.has_no_data());

    let model = &response.model;
    let keys: Vec<(&str, &str)> = model
        .records
        .iter()
        .map(|r| (r.repository.as_str(), r.tool.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![("alpha", "cbomkit"), ("alpha", "cdxgen"), ("beta", "cdxgen")]
    );
    assert_eq!(model.tools, vec!["cbomkit", "cdxgen"]);

    let cbomkit = &model.records[0];
    assert_eq!(cbomkit.total_components, 3);
    assert_eq!(cbomkit.component_types["algorithm"], 2);
    assert_eq!(cbomkit.component_types["related-crypto-material"], 1);
    assert_eq!(cbomkit.execution_time, Some(12.5));
    assert_eq!(cbomkit.repository_size, Some(2048));
    assert_eq!(cbomkit.language_size, Some(1024));

    // cdxgen reads the top-level type, not the asset type
    let cdxgen_alpha = &model.records[1];
    assert_eq!(cdxgen_alpha.component_types["cryptographic-asset"], 1);
    assert_eq!(cdxgen_alpha.component_types["library"], 1);

    let beta = &model.records[2];
    assert!(beta.is_empty);
    assert_eq!(beta.repository_size, None);

    let cdxgen = model.statistics_for("cdxgen").unwrap();
    assert_eq!(cdxgen.total_repos, 2);
    assert_eq!(cdxgen.empty_cboms, 1);
    assert_close(cdxgen.empty_percentage, 50.0);
    assert_close(cdxgen.avg_components_non_empty, 2.0);
    assert_close(cdxgen.avg_execution_time.unwrap(), 2.0);
    assert_close(cdxgen.execution_time_std.unwrap(), 2f64.sqrt());

    assert_eq!(sizes.call_count(), 2);
    let messages = progress_reporter.get_messages();
    assert!(messages
        .iter()
        .any(|m| m.contains("No CBOM directory found for tool 'deepseek'")));
    assert!(messages
        .iter()
        .any(|m| m.contains("Could not fetch size for https://github.com/acme/beta")));
}

#[tokio::test]
async fn test_malformed_cbom_becomes_error_record() {
    let source = sample_source()
        .with_cbom("deepseek", "alpha", "{not json")
        .with_unreadable("deepseek", "beta");
    let progress_reporter = MockProgressReporter::new();
    let use_case: CompareToolsUseCase<_, _, MockSizeProvider, _> = CompareToolsUseCase::new(
        source,
        MockMetricsReader::new(&metrics_json()),
        None,
        progress_reporter.clone(),
    );

    let response = use_case.execute(request(false)).await.unwrap();
    assert_eq!(response.files_analyzed, 5);
    assert_eq!(response.failed_files, 2);

    let failed: Vec<&ComparisonRecord> = response
        .model
        .records
        .iter()
        .filter(|r| r.tool == "deepseek")
        .collect();
    assert_eq!(failed.len(), 2);
    for record in failed {
        assert!(record.error.is_some());
        assert_eq!(record.total_components, 0);
        assert!(record.is_empty);
    }

    let deepseek = response.model.statistics_for("deepseek").unwrap();
    assert_close(deepseek.empty_percentage, 100.0);
    assert!(progress_reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("Failed to analyze")));
}

#[tokio::test]
async fn test_missing_metrics_degrades_to_absent_times() {
    let progress_reporter = MockProgressReporter::new();
    let use_case: CompareToolsUseCase<_, _, MockSizeProvider, _> = CompareToolsUseCase::new(
        sample_source(),
        MockMetricsReader::missing(),
        None,
        progress_reporter.clone(),
    );

    let response = use_case.execute(request(true)).await.unwrap();
    assert!(response
        .model
        .records
        .iter()
        .all(|r| r.execution_time.is_none() && r.source_url.is_none()));
    assert!(response.model.statistics_for("cbomkit").unwrap().avg_execution_time.is_none());
    assert!(progress_reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("Metrics file not found")));
}

#[tokio::test]
async fn test_unreadable_metrics_is_a_warning() {
    let progress_reporter = MockProgressReporter::new();
    let use_case: CompareToolsUseCase<_, _, MockSizeProvider, _> = CompareToolsUseCase::new(
        sample_source(),
        MockMetricsReader::with_failure(),
        None,
        progress_reporter.clone(),
    );

    let response = use_case.execute(request(false)).await.unwrap();
    assert_eq!(response.model.records.len(), 3);
    assert!(progress_reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("Failed to read metrics file")));
}

#[tokio::test]
async fn test_no_cbom_directories_means_no_data() {
    let use_case: CompareToolsUseCase<_, _, MockSizeProvider, _> = CompareToolsUseCase::new(
        MockCbomSource::new(),
        MockMetricsReader::missing(),
        None,
        MockProgressReporter::new(),
    );

    let response = use_case.execute(request(false)).await.unwrap();
    assert!(response.has_no_data());
    assert_eq!(response.files_analyzed, 0);
    assert!(response.model.statistics.is_empty());
}

#[tokio::test]
async fn test_type_counts_sum_to_total_components() {
    let use_case: CompareToolsUseCase<_, _, MockSizeProvider, _> = CompareToolsUseCase::new(
        sample_source(),
        MockMetricsReader::missing(),
        None,
        MockProgressReporter::new(),
    );

    let response = use_case.execute(request(false)).await.unwrap();
    for stats in &response.model.statistics {
        assert_eq!(
            stats.component_types.values().sum::<usize>(),
            stats.total_components
        );
    }
}

#[tokio::test]
async fn test_record_then_compare_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let cbom_dir = temp_dir.path().join("CBOMdata");
    let metrics_dir = cbom_dir.join("metrics");

    let recorder = RecordCbomUseCase::new(
        FileSystemCbomStore::new(&cbom_dir, &metrics_dir),
        MockProgressReporter::new(),
    );
    let cbomkit = ToolName::new("cbomkit").unwrap();
    let cdxgen = ToolName::new("cdxgen").unwrap();
    recorder
        .record(&cbomkit, "https://github.com/acme/alpha.git", CBOMKIT_ALPHA, Some(12.5))
        .unwrap();
    recorder
        .record(&cdxgen, ALPHA_URL, CDXGEN_ALPHA, Some(3.0))
        .unwrap();
    assert!(cbom_dir.join("cbomkit").join("alpha.json").is_file());

    let use_case: CompareToolsUseCase<_, _, MockSizeProvider, _> = CompareToolsUseCase::new(
        CbomDirectoryReader::new(&cbom_dir, &metrics_dir),
        CbomDirectoryReader::new(&cbom_dir, &metrics_dir),
        None,
        MockProgressReporter::new(),
    );
    let response = use_case.execute(request(false)).await.unwrap();

    let records = &response.model.records;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].tool, "cbomkit");
    assert_eq!(records[0].total_components, 3);
    assert_eq!(records[0].execution_time, Some(12.5));
    assert_eq!(
        records[0].source_url.as_deref(),
        Some("https://github.com/acme/alpha.git")
    );
    assert_eq!(records[1].execution_time, Some(3.0));

    fs::write(cbom_dir.join("README.txt"), "notes").unwrap();
    recorder.delete_all(&[cbomkit, cdxgen]).unwrap();
    assert!(!cbom_dir.join("cbomkit").exists());
    assert!(!cbom_dir.join("cdxgen").exists());
    assert!(!metrics_dir.join("durations.json").exists());
    assert!(cbom_dir.join("README.txt").is_file());
}

#[test]
fn test_record_rejects_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let cbom_dir = temp_dir.path().join("CBOMdata");
    let recorder = RecordCbomUseCase::new(
        FileSystemCbomStore::new(&cbom_dir, cbom_dir.join("metrics")),
        MockProgressReporter::new(),
    );

    let tool = ToolName::new("cdxgen").unwrap();
    let err = recorder.record(&tool, ALPHA_URL, "{oops", None).unwrap_err();
    assert!(format!("{}", err).contains("not valid JSON"));
    assert!(!cbom_dir.exists());
}

#[tokio::test]
async fn test_publish_then_load_round_trip() {
    let use_case = CompareToolsUseCase::new(
        sample_source(),
        MockMetricsReader::new(&metrics_json()),
        Some(MockSizeProvider::new().with_size(ALPHA_URL, 2048, Some(1024))),
        MockProgressReporter::new(),
    );
    let model = use_case.execute(request(true)).await.unwrap().model;

    let reports_dir = TempDir::new().unwrap();
    let publisher = PublishReportUseCase::new(
        ReportDirectory::new(reports_dir.path()),
        SvgChartRenderer::new(),
        CsvTableCodec::new(),
        Box::new(GridTableFormatter::new()),
        Box::new(MarkdownReportFormatter::new()),
        MockProgressReporter::new(),
    );
    let published = publisher
        .execute(&model, PublishRequest::new(RunDirectory::Timestamped, true))
        .unwrap();

    assert!(published.directory.starts_with(reports_dir.path()));
    assert!(published.artifacts[0].ends_with("cbom_comparison.csv"));
    assert!(published.directory.join("summary.md").is_file());
    assert!(published.directory.join("avg_components.svg").is_file());
    assert!(published.directory.join("size_vs_time_all.svg").is_file());
    assert!(published.tables.contains("CBOM Tool Comparison Summary"));

    let loader = LoadReportUseCase::new(
        ReportDirectory::new(reports_dir.path()),
        CsvTableCodec::new(),
        MockProgressReporter::new(),
    );
    let reports = loader.list().unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].ends_with("/cbom_comparison.csv"));

    let (loaded, directory) = loader
        .load(&reports[0], &ToolName::defaults(), "Java")
        .unwrap();
    assert_eq!(directory, published.directory);
    assert_eq!(loaded.records, model.records);
    assert_eq!(loaded.statistics, model.statistics);
}

#[test]
fn test_load_corrupt_report_is_a_parse_error() {
    let reports_dir = TempDir::new().unwrap();
    let run = reports_dir.path().join("2024-01-01-00-00");
    fs::create_dir_all(&run).unwrap();
    fs::write(run.join("cbom_comparison.csv"), "Name,Value\nalpha,1\n").unwrap();

    let loader = LoadReportUseCase::new(
        ReportDirectory::new(reports_dir.path()),
        CsvTableCodec::new(),
        MockProgressReporter::new(),
    );
    let err = loader
        .load("2024-01-01-00-00/cbom_comparison.csv", &ToolName::defaults(), "Java")
        .unwrap_err();
    let message = format!("{}", err);
    assert!(message.contains("Failed to parse report"));
    assert!(message.contains("missing required column 'Repository'"));
}
