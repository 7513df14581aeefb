mod cli;

use cbom_bench::adapters::outbound::console::StderrProgressReporter;
use cbom_bench::adapters::outbound::filesystem::{
    CbomDirectoryReader, FileSystemCbomStore, FileSystemWriter, ReportDirectory, StdoutPresenter,
};
use cbom_bench::adapters::outbound::formatters::{CsvTableCodec, SvgChartRenderer};
use cbom_bench::adapters::outbound::network::{CachingSizeProvider, GitHubSizeProvider};
use cbom_bench::application::dto::{AnalysisRequest, PublishRequest, RunDirectory, TableStyle};
use cbom_bench::application::factories::FormatterFactory;
use cbom_bench::application::read_models::ComparisonReadModel;
use cbom_bench::application::use_cases::{
    CompareToolsUseCase, LoadReportUseCase, PublishReportUseCase, RecordCbomUseCase,
};
use cbom_bench::cbom_analysis::domain::ToolName;
use cbom_bench::config::{self, Settings};
use cbom_bench::ports::outbound::{OutputPresenter, ProgressReporter};
use cbom_bench::shared::error::{CbomBenchError, ExitCode};
use cbom_bench::shared::security::read_checked;
use cbom_bench::shared::Result;
use cli::{Args, Command, GlobalArgs};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

type SizeProvider = CachingSizeProvider<GitHubSizeProvider>;

#[tokio::main]
async fn main() {
    // Invalid arguments exit with code 2 inside clap
    let args = Args::parse_args();
    init_tracing(args.global.verbose);

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Diagnostic logging to stderr; RUST_LOG wins over --verbose
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,cbom_bench=debug,cbombench=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let settings = load_settings(&args.global)?;
    tracing::debug!(?settings, "effective settings");

    match args.command {
        Command::Analyze {
            save,
            format,
            output,
        } => analyze(&settings, &args.global, save, format.into(), output).await,
        Command::Load {
            file,
            format,
            output,
        } => load(&settings, file, format.into(), output),
        Command::List => list(&settings),
        Command::Record {
            tool,
            url,
            file,
            duration,
        } => record(&settings, &tool, &url, &file, duration),
        Command::DeleteData { yes } => delete_data(&settings, yes),
    }
}

/// Merges CLI options, the config file and defaults
fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    let config_file = match &global.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&std::env::current_dir()?)?,
    };
    Settings::merge(config_file, global.overrides())
}

async fn analyze(
    settings: &Settings,
    global: &GlobalArgs,
    save: bool,
    style: TableStyle,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    validate_cbom_dir(&settings.cbom_dir)?;

    let progress_reporter = StderrProgressReporter::new();
    let size_provider = create_size_provider(settings, global, &progress_reporter)?;
    let request = AnalysisRequest::new(
        settings.tools.clone(),
        size_provider.is_some(),
        settings.size_language.clone(),
    );

    let use_case = CompareToolsUseCase::new(
        CbomDirectoryReader::new(&settings.cbom_dir, &settings.metrics_dir),
        CbomDirectoryReader::new(&settings.cbom_dir, &settings.metrics_dir),
        size_provider,
        progress_reporter,
    );
    let response = use_case.execute(request).await?;

    if response.has_no_data() {
        eprintln!(
            "⚠️  No CBOM files found for {} in {}",
            tool_list(&settings.tools),
            settings.cbom_dir.display()
        );
        return Ok(ExitCode::NoData);
    }
    eprintln!(
        "📋 Analyzed {} file(s), {} failed",
        response.files_analyzed, response.failed_files
    );

    publish(
        settings,
        &response.model,
        PublishRequest::new(RunDirectory::Timestamped, save),
        style,
        output,
    )?;
    Ok(ExitCode::Success)
}

fn create_size_provider(
    settings: &Settings,
    global: &GlobalArgs,
    progress_reporter: &StderrProgressReporter,
) -> Result<Option<SizeProvider>> {
    if !settings.fetch_repository_sizes {
        return Ok(None);
    }
    let Some(token) = global.github_token.as_deref().filter(|t| !t.trim().is_empty()) else {
        progress_reporter.report_error(
            "⚠️  Warning: GITHUB_TOKEN is not set; repository sizes will be skipped",
        );
        return Ok(None);
    };

    let client = GitHubSizeProvider::new(&settings.github_api_url, Some(token), &settings.size_language)?;
    Ok(Some(CachingSizeProvider::new(client)))
}

fn load(
    settings: &Settings,
    file: Option<String>,
    style: TableStyle,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let use_case = LoadReportUseCase::new(
        ReportDirectory::new(&settings.reports_dir),
        CsvTableCodec::new(),
        StderrProgressReporter::new(),
    );

    let report = match file {
        Some(file) => file,
        None => {
            let reports = use_case.list()?;
            if reports.is_empty() {
                eprintln!(
                    "⚠️  No saved reports found in {}",
                    settings.reports_dir.display()
                );
                return Ok(ExitCode::NoData);
            }
            prompt_for_report(&reports)?
        }
    };

    let (model, directory) = use_case.load(&report, &settings.tools, &settings.size_language)?;
    if model.is_empty() {
        eprintln!("⚠️  Report {} contains no records", report);
        return Ok(ExitCode::NoData);
    }

    publish(
        settings,
        &model,
        PublishRequest::new(RunDirectory::Existing(directory), false),
        style,
        output,
    )?;
    Ok(ExitCode::Success)
}

fn publish(
    settings: &Settings,
    model: &ComparisonReadModel,
    request: PublishRequest,
    style: TableStyle,
    output: Option<PathBuf>,
) -> Result<()> {
    let use_case = PublishReportUseCase::new(
        ReportDirectory::new(&settings.reports_dir),
        SvgChartRenderer::new(),
        CsvTableCodec::new(),
        FormatterFactory::create(style),
        FormatterFactory::create(TableStyle::Markdown),
        StderrProgressReporter::new(),
    );
    let response = use_case.execute(model, request)?;

    let presenter: Box<dyn OutputPresenter> = match output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&response.tables)
}

fn list(settings: &Settings) -> Result<ExitCode> {
    let use_case = LoadReportUseCase::new(
        ReportDirectory::new(&settings.reports_dir),
        CsvTableCodec::new(),
        StderrProgressReporter::new(),
    );
    let reports = use_case.list()?;
    if reports.is_empty() {
        eprintln!(
            "No saved reports found in {}",
            settings.reports_dir.display()
        );
        return Ok(ExitCode::Success);
    }

    let mut stdout = io::stdout().lock();
    for report in reports {
        writeln!(stdout, "{}", report)?;
    }
    Ok(ExitCode::Success)
}

fn record(
    settings: &Settings,
    tool: &str,
    url: &str,
    file: &Path,
    duration: Option<f64>,
) -> Result<ExitCode> {
    let tool = ToolName::new(tool)?;
    let content = read_checked(file, "CBOM file")?;

    let use_case = RecordCbomUseCase::new(
        FileSystemCbomStore::new(&settings.cbom_dir, &settings.metrics_dir),
        StderrProgressReporter::new(),
    );
    use_case.record(&tool, url, &content, duration)?;
    Ok(ExitCode::Success)
}

fn delete_data(settings: &Settings, yes: bool) -> Result<ExitCode> {
    if !yes {
        let question = format!(
            "Delete the {} CBOMs in {} and metrics in {}? [y/N]: ",
            settings
                .tools
                .iter()
                .map(ToolName::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            settings.cbom_dir.display(),
            settings.metrics_dir.display()
        );
        let answer = prompt(&question)?;
        if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
            eprintln!("Aborted");
            return Ok(ExitCode::Success);
        }
    }

    let use_case = RecordCbomUseCase::new(
        FileSystemCbomStore::new(&settings.cbom_dir, &settings.metrics_dir),
        StderrProgressReporter::new(),
    );
    use_case.delete_all(&settings.tools)?;
    Ok(ExitCode::Success)
}

/// Shows the numbered report list and reads the user's choice
fn prompt_for_report(reports: &[String]) -> Result<String> {
    eprintln!("Available reports:");
    for (i, report) in reports.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, report);
    }

    let answer = prompt("Enter the number of the report to load: ")?;
    select_report(reports, &answer)
}

fn select_report(reports: &[String], answer: &str) -> Result<String> {
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| reports.get(i))
        .cloned()
        .ok_or_else(|| {
            CbomBenchError::Validation {
                message: format!(
                    "'{}' is not a report number between 1 and {}",
                    answer,
                    reports.len()
                ),
            }
            .into()
        })
}

fn prompt(question: &str) -> Result<String> {
    eprint!("{}", question);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn validate_cbom_dir(path: &Path) -> Result<()> {
    let metadata = std::fs::symlink_metadata(path).map_err(|_| {
        CbomBenchError::CbomDirectoryNotFound {
            path: path.to_path_buf(),
        }
    })?;

    // Security check: Reject symbolic links for the data directory
    if metadata.is_symlink() {
        return Err(CbomBenchError::SecurityError {
            path: path.to_path_buf(),
            reason: "CBOM directory is a symbolic link".to_string(),
            hint: "Point --cbom-dir at the real directory".to_string(),
        }
        .into());
    }

    if !metadata.is_dir() {
        return Err(CbomBenchError::CbomDirectoryNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

fn tool_list(tools: &[ToolName]) -> String {
    tools
        .iter()
        .map(ToolName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
