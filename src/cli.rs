use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cbom_bench::application::dto::TableStyle;
use cbom_bench::config::Overrides;

/// Table style for console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Grid,
    Markdown,
}

impl std::str::FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(TableFormat::Grid),
            "markdown" | "md" => Ok(TableFormat::Markdown),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'grid' or 'markdown'",
                s
            )),
        }
    }
}

impl From<TableFormat> for TableStyle {
    fn from(format: TableFormat) -> Self {
        match format {
            TableFormat::Grid => TableStyle::Grid,
            TableFormat::Markdown => TableStyle::Markdown,
        }
    }
}

/// Compare CBOM generation tools across benchmark repositories
#[derive(Parser, Debug)]
#[command(name = "cbombench")]
#[command(version)]
#[command(about = "Compare CBOM generation tools across benchmark repositories", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Directory holding one subdirectory of CBOM files per tool [default: CBOMdata]
    #[arg(long, global = true, value_name = "DIR")]
    pub cbom_dir: Option<PathBuf>,

    /// Directory holding durations.json [default: <cbom-dir>/metrics]
    #[arg(long, global = true, value_name = "DIR")]
    pub metrics_dir: Option<PathBuf>,

    /// Directory report runs are written to [default: Reports]
    #[arg(long, global = true, value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Path to a config file (defaults to ./cbombench.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tools to compare, in report order (comma separated)
    #[arg(short, long, global = true, value_delimiter = ',', value_name = "TOOL")]
    pub tools: Vec<String>,

    /// Skip repository size lookups
    #[arg(long, global = true)]
    pub no_sizes: bool,

    /// GitHub token used for repository size lookups
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            cbom_dir: self.cbom_dir.clone(),
            metrics_dir: self.metrics_dir.clone(),
            reports_dir: self.reports_dir.clone(),
            tools: self.tools.clone(),
            no_sizes: self.no_sizes,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze the stored CBOMs and write charts and a summary
    Analyze {
        /// Also save the comparison table as CSV for later reloading
        #[arg(short, long)]
        save: bool,

        /// Console table format: grid or markdown
        #[arg(short, long, default_value = "grid")]
        format: TableFormat,

        /// Write the console tables to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Regenerate tables and charts from a saved CSV report
    Load {
        /// Report path relative to the reports directory (prompts when omitted)
        file: Option<String>,

        /// Console table format: grid or markdown
        #[arg(short, long, default_value = "grid")]
        format: TableFormat,

        /// Write the console tables to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List saved CSV reports, newest first
    List,

    /// Store a tool's CBOM for a repository and record the run duration
    Record {
        /// Tool that produced the CBOM
        tool: String,

        /// Repository URL the CBOM was generated from
        url: String,

        /// CBOM JSON file to store
        file: PathBuf,

        /// Wall-clock run time in seconds
        #[arg(short, long, value_name = "SECONDS")]
        duration: Option<f64>,
    },

    /// Delete all stored CBOMs and run metrics
    DeleteData {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_table_format_from_str() {
        assert_eq!(TableFormat::from_str("grid").unwrap(), TableFormat::Grid);
        assert_eq!(TableFormat::from_str("GRID").unwrap(), TableFormat::Grid);
        assert_eq!(TableFormat::from_str("md").unwrap(), TableFormat::Markdown);
        assert_eq!(
            TableFormat::from_str("Markdown").unwrap(),
            TableFormat::Markdown
        );
    }

    #[test]
    fn test_table_format_from_str_invalid() {
        let error = TableFormat::from_str("pdf").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("pdf"));
    }

    #[test]
    fn test_parse_analyze_with_global_options() {
        let args = Args::try_parse_from([
            "cbombench",
            "analyze",
            "--save",
            "--tools",
            "cbomkit,cdxgen",
            "--cbom-dir",
            "data",
            "--no-sizes",
        ])
        .unwrap();

        assert!(matches!(
            args.command,
            Command::Analyze {
                save: true,
                format: TableFormat::Grid,
                output: None
            }
        ));
        assert_eq!(args.global.tools, vec!["cbomkit", "cdxgen"]);
        assert_eq!(args.global.cbom_dir, Some(PathBuf::from("data")));
        assert!(args.global.no_sizes);

        let overrides = args.global.overrides();
        assert_eq!(overrides.tools.len(), 2);
        assert!(overrides.no_sizes);
    }

    #[test]
    fn test_parse_record() {
        let args = Args::try_parse_from([
            "cbombench",
            "record",
            "cdxgen",
            "https://github.com/acme/alpha",
            "bom.json",
            "--duration",
            "12.5",
        ])
        .unwrap();

        match args.command {
            Command::Record {
                tool,
                url,
                file,
                duration,
            } => {
                assert_eq!(tool, "cdxgen");
                assert_eq!(url, "https://github.com/acme/alpha");
                assert_eq!(file, PathBuf::from("bom.json"));
                assert_eq!(duration, Some(12.5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_load_without_file() {
        let args = Args::try_parse_from(["cbombench", "load", "--format", "markdown"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Load {
                file: None,
                format: TableFormat::Markdown,
                output: None
            }
        ));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Args::try_parse_from(["cbombench"]).is_err());
    }

    #[test]
    fn test_table_format_into_style() {
        assert_eq!(TableStyle::from(TableFormat::Markdown), TableStyle::Markdown);
    }
}
