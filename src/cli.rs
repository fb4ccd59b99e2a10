use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "license-grouper",
    about = "Group production dependencies by identical license text",
    version
)]
pub struct Cli {
    /// Project path to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.license-grouper/config.toml, fallback ~/.config/license-grouper/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format [default: terminal]
    #[arg(long, value_name = "FORMAT")]
    pub report: Option<ReportFormat>,

    /// Write the json/text report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Leave a package out of the report, by name or name@version (repeatable)
    #[arg(long, value_name = "PKG")]
    pub exclude: Vec<String>,

    /// Print full license texts and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["license-grouper"]);
        assert_eq!(cli.path, PathBuf::from("."));
        assert_eq!(cli.report, None);
        assert!(cli.exclude.is_empty());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "license-grouper",
            "web",
            "--report",
            "text",
            "-o",
            "NOTICES.txt",
            "--exclude",
            "a",
            "--exclude",
            "b@1.0.0",
        ]);
        assert_eq!(cli.path, PathBuf::from("web"));
        assert_eq!(cli.report, Some(ReportFormat::Text));
        assert_eq!(cli.output, Some(PathBuf::from("NOTICES.txt")));
        assert_eq!(cli.exclude, vec!["a", "b@1.0.0"]);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["license-grouper", "-v", "-q"]).is_err());
    }
}
