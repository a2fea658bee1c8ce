#![warn(missing_docs)]
//! probebench CLI Library
//!
//! Command-line surface for the probebench harness. `run()` parses the
//! arguments, installs diagnostics, layers `probebench.toml` under the CLI
//! flags and drives one benchmark run end to end.
//!
//! # Example
//!
//! ```text
//! probebench --test account --application my-app -i 50 -e 8 -r csv > run.csv
//! ```

mod config;
mod runner;
mod summary;

pub use config::{HarnessConfig, RunnerConfig, TargetConfig};
pub use summary::{format_summary, summarize, MetricSummary};

use clap::{Parser, ValueEnum};

/// Which probe kind a run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProbeKind {
    /// Account lifecycle: create, fetch, delete.
    Account,
    /// OAuth2 password grant: acquire, verify.
    Token,
}

/// probebench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "probebench")]
#[command(author, version, about = "probebench - concurrent micro-benchmark harness for HTTP probes")]
pub struct Cli {
    /// Which probe to run
    #[arg(short = 't', long = "test", value_enum)]
    pub test: ProbeKind,

    /// Application identifier the probes target
    #[arg(short = 'a', long)]
    pub application: String,

    /// Username for token acquisition (required by --test token)
    #[arg(short = 'u', long, required_if_eq("test", "token"))]
    pub username: Option<String>,

    /// Password for token acquisition (required by --test token)
    #[arg(short = 'p', long, required_if_eq("test", "token"))]
    pub password: Option<String>,

    /// Number of times to run the probe [default: 20]
    #[arg(short = 'i', long)]
    pub iterations: Option<usize>,

    /// Number of worker threads [default: 5]
    #[arg(short = 'e', long)]
    pub workers: Option<usize>,

    /// Output a report to stdout: csv | json
    #[arg(short = 'r', long)]
    pub report: Option<String>,

    /// Page-size limit for fetch phases
    #[arg(short = 'l', long, default_value_t = 50)]
    pub limit: usize,

    /// Don't use link expansion on fetch phases
    #[arg(short = 'n', long = "no-expand")]
    pub no_expand: bool,

    /// Root URL of the target service (overrides probebench.toml)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Keep collecting when an iteration fails instead of aborting
    #[arg(long)]
    pub continue_on_error: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the probebench CLI. This is the binary's entry point; errors are
/// reported by the caller and map to a non-zero exit status.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the probebench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries only report bytes.
    tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose { "debug" } else { "info" })
        .with_writer(std::io::stderr)
        .init();

    let config = HarnessConfig::discover().unwrap_or_default();
    runner::execute(&cli, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_run_parses_with_short_flags() {
        let cli =
            Cli::try_parse_from(["probebench", "-t", "account", "-a", "demo", "-i", "50", "-e", "8"])
                .unwrap();
        assert_eq!(cli.test, ProbeKind::Account);
        assert_eq!(cli.application, "demo");
        assert_eq!(cli.iterations, Some(50));
        assert_eq!(cli.workers, Some(8));
        assert_eq!(cli.report, None);
        assert_eq!(cli.limit, 50);
        assert!(!cli.no_expand);
    }

    #[test]
    fn token_run_parses_with_credentials() {
        let cli = Cli::try_parse_from([
            "probebench", "-t", "token", "-a", "demo", "-u", "user", "-p", "secret", "-r", "json",
        ])
        .unwrap();
        assert_eq!(cli.test, ProbeKind::Token);
        assert_eq!(cli.username.as_deref(), Some("user"));
        assert_eq!(cli.report.as_deref(), Some("json"));
    }

    #[test]
    fn missing_probe_selector_is_a_usage_error() {
        assert!(Cli::try_parse_from(["probebench", "-a", "demo"]).is_err());
    }

    #[test]
    fn missing_application_is_a_usage_error() {
        assert!(Cli::try_parse_from(["probebench", "-t", "account"]).is_err());
    }

    #[test]
    fn non_numeric_iterations_are_rejected() {
        assert!(
            Cli::try_parse_from(["probebench", "-t", "account", "-a", "demo", "-i", "many"])
                .is_err()
        );
    }
}
