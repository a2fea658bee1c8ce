//! Run orchestration: probe construction through report writing.

use crate::config::HarnessConfig;
use crate::summary;
use crate::{Cli, ProbeKind};
use indicatif::{ProgressBar, ProgressStyle};
use probebench_core::{
    collect_with_policy, FailurePolicy, MetricRow, Probe, ProbeError, RunConfig, Scheduler,
};
use probebench_probes::{
    EntityCreationConfig, EntityCreationProbe, TokenAcquisitionConfig, TokenAcquisitionProbe,
};
use probebench_report::{write_report, OutputFormat};
use std::sync::Arc;

/// Ticks the progress bar after each probe invocation. The bar draws on
/// stderr, so report bytes on stdout stay clean.
struct ProgressProbe {
    inner: Arc<dyn Probe>,
    bar: ProgressBar,
}

impl Probe for ProgressProbe {
    fn execute(&self) -> Result<MetricRow, ProbeError> {
        let result = self.inner.execute();
        self.bar.inc(1);
        result
    }
}

/// Resolve the run configuration by layering CLI flags over probebench.toml
/// over built-in defaults.
fn resolve_run_config(cli: &Cli, config: &HarnessConfig) -> RunConfig {
    let defaults = RunConfig::default();
    RunConfig {
        iterations: cli
            .iterations
            .or(config.runner.iterations)
            .unwrap_or(defaults.iterations),
        workers: cli
            .workers
            .or(config.runner.workers)
            .unwrap_or(defaults.workers),
        failure_policy: if cli.continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::FailFast
        },
    }
}

/// Build the selected probe kind from CLI flags and config-file settings.
fn build_probe(cli: &Cli, config: &HarnessConfig) -> anyhow::Result<Arc<dyn Probe>> {
    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| config.target.base_url.clone());
    let timeout = config.target.request_timeout();

    match cli.test {
        ProbeKind::Account => {
            let probe = EntityCreationProbe::new(EntityCreationConfig {
                base_url,
                application: cli.application.clone(),
                limit: cli.limit,
                expand_links: !cli.no_expand,
                timeout,
            })?;
            Ok(Arc::new(probe))
        }
        ProbeKind::Token => {
            let (Some(username), Some(password)) = (cli.username.clone(), cli.password.clone())
            else {
                anyhow::bail!("--username and --password are required for the token probe");
            };
            let probe = TokenAcquisitionProbe::new(TokenAcquisitionConfig {
                base_url,
                application: cli.application.clone(),
                username,
                password,
                timeout,
            })?;
            Ok(Arc::new(probe))
        }
    }
}

/// Execute one run end to end.
///
/// On a fail-fast collection error the pool still drains gracefully before
/// the error propagates, and no partial report is emitted.
pub(crate) fn execute(cli: &Cli, config: &HarnessConfig) -> anyhow::Result<()> {
    let run_config = resolve_run_config(cli, config);
    let probe = build_probe(cli, config)?;

    tracing::info!(
        probe = ?cli.test,
        iterations = run_config.iterations,
        workers = run_config.workers,
        "starting run"
    );

    let bar = ProgressBar::new(run_config.iterations as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let instrumented: Arc<dyn Probe> = Arc::new(ProgressProbe {
        inner: probe,
        bar: bar.clone(),
    });

    let scheduler = Scheduler::new(&run_config)?;
    let handles = scheduler.submit_all(instrumented);
    let collected = collect_with_policy(handles, run_config.failure_policy);
    scheduler.shutdown();
    bar.finish_and_clear();

    let collection = collected?;
    for failure in &collection.failures {
        tracing::warn!(
            iteration = failure.iteration,
            error = %failure.error,
            "iteration failed"
        );
    }
    tracing::info!(
        rows = collection.rows.len(),
        failures = collection.failures.len(),
        "run complete"
    );

    match cli.report.as_deref() {
        Some(format) => {
            let format: OutputFormat = format.parse()?;
            let stdout = std::io::stdout();
            write_report(&collection.rows, format, &mut stdout.lock())?;
        }
        None => {
            let summaries = summary::summarize(&collection.rows);
            print!("{}", summary::format_summary(&summaries));
        }
    }

    Ok(())
}
