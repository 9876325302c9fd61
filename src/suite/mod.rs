//! Benchmark suites: many probes described by one file.
//!
//! Each case of a suite expands into one configuration per variant. Every
//! configuration runs its iterations back to back, one probe batch at a
//! time, and appends a row per batch to the configured sinks once it is
//! done. Averages only ever cover a single configuration.
mod plan;
mod stats;
mod template;


use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::types::SuiteFile;
use crate::error::AppResult;
use crate::fixtures::{AccessToken, FixtureIds, FixtureProvisioner};
use crate::probe::{LatencyX100, run_probe};
use crate::record::BenchmarkRow;
use crate::sinks::{RowSinkConfig, append_rows};

pub use plan::ProbePlan;

use plan::{PlanInputs, build_plans, suite_settings};
use stats::SampleStats;

/// Caller choices layered over the suite file.
#[derive(Debug, Clone, Default)]
pub struct SuiteOptions {
    /// Endpoints to run; empty runs every case.
    pub only: Vec<String>,
    pub sinks: RowSinkConfig,
    /// Relative payload paths are resolved against this directory.
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationReport {
    label: String,
    samples: usize,
    accepted: usize,
    average: Option<LatencyX100>,
    min: Option<LatencyX100>,
    max: Option<LatencyX100>,
}

impl ConfigurationReport {
    fn from_stats(label: String, stats: &SampleStats) -> Self {
        Self {
            label,
            samples: stats.samples(),
            accepted: stats.accepted(),
            average: stats.average(),
            min: stats.min(),
            max: stats.max(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn samples(&self) -> usize {
        self.samples
    }

    #[must_use]
    pub const fn accepted(&self) -> usize {
        self.accepted
    }

    /// `None` when no sample had every request return 200.
    #[must_use]
    pub const fn average(&self) -> Option<LatencyX100> {
        self.average
    }

    #[must_use]
    pub const fn min(&self) -> Option<LatencyX100> {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Option<LatencyX100> {
        self.max
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteReport {
    configurations: Vec<ConfigurationReport>,
    rows_written: usize,
}

impl SuiteReport {
    #[must_use]
    pub fn configurations(&self) -> &[ConfigurationReport] {
        &self.configurations
    }

    #[must_use]
    pub const fn rows_written(&self) -> usize {
        self.rows_written
    }
}

/// Runs every selected configuration of a suite.
///
/// Fixtures are provisioned once, and only when the suite declares a
/// `[fixtures]` section.
///
/// # Errors
///
/// Returns an error when provisioning fails, a case cannot be resolved, a
/// probe batch fails before sending requests, or rows cannot be written.
/// Rows measured before the failure, including earlier iterations of the
/// failing configuration, stay written.
pub async fn run_suite<P>(
    suite: &SuiteFile,
    options: &SuiteOptions,
    provisioner: &P,
    token: Option<&AccessToken>,
) -> AppResult<SuiteReport>
where
    P: FixtureProvisioner + Sync,
{
    let fixtures = provision_fixtures(suite, provisioner, token).await?;
    let plans = build_plans(
        suite,
        &PlanInputs {
            only: &options.only,
            fixtures: fixtures.as_ref(),
            token,
            base_dir: options.base_dir.as_deref(),
        },
    )?;
    let settings = suite_settings(&suite.defaults)?;

    let mut report = SuiteReport::default();
    for plan in &plans {
        info!(
            "Running {}: {} iteration(s) of {} concurrent request(s)",
            plan.label, plan.iterations, plan.concurrency
        );
        let mut stats = SampleStats::default();
        let mut rows = Vec::with_capacity(plan.iterations);
        for iteration in 1..=plan.iterations {
            let result = match run_probe(&plan.request, plan.concurrency, &settings).await {
                Ok(result) => result,
                Err(err) => {
                    if !rows.is_empty() && !options.sinks.is_empty() {
                        append_rows(&options.sinks, &rows).await?;
                        warn!(
                            "{}: kept {} row(s) measured before iteration {} failed",
                            plan.label,
                            rows.len(),
                            iteration
                        );
                    }
                    return Err(err.into());
                }
            };
            if !stats.record(&result) {
                warn!(
                    "{}: sample {} of {} rejected, not all requests returned 200 (200: {}, other: {})",
                    plan.label,
                    iteration,
                    plan.iterations,
                    result.tally().count_200(),
                    result
                        .tally()
                        .total()
                        .saturating_sub(result.tally().count_200())
                );
            }
            rows.push(BenchmarkRow::from_probe(&plan.context, &result));
        }

        if !options.sinks.is_empty() {
            append_rows(&options.sinks, &rows).await?;
            report.rows_written = report.rows_written.saturating_add(rows.len());
        }

        let configuration = ConfigurationReport::from_stats(plan.label.clone(), &stats);
        match configuration.average() {
            Some(average) => info!(
                "{}: average latency {}s over {} accepted sample(s)",
                plan.label,
                average,
                configuration.accepted()
            ),
            None => warn!(
                "{}: no accepted samples, average latency unavailable",
                plan.label
            ),
        }
        report.configurations.push(configuration);
    }
    Ok(report)
}

async fn provision_fixtures<P>(
    suite: &SuiteFile,
    provisioner: &P,
    token: Option<&AccessToken>,
) -> AppResult<Option<FixtureIds>>
where
    P: FixtureProvisioner + Sync,
{
    if suite.fixtures.is_none() {
        return Ok(None);
    }
    let ids = provisioner.provision(token).await?;
    ids.validate()?;
    info!(
        "Provisioned fixtures: dataset {}, project {}, asset view {}",
        ids.dataset_id, ids.project_id, ids.asset_view
    );
    Ok(Some(ids))
}
