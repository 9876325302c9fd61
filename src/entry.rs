use std::path::Path;

use clap::{CommandFactory, FromArgMatches};
use tracing::{error, info};
use url::Url;

use crate::args::{Command, ProbeArgs, ProbeCliArgs, SinkArgs, SuiteArgs};
use crate::config::load_suite;
use crate::error::{AppError, AppResult, ValidationError};
use crate::fixtures::{AccessToken, FixtureIds, StaticFixtures};
use crate::probe::{ProbeRequest, ProbeSettings, run_probe};
use crate::record::{BenchmarkRow, RowContext};
use crate::sinks::{RowSinkConfig, append_rows};
use crate::suite::{SuiteOptions, run_suite};
use crate::system::{init_logging, probe_summary_lines, suite_summary_lines};

/// Parses the command line, runs the selected command on a multi-threaded
/// runtime and logs any batch-level failure before returning it.
///
/// # Errors
///
/// Returns the first configuration, target, fixture or sink error.
pub fn run() -> AppResult<()> {
    let args = parse_args()?;

    init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let outcome = runtime.block_on(run_async(args.command));
    if let Err(err) = outcome.as_ref() {
        error!("{}", err);
    }
    outcome
}

fn parse_args() -> AppResult<ProbeCliArgs> {
    let matches = ProbeCliArgs::command().get_matches();
    Ok(ProbeCliArgs::from_arg_matches(&matches)?)
}

async fn run_async(command: Command) -> AppResult<()> {
    let token = AccessToken::from_env();
    match command {
        Command::Probe(args) => run_probe_command(args, token.as_ref()).await,
        Command::Suite(args) => run_suite_command(args, token.as_ref()).await,
    }
}

async fn run_probe_command(args: ProbeArgs, token: Option<&AccessToken>) -> AppResult<()> {
    let mut request = ProbeRequest::new(args.method, args.url.clone())
        .params(args.params)
        .headers(args.headers);
    if let Some(file) = args.file {
        request = request.payload(file);
    }
    if args.bearer_auth {
        let token = token.ok_or_else(|| AppError::validation(ValidationError::MissingAccessToken))?;
        let (name, value) = token.bearer_header();
        request = request.header(name, value);
    }
    let settings = ProbeSettings {
        request_timeout: args.timeout,
        connect_timeout: args.connect_timeout,
        dispatch: args.dispatch,
    };

    let result = run_probe(&request, args.concurrency.get(), &settings).await?;
    for line in probe_summary_lines(&request, &result) {
        println!("{}", line);
    }

    let sinks = sink_config(&args.sinks);
    if !sinks.is_empty() {
        let context = RowContext::new(
            args.row
                .endpoint_name
                .unwrap_or_else(|| endpoint_from_url(&args.url)),
            args.row.description.unwrap_or_default(),
        );
        append_rows(&sinks, &[BenchmarkRow::from_probe(&context, &result)]).await?;
        info!("Recorded benchmark row");
    }
    Ok(())
}

async fn run_suite_command(args: SuiteArgs, token: Option<&AccessToken>) -> AppResult<()> {
    let suite = load_suite(&args.config)?;
    let options = SuiteOptions {
        only: args.only,
        sinks: sink_config(&args.sinks).or(&suite.output),
        base_dir: Path::new(&args.config).parent().map(Path::to_path_buf),
    };
    let fixtures = StaticFixtures::new(
        suite
            .fixtures
            .clone()
            .map(FixtureIds::from)
            .unwrap_or_default(),
    );

    let report = run_suite(&suite, &options, &fixtures, token).await?;
    for line in suite_summary_lines(&report) {
        println!("{}", line);
    }
    Ok(())
}

fn sink_config(args: &SinkArgs) -> RowSinkConfig {
    RowSinkConfig {
        csv: args.output_csv.as_ref().map(Into::into),
        jsonl: args.output_jsonl.as_ref().map(Into::into),
    }
}

/// Endpoint name used when none is given: the URL path without the
/// leading slash.
fn endpoint_from_url(raw: &str) -> String {
    Url::parse(raw).map_or_else(
        |_| raw.to_owned(),
        |url| url.path().trim_start_matches('/').to_owned(),
    )
}
