use crate::probe::{ProbeRequest, ProbeResult};
use crate::suite::SuiteReport;

pub(crate) fn probe_summary_lines(request: &ProbeRequest, result: &ProbeResult) -> Vec<String> {
    let tally = result.tally();
    let mut lines = Vec::new();
    lines.push(format!("{} {}", request.method().as_str(), request.url()));
    lines.push(format!("started: {}", result.timestamp()));
    lines.push(format!("concurrency: {}", result.concurrency()));
    lines.push(format!("latency_s: {}", result.latency()));
    lines.push(format!(
        "status: 200={} 500={} 503={} 504={} other={}",
        tally.count_200(),
        tally.count_500(),
        tally.count_503(),
        tally.count_504(),
        tally.other()
    ));
    if !tally.unexpected_statuses().is_empty() {
        let codes: Vec<String> = tally
            .unexpected_statuses()
            .iter()
            .map(|(code, count)| format!("{}x{}", code, count))
            .collect();
        lines.push(format!("unexpected: {}", codes.join(" ")));
    }
    if tally.transport_failures() > 0 {
        lines.push(format!("transport_failures: {}", tally.transport_failures()));
    }
    if !result.all_succeeded() {
        lines.push("WARNING: not all requests returned 200".to_owned());
    }
    lines
}

pub(crate) fn suite_summary_lines(report: &SuiteReport) -> Vec<String> {
    let mut lines = Vec::new();
    for configuration in report.configurations() {
        let average = configuration
            .average()
            .map_or_else(|| "n/a".to_owned(), |value| format!("{}s", value));
        let range = match (configuration.min(), configuration.max()) {
            (Some(min), Some(max)) => format!(" (min {}s, max {}s)", min, max),
            (Some(_) | None, _) => String::new(),
        };
        lines.push(format!(
            "{}: avg {}{} over {}/{} accepted sample(s)",
            configuration.label(),
            average,
            range,
            configuration.accepted(),
            configuration.samples()
        ));
    }
    lines.push(format!("rows written: {}", report.rows_written()));
    lines
}
