pub(crate) mod logger;
pub(crate) mod summary_output;

pub(crate) use logger::init_logging;
pub(crate) use summary_output::{probe_summary_lines, suite_summary_lines};
