use crate::config::Config;
use crate::html5::Html5Parser;
use crate::testing::classifier::{classify, Classification, DAT_BUCKET, HTML_BUCKET, TEST_BUCKET};
use crate::testing::report::{Reporter, RunSummary};
use crate::testing::runner::{run_dat_tests, run_html_tests, run_test_tests};
use crate::types::Result;
use std::io::Write;
use std::path::Path;

/// Classifies everything below `root` and dispatches the buckets selected by the config to
/// their runners, in the order dat, test, html. Only a failing directory walk is returned as
/// an error; test failures end up in the summary.
pub fn run<P, W>(config: &Config, root: &Path, parser: &mut P, out: W) -> Result<RunSummary>
where
    P: Html5Parser + ?Sized,
    W: Write,
{
    log::debug!(
        "classifying files below {} for test spec '{}'",
        root.display(),
        config.test_spec
    );
    let classification = classify(root, Classification::standard()?)?;

    let mut reporter = Reporter::new(out, config.verbose);

    if config.test_spec.runs_dat() {
        run_dat_tests(classification.paths(DAT_BUCKET), parser, &mut reporter);
    }
    if config.test_spec.runs_test() {
        run_test_tests(classification.paths(TEST_BUCKET), &mut reporter);
    }
    if config.test_spec.runs_html() {
        run_html_tests(classification.paths(HTML_BUCKET), parser, &mut reporter);
    }

    reporter.finish();
    if reporter.output_failed() {
        log::error!("test output was cut short, rely on the summary counters");
    }
    let (_, summary) = reporter.into_parts();

    log::info!("run finished: {summary}");
    Ok(summary)
}
