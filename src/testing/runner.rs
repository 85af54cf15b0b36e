//! Runners that feed classified files to a parser and report the outcome of every case.
//!
//! Failures never stop a batch: files that cannot be opened or read are reported and skipped,
//! and every case or html file is evaluated behind a panic barrier.

use crate::html5::Html5Parser;
use crate::testing::dat::{normalize_line_endings, split_cases, CaseError, TestCase};
use crate::testing::report::Reporter;
use std::any::Any;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

/// Runs `f`, turning a panic into an error message so the caller can carry on with the next
/// unit of work.
pub fn isolate<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs every case found in the given `.dat` files
pub fn run_dat_tests<P, W>(paths: &[PathBuf], parser: &mut P, reporter: &mut Reporter<W>)
where
    P: Html5Parser + ?Sized,
    W: Write,
{
    for path in paths {
        reporter.dat_file_started(path);

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                reporter.open_failed(path, &e);
                continue;
            }
        };

        let mut bytes = Vec::new();
        if let Err(e) = file.read_to_end(&mut bytes) {
            reporter.read_failed(path, &e);
            continue;
        }
        drop(file);

        let decoded = String::from_utf8_lossy(&bytes);
        let content = normalize_line_endings(&decoded);
        log::debug!("running cases from {}", path.display());

        for case in split_cases(&content) {
            run_dat_case(case, parser, reporter);
        }
    }
}

/// Evaluates a single case and reports its outcome
pub fn run_dat_case<P, W>(case: TestCase<'_>, parser: &mut P, reporter: &mut Reporter<W>)
where
    P: Html5Parser + ?Sized,
    W: Write,
{
    match isolate(|| evaluate_case(&case, &mut *parser, &mut *reporter)) {
        Ok(Ok(())) => reporter.case_passed(),
        Ok(Err(CaseError::Malformed { segments })) => reporter.case_malformed(&case, segments),
        Ok(Err(e)) => reporter.case_failed(&case, &e),
        Err(msg) => reporter.case_failed(&case, &CaseError::Panicked(msg)),
    }
}

fn evaluate_case<P, W>(
    case: &TestCase<'_>,
    parser: &mut P,
    reporter: &mut Reporter<W>,
) -> Result<(), CaseError>
where
    P: Html5Parser + ?Sized,
    W: Write,
{
    let fields = case.fields()?;
    reporter.case_started(case);

    let data = fields.data().ok_or(CaseError::MissingData)?;
    parser.parse_str(data)?;

    Ok(())
}

/// Placeholder for the `.test` format. The files are accepted and counted, nothing is run.
pub fn run_test_tests<W: Write>(paths: &[PathBuf], reporter: &mut Reporter<W>) {
    log::debug!("not running {} .test file(s)", paths.len());
    reporter.test_files_skipped(paths.len());
}

/// Streams every raw html file straight into the parser
pub fn run_html_tests<P, W>(paths: &[PathBuf], parser: &mut P, reporter: &mut Reporter<W>)
where
    P: Html5Parser + ?Sized,
    W: Write,
{
    for path in paths {
        reporter.html_file_started(path);

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                reporter.open_failed(path, &e);
                continue;
            }
        };

        let mut reader = BufReader::new(file);
        match isolate(|| parser.parse_reader(&mut reader)) {
            Ok(Ok(())) => reporter.html_passed(),
            Ok(Err(e)) => reporter.html_failed(path, &e),
            Err(msg) => reporter.html_panicked(path, &msg),
        }
    }
}
