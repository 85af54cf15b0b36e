//! Console reporting of test outcomes.
//!
//! Output is plain human readable text. Progress lines and successes are only printed in
//! verbose mode, failures are always printed.

use crate::html5::ParseError;
use crate::testing::dat::{CaseError, TestCase};
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::Path;

/// Counters collected over a single run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of `.dat` files the runner picked up, including ones that could not be opened
    /// or read
    pub dat_files: usize,
    /// Files that could not be opened or read
    pub file_errors: usize,
    /// Cases whose data parsed without errors
    pub cases_passed: usize,
    /// Cases that failed to parse, had no data, or panicked
    pub cases_failed: usize,
    /// Cases skipped because they did not have the expected layout
    pub cases_malformed: usize,
    /// Raw html files that parsed without errors
    pub html_passed: usize,
    /// Raw html files that failed to parse
    pub html_failed: usize,
    /// `.test` files that were found but not run
    pub test_files_skipped: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.file_errors > 0 || self.cases_failed > 0 || self.html_failed > 0
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cases: {} passed, {} failed, {} malformed. Html files: {} passed, {} failed. File errors: {}.",
            self.cases_passed,
            self.cases_failed,
            self.cases_malformed,
            self.html_passed,
            self.html_failed,
            self.file_errors
        )
    }
}

/// Writes test outcomes to a sink and keeps the run counters
pub struct Reporter<W: Write> {
    out: W,
    verbose: bool,
    summary: RunSummary,
    output_failed: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            out,
            verbose,
            summary: RunSummary::default(),
            output_failed: false,
        }
    }

    /// True once writing to the sink has failed. Counters keep being updated regardless.
    pub fn output_failed(&self) -> bool {
        self.output_failed
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn into_parts(self) -> (W, RunSummary) {
        (self.out, self.summary)
    }

    pub fn dat_file_started(&mut self, path: &Path) {
        self.summary.dat_files += 1;
        if self.verbose {
            self.line(format_args!("Running tests in file: {}", path.display()));
        }
    }

    pub fn open_failed(&mut self, path: &Path, err: &std::io::Error) {
        self.summary.file_errors += 1;
        self.line(format_args!("ERROR opening file {}: {err}", path.display()));
    }

    pub fn read_failed(&mut self, path: &Path, err: &std::io::Error) {
        self.summary.file_errors += 1;
        self.line(format_args!("ERROR reading file {}: {err}", path.display()));
    }

    pub fn case_malformed(&mut self, case: &TestCase, segments: usize) {
        self.summary.cases_malformed += 1;
        if self.verbose {
            self.line(format_args!(
                "Malformed test case: {segments}, {:?}",
                case.as_str()
            ));
        }
    }

    pub fn case_started(&mut self, case: &TestCase) {
        if self.verbose {
            self.line(format_args!("Running test case: {}", case.as_str()));
        }
    }

    pub fn case_passed(&mut self) {
        self.summary.cases_passed += 1;
        if self.verbose {
            self.line(format_args!("SUCCESS!!!"));
        }
    }

    pub fn case_failed(&mut self, case: &TestCase, err: &CaseError) {
        self.summary.cases_failed += 1;
        self.line(format_args!("Test case: {}", case.as_str()));
        match err {
            CaseError::Parse(e) => self.line(format_args!("ERROR parsing: {e}")),
            CaseError::Panicked(msg) => {
                self.line(format_args!("ERROR while running test case: {msg}"))
            }
            other => self.line(format_args!("ERROR: {other}")),
        }
    }

    pub fn html_file_started(&mut self, path: &Path) {
        if self.verbose {
            self.line(format_args!("Attempting to parse file: {}", path.display()));
        }
    }

    pub fn html_passed(&mut self) {
        self.summary.html_passed += 1;
        if self.verbose {
            self.line(format_args!("SUCCESS!!!"));
        }
    }

    pub fn html_failed(&mut self, path: &Path, err: &ParseError) {
        self.summary.html_failed += 1;
        // Without verbose output the file name was never printed
        if !self.verbose {
            self.line(format_args!("Attempting to parse file: {}", path.display()));
        }
        self.line(format_args!("ERROR parsing file: {err}"));
    }

    pub fn html_panicked(&mut self, path: &Path, msg: &str) {
        self.summary.html_failed += 1;
        if !self.verbose {
            self.line(format_args!("Attempting to parse file: {}", path.display()));
        }
        self.line(format_args!("ERROR while parsing file: {msg}"));
    }

    pub fn test_files_skipped(&mut self, count: usize) {
        self.summary.test_files_skipped += count;
        if self.verbose && count > 0 {
            self.line(format_args!("Skipping {count} .test file(s): not supported yet"));
        }
    }

    /// Prints the summary line. This is printed in every mode.
    pub fn finish(&mut self) {
        let summary = self.summary.to_string();
        self.line(format_args!("{summary}"));
        if let Err(e) = self.out.flush() {
            self.write_failed(&e);
        }
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{args}") {
            self.write_failed(&e);
        }
    }

    // Only the first failure is logged, a closed pipe would otherwise warn on every line
    fn write_failed(&mut self, err: &std::io::Error) {
        if !self.output_failed {
            log::warn!("could not write test output: {err}");
            self.output_failed = true;
        }
    }
}
