//! Test discovery, case splitting and the runners that feed everything to a parser
pub mod classifier;
pub mod dat;
pub mod driver;
pub mod report;
pub mod runner;

/// Suffix pattern for html5lib style tree construction fixtures
pub const DAT_PATTERN: &str = "dat$";
/// Suffix pattern for html5lib style tokenizer fixtures
pub const TEST_PATTERN: &str = "test$";
/// Suffix pattern for raw markup files (`.html` and `.htm`)
pub const HTML_PATTERN: &str = "html?$";
