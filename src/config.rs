//! Run configuration for the acceptance harness

use crate::types::{Error, Result};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Selects which runner batches are executed during a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TestSpec {
    /// `.dat` fixtures, followed by the raw html files
    Dat,
    /// `.test` files only (also selectable as `file`)
    Test,
    /// Raw `.html`/`.htm` files only
    Html,
    #[default]
    All,
}

impl TestSpec {
    /// Values accepted on the command line
    pub const VALUES: [&'static str; 5] = ["dat", "test", "file", "html", "all"];

    pub fn runs_dat(&self) -> bool {
        matches!(self, TestSpec::Dat | TestSpec::All)
    }

    pub fn runs_test(&self) -> bool {
        matches!(self, TestSpec::Test | TestSpec::All)
    }

    // `dat` keeps pulling in the html files so existing invocations see the same batches.
    pub fn runs_html(&self) -> bool {
        matches!(self, TestSpec::Dat | TestSpec::Html | TestSpec::All)
    }
}

impl FromStr for TestSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dat" => Ok(TestSpec::Dat),
            "test" | "file" => Ok(TestSpec::Test),
            "html" => Ok(TestSpec::Html),
            "all" => Ok(TestSpec::All),
            _ => Err(Error::Config(format!(
                "unknown test spec '{s}', expected one of: {}",
                Self::VALUES.join(", ")
            ))),
        }
    }
}

impl Display for TestSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TestSpec::Dat => "dat",
            TestSpec::Test => "test",
            TestSpec::Html => "html",
            TestSpec::All => "all",
        };
        write!(f, "{name}")
    }
}

/// Settings for a single harness run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Print per-file progress, successes and malformed case dumps
    pub verbose: bool,
    /// Which runners to dispatch to
    pub test_spec: TestSpec,
    /// Signal failures through the process exit code
    pub strict: bool,
    /// Ask the parser for detailed error messages
    pub exact_errors: bool,
}
