use anyhow::{anyhow, Result};
use html5_acceptance::config::{Config, TestSpec};
use html5_acceptance::html5::Html5everParser;
use html5_acceptance::testing::driver;
use simple_logger::SimpleLogger;
use std::path::Path;
use std::process::exit;

fn main() -> Result<()> {
    let matches = clap::Command::new("Gosub HTML5 acceptance tests")
        .version("0.1.0")
        .about("Runs .dat fixtures and raw html files found below the current directory")
        .arg(
            clap::Arg::new("verbose")
                .help("Verbosity for test output")
                .long("verbose")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("test_spec")
                .help("Type of test to run")
                .long("test_spec")
                .value_parser(TestSpec::VALUES)
                .default_value("all"),
        )
        .arg(
            clap::Arg::new("strict")
                .help("Exit with a non-zero code when any test fails")
                .long("strict")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("exact_errors")
                .help("Report detailed parse error messages")
                .long("exact-errors")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let test_spec = matches
        .get_one::<String>("test_spec")
        .map(String::as_str)
        .unwrap_or("all")
        .parse::<TestSpec>()?;

    let config = Config {
        verbose: matches.get_flag("verbose"),
        test_spec,
        strict: matches.get_flag("strict"),
        exact_errors: matches.get_flag("exact_errors"),
    };

    let level = if config.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .map_err(|e| anyhow!("could not initialize logger: {e}"))?;

    let mut parser = Html5everParser::with_exact_errors(config.exact_errors);
    let summary = match driver::run(&config, Path::new("."), &mut parser, std::io::stdout()) {
        Ok(summary) => summary,
        Err(e) => {
            println!("ERROR while walking the test directory: {e}");
            if config.strict {
                exit(1);
            }
            return Ok(());
        }
    };

    if config.strict && summary.has_failures() {
        exit(1);
    }

    Ok(())
}
