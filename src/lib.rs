//! Acceptance test harness for HTML5 parsers.
//!
//! Test inputs are discovered by walking a directory tree and bucketing files by their suffix.
//! `.dat` fixtures are split into cases, raw `.html`/`.htm` files are streamed as-is, and both
//! are handed to an [`html5::Html5Parser`]. Outcomes are printed to the console.

pub mod config;
pub mod html5;
pub mod testing;
pub mod types;
