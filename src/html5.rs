//! The seam between the harness and the HTML5 parser under test.
//!
//! The harness never looks inside a parse result. It only needs to know whether parsing
//! succeeded, and if not, something printable describing why.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::RcDom;
use std::io::Read;
use thiserror::Error;

/// Error returned by a parser when the input could not be parsed cleanly
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{} parse error(s): {}", .errors.len(), .errors.join("; "))]
    Markup { errors: Vec<String> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A parser that the acceptance runners can drive
pub trait Html5Parser {
    /// Parses a complete document held in memory
    fn parse_str(&mut self, input: &str) -> Result<(), ParseError>;

    /// Parses a document read from the given stream
    fn parse_reader(&mut self, reader: &mut dyn Read) -> Result<(), ParseError>;
}

/// Adapter around the html5ever tree builder. Any parse error that the tree builder or
/// tokenizer reports makes the document fail.
#[derive(Debug, Default, Clone)]
pub struct Html5everParser {
    /// Ask html5ever for detailed error messages instead of the generic ones
    pub exact_errors: bool,
}

impl Html5everParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exact_errors(exact_errors: bool) -> Self {
        Self { exact_errors }
    }

    fn opts(&self) -> ParseOpts {
        let mut opts = ParseOpts::default();
        opts.tokenizer.exact_errors = self.exact_errors;
        opts.tree_builder.exact_errors = self.exact_errors;
        opts
    }

    fn check(dom: RcDom) -> Result<(), ParseError> {
        if dom.errors.is_empty() {
            return Ok(());
        }

        log::debug!("html5ever reported {} parse errors", dom.errors.len());
        Err(ParseError::Markup {
            errors: dom.errors.into_iter().map(|e| e.into_owned()).collect(),
        })
    }
}

impl Html5Parser for Html5everParser {
    fn parse_str(&mut self, input: &str) -> Result<(), ParseError> {
        let dom = parse_document(RcDom::default(), self.opts()).one(input);
        Self::check(dom)
    }

    fn parse_reader(&mut self, mut reader: &mut dyn Read) -> Result<(), ParseError> {
        let dom = parse_document(RcDom::default(), self.opts())
            .from_utf8()
            .read_from(&mut reader)?;
        Self::check(dom)
    }
}
