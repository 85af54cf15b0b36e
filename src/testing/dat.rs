//! Splitting of `.dat` fixture content into cases and named fields.
//!
//! Cases are separated by a blank line. Inside a case every field starts with a `#` marker,
//! followed by the field name on the rest of that line and the field value on the lines after
//! it. Anything before the first marker is ignored.

use crate::html5::ParseError;
use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;

/// Separates two cases inside a fixture file
pub const CASE_DELIMITER: &str = "\n\n";
/// Starts a field inside a case
pub const FIELD_MARKER: char = '#';
/// Leading text plus the three fields of a well-formed case
pub const EXPECTED_SEGMENTS: usize = 4;
/// Field holding the markup that is fed to the parser
pub const DATA_FIELD: &str = "data";

/// Reasons a single case did not pass
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("malformed test case: {segments} segments, expected {}", EXPECTED_SEGMENTS)]
    Malformed { segments: usize },

    #[error("field '{field}' has no value line")]
    MissingValue { field: String },

    #[error("test case has no '{}' field", DATA_FIELD)]
    MissingData,

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("panic while running test case: {0}")]
    Panicked(String),
}

/// One raw case block taken from a fixture file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCase<'a> {
    raw: &'a str,
}

impl<'a> TestCase<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Number of `#` separated segments in this case, including the leading one
    pub fn segment_count(&self) -> usize {
        self.raw.split(FIELD_MARKER).count()
    }

    /// Extracts the named fields. Fails when the case does not have exactly
    /// [`EXPECTED_SEGMENTS`] segments or when a field has no value line.
    pub fn fields(&self) -> Result<TestCaseFields, CaseError> {
        let segments: Vec<&str> = self.raw.split(FIELD_MARKER).collect();
        if segments.len() != EXPECTED_SEGMENTS {
            return Err(CaseError::Malformed {
                segments: segments.len(),
            });
        }

        let mut fields = HashMap::new();
        for segment in &segments[1..] {
            let Some((name, value)) = segment.split_once('\n') else {
                return Err(CaseError::MissingValue {
                    field: segment.to_string(),
                });
            };

            let value = value.strip_suffix('\n').unwrap_or(value);
            fields.insert(name.to_string(), value.to_string());
        }

        Ok(TestCaseFields { fields })
    }
}

/// Named fields of a single case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCaseFields {
    fields: HashMap<String, String>,
}

impl TestCaseFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn data(&self) -> Option<&str> {
        self.get(DATA_FIELD)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Turns `\r\n` line endings into `\n` so fixtures saved on Windows split the same way.
/// Content without carriage returns is returned as is.
pub fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains("\r\n") {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Splits fixture content into its cases, in file order. Expects `\n` line endings, see
/// [`normalize_line_endings`].
pub fn split_cases(content: &str) -> impl Iterator<Item = TestCase<'_>> {
    content.split(CASE_DELIMITER).map(TestCase::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_line() {
        let content = "#data\n<p>\n#errors\nnone\n#document\n| <p>\n\n#data\n<b>\n#errors\nx\n#document\n| <b>";
        let cases: Vec<_> = split_cases(content).collect();

        assert_eq!(cases.len(), 2);
        assert_eq!(
            cases[0].as_str(),
            "#data\n<p>\n#errors\nnone\n#document\n| <p>"
        );
        assert_eq!(cases[1].as_str(), "#data\n<b>\n#errors\nx\n#document\n| <b>");
    }

    #[test]
    fn trailing_blank_line_yields_empty_case() {
        let cases: Vec<_> = split_cases("#a\n1\n#b\n2\n#c\n3\n\n").collect();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].as_str(), "");
        assert!(matches!(
            cases[1].fields(),
            Err(CaseError::Malformed { segments: 1 })
        ));
    }

    #[test]
    fn extracts_three_fields() {
        let case = TestCase::new("leading text#data\n<p>Hi\n#errors\nnone\n#new-errors\nnone");
        let fields = case.fields().unwrap();

        assert_eq!(fields.len(), 3);
        assert!(!fields.is_empty());
        assert!(TestCaseFields::default().is_empty());
        assert_eq!(fields.data(), Some("<p>Hi"));
        assert_eq!(fields.get("errors"), Some("none"));
        assert_eq!(fields.get("new-errors"), Some("none"));
        assert_eq!(fields.get("document"), None);

        let mut names: Vec<_> = fields.names().collect();
        names.sort();
        assert_eq!(names, vec!["data", "errors", "new-errors"]);
    }

    #[test]
    fn multi_line_values_are_kept() {
        let case = TestCase::new("#data\n<p>\n<b>\n#errors\none\ntwo\n#document\n| <html>");
        let fields = case.fields().unwrap();
        assert_eq!(fields.data(), Some("<p>\n<b>"));
        assert_eq!(fields.get("errors"), Some("one\ntwo"));
    }

    #[test]
    fn wrong_segment_count_is_malformed() {
        let two = TestCase::new("#data\n<p>");
        assert_eq!(two.segment_count(), 2);
        assert!(matches!(two.fields(), Err(CaseError::Malformed { segments: 2 })));

        let five = TestCase::new("#data\n<a href=\"#x\">\n#errors\n\n#document\n| <a>");
        assert_eq!(five.segment_count(), 5);
        assert!(matches!(five.fields(), Err(CaseError::Malformed { segments: 5 })));
    }

    #[test]
    fn field_without_value_line() {
        let case = TestCase::new("#data\n<p>\n#errors#document\n| <p>");
        assert!(matches!(
            case.fields(),
            Err(CaseError::MissingValue { field }) if field == "errors"
        ));
    }

    #[test]
    fn case_without_data_field() {
        let case = TestCase::new("#input\n<p>\n#errors\n\n#document\n| <p>");
        let fields = case.fields().unwrap();
        assert_eq!(fields.data(), None);
        assert_eq!(fields.get("input"), Some("<p>"));
    }

    #[test]
    fn crlf_content_is_normalized() {
        let content = "#data\r\n<p>\r\n#errors\r\nnone\r\n#document\r\n| <p>\r\n\r\n#data\r\n<b>\r\n#errors\r\nnone\r\n#document\r\n| <b>";
        let normalized = normalize_line_endings(content);
        assert!(matches!(normalized, Cow::Owned(_)));

        let cases: Vec<_> = split_cases(&normalized).collect();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].fields().unwrap().data(), Some("<p>"));
        assert_eq!(cases[1].fields().unwrap().data(), Some("<b>"));
    }

    #[test]
    fn lf_content_is_borrowed() {
        assert!(matches!(
            normalize_line_endings("#data\n<p>"),
            Cow::Borrowed("#data\n<p>")
        ));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CaseError::Malformed { segments: 2 }.to_string(),
            "malformed test case: 2 segments, expected 4"
        );
        assert_eq!(
            CaseError::MissingData.to_string(),
            "test case has no 'data' field"
        );
    }
}
