// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! JUnit XML report rendering
//!
//! The layout is fixed down to the byte, so CI jobs that diff or
//! post-process reports keep working across versions:
//!
//! ```text
//! <?xml version='1.0' encoding='UTF-8' ?>
//! <testsuite errors="0" failures="1" hostname="ci" name="MathTests" tests="2" time="0.3" timestamp="...">
//! <testcase classname='MathTests' name='testAdd' time='0.1' />
//! <testcase classname='MathTests' name='testDivide' time='0.2'>
//! <failure message='...' type='Failure'>MathTests.m:42</failure>
//! </testcase>
//! </testsuite>
//! ```

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::suite::TestError;
use crate::timestamp::format_seconds;

/// XML declaration that starts every report
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8' ?>\n";

/// A finished suite, ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteReport {
    /// Raw suite name
    pub name: String,
    /// Host the tests ran on
    pub hostname: String,
    /// Number of failed tests
    pub failures: usize,
    /// Number of passed and failed tests
    pub tests: usize,
    /// Suite duration in seconds
    pub time: f64,
    /// Finish timestamp, as printed in the log
    pub timestamp: String,
    /// Test cases in first-seen order
    pub cases: Vec<TestCaseReport>,
}

/// A single test case in a report
#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseReport {
    /// Report name (`method` or `method[N]`)
    pub name: String,
    /// Duration in seconds
    pub time: f64,
    /// Error recorded for the test, if any
    pub failure: Option<TestError>,
}

impl SuiteReport {
    /// File name of the report: `TEST-<raw suite name>.xml`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("TEST-{}.xml", self.name)
    }

    /// Render the complete XML document
    #[must_use]
    pub fn to_xml(&self) -> String {
        let name = escape(&self.name);
        let mut xml = String::from(XML_DECLARATION);

        // Writing to a String cannot fail
        let _ = write!(
            xml,
            r#"<testsuite errors="0" failures="{}" hostname="{}" name="{}" tests="{}" time="{}" timestamp="{}">"#,
            self.failures,
            escape(&self.hostname),
            name,
            self.tests,
            format_seconds(self.time),
            escape(&self.timestamp),
        );

        for case in &self.cases {
            let _ = write!(
                xml,
                "<testcase classname='{}' name='{}' time='{}'",
                name,
                escape(&case.name),
                format_seconds(case.time),
            );
            match &case.failure {
                None => xml.push_str(" />\n"),
                Some(failure) => {
                    let _ = write!(
                        xml,
                        ">\n<failure message='{}' type='Failure'>{}</failure>\n</testcase>\n",
                        escape(&failure.message),
                        escape(&failure.location),
                    );
                }
            }
        }

        xml.push_str("</testsuite>\n");
        xml
    }
}

/// Escape text for inclusion in a report
///
/// Only four substitutions are made: `&` → `&amp;`, `'` → `&quot;`,
/// `<` → `&lt;` and newline → `&#xa;`. `>` and `"` pass through unchanged.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '\'', '<', '\n']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '\n' => escaped.push_str("&#xa;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn report(cases: Vec<TestCaseReport>) -> SuiteReport {
        let failures = cases.iter().filter(|c| c.failure.is_some()).count();
        SuiteReport {
            name: "MathTests".to_string(),
            hostname: "ci-mac".to_string(),
            failures,
            tests: cases.len(),
            time: 0.3,
            timestamp: "2012-03-21 10:25:54 +0000".to_string(),
            cases,
        }
    }

    #[test]
    fn test_escape_substitution_table() {
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("it's"), "it&quot;s");
        assert_eq!(escape("a < b"), "a &lt; b");
        assert_eq!(escape("one\ntwo"), "one&#xa;two");
    }

    #[test]
    fn test_escape_leaves_other_characters() {
        assert_eq!(escape(r#"a > b "quoted""#), r#"a > b "quoted""#);
        assert!(matches!(escape("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_escape_does_not_double_escape() {
        assert_eq!(escape("&lt;"), "&amp;lt;");
        assert_eq!(escape("'&'"), "&quot;&amp;&quot;");
    }

    #[test]
    fn test_file_name_uses_raw_suite_name() {
        let mut r = report(vec![]);
        r.name = "Odd<Name>".to_string();
        assert_eq!(r.file_name(), "TEST-Odd<Name>.xml");
    }

    #[test]
    fn test_to_xml_empty_suite() {
        let xml = report(vec![]).to_xml();
        assert_eq!(
            xml,
            "<?xml version='1.0' encoding='UTF-8' ?>\n\
             <testsuite errors=\"0\" failures=\"0\" hostname=\"ci-mac\" name=\"MathTests\" tests=\"0\" time=\"0.3\" timestamp=\"2012-03-21 10:25:54 +0000\">\
             </testsuite>\n"
        );
    }

    #[test]
    fn test_to_xml_passing_and_failing_cases() {
        let xml = report(vec![
            TestCaseReport {
                name: "testAdd".to_string(),
                time: 0.1,
                failure: None,
            },
            TestCaseReport {
                name: "testDivide[2]".to_string(),
                time: 1.0,
                failure: Some(TestError {
                    message: "'0' should be <1>\nsee log".to_string(),
                    location: "MathTests.m:42".to_string(),
                }),
            },
        ])
        .to_xml();

        assert_eq!(
            xml,
            "<?xml version='1.0' encoding='UTF-8' ?>\n\
             <testsuite errors=\"0\" failures=\"1\" hostname=\"ci-mac\" name=\"MathTests\" tests=\"2\" time=\"0.3\" timestamp=\"2012-03-21 10:25:54 +0000\">\
             <testcase classname='MathTests' name='testAdd' time='0.1' />\n\
             <testcase classname='MathTests' name='testDivide[2]' time='1.0'>\n\
             <failure message='&quot;0&quot; should be &lt;1>&#xa;see log' type='Failure'>MathTests.m:42</failure>\n\
             </testcase>\n\
             </testsuite>\n"
        );
    }

    #[test]
    fn test_to_xml_escapes_suite_name_everywhere() {
        let mut r = report(vec![TestCaseReport {
            name: "t".to_string(),
            time: 0.5,
            failure: None,
        }]);
        r.name = "A&B".to_string();
        let xml = r.to_xml();
        assert!(xml.contains(r#"name="A&amp;B""#));
        assert!(xml.contains("classname='A&amp;B'"));
    }
}
