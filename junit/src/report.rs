// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{SerializeError, serialize::serialize_test_suites};
use chrono::NaiveDateTime;
use std::{io, time::Duration};

/// The root `<testsuites>` element of a JUnit report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestSuites {
    /// The test suites contained in this report, in the order they were built.
    pub test_suites: Vec<TestSuite>,
}

impl TestSuites {
    /// Creates a new, empty `TestSuites`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a test suite to this report.
    pub fn add_test_suite(&mut self, test_suite: TestSuite) -> &mut Self {
        self.test_suites.push(test_suite);
        self
    }

    /// Serialize this report to the given writer.
    pub fn serialize(&self, writer: impl io::Write) -> Result<(), SerializeError> {
        serialize_test_suites(self, writer)?;
        Ok(())
    }

    /// Serialize this report to a UTF-8 encoded byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        let mut buf: Vec<u8> = vec![];
        self.serialize(&mut buf)?;
        Ok(buf)
    }
}

/// Represents a single `<testsuite>`: one specification's worth of test cases.
///
/// Unlike generic JUnit writers, the counts here are not derived from the test cases. They are
/// set by whoever builds the suite, since a suite may count failures (hook failures, for
/// instance) that have no test case of their own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestSuite {
    /// The sequential id of this suite within the report, starting at 1.
    pub id: usize,

    /// The name of this suite.
    pub name: String,

    /// The package this suite belongs to. For specifications, this is the source file name.
    pub package: String,

    /// The total number of tests in this suite.
    pub tests: usize,

    /// The number of failed tests in this suite.
    pub failures: usize,

    /// The number of errored tests in this suite.
    pub errors: usize,

    /// The number of skipped tests in this suite.
    ///
    /// Only serialized if non-zero.
    pub skipped: usize,

    /// The time at which the suite was assembled. Serialized without a timezone.
    pub timestamp: NaiveDateTime,

    /// The overall time taken by the suite.
    ///
    /// This is serialized as the number of seconds, with three decimal digits.
    pub time: Duration,

    /// The name of the machine the suite ran on.
    pub hostname: String,

    /// The test cases that form this suite.
    pub test_cases: Vec<TestCase>,

    /// The `<system-err>` text of this suite. `<system-out>` is always written empty.
    pub system_err: Output,
}

impl TestSuite {
    /// Creates a new `TestSuite` with the given id and name.
    ///
    /// All counts start at zero, and the suite has no test cases.
    pub fn new(id: usize, name: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            name: name.into(),
            package: String::new(),
            tests: 0,
            failures: 0,
            errors: 0,
            skipped: 0,
            timestamp,
            time: Duration::ZERO,
            hostname: String::new(),
            test_cases: vec![],
            system_err: Output::default(),
        }
    }

    /// Sets the package.
    pub fn set_package(&mut self, package: impl Into<String>) -> &mut Self {
        self.package = package.into();
        self
    }

    /// Sets the hostname.
    pub fn set_hostname(&mut self, hostname: impl Into<String>) -> &mut Self {
        self.hostname = hostname.into();
        self
    }

    /// Sets the time taken for the suite.
    pub fn set_time(&mut self, time: Duration) -> &mut Self {
        self.time = time;
        self
    }

    /// Adds a test case to this suite. Counts are left untouched.
    pub fn add_test_case(&mut self, test_case: TestCase) -> &mut Self {
        self.test_cases.push(test_case);
        self
    }

    /// Sets standard error.
    pub fn set_system_err(&mut self, system_err: impl AsRef<str>) -> &mut Self {
        self.system_err = Output::new(system_err);
        self
    }
}

/// Represents a single `<testcase>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    /// The "classname" of the test case. xml-report uses the owning suite's name.
    pub classname: String,

    /// The display name of the test case.
    pub name: String,

    /// The time it took to execute this test case.
    pub time: Duration,

    /// The outcome of this test case.
    pub status: TestCaseStatus,
}

impl TestCase {
    /// Creates a new test case.
    pub fn new(
        classname: impl Into<String>,
        name: impl Into<String>,
        status: TestCaseStatus,
    ) -> Self {
        Self {
            classname: classname.into(),
            name: name.into(),
            time: Duration::ZERO,
            status,
        }
    }

    /// Sets the time taken for the test case.
    pub fn set_time(&mut self, time: Duration) -> &mut Self {
        self.time = time;
        self
    }
}

/// The outcome of a test case.
///
/// A test case carries at most one of a failure block or a skip block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestCaseStatus {
    /// This test case passed.
    Success,

    /// This test case failed. Serialized as a `<failure>` element.
    Failure {
        /// The short failure message.
        message: String,

        /// The "type" of failure that occurred.
        ty: String,

        /// The failure description, usually stack traces.
        ///
        /// This is serialized as the text node of the element.
        description: String,
    },

    /// This test case was not run. Serialized as a `<skipped>` element.
    Skipped {
        /// The skip message.
        message: String,
    },
}

impl TestCaseStatus {
    /// Creates a new failure status whose type is identical to its message.
    pub fn failure(message: impl Into<String>, description: impl Into<String>) -> Self {
        let message = message.into();
        TestCaseStatus::Failure {
            ty: message.clone(),
            message,
            description: description.into(),
        }
    }

    /// Creates a new skipped status.
    pub fn skipped(message: impl Into<String>) -> Self {
        TestCaseStatus::Skipped {
            message: message.into(),
        }
    }
}

/// Text written out as `<system-err>`.
///
/// # Encoding
///
/// XML 1.0 cannot represent most ASCII control characters or the noncharacters U+FFFE and
/// U+FFFF, even escaped. They are removed on construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Output {
    output: Box<str>,
}

impl Output {
    /// Creates a new output, removing any non-printable characters from it.
    pub fn new(output: impl AsRef<str>) -> Self {
        let output = strip_invalid_chars(output.as_ref()).into_boxed_str();
        Self { output }
    }

    /// Returns the output.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Returns true if the output is empty.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}

pub(crate) fn strip_invalid_chars(s: &str) -> String {
    s.replace(
        |c| {
            matches!(
                c,
                '\x00'..='\x08' | '\x0b' | '\x0c' | '\x0e'..='\x1f' | '\u{FFFE}' | '\u{FFFF}'
            )
        },
        "",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_strips_control_characters() {
        let output = Output::new("a\x00b\x1bc\td\ne");
        assert_eq!(output.as_str(), "abc\td\ne");
    }

    #[test]
    fn output_strips_noncharacters() {
        let output = Output::new("a\u{FFFE}b\u{FFFF}c\u{FFFD}");
        assert_eq!(output.as_str(), "abc\u{FFFD}");
        assert!(!output.is_empty());
    }

    #[test]
    fn failure_type_matches_message() {
        let status = TestCaseStatus::failure("Multiple failures", "trace");
        assert_eq!(
            status,
            TestCaseStatus::Failure {
                message: "Multiple failures".to_owned(),
                ty: "Multiple failures".to_owned(),
                description: "trace".to_owned(),
            }
        );
    }
}
