// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `xml-report` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum XmlReportExitCode {}

impl XmlReportExitCode {
    /// No errors occurred and the report was written.
    pub const OK: i32 = 0;

    /// The execution result could not be read.
    pub const INPUT_READ_FAILED: i32 = 101;

    /// The execution result was read, but is not a valid execution result.
    pub const INPUT_PARSE_FAILED: i32 = 102;

    /// Serializing or writing the report produced an error.
    pub const WRITE_REPORT_FAILED: i32 = 103;

    /// A user issue happened while setting up an xml-report invocation, such as an invalid
    /// configuration file.
    pub const SETUP_ERROR: i32 = 96;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
