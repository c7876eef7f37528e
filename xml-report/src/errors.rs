// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use std::{error::Error, fmt};
use thiserror::Error;
use tracing::error;
use xml_report_builder::errors::{ConfigParseError, WriteReportError};
use xml_report_junit::SerializeError;
use xml_report_metadata::XmlReportExitCode;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// Where the execution result is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[doc(hidden)]
pub enum InputSource {
    Stdin,
    File(Utf8PathBuf),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

// The #[error()] strings are placeholders; errors are expected to be printed with
// display_to_stderr, which colorizes them.

/// An error that xml-report expects to encounter, such as unreadable input.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("failed to open input")]
    InputOpenFailed {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to read execution result")]
    InputReadFailed {
        input: InputSource,
        #[source]
        err: serde_json::Error,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("failed to serialize report")]
    SerializeError {
        #[from]
        err: SerializeError,
    },
    #[error("failed to write report")]
    WriteReportError {
        #[from]
        err: WriteReportError,
    },
    #[error("failed to write report to stdout")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    pub(crate) fn input_read_failed(input: InputSource, err: serde_json::Error) -> Self {
        Self::InputReadFailed { input, err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::InputOpenFailed { .. } => XmlReportExitCode::INPUT_READ_FAILED,
            // serde_json reports I/O failures while reading through the same error type.
            Self::InputReadFailed { err, .. } if err.is_io() => {
                XmlReportExitCode::INPUT_READ_FAILED
            }
            Self::InputReadFailed { .. } => XmlReportExitCode::INPUT_PARSE_FAILED,
            Self::ConfigParseError { .. } => XmlReportExitCode::SETUP_ERROR,
            Self::SerializeError { .. } | Self::WriteReportError { .. } => {
                XmlReportExitCode::WRITE_REPORT_FAILED
            }
            Self::WriteOutputError { .. } => XmlReportExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::InputOpenFailed { path, err } => {
                error!("failed to open input `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::InputReadFailed { input, err } => {
                if err.is_io() {
                    error!("failed to read execution result from {}", input.style(styles.bold));
                } else {
                    error!(
                        "failed to parse execution result from {}",
                        input.style(styles.bold)
                    );
                }
                Some(err as &dyn Error)
            }
            Self::ConfigParseError { err } => {
                error!("{err}");
                err.source()
            }
            Self::SerializeError { err } => {
                error!("{err}");
                err.source()
            }
            Self::WriteReportError { err } => {
                error!("{err}");
                err.source()
            }
            Self::WriteOutputError { err } => {
                error!("failed to write report to stdout");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn input_exit_codes() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{")
            .expect_err("truncated JSON is invalid");
        let error = ExpectedError::input_read_failed(InputSource::Stdin, parse_error);
        assert_eq!(error.process_exit_code(), XmlReportExitCode::INPUT_PARSE_FAILED);

        let io_error = serde_json::Error::io(io::Error::other("pipe closed"));
        let error = ExpectedError::input_read_failed(InputSource::Stdin, io_error);
        assert_eq!(error.process_exit_code(), XmlReportExitCode::INPUT_READ_FAILED);

        let error = ExpectedError::InputOpenFailed {
            path: "missing.json".into(),
            err: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(error.process_exit_code(), XmlReportExitCode::INPUT_READ_FAILED);
    }

    #[test]
    fn input_source_display() {
        assert_eq!(InputSource::Stdin.to_string(), "<stdin>");
        assert_eq!(
            InputSource::File("results/last_run.json".into()).to_string(),
            "results/last_run.json"
        );
    }
}
