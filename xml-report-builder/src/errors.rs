// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by xml-report.

use camino::{Utf8Path, Utf8PathBuf};
use config::ConfigError;
use thiserror::Error;

/// An error that occurred while reading the configuration.
#[derive(Debug, Error)]
#[error(
    "failed to parse xml-report config{}",
    .config_file.as_ref().map_or(String::new(), |file| format!(" at `{file}`"))
)]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Option<Utf8PathBuf>,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: Option<&Utf8Path>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.map(ToOwned::to_owned),
            kind,
        }
    }

    /// Returns the config file that was being read, if any.
    pub fn config_file(&self) -> Option<&Utf8Path> {
        self.config_file.as_deref()
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of [`ConfigParseError`] that occurred.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the layered config.
    #[error(transparent)]
    BuildError(ConfigError),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(serde_path_to_error::Error<ConfigError>),

    /// The configured report file name is not a plain file name.
    #[error("file-name `{file_name}` must be a non-empty file name without directories")]
    InvalidFileName {
        /// The configured file name.
        file_name: String,
    },

    /// The initial suite id passed in is larger than the config can hold.
    #[error("initial-suite-id {id} is out of range")]
    InitialSuiteIdOutOfRange {
        /// The suite id passed in.
        id: usize,
    },
}

/// An error that occurred while writing a report to disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// The report directory could not be created.
    #[error("error creating report directory `{dir}`")]
    CreateDir {
        /// The directory that could not be created.
        dir: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The report file could not be written.
    #[error("error writing report to `{path}`")]
    Write {
        /// The path that could not be written.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: atomicwrites::Error<std::io::Error>,
    },
}
