// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for where and how reports are written.

use crate::errors::{ConfigParseError, ConfigParseErrorKind};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::Deserialize;

/// The environment variable the orchestrator sets to the reports directory.
pub static REPORTS_DIR_ENV: &str = "gauge_reports_dir";

/// The environment variable the orchestrator sets to `false` to keep earlier reports.
pub static OVERWRITE_REPORTS_ENV: &str = "overwrite_reports";

/// The environment variable that overrides the report file name.
pub static FILE_NAME_ENV: &str = "xml_report_file_name";

/// Reports are written into this subdirectory of the reports directory.
pub static REPORT_SUBDIR: &str = "xml-report";

/// Resolved xml-report configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    reports_dir: Utf8PathBuf,
    overwrite_reports: bool,
    file_name: String,
    initial_suite_id: usize,
}

/// Values passed in on the command line, which take precedence over every other source.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Overrides `reports-dir`.
    pub reports_dir: Option<Utf8PathBuf>,

    /// Overrides `initial-suite-id`.
    pub initial_suite_id: Option<usize>,
}

impl ReportConfig {
    /// The default configuration, as TOML.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads the configuration from its layered sources.
    ///
    /// In increasing order of precedence: the default config, `config_file` if given, the
    /// orchestrator's environment variables (looked up through `env`), and `overrides`.
    pub fn from_sources(
        config_file: Option<&Utf8Path>,
        env: impl Fn(&str) -> Option<String>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigParseError> {
        // Config stores integers as i64.
        let initial_suite_id = overrides
            .initial_suite_id
            .map(|id| {
                i64::try_from(id).map_err(|_| {
                    ConfigParseError::new(
                        None,
                        ConfigParseErrorKind::InitialSuiteIdOutOfRange { id },
                    )
                })
            })
            .transpose()?;

        let build_error =
            |error| ConfigParseError::new(config_file, ConfigParseErrorKind::BuildError(error));
        let config = Self::make_builder(config_file, env, overrides, initial_suite_id)
            .and_then(|builder| builder.build())
            .map_err(build_error)?;
        let data: ReportConfigImpl = serde_path_to_error::deserialize(config).map_err(|error| {
            ConfigParseError::new(config_file, ConfigParseErrorKind::DeserializeError(error))
        })?;

        // Rejects empty names, names with directories, and names like `..`.
        if Utf8Path::new(&data.file_name).file_name() != Some(data.file_name.as_str()) {
            return Err(ConfigParseError::new(
                config_file,
                ConfigParseErrorKind::InvalidFileName {
                    file_name: data.file_name,
                },
            ));
        }

        Ok(Self {
            reports_dir: data.reports_dir,
            overwrite_reports: data.overwrite_reports,
            file_name: data.file_name,
            initial_suite_id: data.initial_suite_id,
        })
    }

    /// Returns the default configuration.
    pub fn default_config() -> Result<Self, ConfigParseError> {
        Self::from_sources(None, |_| None, &ConfigOverrides::default())
    }

    fn make_builder(
        config_file: Option<&Utf8Path>,
        env: impl Fn(&str) -> Option<String>,
        overrides: &ConfigOverrides,
        initial_suite_id: Option<i64>,
    ) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(config_file) = config_file {
            builder = builder.add_source(File::new(config_file.as_str(), FileFormat::Toml));
        }

        // Overrides set later replace ones set earlier, so command-line values go last.
        builder
            .set_override_option("reports-dir", env(REPORTS_DIR_ENV))?
            .set_override_option("overwrite-reports", env(OVERWRITE_REPORTS_ENV))?
            .set_override_option("file-name", env(FILE_NAME_ENV))?
            .set_override_option(
                "reports-dir",
                overrides.reports_dir.as_ref().map(|dir| dir.as_str()),
            )?
            .set_override_option("initial-suite-id", initial_suite_id)
    }

    /// Returns the directory reports are written into.
    pub fn reports_dir(&self) -> &Utf8Path {
        &self.reports_dir
    }

    /// Returns true if a new report replaces the previous one.
    pub fn overwrite_reports(&self) -> bool {
        self.overwrite_reports
    }

    /// Returns the file name of the report.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the id suites are numbered after.
    pub fn initial_suite_id(&self) -> usize {
        self.initial_suite_id
    }

    /// Returns the directory the `xml-report` output lives in.
    pub fn report_dir(&self) -> Utf8PathBuf {
        self.reports_dir.join(REPORT_SUBDIR)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ReportConfigImpl {
    reports_dir: Utf8PathBuf,
    overwrite_reports: bool,
    file_name: String,
    initial_suite_id: usize,
}
