// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writing reports to disk.

use crate::{config::ReportConfig, errors::WriteReportError};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDateTime;
use std::io::Write;
use tracing::{debug, info};

/// The format of the per-run directory used when reports aren't overwritten.
pub static RUN_DIR_FORMAT: &str = "%Y-%m-%d %H.%M.%S";

/// Writes serialized reports to the location a [`ReportConfig`] describes.
#[derive(Clone, Debug)]
pub struct ReportWriter<'cfg> {
    config: &'cfg ReportConfig,
}

impl<'cfg> ReportWriter<'cfg> {
    /// Creates a new writer for this configuration.
    pub fn new(config: &'cfg ReportConfig) -> Self {
        Self { config }
    }

    /// Returns the path a report written at `now` goes to.
    ///
    /// With `overwrite-reports` set, this is always `<reports-dir>/xml-report/<file-name>`.
    /// Otherwise each run gets its own directory, named after `now`, under `xml-report`.
    pub fn report_path(&self, now: NaiveDateTime) -> Utf8PathBuf {
        let mut path = self.config.report_dir();
        if !self.config.overwrite_reports() {
            path.push(now.format(RUN_DIR_FORMAT).to_string());
        }
        path.push(self.config.file_name());
        path
    }

    /// Writes the report, returning the path it was written to.
    pub fn write(&self, now: NaiveDateTime, xml: &[u8]) -> Result<Utf8PathBuf, WriteReportError> {
        let path = self.report_path(now);
        write_report_to(&path, xml)?;
        Ok(path)
    }
}

/// Writes a report to `path`, creating parent directories as needed.
///
/// The file is replaced atomically, so readers never observe a partially written report.
pub fn write_report_to(path: &Utf8Path, xml: &[u8]) -> Result<(), WriteReportError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
        fs_err::create_dir_all(dir).map_err(|error| WriteReportError::CreateDir {
            dir: dir.to_owned(),
            error,
        })?;
    }

    debug!("writing {} bytes to `{path}`", xml.len());
    atomicwrites::AtomicFile::new(path, atomicwrites::AllowOverwrite)
        .write(|file| file.write_all(xml))
        .map_err(|error| WriteReportError::Write {
            path: path.to_owned(),
            error,
        })?;
    info!("successfully generated xml-report to => {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigOverrides, OVERWRITE_REPORTS_ENV};
    use camino_tempfile::Utf8TempDir;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(14, 5, 7))
            .expect("valid timestamp")
    }

    fn config(reports_dir: &Utf8Path, overwrite: bool) -> ReportConfig {
        let overrides = ConfigOverrides {
            reports_dir: Some(reports_dir.to_owned()),
            initial_suite_id: None,
        };
        let overwrite = overwrite.to_string();
        ReportConfig::from_sources(
            None,
            |name| (name == OVERWRITE_REPORTS_ENV).then(|| overwrite.clone()),
            &overrides,
        )
        .expect("config is valid")
    }

    #[test]
    fn overwriting_path() {
        let config = config(Utf8Path::new("reports"), true);
        let writer = ReportWriter::new(&config);
        assert_eq!(writer.report_path(now()), "reports/xml-report/result.xml");
    }

    #[test]
    fn per_run_path() {
        let config = config(Utf8Path::new("reports"), false);
        let writer = ReportWriter::new(&config);
        assert_eq!(
            writer.report_path(now()),
            "reports/xml-report/2024-03-09 14.05.07/result.xml"
        );
    }

    #[test]
    fn write_creates_directories_and_overwrites() {
        let dir = Utf8TempDir::new().expect("temp dir created");
        let config = config(dir.path(), true);
        let writer = ReportWriter::new(&config);

        let path = writer.write(now(), b"<first/>").expect("report written");
        assert_eq!(path, dir.path().join("xml-report").join("result.xml"));
        assert_eq!(
            std::fs::read_to_string(&path).expect("report read"),
            "<first/>"
        );

        let path = writer.write(now(), b"<second/>").expect("report rewritten");
        assert_eq!(
            std::fs::read_to_string(&path).expect("report read"),
            "<second/>"
        );
    }

    #[test]
    fn write_fails_when_parent_is_a_file() {
        let dir = Utf8TempDir::new().expect("temp dir created");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").expect("file written");

        let error = write_report_to(&blocker.join("result.xml"), b"<x/>")
            .expect_err("parent is not a directory");
        assert!(
            matches!(&error, WriteReportError::CreateDir { dir, .. } if *dir == blocker),
            "unexpected error: {error:?}"
        );
    }
}
