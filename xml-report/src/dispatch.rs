// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, InputSource,
    errors::Result,
    output::{OutputContext, OutputOpts, OutputWriter, clap_styles},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use std::io::{BufReader, Write};
use tracing::debug;
use xml_report_builder::{
    builder::ReportBuilder,
    config::{ConfigOverrides, ReportConfig},
    writer::{ReportWriter, write_report_to},
};
use xml_report_metadata::{ExecutionSuiteResult, SuiteResult, XmlReportExitCode};

/// Converts test execution results into JUnit XML reports.
#[derive(Debug, Parser)]
#[command(version, styles = clap_styles::style())]
pub struct XmlReportApp {
    #[command(flatten)]
    output: OutputOpts,

    #[command(subcommand)]
    command: Command,
}

impl XmlReportApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the exit code.
    pub fn exec(self, output_writer: &mut OutputWriter) -> Result<i32> {
        match self.command {
            Command::Convert(opts) => {
                opts.exec(|name| std::env::var(name).ok(), output_writer)?;
                Ok(XmlReportExitCode::OK)
            }
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert an execution result into a JUnit XML report
    ///
    /// The execution result is read as JSON. By default the report is written to
    /// `<reports-dir>/xml-report/<file-name>`, as configured by the config file and the
    /// `gauge_reports_dir`, `overwrite_reports` and `xml_report_file_name` environment variables.
    Convert(ConvertOpts),
}

#[derive(Debug, Args)]
struct ConvertOpts {
    /// Execution result to read, or `-` for stdin [default: -]
    #[arg(long, short, value_name = "PATH")]
    input: Option<Utf8PathBuf>,

    /// Write the report here instead, or to stdout if `-`
    #[arg(long, short, value_name = "PATH")]
    output: Option<Utf8PathBuf>,

    /// Config file
    #[arg(long, value_name = "PATH")]
    config: Option<Utf8PathBuf>,

    /// Directory reports are written under
    #[arg(long, value_name = "DIR")]
    reports_dir: Option<Utf8PathBuf>,

    /// Suites are numbered starting after this id
    #[arg(long, value_name = "N")]
    initial_suite_id: Option<usize>,
}

impl ConvertOpts {
    fn exec(
        self,
        env: impl Fn(&str) -> Option<String>,
        output_writer: &mut OutputWriter,
    ) -> Result<()> {
        let overrides = ConfigOverrides {
            reports_dir: self.reports_dir,
            initial_suite_id: self.initial_suite_id,
        };
        let config = ReportConfig::from_sources(self.config.as_deref(), env, &overrides)?;

        let result = read_input(self.input.as_deref())?;
        debug!(
            "read execution result for `{}` with {} spec results",
            result.project_name,
            result.spec_results.len()
        );

        let xml = ReportBuilder::new(config.initial_suite_id()).build(&result)?;

        match self.output.as_deref() {
            Some(path) if path.as_str() == "-" => {
                let mut writer = output_writer.stdout_writer();
                writer
                    .write_all(&xml)
                    .and_then(|()| writer.flush())
                    .map_err(|err| ExpectedError::WriteOutputError { err })?;
            }
            Some(path) => write_report_to(path, &xml)?,
            None => {
                let now = chrono::Local::now().naive_local();
                ReportWriter::new(&config).write(now, &xml)?;
            }
        }
        Ok(())
    }
}

fn read_input(input: Option<&Utf8Path>) -> Result<SuiteResult> {
    match input {
        Some(path) if path.as_str() != "-" => {
            let file = fs_err::File::open(path).map_err(|err| ExpectedError::InputOpenFailed {
                path: path.to_owned(),
                err,
            })?;
            ExecutionSuiteResult::from_reader(BufReader::new(file)).map_err(|err| {
                ExpectedError::input_read_failed(InputSource::File(path.to_owned()), err)
            })
        }
        _ => ExecutionSuiteResult::from_reader(std::io::stdin().lock())
            .map_err(|err| ExpectedError::input_read_failed(InputSource::Stdin, err)),
    }
}
