// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building JUnit test suites from execution results.
//!
//! Each [`SpecResult`] becomes one [`TestSuite`], and each scenario in it one [`TestCase`].

use crate::{
    failure::{StepFailure, scenario_failures},
    helpers::{has_parse_errors, local_now, millis, resolve_hostname, spec_name},
};
use chrono::NaiveDateTime;
use itertools::Itertools;
use swrite::{SWrite, swrite};
use tracing::{debug, warn};
use xml_report_junit::{SerializeError, TestCase, TestCaseStatus, TestSuite, TestSuites};
use xml_report_metadata::{
    Item, RowShape, Scenario, SpecResult, SuiteResult, TableDrivenScenario, TableRowRef,
};

static MULTIPLE_FAILURES: &str = "Multiple failures";
static PARSE_VALIDATION_ERRORS: &str = "Parse/Validation Errors";

/// Converts execution results into JUnit reports, numbering suites across calls.
///
/// Every spec processed advances the suite id by one, whether it is processed in one call or
/// spread across many. Each call produces a document containing only the suites of that call.
#[derive(Clone, Debug)]
pub struct ReportBuilder {
    current_id: usize,
    stamp: SuiteStamp,
}

impl ReportBuilder {
    /// Creates a new builder. The first suite built gets id `initial_id + 1`.
    pub fn new(initial_id: usize) -> Self {
        Self {
            current_id: initial_id,
            stamp: SuiteStamp::default(),
        }
    }

    /// Sets how suites are stamped with a host name and timestamp.
    pub fn with_stamp(mut self, stamp: SuiteStamp) -> Self {
        self.stamp = stamp;
        self
    }

    /// Returns the id of the last suite built, or the initial id if none were built yet.
    pub fn current_id(&self) -> usize {
        self.current_id
    }

    /// Builds the report document for an execution result.
    pub fn build_report(&mut self, result: &SuiteResult) -> TestSuites {
        let (test_suites, last_id) = build_test_suites(result, self.current_id, &self.stamp);
        self.current_id = last_id;
        test_suites
    }

    /// Builds the report for an execution result and serializes it to XML.
    ///
    /// On error, the suite counter has still advanced, but no output is produced.
    pub fn build(&mut self, result: &SuiteResult) -> Result<Vec<u8>, SerializeError> {
        self.build_report(result).to_bytes()
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Where a suite's host name and timestamp come from.
///
/// By default, the host name is looked up and the timestamp is the local time at which each
/// suite is built. Either can be fixed, which makes reports reproducible.
#[derive(Clone, Debug, Default)]
pub struct SuiteStamp {
    hostname: Option<String>,
    timestamp: Option<NaiveDateTime>,
}

impl SuiteStamp {
    /// Creates a stamp that resolves both values when each suite is built.
    pub fn live() -> Self {
        Self::default()
    }

    /// Creates a stamp with both values fixed.
    pub fn fixed(hostname: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            hostname: Some(hostname.into()),
            timestamp: Some(timestamp),
        }
    }

    fn hostname(&self) -> String {
        self.hostname.clone().unwrap_or_else(resolve_hostname)
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp.unwrap_or_else(local_now)
    }
}

/// Builds one test suite per spec result, numbering them from `initial_id + 1`.
///
/// Returns the document along with the id of the last suite built (`initial_id` if there were
/// no spec results), so that a later call can continue the numbering.
pub fn build_test_suites(
    result: &SuiteResult,
    initial_id: usize,
    stamp: &SuiteStamp,
) -> (TestSuites, usize) {
    let mut test_suites = TestSuites::new();
    let mut current_id = initial_id;
    for spec_result in &result.spec_results {
        current_id += 1;
        test_suites.add_test_suite(build_test_suite(spec_result, current_id, stamp));
    }
    (test_suites, current_id)
}

fn build_test_suite(spec_result: &SpecResult, id: usize, stamp: &SuiteStamp) -> TestSuite {
    let spec = &spec_result.spec;
    let name = spec_name(spec);

    let mut test_suite = TestSuite::new(id, name, stamp.timestamp());
    test_suite
        .set_package(&spec.file_name)
        .set_hostname(stamp.hostname())
        .set_time(millis(spec_result.execution_time));
    test_suite.tests = spec_result.scenario_count;
    test_suite.failures = spec_result.scenario_failed_count;
    test_suite.skipped = spec_result.scenario_skipped_count;
    if spec_result.scenario_skipped_count > 0 {
        test_suite.set_system_err(format!(
            "Validation failed, {} Scenarios were skipped.",
            spec_result.scenario_skipped_count
        ));
    }

    if has_parse_errors(&spec_result.errors) {
        debug!(
            "spec `{name}` has {} parse/validation errors, reporting them as one test case",
            spec_result.errors.len()
        );
        test_suite.failures += 1;
        test_suite.add_test_case(error_test_case(spec_result, name));
        return test_suite;
    }

    // Spec-level hook failures are counted, but have no test case of their own.
    if spec.has_hook_failure() {
        test_suite.failures += 1;
    }

    for item in &spec.items {
        match item {
            Item::Scenario(scenario) => {
                test_suite.add_test_case(scenario_test_case(name, scenario, &scenario.heading));
            }
            Item::TableDrivenScenario(table_driven) => {
                let heading = table_driven_heading(table_driven);
                test_suite.add_test_case(scenario_test_case(
                    name,
                    &table_driven.scenario,
                    &heading,
                ));
            }
            Item::Table(_) | Item::Unknown => {}
            Item::Concept(_) | Item::Step(_) => {
                warn!(
                    "ignoring {} at the top level of spec `{name}`",
                    item.kind_str()
                );
            }
        }
    }

    debug!(
        "built suite {id} for `{name}` with {} test cases",
        test_suite.test_cases.len()
    );
    test_suite
}

/// The single test case standing in for a spec that failed to parse.
fn error_test_case(spec_result: &SpecResult, name: &str) -> TestCase {
    let description = spec_result
        .errors
        .iter()
        .map(|error| format!("[{} Error] {}", error.kind.label(), error.message))
        .join("\n");

    let mut test_case = TestCase::new(
        name,
        name,
        TestCaseStatus::failure(PARSE_VALIDATION_ERRORS, description),
    );
    test_case.set_time(millis(spec_result.execution_time));
    test_case
}

fn scenario_test_case(suite_name: &str, scenario: &Scenario, heading: &str) -> TestCase {
    let status = if scenario.skipped {
        TestCaseStatus::skipped(scenario.skip_errors.join("\n"))
    } else if scenario.failed {
        failure_status(scenario_failures(scenario))
    } else {
        TestCaseStatus::Success
    };

    let mut test_case = TestCase::new(suite_name, heading, status);
    test_case.set_time(millis(scenario.execution_time));
    test_case
}

fn failure_status(mut failures: Vec<StepFailure>) -> TestCaseStatus {
    match failures.len() {
        // The scenario is marked failed, but nothing in it says why.
        0 => TestCaseStatus::failure("", ""),
        1 => {
            let StepFailure {
                message,
                stack_trace,
            } = failures.remove(0);
            TestCaseStatus::failure(message, stack_trace)
        }
        _ => {
            let description = failures
                .iter()
                .map(|failure| format!("{}\n{}", failure.message, failure.stack_trace))
                .join("\n\n");
            TestCaseStatus::failure(MULTIPLE_FAILURES, description)
        }
    }
}

/// The heading of a table-driven scenario, suffixed with the data row(s) it was run for.
pub fn table_driven_heading(table_driven: &TableDrivenScenario) -> String {
    let heading = &table_driven.scenario.heading;
    match table_driven.row_shape() {
        RowShape::Single { index } => format!("{heading} {}", index + 1),
        RowShape::Split { spec, scenario } => {
            let mut suffixes = Vec::with_capacity(2);
            if let Some(row) = spec {
                suffixes.push(format!("| SpecRow: {}", row_description(row)));
            }
            if let Some(row) = scenario {
                suffixes.push(format!("ScnRow: {}", row_description(row)));
            }
            format!("{heading} {}", suffixes.join(" "))
        }
    }
}

fn row_description(row: &TableRowRef) -> String {
    let mut description = format!("{}:", row.index + 1);
    for (header, cell) in row.columns() {
        swrite!(description, " [{header}: {cell}]");
    }
    description
}
