// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::io;

/// The envelope an execution result arrives in.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSuiteResult {
    /// The result of the whole suite.
    pub suite_result: SuiteResult,
}

impl ExecutionSuiteResult {
    /// Parses an execution result from JSON.
    ///
    /// Both the `{ "suiteResult": { .. } }` envelope and a bare suite result are accepted.
    pub fn from_reader(reader: impl io::Read) -> Result<SuiteResult, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Parses an execution result from a JSON string. See [`Self::from_reader`].
    pub fn from_json_str(input: &str) -> Result<SuiteResult, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Result<SuiteResult, serde_json::Error> {
        if value.get("suiteResult").is_some() {
            let envelope: ExecutionSuiteResult = serde_json::from_value(value)?;
            Ok(envelope.suite_result)
        } else {
            serde_json::from_value(value)
        }
    }
}

/// The result of executing a suite of specifications.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SuiteResult {
    /// Results for each specification, in execution order.
    pub spec_results: Vec<SpecResult>,

    /// Whether any specification failed.
    pub failed: bool,

    /// Total execution time, in milliseconds.
    pub execution_time: u64,

    /// The name of the project under test.
    pub project_name: String,

    /// The environment the suite ran against.
    pub environment: String,

    /// The tag expression used to select specifications.
    pub tags: String,

    /// When the run started, as reported by the orchestrator.
    pub timestamp: String,
}

/// The result of executing a single specification.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecResult {
    /// The executed specification, with results attached to its items.
    pub spec: Spec,

    /// Execution time, in milliseconds.
    pub execution_time: u64,

    /// The number of scenarios in the specification.
    pub scenario_count: usize,

    /// The number of failed scenarios.
    pub scenario_failed_count: usize,

    /// The number of skipped scenarios.
    pub scenario_skipped_count: usize,

    /// Whether the specification failed.
    pub failed: bool,

    /// Whether the specification was skipped.
    pub skipped: bool,

    /// Parse and validation errors found in the specification.
    pub errors: Vec<SpecError>,
}

/// An error found while parsing or validating a specification.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecError {
    /// The kind of error.
    #[serde(rename = "type")]
    pub kind: ErrorKind,

    /// The error message.
    pub message: String,

    /// The file the error was found in.
    pub filename: String,

    /// The line the error was found on.
    pub line_number: usize,
}

/// The kind of a [`SpecError`].
#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum ErrorKind {
    /// The specification could not be parsed.
    #[default]
    #[serde(rename = "PARSE_ERROR")]
    Parse,

    /// The specification parsed, but failed validation (for example, unimplemented steps).
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
}

impl ErrorKind {
    /// Returns the label used when rendering this error in a report.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Parse => "Parse",
            ErrorKind::Validation => "Validation",
        }
    }
}

/// A specification: a named collection of scenarios backed by one source file.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Spec {
    /// The specification heading. May be blank.
    pub heading: String,

    /// The source file of the specification.
    pub file_name: String,

    /// The items of the specification, in source order.
    pub items: Vec<Item>,

    /// Failures of hooks run before the specification.
    pub pre_hook_failures: Vec<HookFailure>,

    /// Failures of hooks run after the specification.
    pub post_hook_failures: Vec<HookFailure>,

    /// Tags attached to the specification.
    pub tags: Vec<String>,
}

impl Spec {
    /// Returns true if any hook around this specification failed.
    pub fn has_hook_failure(&self) -> bool {
        !self.pre_hook_failures.is_empty() || !self.post_hook_failures.is_empty()
    }
}

/// An item in a specification, scenario or concept.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "itemType")]
pub enum Item {
    /// A scenario. Only appears at the top level of a specification.
    Scenario(Scenario),

    /// A scenario instantiated for a row of a data table. Only appears at the top level of a
    /// specification.
    TableDrivenScenario(TableDrivenScenario),

    /// A data table.
    Table(Table),

    /// A concept, expanding to nested steps and concepts.
    Concept(Concept),

    /// A step.
    Step(Step),

    /// Any other kind of item, such as a comment.
    #[serde(other)]
    Unknown,
}

impl Item {
    /// Returns a short name for the kind of this item, for diagnostics.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Item::Scenario(_) => "scenario",
            Item::TableDrivenScenario(_) => "table-driven scenario",
            Item::Table(_) => "table",
            Item::Concept(_) => "concept",
            Item::Step(_) => "step",
            Item::Unknown => "unknown item",
        }
    }
}

/// An executed scenario.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    /// The scenario heading.
    pub heading: String,

    /// Whether the scenario failed.
    pub failed: bool,

    /// Whether the scenario was skipped.
    pub skipped: bool,

    /// Execution time, in milliseconds.
    pub execution_time: u64,

    /// Failure of the hook run before the scenario.
    pub pre_hook_failure: Option<HookFailure>,

    /// Failure of the hook run after the scenario.
    pub post_hook_failure: Option<HookFailure>,

    /// Context (setup) steps run before the scenario's own items.
    pub contexts: Vec<Item>,

    /// The scenario's own steps and concepts.
    pub scenario_items: Vec<Item>,

    /// Teardown steps run after the scenario's own items.
    pub tear_downs: Vec<Item>,

    /// Why the scenario was skipped, if it was.
    pub skip_errors: Vec<String>,

    /// Tags attached to the scenario.
    pub tags: Vec<String>,
}

/// A scenario instantiated for a row of a data table.
///
/// Older orchestrators only send `tableRowIndex`; newer ones distinguish the specification's
/// data table from the scenario's own table, and send the row contents. See
/// [`TableDrivenScenario::row_shape`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TableDrivenScenario {
    /// The instantiated scenario.
    pub scenario: Scenario,

    /// The 0-based row index, for the single-table shape.
    pub table_row_index: usize,

    /// The row of the specification's data table this scenario was run for.
    pub spec_table_row: Option<TableRowRef>,

    /// The row of the scenario's data table this scenario was run for.
    pub scenario_table_row: Option<TableRowRef>,
}

impl TableDrivenScenario {
    /// Returns which shape of table drive this scenario carries.
    pub fn row_shape(&self) -> RowShape<'_> {
        match (&self.spec_table_row, &self.scenario_table_row) {
            (None, None) => RowShape::Single {
                index: self.table_row_index,
            },
            (spec, scenario) => RowShape::Split {
                spec: spec.as_ref(),
                scenario: scenario.as_ref(),
            },
        }
    }
}

/// The shape of a [`TableDrivenScenario`]'s row information.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowShape<'a> {
    /// A single data table; only the row index is known.
    Single {
        /// The 0-based row index.
        index: usize,
    },

    /// Separate specification-level and scenario-level tables. At least one is present.
    Split {
        /// The specification table row, if the scenario is driven by the specification table.
        spec: Option<&'a TableRowRef>,

        /// The scenario table row, if the scenario is driven by its own table.
        scenario: Option<&'a TableRowRef>,
    },
}

/// One row of a data table, with the table's headers.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRowRef {
    /// The 0-based index of the row within its table.
    pub index: usize,

    /// The table's column headers, in column order.
    pub headers: Vec<String>,

    /// The row's cell values, in column order.
    pub cells: Vec<String>,
}

impl TableRowRef {
    /// Iterates over `(header, cell)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(&self.cells)
            .map(|(header, cell)| (header.as_str(), cell.as_str()))
    }
}

/// A data table.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    /// Column headers.
    pub headers: Vec<String>,

    /// Rows of cells.
    pub rows: Vec<Vec<String>>,
}

/// An executed concept.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Concept {
    /// The step that invoked this concept.
    pub concept_step: Option<Step>,

    /// The nested steps and concepts, in execution order.
    pub steps: Vec<Item>,

    /// The aggregate result of the concept.
    pub concept_execution_result: Option<StepExecutionResult>,
}

/// An executed step.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Step {
    /// The step text, with parameters substituted.
    pub actual_text: String,

    /// The result of executing this step, if it was executed.
    pub step_execution_result: Option<StepExecutionResult>,
}

/// The result of executing a step, including its hooks.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StepExecutionResult {
    /// The result of the step itself.
    pub execution_result: Option<ExecutionResult>,

    /// Failure of the hook run before the step.
    pub pre_hook_failure: Option<HookFailure>,

    /// Failure of the hook run after the step.
    pub post_hook_failure: Option<HookFailure>,

    /// Whether the step was skipped.
    pub skipped: bool,

    /// Why the step was skipped.
    pub skipped_reason: String,
}

/// The outcome of running a step implementation.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutionResult {
    /// Whether the step failed.
    pub failed: bool,

    /// The failure message.
    pub error_message: String,

    /// The failure stack trace.
    pub stack_trace: String,

    /// Whether execution continued after this failure.
    pub recoverable_error: bool,

    /// Execution time, in milliseconds.
    pub execution_time: u64,
}

/// A failure in a hook (setup or teardown code) around a specification, scenario or step.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct HookFailure {
    /// The failure message.
    pub error_message: String,

    /// The failure stack trace.
    pub stack_trace: String,
}
