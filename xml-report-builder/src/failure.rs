// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collecting the failures of a scenario into messages and stack traces.

use std::fmt;
use xml_report_metadata::{ExecutionResult, HookFailure, Item, Scenario, StepExecutionResult};

/// One failure found in a scenario: a message and the stack trace it came with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepFailure {
    /// The formatted failure message, e.g. `"Step Execution Failure: 'boom'"`.
    pub message: String,

    /// The raw stack trace of the failure.
    pub stack_trace: String,
}

/// The kind of node a failure was found on. Rendered at the start of the failure kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailurePrefix {
    /// A scenario's own hooks.
    Scenario,
    /// A step of the scenario or its contexts.
    Step,
    /// A step nested inside a concept, at any depth.
    Concept,
}

impl FailurePrefix {
    /// Returns the prefix as written into messages, including the trailing space.
    pub fn as_str(self) -> &'static str {
        match self {
            FailurePrefix::Scenario => "Scenario ",
            FailurePrefix::Step => "Step ",
            FailurePrefix::Concept => "Concept ",
        }
    }
}

impl fmt::Display for FailurePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of a node's failure sources produced the failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FailureSource {
    PreHook,
    PostHook,
    Execution,
}

impl FailureSource {
    fn as_str(self) -> &'static str {
        match self {
            FailureSource::PreHook => "Pre Hook Failure",
            FailureSource::PostHook => "Post Hook Failure",
            FailureSource::Execution => "Execution Failure",
        }
    }
}

/// Collects the failures of a failed scenario, in the order they are reported.
///
/// A failed hook around the scenario masks everything else and is the only failure returned.
/// Otherwise, failures of the context steps come first, followed by failures of the scenario's
/// own items. Steps nested in concepts are flattened depth-first.
pub fn scenario_failures(scenario: &Scenario) -> Vec<StepFailure> {
    if let Some(hook_failure) = format_failure(
        &scenario.heading,
        scenario.pre_hook_failure.as_ref(),
        scenario.post_hook_failure.as_ref(),
        None,
        FailurePrefix::Scenario,
    ) {
        return vec![hook_failure];
    }

    let mut failures = Vec::new();
    collect_item_failures(&scenario.contexts, FailurePrefix::Step, &mut failures);
    collect_item_failures(&scenario.scenario_items, FailurePrefix::Step, &mut failures);
    failures
}

fn collect_item_failures(items: &[Item], prefix: FailurePrefix, failures: &mut Vec<StepFailure>) {
    for item in items {
        match item {
            Item::Step(step) => {
                // A step without a result never ran, so it has nothing to report.
                if let Some(failure) = step
                    .step_execution_result
                    .as_ref()
                    .and_then(|result| format_step_failure(&step.actual_text, result, prefix))
                {
                    failures.push(failure);
                }
            }
            Item::Concept(concept) => {
                collect_item_failures(&concept.steps, FailurePrefix::Concept, failures);
            }
            Item::Scenario(_)
            | Item::TableDrivenScenario(_)
            | Item::Table(_)
            | Item::Unknown => {}
        }
    }
}

/// Formats the failure of a single node, if it failed.
///
/// Sources are considered in priority order: the pre-hook failure, then the post-hook failure,
/// then the execution result (only if it is marked failed). Only the first present source is
/// used. The message is `"{name}\n{prefix}{kind}: '{error}'"`, with the name line left out if
/// `name` is empty.
pub fn format_failure(
    name: &str,
    pre_hook_failure: Option<&HookFailure>,
    post_hook_failure: Option<&HookFailure>,
    execution_result: Option<&ExecutionResult>,
    prefix: FailurePrefix,
) -> Option<StepFailure> {
    let (source, error_message, stack_trace) = if let Some(hook) = pre_hook_failure {
        (FailureSource::PreHook, &hook.error_message, &hook.stack_trace)
    } else if let Some(hook) = post_hook_failure {
        (FailureSource::PostHook, &hook.error_message, &hook.stack_trace)
    } else if let Some(result) = execution_result.filter(|result| result.failed) {
        (
            FailureSource::Execution,
            &result.error_message,
            &result.stack_trace,
        )
    } else {
        return None;
    };

    let name_line = if name.is_empty() {
        String::new()
    } else {
        format!("{name}\n")
    };
    Some(StepFailure {
        message: format!(
            "{name_line}{prefix}{}: '{error_message}'",
            source.as_str()
        ),
        stack_trace: stack_trace.clone(),
    })
}

/// Formats the failure of a step execution result. See [`format_failure`].
pub fn format_step_failure(
    name: &str,
    result: &StepExecutionResult,
    prefix: FailurePrefix,
) -> Option<StepFailure> {
    format_failure(
        name,
        result.pre_hook_failure.as_ref(),
        result.post_hook_failure.as_ref(),
        result.execution_result.as_ref(),
        prefix,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use xml_report_metadata::{Concept, Step};

    fn hook(message: &str) -> HookFailure {
        HookFailure {
            error_message: message.to_owned(),
            stack_trace: "StackTrace".to_owned(),
        }
    }

    fn failing_result(message: &str, stack_trace: &str) -> ExecutionResult {
        ExecutionResult {
            failed: true,
            error_message: message.to_owned(),
            stack_trace: stack_trace.to_owned(),
            ..Default::default()
        }
    }

    fn step(text: &str, result: Option<ExecutionResult>) -> Item {
        Item::Step(Step {
            actual_text: text.to_owned(),
            step_execution_result: Some(StepExecutionResult {
                execution_result: result,
                ..Default::default()
            }),
        })
    }

    fn concept(steps: Vec<Item>) -> Item {
        Item::Concept(Concept {
            steps,
            ..Default::default()
        })
    }

    fn messages(failures: &[StepFailure]) -> Vec<&str> {
        failures.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn no_failure_source() {
        assert_eq!(
            format_failure("", None, None, None, FailurePrefix::Step),
            None
        );
        let passed = ExecutionResult::default();
        assert_eq!(
            format_failure("Foo", None, None, Some(&passed), FailurePrefix::Step),
            None
        );
    }

    #[test]
    fn hook_failures_take_priority() {
        let pre = hook("pre");
        let post = hook("post");
        let result = failing_result("exec", "exec trace");

        let failure =
            format_failure("", Some(&pre), Some(&post), Some(&result), FailurePrefix::Step)
                .expect("pre hook failure is reported");
        assert_eq!(failure.message, "Step Pre Hook Failure: 'pre'");
        assert_eq!(failure.stack_trace, "StackTrace");

        let failure = format_failure("", None, Some(&post), Some(&result), FailurePrefix::Step)
            .expect("post hook failure is reported");
        assert_eq!(failure.message, "Step Post Hook Failure: 'post'");

        let failure = format_failure("Foo", None, None, Some(&result), FailurePrefix::Concept)
            .expect("execution failure is reported");
        assert_eq!(failure.message, "Foo\nConcept Execution Failure: 'exec'");
        assert_eq!(failure.stack_trace, "exec trace");
    }

    #[test]
    fn name_line_is_prepended() {
        let post = hook("ErrorMessage");
        let failure = format_failure("Foo", None, Some(&post), None, FailurePrefix::Scenario)
            .expect("post hook failure is reported");
        assert_eq!(failure.message, "Foo\nScenario Post Hook Failure: 'ErrorMessage'");
    }

    #[test]
    fn scenario_hook_masks_step_failures() {
        let scenario = Scenario {
            heading: "Scenario1".to_owned(),
            failed: true,
            pre_hook_failure: Some(hook("setup broke")),
            scenario_items: vec![step("a step", Some(failing_result("boom", "trace")))],
            ..Default::default()
        };

        let failures = scenario_failures(&scenario);
        assert_eq!(
            messages(&failures),
            vec!["Scenario1\nScenario Pre Hook Failure: 'setup broke'"]
        );
    }

    #[test]
    fn contexts_come_before_scenario_items() {
        let scenario = Scenario {
            failed: true,
            contexts: vec![step("", Some(failing_result("context", "c")))],
            scenario_items: vec![
                step("", Some(failing_result("item", "i"))),
                step("passing", Some(ExecutionResult::default())),
                step("never ran", None),
            ],
            ..Default::default()
        };

        let failures = scenario_failures(&scenario);
        assert_eq!(
            messages(&failures),
            vec![
                "Step Execution Failure: 'context'",
                "Step Execution Failure: 'item'",
            ]
        );
    }

    #[test]
    fn nested_concepts_flatten_depth_first() {
        let scenario = Scenario {
            failed: true,
            scenario_items: vec![
                step("", Some(failing_result("first", "1"))),
                concept(vec![
                    step("", Some(failing_result("second", "2"))),
                    concept(vec![step("", Some(failing_result("third", "3")))]),
                    step("", Some(failing_result("fourth", "4"))),
                ]),
                step("", Some(failing_result("fifth", "5"))),
            ],
            ..Default::default()
        };

        let failures = scenario_failures(&scenario);
        assert_eq!(
            messages(&failures),
            vec![
                "Step Execution Failure: 'first'",
                "Concept Execution Failure: 'second'",
                "Concept Execution Failure: 'third'",
                "Concept Execution Failure: 'fourth'",
                "Step Execution Failure: 'fifth'",
            ]
        );
    }

    #[test]
    fn step_execution_result_helper() {
        let result = StepExecutionResult {
            post_hook_failure: Some(hook("teardown")),
            ..Default::default()
        };
        let failure = format_step_failure("step", &result, FailurePrefix::Step)
            .expect("post hook failure is reported");
        assert_eq!(failure.message, "step\nStep Post Hook Failure: 'teardown'");
    }
}
