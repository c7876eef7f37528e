// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the execution results that xml-report converts.
//!
//! An execution result is a tree: a [`SuiteResult`] holds one [`SpecResult`] per
//! specification, whose [`Spec`] holds [`Item`]s (scenarios, steps, concepts and tables).
//! The types here deserialize from the camelCase JSON emitted by the test orchestrator.

mod exit_codes;
mod result;

pub use exit_codes::*;
pub use result::*;
