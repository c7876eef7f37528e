// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for xml-report: converting an execution result into a JUnit XML report.
//!
//! The entry point is [`ReportBuilder`](builder::ReportBuilder), or the pure function
//! [`build_test_suites`](builder::build_test_suites) it wraps. Writing the report to disk is
//! handled by [`ReportWriter`](writer::ReportWriter), configured through
//! [`ReportConfig`](config::ReportConfig).

pub mod builder;
pub mod config;
pub mod errors;
pub mod failure;
mod helpers;
pub mod writer;
