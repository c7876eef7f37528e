// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Data model and serializer for the JUnit XML documents produced by xml-report.
//!
//! The shape of the document is fixed: a `<testsuites>` root holding one `<testsuite>` per
//! specification, each carrying an `id`, `package` and `hostname` alongside the usual counts.

mod errors;
mod report;
mod serialize;

pub use errors::SerializeError;
pub use report::*;
