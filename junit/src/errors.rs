// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// An error that occurs while serializing a [`TestSuites`](crate::TestSuites) document.
///
/// Returned by [`TestSuites::serialize`](crate::TestSuites::serialize) and
/// [`TestSuites::to_bytes`](crate::TestSuites::to_bytes).
#[derive(Debug, Error)]
#[error("error serializing JUnit report")]
pub struct SerializeError {
    #[from]
    inner: quick_xml::Error,
}

