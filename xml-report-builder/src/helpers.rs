// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8Path;
use chrono::{Local, NaiveDateTime};
use std::time::Duration;
use xml_report_metadata::{ErrorKind, Spec, SpecError};

/// Used when the host name can't be determined.
pub(crate) static FALLBACK_HOSTNAME: &str = "HOSTNAME";

/// The display name of a spec: its heading, or the base name of its file if the heading is
/// blank.
pub(crate) fn spec_name(spec: &Spec) -> &str {
    if spec.heading.trim().is_empty() {
        Utf8Path::new(&spec.file_name)
            .file_name()
            .unwrap_or(&spec.file_name)
    } else {
        &spec.heading
    }
}

/// Returns true if any of the errors is a parse error. Validation errors alone don't count.
pub(crate) fn has_parse_errors(errors: &[SpecError]) -> bool {
    errors.iter().any(|error| error.kind == ErrorKind::Parse)
}

/// Execution times arrive as milliseconds.
pub(crate) fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

pub(crate) fn resolve_hostname() -> String {
    match whoami::hostname() {
        Ok(hostname) => hostname,
        Err(error) => {
            tracing::debug!(
                "unable to determine host name, using `{FALLBACK_HOSTNAME}`: {error}"
            );
            FALLBACK_HOSTNAME.to_owned()
        }
    }
}

pub(crate) fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
