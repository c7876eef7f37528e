// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize a `TestSuites` document.

use crate::{
    Output, TestCase, TestCaseStatus, TestSuite, TestSuites,
    report::strip_invalid_chars,
};
use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event, attributes::Attribute},
};
use std::{io, time::Duration};

static TESTSUITES_TAG: &str = "testsuites";
static TESTSUITE_TAG: &str = "testsuite";
static TESTCASE_TAG: &str = "testcase";
static PROPERTIES_TAG: &str = "properties";
static FAILURE_TAG: &str = "failure";
static SKIPPED_TAG: &str = "skipped";
static SYSTEM_OUT_TAG: &str = "system-out";
static SYSTEM_ERR_TAG: &str = "system-err";

static TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn serialize_test_suites(
    test_suites: &TestSuites,
    writer: impl io::Write,
) -> quick_xml::Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', 4);

    let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
    writer.write_event(Event::Decl(decl))?;

    // Use the destructuring syntax to ensure that all fields are handled.
    let TestSuites { test_suites } = test_suites;

    writer.write_event(Event::Start(BytesStart::new(TESTSUITES_TAG)))?;
    for test_suite in test_suites {
        serialize_test_suite(test_suite, &mut writer)?;
    }
    serialize_end_tag(TESTSUITES_TAG, &mut writer)?;

    // Add a trailing newline.
    writer.write_indent()
}

fn serialize_test_suite(
    test_suite: &TestSuite,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    // Use the destructuring syntax to ensure that all fields are handled.
    let TestSuite {
        id,
        name,
        package,
        tests,
        failures,
        errors,
        skipped,
        timestamp,
        time,
        hostname,
        test_cases,
        system_err,
    } = test_suite;

    let mut tag = BytesStart::new(TESTSUITE_TAG);
    push_attribute(&mut tag, "id", &id.to_string());
    push_attribute(&mut tag, "tests", &tests.to_string());
    push_attribute(&mut tag, "failures", &failures.to_string());
    push_attribute(&mut tag, "errors", &errors.to_string());
    if *skipped > 0 {
        push_attribute(&mut tag, "skipped", &skipped.to_string());
    }
    push_attribute(&mut tag, "package", package);
    push_attribute(&mut tag, "time", &serialize_time(time));
    push_attribute(
        &mut tag,
        "timestamp",
        &timestamp.format(TIMESTAMP_FORMAT).to_string(),
    );
    push_attribute(&mut tag, "name", name);
    push_attribute(&mut tag, "hostname", hostname);
    writer.write_event(Event::Start(tag))?;

    writer.write_event(Event::Empty(BytesStart::new(PROPERTIES_TAG)))?;

    for test_case in test_cases {
        serialize_test_case(test_case, writer)?;
    }

    serialize_output(&Output::default(), SYSTEM_OUT_TAG, writer)?;
    serialize_output(system_err, SYSTEM_ERR_TAG, writer)?;

    serialize_end_tag(TESTSUITE_TAG, writer)
}

fn serialize_test_case(
    test_case: &TestCase,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let TestCase {
        classname,
        name,
        time,
        status,
    } = test_case;

    let mut tag = BytesStart::new(TESTCASE_TAG);
    push_attribute(&mut tag, "classname", classname);
    push_attribute(&mut tag, "name", name);
    push_attribute(&mut tag, "time", &serialize_time(time));

    match status {
        TestCaseStatus::Success => writer.write_event(Event::Empty(tag)),
        TestCaseStatus::Failure {
            message,
            ty,
            description,
        } => {
            writer.write_event(Event::Start(tag))?;

            let mut failure_tag = BytesStart::new(FAILURE_TAG);
            push_attribute(&mut failure_tag, "message", message);
            push_attribute(&mut failure_tag, "type", ty);
            writer.write_event(Event::Start(failure_tag))?;
            let description = escape_text(&strip_invalid_chars(description));
            writer.write_event(Event::Text(BytesText::from_escaped(description)))?;
            serialize_end_tag(FAILURE_TAG, writer)?;

            serialize_end_tag(TESTCASE_TAG, writer)
        }
        TestCaseStatus::Skipped { message } => {
            writer.write_event(Event::Start(tag))?;

            let mut skipped_tag = BytesStart::new(SKIPPED_TAG);
            push_attribute(&mut skipped_tag, "message", message);
            writer.write_event(Event::Empty(skipped_tag))?;

            serialize_end_tag(TESTCASE_TAG, writer)
        }
    }
}

fn serialize_output(
    output: &Output,
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag_name)))?;
    let text = escape_text(output.as_str());
    writer.write_event(Event::Text(BytesText::from_escaped(text)))?;
    serialize_end_tag(tag_name, writer)
}

fn serialize_end_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag_name)))
}

/// Pushes an attribute, escaping whitespace that attribute-value normalization would otherwise
/// fold into plain spaces.
fn push_attribute(tag: &mut BytesStart<'_>, key: &str, value: &str) {
    let value = escape_attribute(value);
    tag.push_attribute(Attribute::from((key.as_bytes(), value.as_bytes())));
}

fn escape_attribute(value: &str) -> String {
    let value = strip_invalid_chars(value);
    let mut escaped = String::with_capacity(value.len());
    for c in escape(&value).chars() {
        match c {
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escapes text content. Carriage returns are written as character references, since XML
/// parsers otherwise normalize `\r\n` to `\n`.
fn escape_text(text: &str) -> String {
    escape(text).replace('\r', "&#13;")
}

// Serialize time as seconds with 3 decimal points.
fn serialize_time(time: &Duration) -> String {
    format!("{:.3}", time.as_secs_f64())
}
