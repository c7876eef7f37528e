// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::NaiveDate;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::time::Duration;
use xml_report_junit::{TestCase, TestCaseStatus, TestSuite, TestSuites};

#[test]
fn basic_report() {
    let xml = String::from_utf8(basic_test_suites().to_bytes().expect("serializing succeeds"))
        .expect("report is UTF-8");

    assert_eq!(
        xml,
        indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <testsuites>
                <testsuite id="1" tests="3" failures="1" errors="0" skipped="1" package="specs/example.spec" time="1.500" timestamp="2024-05-06T07:08:09" name="HEADING" hostname="build-host">
                    <properties/>
                    <testcase classname="HEADING" name="Scenario1" time="0.250"/>
                    <testcase classname="HEADING" name="Scenario2" time="1.000">
                        <failure message="Step Execution Failure: &apos;boom&apos;" type="Step Execution Failure: &apos;boom&apos;">stack &lt;trace&gt;</failure>
                    </testcase>
                    <testcase classname="HEADING" name="Scenario3" time="0.000">
                        <skipped message="no reason"/>
                    </testcase>
                    <system-out></system-out>
                    <system-err>Validation failed, 1 Scenarios were skipped.</system-err>
                </testsuite>
            </testsuites>
        "#}
    );
}

#[test]
fn empty_report() {
    let xml = String::from_utf8(TestSuites::new().to_bytes().expect("serializing succeeds"))
        .expect("report is UTF-8");

    assert_eq!(
        xml,
        indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <testsuites>
            </testsuites>
        "#}
    );
}

#[test]
fn multi_line_failure_message_survives_as_attribute() {
    let mut suite = TestSuite::new(7, "spec", timestamp());
    suite.set_package("spec.spec").set_hostname("h");
    suite.add_test_case(TestCase::new(
        "spec",
        "scenario",
        TestCaseStatus::failure("Scenario1\nScenario Pre Hook Failure: 'x'", ""),
    ));
    let mut test_suites = TestSuites::new();
    test_suites.add_test_suite(suite);

    let xml = String::from_utf8(test_suites.to_bytes().expect("serializing succeeds"))
        .expect("report is UTF-8");

    assert!(
        xml.contains(
            r#"<failure message="Scenario1&#10;Scenario Pre Hook Failure: &apos;x&apos;" type="Scenario1&#10;Scenario Pre Hook Failure: &apos;x&apos;"></failure>"#
        ),
        "unexpected output:\n{xml}"
    );
    assert!(!xml.contains("skipped=\""), "skipped count of 0 is omitted");
}

#[test]
fn failure_text_stays_well_formed() {
    let mut suite = TestSuite::new(1, "spec", timestamp());
    suite.add_test_case(TestCase::new(
        "spec",
        "scenario",
        TestCaseStatus::failure("boom\u{FFFE}", "at a\r\nat b\u{FFFF}"),
    ));
    let mut test_suites = TestSuites::new();
    test_suites.add_test_suite(suite);

    let xml = String::from_utf8(test_suites.to_bytes().expect("serializing succeeds"))
        .expect("report is UTF-8");

    assert!(
        xml.contains("<failure message=\"boom\" type=\"boom\">at a&#13;\nat b</failure>"),
        "unexpected output:\n{xml}"
    );
    assert!(!xml.contains(['\u{FFFE}', '\u{FFFF}', '\r']));
}

fn basic_test_suites() -> TestSuites {
    let mut suite = TestSuite::new(1, "HEADING", timestamp());
    suite
        .set_package("specs/example.spec")
        .set_hostname("build-host")
        .set_time(Duration::from_millis(1500))
        .set_system_err("Validation failed, 1 Scenarios were skipped.");
    suite.tests = 3;
    suite.failures = 1;
    suite.skipped = 1;

    let mut passing = TestCase::new("HEADING", "Scenario1", TestCaseStatus::Success);
    passing.set_time(Duration::from_millis(250));
    suite.add_test_case(passing);

    let mut failing = TestCase::new(
        "HEADING",
        "Scenario2",
        TestCaseStatus::failure("Step Execution Failure: 'boom'", "stack <trace>"),
    );
    failing.set_time(Duration::from_secs(1));
    suite.add_test_case(failing);

    suite.add_test_case(TestCase::new(
        "HEADING",
        "Scenario3",
        TestCaseStatus::skipped("no reason"),
    ));

    let mut test_suites = TestSuites::new();
    test_suites.add_test_suite(suite);
    test_suites
}

fn timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 6)
        .and_then(|date| date.and_hms_opt(7, 8, 9))
        .expect("valid timestamp")
}
