use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::junit::attempt::{AttemptRecord, Outcome, ParsedRun, SuiteInfo, TestIdentity};

// ============================================================================
// Results document parser (testsuites → testsuite → testcase)
// ============================================================================

/// Parse a JUnit-style results document into a flat attempt list.
///
/// Expected shape:
/// ```xml
/// <testsuites time="12.3">
///   <testsuite name="login.spec.js" hostname="chromium" time="4.5" timestamp="...">
///     <testcase classname="login.spec.js" name="logs in" time="1.2">
///       <failure message="expected ..."><![CDATA[stack...]]></failure>
///     </testcase>
///   </testsuite>
/// </testsuites>
/// ```
///
/// An empty string, a document whose root is not `testsuites`, or a
/// document that fails to parse all yield [`ParsedRun::empty`].
pub fn parse_results(xml: &str) -> ParsedRun {
    if xml.trim().is_empty() {
        return ParsedRun::empty();
    }

    match parse_strict(xml) {
        Ok(Some(run)) => run,
        Ok(None) => {
            tracing::warn!("results document has no <testsuites> root; treating as empty");
            ParsedRun::empty()
        }
        Err(e) => {
            tracing::warn!("malformed results document ({}); treating as empty", e);
            ParsedRun::empty()
        }
    }
}

/// Test case being assembled between its start and end tags.
struct PendingCase {
    identity: TestIdentity,
    elapsed_seconds: f64,
    failed: bool,
    failure_body: String,
    failure_attr: Option<String>,
}

impl PendingCase {
    fn from_element(e: &BytesStart) -> Self {
        Self {
            identity: TestIdentity::new(
                get_attr(e, b"classname").unwrap_or_default(),
                get_attr(e, b"name").unwrap_or_default(),
            ),
            elapsed_seconds: get_attr_seconds(e, b"time"),
            failed: false,
            failure_body: String::new(),
            failure_attr: None,
        }
    }

    fn into_attempt(self, suite: Option<&SuiteInfo>) -> AttemptRecord {
        let failure_message = if self.failed {
            let body = self.failure_body.trim();
            if !body.is_empty() {
                Some(body.to_string())
            } else {
                self.failure_attr.filter(|m| !m.trim().is_empty())
            }
        } else {
            None
        };

        AttemptRecord {
            suite_name: suite.map(|s| s.name.clone()).unwrap_or_default(),
            identity: self.identity,
            elapsed_seconds: self.elapsed_seconds,
            outcome: if self.failed { Outcome::Fail } else { Outcome::Pass },
            failure_message,
            host_label: suite
                .and_then(|s| s.hostname.clone())
                .filter(|h| !h.is_empty()),
        }
    }
}

/// `Ok(None)` means the root element was not `testsuites`.
fn parse_strict(xml: &str) -> Result<Option<ParsedRun>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut run = ParsedRun::empty();
    let mut seen_root = false;
    let mut current_case: Option<PendingCase> = None;
    let mut in_failure = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if !seen_root {
                    if e.name().as_ref() != b"testsuites" {
                        return Ok(None);
                    }
                    seen_root = true;
                    run.declared_seconds = get_attr_f64(&e, b"time");
                    continue;
                }
                match e.name().as_ref() {
                    b"testsuite" => run.suites.push(suite_from_element(&e)),
                    b"testcase" => current_case = Some(PendingCase::from_element(&e)),
                    b"failure" | b"error" => {
                        if let Some(case) = current_case.as_mut() {
                            open_failure(case, &e);
                            in_failure = true;
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if !seen_root {
                    if e.name().as_ref() != b"testsuites" {
                        return Ok(None);
                    }
                    run.declared_seconds = get_attr_f64(&e, b"time");
                    return Ok(Some(run));
                }
                match e.name().as_ref() {
                    b"testsuite" => run.suites.push(suite_from_element(&e)),
                    b"testcase" => {
                        let case = PendingCase::from_element(&e);
                        run.attempts.push(case.into_attempt(run.suites.last()));
                    }
                    b"failure" | b"error" => {
                        if let Some(case) = current_case.as_mut() {
                            open_failure(case, &e);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if in_failure {
                    if let Some(case) = current_case.as_mut() {
                        case.failure_body.push_str(&e.unescape()?);
                    }
                }
            }
            Event::CData(e) => {
                if in_failure {
                    if let Some(case) = current_case.as_mut() {
                        case.failure_body
                            .push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"testcase" => {
                    if let Some(case) = current_case.take() {
                        run.attempts.push(case.into_attempt(run.suites.last()));
                    }
                    in_failure = false;
                }
                b"failure" | b"error" => in_failure = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(seen_root.then_some(run))
}

fn open_failure(case: &mut PendingCase, e: &BytesStart) {
    // A second failure child (e.g. failure + error) keeps the first message attr.
    if !case.failed {
        case.failure_attr = get_attr(e, b"message");
    }
    case.failed = true;
}

fn suite_from_element(e: &BytesStart) -> SuiteInfo {
    SuiteInfo {
        name: get_attr(e, b"name").unwrap_or_default(),
        hostname: get_attr(e, b"hostname"),
        declared_tests: get_attr_usize(e, b"tests"),
        declared_failures: get_attr_usize(e, b"failures"),
        declared_seconds: get_attr_seconds(e, b"time"),
        timestamp: get_attr(e, b"timestamp"),
    }
}

/// Extract and unescape a string attribute.
fn get_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn get_attr_f64(e: &BytesStart, name: &[u8]) -> Option<f64> {
    get_attr(e, name)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Durations are non-negative; anything unusable reads as zero.
fn get_attr_seconds(e: &BytesStart, name: &[u8]) -> f64 {
    get_attr_f64(e, name).filter(|v| *v >= 0.0).unwrap_or(0.0)
}

fn get_attr_usize(e: &BytesStart, name: &[u8]) -> usize {
    get_attr(e, name)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}
