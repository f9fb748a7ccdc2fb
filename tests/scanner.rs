// tests/scanner.rs

use std::sync::Arc;

use shellrig::{Command, RegexScanner, Scanner, Shell, ShellError};
use shellrig_test_utils::fake_backend::{FakeBackend, FakeResponse};
use shellrig_test_utils::init_tracing;
use shellrig_test_utils::recording::{LogEvent, RecordingLogger};

#[test]
fn regex_scanner_extracts_named_fields_per_line() {
    let scanner = RegexScanner::new(r"(?P<level>ERROR|WARN): (?P<msg>.+)").unwrap();
    let output = "starting\nWARN: low disk\nall good\nERROR: crashed\n";

    let entries = scanner.scan(output);

    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].line, 2);
    assert_eq!(entries[0].text, "WARN: low disk");
    assert_eq!(entries[0].fields["level"], "WARN");
    assert_eq!(entries[0].fields["msg"], "low disk");

    assert_eq!(entries[1].line, 4);
    assert_eq!(entries[1].fields["level"], "ERROR");
    assert_eq!(entries[1].fields["msg"], "crashed");
}

#[test]
fn regex_scanner_without_named_groups_reports_the_match_text() {
    let scanner = RegexScanner::new(r"token=\w+").unwrap();

    let entries = scanner.scan("noise\ntoken=abc123 trailing\n");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line, 2);
    assert_eq!(entries[0].text, "token=abc123");
    assert!(entries[0].fields.is_empty());
}

#[test]
fn regex_scanner_rejects_invalid_patterns() {
    let err = RegexScanner::new(r"(unclosed").unwrap_err();
    assert!(matches!(err, ShellError::Pattern(_)));
}

#[tokio::test]
async fn scanner_entries_reach_every_logger() {
    init_tracing();

    let backend = FakeBackend::new().respond(
        "lint",
        FakeResponse::ok(["src/a.rs: ok\n", "src/b.rs: 2 issues\n"]),
    );
    let logger = RecordingLogger::new();
    let events = logger.events();

    let shell = Shell::builder().backend(backend).logger(logger).build().unwrap();

    let scanner = Arc::new(RegexScanner::new(r"(?P<file>\S+): (?P<count>\d+) issues").unwrap());
    Command::new("lint")
        .scanner(scanner)
        .run_with(&shell)
        .await
        .unwrap();

    let events = events.lock().unwrap();
    assert!(matches!(
        events.last(),
        Some(LogEvent::Results { entries: 1, .. })
    ));
}

#[tokio::test]
async fn commands_without_a_scanner_yield_no_entries() {
    init_tracing();

    let backend = FakeBackend::new().respond("echo", FakeResponse::ok(["ERROR: looks scannable\n"]));
    let logger = RecordingLogger::new();
    let events = logger.events();

    let shell = Shell::builder().backend(backend).logger(logger).build().unwrap();

    Command::new("echo").run_with(&shell).await.unwrap();

    let events = events.lock().unwrap();
    assert!(matches!(
        events.last(),
        Some(LogEvent::Results { entries: 0, .. })
    ));
}
