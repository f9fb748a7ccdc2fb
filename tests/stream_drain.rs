// tests/stream_drain.rs

use shellrig::{Command, Shell, StreamConfig};
use shellrig_test_utils::fake_backend::{FakeBackend, FakeResponse};
use shellrig_test_utils::init_tracing;
use shellrig_test_utils::recording::{LogEvent, RecordingLogger};

fn chunk_events(events: &[LogEvent]) -> Vec<(String, Option<String>)> {
    events
        .iter()
        .filter_map(|e| match e {
            LogEvent::Chunk { stdout, stderr } => Some((stdout.clone(), stderr.clone())),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn merged_streams_deliver_every_chunk_in_the_stdout_position() {
    init_tracing();

    let backend = FakeBackend::new().respond(
        "build",
        FakeResponse::ok(["a\n", "b\n"]).with_stderr(["warn\n"]),
    );
    let calls = backend.calls();
    let logger = RecordingLogger::new();
    let events = logger.events();

    let shell = Shell::builder()
        .backend(backend)
        .logger(logger)
        .build()
        .unwrap();

    let result = Command::new("build").run_with(&shell).await.unwrap();

    assert_eq!(calls.lock().unwrap()[0].streams, StreamConfig::MergeStreams);
    assert_eq!(result.output, "a\nb\nwarn\n");

    let chunks = chunk_events(&events.lock().unwrap());
    assert_eq!(
        chunks,
        vec![
            ("a\n".to_string(), None),
            ("b\n".to_string(), None),
            ("warn\n".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn a_separate_streams_logger_forces_separation() {
    init_tracing();

    let backend = FakeBackend::new().respond(
        "build",
        FakeResponse::ok(["out\n"]).with_stderr(["err\n"]),
    );
    let calls = backend.calls();

    let merged_logger = RecordingLogger::new();
    let separate_logger = RecordingLogger::with_stream_config(StreamConfig::SeparateStreams);
    let merged_events = merged_logger.events();
    let separate_events = separate_logger.events();

    let shell = Shell::builder()
        .backend(backend)
        .logger(merged_logger)
        .logger(separate_logger)
        .build()
        .unwrap();

    let result = Command::new("build").run_with(&shell).await.unwrap();

    // One canonical choice for the invocation: separation wins.
    assert_eq!(
        calls.lock().unwrap()[0].streams,
        StreamConfig::SeparateStreams
    );

    // Both loggers see identical chunk sequences, stderr tagged as such.
    let merged_chunks = chunk_events(&merged_events.lock().unwrap());
    let separate_chunks = chunk_events(&separate_events.lock().unwrap());
    assert_eq!(merged_chunks, separate_chunks);
    assert!(merged_chunks.contains(&("out\n".to_string(), None)));
    assert!(
        merged_chunks.contains(&(String::new(), Some("err\n".to_string())))
    );

    // Canonical output contains every chunk exactly once.
    assert_eq!(result.output.len(), "out\nerr\n".len());
    assert!(result.output.contains("out\n"));
    assert!(result.output.contains("err\n"));
}

#[tokio::test]
async fn per_stream_chunk_order_is_preserved() {
    init_tracing();

    let backend = FakeBackend::new().respond(
        "chatty",
        FakeResponse::ok(["1\n", "2\n", "3\n"]).with_stderr(["e1\n", "e2\n"]),
    );
    let logger = RecordingLogger::with_stream_config(StreamConfig::SeparateStreams);
    let events = logger.events();

    let shell = Shell::builder()
        .backend(backend)
        .logger(logger)
        .build()
        .unwrap();

    Command::new("chatty").run_with(&shell).await.unwrap();

    let chunks = chunk_events(&events.lock().unwrap());
    let stdout_order: Vec<&str> = chunks
        .iter()
        .filter(|(_, stderr)| stderr.is_none())
        .map(|(stdout, _)| stdout.as_str())
        .collect();
    let stderr_order: Vec<&str> = chunks
        .iter()
        .filter_map(|(_, stderr)| stderr.as_deref())
        .collect();

    assert_eq!(stdout_order, vec!["1\n", "2\n", "3\n"]);
    assert_eq!(stderr_order, vec!["e1\n", "e2\n"]);
}

#[tokio::test]
async fn every_logger_receives_results_in_registration_order() {
    init_tracing();

    let first = RecordingLogger::new();
    let second = RecordingLogger::new();
    let first_events = first.events();
    let second_events = second.events();

    let shell = Shell::builder()
        .backend(FakeBackend::new().respond("echo", FakeResponse::ok(["hi\n"])))
        .logger(first)
        .logger(second)
        .build()
        .unwrap();

    Command::new("echo").run_with(&shell).await.unwrap();

    for events in [first_events, second_events] {
        let events = events.lock().unwrap();
        assert!(matches!(events.first(), Some(LogEvent::Begin { .. })));
        assert!(matches!(events.last(), Some(LogEvent::Results { .. })));
        assert_eq!(chunk_events(&events), vec![("hi\n".to_string(), None)]);
    }
}
