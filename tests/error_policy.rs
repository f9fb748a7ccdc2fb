// tests/error_policy.rs

use shellrig::policy::{AbortOnFailure, AllowAll, KeepGoing};
use shellrig::{Command, CommandFlags, Shell, ShellError};
use shellrig_test_utils::fake_backend::{FakeBackend, FakeResponse};
use shellrig_test_utils::init_tracing;

#[tokio::test]
async fn keep_going_tolerates_failures_and_the_script_continues() {
    init_tracing();

    let backend = FakeBackend::new().respond("ls", FakeResponse::fail(2));
    let calls = backend.calls();

    let shell = Shell::builder()
        .backend(backend)
        .error_handler(KeepGoing)
        .build()
        .unwrap();

    let failed = Command::new("ls")
        .arg("/nonexistent")
        .run_with(&shell)
        .await
        .unwrap();
    assert!(!failed.success());
    assert_eq!(failed.exit_code, 2);

    // Next command still executes.
    let next = Command::new("echo").arg("after").run_with(&shell).await.unwrap();
    assert!(next.success());
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn abort_on_failure_propagates_the_failing_command() {
    init_tracing();

    let shell = Shell::builder()
        .backend(FakeBackend::new().respond("ls", FakeResponse::fail(2)))
        .error_handler(AbortOnFailure)
        .build()
        .unwrap();

    let err = Command::new("ls")
        .arg("/nonexistent")
        .run_with(&shell)
        .await
        .unwrap_err();

    match err {
        ShellError::CommandAborted {
            command,
            exit_code,
            full_command,
        } => {
            assert_eq!(command, "ls");
            assert_eq!(exit_code, 2);
            assert_eq!(full_command, "ls /nonexistent");
        }
        other => panic!("expected CommandAborted, got: {other:?}"),
    }
}

#[tokio::test]
async fn abort_on_failure_lets_successes_through() {
    init_tracing();

    let shell = Shell::builder()
        .backend(FakeBackend::new().respond("build", FakeResponse::ok(["done\n"])))
        .error_handler(AbortOnFailure)
        .build()
        .unwrap();

    let result = Command::new("build").run_with(&shell).await.unwrap();
    assert!(result.success());
    assert_eq!(result.output, "done\n");
}

#[tokio::test]
async fn cleanup_runs_after_an_abort() {
    init_tracing();

    let backend = FakeBackend::new().respond("deploy", FakeResponse::fail(1));
    let calls = backend.calls();

    let shell = Shell::builder()
        .backend(backend)
        .error_handler(AbortOnFailure)
        .build()
        .unwrap();

    let err = Command::new("deploy").run_with(&shell).await;
    assert!(err.is_err());

    // Teardown still executes during the unwind.
    let cleanup = Command::new("teardown")
        .flags(CommandFlags::CLEANUP)
        .run_with(&shell)
        .await
        .unwrap();
    assert!(cleanup.success());

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].name, "teardown");
}

#[tokio::test]
async fn allow_all_gate_is_open_and_failures_do_not_abort() {
    init_tracing();

    let shell = Shell::builder()
        .backend(FakeBackend::new().respond("flaky", FakeResponse::fail(7)))
        .error_handler(AllowAll)
        .build()
        .unwrap();

    let result = Command::new("flaky").run_with(&shell).await.unwrap();
    assert!(!result.success());
    assert_eq!(result.exit_code, 7);
}

#[tokio::test]
async fn skipped_commands_never_reach_the_handler() {
    init_tracing();

    // AbortOnFailure would turn any handled result into an error; an
    // inactive command must not trigger it.
    let shell = Shell::builder()
        .backend(FakeBackend::new())
        .error_handler(AbortOnFailure)
        .build()
        .unwrap();

    let result = Command::new("echo")
        .flags(CommandFlags::INACTIVE)
        .run_with(&shell)
        .await
        .unwrap();
    assert!(result.skipped);
}
