// tests/active_context.rs
//
// These tests share the process-wide active stack, so they serialize on a
// file-local lock.

use std::sync::Mutex;

use shellrig::{Command, Shell, ShellError};
use shellrig_test_utils::fake_backend::{FakeBackend, FakeResponse};
use shellrig_test_utils::init_tracing;

static STACK_LOCK: Mutex<()> = Mutex::new(());

fn shared_shell(backend: FakeBackend) -> std::sync::Arc<Shell> {
    Shell::builder().backend(backend).build_shared().unwrap()
}

#[tokio::test]
async fn run_without_an_active_instance_fails() {
    let _guard = STACK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_tracing();

    let err = Command::new("echo").run().await.unwrap_err();
    assert!(matches!(err, ShellError::NoActiveInstance));
}

#[tokio::test]
async fn activate_makes_run_resolve_implicitly() {
    let _guard = STACK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_tracing();

    let backend = FakeBackend::new().respond("echo", FakeResponse::ok(["hi\n"]));
    let calls = backend.calls();
    let shell = shared_shell(backend);

    {
        let _scope = shell.activate();
        assert!(Shell::active().is_some());

        let result = Command::new("echo").run().await.unwrap();
        assert_eq!(result.output, "hi\n");
    }

    // Guard dropped, the stack is empty again.
    assert!(Shell::active().is_none());
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn inner_activation_shadows_the_outer_one() {
    let _guard = STACK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_tracing();

    let outer_backend = FakeBackend::new();
    let inner_backend = FakeBackend::new();
    let outer_calls = outer_backend.calls();
    let inner_calls = inner_backend.calls();

    let outer = shared_shell(outer_backend);
    let inner = shared_shell(inner_backend);

    let _outer_scope = outer.activate();
    {
        let _inner_scope = inner.activate();
        Command::new("probe").run().await.unwrap();
    }
    Command::new("probe").run().await.unwrap();

    // One dispatch each: the inner shell while shadowing, the outer after.
    assert_eq!(inner_calls.lock().unwrap().len(), 1);
    assert_eq!(outer_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn explicit_run_with_ignores_the_active_stack() {
    let _guard = STACK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_tracing();

    let active_backend = FakeBackend::new();
    let explicit_backend = FakeBackend::new();
    let active_calls = active_backend.calls();
    let explicit_calls = explicit_backend.calls();

    let active = shared_shell(active_backend);
    let explicit = shared_shell(explicit_backend);

    let _scope = active.activate();
    Command::new("probe").run_with(&explicit).await.unwrap();

    assert!(active_calls.lock().unwrap().is_empty());
    assert_eq!(explicit_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn dropping_out_of_order_removes_the_right_instance() {
    let _guard = STACK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_tracing();

    let first = shared_shell(FakeBackend::new());
    let second_backend = FakeBackend::new();
    let second_calls = second_backend.calls();
    let second = shared_shell(second_backend);

    let first_scope = first.activate();
    let _second_scope = second.activate();

    // Popping the outer guard first leaves the inner one active.
    drop(first_scope);
    Command::new("probe").run().await.unwrap();

    assert_eq!(second_calls.lock().unwrap().len(), 1);
}
