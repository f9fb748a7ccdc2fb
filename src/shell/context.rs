// src/shell/context.rs

//! Process-wide stack of active shell instances.
//!
//! The explicit path, `command.run_with(&shell)`, is the primary API;
//! this stack is an ergonomic layer on top so scripts can write
//! `command.run()` inside an activated scope. Innermost wins: a nested
//! activation shadows the outer one until its scope guard drops.
//!
//! The lock is held only for push/pop/peek, never across an await. The
//! stack is intended for a single logical script thread; concurrent
//! activation from multiple threads is out of scope.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::shell::Shell;

static ACTIVE: Mutex<Vec<Arc<Shell>>> = Mutex::new(Vec::new());

/// The innermost active shell, if any.
pub fn active() -> Option<Arc<Shell>> {
    lock().last().cloned()
}

pub(crate) fn push(shell: Arc<Shell>) {
    let mut stack = lock();
    stack.push(shell);
    debug!(depth = stack.len(), "activating shell instance");
}

pub(crate) fn pop(shell: &Arc<Shell>) {
    let mut stack = lock();
    // Pop by identity so an out-of-order drop cannot remove a foreign
    // entry: remove the innermost occurrence of this instance.
    if let Some(idx) = stack.iter().rposition(|s| Arc::ptr_eq(s, shell)) {
        stack.remove(idx);
    }
}

fn lock() -> std::sync::MutexGuard<'static, Vec<Arc<Shell>>> {
    ACTIVE.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for an activated shell; popping happens on drop.
#[must_use = "the shell stays active only while the scope guard is alive"]
pub struct ShellScope {
    shell: Arc<Shell>,
}

impl ShellScope {
    pub(crate) fn new(shell: Arc<Shell>) -> Self {
        push(Arc::clone(&shell));
        Self { shell }
    }

    pub fn shell(&self) -> &Arc<Shell> {
        &self.shell
    }
}

impl Drop for ShellScope {
    fn drop(&mut self) {
        pop(&self.shell);
    }
}
