use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Long-running background jobs owned by the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Poll,
    CommandIntake,
}

/// Keeps at most one handle per [`TaskKind`]; replacing a handle aborts the
/// previous task.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<TaskKind, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn(&mut self, kind: TaskKind, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(kind, task) {
            handle.abort();
        }
    }

    pub fn is_running(&self, kind: TaskKind) -> bool {
        self.tasks.get(&kind).is_some_and(|handle| !handle.is_finished())
    }

    pub fn abort(&mut self, kind: TaskKind) {
        if let Some(handle) = self.tasks.remove(&kind) {
            handle.abort();
        }
    }

    /// Stops tracking the task without aborting it. The caller is expected to
    /// have told it to wind down.
    pub fn release(&mut self, kind: TaskKind) -> Option<JoinHandle<()>> {
        self.tasks.remove(&kind)
    }
}
