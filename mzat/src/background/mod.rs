pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;

use tokio::task::JoinHandle;

/// Registry of in-flight background requests, keyed by a static task id.
///
/// Spawning under an id that is already running aborts the old task, so
/// at most one request per id can deliver a result. Everything left
/// running is aborted on drop.
pub struct BackgroundTaskManager {
    tasks: HashMap<&'static str, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn `future` under `task_id`, aborting any task already running
    /// under the same id so a superseded request cannot report late.
    pub fn spawn_load_task<F>(&mut self, task_id: &'static str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(previous) = self.tasks.remove(task_id) {
            previous.abort();
        }
        self.tasks.insert(task_id, tokio::spawn(future));
    }

    /// Abort everything in flight. Used on logout and on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
