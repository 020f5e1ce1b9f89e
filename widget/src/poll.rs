use std::time::Duration;

use tokio::task::JoinHandle;

/// Poll cadence for the active room, fixed at widget construction.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub period: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(5000),
        }
    }
}

/// Handle to the recurring fetch task.
///
/// At most one exists per widget; replacing or dropping it aborts the
/// task.
pub(crate) struct PollTask {
    handle: JoinHandle<()>,
}

impl PollTask {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
