//! Worker pool configuration.

use config::constants::{
    default_worker_count, DEFAULT_MAX_ACTIVE_TASKS, MAX_WORKER_COUNT, PARALLEL_BATCH_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Sizing of a [`WorkerPool`](crate::WorkerPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of worker threads (1 to `MAX_WORKER_COUNT`)
    pub worker_count: usize,
    /// Requests in flight before `schedule_task` refuses more
    pub max_active_tasks: usize,
    /// Packed tasks per batch before creation runs in parallel
    pub parallel_batch_threshold: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            max_active_tasks: DEFAULT_MAX_ACTIVE_TASKS,
            parallel_batch_threshold: PARALLEL_BATCH_THRESHOLD,
        }
    }
}

impl WorkerConfig {
    /// Creates a configuration, clamping both counts into range.
    pub fn new(worker_count: usize, max_active_tasks: usize) -> Self {
        Self {
            worker_count,
            max_active_tasks,
            ..Self::default()
        }
        .clamped()
    }

    /// One worker, batches created in order.
    pub fn single_threaded() -> Self {
        Self {
            worker_count: 1,
            max_active_tasks: DEFAULT_MAX_ACTIVE_TASKS,
            parallel_batch_threshold: usize::MAX,
        }
    }

    /// Returns a copy with every field in range.
    pub fn clamped(self) -> Self {
        Self {
            worker_count: self.worker_count.clamp(1, MAX_WORKER_COUNT),
            max_active_tasks: self.max_active_tasks.max(1),
            parallel_batch_threshold: self.parallel_batch_threshold.max(1),
        }
    }
}
