//! # Worker Pool
//!
//! Dedicated threads, each owning a [`TaskProcessor`] around its own
//! [`Dispatcher`]. The caller talks to them only through channels: batches
//! go out round-robin, responses come back in completion order and are
//! correlated by [`RequestId`].
//!
//! ```rust
//! use geometry_worker::{TaskBatch, WorkerConfig, WorkerPool};
//! use shape_geometry::{Circle, CircleOptions};
//!
//! let mut pool = WorkerPool::new(WorkerConfig::new(2, 8)).unwrap();
//! let circle = Circle::new(CircleOptions { radius: Some(5.0), ..Default::default() }).unwrap();
//!
//! let mut batch = TaskBatch::new();
//! batch.push_description(&circle.into());
//! let id = pool.schedule_task(batch.finish()).unwrap();
//!
//! let response = pool.blocking_next_response().unwrap().unwrap();
//! assert_eq!(response.id, id);
//! assert!(response.is_completed());
//! ```

use std::thread::{self, JoinHandle};

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::dispatcher::Dispatcher;
use crate::error::{Result, WorkerError};
use crate::manifest::Manifest;
use crate::module::{ModuleLoader, StaticModuleLoader};
use crate::processor::{Request, RequestId, Response, TaskProcessor};
use crate::settings::WorkerConfig;
use crate::task::Task;

type BatchRequest = Request<Vec<Task>>;
type BatchResponse = Response<Manifest>;

struct Worker {
    requests: Option<UnboundedSender<BatchRequest>>,
    handle: Option<JoinHandle<()>>,
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let name = handle.thread().name().unwrap_or("geometry-worker").to_string();
            if handle.join().is_err() {
                warn!("{name} exited with a panic");
            }
        }
    }
}

/// A pool of geometry worker threads.
pub struct WorkerPool {
    workers: Vec<Worker>,
    responses: UnboundedReceiver<BatchResponse>,
    next_id: RequestId,
    next_worker: usize,
    active: usize,
    max_active: usize,
}

impl WorkerPool {
    /// Spawns a pool resolving modules from the built-in table.
    pub fn new(config: WorkerConfig) -> Result<Self> {
        Self::with_loader(config, StaticModuleLoader::new())
    }

    /// Spawns a pool whose workers each own a clone of `loader`.
    pub fn with_loader<L>(config: WorkerConfig, loader: L) -> Result<Self>
    where
        L: ModuleLoader + Clone + Send + 'static,
    {
        let config = config.clamped();
        let (response_sender, responses) = mpsc::unbounded_channel();

        let mut workers = Vec::with_capacity(config.worker_count);
        for n in 0..config.worker_count {
            let (request_sender, requests) = mpsc::unbounded_channel();
            let dispatcher = Dispatcher::with_loader(loader.clone())
                .with_parallel_threshold(config.parallel_batch_threshold);
            let handle = thread::Builder::new()
                .name(format!("geometry-worker-{n}"))
                .spawn({
                    let responses = response_sender.clone();
                    move || run_worker(TaskProcessor::new(dispatcher), requests, responses)
                })
                .map_err(|error| WorkerError::Spawn(error.to_string()))?;
            workers.push(Worker {
                requests: Some(request_sender),
                handle: Some(handle),
            });
        }
        info!("Started {} geometry workers", workers.len());

        Ok(Self {
            workers,
            responses,
            next_id: 0,
            next_worker: 0,
            active: 0,
            max_active: config.max_active_tasks,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Requests sent and not yet answered.
    pub fn active_tasks(&self) -> usize {
        self.active
    }

    /// Sends a batch to the next worker.
    ///
    /// Returns `None` without sending if `max_active_tasks` requests are
    /// already in flight or the worker is gone.
    pub fn schedule_task(&mut self, batch: Vec<Task>) -> Option<RequestId> {
        if self.active >= self.max_active {
            warn!(
                "Refusing batch of {} tasks: {} requests in flight",
                batch.len(),
                self.active
            );
            return None;
        }

        let n = self.next_worker;
        self.next_worker = (n + 1) % self.workers.len().max(1);
        let sender = self.workers.get(n)?.requests.as_ref()?;

        let id = self.next_id;
        let task_count = batch.len();
        if sender.send(Request { id, parameters: batch }).is_err() {
            warn!("geometry-worker-{n} is gone");
            return None;
        }
        debug!("Scheduled request {id} ({task_count} tasks) on geometry-worker-{n}");

        self.next_id += 1;
        self.active += 1;
        Some(id)
    }

    /// Waits for the next response.
    ///
    /// Returns `Ok(None)` when nothing is in flight.
    pub async fn next_response(&mut self) -> Result<Option<BatchResponse>> {
        if self.active == 0 {
            return Ok(None);
        }
        let response = self.responses.recv().await.ok_or(WorkerError::Disconnected)?;
        self.active -= 1;
        Ok(Some(response))
    }

    /// Blocking variant of [`next_response`](Self::next_response).
    ///
    /// Must not be called from within an async runtime.
    pub fn blocking_next_response(&mut self) -> Result<Option<BatchResponse>> {
        if self.active == 0 {
            return Ok(None);
        }
        let response = self.responses.blocking_recv().ok_or(WorkerError::Disconnected)?;
        self.active -= 1;
        Ok(Some(response))
    }

    /// Returns a response if one is ready.
    pub fn try_next_response(&mut self) -> Option<BatchResponse> {
        let response = self.responses.try_recv().ok()?;
        self.active = self.active.saturating_sub(1);
        Some(response)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        let count = self.workers.len();
        self.workers.clear();
        info!("Stopped {count} geometry workers");
    }
}

fn run_worker<L: ModuleLoader>(
    mut processor: TaskProcessor<Dispatcher<L>>,
    mut requests: UnboundedReceiver<BatchRequest>,
    responses: UnboundedSender<BatchResponse>,
) {
    debug!("{} ready", current_name());
    while let Some(request) = requests.blocking_recv() {
        let response = processor.handle(request);
        if responses.send(response).is_err() {
            break;
        }
    }
    debug!("{} exiting", current_name());
}

fn current_name() -> String {
    thread::current()
        .name()
        .unwrap_or("geometry-worker")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_pool_has_no_response() {
        let mut pool = WorkerPool::new(WorkerConfig::new(1, 1)).unwrap();
        assert_eq!(pool.worker_count(), 1);
        assert_eq!(pool.blocking_next_response(), Ok(None));
        assert!(pool.try_next_response().is_none());
    }

    #[test]
    fn test_refuses_past_max_active() {
        let mut pool = WorkerPool::new(WorkerConfig::new(1, 2)).unwrap();
        assert_eq!(pool.schedule_task(Vec::new()), Some(0));
        assert_eq!(pool.schedule_task(Vec::new()), Some(1));
        assert_eq!(pool.schedule_task(Vec::new()), None);

        pool.blocking_next_response().unwrap();
        assert_eq!(pool.active_tasks(), 1);
        assert_eq!(pool.schedule_task(Vec::new()), Some(2));
    }
}
