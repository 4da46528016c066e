//! # Worker Task Dispatcher
//!
//! Runs one batch: resolves every packed task's module, creates all
//! geometries, then packs the results in task order.
//!
//! ## Failure Policy
//!
//! Any failing task fails the whole batch and no manifest is produced. The
//! error names the failing task; callers that want partial progress
//! resubmit the other tasks separately.

use std::sync::Arc;

use config::constants::PARALLEL_BATCH_THRESHOLD;
use log::debug;
use rayon::prelude::*;
use shape_geometry::{CreateGeometryFn, GeometryError, GeometryResult};

use crate::error::{Result, WorkerError};
use crate::manifest::{Manifest, TransferList};
use crate::module::{ModuleCache, ModuleLoader, StaticModuleLoader};
use crate::packer::pack_create_geometry_results;
use crate::task::Task;

/// A task whose module is resolved and which only needs computing.
enum Job {
    Ready(Option<GeometryResult>),
    Create {
        create: CreateGeometryFn,
        packed: Arc<[f64]>,
        offset: usize,
    },
}

impl Job {
    fn run(self, index: usize) -> Result<Option<GeometryResult>> {
        match self {
            Self::Ready(geometry) => Ok(geometry),
            Self::Create {
                create,
                packed,
                offset,
            } => create(&packed, offset).map_err(|source| WorkerError::task_failed(index, source)),
        }
    }
}

/// Batch dispatcher owning one worker thread's module cache.
#[derive(Debug)]
pub struct Dispatcher<L = StaticModuleLoader> {
    modules: ModuleCache<L>,
    parallel_threshold: usize,
}

impl Dispatcher<StaticModuleLoader> {
    pub fn new() -> Self {
        Self::with_loader(StaticModuleLoader::new())
    }
}

impl Default for Dispatcher<StaticModuleLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ModuleLoader> Dispatcher<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            modules: ModuleCache::new(loader),
            parallel_threshold: PARALLEL_BATCH_THRESHOLD,
        }
    }

    /// Minimum number of packed tasks before creation fans out in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn modules(&self) -> &ModuleCache<L> {
        &self.modules
    }

    /// Creates the geometry of every task and packs it into a manifest.
    ///
    /// Slot `i` of the manifest belongs to `batch[i]`.
    pub fn create_geometry(
        &mut self,
        batch: Vec<Task>,
        transfer_list: &mut TransferList,
    ) -> Result<Manifest> {
        let jobs = self.resolve(batch)?;
        let packed_count = jobs
            .iter()
            .filter(|job| matches!(job, Job::Create { .. }))
            .count();

        let results = if packed_count >= self.parallel_threshold {
            debug!("Creating {} tasks in parallel ({packed_count} packed)", jobs.len());
            jobs.into_par_iter()
                .enumerate()
                .map(|(index, job)| job.run(index))
                .collect::<Result<Vec<_>>>()?
        } else {
            debug!("Creating {} tasks in order ({packed_count} packed)", jobs.len());
            jobs.into_iter()
                .enumerate()
                .map(|(index, job)| job.run(index))
                .collect::<Result<Vec<_>>>()?
        };

        pack_create_geometry_results(results, transfer_list)
    }

    fn resolve(&mut self, batch: Vec<Task>) -> Result<Vec<Job>> {
        batch
            .into_iter()
            .enumerate()
            .map(|(index, task)| match task {
                Task::Precomputed(geometry) if geometry.validate() => {
                    Ok(Job::Ready(Some(geometry)))
                }
                Task::Precomputed(_) => Err(WorkerError::task_failed(
                    index,
                    GeometryError::invalid_argument(
                        "geometry",
                        "precomputed indices or attribute lengths do not match its vertices",
                    ),
                )),
                Task::Packed {
                    module_name,
                    packed,
                    offset,
                } => {
                    let create = self.modules.resolve(&module_name).map_err(|source| {
                        WorkerError::ModuleResolution {
                            index,
                            module: module_name.clone(),
                            source,
                        }
                    })?;
                    Ok(Job::Create {
                        create,
                        packed,
                        offset,
                    })
                }
            })
            .collect()
    }
}
