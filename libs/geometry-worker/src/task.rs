//! # Tasks
//!
//! Units of a dispatch batch and a builder that packs descriptions into one
//! shared array.

use std::sync::Arc;

use shape_geometry::{GeometryResult, ShapeDescription};

/// One sub-task of a batch.
#[derive(Debug, Clone)]
pub enum Task {
    /// Geometry that is already complete and passes through unchanged
    Precomputed(GeometryResult),
    /// A packed description to resolve, unpack and create
    Packed {
        module_name: String,
        packed: Arc<[f64]>,
        offset: usize,
    },
}

impl Task {
    /// Module name of a packed task.
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Self::Precomputed(_) => None,
            Self::Packed { module_name, .. } => Some(module_name),
        }
    }
}

#[derive(Debug)]
enum PendingTask {
    Precomputed(GeometryResult),
    Packed {
        module_name: &'static str,
        offset: usize,
    },
}

/// Builds a batch whose packed tasks share one array.
///
/// ```rust
/// use geometry_worker::TaskBatch;
/// use shape_geometry::{Sphere, SphereOptions};
///
/// let sphere = Sphere::new(SphereOptions { radius: Some(1.0), ..Default::default() }).unwrap();
/// let mut batch = TaskBatch::new();
/// batch.push_description(&sphere.into());
/// let tasks = batch.finish();
/// assert_eq!(tasks[0].module_name(), Some("sphere"));
/// ```
#[derive(Debug, Default)]
pub struct TaskBatch {
    packed: Vec<f64>,
    pending: Vec<PendingTask>,
}

impl TaskBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packs `description` and records a task for it.
    pub fn push_description(&mut self, description: &ShapeDescription) -> &mut Self {
        let offset = self.packed.len();
        description.pack(&mut self.packed, offset);
        self.pending.push(PendingTask::Packed {
            module_name: description.kind().module_name(),
            offset,
        });
        self
    }

    /// Records a task whose geometry is already known.
    pub fn push_precomputed(&mut self, geometry: GeometryResult) -> &mut Self {
        self.pending.push(PendingTask::Precomputed(geometry));
        self
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Freezes the packed array and returns the tasks in push order.
    pub fn finish(self) -> Vec<Task> {
        let packed: Arc<[f64]> = self.packed.into();
        self.pending
            .into_iter()
            .map(|task| match task {
                PendingTask::Precomputed(geometry) => Task::Precomputed(geometry),
                PendingTask::Packed {
                    module_name,
                    offset,
                } => Task::Packed {
                    module_name: module_name.to_string(),
                    packed: Arc::clone(&packed),
                    offset,
                },
            })
            .collect()
    }
}
