//! # Worker Errors
//!
//! Error types for batch dispatch, result packing and the worker pool.

use shape_geometry::GeometryError;
use thiserror::Error;

/// Errors that can fail a dispatch cycle or a pool operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkerError {
    /// A task named a shape module that could not be resolved
    #[error("Task {index}: cannot resolve shape module `{module}`")]
    ModuleResolution {
        index: usize,
        module: String,
        #[source]
        source: GeometryError,
    },

    /// A task's unpack or geometry creation failed
    #[error("Task {index} failed")]
    TaskFailed {
        index: usize,
        #[source]
        source: GeometryError,
    },

    /// Results disagree on the layout of a shared attribute
    #[error("Attribute `{name}` differs in datatype or component count across results")]
    AttributeMismatch { name: String },

    /// A manifest slot points outside its backing buffers
    #[error("Corrupt manifest: {0}")]
    CorruptManifest(String),

    /// The batch handler panicked
    #[error("Worker panicked: {0}")]
    Panicked(String),

    /// A worker or the caller hung up
    #[error("Worker channel disconnected")]
    Disconnected,

    /// The operating system refused to start a worker thread
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(String),
}

impl WorkerError {
    /// Creates a corrupt manifest error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptManifest(message.into())
    }

    /// Creates a sub-task failure.
    pub fn task_failed(index: usize, source: GeometryError) -> Self {
        Self::TaskFailed { index, source }
    }

    /// Index of the failing task, if the error belongs to one.
    pub fn task_index(&self) -> Option<usize> {
        match self {
            Self::ModuleResolution { index, .. } | Self::TaskFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result type for worker operations.
pub type Result<T> = std::result::Result<T, WorkerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_task_failed_keeps_source() {
        let err = WorkerError::task_failed(2, GeometryError::missing("radius"));
        assert_eq!(err.task_index(), Some(2));
        assert_eq!(err.to_string(), "Task 2 failed");
        let source = err.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Invalid argument `radius`: is required")
        );
    }

    #[test]
    fn test_pool_errors_have_no_index() {
        assert_eq!(WorkerError::Disconnected.task_index(), None);
        assert_eq!(WorkerError::corrupt("x").task_index(), None);
    }
}
