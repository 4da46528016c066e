//! # Geometry Worker
//!
//! Off-thread creation of shape geometry in batches.
//!
//! ## Architecture
//!
//! ```text
//! TaskBatch ─> WorkerPool ─(channel)─> worker thread
//!                                        TaskProcessor
//!                                          └─ Dispatcher
//!                                               ├─ ModuleCache (resolve once)
//!                                               ├─ create_fn per task (rayon)
//!                                               └─ packer ─> Manifest
//!            <─(channel)─ Response { id, Completed | Failed }
//! ```
//!
//! Each worker thread owns its dispatcher and module cache; nothing is
//! shared between workers except the response channel.

pub mod dispatcher;
pub mod error;
pub mod manifest;
pub mod module;
pub mod packer;
pub mod pool;
pub mod processor;
pub mod settings;
pub mod task;

pub use dispatcher::Dispatcher;
pub use error::{Result, WorkerError};
pub use manifest::{
    BufferRange, IndexBuffer, Manifest, PackedAttribute, ResultSlot, TransferList, Transferable,
};
pub use module::{ModuleCache, ModuleLoader, StaticModuleLoader};
pub use packer::{pack_create_geometry_results, unpack_create_geometry_results};
pub use pool::WorkerPool;
pub use processor::{
    BatchHandler, ErrorDescriptor, Outcome, Request, RequestId, Response, TaskProcessor,
};
pub use settings::WorkerConfig;
pub use task::{Task, TaskBatch};
