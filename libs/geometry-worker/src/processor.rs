//! # Task Processor
//!
//! Envelope around one dispatch cycle. Whatever the handler does, including
//! panicking, the caller gets exactly one [`Response`] carrying the id of
//! its [`Request`].

use std::any::Any;
use std::error::Error as _;
use std::panic::{self, AssertUnwindSafe};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::dispatcher::Dispatcher;
use crate::error::{Result, WorkerError};
use crate::manifest::{Manifest, TransferList};
use crate::module::ModuleLoader;
use crate::task::Task;

/// Correlates a response with its request.
pub type RequestId = u64;

/// Work that runs inside a [`TaskProcessor`].
pub trait BatchHandler {
    type Parameters;
    type Output;

    fn handle_batch(
        &mut self,
        parameters: Self::Parameters,
        transfer_list: &mut TransferList,
    ) -> Result<Self::Output>;
}

impl<L: ModuleLoader> BatchHandler for Dispatcher<L> {
    type Parameters = Vec<Task>;
    type Output = Manifest;

    fn handle_batch(
        &mut self,
        parameters: Vec<Task>,
        transfer_list: &mut TransferList,
    ) -> Result<Manifest> {
        self.create_geometry(parameters, transfer_list)
    }
}

#[derive(Debug)]
pub struct Request<P> {
    pub id: RequestId,
    pub parameters: P,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub id: RequestId,
    pub outcome: Outcome<T>,
}

impl<T> Response<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, Outcome::Completed { .. })
    }

    /// Converts the outcome into a `Result`, dropping the transfer list.
    pub fn into_result(self) -> std::result::Result<T, ErrorDescriptor> {
        match self.outcome {
            Outcome::Completed { result, .. } => Ok(result),
            Outcome::Failed(descriptor) => Err(descriptor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Completed {
        result: T,
        transferables: TransferList,
    },
    Failed(ErrorDescriptor),
}

/// Serializable description of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub message: String,
    /// Causes of the failure, outermost first
    pub trace: Vec<String>,
}

impl ErrorDescriptor {
    pub fn from_error(error: &WorkerError) -> Self {
        let mut trace = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            trace.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: error.to_string(),
            trace,
        }
    }
}

/// Runs requests through a handler and never lets a failure escape.
#[derive(Debug)]
pub struct TaskProcessor<H> {
    handler: H,
}

impl<H: BatchHandler> TaskProcessor<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Handles one request.
    pub fn handle(&mut self, request: Request<H::Parameters>) -> Response<H::Output> {
        let Request { id, parameters } = request;
        let mut transfer_list = TransferList::new();

        let handler = &mut self.handler;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            handler.handle_batch(parameters, &mut transfer_list)
        }));

        let outcome = match result {
            Ok(Ok(result)) => Outcome::Completed {
                result,
                transferables: transfer_list,
            },
            Ok(Err(error)) => {
                warn!("Request {id} failed: {error}");
                Outcome::Failed(ErrorDescriptor::from_error(&error))
            }
            Err(payload) => {
                let error = WorkerError::Panicked(panic_message(payload.as_ref()));
                warn!("Request {id} panicked: {error}");
                Outcome::Failed(ErrorDescriptor::from_error(&error))
            }
        };
        Response { id, outcome }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
