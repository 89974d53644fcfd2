//! Fetch lifecycle: explicit state machine plus cancellation.
//!
//! Every remote operation moves `Idle -> Loading -> Ready | Failed` and
//! carries a [`CancelToken`]. The token is checked inside the operation at
//! await boundaries and again by the caller before committing a result, so a
//! superseded fetch (year switched, reload requested) can never overwrite
//! fresher state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ApiError, Result};

/// Lifecycle of one remote fetch.
#[derive(Debug, Clone, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(ApiError),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Collapse an operation result into the terminal state.
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Shared flag that marks an in-flight fetch as superseded.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Error out if the token was cancelled. Called before each state
    /// transition inside fetch operations.
    pub fn ensure_live(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ApiError::Cancelled)
        } else {
            Ok(())
        }
    }
}
