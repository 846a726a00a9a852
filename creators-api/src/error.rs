use creators_http::HttpError;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Outcome of a single endpoint call: the vendor body, untouched, or the failure.
pub type ApiResult = Result<Value, ApiError>;

/// A failed endpoint call, tagged with the operation that issued it.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct ApiError {
    pub operation: &'static str,
    #[source]
    pub source: HttpError,
}

impl ApiError {
    /// Vendor HTTP status, if the failure came back as a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        self.source.status().map(|s| s.as_u16())
    }
}

/// Failure of one item inside a batch, identified by its input position.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch item {index} failed: {source}")]
    Call {
        index: usize,
        #[source]
        source: ApiError,
    },
    #[error("batch item {index} timed out after {after:?}")]
    Timeout { index: usize, after: Duration },
}

impl BatchError {
    pub fn index(&self) -> usize {
        match self {
            BatchError::Call { index, .. } | BatchError::Timeout { index, .. } => *index,
        }
    }
}
