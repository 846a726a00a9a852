//! Bounded fan-out of independent endpoint calls.
//!
//! All calls run cooperatively inside the caller's task: at most
//! `concurrency` are in flight, each is capped by `call_timeout`, and results
//! come back in input order no matter which request finishes first.
//!
//! ```no_run
//! use creators_api::{batch, ApiSettings, BatchOptions, ScrapeCreatorsApi};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ScrapeCreatorsApi::new(ApiSettings::new(Some("key".into())))?;
//! let handles = ["BillGates", "adrian_horning_"];
//! let results = batch::run_batch(handles, &BatchOptions::default(), |handle| {
//!     let api = api.clone();
//!     async move { api.twitter().profile(handle).await }
//! })
//! .await?;
//! assert_eq!(results.len(), 2);
//! # Ok(()) }
//! ```
use crate::error::{ApiError, BatchError};
use futures::stream::{self, Stream, StreamExt};
use std::future::Future;
use std::time::{Duration, Instant};

/// What a failed item means for the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Run everything; failures become gaps in the output.
    #[default]
    BestEffort,
    /// Stop at the first failure (in input order) and drop in-flight calls.
    FailFast,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub concurrency: usize,
    pub call_timeout: Option<Duration>,
    pub policy: FailurePolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            call_timeout: Some(Duration::from_secs(60)),
            policy: FailurePolicy::BestEffort,
        }
    }
}

fn ordered_calls<I, T, F, Fut>(
    inputs: I,
    opts: &BatchOptions,
    mut call: F,
) -> impl Stream<Item = Result<T, BatchError>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let call_timeout = opts.call_timeout;
    stream::iter(inputs.into_iter().enumerate())
        .map(move |(index, item)| {
            let fut = call(item);
            async move {
                let outcome = match call_timeout {
                    Some(after) => match tokio::time::timeout(after, fut).await {
                        Ok(outcome) => outcome,
                        Err(_) => {
                            tracing::warn!(index, ?after, "scrape.batch.call_timeout");
                            return Err(BatchError::Timeout { index, after });
                        }
                    },
                    None => fut.await,
                };
                outcome.map_err(|source| BatchError::Call { index, source })
            }
        })
        .buffered(opts.concurrency.max(1))
}

/// Run every call to completion. The output has one entry per input, in input order.
pub async fn run_best_effort<I, T, F, Fut>(
    inputs: I,
    opts: &BatchOptions,
    call: F,
) -> Vec<Result<T, BatchError>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let started = Instant::now();
    let results: Vec<_> = ordered_calls(inputs, opts, call).collect().await;
    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::info!(
        total = results.len(),
        failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scrape.batch.done"
    );
    results
}

/// Return all values in input order, or the first failure by input position.
pub async fn run_fail_fast<I, T, F, Fut>(
    inputs: I,
    opts: &BatchOptions,
    call: F,
) -> Result<Vec<T>, BatchError>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let started = Instant::now();
    let mut calls = std::pin::pin!(ordered_calls(inputs, opts, call));
    let mut values = Vec::new();
    while let Some(outcome) = calls.next().await {
        match outcome {
            Ok(value) => values.push(value),
            Err(err) => {
                tracing::warn!(
                    index = err.index(),
                    completed = values.len(),
                    error = %err,
                    "scrape.batch.aborted"
                );
                return Err(err);
            }
        }
    }
    tracing::info!(
        total = values.len(),
        failed = 0,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scrape.batch.done"
    );
    Ok(values)
}

/// Dispatch on `opts.policy`. Best effort turns failures into `None` gaps;
/// fail fast surfaces the first failure.
pub async fn run_batch<I, T, F, Fut>(
    inputs: I,
    opts: &BatchOptions,
    call: F,
) -> Result<Vec<Option<T>>, BatchError>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    match opts.policy {
        FailurePolicy::BestEffort => Ok(run_best_effort(inputs, opts, call)
            .await
            .into_iter()
            .map(Result::ok)
            .collect()),
        FailurePolicy::FailFast => Ok(run_fail_fast(inputs, opts, call)
            .await?
            .into_iter()
            .map(Some)
            .collect()),
    }
}
