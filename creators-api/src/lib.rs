//! Client for the Scrape Creators aggregation API.
//!
//! [`ScrapeCreatorsApi`] owns the HTTP client and the static `x-api-key`
//! credential. Platform views (`api.twitter()`, `api.reddit()`, ...) expose one
//! method per vendor endpoint. Every method issues exactly one GET and returns
//! the vendor's JSON body untouched as an [`ApiResult`].
//!
//! [`batch`] fans a list of identifiers out over any of those methods with a
//! bounded, input-ordered stream.
//!
//! ```no_run
//! use creators_api::{ApiSettings, ScrapeCreatorsApi};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ScrapeCreatorsApi::new(ApiSettings::new(Some("my-key".into())))?;
//! let tweets = api.twitter().user_tweets("BillGates").await?;
//! println!("{tweets}");
//! # Ok(()) }
//! ```
pub mod batch;
pub mod client;
pub mod error;
pub mod platforms;
pub mod query;

pub use batch::{BatchOptions, FailurePolicy};
pub use client::{ApiSettings, ScrapeCreatorsApi};
pub use error::{ApiError, ApiResult, BatchError};
pub use platforms::linkedin::LinkedinAdSearch;
pub use platforms::reddit::RedditListing;
pub use query::QueryParams;
