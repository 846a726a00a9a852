use creators_api::batch::{self, BatchOptions, FailurePolicy};
use creators_api::{ApiSettings, ScrapeCreatorsApi};
use creators_common::{CreatorsError, Result};
use creators_config::{BatchPolicy, CreatorsConfig, DriverJob};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const HANDLES: &[&str] = &["BillGates", "adrian_horning_"];

pub const TWEETS: &[&str] = &[
    "https://x.com/adrian_horning_/status/1911900126529958135",
    "https://x.com/adrian_horning_/status/1828402665845322123",
    "https://x.com/adrian_horning_/status/1828819175755903320",
];

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub total: usize,
    pub gaps: usize,
    pub elapsed: Duration,
    pub output: PathBuf,
}

pub struct Driver {
    api: ScrapeCreatorsApi,
    batch: BatchOptions,
    output: PathBuf,
}

impl Driver {
    pub fn from_config(cfg: &CreatorsConfig) -> Result<Self> {
        let settings = ApiSettings::new(cfg.api.api_key.clone())
            .with_base_url(cfg.api.base_url.clone())
            .with_timeout(cfg.api.timeout());
        let api = ScrapeCreatorsApi::new(settings)
            .map_err(|e| CreatorsError::Config(format!("cannot build API client: {e}")))?;

        let batch = BatchOptions {
            concurrency: cfg.batch.concurrency,
            call_timeout: Some(cfg.batch.call_timeout()),
            policy: match cfg.batch.policy {
                BatchPolicy::BestEffort => FailurePolicy::BestEffort,
                BatchPolicy::FailFast => FailurePolicy::FailFast,
            },
        };

        Ok(Self {
            api,
            batch,
            output: PathBuf::from(&cfg.driver.output_path),
        })
    }

    /// Fetch the fixed inputs for `job`, then overwrite the output file with
    /// a JSON array in input order (`null` marks a best-effort gap).
    pub async fn run(&self, job: DriverJob) -> Result<RunSummary> {
        let started = Instant::now();
        let results = self.fetch(job).await?;
        write_results(&self.output, &results).await?;

        let elapsed = started.elapsed();
        let gaps = results.iter().filter(|r| r.is_none()).count();
        tracing::info!(
            ?job,
            total = results.len(),
            gaps,
            output = %self.output.display(),
            elapsed_ms = elapsed.as_millis() as u64,
            "driver.run.done"
        );

        Ok(RunSummary {
            total: results.len(),
            gaps,
            elapsed,
            output: self.output.clone(),
        })
    }

    async fn fetch(&self, job: DriverJob) -> Result<Vec<Option<Value>>> {
        let api = &self.api;
        let outcome = match job {
            DriverJob::Profiles => {
                batch::run_batch(HANDLES.iter().copied(), &self.batch, |handle| async move {
                    api.twitter().profile(handle).await
                })
                .await
            }
            DriverJob::UserTweets => {
                batch::run_batch(HANDLES.iter().copied(), &self.batch, |handle| async move {
                    api.twitter().user_tweets(handle).await
                })
                .await
            }
            DriverJob::Tweets => {
                batch::run_batch(TWEETS.iter().copied(), &self.batch, |url| async move {
                    api.twitter().tweet(url).await
                })
                .await
            }
        };
        outcome.map_err(|e| CreatorsError::Scrape(e.into()))
    }
}

/// Written once, after the whole batch, replacing any previous content.
pub async fn write_results(path: &Path, results: &[Option<Value>]) -> Result<()> {
    let body = serde_json::to_vec_pretty(results)?;
    tokio::fs::write(path, body)
        .await
        .map_err(|source| CreatorsError::Io {
            path: path.to_path_buf(),
            source,
        })
}
