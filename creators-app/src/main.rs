use anyhow::Result;
use creators_common::observability::{LogConfig, LogFormat, init_logging};
use creators_config::{CreatorsConfig, CreatorsConfigLoader};
use driver::Driver;
mod driver;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1) .env first so both the loader and the key fallback can see it
    dotenvy::dotenv().ok();

    let log_path = init_logging(LogConfig {
        format: LogFormat::from_env(),
        ..LogConfig::default()
    })?;
    tracing::debug!(log_path = %log_path.display(), "logging.ready");

    // 2) Load config (env wins over creators.yaml, which is optional)
    let cfg: CreatorsConfig = CreatorsConfigLoader::new()
        .with_optional_file("creators.yaml")
        .load()?;

    let driver = Driver::from_config(&cfg)?;
    let summary = driver.run(cfg.driver.job).await?;
    if summary.gaps > 0 {
        tracing::warn!(
            gaps = summary.gaps,
            total = summary.total,
            "some calls failed; their entries in {} are null",
            summary.output.display()
        );
    }
    println!("Time taken in seconds: {}", summary.elapsed.as_secs_f64());
    Ok(())
}
