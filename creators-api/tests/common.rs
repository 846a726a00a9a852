#![allow(dead_code)]

use std::sync::OnceLock;

use creators_api::{ApiSettings, ScrapeCreatorsApi};
use creators_common::observability::{LogConfig, LogFormat};
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-key";

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "scrape-creators-tests",
            log_dir: Some(std::env::temp_dir().join("scrape-creators-tests")),
            emit_stderr: true,
            format: LogFormat::from_env(),
            default_filter: "debug",
        };

        creators_common::observability::init_logging(config).unwrap_or_default()
    });
}

/// Client pointed at the stub server with the shared test key.
pub fn api_for(server: &MockServer) -> ScrapeCreatorsApi {
    init_test_tracing();
    ScrapeCreatorsApi::new(ApiSettings::new(Some(TEST_KEY.into())).with_base_url(server.uri()))
        .expect("stub client")
}
