//! The shared client behind every platform view.
//!
//! Configuration is injected once through [`ApiSettings`]; nothing is read from
//! the process environment at call time.
use crate::error::{ApiError, ApiResult};
use crate::platforms::{
    facebook::Facebook, instagram::Instagram, linkedin::Linkedin, reddit::Reddit,
    truthsocial::TruthSocial, twitter::Twitter, youtube::Youtube,
};
use crate::query::QueryParams;
use creators_http::{Auth, HttpClient, HttpError, RequestOpts};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.scrapecreators.com";
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    /// `None` still builds a client; the vendor rejects the first call.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ApiSettings {
    /// Production host with the default 30 s request timeout.
    ///
    /// ```
    /// use creators_api::ApiSettings;
    /// use std::time::Duration;
    ///
    /// let settings = ApiSettings::new(Some("k".into()))
    ///     .with_base_url("http://127.0.0.1:8080")
    ///     .with_timeout(Duration::from_secs(5));
    /// assert_eq!(settings.base_url, "http://127.0.0.1:8080");
    /// assert_eq!(settings.timeout, Duration::from_secs(5));
    /// ```
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ScrapeCreatorsApi {
    http: HttpClient,
    auth: Option<Auth>,
}

impl ScrapeCreatorsApi {
    /// Build the client. Fails only on a malformed base URL or an API key that
    /// cannot be sent as a header value.
    pub fn new(settings: ApiSettings) -> Result<Self, HttpError> {
        let http = HttpClient::new(&settings.base_url)?.with_timeout(settings.timeout);
        let key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());
        let auth = match key {
            Some(k) => Some(Auth::api_key_header(API_KEY_HEADER, k)?),
            None => {
                tracing::warn!(
                    base_url=%settings.base_url,
                    "scrape.client.no_api_key; requests will be rejected by the vendor"
                );
                None
            }
        };
        Ok(Self { http, auth })
    }

    pub fn has_api_key(&self) -> bool {
        self.auth.is_some()
    }

    pub fn twitter(&self) -> Twitter<'_> {
        Twitter::new(self)
    }

    pub fn youtube(&self) -> Youtube<'_> {
        Youtube::new(self)
    }

    pub fn facebook(&self) -> Facebook<'_> {
        Facebook::new(self)
    }

    pub fn linkedin(&self) -> Linkedin<'_> {
        Linkedin::new(self)
    }

    pub fn reddit(&self) -> Reddit<'_> {
        Reddit::new(self)
    }

    pub fn instagram(&self) -> Instagram<'_> {
        Instagram::new(self)
    }

    pub fn truthsocial(&self) -> TruthSocial<'_> {
        TruthSocial::new(self)
    }

    /// One GET, one outcome. Failures are logged here, once, with the operation name.
    pub(crate) async fn get(
        &self,
        operation: &'static str,
        path: &str,
        query: QueryParams,
    ) -> ApiResult {
        let opts = RequestOpts {
            auth: self.auth.clone(),
            query: (!query.is_empty()).then(|| query.into_pairs()),
            ..Default::default()
        };

        match self.http.get_json::<Value>(path, opts).await {
            Ok(body) => {
                tracing::debug!(operation, path, "scrape.request.ok");
                Ok(body)
            }
            Err(source) => {
                tracing::warn!(
                    operation,
                    path,
                    error=%source,
                    "scrape.request.failed"
                );
                Err(ApiError { operation, source })
            }
        }
    }
}
