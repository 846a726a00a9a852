//! Twitter/X endpoints.
use crate::client::ScrapeCreatorsApi;
use crate::error::ApiResult;
use crate::query::QueryParams;

#[derive(Clone, Copy)]
pub struct Twitter<'a> {
    api: &'a ScrapeCreatorsApi,
}

impl<'a> Twitter<'a> {
    pub(crate) fn new(api: &'a ScrapeCreatorsApi) -> Self {
        Self { api }
    }

    /// Public profile for `handle` (no leading `@`).
    pub async fn profile(&self, handle: &str) -> ApiResult {
        self.api
            .get(
                "twitter.profile",
                "v1/twitter/profile",
                QueryParams::new().required("handle", handle),
            )
            .await
    }

    /// Recent tweets posted by `handle`.
    pub async fn user_tweets(&self, handle: &str) -> ApiResult {
        self.api
            .get(
                "twitter.user_tweets",
                "v1/twitter/user-tweets",
                QueryParams::new().required("handle", handle),
            )
            .await
    }

    /// A single tweet by its full URL.
    pub async fn tweet(&self, url: &str) -> ApiResult {
        self.api
            .get(
                "twitter.tweet",
                "v1/twitter/tweet",
                QueryParams::new().required("url", url),
            )
            .await
    }
}
