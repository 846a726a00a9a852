//! YouTube endpoints. Listing calls page with an opaque `continuationToken`
//! taken from the previous response.
use crate::client::ScrapeCreatorsApi;
use crate::error::ApiResult;
use crate::query::QueryParams;

#[derive(Clone, Copy)]
pub struct Youtube<'a> {
    api: &'a ScrapeCreatorsApi,
}

impl<'a> Youtube<'a> {
    pub(crate) fn new(api: &'a ScrapeCreatorsApi) -> Self {
        Self { api }
    }

    pub async fn channel(&self, handle: &str) -> ApiResult {
        self.api
            .get(
                "youtube.channel",
                "v1/youtube/channel",
                QueryParams::new().required("handle", handle),
            )
            .await
    }

    /// Video details; `get_transcript` is forwarded only when set.
    pub async fn video(&self, url: &str, get_transcript: Option<bool>) -> ApiResult {
        self.api
            .get(
                "youtube.video",
                "v1/youtube/video",
                QueryParams::new()
                    .required("url", url)
                    .optional("get_transcript", get_transcript),
            )
            .await
    }

    pub async fn channel_videos(&self, handle: &str, continuation_token: Option<&str>) -> ApiResult {
        self.api
            .get(
                "youtube.channel_videos",
                "v1/youtube/channel-videos",
                QueryParams::new()
                    .required("handle", handle)
                    .optional("continuationToken", continuation_token),
            )
            .await
    }

    pub async fn search(
        &self,
        query: &str,
        sort_by: Option<&str>,
        continuation_token: Option<&str>,
    ) -> ApiResult {
        self.api
            .get(
                "youtube.search",
                "v1/youtube/search",
                QueryParams::new()
                    .required("query", query)
                    .optional("sortBy", sort_by)
                    .optional("continuationToken", continuation_token),
            )
            .await
    }
}
