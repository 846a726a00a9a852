//! Instagram endpoints. Posts live on the v2 route.
use crate::client::ScrapeCreatorsApi;
use crate::error::ApiResult;
use crate::query::QueryParams;

#[derive(Clone, Copy)]
pub struct Instagram<'a> {
    api: &'a ScrapeCreatorsApi,
}

impl<'a> Instagram<'a> {
    pub(crate) fn new(api: &'a ScrapeCreatorsApi) -> Self {
        Self { api }
    }

    pub async fn profile(&self, handle: &str) -> ApiResult {
        self.api
            .get(
                "instagram.profile",
                "v1/instagram/profile",
                QueryParams::new().required("handle", handle),
            )
            .await
    }

    pub async fn posts(&self, handle: &str) -> ApiResult {
        self.api
            .get(
                "instagram.posts",
                "v2/instagram/posts",
                QueryParams::new().required("handle", handle),
            )
            .await
    }
}
