use crate::client::ScrapeCreatorsApi;
use crate::error::ApiResult;
use crate::query::QueryParams;

#[derive(Clone, Copy)]
pub struct TruthSocial<'a> {
    api: &'a ScrapeCreatorsApi,
}

impl<'a> TruthSocial<'a> {
    pub(crate) fn new(api: &'a ScrapeCreatorsApi) -> Self {
        Self { api }
    }

    pub async fn user_posts(&self, handle: &str) -> ApiResult {
        self.api
            .get(
                "truthsocial.user_posts",
                "v1/truthsocial/user/posts",
                QueryParams::new().required("handle", handle),
            )
            .await
    }
}
