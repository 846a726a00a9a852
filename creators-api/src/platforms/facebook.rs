//! Facebook Ad Library endpoints.
use crate::client::ScrapeCreatorsApi;
use crate::error::ApiResult;
use crate::query::QueryParams;

#[derive(Clone, Copy)]
pub struct Facebook<'a> {
    api: &'a ScrapeCreatorsApi,
}

impl<'a> Facebook<'a> {
    pub(crate) fn new(api: &'a ScrapeCreatorsApi) -> Self {
        Self { api }
    }

    /// Look up advertiser pages by company name.
    pub async fn search_ad_library_companies(&self, company_name: &str) -> ApiResult {
        self.api
            .get(
                "facebook.search_ad_library_companies",
                "v1/facebook/adLibrary/search/companies",
                QueryParams::new().required("query", company_name),
            )
            .await
    }

    /// Ads run by the page `page_id`; `cursor` continues a previous listing.
    pub async fn company_ads(&self, page_id: &str, cursor: Option<&str>) -> ApiResult {
        self.api
            .get(
                "facebook.company_ads",
                "v1/facebook/adLibrary/company/ads",
                QueryParams::new()
                    .required("pageId", page_id)
                    .optional("cursor", cursor),
            )
            .await
    }
}
