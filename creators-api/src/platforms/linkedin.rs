//! LinkedIn Ad Library endpoints.
use crate::client::ScrapeCreatorsApi;
use crate::error::ApiResult;
use crate::query::QueryParams;

/// Filters for [`Linkedin::search_ads`]. Every field is optional; unset ones are
/// left out of the request.
#[derive(Debug, Clone, Default)]
pub struct LinkedinAdSearch {
    pub company: Option<String>,
    pub keyword: Option<String>,
    /// Comma-separated country codes, passed through as given.
    pub countries: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub pagination_token: Option<String>,
}

impl LinkedinAdSearch {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .optional("company", self.company.as_deref())
            .optional("keyword", self.keyword.as_deref())
            .optional("countries", self.countries.as_deref())
            .optional("startDate", self.start_date.as_deref())
            .optional("endDate", self.end_date.as_deref())
            .optional("paginationToken", self.pagination_token.as_deref())
    }
}

#[derive(Clone, Copy)]
pub struct Linkedin<'a> {
    api: &'a ScrapeCreatorsApi,
}

impl<'a> Linkedin<'a> {
    pub(crate) fn new(api: &'a ScrapeCreatorsApi) -> Self {
        Self { api }
    }

    pub async fn search_ads(&self, search: &LinkedinAdSearch) -> ApiResult {
        self.api
            .get("linkedin.search_ads", "v1/linkedin/ads/search", search.to_query())
            .await
    }

    /// Detail for one ad by its Ad Library URL.
    pub async fn ad(&self, url: &str) -> ApiResult {
        self.api
            .get(
                "linkedin.ad",
                "v1/linkedin/ad",
                QueryParams::new().required("url", url),
            )
            .await
    }
}
