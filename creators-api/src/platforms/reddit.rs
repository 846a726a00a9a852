//! Reddit endpoints.
use crate::client::ScrapeCreatorsApi;
use crate::error::ApiResult;
use crate::query::QueryParams;

/// Shared listing refinements for subreddit and search calls.
///
/// Values pass through as the vendor expects them (e.g. `sort: "top"`,
/// `timeframe: "week"`); `after` is the opaque cursor from a previous page.
#[derive(Debug, Clone, Default)]
pub struct RedditListing {
    pub sort: Option<String>,
    pub timeframe: Option<String>,
    pub after: Option<String>,
}

impl RedditListing {
    fn apply(&self, q: QueryParams) -> QueryParams {
        q.optional("sort", self.sort.as_deref())
            .optional("timeframe", self.timeframe.as_deref())
            .optional("after", self.after.as_deref())
    }
}

#[derive(Clone, Copy)]
pub struct Reddit<'a> {
    api: &'a ScrapeCreatorsApi,
}

impl<'a> Reddit<'a> {
    pub(crate) fn new(api: &'a ScrapeCreatorsApi) -> Self {
        Self { api }
    }

    pub async fn subreddit_posts(&self, subreddit: &str, listing: &RedditListing) -> ApiResult {
        self.api
            .get(
                "reddit.subreddit_posts",
                "v1/reddit/subreddit",
                listing.apply(QueryParams::new().required("subreddit", subreddit)),
            )
            .await
    }

    /// Flattened comment tree for a post. Without `amount` the vendor default applies.
    pub async fn post_comments(&self, post_url: &str, amount: Option<u32>) -> ApiResult {
        self.api
            .get(
                "reddit.post_comments",
                "v1/reddit/post/comments/simple",
                QueryParams::new()
                    .required("url", post_url)
                    .optional("amount", amount),
            )
            .await
    }

    pub async fn search(&self, query: &str, listing: &RedditListing) -> ApiResult {
        self.api
            .get(
                "reddit.search",
                "v1/reddit/search",
                listing.apply(QueryParams::new().required("query", query)),
            )
            .await
    }
}
