//! Search pipeline: fetch → parse → extract over a bounded page loop.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::fetchers::PageFetcher;
use crate::parser::parse_listing_page;
use crate::types::{ScrapeConfig, ScrapeOutcome, SearchRequest, StopReason};

/// Scrapes marketplace search results for a query.
///
/// Pagination is a loop bounded by [`ScrapeConfig::max_pages`]; the total
/// number of products never exceeds the request's `limit`.
#[derive(Clone)]
pub struct ListingScraper {
    fetcher: Arc<dyn PageFetcher>,
    config: ScrapeConfig,
}

impl ListingScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    /// Run a search. Fetch failures end the loop and are reported in the
    /// outcome; products gathered from earlier pages are kept.
    pub async fn scrape(&self, request: &SearchRequest) -> ScrapeOutcome {
        if request.limit == 0 {
            return ScrapeOutcome::empty(StopReason::LimitReached);
        }

        info!(
            query = %request.query,
            limit = request.limit,
            fetcher = self.fetcher.name(),
            "Starting search scrape"
        );

        let mut outcome = ScrapeOutcome::empty(StopReason::NoNextPage);
        let mut page = request.page.max(1);

        loop {
            let remaining = request.limit - outcome.products.len();
            let url = self.config.search_url(&request.query, page);

            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(url = %url, error = %e, "Failed to fetch search page");
                    outcome.fetch_error = Some(e.to_string());
                    outcome.stop_reason = StopReason::FetchFailed;
                    break;
                }
            };
            outcome.pages_fetched += 1;

            let parsed = parse_listing_page(&html, remaining, &self.config.base_url);
            debug!(
                page,
                listing_nodes = parsed.listing_nodes,
                extracted = parsed.products.len(),
                skipped = parsed.skipped,
                "Parsed search page"
            );
            if parsed.listing_nodes == 0 {
                warn!(url = %url, "Search page contained no listing nodes");
            }

            outcome.listing_nodes_seen += parsed.listing_nodes;
            outcome.skipped_listings += parsed.skipped;
            outcome.products.extend(parsed.products);

            if outcome.products.len() >= request.limit {
                outcome.stop_reason = StopReason::LimitReached;
                break;
            }
            if !parsed.has_next_page {
                outcome.stop_reason = StopReason::NoNextPage;
                break;
            }
            if outcome.pages_fetched >= self.config.max_pages {
                outcome.stop_reason = StopReason::PageCap;
                break;
            }
            page += 1;
        }

        info!(
            query = %request.query,
            products = outcome.products.len(),
            pages = outcome.pages_fetched,
            stop_reason = ?outcome.stop_reason,
            "Search scrape finished"
        );

        outcome
    }
}
