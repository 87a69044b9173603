//! The aggregation pipeline: walk each category's listing pages, fetch
//! detail pages for unseen items, and merge both into final records.
//!
//! One [`Aggregator`] is built per run and owns the cross-category seen-URL
//! set, so repeated runs (and tests) never share state. Fetches are
//! sequential; a failed listing fetch abandons the remaining pages of that
//! category while keeping whatever was already collected, and a failed
//! detail fetch degrades that one record to unknown fields.

use crate::fetch::PageFetcher;
use crate::models::{Category, DetailFields, GameRecord, ItemStub, UNKNOWN};
use crate::normalize::normalize_date;
use crate::scrapers::{SourceAdapter, adapter_for};
use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Orchestrates one full scraping run.
pub struct Aggregator<'a> {
    fetcher: &'a dyn PageFetcher,
    seen: HashSet<String>,
}

impl<'a> Aggregator<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Aggregator {
            fetcher,
            seen: HashSet::new(),
        }
    }

    /// Scrape every category in declaration order and concatenate the
    /// results. Categories are independent; one failing never affects
    /// the next.
    #[instrument(level = "info", skip_all)]
    pub async fn run(&mut self, categories: &[Category]) -> Vec<GameRecord> {
        let mut records = Vec::new();
        for category in categories {
            let batch = self.scrape_category(category).await;
            info!(
                category = category.name,
                source = ?category.source,
                count = batch.len(),
                "Category scraped"
            );
            records.extend(batch);
        }
        records
    }

    /// Walk a category's listing pages up to its bound, fetching the detail
    /// page of every not-yet-seen item.
    #[instrument(level = "info", skip_all, fields(category = category.name))]
    async fn scrape_category(&mut self, category: &Category) -> Vec<GameRecord> {
        let adapter = adapter_for(category.source);
        let mut records = Vec::new();

        for page in 1..=category.max_pages {
            let page_url = adapter.page_url(category.url, page);
            let body = match self.fetcher.fetch(&page_url).await {
                Ok(body) => body,
                Err(e) => {
                    // Fail fast: later pages of an exhausted or unreachable
                    // category are not worth retrying.
                    warn!(
                        %page_url,
                        page,
                        error = %e,
                        "Listing fetch failed; abandoning remaining pages"
                    );
                    break;
                }
            };
            let stubs = parse_listing(adapter, &body);
            debug!(page, count = stubs.len(), "Parsed listing page");

            for stub in stubs {
                if !self.seen.insert(stub.detail_url.clone()) {
                    debug!(url = %stub.detail_url, "Already seen; skipping");
                    continue;
                }
                let details = match self.fetcher.fetch(&stub.detail_url).await {
                    Ok(body) => parse_detail(adapter, &body),
                    Err(e) => {
                        warn!(
                            url = %stub.detail_url,
                            error = %e,
                            "Detail fetch failed; recording with unknown fields"
                        );
                        DetailFields::unknown()
                    }
                };
                records.push(merge(category, stub, details));
            }
        }
        records
    }
}

fn parse_listing(adapter: &dyn SourceAdapter, body: &str) -> Vec<ItemStub> {
    let document = Html::parse_document(body);
    adapter.parse_listing_page(&document)
}

fn parse_detail(adapter: &dyn SourceAdapter, body: &str) -> DetailFields {
    let document = Html::parse_document(body);
    adapter.parse_detail_page(&document)
}

/// Combine a listing stub with its detail fields. Detail values win; a
/// listing hint fills a field only when the detail side is the sentinel.
fn merge(category: &Category, stub: ItemStub, details: DetailFields) -> GameRecord {
    GameRecord {
        id: GameRecord::id_for(&stub.detail_url),
        title: stub.title,
        image: or_hint(details.image, stub.image_hint),
        last_updated: or_hint(
            details.updated,
            stub.updated_hint.as_deref().map(normalize_date),
        ),
        initial_release: or_hint(
            details.released,
            stub.released_hint.as_deref().map(normalize_date),
        ),
        game_url: stub.detail_url,
        version: details.version,
        status: details.status,
        platform: category.name.to_string(),
        source: category.source,
    }
}

fn or_hint(detail: String, hint: Option<String>) -> String {
    if detail != UNKNOWN {
        return detail;
    }
    match hint {
        Some(h) if h != UNKNOWN => h,
        _ => UNKNOWN.to_string(),
    }
}
