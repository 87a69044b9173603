//! PokeHarbor (WordPress) scraping rules.
//!
//! Listing pages live at `.../category/<slug>/page/<N>/` and render each
//! game as a `.p-wrap` card with the title anchor inside `.entry-title`.
//! Thumbnails are lazy-loaded, so `data-src` is preferred over `src`.
//!
//! Detail pages carry a `<li>` block of `Label: value` lines
//! (`Version:`, `Status:`, `Released:`, `Updated:`) plus WordPress
//! `article:published_time` / `article:modified_time` meta tags, which
//! serve as the date fallback when the display text omits a label.

use crate::models::{DetailFields, ItemStub, UNKNOWN};
use crate::normalize::{classify_status, extract_labeled_value, normalize_date};
use crate::scrapers::SourceAdapter;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static CARD: Lazy<Selector> = Lazy::new(|| Selector::parse(".p-wrap").unwrap());
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".entry-title a").unwrap());
static THUMB: Lazy<Selector> = Lazy::new(|| Selector::parse(".rb-iwrap img").unwrap());
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static META_PUBLISHED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());
static META_MODIFIED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:modified_time"]"#).unwrap());

pub struct PokeHarbor;

impl SourceAdapter for PokeHarbor {
    fn parse_listing_page(&self, document: &Html) -> Vec<ItemStub> {
        let mut stubs = Vec::new();
        for card in document.select(&CARD) {
            let Some(anchor) = card.select(&TITLE_LINK).next() else {
                continue;
            };
            let Some(href) = anchor.value().attr("href").filter(|h| !h.is_empty()) else {
                continue;
            };
            let title = anchor.text().collect::<String>().trim().to_string();
            let image_hint = card.select(&THUMB).next().and_then(|img| {
                img.value()
                    .attr("data-src")
                    .or_else(|| img.value().attr("src"))
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            });
            stubs.push(ItemStub {
                title,
                detail_url: href.to_string(),
                image_hint,
                released_hint: None,
                updated_hint: None,
            });
        }
        stubs
    }

    fn parse_detail_page(&self, document: &Html) -> DetailFields {
        let mut version = UNKNOWN.to_string();
        let mut status_text = UNKNOWN.to_string();
        let mut released = UNKNOWN.to_string();
        let mut updated = UNKNOWN.to_string();

        for item in document.select(&LIST_ITEM) {
            let text = item.text().collect::<String>();
            if version == UNKNOWN && text.contains("Version:") {
                version = extract_labeled_value(&text, "Version");
            }
            if status_text == UNKNOWN && text.contains("Status:") {
                status_text = extract_labeled_value(&text, "Status");
            }
            if released == UNKNOWN && text.contains("Released:") {
                released = normalize_date(&extract_labeled_value(&text, "Released"));
            }
            if updated == UNKNOWN && text.contains("Updated:") {
                updated = normalize_date(&extract_labeled_value(&text, "Updated"));
            }
        }

        // WordPress always stamps these meta tags even when the post body
        // drops the Released/Updated lines.
        if released == UNKNOWN {
            released = meta_date(document, &META_PUBLISHED);
        }
        if updated == UNKNOWN {
            updated = meta_date(document, &META_MODIFIED);
        }

        let status = classify_status(&status_text, &version, false);
        DetailFields {
            version,
            status,
            released,
            updated,
            image: UNKNOWN.to_string(),
        }
    }

    fn page_url(&self, listing_url: &str, page: u32) -> String {
        format!("{listing_url}{page}/")
    }
}

fn meta_date(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(normalize_date)
        .unwrap_or_else(|| UNKNOWN.to_string())
}
