//! Per-site scraping adapters.
//!
//! Each source implements the same two parsing operations with its own
//! markup rules, keeping one site's selector assumptions out of the other's
//! code path. The aggregator picks the adapter from the category's declared
//! [`SourceKind`] and never branches on site specifics itself.
//!
//! # Supported Sources
//!
//! | Source | Module | Markup | Notes |
//! |--------|--------|--------|-------|
//! | PokeHarbor | [`pokeharbor`] | WordPress | `/page/N/` pagination, lazy-loaded thumbnails |
//! | Eevee Expo | [`eeveeexpo`] | XenForo | `page-N` suffix, relative thread hrefs |
//!
//! # Common Patterns
//!
//! Adapters are pure parsers: they take an already-fetched document and
//! return stubs or detail fields. Fetching (and its error policy) lives in
//! the pipeline. A field an adapter cannot find becomes the `unknown`
//! sentinel rather than an error.

pub mod eeveeexpo;
pub mod pokeharbor;

use crate::models::{DetailFields, ItemStub, SourceKind};
use scraper::Html;

/// The shared capability every source exposes: parse a listing page into
/// item stubs, parse a detail page into authoritative fields, and shape
/// the URL of the Nth listing page.
pub trait SourceAdapter: Send + Sync {
    /// Extract candidate items from a listing page. Stubs without a usable
    /// detail URL are skipped, not yielded.
    fn parse_listing_page(&self, document: &Html) -> Vec<ItemStub>;

    /// Extract version/status/dates/image from a detail page. Missing
    /// fields come back as the `unknown` sentinel.
    fn parse_detail_page(&self, document: &Html) -> DetailFields;

    /// Build the URL of listing page `page` (1-based) from the category's
    /// URL template.
    fn page_url(&self, listing_url: &str, page: u32) -> String;
}

/// Select the adapter for a category's declared source kind.
pub fn adapter_for(kind: SourceKind) -> &'static dyn SourceAdapter {
    match kind {
        SourceKind::PokeHarbor => &pokeharbor::PokeHarbor,
        SourceKind::EeveeExpo => &eeveeexpo::EeveeExpo,
    }
}
