//! Data models for scraped fan-game metadata.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`Category`]: a configured listing to scrape (site + URL template + page bound)
//! - [`ItemStub`]: partial data lifted from a listing page, before the detail fetch
//! - [`DetailFields`]: authoritative fields extracted from a detail page
//! - [`GameRecord`]: the merged, final record written to the snapshot
//!
//! Serialized field names follow the data.json contract consumed by the
//! display front end (`game_url`, `last_updated`, `initial_release`, ...).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The single placeholder for any field that could not be determined from
/// any source. Every optional field uses this marker so the sort comparator
/// and downstream filters only have one value to special-case.
pub const UNKNOWN: &str = "unknown";

/// Which site a category (and its records) comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SourceKind {
    /// WordPress download site (`pokeharbor.com`).
    PokeHarbor,
    /// XenForo forum (`eeveeexpo.com`).
    EeveeExpo,
}

/// Completion status of a game, as classified by the heuristic cascade in
/// [`crate::normalize::classify_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Status {
    Completed,
    Demo,
    Unknown,
}

/// A configured listing to scrape. Loaded once at startup; see
/// [`crate::config::categories`].
#[derive(Debug, Clone)]
pub struct Category {
    /// Display name, propagated verbatim into each record's `platform` field.
    pub name: &'static str,
    /// Which source adapter handles this category's markup.
    pub source: SourceKind,
    /// Listing URL template. For PokeHarbor this ends in `/page/` and the
    /// page number is appended; for EeveeExpo page 1 is the bare URL.
    pub url: &'static str,
    /// Upper bound on listing pages to walk (inclusive, starting at 1).
    pub max_pages: u32,
}

/// Partial record produced from a listing page before its detail page has
/// been fetched. Hints are raw site text; they fill gaps only when the
/// detail page leaves the corresponding field unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStub {
    pub title: String,
    /// Canonical absolute detail URL; the dedup key.
    pub detail_url: String,
    pub image_hint: Option<String>,
    /// Raw date hint for the initial release (e.g. a `datetime` attribute).
    pub released_hint: Option<String>,
    /// Raw date hint for the latest update.
    pub updated_hint: Option<String>,
}

/// Authoritative fields extracted from a detail page. Dates are already
/// normalized to `YYYY-MM-DD` or [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetailFields {
    pub version: String,
    pub status: Status,
    pub released: String,
    pub updated: String,
    pub image: String,
}

impl DetailFields {
    /// The all-unknown value substituted when a detail fetch or parse fails.
    /// A failed detail page degrades the record, never the category.
    pub fn unknown() -> Self {
        DetailFields {
            version: UNKNOWN.to_string(),
            status: Status::Unknown,
            released: UNKNOWN.to_string(),
            updated: UNKNOWN.to_string(),
            image: UNKNOWN.to_string(),
        }
    }
}

/// A merged, final record. Constructed once from the union of listing hints
/// and detail fields; never updated in place afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameRecord {
    /// Stable short identifier derived from `game_url`; same URL, same id.
    pub id: String,
    pub title: String,
    pub game_url: String,
    pub image: String,
    /// ISO date, a site-native display string, or [`UNKNOWN`].
    pub last_updated: String,
    pub initial_release: String,
    pub version: String,
    pub status: Status,
    /// The owning category's display name.
    pub platform: String,
    pub source: SourceKind,
}

impl GameRecord {
    /// Derive the stable id for a detail URL: the first 12 characters of its
    /// standard base64 encoding.
    pub fn id_for(url: &str) -> String {
        STANDARD.encode(url).chars().take(12).collect()
    }

    /// The date this record sorts by: `last_updated` when parsable,
    /// falling back to `initial_release`, falling back to the oldest
    /// representable date so undateable records sink to the bottom.
    pub fn recency_key(&self) -> NaiveDate {
        parse_iso(&self.last_updated)
            .or_else(|| parse_iso(&self.initial_release))
            .unwrap_or(NaiveDate::MIN)
    }
}

fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
