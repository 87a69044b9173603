//! Eevee Expo (XenForo) scraping rules.
//!
//! The completed-games forum lists threads as `.structItem--thread` rows.
//! Thread hrefs are relative and must be absolutized against the forum
//! origin; title cells sometimes nest a prefix anchor before the real one,
//! so the last `.structItem-title a` wins. Listing rows carry the only
//! date information this site exposes, as `datetime` attributes on the
//! start/latest `<time>` elements.
//!
//! Detail pages hide the cover art in a CSS `background-image: url(...)`
//! on `.articlePreview-image`, with the first `.bbWrapper` image as the
//! fallback. Version strings are free text in the post body; a labeled
//! `Version:` line is preferred, then a dotted-number match.

use crate::models::{DetailFields, ItemStub, UNKNOWN};
use crate::normalize::{classify_status, extract_labeled_value, normalize_date};
use crate::scrapers::SourceAdapter;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

const ORIGIN: &str = "https://eeveeexpo.com";

static THREAD: Lazy<Selector> = Lazy::new(|| Selector::parse(".structItem--thread").unwrap());
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".structItem-title a").unwrap());
static LATEST_TIME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".structItem-latestDate time").unwrap());
static START_TIME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".structItem-startDate time").unwrap());
static PREVIEW_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".articlePreview-image").unwrap());
static BODY_IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse(".bbWrapper img").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse(".bbWrapper").unwrap());
static COMPLETED_BADGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".label--completed").unwrap());
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());

static CSS_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\(['"]?([^'")]+)['"]?\)"#).unwrap());
static VERSION_LABELED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)version:?\s*(v?[\d.]+)").unwrap());
static VERSION_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+(?:\.\d+)?").unwrap());

pub struct EeveeExpo;

impl SourceAdapter for EeveeExpo {
    fn parse_listing_page(&self, document: &Html) -> Vec<ItemStub> {
        let mut stubs = Vec::new();
        for row in document.select(&THREAD) {
            // Prefix badges render as an earlier anchor in the same cell.
            let Some(anchor) = row.select(&TITLE_LINK).last() else {
                continue;
            };
            let Some(href) = anchor.value().attr("href").filter(|h| !h.is_empty()) else {
                continue;
            };
            let Some(detail_url) = absolutize(href) else {
                continue;
            };
            let title = anchor.text().collect::<String>().trim().to_string();
            let image_hint = row
                .select(&PREVIEW_IMAGE)
                .next()
                .and_then(|el| el.value().attr("style"))
                .and_then(css_background_url);
            stubs.push(ItemStub {
                title,
                detail_url,
                image_hint,
                released_hint: time_attr(&row, &START_TIME),
                updated_hint: time_attr(&row, &LATEST_TIME),
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

        if version == UNKNOWN {
            version = body_version(document);
        }

        let completed_badge = document.select(&COMPLETED_BADGE).next().is_some();
        let status = classify_status(&status_text, &version, completed_badge);

        let image = document
            .select(&PREVIEW_IMAGE)
            .next()
            .and_then(|el| el.value().attr("style"))
            .and_then(css_background_url)
            .or_else(|| {
                document
                    .select(&BODY_IMAGE)
                    .next()
                    .and_then(|img| img.value().attr("src"))
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| UNKNOWN.to_string());

        DetailFields {
            version,
            status,
            released,
            updated,
            image,
        }
    }

    fn page_url(&self, listing_url: &str, page: u32) -> String {
        if page <= 1 {
            listing_url.to_string()
        } else {
            format!("{listing_url}page-{page}")
        }
    }
}

/// Resolve a (possibly relative) thread href against the forum origin.
fn absolutize(href: &str) -> Option<String> {
    let base = Url::parse(ORIGIN).ok()?;
    base.join(href).ok().map(String::from)
}

fn time_attr(
    row: &scraper::ElementRef<'_>,
    selector: &Selector,
) -> Option<String> {
    row.select(selector)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Pull the image URL out of a `background-image: url(...)` style property.
fn css_background_url(style: &str) -> Option<String> {
    CSS_URL
        .captures(style)
        .map(|caps| caps[1].to_string())
        .filter(|s| !s.is_empty())
}

/// Scan the post body for a version string: labeled first, then a bare
/// dotted number.
fn body_version(document: &Html) -> String {
    let Some(body) = document.select(&BODY).next() else {
        return UNKNOWN.to_string();
    };
    let text = body.text().collect::<String>();
    if let Some(caps) = VERSION_LABELED.captures(&text) {
        return caps[1].to_string();
    }
    if let Some(m) = VERSION_BARE.find(&text) {
        return m.as_str().to_string();
    }
    UNKNOWN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    const LISTING: &str = r#"
        <html><body>
          <div class="structItem structItem--thread">
            <div class="structItem-title">
              <a href="/forums/prefix.12/">RPG Maker</a>
              <a href="/threads/pokemon-solstice.101/">Pokemon Solstice</a>
            </div>
            <div class="structItem-startDate"><time datetime="2022-03-01T12:00:00+00:00">Mar 1, 2022</time></div>
            <div class="structItem-latestDate"><time datetime="2024-05-10T09:00:00+00:00">May 10, 2024</time></div>
          </div>
          <div class="structItem structItem--thread">
            <div class="structItem-title"><a href="https://eeveeexpo.com/threads/pokemon-dusk.202/">Pokemon Dusk</a></div>
            <div class="articlePreview-image" style="background-image: url('/data/previews/dusk.jpg')"></div>
          </div>
          <div class="structItem structItem--thread">
            <div class="structItem-title"><span>no link here</span></div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_listing_absolutizes_and_takes_last_anchor() {
        let document = Html::parse_document(LISTING);
        let stubs = EeveeExpo.parse_listing_page(&document);
        assert_eq!(stubs.len(), 2);
        assert_eq!(stubs[0].title, "Pokemon Solstice");
        assert_eq!(
            stubs[0].detail_url,
            "https://eeveeexpo.com/threads/pokemon-solstice.101/"
        );
        assert_eq!(
            stubs[0].released_hint.as_deref(),
            Some("2022-03-01T12:00:00+00:00")
        );
        assert_eq!(
            stubs[0].updated_hint.as_deref(),
            Some("2024-05-10T09:00:00+00:00")
        );
        // Absolute hrefs pass through untouched.
        assert_eq!(
            stubs[1].detail_url,
            "https://eeveeexpo.com/threads/pokemon-dusk.202/"
        );
        assert_eq!(stubs[1].image_hint.as_deref(), Some("/data/previews/dusk.jpg"));
    }

    #[test]
    fn test_detail_badge_and_background_image() {
        let detail = r#"
            <html><body>
              <span class="label label--completed">Completed</span>
              <div class="articlePreview-image" style="background-image:url(&quot;/data/previews/solstice.png&quot;)"></div>
              <div class="bbWrapper">Welcome! Version: 2.1.3 is out now.</div>
            </body></html>
        "#;
        let document = Html::parse_document(detail);
        let fields = EeveeExpo.parse_detail_page(&document);
        assert_eq!(fields.status, Status::Completed);
        assert_eq!(fields.image, "/data/previews/solstice.png");
        assert_eq!(fields.version, "2.1.3");
        assert_eq!(fields.released, UNKNOWN);
        assert_eq!(fields.updated, UNKNOWN);
    }

    #[test]
    fn test_detail_bare_version_and_body_image_fallback() {
        let detail = r#"
            <html><body>
              <div class="bbWrapper">
                <img src="https://eeveeexpo.com/data/attachments/screen1.png">
                Latest build is 0.8, enjoy!
              </div>
            </body></html>
        "#;
        let document = Html::parse_document(detail);
        let fields = EeveeExpo.parse_detail_page(&document);
        assert_eq!(fields.version, "0.8");
        // No badge, no explicit status, version has no "demo" substring.
        assert_eq!(fields.status, Status::Unknown);
        assert_eq!(
            fields.image,
            "https://eeveeexpo.com/data/attachments/screen1.png"
        );
    }

    #[test]
    fn test_detail_labeled_list_wins_over_body_regex() {
        let detail = r#"
            <html><body>
              <div class="bbWrapper">
                <ul><li>Version: Demo 4</li><li>Status: In progress</li></ul>
                Download 9.9.9 mirror below.
              </div>
            </body></html>
        "#;
        let document = Html::parse_document(detail);
        let fields = EeveeExpo.parse_detail_page(&document);
        assert_eq!(fields.version, "Demo 4");
        // Explicit status text ends the cascade even though it maps nowhere.
        assert_eq!(fields.status, Status::Unknown);
    }

    #[test]
    fn test_detail_empty_page_is_all_unknown() {
        let document = Html::parse_document("<html><body></body></html>");
        let fields = EeveeExpo.parse_detail_page(&document);
        assert_eq!(fields, DetailFields::unknown());
    }

    #[test]
    fn test_page_url_bare_then_suffix() {
        let base = "https://eeveeexpo.com/completed-games/";
        assert_eq!(EeveeExpo.page_url(base, 1), base);
        assert_eq!(
            EeveeExpo.page_url(base, 3),
            "https://eeveeexpo.com/completed-games/page-3"
        );
    }
}
