//! Compiled-in category configuration.
//!
//! The category table is part of the program, not runtime input: each entry
//! pins a listing URL template to the adapter that understands its markup
//! and to a page bound tuned to how deep that archive goes.

use crate::models::{Category, SourceKind};

/// The categories scraped on every run, in declaration order. Order
/// matters for dedup: when two categories list the same detail URL, the
/// earlier one keeps it.
pub fn categories() -> Vec<Category> {
    vec![
        Category {
            name: "RPGXP",
            source: SourceKind::PokeHarbor,
            url: "https://www.pokeharbor.com/category/rpgxp/page/",
            max_pages: 12,
        },
        Category {
            name: "GBA",
            source: SourceKind::PokeHarbor,
            url: "https://www.pokeharbor.com/category/roms/gba/page/",
            max_pages: 108,
        },
        Category {
            name: "RPGXP",
            source: SourceKind::EeveeExpo,
            url: "https://eeveeexpo.com/completed-games/",
            max_pages: 1,
        },
    ]
}
