//! Page harvesting: enumerate candidate anchors on one listing page,
//! extract each, filter, and deduplicate.
//!
//! Per-candidate outcomes are tallied instead of swallowed, so one harvest
//! reports exactly what happened to every anchor it looked at. Fetch
//! failures surface as [`ScraperError`]; everything below that degrades to
//! a smaller (possibly empty) record list.

use std::collections::HashSet;
use std::sync::LazyLock;

use henko_core::{CatalogConfig, ProductRecord};
use scraper::{Html, Selector};

use crate::client::ListingClient;
use crate::error::ScraperError;
use crate::extract::{extract_product, Skip};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));

/// Names that mark navigation chrome rather than products; a record whose
/// name contains any of these is rejected.
const NAV_KEYWORDS: [&str; 9] = [
    "categoria",
    "buscar",
    "filtro",
    "ordenar",
    "página",
    "menu",
    "navegacion",
    "footer",
    "header",
];

/// Outcome of harvesting one listing page.
#[derive(Debug, Default)]
pub struct Harvest {
    /// Valid, deduplicated records in page order.
    pub records: Vec<ProductRecord>,
    /// Anchors examined on the page.
    pub candidates_seen: usize,
    pub skipped: SkipCounts,
}

/// Per-reason tallies for candidates that produced no record.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub empty_href: usize,
    pub not_product_path: usize,
    pub navigation: usize,
    pub short_text: usize,
    /// Extracted but failed the validity filter.
    pub invalid: usize,
    /// Valid but a duplicate of an earlier record.
    pub duplicate: usize,
}

impl SkipCounts {
    fn tally(&mut self, skip: Skip) {
        match skip {
            Skip::EmptyHref => self.empty_href += 1,
            Skip::NotProductPath => self.not_product_path += 1,
            Skip::NavigationLink => self.navigation += 1,
            Skip::ShortText => self.short_text += 1,
        }
    }
}

/// Harvests every product record out of one listing document.
///
/// Pure over the HTML: enumerate anchors, extract per candidate, apply the
/// validity filter, deduplicate keeping the first occurrence.
#[must_use]
pub fn harvest_document(html: &str, catalog: &CatalogConfig) -> Harvest {
    let document = Html::parse_document(html);
    let mut harvest = Harvest::default();
    let mut seen_keys: HashSet<String> = HashSet::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        harvest.candidates_seen += 1;
        match extract_product(anchor, catalog) {
            Err(skip) => harvest.skipped.tally(skip),
            Ok(record) => {
                if !is_valid_record(&record, catalog) {
                    harvest.skipped.invalid += 1;
                    continue;
                }
                if !seen_keys.insert(record.dedup_key().to_string()) {
                    harvest.skipped.duplicate += 1;
                    continue;
                }
                harvest.records.push(record);
            }
        }
    }

    harvest
}

/// Fetches and harvests one listing page.
///
/// # Errors
///
/// Returns [`ScraperError`] only for the page fetch itself; extraction
/// problems are per-candidate tallies on the returned [`Harvest`].
pub async fn harvest_page(
    client: &ListingClient,
    catalog: &CatalogConfig,
    page: u32,
) -> Result<Harvest, ScraperError> {
    let html = client.fetch_listing_page(page).await?;
    let harvest = harvest_document(&html, catalog);

    let brands: Vec<&str> = {
        let mut distinct: Vec<&str> = Vec::new();
        for record in &harvest.records {
            if !record.brand.is_empty() && !distinct.contains(&record.brand.as_str()) {
                distinct.push(record.brand.as_str());
            }
            if distinct.len() == 5 {
                break;
            }
        }
        distinct
    };
    tracing::info!(
        page,
        products = harvest.records.len(),
        candidates = harvest.candidates_seen,
        skipped = ?harvest.skipped,
        ?brands,
        "harvested listing page"
    );

    Ok(harvest)
}

/// Validity filter over an extracted record: a real product name (long
/// enough, not navigation chrome) and a product-path link.
fn is_valid_record(record: &ProductRecord, catalog: &CatalogConfig) -> bool {
    let name_lower = record.name.to_lowercase();
    if NAV_KEYWORDS.iter().any(|kw| name_lower.contains(kw)) {
        return false;
    }
    if record.name.trim().chars().count() < 3 {
        return false;
    }
    record.link.contains(&catalog.products_path)
}
