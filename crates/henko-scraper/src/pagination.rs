//! Page-count discovery for the paginated listing.
//!
//! The storefront paginates with an `mpage` query parameter. When the
//! page-1 markup carries pagination links we take the highest `mpage`
//! value as the real page count; when it does not (theme without
//! pagination anchors, or a single-page catalog), we fall back to an
//! estimate from the configured catalog size and page size. The estimate
//! is a known inaccuracy, carried as explicit config rather than a
//! constant.

use std::sync::LazyLock;

use henko_core::CatalogConfig;
use regex::Regex;
use scraper::{Html, Selector};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

static MPAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]mpage=(\d+)").expect("static regex"));

/// Returns the catalog's page count: discovered from `page1_html` when the
/// markup exposes pagination links, estimated from config otherwise.
#[must_use]
pub fn discover_total_pages(page1_html: &str, catalog: &CatalogConfig) -> u32 {
    let document = Html::parse_document(page1_html);
    let discovered = document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| MPAGE_RE.captures(href))
        .filter_map(|captures| captures[1].parse::<u32>().ok())
        .max();

    match discovered {
        Some(pages) if pages >= 1 => {
            tracing::debug!(pages, "discovered page count from pagination markup");
            pages
        }
        _ => {
            let estimate = estimated_total_pages(catalog);
            tracing::debug!(estimate, "no pagination markup; using configured estimate");
            estimate
        }
    }
}

/// Estimated page count: configured catalog size over configured page
/// size, rounded up, never below one.
#[must_use]
pub fn estimated_total_pages(catalog: &CatalogConfig) -> u32 {
    catalog
        .catalog_size_estimate
        .div_ceil(catalog.page_size_estimate.max(1))
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_estimate(size: u32, per_page: u32) -> CatalogConfig {
        CatalogConfig {
            catalog_size_estimate: size,
            page_size_estimate: per_page,
            ..CatalogConfig::default()
        }
    }

    #[test]
    fn estimate_rounds_up() {
        assert_eq!(estimated_total_pages(&catalog_with_estimate(577, 60)), 10);
        assert_eq!(estimated_total_pages(&catalog_with_estimate(120, 60)), 2);
        assert_eq!(estimated_total_pages(&catalog_with_estimate(121, 60)), 3);
    }

    #[test]
    fn estimate_never_below_one() {
        assert_eq!(estimated_total_pages(&catalog_with_estimate(0, 60)), 1);
        assert_eq!(estimated_total_pages(&catalog_with_estimate(10, 0)), 10);
    }

    #[test]
    fn discovery_takes_highest_mpage_link() {
        let html = r#"
            <div class="pagination">
              <a href="/productos/?mpage=2">2</a>
              <a href="/productos/?mpage=7">7</a>
              <a href="/productos/?mpage=3">3</a>
            </div>"#;
        assert_eq!(
            discover_total_pages(html, &catalog_with_estimate(577, 60)),
            7
        );
    }

    #[test]
    fn discovery_handles_mpage_as_later_query_param() {
        let html = r#"<a href="/productos/?orden=precio&mpage=4">4</a>"#;
        assert_eq!(
            discover_total_pages(html, &catalog_with_estimate(577, 60)),
            4
        );
    }

    #[test]
    fn discovery_falls_back_to_estimate_without_markup() {
        let html = "<html><body><a href=\"/productos/algo\">Algo</a></body></html>";
        assert_eq!(
            discover_total_pages(html, &catalog_with_estimate(577, 60)),
            10
        );
    }

    #[test]
    fn discovery_ignores_non_numeric_mpage() {
        let html = r#"<a href="/productos/?mpage=todo">todo</a>"#;
        assert_eq!(
            discover_total_pages(html, &catalog_with_estimate(120, 60)),
            2
        );
    }
}
