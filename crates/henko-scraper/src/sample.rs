//! Random sampling across listing pages.
//!
//! One sampling pass harvests a random subset of the leading pages
//! sequentially, with a fixed inter-request delay between fetches (a
//! static throttle, not backpressure), pools the records, and draws a
//! uniform subset without replacement. Per-page failures degrade to an
//! empty contribution; the pass itself never fails.

use std::time::Duration;

use henko_core::{CatalogConfig, ProductRecord};
use rand::seq::{index, IndexedRandom};
use rand::Rng;

use crate::client::ListingClient;
use crate::harvest::harvest_page;
use crate::pagination::{discover_total_pages, estimated_total_pages};

/// Harvests a random selection of pages and returns up to `count` records
/// drawn uniformly from the pooled results (the whole pool when smaller).
pub async fn sample_products<R: Rng + ?Sized>(
    client: &ListingClient,
    catalog: &CatalogConfig,
    count: usize,
    rng: &mut R,
) -> Vec<ProductRecord> {
    let total_pages = match client.fetch_listing_page(1).await {
        Ok(html) => discover_total_pages(&html, catalog),
        Err(e) => {
            tracing::warn!(error = %e, "page-count probe failed; using configured estimate");
            estimated_total_pages(catalog)
        }
    };

    let pages = pick_pages(total_pages, catalog.sample_pages, rng);
    tracing::info!(total_pages, ?pages, "sampling listing pages");

    let mut pool: Vec<ProductRecord> = Vec::new();
    for (i, page) in pages.iter().copied().enumerate() {
        if i > 0 {
            tokio::time::sleep(Duration::from_millis(catalog.inter_request_delay_ms)).await;
        }
        match harvest_page(client, catalog, page).await {
            Ok(harvest) => pool.extend(harvest.records),
            Err(e) => {
                tracing::error!(page, error = %e, "page harvest failed; continuing with the rest");
            }
        }
    }

    draw_from_pool(&pool, count, rng)
}

/// Picks distinct 1-based page indices, uniformly and in random order,
/// from the first `window` pages (clamped to `total_pages`).
fn pick_pages<R: Rng + ?Sized>(total_pages: u32, window: u32, rng: &mut R) -> Vec<u32> {
    let span = total_pages.clamp(1, window.max(1)) as usize;
    index::sample(rng, span, span)
        .iter()
        .map(|i| u32::try_from(i).unwrap_or(0) + 1)
        .collect()
}

/// Uniform sample without replacement; the whole pool when it is smaller
/// than `count`.
fn draw_from_pool<R: Rng + ?Sized>(
    pool: &[ProductRecord],
    count: usize,
    rng: &mut R,
) -> Vec<ProductRecord> {
    if pool.len() <= count {
        return pool.to_vec();
    }
    pool.choose_multiple(rng, count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use henko_core::Category;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn make_record(id: u32) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: format!("{id} | Marca"),
            brand: "Marca".to_string(),
            price_original: "$100".to_string(),
            price_offer: "$80".to_string(),
            stock: ProductRecord::STOCK_DEFAULT.to_string(),
            link: format!("https://shop.example/productos/item-{id}"),
            image_url: String::new(),
            colors: vec![],
            sizes: vec![],
            category: Category::Generic,
        }
    }

    #[test]
    fn pick_pages_covers_the_window_once_each() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pages = pick_pages(10, 5, &mut rng);
        pages.sort_unstable();
        assert_eq!(pages, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn pick_pages_clamps_to_total_when_catalog_is_small() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pages = pick_pages(2, 5, &mut rng);
        pages.sort_unstable();
        assert_eq!(pages, vec![1, 2]);
    }

    #[test]
    fn pick_pages_never_returns_page_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_pages(1, 5, &mut rng), vec![1]);
    }

    #[test]
    fn draw_returns_whole_pool_when_request_exceeds_it() {
        let pool: Vec<ProductRecord> = (0..3).map(make_record).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let drawn = draw_from_pool(&pool, 5, &mut rng);
        assert_eq!(drawn.len(), 3);
    }

    #[test]
    fn draw_respects_requested_count() {
        let pool: Vec<ProductRecord> = (0..20).map(make_record).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let drawn = draw_from_pool(&pool, 5, &mut rng);
        assert_eq!(drawn.len(), 5);
    }

    #[test]
    fn draw_is_without_replacement() {
        let pool: Vec<ProductRecord> = (0..20).map(make_record).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let drawn = draw_from_pool(&pool, 10, &mut rng);
        let mut ids: Vec<&str> = drawn.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10, "no record may be drawn twice");
    }

    #[test]
    fn draw_from_empty_pool_is_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(draw_from_pool(&[], 5, &mut rng).is_empty());
    }
}
