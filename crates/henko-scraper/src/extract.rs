//! Entity extraction: one candidate anchor (plus its nearest meaningful
//! ancestor) in, one [`ProductRecord`] out.
//!
//! The listing markup is loosely structured, so identity recovery is a
//! fallback chain: pipe-separated `"id | brand"` anchor text, then a
//! numeric run embedded in the href, then a hash of the cleaned text.
//! Prices, image, and stock are contextual lookups on the surrounding
//! container. Anchors that do not resemble a product link are reported as
//! a [`Skip`] reason rather than silently dropped, so the harvester can
//! account for every candidate.

use std::sync::LazyLock;

use henko_core::{CatalogConfig, Category, ProductRecord};
use regex::Regex;
use scraper::{ElementRef, Selector};
use sha2::{Digest, Sha256};

/// Generic brand label some listing themes print instead of a vendor.
const GENERIC_BRAND_PLACEHOLDER: &str = "Producto";

/// Everything outside this whitelist is scrubbed from anchor text before
/// identity parsing: word chars, whitespace, pipe, currency, punctuation
/// used inside prices, hyphen, and Spanish accented vowels.
static TEXT_CLEANUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s|$.,\-áéíóúñ]+").expect("static regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Currency-prefixed price token, e.g. `"$4.500"` or `"$80"`.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[\d.,]*\d").expect("static regex"));

static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("static regex"));

/// Stock and urgency markers used by the storefront's listing themes.
static STOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)stock|quedan|último|agotado").expect("static regex"));

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("static selector"));

/// Lazy-load attributes checked after `src`, in order.
const IMG_SRC_ATTRS: [&str; 3] = ["src", "data-src", "data-original"];

/// Why a candidate anchor was not turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The anchor has no `href` (or an empty one).
    EmptyHref,
    /// The href does not contain the catalog's product-path segment.
    NotProductPath,
    /// The href points at a category or search view, not a product.
    NavigationLink,
    /// The visible text is too short to be a product label.
    ShortText,
}

/// Extracts a [`ProductRecord`] from one candidate anchor.
///
/// Returns a [`Skip`] reason when the anchor does not resemble a product
/// link; all other anchors produce a record — every field has a fallback.
///
/// # Errors
///
/// The `Err` variant is a per-candidate skip reason, not a failure: the
/// harvester tallies skips and keeps going.
pub fn extract_product(
    anchor: ElementRef<'_>,
    catalog: &CatalogConfig,
) -> Result<ProductRecord, Skip> {
    let href = anchor.value().attr("href").unwrap_or("");
    if href.is_empty() {
        return Err(Skip::EmptyHref);
    }
    // A product href carries the products path plus a non-empty slug; the
    // listing root itself does not qualify.
    let has_slug = href
        .find(&catalog.products_path)
        .is_some_and(|idx| href.len() > idx + catalog.products_path.len());
    if !has_slug {
        return Err(Skip::NotProductPath);
    }
    let href_lower = href.to_lowercase();
    if href_lower.contains("categoria") || href_lower.contains("buscar") {
        return Err(Skip::NavigationLink);
    }

    let cleaned = clean_anchor_text(&anchor.text().collect::<String>());
    if cleaned.chars().count() < 3 {
        return Err(Skip::ShortText);
    }

    let link = absolutize(href, catalog);
    let (id, mut brand, name) = parse_identity(&cleaned, href);

    if brand.is_empty() || brand == GENERIC_BRAND_PLACEHOLDER {
        brand = brand_from_href(href, catalog)
            .unwrap_or_else(|| catalog.default_brand.clone());
    }

    let container = container_of(anchor);
    let (price_original, price_offer) = extract_prices(container);
    let image_url = extract_image(anchor, container, catalog);
    let stock = extract_stock(container);

    let container_text: String = container.map(|c| c.text().collect()).unwrap_or_default();
    let category = Category::classify(&format!("{name} {container_text}"));

    Ok(ProductRecord {
        id,
        name,
        brand,
        price_original,
        price_offer,
        stock,
        link,
        image_url,
        colors: Vec::new(),
        sizes: Vec::new(),
        category,
    })
}

/// Scrubs non-whitelisted characters and collapses whitespace.
fn clean_anchor_text(text: &str) -> String {
    let scrubbed = TEXT_CLEANUP_RE.replace_all(text, " ");
    WHITESPACE_RE.replace_all(&scrubbed, " ").trim().to_string()
}

/// Recovers `(id, brand, display name)` from the cleaned anchor text,
/// falling back to the href and finally to a text hash.
///
/// - `"1234 | Marca $..."` → id `1234`, brand `Marca`, name `"1234 | Marca"`.
/// - `"Texto | sin id"` → id `"0"`, brand/name from the text before any `$`.
/// - No pipe: id from the first digit run in the href, else
///   `hash(text) % 10000`; brand/name from the text before any `$`.
fn parse_identity(cleaned: &str, href: &str) -> (String, String, String) {
    if let Some((before, after)) = cleaned.split_once('|') {
        let candidate = before.trim();
        if is_numeric(candidate) {
            let brand = before_currency(after).to_string();
            let name = format!("{candidate} | {brand}");
            return (candidate.to_string(), brand, name);
        }
        let brand = before_currency(cleaned).to_string();
        return ("0".to_string(), brand.clone(), brand);
    }

    let id = DIGIT_RUN_RE
        .find(href)
        .map_or_else(|| hashed_id(cleaned), |m| m.as_str().to_string());

    let brand = before_currency(cleaned).to_string();
    let name = if brand.is_empty() {
        "Producto sin nombre".to_string()
    } else {
        brand.clone()
    };
    (id, brand, name)
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Everything up to the first currency symbol, trimmed.
fn before_currency(text: &str) -> &str {
    text.find('$').map_or(text, |i| &text[..i]).trim()
}

/// Deterministic pseudo-identifier in `0..10000` for anchors with no
/// recoverable id: SHA-256 of the lowercased cleaned text, reduced.
fn hashed_id(cleaned: &str) -> String {
    let digest = Sha256::digest(cleaned.to_lowercase().as_bytes());
    let mut value: u64 = 0;
    for byte in &digest[..8] {
        value = (value << 8) | u64::from(*byte);
    }
    (value % 10_000).to_string()
}

/// Normalizes an href to an absolute product URL: absolute kept as-is,
/// root-relative prefixed with the base origin, bare slugs prefixed with
/// the products path.
fn absolutize(href: &str, catalog: &CatalogConfig) -> String {
    let base = catalog.base_url.trim_end_matches('/');
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}{}{href}", catalog.products_path)
    }
}

/// Derives a brand from the first href path segment that is neither the
/// products segment nor numeric: hyphens become spaces, words title-cased.
fn brand_from_href(href: &str, catalog: &CatalogConfig) -> Option<String> {
    let products_segment = catalog.products_path.trim_matches('/');
    href.split('/')
        .find(|segment| {
            !segment.is_empty()
                && *segment != products_segment
                && !segment.starts_with("http")
                && !is_numeric(segment)
        })
        .map(|segment| title_case(&segment.replace('-', " ")))
        .filter(|brand| !brand.is_empty())
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Nearest structurally meaningful ancestor of the anchor, used for
/// contextual price/image/stock lookups.
fn container_of(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| matches!(el.value().name(), "div" | "article" | "section" | "li"))
}

/// Collects currency tokens from the container text in document order.
/// Two or more: (original, offer). Exactly one: the same value twice.
/// None: the unavailable sentinel twice.
fn extract_prices(container: Option<ElementRef<'_>>) -> (String, String) {
    let mut prices: Vec<String> = Vec::new();
    if let Some(container) = container {
        for text in container.text() {
            for token in PRICE_RE.find_iter(text) {
                prices.push(token.as_str().to_string());
            }
        }
    }

    match prices.as_slice() {
        [] => (
            ProductRecord::PRICE_UNAVAILABLE.to_string(),
            ProductRecord::PRICE_UNAVAILABLE.to_string(),
        ),
        [only] => (only.clone(), only.clone()),
        [original, offer, ..] => (original.clone(), offer.clone()),
    }
}

/// First `img` under the anchor, falling back to the container. Placeholder
/// data-URIs are rejected; relative sources are absolutized; anything else
/// yields an empty string.
fn extract_image(
    anchor: ElementRef<'_>,
    container: Option<ElementRef<'_>>,
    catalog: &CatalogConfig,
) -> String {
    let img = anchor
        .select(&IMG_SELECTOR)
        .next()
        .or_else(|| container.and_then(|c| c.select(&IMG_SELECTOR).next()));
    let Some(img) = img else {
        return String::new();
    };

    let src = IMG_SRC_ATTRS
        .iter()
        .filter_map(|attr| img.value().attr(attr))
        .find(|value| !value.is_empty());
    let Some(src) = src else {
        return String::new();
    };

    if src.contains("data:image/gif") {
        return String::new();
    }
    if src.starts_with("http") {
        src.to_string()
    } else if src.starts_with('/') {
        format!("{}{src}", catalog.base_url.trim_end_matches('/'))
    } else {
        String::new()
    }
}

/// First container text node carrying a stock marker wins; a generic
/// sold-out phrase anywhere in the container is the next check; otherwise
/// the product is assumed available.
fn extract_stock(container: Option<ElementRef<'_>>) -> String {
    let Some(container) = container else {
        return ProductRecord::STOCK_DEFAULT.to_string();
    };

    for text in container.text() {
        if STOCK_RE.is_match(text) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    let full_text: String = container.text().collect();
    if full_text.to_lowercase().contains("sin stock") {
        return ProductRecord::STOCK_SOLD_OUT.to_string();
    }

    ProductRecord::STOCK_DEFAULT.to_string()
}
