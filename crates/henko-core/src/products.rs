use serde::{Deserialize, Serialize};

/// A product harvested from one listing-page anchor, normalized for
/// selection, caption generation, and history recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Dedup token. `"0"` when the anchor text carried no numeric id, or a
    /// hash-derived value in `0..10000` as a last resort. Not unique across
    /// the catalog — only meaningful for within-harvest deduplication.
    pub id: String,
    /// Display label derived from the anchor text, e.g. `"1234 | Marcela Koury"`.
    pub name: String,
    /// Vendor label; the catalog's own brand when nothing better is found.
    pub brand: String,
    /// Pre-sale price exactly as printed on the page, e.g. `"$4.500"`.
    /// [`ProductRecord::PRICE_UNAVAILABLE`] when no price token was found.
    pub price_original: String,
    /// Sale price; equals `price_original` when the page shows one price.
    pub price_offer: String,
    /// Free-text stock indicator from the listing markup.
    pub stock: String,
    /// Absolute URL of the product page.
    pub link: String,
    /// Absolute image URL, or empty when only a placeholder was present.
    pub image_url: String,
    /// Not extracted by the listing scraper; kept as stable serialized
    /// fields so downstream consumers don't break when extraction lands.
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub category: Category,
}

impl ProductRecord {
    /// Sentinel for both price fields when the container shows no price.
    pub const PRICE_UNAVAILABLE: &'static str = "Consultar";
    /// Default stock text when the container carries no stock markers.
    pub const STOCK_DEFAULT: &'static str = "Disponible";
    /// Stock text when the container says the product is sold out.
    pub const STOCK_SOLD_OUT: &'static str = "Sin stock";

    /// Returns `true` when the record carries a real (non-placeholder) image.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Dedup key within one harvest: the id when it is purely numeric,
    /// otherwise the link string.
    #[must_use]
    pub fn dedup_key(&self) -> &str {
        if !self.id.is_empty() && self.id.chars().all(|c| c.is_ascii_digit()) {
            &self.id
        } else {
            &self.link
        }
    }
}

/// Closed category taxonomy for the storefront.
///
/// Assigned by keyword match over combined anchor + container text; see
/// [`Category::classify`]. `Display` renders the storefront's own Spanish
/// labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Generic,
    Bra,
    Bodysuit,
    Set,
    Panty,
    Socks,
    Sleepwear,
}

/// Keyword groups in classification priority order. First group whose any
/// term appears in the text wins.
const CATEGORY_KEYWORDS: [(&[&str], Category); 6] = [
    (&["soutien", "corpiño", "bra"], Category::Bra),
    (&["body", "bodysuit"], Category::Bodysuit),
    (&["conjunto", "set"], Category::Set),
    (&["bombacha", "calzón"], Category::Panty),
    (&["media", "calcetín"], Category::Socks),
    (&["camisón", "pijama"], Category::Sleepwear),
];

impl Category {
    /// Classifies free text into a category.
    ///
    /// Pure function of the lowercased input: keyword groups are tested in
    /// a fixed priority order (bra terms first, sleepwear last) and the
    /// first matching group wins. Text matching no group is [`Category::Generic`].
    #[must_use]
    pub fn classify(text: &str) -> Category {
        let lower = text.to_lowercase();
        for (terms, category) in CATEGORY_KEYWORDS {
            if terms.iter().any(|term| lower.contains(term)) {
                return category;
            }
        }
        Category::Generic
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Generic => write!(f, "Lencería"),
            Category::Bra => write!(f, "Soutien"),
            Category::Bodysuit => write!(f, "Body"),
            Category::Set => write!(f, "Conjunto"),
            Category::Panty => write!(f, "Bombacha"),
            Category::Socks => write!(f, "Medias"),
            Category::Sleepwear => write!(f, "Pijamas"),
        }
    }
}
