pub mod client;
pub mod error;
pub mod extract;
pub mod harvest;
pub mod pagination;
pub mod sample;

pub use client::ListingClient;
pub use error::ScraperError;
pub use extract::{extract_product, Skip};
pub use harvest::{harvest_document, harvest_page, Harvest};
pub use sample::sample_products;
