//! The daily cycle: sample the catalog, pick a product, generate the
//! caption, deliver it, and record the send.
//!
//! Failures inside the cycle are logged and the cycle degrades or skips;
//! nothing here brings the process down. Only setup errors (a broken HTTP
//! client, an invalid base URL) propagate to the caller.

use henko_copy::{generate_caption, CopyDeck};
use henko_core::{BotConfig, HistoryStore, ProductRecord, SendEvent, DEFAULT_HISTORY_CAP};
use henko_scraper::{sample_products, ListingClient};
use henko_telegram::TelegramClient;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Runs one full scrape-and-send cycle.
///
/// # Errors
///
/// Returns an error only when the scraper or Telegram client cannot be
/// constructed; delivery and history failures are logged per round.
pub async fn run_cycle(config: &BotConfig) -> anyhow::Result<()> {
    tracing::info!("starting daily product cycle");

    let client = ListingClient::new(&config.catalog)?;
    let telegram = build_telegram(config)?;
    let history = HistoryStore::new(config.history_path.clone(), DEFAULT_HISTORY_CAP);
    let deck = CopyDeck::default();
    let mut rng = StdRng::from_os_rng();

    let pool = sample_products(
        &client,
        &config.catalog,
        config.catalog.pool_size as usize,
        &mut rng,
    )
    .await;
    if pool.is_empty() {
        tracing::error!("no products harvested; skipping cycle");
        return Ok(());
    }
    tracing::info!(pool = pool.len(), "sampling pool assembled");

    for round in 0..config.products_per_day {
        let Some(product) = pool.choose(&mut rng) else {
            break;
        };
        tracing::info!(round, name = %product.name, link = %product.link, "selected product");

        let caption = generate_caption(product, &deck, &mut rng);
        let message = frame_message(product, &caption);

        match &telegram {
            Some(telegram) => {
                let delivery = if product.has_image() {
                    telegram.send_photo(&product.image_url, &message).await
                } else {
                    telegram.send_message(&message).await
                };
                if let Err(e) = delivery {
                    tracing::error!(round, error = %e, "failed to deliver daily product");
                    continue;
                }
            }
            None => {
                tracing::warn!("telegram is not configured; printing the message instead");
                println!("{message}");
            }
        }

        if let Err(e) = history.append(SendEvent::for_product(product, caption)) {
            tracing::error!(error = %e, "failed to record send history");
        }
    }

    Ok(())
}

/// Builds the Telegram client when credentials are configured.
fn build_telegram(config: &BotConfig) -> anyhow::Result<Option<TelegramClient>> {
    if !config.is_telegram_configured() {
        tracing::warn!("telegram credentials are placeholders; delivery disabled");
        return Ok(None);
    }
    let client = TelegramClient::new(
        &config.telegram_token,
        &config.chat_id,
        config.catalog.request_timeout_secs,
    )?;
    Ok(Some(client))
}

/// Wraps the Instagram caption in the Telegram message frame with the
/// direct product link.
fn frame_message(product: &ProductRecord, caption: &str) -> String {
    format!(
        "🛍️ **PRODUCTO DEL DÍA - HENKO LENCERÍA**\n\n{caption}\n\n🔗 **Link directo**: {}\n\n---\n*Copy listo para Instagram ⬆️*\n*¡Solo copiá y pegá!* 📋",
        product.link
    )
}

#[cfg(test)]
mod tests {
    use henko_core::Category;

    use super::*;

    #[test]
    fn frame_includes_caption_and_link() {
        let product = ProductRecord {
            id: "1234".to_string(),
            name: "1234 | Marca".to_string(),
            brand: "Marca".to_string(),
            price_original: "$100".to_string(),
            price_offer: "$80".to_string(),
            stock: ProductRecord::STOCK_DEFAULT.to_string(),
            link: "https://shop.example/productos/item-1234".to_string(),
            image_url: String::new(),
            colors: vec![],
            sizes: vec![],
            category: Category::Generic,
        };
        let message = frame_message(&product, "caption de prueba");
        assert!(message.starts_with("🛍️ **PRODUCTO DEL DÍA"));
        assert!(message.contains("caption de prueba"));
        assert!(message.contains("https://shop.example/productos/item-1234"));
    }
}
