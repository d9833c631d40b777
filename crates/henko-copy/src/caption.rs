//! Caption assembly.

use henko_core::ProductRecord;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::deck::{CopyDeck, MAX_HASHTAGS, POOL_DRAWS};

/// Generates one promotional caption for `product`.
///
/// Uniformly picks a hook, a benefit, and a call-to-action; frames stock
/// urgency off the record's stock text; mixes hashtags from the deck's
/// pools plus name- and brand-derived extras, capped at
/// [`MAX_HASHTAGS`]. Deterministic for a fixed rng seed.
pub fn generate_caption<R: Rng + ?Sized>(
    product: &ProductRecord,
    deck: &CopyDeck,
    rng: &mut R,
) -> String {
    let hook = deck.hooks.choose(rng).copied().unwrap_or("");
    let cta = deck.ctas.choose(rng).copied().unwrap_or("");
    let benefit = deck.benefits.choose(rng).copied().unwrap_or("");

    let stock_line = stock_line(product, deck);
    let hashtags = select_hashtags(product, deck, rng).join(" ");

    format!(
        "{hook}\n\n✨ {} ✨\n\n{benefit}\n{stock_line}\n\n💰 {}\n{}\n\n{cta}\n\n{hashtags}\n\n{}",
        product.name.to_uppercase(),
        product.price_offer,
        deck.shipping_note,
        deck.trailing_tags,
    )
}

/// Urgency framing when the stock text itself signals scarcity, otherwise
/// the generic availability line.
fn stock_line(product: &ProductRecord, deck: &CopyDeck) -> String {
    let stock_lower = product.stock.to_lowercase();
    if stock_lower.contains("stock") || stock_lower.contains("queda") {
        format!("⚡ {} {}", product.stock, deck.urgency_line_suffix)
    } else {
        deck.available_line.to_string()
    }
}

/// Draws the mixed hashtag set: fixed counts from each pool (without
/// replacement), a category row keyed off the product name, a tag derived
/// from the brand unless excluded, then a shuffle and the cap.
fn select_hashtags<R: Rng + ?Sized>(
    product: &ProductRecord,
    deck: &CopyDeck,
    rng: &mut R,
) -> Vec<String> {
    let pools = [
        deck.trending_tags,
        deck.domain_tags,
        deck.brand_tags,
        deck.shopping_tags,
    ];
    let mut tags: Vec<String> = Vec::new();
    for (pool, draws) in pools.into_iter().zip(POOL_DRAWS) {
        tags.extend(
            pool.choose_multiple(rng, draws)
                .map(|tag| (*tag).to_string()),
        );
    }

    // Independent keyword pass over the name; does not reuse the record's
    // category field.
    let name_lower = product.name.to_lowercase();
    for (keyword, extra) in deck.category_tags {
        if name_lower.contains(keyword) {
            tags.extend(extra.iter().map(|tag| (*tag).to_string()));
            break;
        }
    }

    if product.brand.chars().count() > 3 {
        let normalized: String = product
            .brand
            .to_lowercase()
            .chars()
            .filter(|c| *c != ' ' && *c != '-')
            .collect();
        if !deck.brand_tag_exclusions.contains(&normalized.as_str()) {
            tags.push(format!("#{normalized}"));
        }
    }

    tags.shuffle(rng);
    tags.truncate(MAX_HASHTAGS);
    tags
}

#[cfg(test)]
mod tests {
    use henko_core::Category;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn make_product(name: &str, brand: &str, stock: &str) -> ProductRecord {
        ProductRecord {
            id: "1234".to_string(),
            name: name.to_string(),
            brand: brand.to_string(),
            price_original: "$4.500".to_string(),
            price_offer: "$3.900".to_string(),
            stock: stock.to_string(),
            link: "https://shop.example/productos/item-1234".to_string(),
            image_url: String::new(),
            colors: vec![],
            sizes: vec![],
            category: Category::Generic,
        }
    }

    #[test]
    fn caption_always_contains_the_offer_price() {
        let product = make_product("1234 | Marcela Koury", "Marcela Koury", "Disponible");
        let mut rng = StdRng::seed_from_u64(1);
        let caption = generate_caption(&product, &CopyDeck::default(), &mut rng);
        assert!(caption.contains("$3.900"));
    }

    #[test]
    fn caption_contains_uppercased_name_and_shipping_note() {
        let product = make_product("1234 | Marcela Koury", "Marcela Koury", "Disponible");
        let mut rng = StdRng::seed_from_u64(1);
        let caption = generate_caption(&product, &CopyDeck::default(), &mut rng);
        assert!(caption.contains("✨ 1234 | MARCELA KOURY ✨"));
        assert!(caption.contains("🚚 Envíos a todo el país"));
        assert!(caption.ends_with("#henkolenceria #tiendaonline"));
    }

    #[test]
    fn caption_is_deterministic_under_a_fixed_seed() {
        let product = make_product("1234 | Marcela Koury", "Marcela Koury", "Disponible");
        let deck = CopyDeck::default();
        let a = generate_caption(&product, &deck, &mut StdRng::seed_from_u64(99));
        let b = generate_caption(&product, &deck, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn scarce_stock_text_triggers_urgency_framing() {
        let product = make_product("1234 | Marca", "Marca", "¡Quedan 2 unidades!");
        let deck = CopyDeck::default();
        let line = stock_line(&product, &deck);
        assert!(line.starts_with("⚡ ¡Quedan 2 unidades!"));
        assert!(line.ends_with("¡NO TE QUEDES SIN EL TUYO!"));
    }

    #[test]
    fn quiet_stock_text_uses_available_line() {
        let product = make_product("1234 | Marca", "Marca", "Disponible");
        let deck = CopyDeck::default();
        assert_eq!(stock_line(&product, &deck), "✅ DISPONIBLE AHORA");
    }

    #[test]
    fn hashtags_never_exceed_the_cap() {
        // Name hits a category row and the brand adds a tag: worst case
        // 9 pool draws + 2 category + 1 brand = 12; pad with the longest
        // category row and assert the cap anyway across many seeds.
        let product = make_product("Soutien armado push up", "Marcela Koury", "Disponible");
        let deck = CopyDeck::default();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let tags = select_hashtags(&product, &deck, &mut rng);
            assert!(tags.len() <= MAX_HASHTAGS, "seed {seed}: {} tags", tags.len());
            assert!(tags.iter().all(|t| t.starts_with('#')));
        }
    }

    #[test]
    fn hashtags_are_drawn_without_replacement() {
        let product = make_product("Portaligas", "Selu", "Disponible");
        let deck = CopyDeck::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut tags = select_hashtags(&product, &deck, &mut rng);
        // "#style" appears in two pools, so one legitimate duplicate is
        // possible; sort and count to catch triples or same-pool repeats.
        tags.sort_unstable();
        for window in tags.windows(3) {
            assert!(
                !(window[0] == window[1] && window[1] == window[2]),
                "tag drawn three times: {}",
                window[0]
            );
        }
    }

    #[test]
    fn category_tags_follow_the_product_name() {
        let product = make_product("Soutien taza soft", "Marca Nueva", "Disponible");
        let deck = CopyDeck::default();
        let mut rng = StdRng::seed_from_u64(5);
        let tags = select_hashtags(&product, &deck, &mut rng);
        assert!(tags.contains(&"#soutien".to_string()));
        assert!(tags.contains(&"#bra".to_string()));
    }

    #[test]
    fn brand_tag_is_normalized_and_appended() {
        let product = make_product("Portaligas", "Marcela Koury", "Disponible");
        let deck = CopyDeck::default();
        let mut rng = StdRng::seed_from_u64(5);
        let tags = select_hashtags(&product, &deck, &mut rng);
        assert!(tags.contains(&"#marcelakoury".to_string()));
    }

    #[test]
    fn excluded_and_short_brands_get_no_tag() {
        // "Producto" is on the exclusion list; "Ana" is too short. (The
        // deck's own "#henko"-style pool tags can be drawn legitimately,
        // so excluded brands whose tags shadow pool entries are not
        // asserted here.)
        let deck = CopyDeck::default();
        for brand in ["Producto", "Ana"] {
            let product = make_product("Portaligas", brand, "Disponible");
            let mut rng = StdRng::seed_from_u64(5);
            let tags = select_hashtags(&product, &deck, &mut rng);
            let derived = format!("#{}", brand.to_lowercase());
            assert!(
                !tags.contains(&derived),
                "brand '{brand}' must not produce its own tag"
            );
        }
    }
}
