//! Curated text pools for caption generation.
//!
//! Carried as explicit data rather than module globals so alternative
//! decks (seasonal campaigns, another storefront) can be swapped in
//! without touching the assembly logic.

/// How many hashtags are drawn from each pool, in pool order:
/// trending, domain, brand, shopping.
pub const POOL_DRAWS: [usize; 4] = [3, 2, 2, 2];

/// Hard cap on hashtags in one caption.
pub const MAX_HASHTAGS: usize = 15;

/// Text pools and fixed lines for one storefront's captions.
#[derive(Debug, Clone)]
pub struct CopyDeck {
    /// Attention hooks; one is chosen per caption.
    pub hooks: &'static [&'static str],
    /// Calls to action; one is chosen per caption.
    pub ctas: &'static [&'static str],
    /// Benefit lines; one is chosen per caption.
    pub benefits: &'static [&'static str],
    pub trending_tags: &'static [&'static str],
    pub domain_tags: &'static [&'static str],
    pub brand_tags: &'static [&'static str],
    pub shopping_tags: &'static [&'static str],
    /// Product-name keyword → extra tags; first matching row wins.
    pub category_tags: &'static [(&'static str, &'static [&'static str])],
    /// Normalized brand names that never get their own hashtag.
    pub brand_tag_exclusions: &'static [&'static str],
    pub urgency_line_suffix: &'static str,
    pub available_line: &'static str,
    pub shipping_note: &'static str,
    /// Always appended after the mixed hashtag line.
    pub trailing_tags: &'static str,
}

impl Default for CopyDeck {
    fn default() -> Self {
        Self {
            hooks: &[
                "🚨 ESTO ES LO QUE NECESITABAS Y NO LO SABÍAS",
                "🔥 ATENCIÓN: Esto se está agotando rápido",
                "😍 OBSESIONADA con esta pieza nueva",
                "✨ POV: Encontraste LA pieza perfecta",
                "🤩 TODOS van a preguntar dónde lo compraste",
                "💖 PLOT TWIST: Te vas a enamorar",
                "🌟 BREAKING NEWS: Llegó tu nueva obsesión",
                "👑 QUEEN BEHAVIOR: Usar esto y sentirte INCREÍBLE",
            ],
            ctas: &[
                "💬 COMENTA tu emoji favorito",
                "❤️ DOBLE TAP si también te obsesionaste",
                "📲 COMPARTE con tu bestie que necesita esto",
                "🛒 GUARDÁ este post para comprarlo después",
                "👀 SEGUINOS para más must-haves como este",
                "🔄 COMPARTE en tu story si te gustó",
            ],
            benefits: &[
                "💕 Comodidad TODO EL DÍA",
                "🔥 Elegancia que se siente",
                "✨ Calidad PREMIUM",
                "👑 Te hace sentir REINA",
                "💖 Perfecto para cualquier ocasión",
            ],
            trending_tags: &[
                "#viral",
                "#fyp",
                "#trending",
                "#explore",
                "#viralreels",
                "#instagramreels",
                "#reelsviral",
                "#explorar",
                "#tendencia",
                "#2025trends",
                "#musthave",
                "#hottrend",
                "#instafamous",
            ],
            domain_tags: &[
                "#lencería",
                "#lingerie",
                "#underwear",
                "#ropainteriorfemenina",
                "#sensual",
                "#elegante",
                "#sexylingerie",
                "#intimates",
                "#bodypositive",
                "#confidence",
                "#empowerment",
                "#selflove",
            ],
            brand_tags: &[
                "#henko",
                "#henkolenceria",
                "#argentina",
                "#madeinargentina",
                "#calidad",
                "#comodidad",
                "#style",
                "#marcaargentina",
            ],
            shopping_tags: &[
                "#tiendaonline",
                "#shopping",
                "#compraonline",
                "#moda",
                "#fashion",
                "#style",
                "#outfit",
                "#ootd",
                "#shoponline",
                "#enviosatodoelpais",
                "#cuotas",
                "#descuentos",
            ],
            category_tags: &[
                ("soutien", &["#soutien", "#bra"]),
                ("body", &["#body", "#bodysuit"]),
                ("conjunto", &["#conjunto", "#set"]),
                ("bombacha", &["#bombacha"]),
            ],
            brand_tag_exclusions: &["henko", "henkolenceria", "producto"],
            urgency_line_suffix: "- ¡NO TE QUEDES SIN EL TUYO!",
            available_line: "✅ DISPONIBLE AHORA",
            shipping_note: "🚚 Envíos a todo el país",
            trailing_tags: "#henkolenceria #tiendaonline",
        }
    }
}
