//! Promotional caption generation.
//!
//! Given one harvested product record, composes an Instagram-style caption
//! from curated text pools: a hook, a benefit, a stock-urgency line, a
//! call-to-action, and a mixed hashtag set. Pure over the record, the
//! [`CopyDeck`], and an injected random source — seed the rng and the
//! output is deterministic.

mod caption;
mod deck;

pub use caption::generate_caption;
pub use deck::CopyDeck;
