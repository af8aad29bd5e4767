//! Text heuristics
//!
//! Pure keyword and character-class checks. All matching is case-insensitive
//! substring containment on lowercased text.

use crate::types::SearchResult;
use std::collections::BTreeSet;

/// Markers that make an idea read as a joke or provocation
const ABSURD_MARKERS: &[&str] = &[
    "weapon",
    "naked",
    "nude",
    "explode",
    "explosive",
    "bomb",
    "poison",
    "flamethrower",
    "underwear",
    "toilet",
];

const FOOD_KEYWORDS: &[&str] = &[
    "food", "pizza", "pineapple", "fruit", "banana", "cheese", "recipe", "cooking", "meal",
    "snack", "burger", "sandwich", "coffee", "vegetable", "restaurant", "kitchen",
];

const SOCIAL_KEYWORDS: &[&str] = &[
    "social", "dating", "friend", "women", "community", "followers", "influencer", "chat",
    "family", "neighbor", "people",
];

const MECHANICAL_KEYWORDS: &[&str] = &[
    "device", "machine", "robot", "engine", "gadget", "motor", "gear", "drone", "mechanical",
    "contraption", "hydraulic",
];

/// Signals of informational content rather than a product page
const BLOG_SIGNALS: &[&str] = &[
    "blog",
    "article",
    "how to",
    "tutorial",
    "guide",
    "tips",
    "news",
    "review",
    "list of",
    "top 10",
    "best ",
    "what is",
    "ideas for",
    "wikipedia",
];

/// Signals of a real product or company
const PRODUCT_SIGNALS: &[&str] = &[
    "app",
    "platform",
    "software",
    "tool",
    "service",
    "startup",
    "company",
    "product",
    "download",
    "sign up",
    "pricing",
    "free trial",
    "get started",
    "official",
];

/// Iterate maximal runs of alphabetic characters
fn alpha_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphabetic()).filter(|w| !w.is_empty())
}

/// Word-count / symbol-density gibberish check
///
/// True when at most two alphabetic words of three or more letters are
/// present, or when more than 30% of characters are neither alphanumeric nor
/// whitespace.
pub fn is_gibberish_symbols(idea: &str) -> bool {
    let long_words = alpha_words(idea).filter(|w| w.chars().count() >= 3).count();
    if long_words <= 2 {
        return true;
    }

    let total = idea.chars().count();
    let symbols = idea
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();
    total > 0 && symbols as f64 / total as f64 > 0.3
}

/// Alphabetic-density gibberish check
///
/// True when fewer than 60% of the non-whitespace characters are letters.
pub fn is_gibberish_alpha_ratio(idea: &str) -> bool {
    let visible: Vec<char> = idea.chars().filter(|c| !c.is_whitespace()).collect();
    if visible.is_empty() {
        return true;
    }
    let letters = visible.iter().filter(|c| c.is_alphabetic()).count();
    (letters as f64 / visible.len() as f64) < 0.6
}

/// Either gibberish variant
pub fn is_gibberish(idea: &str) -> bool {
    is_gibberish_symbols(idea) || is_gibberish_alpha_ratio(idea)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Absurd marker present, or keywords from at least two of the food /
/// social / mechanical domains
pub fn is_absurd_or_composite(idea: &str) -> bool {
    let lower = idea.to_lowercase();
    if contains_any(&lower, ABSURD_MARKERS) {
        return true;
    }

    let domains_hit = [FOOD_KEYWORDS, SOCIAL_KEYWORDS, MECHANICAL_KEYWORDS]
        .iter()
        .filter(|keywords| contains_any(&lower, keywords))
        .count();
    domains_hit >= 2
}

/// Lowercase alphabetic words of four or more letters
pub fn idea_keywords(idea: &str) -> BTreeSet<String> {
    alpha_words(idea)
        .filter(|w| w.chars().count() >= 4)
        .map(|w| w.to_lowercase())
        .collect()
}

/// At least two idea keywords appear in the result's title + description
pub fn is_result_relevant(idea: &str, result: &SearchResult) -> bool {
    let keywords = idea_keywords(idea);
    if keywords.is_empty() {
        return false;
    }
    let haystack = result.haystack();
    keywords.iter().filter(|k| haystack.contains(k.as_str())).count() >= 2
}

/// Product/company page rather than an article
///
/// Any blog signal disqualifies. Without a product signal the result is not
/// treated as a product either.
pub fn looks_like_real_product(result: &SearchResult) -> bool {
    let haystack = result.haystack();
    if contains_any(&haystack, BLOG_SIGNALS) {
        return false;
    }
    contains_any(&haystack, PRODUCT_SIGNALS)
}
