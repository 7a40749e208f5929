//! Slug derivation for gallery URLs

use std::sync::LazyLock;

use regex::Regex;

/// Everything except ASCII word characters, whitespace and hyphens
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("slug character regex is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("hyphen regex is valid"));

/// Derive a URL slug from an artwork title.
///
/// Lowercases, strips anything that is not an ASCII word character,
/// whitespace or hyphen, turns whitespace runs into hyphens and collapses
/// repeated hyphens. Applying it to its own output changes nothing.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    HYPHEN_RUN.replace_all(&hyphenated, "-").into_owned()
}

/// Rebuild a candidate title from a slug (legacy lookup).
///
/// Lossy: punctuation and inner capitalisation of the original title
/// cannot be recovered.
pub fn slug_to_title(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
