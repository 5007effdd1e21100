use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("slug pattern is valid"));

const RESERVED_URL_CHARACTERS: &[char] = &[
    '!', '#', '$', '&', '\'', '(', ')', '*', ',', '/', ':', ';', '=', '?', '@', '[', ']', '"',
    '%', '.', '<', '>', '\\', '^', '_', '{', '}', '|', '~', '`', '+',
];

/// Turns a post title into its URL-safe slug.
///
/// Accents are folded to their base letter before anything outside
/// `[a-z0-9\s-]` is dropped, and whitespace becomes `-` last. The result only
/// ever contains `[a-z0-9-]`, so slugifying a slug returns it unchanged.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let folded = remove_diacritics(&lowered);
    let filtered = DISALLOWED.replace_all(&folded, "");
    let cleaned = remove_reserved_url_characters(&filtered);

    cleaned
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

fn remove_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

fn remove_reserved_url_characters(text: &str) -> String {
    text.chars()
        .filter(|c| !RESERVED_URL_CHARACTERS.contains(c))
        .collect()
}
