use regex::Regex;
use std::sync::LazyLock;

static URL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https\S+|http\S+|www\S+").unwrap());
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Normalizes text before vectorization: lowercase, no URL tokens, no ASCII
/// punctuation, no digits, single spaces, trimmed.
pub fn clean_text(text: &str) -> String {
    let mut current = text.to_lowercase();

    // Stripping punctuation or digits can glue fragments into a new URL-like
    // token ("ht.tp" -> "http"), so strip until nothing else matches.
    loop {
        let next = strip_once(&current);
        if next == current {
            break;
        }
        current = next;
    }

    collapse_whitespace(&current)
}

fn strip_once(text: &str) -> String {
    let without_urls = URL_TOKEN.replace_all(text, "");
    let without_punctuation: String = without_urls
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    DIGITS.replace_all(&without_punctuation, "").into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
