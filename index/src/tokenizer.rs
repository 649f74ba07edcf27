use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex =
        Regex::new(r"(?u)[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*").expect("valid regex");
}

/// Split `text` into word tokens, preserving case; the index owns case
/// folding and stop-word filtering.
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}
