//! Query relevance scoring
//!
//! Queries are split into ASCII alphanumeric words and runs of CJK unified
//! ideographs. A page earns two hits per token found in its title, or one hit
//! when the token only appears in the body, plus a small bonus for length.

/// Characters of content that earn the full length bonus
const LENGTH_BONUS_CHARS: f64 = 5000.0;

/// Cap on the length bonus
const MAX_LENGTH_BONUS: f64 = 0.2;

fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if !current.is_empty() {
        let token = std::mem::take(current);
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
}

/// Splits a query into unique lowercase tokens in first-seen order
///
/// A token is a maximal run of Han characters or a maximal run of ASCII
/// letters/digits; everything else separates tokens.
///
/// # Examples
///
/// ```
/// use sga_site_crawler::crawler::tokenize;
///
/// assert_eq!(tokenize("Rust async, rust!"), vec!["rust", "async"]);
/// assert_eq!(tokenize("爬虫crawler"), vec!["爬虫", "crawler"]);
/// ```
pub fn tokenize(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_is_han = false;

    for c in lowered.chars() {
        let han = is_han(c);
        if !han && !is_ascii_word(c) {
            flush(&mut current, &mut tokens);
            continue;
        }
        if !current.is_empty() && han != current_is_han {
            flush(&mut current, &mut tokens);
        }
        current_is_han = han;
        current.push(c);
    }
    flush(&mut current, &mut tokens);

    tokens
}

/// Scores a page against query tokens, rounded to three decimals
///
/// Returns 0 when there are no tokens. Otherwise the base is
/// `hits / (2 * tokens)` and the bonus is `min(chars / 5000, 0.2)`.
pub fn score(tokens: &[String], title: &str, content: &str) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let title = title.to_lowercase();
    let body = content.to_lowercase();

    let hits: usize = tokens
        .iter()
        .map(|token| {
            if title.contains(token.as_str()) {
                2
            } else if body.contains(token.as_str()) {
                1
            } else {
                0
            }
        })
        .sum();

    let base = hits as f64 / (2.0 * tokens.len() as f64);
    let bonus = (content.chars().count() as f64 / LENGTH_BONUS_CHARS).min(MAX_LENGTH_BONUS);

    ((base + bonus) * 1000.0).round() / 1000.0
}
