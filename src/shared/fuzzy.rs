use std::cmp;

/// Levenshtein edit distance counted in chars.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Only the previous row of the matrix is ever read
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];
    for (i, ac) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let sub_cost = usize::from(ac != bc);
            current[j + 1] = cmp::min(
                cmp::min(previous[j + 1] + 1, current[j] + 1),
                previous[j] + sub_cost,
            );
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Lowercases and collapses runs of whitespace and punctuation into single spaces.
pub fn normalize(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || (c.is_ascii_punctuation() && c != '\''))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity between a normalized needle and a normalized hay, in `0.0..=1.0`.
/// Every needle token is matched against its best hay token, so word order
/// does not matter ("louvre musee" finds "musee du louvre").
pub fn score(needle: &str, hay: &str) -> f64 {
    let hay_tokens: Vec<_> = hay.split_whitespace().collect();
    let needle_tokens: Vec<_> = needle.split_whitespace().collect();
    if needle_tokens.is_empty() || hay_tokens.is_empty() {
        return 0.0;
    }

    let total: f64 = needle_tokens
        .iter()
        .map(|needle_token| {
            hay_tokens
                .iter()
                .map(|hay_token| token_score(needle_token, hay_token))
                .fold(0.0, f64::max)
        })
        .sum();
    total / needle_tokens.len() as f64
}

fn token_score(needle: &str, hay: &str) -> f64 {
    // Typing "rijks" should already hit "rijksmuseum"
    if hay.starts_with(needle) {
        return 1.0;
    }
    let dist = distance(needle, hay);
    let longest = cmp::max(needle.chars().count(), hay.chars().count());
    1.0 - dist as f64 / longest as f64
}
