use museo::shared::fuzzy;

#[test]
fn fuzzy_empty_vs_empty() {
    let dist = fuzzy::distance("", "");
    assert_eq!(dist, 0);
}

#[test]
fn fuzzy_empty_vs_nonempty() {
    let dist = fuzzy::distance("", "abc");
    assert_eq!(dist, 3);
}

#[test]
fn fuzzy_nonempty_vs_empty() {
    let dist = fuzzy::distance("abc", "");
    assert_eq!(dist, 3);
}

#[test]
fn fuzzy_completely_different() {
    let dist = fuzzy::distance("kitten", "orange");
    assert_eq!(dist, 6);
}

#[test]
fn fuzzy_substitution() {
    let dist = fuzzy::distance("cat", "cut");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_insertion() {
    let dist = fuzzy::distance("cat", "cart");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_deletion() {
    let dist = fuzzy::distance("cart", "cat");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_unicode_distinct() {
    let dist = fuzzy::distance("musée", "musee");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_longer_sequence() {
    let dist = fuzzy::distance("intention", "execution");
    assert_eq!(dist, 5);
}

#[test]
fn normalize_collapses_case_and_punctuation() {
    assert_eq!(fuzzy::normalize("  Musée   du LOUVRE "), "musée du louvre");
    assert_eq!(fuzzy::normalize("Tate-Modern, London"), "tate modern london");
    assert_eq!(fuzzy::normalize("Musée d'Orsay"), "musée d'orsay");
    assert_eq!(fuzzy::normalize("   "), "");
}

#[test]
fn score_exact_and_prefix_hits() {
    assert_eq!(fuzzy::score("rijksmuseum", "rijksmuseum"), 1.0);
    assert_eq!(fuzzy::score("rijks", "rijksmuseum"), 1.0);
    assert_eq!(fuzzy::score("louvre musée", "musée du louvre"), 1.0);
}

#[test]
fn score_typos_rank_below_exact() {
    let typo = fuzzy::score("lovre", "musée du louvre");
    let miss = fuzzy::score("xyz", "musée du louvre");
    assert!(typo > 0.5);
    assert!(typo <= 1.0);
    assert!(miss < typo);
    assert_eq!(fuzzy::score("", "musée du louvre"), 0.0);
}
