//! Scan-to-catalog classification.

use serde::Serialize;

use shelfscan_catalog::Product;

use crate::config::{EXACT_CONFIDENCE, MatchingConfig};

/// Outcome of matching one scanned label against a catalog.
///
/// Candidates borrow from the catalog slice and keep its relative order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult<'a> {
    /// Exactly one product identified by name.
    Exact {
        product: &'a Product,
        confidence: f64,
    },
    /// Several plausible products, or a single one from the weaker
    /// token-overlap pass. The caller should ask the user to pick.
    Ambiguous {
        candidates: Vec<&'a Product>,
        confidence: f64,
    },
    /// Nothing in the catalog relates to the text.
    None,
}

impl<'a> MatchResult<'a> {
    pub fn confidence(&self) -> Option<f64> {
        match self {
            MatchResult::Exact { confidence, .. } | MatchResult::Ambiguous { confidence, .. } => {
                Some(*confidence)
            }
            MatchResult::None => None,
        }
    }

    /// Matched products in catalog order (empty for `None`).
    pub fn products(&self) -> Vec<&'a Product> {
        match self {
            MatchResult::Exact { product, .. } => vec![*product],
            MatchResult::Ambiguous { candidates, .. } => candidates.clone(),
            MatchResult::None => Vec::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, MatchResult::None)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MatchResult::Exact { .. } => "exact",
            MatchResult::Ambiguous { .. } => "ambiguous",
            MatchResult::None => "none",
        }
    }
}

/// Classify raw OCR text against `catalog` with the default confidences.
///
/// See [`classify_match_with`].
pub fn classify_match<'a>(scan_text: &str, catalog: &'a [Product]) -> MatchResult<'a> {
    classify_match_with(scan_text, catalog, &MatchingConfig::default())
}

/// Classify raw OCR text against `catalog`.
///
/// Matching is case-insensitive on a trimmed copy of the text. Rules run in
/// order and stop at the first that finds anything:
///
/// 1. Blank text or an empty catalog is `None`.
/// 2. Names equal to, containing, or contained in the text. One hit is
///    `Exact`; more are `Ambiguous` at `config.ambiguous_confidence`.
/// 3. Names where every whitespace-separated token of the text is a
///    substring of the name, or the name a substring of the token. Any hit,
///    even a single one, is `Ambiguous` at `config.token_overlap_confidence`.
/// 4. Otherwise `None`.
pub fn classify_match_with<'a>(
    scan_text: &str,
    catalog: &'a [Product],
    config: &MatchingConfig,
) -> MatchResult<'a> {
    let search = scan_text.trim().to_lowercase();
    if search.is_empty() || catalog.is_empty() {
        return MatchResult::None;
    }

    let names: Vec<String> = catalog.iter().map(|p| p.name.to_lowercase()).collect();

    let mut hits = substring_hits(&search, catalog, &names);
    match hits.len() {
        0 => {}
        1 => {
            let product = hits.remove(0);
            tracing::debug!(product_id = %product.id, "label matched one product");
            return MatchResult::Exact {
                product,
                confidence: EXACT_CONFIDENCE,
            };
        }
        n => {
            tracing::debug!(candidates = n, "label matched several products");
            return MatchResult::Ambiguous {
                candidates: hits,
                confidence: config.ambiguous_confidence,
            };
        }
    }

    let hits = token_overlap_hits(&search, catalog, &names);
    if hits.is_empty() {
        tracing::debug!("label matched no product");
        return MatchResult::None;
    }

    tracing::debug!(candidates = hits.len(), "label matched by token overlap");
    MatchResult::Ambiguous {
        candidates: hits,
        confidence: config.token_overlap_confidence,
    }
}

fn substring_hits<'a>(search: &str, catalog: &'a [Product], names: &[String]) -> Vec<&'a Product> {
    catalog
        .iter()
        .zip(names)
        .filter(|(_, name)| name.contains(search) || search.contains(name.as_str()))
        .map(|(product, _)| product)
        .collect()
}

fn token_overlap_hits<'a>(
    search: &str,
    catalog: &'a [Product],
    names: &[String],
) -> Vec<&'a Product> {
    let tokens: Vec<&str> = search.split_whitespace().collect();

    catalog
        .iter()
        .zip(names)
        .filter(|(_, name)| {
            tokens
                .iter()
                .all(|token| name.contains(token) || token.contains(name.as_str()))
        })
        .map(|(product, _)| product)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AMBIGUOUS_CONFIDENCE, TOKEN_OVERLAP_CONFIDENCE};
    use chrono::Utc;
    use shelfscan_core::ProductId;

    fn product(id: &str, name: &str) -> Product {
        Product::new(ProductId::new(id).unwrap(), name, Utc::now())
    }

    fn catalog(names: &[&str]) -> Vec<Product> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| product(&(i + 1).to_string(), name))
            .collect()
    }

    fn names<'a>(products: &[&'a Product]) -> Vec<&'a str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn drinks() -> Vec<Product> {
        catalog(&["Coca Cola", "Pepsi", "Kit Kat"])
    }

    #[test]
    fn identical_text_is_exact() {
        let products = drinks();
        let result = classify_match("Coca Cola", &products);
        match result {
            MatchResult::Exact { product, confidence } => {
                assert_eq!(product.name, "Coca Cola");
                assert_eq!(confidence, 1.0);
            }
            other => panic!("expected Exact, got {other:?}"),
        }
    }

    #[test]
    fn case_insensitive_text_is_exact() {
        let products = drinks();
        let result = classify_match("coca cola", &products);
        assert_eq!(result.kind(), "exact");
        assert_eq!(names(&result.products()), ["Coca Cola"]);
    }

    #[test]
    fn substring_of_name_is_exact_when_unique() {
        let products = drinks();
        let result = classify_match("Cola", &products);
        assert_eq!(result.kind(), "exact");
        assert_eq!(names(&result.products()), ["Coca Cola"]);
    }

    #[test]
    fn name_inside_noisy_text_is_exact() {
        let products = drinks();
        let result = classify_match("  PEPSI max 330ml  ", &products);
        assert_eq!(names(&result.products()), ["Pepsi"]);
        assert_eq!(result.confidence(), Some(1.0));
    }

    #[test]
    fn several_substring_hits_are_ambiguous_in_catalog_order() {
        let products = catalog(&["Cola Zero", "Pepsi", "Coca Cola"]);
        let result = classify_match("cola", &products);
        match &result {
            MatchResult::Ambiguous { candidates, confidence } => {
                assert_eq!(names(candidates), ["Cola Zero", "Coca Cola"]);
                assert_eq!(*confidence, AMBIGUOUS_CONFIDENCE);
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let products = catalog(&["Pepsi", "Pepsi"]);
        let result = classify_match("pepsi", &products);
        assert_eq!(result.kind(), "ambiguous");
        assert_eq!(result.products().len(), 2);
        assert_eq!(result.products()[0].id.as_str(), "1");
        assert_eq!(result.products()[1].id.as_str(), "2");
    }

    #[test]
    fn reordered_words_fall_back_to_token_overlap() {
        let products = drinks();
        let result = classify_match("Cola Coca", &products);
        match &result {
            MatchResult::Ambiguous { candidates, confidence } => {
                assert_eq!(names(candidates), ["Coca Cola"]);
                assert_eq!(*confidence, TOKEN_OVERLAP_CONFIDENCE);
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn token_overlap_requires_every_token() {
        let products = drinks();
        assert!(classify_match("cola sprite", &products).is_none());
    }

    #[test]
    fn single_token_overlap_hit_is_still_ambiguous() {
        let products = catalog(&["Kit Kat Chunky", "Kat"]);
        let result = classify_match("chunky kit", &products);
        assert_eq!(result.kind(), "ambiguous");
        assert_eq!(names(&result.products()), ["Kit Kat Chunky"]);
        assert_eq!(result.confidence(), Some(TOKEN_OVERLAP_CONFIDENCE));
    }

    #[test]
    fn unrelated_text_is_none() {
        let products = drinks();
        let result = classify_match("Sprite", &products);
        assert!(result.is_none());
        assert!(result.products().is_empty());
        assert_eq!(result.confidence(), None);
    }

    #[test]
    fn blank_text_or_empty_catalog_is_none() {
        let products = drinks();
        assert!(classify_match("", &products).is_none());
        assert!(classify_match("   \t ", &products).is_none());
        assert!(classify_match("Coca Cola", &[]).is_none());
    }

    #[test]
    fn punctuation_only_text_is_none() {
        let products = drinks();
        assert!(classify_match("!!! ...", &products).is_none());
    }

    #[test]
    fn config_overrides_ambiguous_confidences() {
        let config = MatchingConfig::default()
            .with_ambiguous_confidence(0.8)
            .with_token_overlap_confidence(0.5);
        let products = catalog(&["Cola Zero", "Coca Cola"]);

        assert_eq!(classify_match_with("cola", &products, &config).confidence(), Some(0.8));
        assert_eq!(
            classify_match_with("zero cola", &products, &config).confidence(),
            Some(0.5)
        );
        assert_eq!(
            classify_match_with("coca cola", &products, &config).confidence(),
            Some(1.0)
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let products = drinks();
        let json = serde_json::to_value(classify_match("pepsi", &products)).unwrap();
        assert_eq!(json["kind"], "exact");
        assert_eq!(json["product"]["name"], "Pepsi");
        assert_eq!(json["confidence"], 1.0);

        let json = serde_json::to_value(classify_match("sprite", &products)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "none" }));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: same inputs give the same result, candidates included.
            #[test]
            fn classification_is_deterministic(
                text in "[a-z ]{0,16}",
                catalog_names in proptest::collection::vec("[a-z]{1,6}( [a-z]{1,6})?", 0..8)
            ) {
                let refs: Vec<&str> = catalog_names.iter().map(String::as_str).collect();
                let products = catalog(&refs);
                prop_assert_eq!(
                    classify_match(&text, &products),
                    classify_match(&text, &products)
                );
            }

            /// Property: candidates are a subsequence of the catalog.
            #[test]
            fn candidates_keep_catalog_order(
                text in "[a-z]{1,3}",
                catalog_names in proptest::collection::vec("[a-z]{1,6}", 1..10)
            ) {
                let refs: Vec<&str> = catalog_names.iter().map(String::as_str).collect();
                let products = catalog(&refs);
                let positions: Vec<usize> = classify_match(&text, &products)
                    .products()
                    .iter()
                    .map(|p| products.iter().position(|q| q.id == p.id).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }

            /// Property: never panics and never reports a stray confidence.
            #[test]
            fn any_text_classifies(text in "\\PC{0,32}") {
                let products = drinks();
                let result = classify_match(&text, &products);
                match result.confidence() {
                    None => prop_assert!(result.is_none()),
                    Some(c) => prop_assert!(
                        c == 1.0 || c == AMBIGUOUS_CONFIDENCE || c == TOKEN_OVERLAP_CONFIDENCE
                    ),
                }
            }
        }
    }
}
