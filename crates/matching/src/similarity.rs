//! Normalized edit-distance similarity.
//!
//! Lengths and edits are counted in Unicode scalar values (`char`s), so a
//! multi-byte character is one edit. No case folding happens here.

/// Levenshtein distance: minimum number of single-character insertions,
/// deletions and substitutions turning `a` into `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Similarity in `[0.0, 1.0]`: `(len(longer) - distance) / len(longer)`.
///
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("test", "test"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("", "abc"), 0.0);
    }

    #[test]
    fn kitten_sitting() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        let score = similarity("kitten", "sitting");
        assert!(score > 0.5 && score < 1.0, "got {score}");
        assert!((score - 4.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn case_is_significant() {
        assert_eq!(levenshtein("Cola", "cola"), 1);
        assert!((similarity("Cola", "cola") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(levenshtein("crème", "creme"), 1);
        assert!((similarity("crème", "creme") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn ocr_noise_scores_high() {
        assert!(similarity("coca co1a", "coca cola") > 0.85);
    }

    proptest! {
        #[test]
        fn score_is_shared_length_fraction(a in "\\PC{0,24}", b in "\\PC{0,24}") {
            let longer = a.chars().count().max(b.chars().count());
            let expected = if longer == 0 {
                1.0
            } else {
                (longer - levenshtein(&a, &b)) as f64 / longer as f64
            };
            prop_assert!((similarity(&a, &b) - expected).abs() < 1e-12);
        }

        #[test]
        fn distance_never_exceeds_longer_length(a in "\\PC{0,24}", b in "\\PC{0,24}") {
            let longer = a.chars().count().max(b.chars().count());
            prop_assert!(levenshtein(&a, &b) <= longer);
        }

        #[test]
        fn bounded_and_symmetric(a in "[a-z ]{0,24}", b in "[a-z ]{0,24}") {
            let ab = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&ab));
            prop_assert_eq!(ab, similarity(&b, &a));
        }

        #[test]
        fn self_similarity_is_one(a in "\\PC{0,24}") {
            prop_assert_eq!(similarity(&a, &a), 1.0);
        }
    }
}
