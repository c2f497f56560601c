/// Decide whether a match is confident enough to skip user confirmation.
///
/// True iff `confidence >= threshold`. A NaN on either side never passes.
/// Use [`crate::DEFAULT_AUTO_ADD_THRESHOLD`] when the caller has no threshold
/// of its own.
pub fn should_auto_add(confidence: f64, threshold: f64) -> bool {
    confidence >= threshold
}
