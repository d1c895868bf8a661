use crate::error::TriageError;

/// Confidence of the predicted class, taken from the classifier's
/// class-probability vector.
///
/// For the two-class model this is the probability of the predicted class.
/// Returns `None` when the model produced no probabilities.
pub fn confidence_from_probabilities(probabilities: &[f64]) -> Result<Option<f64>, TriageError> {
    let mut best: Option<f64> = None;
    for &p in probabilities {
        validate_confidence(p)?;
        best = Some(best.map_or(p, |b| b.max(p)));
    }
    Ok(best)
}

/// Reject scores outside [0, 1], including NaN and infinities.
pub(crate) fn validate_confidence(score: f64) -> Result<f64, TriageError> {
    if score.is_finite() && (0.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(TriageError::InvalidConfidence(score))
    }
}
