// Trust score derivation.
//
// The trust score is either a fixed constant or a linear transform of the
// sentiment model's polarity and confidence:
//
//   POSITIVE -> 0.75 + confidence / 4   (0.75 ..= 1.0)
//   NEGATIVE -> 0.25 - confidence / 4   (0.0  ..= 0.25)
//   other    -> 0.5
//
// The result is always clamped to [0, 1].

use crate::classifier::traits::Prediction;

/// Trust score used when no sentiment model is consulted.
pub const DEFAULT_TRUST_SCORE: f64 = 0.5;

/// How the trust score is obtained for a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustMode {
    /// Always DEFAULT_TRUST_SCORE; the sentiment model is never invoked
    Default,
    /// Derived from the sentiment model's prediction
    Sentiment,
}

impl TrustMode {
    /// Interpret an answer to the "use default trust score?" prompt.
    ///
    /// Only "yes" (ignoring surrounding whitespace and case) selects the
    /// default; any other answer, including "y" or an empty line, does not.
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim().to_lowercase() == "yes" {
            TrustMode::Default
        } else {
            TrustMode::Sentiment
        }
    }
}

/// Map a sentiment prediction to a trust score in [0, 1].
///
/// Labels are matched exactly: "positive" in lower case counts as "other".
pub fn trust_from_sentiment(prediction: &Prediction) -> f64 {
    let score = match prediction.label.as_str() {
        "POSITIVE" => 0.75 + prediction.score / 4.0,
        "NEGATIVE" => 0.25 - prediction.score / 4.0,
        _ => DEFAULT_TRUST_SCORE,
    };
    score.clamp(0.0, 1.0)
}
