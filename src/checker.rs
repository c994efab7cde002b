// Toxicity checker: runs text through the classifiers and maps the outputs
// to a ClassificationResult.
//
// The checker owns its classifiers for its whole lifetime, so callers that
// check many texts load the models once.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::classifier::traits::TextClassifier;
use crate::scoring::trust::{trust_from_sentiment, TrustMode, DEFAULT_TRUST_SCORE};
use crate::scoring::verdict::{is_toxic_label, ToxicityVerdict, TrustLabel, TrustVerdict};

/// Everything computed for one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Confidence of the toxicity model's top label
    pub toxicity_score: f64,
    /// Top toxicity label, lower-cased
    pub toxicity_label: String,
    pub toxicity_verdict: ToxicityVerdict,
    /// Trust score, 0.0 to 1.0
    pub trust_score: f64,
    pub trust_label: TrustLabel,
    pub trust_verdict: TrustVerdict,
    pub toxic: bool,
}

pub struct ToxicityChecker {
    toxicity: Box<dyn TextClassifier>,
    /// None means TrustMode::Default
    sentiment: Option<Box<dyn TextClassifier>>,
}

impl ToxicityChecker {
    /// Checker that always uses the default trust score.
    pub fn new(toxicity: Box<dyn TextClassifier>) -> Self {
        Self {
            toxicity,
            sentiment: None,
        }
    }

    /// Checker that derives the trust score from a sentiment classifier.
    pub fn with_sentiment(
        toxicity: Box<dyn TextClassifier>,
        sentiment: Box<dyn TextClassifier>,
    ) -> Self {
        Self {
            toxicity,
            sentiment: Some(sentiment),
        }
    }

    pub fn trust_mode(&self) -> TrustMode {
        match self.sentiment {
            Some(_) => TrustMode::Sentiment,
            None => TrustMode::Default,
        }
    }

    /// Is this text toxic? Only the toxicity classifier runs.
    pub async fn check(&self, text: &str) -> Result<bool> {
        let prediction = self.toxicity.classify(text).await?;
        Ok(is_toxic_label(&prediction.label))
    }

    /// Classify `text` and return every intermediate value.
    pub async fn check_detailed(&self, text: &str) -> Result<ClassificationResult> {
        let toxicity = self.toxicity.classify(text).await?;
        let toxicity_label = toxicity.label.to_lowercase();
        let toxic = is_toxic_label(&toxicity_label);

        let trust_score = self.trust_score(text).await?;

        let result = ClassificationResult {
            toxicity_score: toxicity.score,
            toxicity_verdict: ToxicityVerdict::from_label(&toxicity_label),
            toxicity_label,
            trust_score,
            trust_label: TrustLabel::from_score(trust_score),
            trust_verdict: TrustVerdict::from_score(trust_score),
            toxic,
        };

        debug!(
            toxic = result.toxic,
            toxicity_score = result.toxicity_score,
            trust_score = result.trust_score,
            "Checked text"
        );

        Ok(result)
    }

    async fn trust_score(&self, text: &str) -> Result<f64> {
        match &self.sentiment {
            None => Ok(DEFAULT_TRUST_SCORE),
            Some(sentiment) => {
                let prediction = sentiment.classify(text).await?;
                Ok(trust_from_sentiment(&prediction))
            }
        }
    }
}
