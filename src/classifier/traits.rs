// Text classifier trait: the seam between the checker and the models.
//
// Both the toxicity model and the sentiment model are consumed through this
// one interface. The default implementation is a local ONNX sequence
// classifier; tests plug in fixed-output stubs.

use anyhow::Result;
use async_trait::async_trait;

/// The top prediction a classifier returns for a single text.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Label exactly as the model names it (e.g. "toxic", "POSITIVE")
    pub label: String,
    /// Confidence for that label, 0.0 to 1.0
    pub score: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Trait for classifying a piece of text into a single labeled prediction.
/// Async so inference can be offloaded to a blocking thread.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify one text and return the top-scoring label.
    async fn classify(&self, text: &str) -> Result<Prediction>;
}

/// Classifier that always returns the same prediction.
///
/// Useful for wiring the checker without model files and for tests.
pub struct FixedClassifier {
    prediction: Prediction,
}

impl FixedClassifier {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            prediction: Prediction::new(label, score),
        }
    }
}

#[async_trait]
impl TextClassifier for FixedClassifier {
    async fn classify(&self, _text: &str) -> Result<Prediction> {
        Ok(self.prediction.clone())
    }
}
