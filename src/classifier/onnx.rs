// Local ONNX sequence classifier.
//
// Runs a HuggingFace text-classification model exported to ONNX entirely on
// the local CPU. The same scorer serves both the toxicity model
// (toxic-bert, multi-label, sigmoid) and the sentiment model
// (distilbert-sst2, single-label, softmax). Which activation applies and how
// output indices map to labels comes from the model's own config.json.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use serde::Deserialize;
use tokenizers::Tokenizer;
use tracing::debug;

use super::download::{CONFIG_FILE, MODEL_FILE, TOKENIZER_FILE};
use super::traits::{Prediction, TextClassifier};

/// How raw logits are turned into per-label probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Independent probability per label (multi-label models)
    Sigmoid,
    /// Probabilities across labels sum to 1 (single-label models)
    Softmax,
}

/// The subset of a HuggingFace `config.json` we need.
#[derive(Debug, Deserialize)]
struct ModelConfig {
    #[serde(default)]
    model_type: Option<String>,
    #[serde(default)]
    problem_type: Option<String>,
    id2label: HashMap<String, String>,
}

/// Labels and activation derived from config.json.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    /// Label names indexed by model output position
    pub labels: Vec<String>,
    pub activation: Activation,
    /// BERT exports take a third `token_type_ids` input
    pub needs_token_type_ids: bool,
}

impl LabelMap {
    /// Parse the relevant parts of a model's config.json.
    pub fn from_config_json(json: &str) -> Result<Self> {
        let config: ModelConfig =
            serde_json::from_str(json).context("Failed to parse model config.json")?;

        let mut indexed: Vec<(usize, String)> = config
            .id2label
            .into_iter()
            .map(|(id, label)| {
                id.parse::<usize>()
                    .map(|i| (i, label))
                    .with_context(|| format!("Invalid id2label key in config.json: {id}"))
            })
            .collect::<Result<Vec<_>>>()?;
        indexed.sort_by_key(|(i, _)| *i);

        for (expected, (actual, _)) in indexed.iter().enumerate() {
            if expected != *actual {
                anyhow::bail!("config.json id2label is not contiguous: missing index {expected}");
            }
        }

        // Single-logit heads are scored with sigmoid, as are multi-label ones
        let activation = match config.problem_type.as_deref() {
            Some("multi_label_classification") => Activation::Sigmoid,
            _ if indexed.len() == 1 => Activation::Sigmoid,
            _ => Activation::Softmax,
        };

        Ok(Self {
            labels: indexed.into_iter().map(|(_, label)| label).collect(),
            activation,
            needs_token_type_ids: config.model_type.as_deref() == Some("bert"),
        })
    }

    /// Apply the activation to one row of logits and return the top label.
    pub fn top_prediction(&self, logits: &[f32]) -> Result<Prediction> {
        if logits.len() != self.labels.len() {
            anyhow::bail!(
                "Model returned {} logits but config.json names {} labels",
                logits.len(),
                self.labels.len()
            );
        }

        let logits: Vec<f64> = logits.iter().map(|&l| l as f64).collect();
        let probs: Vec<f64> = match self.activation {
            Activation::Sigmoid => logits.iter().map(|&l| sigmoid(l)).collect(),
            Activation::Softmax => softmax(&logits),
        };

        let (index, score) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .context("Model returned no logits")?;

        Ok(Prediction::new(self.labels[index].clone(), score))
    }
}

/// Local ONNX text classifier. Holds the model session and tokenizer
/// behind Arc<Mutex> so inference can be offloaded to spawn_blocking.
pub struct OnnxClassifier {
    // ort::Session::run takes &mut self, and spawn_blocking needs 'static
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    label_map: Arc<LabelMap>,
}

impl OnnxClassifier {
    /// Load the ONNX model, tokenizer and config from the given directory.
    ///
    /// Expects `onnx/model_quantized.onnx`, `tokenizer.json` and `config.json`
    /// in `model_dir`. Call `download::ensure_model()` first if they might be missing.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);
        let config_path = model_dir.join(CONFIG_FILE);

        for path in [&model_path, &tokenizer_path, &config_path] {
            if !path.exists() {
                anyhow::bail!("Model file not found: {}", path.display());
            }
        }

        let config_json = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let label_map = LabelMap::from_config_json(&config_json)?;

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        debug!(
            labels = ?label_map.labels,
            activation = ?label_map.activation,
            "Loaded ONNX classifier from {}",
            model_dir.display()
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            label_map: Arc::new(label_map),
        })
    }
}

#[async_trait]
impl TextClassifier for OnnxClassifier {
    /// Tokenize, run one forward pass, and map the logits to the top label.
    async fn classify(&self, text: &str) -> Result<Prediction> {
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let label_map = Arc::clone(&self.label_map);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let encoding = tokenizer
                .encode(text.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

            let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let attention_mask: Vec<i64> = encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect();
            let seq_len = input_ids.len();

            // Shape: [1, seq_len]
            let shape = [1_i64, seq_len as i64];

            let input_ids_tensor = Tensor::from_array((shape, input_ids))
                .context("Failed to create input_ids tensor")?;
            let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
                .context("Failed to create attention_mask tensor")?;

            let logits = {
                let mut session = session
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

                let run = if label_map.needs_token_type_ids {
                    let token_type_tensor = Tensor::from_array((shape, vec![0_i64; seq_len]))
                        .context("Failed to create token_type_ids tensor")?;
                    session.run(ort::inputs! {
                        "input_ids" => input_ids_tensor,
                        "attention_mask" => attention_mask_tensor,
                        "token_type_ids" => token_type_tensor
                    })
                } else {
                    session.run(ort::inputs! {
                        "input_ids" => input_ids_tensor,
                        "attention_mask" => attention_mask_tensor
                    })
                };
                let outputs = run.context("ONNX inference failed")?;

                // Output shape: [1, num_labels], raw logits
                let (_out_shape, data) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .context("Failed to extract output tensor")?;

                data.to_vec()
            };

            let prediction = label_map.top_prediction(&logits)?;

            debug!(
                label = %prediction.label,
                score = prediction.score,
                text_preview = %crate::output::truncate_chars(&text, 50),
                "ONNX classified text"
            );

            Ok(prediction)
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

/// Sigmoid activation: maps any real number to (0, 1).
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Softmax with max-subtraction so large logits don't overflow.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOXIC_BERT_CONFIG: &str = r#"{
        "model_type": "bert",
        "problem_type": "multi_label_classification",
        "id2label": {
            "0": "toxic", "1": "severe_toxic", "2": "obscene",
            "3": "threat", "4": "insult", "5": "identity_hate"
        }
    }"#;

    const SST2_CONFIG: &str = r#"{
        "model_type": "distilbert",
        "id2label": { "1": "POSITIVE", "0": "NEGATIVE" }
    }"#;

    #[test]
    fn test_sigmoid_zero() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-10, "sigmoid(0) should be 0.5");
    }

    #[test]
    fn test_sigmoid_symmetry() {
        for x in [0.5, 1.0, 2.0, 5.0] {
            let sum = sigmoid(x) + sigmoid(-x);
            assert!((sum - 1.0).abs() < 1e-10, "sigmoid({x}) + sigmoid(-{x}) should equal 1.0");
        }
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[2.0, -1.0, 0.5]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-10);
        assert!(probs[0] > probs[2] && probs[2] > probs[1]);
    }

    #[test]
    fn test_softmax_large_logits_stay_finite() {
        let probs = softmax(&[1000.0, 999.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!(probs[0] > 0.7);
    }

    #[test]
    fn test_label_map_multi_label_bert() {
        let map = LabelMap::from_config_json(TOXIC_BERT_CONFIG).unwrap();
        assert_eq!(map.labels.len(), 6);
        assert_eq!(map.labels[0], "toxic");
        assert_eq!(map.labels[5], "identity_hate");
        assert_eq!(map.activation, Activation::Sigmoid);
        assert!(map.needs_token_type_ids);
    }

    #[test]
    fn test_label_map_orders_by_index_not_json_order() {
        let map = LabelMap::from_config_json(SST2_CONFIG).unwrap();
        assert_eq!(map.labels, vec!["NEGATIVE".to_string(), "POSITIVE".to_string()]);
        assert_eq!(map.activation, Activation::Softmax);
        assert!(!map.needs_token_type_ids);
    }

    #[test]
    fn test_single_label_uses_sigmoid() {
        let map = LabelMap::from_config_json(r#"{ "id2label": { "0": "toxic" } }"#).unwrap();
        assert_eq!(map.activation, Activation::Sigmoid);

        let prediction = map.top_prediction(&[-8.0]).unwrap();
        assert_eq!(prediction.label, "toxic");
        assert!(prediction.score < 0.001, "expected sigmoid(-8), got {}", prediction.score);
    }

    #[test]
    fn test_label_map_rejects_gaps() {
        let json = r#"{ "id2label": { "0": "a", "2": "c" } }"#;
        assert!(LabelMap::from_config_json(json).is_err());
    }

    #[test]
    fn test_label_map_rejects_non_numeric_keys() {
        let json = r#"{ "id2label": { "zero": "a" } }"#;
        assert!(LabelMap::from_config_json(json).is_err());
    }

    #[test]
    fn test_top_prediction_sigmoid_picks_highest() {
        let map = LabelMap::from_config_json(TOXIC_BERT_CONFIG).unwrap();
        let prediction = map
            .top_prediction(&[3.0, -2.0, 1.0, -4.0, 0.5, -3.0])
            .unwrap();
        assert_eq!(prediction.label, "toxic");
        assert!((prediction.score - sigmoid(3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_top_prediction_softmax_negative() {
        let map = LabelMap::from_config_json(SST2_CONFIG).unwrap();
        let prediction = map.top_prediction(&[2.0, -2.0]).unwrap();
        assert_eq!(prediction.label, "NEGATIVE");
        assert!(prediction.score > 0.98 && prediction.score < 1.0);
    }

    #[test]
    fn test_top_prediction_rejects_wrong_width() {
        let map = LabelMap::from_config_json(SST2_CONFIG).unwrap();
        assert!(map.top_prediction(&[0.1, 0.2, 0.3]).is_err());
    }
}
