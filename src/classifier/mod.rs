// Text classification: trait-based abstraction over the two models.
//
// The TextClassifier trait defines the interface. OnnxClassifier implements
// it with a local ONNX export; the download module fetches those exports
// from HuggingFace the first time they're needed.

pub mod download;
pub mod onnx;
pub mod traits;
