// Toxcheck: toxicity and trust scoring for short text.
//
// This is the library root. The binary in main.rs wires these modules into
// a single-shot CLI; embedders can build a ToxicityChecker directly.

pub mod checker;
pub mod classifier;
pub mod config;
pub mod output;
pub mod prompt;
pub mod scoring;
