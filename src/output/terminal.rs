// Colored terminal output for a classification result.
//
// The seven result lines always have the same keys in the same order. Color
// is applied to values only; with NO_COLOR set they are plain "Key: value".

use colored::Colorize;

use crate::checker::ClassificationResult;
use crate::scoring::verdict::{ToxicityVerdict, TrustLabel, TrustVerdict};

/// The result as (key, plain value) pairs, in display order.
pub fn result_lines(result: &ClassificationResult) -> Vec<(&'static str, String)> {
    vec![
        ("Toxicity Score", result.toxicity_score.to_string()),
        ("Toxicity Label", result.toxicity_label.clone()),
        ("Toxicity Verdict", result.toxicity_verdict.to_string()),
        ("Trust Score", result.trust_score.to_string()),
        ("Trust Label", result.trust_label.to_string()),
        ("Trust Verdict", result.trust_verdict.to_string()),
        ("Toxic", result.toxic.to_string()),
    ]
}

/// Print the seven labeled result lines to stdout.
pub fn display_result(result: &ClassificationResult) {
    let lines = result_lines(result);
    for (key, value) in &lines {
        let colored_value = match *key {
            "Toxicity Verdict" => colorize_toxicity(result.toxicity_verdict, value),
            "Trust Label" => colorize_trust_label(result.trust_label, value),
            "Trust Verdict" => colorize_trust_verdict(result.trust_verdict, value),
            "Toxic" if result.toxic => value.red().bold(),
            _ => value.normal(),
        };
        println!("{}: {}", key, colored_value);
    }
}

fn colorize_toxicity(verdict: ToxicityVerdict, value: &str) -> colored::ColoredString {
    match verdict {
        ToxicityVerdict::Toxic => value.red().bold(),
        ToxicityVerdict::NonToxic => value.green(),
    }
}

fn colorize_trust_label(label: TrustLabel, value: &str) -> colored::ColoredString {
    match label {
        TrustLabel::High => value.green(),
        TrustLabel::Medium => value.yellow(),
        TrustLabel::Low => value.red(),
    }
}

fn colorize_trust_verdict(verdict: TrustVerdict, value: &str) -> colored::ColoredString {
    match verdict {
        TrustVerdict::Trustworthy => value.green(),
        TrustVerdict::Untrustworthy => value.bright_red(),
    }
}
