// Unit tests for scoring functions.
//
// Tests isolated pure functions: TrustLabel / TrustVerdict boundary
// conditions, the sentiment-to-trust transform, and toxicity label matching.

use toxcheck::classifier::traits::Prediction;
use toxcheck::output::truncate_chars;
use toxcheck::scoring::trust::{trust_from_sentiment, TrustMode, DEFAULT_TRUST_SCORE};
use toxcheck::scoring::verdict::{is_toxic_label, ToxicityVerdict, TrustLabel, TrustVerdict};

// ============================================================
// TrustLabel::from_score: strict boundaries
// ============================================================

#[test]
fn label_just_above_high() {
    assert_eq!(TrustLabel::from_score(0.71), TrustLabel::High);
}

#[test]
fn label_exact_high_boundary_is_medium() {
    assert_eq!(TrustLabel::from_score(0.7), TrustLabel::Medium);
}

#[test]
fn label_just_above_medium() {
    assert_eq!(TrustLabel::from_score(0.41), TrustLabel::Medium);
}

#[test]
fn label_exact_medium_boundary_is_low() {
    assert_eq!(TrustLabel::from_score(0.4), TrustLabel::Low);
}

#[test]
fn label_extremes() {
    assert_eq!(TrustLabel::from_score(0.0), TrustLabel::Low);
    assert_eq!(TrustLabel::from_score(1.0), TrustLabel::High);
}

#[test]
fn label_display_matches_as_str() {
    for label in [TrustLabel::High, TrustLabel::Medium, TrustLabel::Low] {
        assert_eq!(label.to_string(), label.as_str());
    }
}

// ============================================================
// TrustVerdict::from_score
// ============================================================

#[test]
fn verdict_boundary_is_strict() {
    assert_eq!(TrustVerdict::from_score(0.4), TrustVerdict::Untrustworthy);
    assert_eq!(TrustVerdict::from_score(0.41), TrustVerdict::Trustworthy);
}

#[test]
fn default_trust_score_is_medium_and_trustworthy() {
    assert_eq!(TrustLabel::from_score(DEFAULT_TRUST_SCORE), TrustLabel::Medium);
    assert_eq!(
        TrustVerdict::from_score(DEFAULT_TRUST_SCORE),
        TrustVerdict::Trustworthy
    );
}

// ============================================================
// trust_from_sentiment
// ============================================================

#[test]
fn negative_point_eight_is_point_oh_five() {
    let score = trust_from_sentiment(&Prediction::new("NEGATIVE", 0.8));
    assert!((score - 0.05).abs() < 1e-9, "expected 0.05, got {score}");
    assert_eq!(TrustLabel::from_score(score), TrustLabel::Low);
    assert_eq!(TrustVerdict::from_score(score), TrustVerdict::Untrustworthy);
}

#[test]
fn positive_half_confidence() {
    let score = trust_from_sentiment(&Prediction::new("POSITIVE", 0.5));
    assert!((score - 0.875).abs() < 1e-9);
    assert_eq!(TrustLabel::from_score(score), TrustLabel::High);
}

#[test]
fn trust_stays_in_unit_interval_for_unit_confidence() {
    for label in ["POSITIVE", "NEGATIVE", "NEUTRAL", ""] {
        for step in 0..=100 {
            let confidence = step as f64 / 100.0;
            let score = trust_from_sentiment(&Prediction::new(label, confidence));
            assert!(
                (0.0..=1.0).contains(&score),
                "{label} at {confidence} gave {score}"
            );
        }
    }
}

#[test]
fn positive_always_beats_negative() {
    for step in 0..=10 {
        let confidence = step as f64 / 10.0;
        let pos = trust_from_sentiment(&Prediction::new("POSITIVE", confidence));
        let neg = trust_from_sentiment(&Prediction::new("NEGATIVE", confidence));
        assert!(pos > neg);
    }
}

#[test]
fn trust_mode_only_exact_yes() {
    assert_eq!(TrustMode::from_answer("yes"), TrustMode::Default);
    assert_eq!(TrustMode::from_answer("yes please"), TrustMode::Sentiment);
}

// ============================================================
// Toxicity label matching
// ============================================================

#[test]
fn toxic_iff_lowercased_label_is_toxic() {
    let cases = [
        ("toxic", true),
        ("TOXIC", true),
        ("ToXiC", true),
        ("non-toxic", false),
        ("severe_toxic", false),
        ("insult", false),
        ("LABEL_0", false),
    ];
    for (label, expected) in cases {
        assert_eq!(is_toxic_label(label), expected, "label {label}");
        let verdict = ToxicityVerdict::from_label(label);
        assert_eq!(verdict == ToxicityVerdict::Toxic, expected, "label {label}");
    }
}

#[test]
fn verdict_strings() {
    assert_eq!(ToxicityVerdict::Toxic.as_str(), "Toxic");
    assert_eq!(ToxicityVerdict::NonToxic.as_str(), "Non-Toxic");
}

// ============================================================
// truncate_chars: UTF-8 safety
// ============================================================

#[test]
fn truncate_multibyte_does_not_panic() {
    let text = "🔥🔥🔥🔥🔥";
    assert_eq!(truncate_chars(text, 2), "🔥🔥...");
    assert_eq!(truncate_chars(text, 5), text);
}
