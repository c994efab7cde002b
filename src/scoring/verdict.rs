// Verdict mapping: pure threshold functions.
//
// Boundaries are strict: a trust score of exactly 0.7 is Medium, exactly 0.4
// is Low. NaN fails every comparison and falls to the lowest category.

use serde::Serialize;

/// Trust score above this is High.
pub const HIGH_TRUST_THRESHOLD: f64 = 0.7;
/// Trust score above this is Medium and Trustworthy.
pub const MEDIUM_TRUST_THRESHOLD: f64 = 0.4;

/// Label that marks a toxicity prediction as toxic (compared lower-cased).
pub const TOXIC_LABEL: &str = "toxic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrustLabel {
    High,
    Medium,
    Low,
}

impl TrustLabel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > HIGH_TRUST_THRESHOLD => TrustLabel::High,
            s if s > MEDIUM_TRUST_THRESHOLD => TrustLabel::Medium,
            _ => TrustLabel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLabel::High => "High",
            TrustLabel::Medium => "Medium",
            TrustLabel::Low => "Low",
        }
    }
}

impl std::fmt::Display for TrustLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrustVerdict {
    Trustworthy,
    Untrustworthy,
}

impl TrustVerdict {
    pub fn from_score(score: f64) -> Self {
        if score > MEDIUM_TRUST_THRESHOLD {
            TrustVerdict::Trustworthy
        } else {
            TrustVerdict::Untrustworthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustVerdict::Trustworthy => "Trustworthy",
            TrustVerdict::Untrustworthy => "Untrustworthy",
        }
    }
}

impl std::fmt::Display for TrustVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToxicityVerdict {
    Toxic,
    #[serde(rename = "Non-Toxic")]
    NonToxic,
}

impl ToxicityVerdict {
    /// Verdict for a classifier label; "toxic" in any case is Toxic.
    pub fn from_label(label: &str) -> Self {
        if is_toxic_label(label) {
            ToxicityVerdict::Toxic
        } else {
            ToxicityVerdict::NonToxic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToxicityVerdict::Toxic => "Toxic",
            ToxicityVerdict::NonToxic => "Non-Toxic",
        }
    }
}

impl std::fmt::Display for ToxicityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// True iff the lower-cased label is exactly "toxic".
///
/// Other toxic-bert labels such as "severe_toxic" or "insult" do not count.
pub fn is_toxic_label(label: &str) -> bool {
    label.to_lowercase() == TOXIC_LABEL
}
