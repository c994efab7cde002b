// Scoring: fixed transforms from model output to scores and verdicts.

pub mod trust;
pub mod verdict;
