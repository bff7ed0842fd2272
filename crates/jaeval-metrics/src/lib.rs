//! SQuAD-style span-matching metrics for Japanese QA evaluation.
//!
//! Scores a predicted answer span against one or more gold answers with
//! exact-match and token-overlap F1. All scores are fractions in `[0, 1]`.

pub mod normalize;
pub mod squad;

pub use squad::{
    compute, exact_match_score, f1_score, GoldAnswers, MetricError, QaPrediction, QaReference,
    SquadScores,
};
