//! Exact-match / F1 scoring over prediction/reference pairs.

use crate::normalize::{normalize_answer, tokenize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A record id paired with the model's generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPrediction {
    pub id: String,
    pub prediction_text: String,
}

/// Gold answer spans for one record. `answer_start` mirrors the SQuAD wire
/// shape; the scorer never reads it and callers fill it with `-1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldAnswers {
    pub text: Vec<String>,
    pub answer_start: Vec<i64>,
}

/// A record id paired with its gold answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaReference {
    pub id: String,
    pub answers: GoldAnswers,
}

/// Corpus-level scores, both fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquadScores {
    pub exact_match: f64,
    pub f1: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    #[error("prediction/reference count mismatch: {predictions} predictions, {references} references")]
    LengthMismatch {
        predictions: usize,
        references: usize,
    },
    #[error("prediction id {prediction:?} does not match reference id {reference:?} at index {index}")]
    IdMismatch {
        index: usize,
        prediction: String,
        reference: String,
    },
}

/// 1.0 if the normalized prediction equals the normalized gold answer.
pub fn exact_match_score(prediction: &str, gold: &str) -> f64 {
    if normalize_answer(prediction) == normalize_answer(gold) {
        1.0
    } else {
        0.0
    }
}

/// Harmonic mean of token precision and recall between prediction and gold.
pub fn f1_score(prediction: &str, gold: &str) -> f64 {
    let pred_tokens = tokenize(&normalize_answer(prediction));
    let gold_tokens = tokenize(&normalize_answer(gold));

    if pred_tokens.is_empty() && gold_tokens.is_empty() {
        return 1.0;
    }
    if pred_tokens.is_empty() || gold_tokens.is_empty() {
        return 0.0;
    }

    let mut gold_counts: HashMap<&str, usize> = HashMap::new();
    for t in &gold_tokens {
        *gold_counts.entry(t.as_str()).or_insert(0) += 1;
    }
    let mut common = 0usize;
    for t in &pred_tokens {
        if let Some(n) = gold_counts.get_mut(t.as_str()) {
            if *n > 0 {
                *n -= 1;
                common += 1;
            }
        }
    }
    if common == 0 {
        return 0.0;
    }
    let precision = common as f64 / pred_tokens.len() as f64;
    let recall = common as f64 / gold_tokens.len() as f64;
    2.0 * precision * recall / (precision + recall)
}

fn best_over_golds(score: fn(&str, &str) -> f64, prediction: &str, golds: &[String]) -> f64 {
    golds
        .iter()
        .map(|g| score(prediction, g))
        .fold(0.0, f64::max)
}

/// Score the full pair list and return the corpus mean of both metrics.
///
/// Pairs are matched positionally; an id disagreement is an error. An empty
/// pair list yields zero scores rather than an error.
pub fn compute(
    predictions: &[QaPrediction],
    references: &[QaReference],
) -> Result<SquadScores, MetricError> {
    if predictions.len() != references.len() {
        return Err(MetricError::LengthMismatch {
            predictions: predictions.len(),
            references: references.len(),
        });
    }
    if predictions.is_empty() {
        return Ok(SquadScores {
            exact_match: 0.0,
            f1: 0.0,
        });
    }

    let mut em_sum = 0.0;
    let mut f1_sum = 0.0;
    for (index, (pred, reference)) in predictions.iter().zip(references).enumerate() {
        if pred.id != reference.id {
            return Err(MetricError::IdMismatch {
                index,
                prediction: pred.id.clone(),
                reference: reference.id.clone(),
            });
        }
        em_sum += best_over_golds(
            exact_match_score,
            &pred.prediction_text,
            &reference.answers.text,
        );
        f1_sum += best_over_golds(f1_score, &pred.prediction_text, &reference.answers.text);
    }

    let n = predictions.len() as f64;
    Ok(SquadScores {
        exact_match: em_sum / n,
        f1: f1_sum / n,
    })
}
