use serde::Serialize;

use crate::board::Board;

/// Metric bundle for one prediction. One scorer, three named outputs —
/// callers never recompute metrics through parallel code paths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub perfect_match: bool,
    pub cell_accuracy: f64,
    pub correctness: f64,
}

impl Score {
    pub fn compute(predicted: &Board, expected: &Board) -> Self {
        Self {
            perfect_match: is_perfect_match(predicted, expected),
            cell_accuracy: cell_accuracy(predicted, expected),
            correctness: correctness(predicted, expected),
        }
    }
}

/// Fraction of cell positions where the boards agree, in [0, 1].
/// Shape mismatch is an expected model failure mode and scores 0.0.
pub fn cell_accuracy(predicted: &Board, expected: &Board) -> f64 {
    if predicted.shape() != expected.shape() {
        return 0.0;
    }
    let total = expected.rows() * expected.cols();
    if total == 0 {
        return 1.0;
    }
    let agree = predicted
        .cells()
        .iter()
        .zip(expected.cells())
        .filter(|(p, e)| p == e)
        .count();
    agree as f64 / total as f64
}

pub fn is_perfect_match(predicted: &Board, expected: &Board) -> bool {
    predicted == expected
}

/// Class-balanced correctness: geometric mean of the alive-class and
/// dead-class F1 scores against the expected labels.
///
/// Boards are typically sparse, so raw cell accuracy is easy to game by
/// predicting all-dead; the geometric mean drives any degenerate
/// single-class prediction toward 0.0. Shape mismatch scores 0.0.
pub fn correctness(predicted: &Board, expected: &Board) -> f64 {
    if predicted.shape() != expected.shape() {
        return 0.0;
    }
    let alive_f1 = class_f1(predicted, expected, true);
    let dead_f1 = class_f1(predicted, expected, false);
    (alive_f1 * dead_f1).sqrt()
}

/// F1 for one cell class, with defined values for every zero-count corner:
/// expected empty + predicted empty is 1.0, expected empty + predicted
/// nonempty is 0.0, predicted empty against a nonempty expectation is 0.0,
/// and precision + recall of zero is 0.0 rather than a division by zero.
fn class_f1(predicted: &Board, expected: &Board, class: bool) -> f64 {
    let mut true_positives = 0usize;
    let mut expected_count = 0usize;
    let mut predicted_count = 0usize;

    for (p, e) in predicted.cells().iter().zip(expected.cells()) {
        let p = *p == class;
        let e = *e == class;
        if e {
            expected_count += 1;
        }
        if p {
            predicted_count += 1;
        }
        if p && e {
            true_positives += 1;
        }
    }

    if expected_count == 0 {
        return if predicted_count == 0 { 1.0 } else { 0.0 };
    }
    if predicted_count == 0 {
        return 0.0;
    }

    let precision = true_positives as f64 / predicted_count as f64;
    let recall = true_positives as f64 / expected_count as f64;
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}
