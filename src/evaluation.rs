//! Type I / type II error rates of an edge map against a ground-truth mask.
//!
//! A ground-truth pixel is an edge when its value is above 100, a detected
//! pixel is an edge when its value is above 200. Both counts are divided by
//! the larger of the two edge populations, so a detector that fires
//! everywhere is penalised as much as one that fires nowhere.
use crate::error::{CannyError, Result};
use crate::image::{ImageView, Slice};
use serde::Serialize;

const IDEAL_EDGE: u8 = 100;
const DETECTED_EDGE: u8 = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRates {
    /// Ground-truth edges the detector missed.
    pub false_negative: f64,
    /// Detections on ground-truth background.
    pub false_positive: f64,
}

/// Compare one detected slice with its ground truth.
pub fn count_errors(result: &Slice<u8>, ideal: &Slice<u8>) -> Result<ErrorRates> {
    if !result.same_dims(ideal) {
        let ((rh, rw), (ih, iw)) = (result.dims(), ideal.dims());
        return Err(CannyError::invalid(format!(
            "result is {rh}x{rw} but ground truth is {ih}x{iw}"
        )));
    }

    let (mut ideal_edges, mut detected_edges) = (0usize, 0usize);
    let (mut false_negative, mut false_positive) = (0usize, 0usize);
    for (r_row, i_row) in result.rows().zip(ideal.rows()) {
        for (&r, &i) in r_row.iter().zip(i_row) {
            if i > IDEAL_EDGE {
                ideal_edges += 1;
                if r < DETECTED_EDGE {
                    false_negative += 1;
                }
            }
            if r > DETECTED_EDGE {
                detected_edges += 1;
                if i < IDEAL_EDGE {
                    false_positive += 1;
                }
            }
        }
    }

    let denom = ideal_edges.max(detected_edges);
    if denom == 0 {
        return Ok(ErrorRates::default());
    }
    Ok(ErrorRates {
        false_negative: false_negative as f64 / denom as f64,
        false_positive: false_positive as f64 / denom as f64,
    })
}

/// Average [`count_errors`] over paired slices.
pub fn mean_error_rates(results: &[Slice<u8>], ideals: &[Slice<u8>]) -> Result<ErrorRates> {
    if results.len() != ideals.len() {
        return Err(CannyError::invalid(format!(
            "{} result slices but {} ground-truth slices",
            results.len(),
            ideals.len()
        )));
    }
    if results.is_empty() {
        return Err(CannyError::EmptyInput);
    }
    let mut sum = ErrorRates::default();
    for (result, ideal) in results.iter().zip(ideals) {
        let rates = count_errors(result, ideal)?;
        sum.false_negative += rates.false_negative;
        sum.false_positive += rates.false_positive;
    }
    let n = results.len() as f64;
    Ok(ErrorRates {
        false_negative: sum.false_negative / n,
        false_positive: sum.false_positive / n,
    })
}
