//! Alignment of a computed power series against reference data.
//!
//! Pure data preparation for external visualization: raw series side by side
//! plus their running sums for cumulative-energy comparison. The caller is
//! responsible for truncating unequal-length inputs beforehand.

use thiserror::Error;

use crate::pipeline::PowerSample;

/// Errors surfaced while pairing series.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("series length mismatch: computed {computed} vs reference {reference}")]
    LengthMismatch { computed: usize, reference: usize },
}

/// Computed and reference series with their cumulative transforms.
#[derive(Debug, Clone)]
pub struct SeriesComparison {
    pub computed_w: Vec<f64>,
    pub reference_w: Vec<f64>,
    pub cumulative_computed: Vec<f64>,
    pub cumulative_reference: Vec<f64>,
}

/// Running sum of a series. Applying it again accumulates the already
/// accumulated series; there is no idempotence guard, the input is treated as
/// a fresh series every time.
pub fn cumulative(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|v| {
            total += v;
            total
        })
        .collect()
}

/// Pair a computed power series with an equal-length reference series.
pub fn compare(
    computed: &[PowerSample],
    reference_w: &[f64],
) -> Result<SeriesComparison, CompareError> {
    if computed.len() != reference_w.len() {
        return Err(CompareError::LengthMismatch {
            computed: computed.len(),
            reference: reference_w.len(),
        });
    }
    let computed_w: Vec<f64> = computed.iter().map(|s| s.watts).collect();
    let cumulative_computed = cumulative(&computed_w);
    let cumulative_reference = cumulative(reference_w);
    Ok(SeriesComparison {
        computed_w,
        reference_w: reference_w.to_vec(),
        cumulative_computed,
        cumulative_reference,
    })
}
