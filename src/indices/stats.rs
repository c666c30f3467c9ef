// Stats module - generic inequality and entropy measures
//
// These utilities are not specific to acoustics; the evenness index uses the
// Gini coefficient and the diversity index uses Shannon entropy, but both
// operate on any numeric vector.

use crate::error::IndexError;

/// Compute the Gini coefficient of a vector
///
/// Defined as half the mean absolute difference over the full n-by-n pair
/// grid divided by the arithmetic mean. The diagonal (self-differences) is
/// included in the mean; callers comparing against tabulated values should
/// note this normalization, which differs from the i != j variant by a
/// factor of n / (n - 1).
///
/// 0 means perfect evenness; the maximum for a non-negative vector of
/// length n is (n - 1) / n, reached when all mass sits in one element.
///
/// # Arguments
/// * `x` - Numeric vector, intended for non-negative values
///
/// # Returns
/// The coefficient, or `ZeroMeanVector` when `x` is empty or its mean is
/// zero and the ratio is undefined.
pub fn gini_coefficient(x: &[f64]) -> Result<f64, IndexError> {
    if x.is_empty() {
        return Err(IndexError::ZeroMeanVector);
    }

    let mean = x.iter().sum::<f64>() / x.len() as f64;
    if mean == 0.0 {
        return Err(IndexError::ZeroMeanVector);
    }

    let mut difference_sum = 0.0;
    for &a in x {
        for &b in x {
            difference_sum += (a - b).abs();
        }
    }
    let mean_absolute_difference = difference_sum / (x.len() * x.len()) as f64;

    Ok(0.5 * mean_absolute_difference / mean)
}

/// Shannon entropy in bits of a probability-like vector
///
/// Assumes every entry is strictly positive; callers floor their
/// distributions before normalizing.
pub fn shannon_entropy_bits(p: &[f64]) -> f64 {
    -p.iter().map(|&pi| pi * pi.log2()).sum::<f64>()
}
