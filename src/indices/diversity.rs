// Diversity module - Acoustic Diversity Index (ADI)
//
// ADI applies Shannon entropy to the spread of acoustic activity across
// frequency bands. Activity spread evenly over the bands approaches
// log2(band count) bits; activity concentrated in one band approaches zero.

use crate::error::IndexError;
use crate::indices::{band_proportions, stats, BandOptions};
use crate::spectrogram::{SpectrogramData, EPSILON};

/// Compute the Acoustic Diversity Index
///
/// Converts the spectrogram to dB relative to its global maximum, computes
/// the per-band proportion of cells above the threshold, floors each
/// proportion at EPSILON to keep the entropy finite, normalizes the
/// proportions to sum to one, and returns their Shannon entropy in bits.
///
/// # Arguments
/// * `spec` - Shared spectrogram
/// * `options` - Banding options (reference defaults -50 dB, 10 kHz, 1 kHz)
///
/// # Returns
/// Entropy in bits within `[0, log2(band count)]`, or an error for an
/// invalid band layout or a degenerate band.
pub fn acoustic_diversity(
    spec: &SpectrogramData,
    options: BandOptions,
) -> Result<f64, IndexError> {
    let mut proportions = band_proportions(spec, options)?;

    for p in proportions.iter_mut() {
        if *p < EPSILON {
            *p = EPSILON;
        }
    }

    let sum: f64 = proportions.iter().sum();
    for p in proportions.iter_mut() {
        *p /= sum;
    }

    Ok(stats::shannon_entropy_bits(&proportions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banded_spectrogram(band_magnitudes: &[f64]) -> SpectrogramData {
        // Ten rows per 1 kHz band, two time frames
        let mut frequencies = Vec::new();
        let mut values = Vec::new();
        for (band, &magnitude) in band_magnitudes.iter().enumerate() {
            for bin in 0..10 {
                frequencies.push(band as f64 * 1_000.0 + bin as f64 * 100.0);
                values.push(vec![magnitude; 2]);
            }
        }
        SpectrogramData::from_parts(frequencies, vec![0.5, 1.5], values, 2.0).unwrap()
    }

    #[test]
    fn test_even_activity_approaches_log2_band_count() {
        let spec = banded_spectrogram(&[1.0; 10]);

        let adi = acoustic_diversity(&spec, BandOptions::default()).unwrap();
        assert!(
            (adi - 10.0_f64.log2()).abs() < 1e-9,
            "expected log2(10) bits for uniform activity, got {}",
            adi
        );
    }

    #[test]
    fn test_concentrated_activity_approaches_zero() {
        // Only band 0 is active; the rest sit 180 dB below the maximum
        let mut magnitudes = [1e-9; 10];
        magnitudes[0] = 1.0;
        let spec = banded_spectrogram(&magnitudes);

        let adi = acoustic_diversity(&spec, BandOptions::default()).unwrap();
        assert!(
            adi >= 0.0 && adi < 1e-6,
            "expected near-zero entropy for one active band, got {}",
            adi
        );
    }

    #[test]
    fn test_two_active_bands_give_one_bit() {
        let mut magnitudes = [1e-9; 10];
        magnitudes[2] = 1.0;
        magnitudes[7] = 1.0;
        let spec = banded_spectrogram(&magnitudes);

        let adi = acoustic_diversity(&spec, BandOptions::default()).unwrap();
        assert!(
            (adi - 1.0).abs() < 1e-6,
            "two equally active bands should give ~1 bit, got {}",
            adi
        );
    }

    #[test]
    fn test_diversity_bounded_by_band_count() {
        let spec = banded_spectrogram(&[0.9, 1.0, 0.2, 0.8, 0.5, 0.7, 0.3, 0.6, 0.4, 1.0]);

        let adi = acoustic_diversity(&spec, BandOptions::default()).unwrap();
        assert!(adi >= 0.0);
        assert!(adi <= 10.0_f64.log2() + 1e-12);
    }
}
