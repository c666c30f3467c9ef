// Evenness module - Acoustic Evenness Index (AEI)
//
// AEI applies the Gini coefficient to the spread of acoustic activity
// across frequency bands. Zero means activity is spread perfectly evenly;
// values near one mean activity is concentrated in few bands.

use crate::error::IndexError;
use crate::indices::{band_proportions, stats, BandOptions};
use crate::spectrogram::SpectrogramData;

/// Compute the Acoustic Evenness Index
///
/// Uses the same dB conversion and per-band activity proportions as the
/// diversity index, but keeps the raw proportions (no EPSILON floor, exact
/// zeros included) and returns their Gini coefficient.
///
/// # Arguments
/// * `spec` - Shared spectrogram
/// * `options` - Banding options (reference defaults -50 dB, 10 kHz, 1 kHz)
///
/// # Returns
/// The coefficient in `[0, 1)`, or an error for an invalid band layout, a
/// degenerate band, or a recording with no active band at all (zero-mean
/// proportion vector).
pub fn acoustic_evenness(
    spec: &SpectrogramData,
    options: BandOptions,
) -> Result<f64, IndexError> {
    let proportions = band_proportions(spec, options)?;
    stats::gini_coefficient(&proportions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banded_spectrogram(band_magnitudes: &[f64]) -> SpectrogramData {
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
    fn test_even_activity_gives_zero() {
        let spec = banded_spectrogram(&[1.0; 10]);

        let aei = acoustic_evenness(&spec, BandOptions::default()).unwrap();
        assert_eq!(aei, 0.0, "uniform activity is perfectly even");
    }

    #[test]
    fn test_concentrated_activity_approaches_maximum() {
        let mut magnitudes = [1e-9; 10];
        magnitudes[0] = 1.0;
        let spec = banded_spectrogram(&magnitudes);

        let aei = acoustic_evenness(&spec, BandOptions::default()).unwrap();
        assert!(
            (aei - 0.9).abs() < 1e-9,
            "one active band of ten should give (n - 1) / n = 0.9, got {}",
            aei
        );
    }

    #[test]
    fn test_evenness_stays_in_unit_interval() {
        for magnitudes in [
            [1.0, 1.0, 1e-9, 1e-9, 1e-9, 1e-9, 1e-9, 1e-9, 1e-9, 1e-9],
            [1.0, 0.5, 0.2, 1e-9, 1e-9, 1e-9, 1e-9, 1e-9, 1e-9, 1e-9],
            [1.0, 1.0, 1.0, 1.0, 1.0, 1e-9, 1e-9, 1e-9, 1e-9, 1e-9],
        ] {
            let spec = banded_spectrogram(&magnitudes);
            let aei = acoustic_evenness(&spec, BandOptions::default()).unwrap();
            assert!(
                (0.0..1.0).contains(&aei),
                "AEI must stay within [0, 1) for proportion vectors, got {}",
                aei
            );
        }
    }

    #[test]
    fn test_no_active_band_is_degenerate() {
        // A threshold above 0 dB leaves every proportion at exactly zero
        let spec = banded_spectrogram(&[1.0; 10]);
        let options = BandOptions {
            db_threshold: 10.0,
            ..BandOptions::default()
        };

        assert_eq!(
            acoustic_evenness(&spec, options).unwrap_err(),
            IndexError::ZeroMeanVector
        );
    }
}
