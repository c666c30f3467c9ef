// Indices module - acoustic index computation over a shared spectrogram
//
// This module coordinates the acoustic indices used to compare habitats by
// acoustic activity. Every index consumes the same immutable SpectrogramData
// and produces a single scalar; the functions share no mutable state and may
// run in any order or concurrently.
//
// Module organization:
// - complexity: Acoustic Complexity Index (time-chunked complexity)
// - diversity: Acoustic Diversity Index (banded Shannon entropy)
// - evenness: Acoustic Evenness Index (banded Gini coefficient)
// - stats: generic inequality and entropy measures
// - mod.rs: shared band-proportion helper, defaults, declared stubs

pub mod complexity;
pub mod diversity;
pub mod evenness;
pub mod stats;

pub use complexity::acoustic_complexity;
pub use diversity::acoustic_diversity;
pub use evenness::acoustic_evenness;

use crate::error::IndexError;
use crate::spectrogram::SpectrogramData;

/// Default epoch length in seconds for the Acoustic Complexity Index
pub const DEFAULT_CHUNK_SECONDS: f64 = 5.0;

/// Frequency-banding options shared by the diversity and evenness indices
///
/// A spectro-temporal cell counts as active when its level relative to the
/// spectrogram's global maximum exceeds `db_threshold`. Bands of width
/// `frequency_step` partition `[0, max_frequency)`; bins at or above the
/// ceiling are excluded.
#[derive(Debug, Clone, Copy)]
pub struct BandOptions {
    /// Activity threshold in dB relative to the global maximum
    pub db_threshold: f64,
    /// Analysis ceiling in Hz
    pub max_frequency: f64,
    /// Band width in Hz
    pub frequency_step: f64,
}

impl Default for BandOptions {
    fn default() -> Self {
        Self {
            db_threshold: -50.0,
            max_frequency: 10_000.0,
            frequency_step: 1_000.0,
        }
    }
}

/// Per-band proportion of active spectro-temporal cells
///
/// Shared by ADI and AEI: converts the spectrogram to dB relative to its
/// global maximum, partitions the frequency axis into
/// `floor(max_frequency / frequency_step)` contiguous bands from 0 Hz, and
/// returns for each band the fraction of cells strictly above the threshold.
pub(crate) fn band_proportions(
    spec: &SpectrogramData,
    options: BandOptions,
) -> Result<Vec<f64>, IndexError> {
    if !options.frequency_step.is_finite()
        || options.frequency_step <= 0.0
        || !options.max_frequency.is_finite()
        || options.max_frequency <= 0.0
    {
        return Err(IndexError::InvalidBandLayout {
            max_frequency: options.max_frequency,
            frequency_step: options.frequency_step,
        });
    }

    let band_count = (options.max_frequency / options.frequency_step).floor() as usize;
    if band_count == 0 {
        return Err(IndexError::InvalidBandLayout {
            max_frequency: options.max_frequency,
            frequency_step: options.frequency_step,
        });
    }

    let db = spec.to_db()?;
    let frequencies = spec.frequencies();

    let mut proportions = Vec::with_capacity(band_count);
    for band in 0..band_count {
        let low = band as f64 * options.frequency_step;
        let high = (band as f64 + 1.0) * options.frequency_step;

        let mut active = 0usize;
        let mut total = 0usize;
        for (row, &frequency) in frequencies.iter().enumerate() {
            if frequency >= low && frequency < high {
                for &cell in &db[row] {
                    if cell > options.db_threshold {
                        active += 1;
                    }
                }
                total += db[row].len();
            }
        }

        if total == 0 {
            return Err(IndexError::EmptyBand { band });
        }
        proportions.push(active as f64 / total as f64);
    }

    Ok(proportions)
}

/// Bioacoustic index. Declared in the public surface but not yet realized.
pub fn bioacoustic_index(_samples: &[f64], _sample_rate: f64) -> Result<f64, IndexError> {
    Err(IndexError::NotImplemented {
        index: "bioacoustic_index",
    })
}

/// Acoustic entropy. Declared in the public surface but not yet realized.
pub fn acoustic_entropy(_samples: &[f64], _sample_rate: f64) -> Result<f64, IndexError> {
    Err(IndexError::NotImplemented {
        index: "acoustic_entropy",
    })
}

/// Median of the amplitude envelope. Declared in the public surface but not
/// yet realized.
pub fn median_envelope(_samples: &[f64], _sample_rate: f64) -> Result<f64, IndexError> {
    Err(IndexError::NotImplemented {
        index: "median_envelope",
    })
}

/// Normalized difference soundscape index. Declared in the public surface
/// but not yet realized.
pub fn normalized_difference(_samples: &[f64], _sample_rate: f64) -> Result<f64, IndexError> {
    Err(IndexError::NotImplemented {
        index: "normalized_difference",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_spectrogram(frequencies: Vec<f64>, magnitude: f64) -> SpectrogramData {
        let rows = frequencies.len();
        SpectrogramData::from_parts(
            frequencies,
            vec![0.5, 1.5],
            vec![vec![magnitude; 2]; rows],
            2.0,
        )
        .unwrap()
    }

    #[test]
    fn test_band_proportions_all_active() {
        // Uniform magnitude: every cell is at 0 dB relative to the maximum
        let frequencies: Vec<f64> = (0..100).map(|i| i as f64 * 100.0).collect();
        let spec = flat_spectrogram(frequencies, 1.0);

        let proportions = band_proportions(&spec, BandOptions::default()).unwrap();
        assert_eq!(proportions.len(), 10);
        for p in proportions {
            assert_eq!(p, 1.0);
        }
    }

    #[test]
    fn test_band_boundary_bins_go_to_upper_band() {
        // A bin at exactly 1000 Hz belongs to band 1, not band 0
        let spec = SpectrogramData::from_parts(
            vec![0.0, 500.0, 1000.0, 1500.0],
            vec![0.5, 1.5],
            vec![
                vec![1e-6, 1e-6],
                vec![1e-6, 1e-6],
                vec![1.0, 1.0],
                vec![1.0, 1.0],
            ],
            2.0,
        )
        .unwrap();

        let options = BandOptions {
            db_threshold: -50.0,
            max_frequency: 2_000.0,
            frequency_step: 1_000.0,
        };
        let proportions = band_proportions(&spec, options).unwrap();
        assert_eq!(proportions, vec![0.0, 1.0]);
    }

    #[test]
    fn test_band_ceiling_excludes_bins() {
        // Bins at or above max_frequency never count toward any band
        let spec = SpectrogramData::from_parts(
            vec![0.0, 500.0, 1000.0],
            vec![0.5, 1.5],
            vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]],
            2.0,
        )
        .unwrap();

        let options = BandOptions {
            db_threshold: -50.0,
            max_frequency: 1_000.0,
            frequency_step: 1_000.0,
        };
        let proportions = band_proportions(&spec, options).unwrap();
        assert_eq!(proportions.len(), 1, "only one complete band below 1 kHz");
        assert_eq!(proportions[0], 1.0);
    }

    #[test]
    fn test_band_without_bins_is_degenerate() {
        // Coarse bin spacing leaves band 0 empty
        let spec = SpectrogramData::from_parts(
            vec![5_000.0, 6_000.0],
            vec![0.5, 1.5],
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
            2.0,
        )
        .unwrap();

        assert_eq!(
            band_proportions(&spec, BandOptions::default()).unwrap_err(),
            IndexError::EmptyBand { band: 0 }
        );
    }

    #[test]
    fn test_invalid_band_layout_rejected() {
        let spec = flat_spectrogram(vec![0.0, 100.0], 1.0);

        for (max_frequency, frequency_step) in [
            (10_000.0, 0.0),
            (10_000.0, -1.0),
            (0.0, 1_000.0),
            (500.0, 1_000.0),
            (f64::INFINITY, 1_000.0),
            (10_000.0, f64::NAN),
        ] {
            let err = band_proportions(
                &spec,
                BandOptions {
                    db_threshold: -50.0,
                    max_frequency,
                    frequency_step,
                },
            )
            .unwrap_err();
            assert!(
                matches!(err, IndexError::InvalidBandLayout { .. }),
                "expected InvalidBandLayout for max {} step {}",
                max_frequency,
                frequency_step
            );
        }
    }

    #[test]
    fn test_declared_indices_fail_explicitly() {
        let samples = vec![0.1, -0.2, 0.3];

        for (result, name) in [
            (bioacoustic_index(&samples, 44_100.0), "bioacoustic_index"),
            (acoustic_entropy(&samples, 44_100.0), "acoustic_entropy"),
            (median_envelope(&samples, 44_100.0), "median_envelope"),
            (
                normalized_difference(&samples, 44_100.0),
                "normalized_difference",
            ),
        ] {
            assert_eq!(
                result.unwrap_err(),
                IndexError::NotImplemented { index: name },
                "{} must fail distinguishably, never return a value",
                name
            );
        }
    }
}
