// Spectrogram module - time-frequency magnitude matrix construction
//
// This module turns a raw sample sequence and sample rate into an immutable
// magnitude spectrogram, the shared substrate consumed by every acoustic
// index. The transform is a Hamming-windowed, non-overlapping, non-detrended
// short-time Fourier transform; the Nyquist bin is dropped for parity with
// the soundecology R package, and magnitudes carry the density-scaled
// normalization so downstream dB values line up with the reference toolkit.

use log::debug;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{IndexError, SpectrogramError};

/// Default FFT segment length for index analysis
pub const DEFAULT_FFT_SIZE: usize = 512;

/// Floor applied before logarithms to keep dB conversion finite
pub const EPSILON: f64 = 1e-10;

/// Immutable time-frequency magnitude matrix
///
/// Built once per recording and read-only thereafter. Row `i` of `values`
/// corresponds to `frequencies[i]`, column `j` to `times[j]`. The matrix is
/// safe to share across threads; every index computation borrows it and is
/// side-effect-free, so indices may run in any order or concurrently.
#[derive(Debug, Clone)]
pub struct SpectrogramData {
    frequencies: Vec<f64>,
    times: Vec<f64>,
    values: Vec<Vec<f64>>,
    duration: f64,
}

impl SpectrogramData {
    /// Build a spectrogram from raw samples
    ///
    /// Computes the short-time magnitude spectrum with a periodic Hamming
    /// window, hop equal to `fft_size` (no overlap), and no detrending. The
    /// transform yields `fft_size / 2 + 1` one-sided bins from DC to the
    /// Nyquist frequency; the Nyquist bin and its row are dropped.
    ///
    /// # Arguments
    /// * `samples` - Single-channel PCM amplitudes
    /// * `sample_rate` - Sample rate in Hz
    /// * `fft_size` - Segment length (power of two recommended for speed)
    ///
    /// # Returns
    /// The spectrogram, or an error if any input is rejected. Output is a
    /// pure function of the inputs.
    pub fn build(
        samples: &[f64],
        sample_rate: f64,
        fft_size: usize,
    ) -> Result<Self, SpectrogramError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SpectrogramError::NonPositiveSampleRate { sample_rate });
        }
        if fft_size < 2 {
            return Err(SpectrogramError::InvalidFftSize { fft_size });
        }
        if samples.is_empty() {
            return Err(SpectrogramError::EmptySignal);
        }
        if samples.len() < fft_size {
            return Err(SpectrogramError::SignalShorterThanWindow {
                samples: samples.len(),
                fft_size,
            });
        }

        // Periodic Hamming window, matching the reference toolkit's STFT.
        let window: Vec<f64> = (0..fft_size)
            .map(|n| {
                0.54 - 0.46 * ((2.0 * std::f64::consts::PI * n as f64) / fft_size as f64).cos()
            })
            .collect();

        // Density-mode magnitude scale: sqrt(1 / (fs * sum(w^2))).
        let window_energy: f64 = window.iter().map(|w| w * w).sum();
        let scale = (sample_rate * window_energy).sqrt().recip();

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_size);

        let frame_count = samples.len() / fft_size;
        let one_sided_bins = fft_size / 2 + 1;
        let retained_bins = one_sided_bins - 1;

        let mut buffer: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); fft_size];
        let mut values = vec![vec![0.0; frame_count]; retained_bins];

        for frame in 0..frame_count {
            let start = frame * fft_size;
            for (i, &sample) in samples[start..start + fft_size].iter().enumerate() {
                buffer[i] = Complex::new(sample * window[i], 0.0);
            }

            fft.process(&mut buffer);

            for (bin, row) in values.iter_mut().enumerate() {
                row[frame] = buffer[bin].norm() * scale;
            }
        }

        let bin_width = sample_rate / fft_size as f64;
        let frequencies: Vec<f64> = (0..retained_bins).map(|k| k as f64 * bin_width).collect();

        // Frame centers: the first frame spans [0, fft_size), so its center
        // sits at fft_size / 2 samples.
        let times: Vec<f64> = (0..frame_count)
            .map(|j| (fft_size / 2 + j * fft_size) as f64 / sample_rate)
            .collect();

        let duration = samples.len() as f64 / sample_rate;

        debug!(
            "Built spectrogram: {} bins x {} frames, {:.3} s at {} Hz",
            retained_bins, frame_count, duration, sample_rate
        );

        Ok(Self {
            frequencies,
            times,
            values,
            duration,
        })
    }

    /// Assemble a spectrogram from pre-computed parts
    ///
    /// Validates every data-model invariant: matching shapes, non-negative
    /// magnitudes, strictly increasing axes, and positive duration. Useful
    /// for callers that obtain a time-frequency matrix elsewhere.
    pub fn from_parts(
        frequencies: Vec<f64>,
        times: Vec<f64>,
        values: Vec<Vec<f64>>,
        duration: f64,
    ) -> Result<Self, SpectrogramError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SpectrogramError::MalformedMatrix {
                reason: format!("duration must be positive and finite (got {})", duration),
            });
        }
        if frequencies.is_empty() || times.is_empty() {
            return Err(SpectrogramError::MalformedMatrix {
                reason: "frequency and time axes must be non-empty".to_string(),
            });
        }
        if values.len() != frequencies.len() {
            return Err(SpectrogramError::MalformedMatrix {
                reason: format!(
                    "{} rows but {} frequencies",
                    values.len(),
                    frequencies.len()
                ),
            });
        }
        for (row, row_values) in values.iter().enumerate() {
            if row_values.len() != times.len() {
                return Err(SpectrogramError::MalformedMatrix {
                    reason: format!(
                        "row {} has {} columns but {} times",
                        row,
                        row_values.len(),
                        times.len()
                    ),
                });
            }
            if row_values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(SpectrogramError::MalformedMatrix {
                    reason: format!("row {} contains a negative or non-finite magnitude", row),
                });
            }
        }
        if !strictly_increasing(&frequencies) || frequencies[0] < 0.0 {
            return Err(SpectrogramError::MalformedMatrix {
                reason: "frequencies must be non-negative and strictly increasing".to_string(),
            });
        }
        if !strictly_increasing(&times) || times[0] < 0.0 {
            return Err(SpectrogramError::MalformedMatrix {
                reason: "times must be non-negative and strictly increasing".to_string(),
            });
        }

        Ok(Self {
            frequencies,
            times,
            values,
            duration,
        })
    }

    /// Bin center frequencies in Hz, Nyquist dropped
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Frame centers in seconds
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Magnitude matrix, one row per frequency bin
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Total signal length in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Convert the magnitude matrix to decibels relative to its global maximum
    ///
    /// Each cell becomes `20 * log10(max(v, EPSILON) / global_max)`, so the
    /// loudest cell is 0 dB and everything else is negative. This is the view
    /// a plotting collaborator consumes; the crate itself never renders.
    ///
    /// # Returns
    /// The dB matrix, or `SilentSpectrogram` when every magnitude is zero
    /// and the normalization is undefined.
    pub fn to_db(&self) -> Result<Vec<Vec<f64>>, IndexError> {
        let global_max = self
            .values
            .iter()
            .flat_map(|row| row.iter())
            .fold(0.0_f64, |acc, &v| acc.max(v));
        if global_max <= 0.0 {
            return Err(IndexError::SilentSpectrogram);
        }

        Ok(self
            .values
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&v| 20.0 * (v.max(EPSILON) / global_max).log10())
                    .collect()
            })
            .collect())
    }
}

fn strictly_increasing(axis: &[f64]) -> bool {
    axis.windows(2).all(|pair| pair[0] < pair[1])
}
