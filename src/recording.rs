// Recording module - per-recording index cache
//
// SoundRecording owns a single-channel sample sequence and memoizes the
// spectrogram and each default-parameter index value, so repeated access
// computes each at most once. The cache slots are OnceCell publish-once
// cells: concurrent first access cannot race or observe a half-written
// value. Failed computations are not cached.

use once_cell::sync::OnceCell;
use std::path::Path;

use crate::error::{IndexError, SpectrogramError, WavError};
use crate::indices::{
    acoustic_complexity, acoustic_diversity, acoustic_evenness, BandOptions, DEFAULT_CHUNK_SECONDS,
};
use crate::spectrogram::{SpectrogramData, DEFAULT_FFT_SIZE};
use crate::wav;

/// A single-channel recording with lazily computed acoustic indices
///
/// The memoized accessors fix the reference parameter defaults (FFT size
/// 512, 5 s chunks, -50 dB threshold, 10 kHz ceiling, 1 kHz bands).
/// Parameter sweeps should call the free index functions on the shared
/// `spectrogram()` instead. Safe to share across a caller's worker pool.
#[derive(Debug)]
pub struct SoundRecording {
    samples: Vec<f64>,
    sample_rate: f64,
    spectrogram: OnceCell<SpectrogramData>,
    complexity: OnceCell<f64>,
    diversity: OnceCell<f64>,
    evenness: OnceCell<f64>,
}

impl SoundRecording {
    /// Create a recording from raw samples
    ///
    /// # Arguments
    /// * `samples` - Single-channel PCM amplitudes
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self, SpectrogramError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SpectrogramError::NonPositiveSampleRate { sample_rate });
        }
        if samples.is_empty() {
            return Err(SpectrogramError::EmptySignal);
        }

        Ok(Self {
            samples,
            sample_rate,
            spectrogram: OnceCell::new(),
            complexity: OnceCell::new(),
            diversity: OnceCell::new(),
            evenness: OnceCell::new(),
        })
    }

    /// Create a recording by decoding a mono WAV file
    pub fn from_wav_file<P: AsRef<Path>>(path: P) -> Result<Self, WavError> {
        let (samples, sample_rate) = wav::read_mono(path)?;
        Self::new(samples, sample_rate).map_err(|err| WavError::Decode {
            details: err.to_string(),
        })
    }

    /// Raw sample sequence
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Signal length in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// The recording's spectrogram, built on first access
    pub fn spectrogram(&self) -> Result<&SpectrogramData, IndexError> {
        self.spectrogram.get_or_try_init(|| {
            SpectrogramData::build(&self.samples, self.sample_rate, DEFAULT_FFT_SIZE)
                .map_err(IndexError::from)
        })
    }

    /// Acoustic Complexity Index with default parameters, computed once
    pub fn acoustic_complexity(&self) -> Result<f64, IndexError> {
        self.complexity
            .get_or_try_init(|| acoustic_complexity(self.spectrogram()?, DEFAULT_CHUNK_SECONDS))
            .copied()
    }

    /// Acoustic Diversity Index with default parameters, computed once
    pub fn acoustic_diversity(&self) -> Result<f64, IndexError> {
        self.diversity
            .get_or_try_init(|| acoustic_diversity(self.spectrogram()?, BandOptions::default()))
            .copied()
    }

    /// Acoustic Evenness Index with default parameters, computed once
    pub fn acoustic_evenness(&self) -> Result<f64, IndexError> {
        self.evenness
            .get_or_try_init(|| acoustic_evenness(self.spectrogram()?, BandOptions::default()))
            .copied()
    }
}
