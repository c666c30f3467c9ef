// Error types for acoustic index computation
//
// This module defines custom error types for spectrogram construction, index
// computation, and WAV decoding, providing structured error handling with
// numeric codes suitable for programmatic dispatch by callers.

use log::error;
use std::fmt;

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the public API surface.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

/// Log an index error with structured context
///
/// Logs index errors with the numeric error code, the component where the
/// error occurred, and a human-readable message. Non-blocking; never panics.
pub fn log_index_error(err: &IndexError, context: &str) {
    error!(
        "Index error in {}: code={}, component=Indices, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Spectrogram construction errors
///
/// These errors cover eager input validation for the spectrogram builder.
/// Invalid input is rejected at entry, never silently coerced.
///
/// Error code range: 1001-1005
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrogramError {
    /// Sample rate must be a positive finite number of Hz
    NonPositiveSampleRate { sample_rate: f64 },

    /// FFT segment length must be at least 2 (one retained bin after the
    /// Nyquist row is dropped)
    InvalidFftSize { fft_size: usize },

    /// The sample sequence is empty
    EmptySignal,

    /// The sample sequence is shorter than one analysis frame
    SignalShorterThanWindow { samples: usize, fft_size: usize },

    /// A caller-supplied matrix violates the spectrogram invariants
    MalformedMatrix { reason: String },
}

impl ErrorCode for SpectrogramError {
    fn code(&self) -> i32 {
        match self {
            SpectrogramError::NonPositiveSampleRate { .. } => 1001,
            SpectrogramError::InvalidFftSize { .. } => 1002,
            SpectrogramError::EmptySignal => 1003,
            SpectrogramError::SignalShorterThanWindow { .. } => 1004,
            SpectrogramError::MalformedMatrix { .. } => 1005,
        }
    }

    fn message(&self) -> String {
        match self {
            SpectrogramError::NonPositiveSampleRate { sample_rate } => {
                format!(
                    "Sample rate must be positive and finite (got {})",
                    sample_rate
                )
            }
            SpectrogramError::InvalidFftSize { fft_size } => {
                format!("FFT size must be at least 2 (got {})", fft_size)
            }
            SpectrogramError::EmptySignal => "Sample sequence is empty".to_string(),
            SpectrogramError::SignalShorterThanWindow { samples, fft_size } => {
                format!(
                    "Need at least one full analysis frame: {} samples < FFT size {}",
                    samples, fft_size
                )
            }
            SpectrogramError::MalformedMatrix { reason } => {
                format!("Malformed spectrogram matrix: {}", reason)
            }
        }
    }
}

impl fmt::Display for SpectrogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpectrogramError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for SpectrogramError {}

/// Index computation errors
///
/// Invalid parameters are rejected eagerly (codes 2001-2002). Degenerate
/// computations (undefined ratios over zero-sum rows, bands, or vectors)
/// are deliberate, named outcomes (codes 2003-2007) instead of silently
/// propagating NaN or infinity. The four declared-but-unrealized indices
/// fail with `NotImplemented` (code 3001), distinguishable from any valid
/// zero result.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexError {
    /// Chunk length must be a positive finite number of seconds
    InvalidChunkLength { seconds: f64 },

    /// Band layout must yield at least one complete band below the ceiling
    InvalidBandLayout {
        max_frequency: f64,
        frequency_step: f64,
    },

    /// Every magnitude in the spectrogram is zero; dB normalization is undefined
    SilentSpectrogram,

    /// A frequency row has zero magnitude sum within a chunk
    SilentChunkRow { chunk: usize, row: usize },

    /// A chunk window contains no analysis frames
    EmptyChunk { chunk: usize },

    /// A frequency band contains no spectrogram bins
    EmptyBand { band: usize },

    /// Gini coefficient of an empty or zero-mean vector is undefined
    ZeroMeanVector,

    /// The named index is declared but not yet realized
    NotImplemented { index: &'static str },

    /// Spectrogram construction failed
    Spectrogram(SpectrogramError),
}

impl IndexError {
    /// Whether this error is a degenerate computation (an undefined ratio
    /// detected mid-computation) rather than rejected input or a stub.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            IndexError::SilentSpectrogram
                | IndexError::SilentChunkRow { .. }
                | IndexError::EmptyChunk { .. }
                | IndexError::EmptyBand { .. }
                | IndexError::ZeroMeanVector
        )
    }
}

impl ErrorCode for IndexError {
    fn code(&self) -> i32 {
        match self {
            IndexError::InvalidChunkLength { .. } => 2001,
            IndexError::InvalidBandLayout { .. } => 2002,
            IndexError::SilentSpectrogram => 2003,
            IndexError::SilentChunkRow { .. } => 2004,
            IndexError::EmptyChunk { .. } => 2005,
            IndexError::EmptyBand { .. } => 2006,
            IndexError::ZeroMeanVector => 2007,
            IndexError::NotImplemented { .. } => 3001,
            IndexError::Spectrogram(err) => err.code(),
        }
    }

    fn message(&self) -> String {
        match self {
            IndexError::InvalidChunkLength { seconds } => {
                format!("Chunk length must be positive and finite (got {})", seconds)
            }
            IndexError::InvalidBandLayout {
                max_frequency,
                frequency_step,
            } => {
                format!(
                    "No complete frequency band fits below {} Hz with step {} Hz",
                    max_frequency, frequency_step
                )
            }
            IndexError::SilentSpectrogram => {
                "Spectrogram is silent; dB normalization is undefined".to_string()
            }
            IndexError::SilentChunkRow { chunk, row } => {
                format!(
                    "Frequency row {} has zero magnitude sum in chunk {}",
                    row, chunk
                )
            }
            IndexError::EmptyChunk { chunk } => {
                format!("Chunk {} contains no analysis frames", chunk)
            }
            IndexError::EmptyBand { band } => {
                format!("Frequency band {} contains no spectrogram bins", band)
            }
            IndexError::ZeroMeanVector => {
                "Gini coefficient of an empty or zero-mean vector is undefined".to_string()
            }
            IndexError::NotImplemented { index } => {
                format!("Index '{}' is not implemented", index)
            }
            IndexError::Spectrogram(err) => err.message(),
        }
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IndexError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for IndexError {}

impl From<SpectrogramError> for IndexError {
    fn from(err: SpectrogramError) -> Self {
        IndexError::Spectrogram(err)
    }
}

/// WAV adapter errors
///
/// These errors cover the single-purpose file adapter that turns a mono WAV
/// file into a raw sample sequence and sample rate. The numeric core never
/// touches the filesystem.
///
/// Error code range: 4001-4003
#[derive(Debug, Clone, PartialEq)]
pub enum WavError {
    /// The file could not be opened or decoded
    Decode { details: String },

    /// Multi-channel recordings are not supported
    UnsupportedChannels { channels: u16 },

    /// The file contains no samples
    EmptyFile,
}

impl ErrorCode for WavError {
    fn code(&self) -> i32 {
        match self {
            WavError::Decode { .. } => 4001,
            WavError::UnsupportedChannels { .. } => 4002,
            WavError::EmptyFile => 4003,
        }
    }

    fn message(&self) -> String {
        match self {
            WavError::Decode { details } => format!("Failed to decode WAV file: {}", details),
            WavError::UnsupportedChannels { channels } => {
                format!("Expected a mono recording (got {} channels)", channels)
            }
            WavError::EmptyFile => "WAV file contains no samples".to_string(),
        }
    }
}

impl fmt::Display for WavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WavError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for WavError {}

impl From<hound::Error> for WavError {
    fn from(err: hound::Error) -> Self {
        WavError::Decode {
            details: err.to_string(),
        }
    }
}
