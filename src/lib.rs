// Ecoacoustics - acoustic indices for soundscape analysis
//
// Computes scalar indices summarizing the complexity, diversity, and
// evenness of energy distribution in a recording's time-frequency
// representation. The spectrogram is built once per recording; every index
// borrows it read-only, so index computations are deterministic and may run
// in any order or concurrently.

// Module declarations
pub mod error;
pub mod indices;
pub mod recording;
pub mod spectrogram;
pub mod wav;

// Re-exports for convenience
pub use error::{ErrorCode, IndexError, SpectrogramError, WavError};
pub use indices::{
    acoustic_complexity, acoustic_diversity, acoustic_entropy, acoustic_evenness,
    bioacoustic_index, median_envelope, normalized_difference, BandOptions,
    DEFAULT_CHUNK_SECONDS,
};
pub use recording::SoundRecording;
pub use spectrogram::{SpectrogramData, DEFAULT_FFT_SIZE, EPSILON};
