// Complexity module - Acoustic Complexity Index (ACI)
//
// ACI measures how much the magnitude in each frequency bin fluctuates from
// frame to frame, summed over fixed-length time chunks. Biotic sound tends
// to vary quickly; steady anthropogenic noise tends not to.

use log::debug;

use crate::error::IndexError;
use crate::spectrogram::SpectrogramData;

/// Compute the Acoustic Complexity Index
///
/// Partitions the time axis into consecutive non-overlapping chunks of
/// `chunk_seconds` starting at zero; `floor(duration / chunk_seconds)`
/// chunks are processed and any trailing partial chunk is discarded. For
/// each chunk and frequency row the index accumulates the sum of absolute
/// frame-to-frame differences divided by the row's magnitude sum; the total
/// is the sum over rows and chunks.
///
/// # Arguments
/// * `spec` - Shared spectrogram
/// * `chunk_seconds` - Epoch length in seconds (reference default 5.0)
///
/// # Returns
/// The index (non-negative), `Ok(0.0)` when no full chunk fits in the
/// recording, or a degenerate-computation error when a chunk contains no
/// frames or a row's magnitude sum is zero and the ratio is undefined.
pub fn acoustic_complexity(
    spec: &SpectrogramData,
    chunk_seconds: f64,
) -> Result<f64, IndexError> {
    if !chunk_seconds.is_finite() || chunk_seconds <= 0.0 {
        return Err(IndexError::InvalidChunkLength {
            seconds: chunk_seconds,
        });
    }

    let times = spec.times();
    let values = spec.values();
    let chunk_count = (spec.duration() / chunk_seconds).floor() as usize;
    debug!(
        "ACI over {} chunks of {} s ({} frames total)",
        chunk_count,
        chunk_seconds,
        times.len()
    );

    let mut total = 0.0;
    for chunk in 0..chunk_count {
        let start = chunk as f64 * chunk_seconds;
        let end = start + chunk_seconds;

        // Frames are time-ordered, so the chunk's columns are contiguous.
        let columns: Vec<usize> = times
            .iter()
            .enumerate()
            .filter(|(_, &t)| t >= start && t < end)
            .map(|(j, _)| j)
            .collect();
        if columns.is_empty() {
            return Err(IndexError::EmptyChunk { chunk });
        }

        for (row, row_values) in values.iter().enumerate() {
            let mut difference_sum = 0.0;
            for pair in columns.windows(2) {
                difference_sum += (row_values[pair[1]] - row_values[pair[0]]).abs();
            }

            let magnitude_sum: f64 = columns.iter().map(|&j| row_values[j]).sum();
            if magnitude_sum == 0.0 {
                return Err(IndexError::SilentChunkRow { chunk, row });
            }

            total += difference_sum / magnitude_sum;
        }
    }

    Ok(total)
}
