// WAV module - single-purpose file adapter
//
// Decodes a mono WAV file into the raw-sample/sample-rate pair the
// spectrogram builder consumes. This is the only place the crate touches
// the filesystem; the numeric core stays free of I/O.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::debug;

use crate::error::WavError;

/// Read a mono WAV file into normalized f64 samples
///
/// Integer PCM (8 to 32 bits) is scaled to roughly [-1, 1]; 32-bit float
/// PCM is widened as-is. The indices are scale-invariant, so the exact
/// normalization does not affect results.
///
/// # Returns
/// The sample sequence and sample rate in Hz, or an error for undecodable,
/// multi-channel, or empty files.
pub fn read_mono<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, f64), WavError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(WavError::UnsupportedChannels {
            channels: spec.channels,
        });
    }

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / scale))
                .collect::<Result<_, _>>()?
        }
    };

    if samples.is_empty() {
        return Err(WavError::EmptyFile);
    }

    debug!(
        "Decoded {} samples at {} Hz ({} bit {:?})",
        samples.len(),
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format
    );

    Ok((samples, f64::from(spec.sample_rate)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::path::PathBuf;

    fn temp_wav(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_read_mono_roundtrip() {
        let path = temp_wav("ecoacoustics_mono_roundtrip.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for i in 0..1_000_i32 {
            let t = i as f64 / 44_100.0;
            let amplitude = (2.0 * std::f64::consts::PI * 440.0 * t).sin();
            writer
                .write_sample((amplitude * i16::MAX as f64) as i16)
                .unwrap();
        }
        writer.finalize().unwrap();

        let (samples, sample_rate) = read_mono(&path).unwrap();
        assert_eq!(samples.len(), 1_000);
        assert_eq!(sample_rate, 44_100.0);
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_mono_rejects_stereo() {
        let path = temp_wav("ecoacoustics_stereo_rejected.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..100 {
            writer.write_sample(1_000_i16).unwrap();
            writer.write_sample(-1_000_i16).unwrap();
        }
        writer.finalize().unwrap();

        assert_eq!(
            read_mono(&path).unwrap_err(),
            WavError::UnsupportedChannels { channels: 2 }
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_mono_rejects_empty_file() {
        let path = temp_wav("ecoacoustics_empty_rejected.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(&path, spec).unwrap();
        writer.finalize().unwrap();

        assert_eq!(read_mono(&path).unwrap_err(), WavError::EmptyFile);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_mono_missing_file() {
        let err = read_mono(temp_wav("ecoacoustics_does_not_exist.wav")).unwrap_err();
        assert!(matches!(err, WavError::Decode { .. }));
    }
}
