use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ecoacoustics::error::log_index_error;
use ecoacoustics::{
    acoustic_complexity, acoustic_diversity, acoustic_evenness, BandOptions, ErrorCode,
    IndexError, SoundRecording, SpectrogramData,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "eco_cli",
    about = "Acoustic index computation for soundscape recordings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute ACI, ADI, and AEI for a mono WAV recording
    Analyze {
        /// Path to the mono WAV file
        #[arg(long)]
        wav: PathBuf,
        #[arg(long, default_value_t = 512)]
        fft_size: usize,
        #[arg(long, default_value_t = 5.0)]
        chunk_seconds: f64,
        #[arg(long, default_value_t = -50.0, allow_hyphen_values = true)]
        db_threshold: f64,
        #[arg(long, default_value_t = 10_000.0)]
        max_frequency: f64,
        #[arg(long, default_value_t = 1_000.0)]
        frequency_step: f64,
        /// Write the JSON report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print recording and spectrogram metadata
    Info {
        /// Path to the mono WAV file
        #[arg(long)]
        wav: PathBuf,
        #[arg(long, default_value_t = 512)]
        fft_size: usize,
    },
}

#[derive(Serialize)]
struct IndexReport {
    file: String,
    sample_rate: f64,
    duration_seconds: f64,
    fft_size: usize,
    chunk_seconds: f64,
    db_threshold: f64,
    max_frequency: f64,
    frequency_step: f64,
    acoustic_complexity: f64,
    acoustic_diversity: f64,
    acoustic_evenness: f64,
}

#[derive(Serialize)]
struct InfoReport {
    file: String,
    sample_rate: f64,
    duration_seconds: f64,
    frequency_bins: usize,
    time_frames: usize,
    bin_spacing_hz: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            wav,
            fft_size,
            chunk_seconds,
            db_threshold,
            max_frequency,
            frequency_step,
            output,
        } => {
            let options = BandOptions {
                db_threshold,
                max_frequency,
                frequency_step,
            };
            run_analyze(&wav, fft_size, chunk_seconds, options, output)
        }
        Commands::Info { wav, fft_size } => run_info(&wav, fft_size),
    }
}

fn run_analyze(
    wav: &Path,
    fft_size: usize,
    chunk_seconds: f64,
    options: BandOptions,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let recording = SoundRecording::from_wav_file(wav)
        .with_context(|| format!("reading {}", wav.display()))?;
    let spec = SpectrogramData::build(recording.samples(), recording.sample_rate(), fft_size)
        .with_context(|| format!("building spectrogram for {}", wav.display()))?;

    let aci = match index_value(acoustic_complexity(&spec, chunk_seconds), "ACI")? {
        Ok(value) => value,
        Err(code) => return Ok(code),
    };
    let adi = match index_value(acoustic_diversity(&spec, options), "ADI")? {
        Ok(value) => value,
        Err(code) => return Ok(code),
    };
    let aei = match index_value(acoustic_evenness(&spec, options), "AEI")? {
        Ok(value) => value,
        Err(code) => return Ok(code),
    };

    tracing::info!(
        "Analyzed {}: ACI {:.3}, ADI {:.3} bits, AEI {:.3}",
        wav.display(),
        aci,
        adi,
        aei
    );

    let report = IndexReport {
        file: wav.display().to_string(),
        sample_rate: recording.sample_rate(),
        duration_seconds: recording.duration(),
        fft_size,
        chunk_seconds,
        db_threshold: options.db_threshold,
        max_frequency: options.max_frequency,
        frequency_step: options.frequency_step,
        acoustic_complexity: aci,
        acoustic_diversity: adi,
        acoustic_evenness: aei,
    };
    emit_report(&report, output)?;

    Ok(ExitCode::from(0))
}

/// Unwrap an index result, turning degenerate computations into exit code 2
/// and propagating everything else as a hard error.
fn index_value(
    result: std::result::Result<f64, IndexError>,
    label: &str,
) -> Result<std::result::Result<f64, ExitCode>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(err) if err.is_degenerate() => {
            log_index_error(&err, label);
            eprintln!("Degenerate computation in {}: {}", label, err.message());
            Ok(Err(ExitCode::from(2)))
        }
        Err(err) => Err(err).with_context(|| format!("computing {}", label)),
    }
}

fn run_info(wav: &Path, fft_size: usize) -> Result<ExitCode> {
    let recording = SoundRecording::from_wav_file(wav)
        .with_context(|| format!("reading {}", wav.display()))?;
    let spec = SpectrogramData::build(recording.samples(), recording.sample_rate(), fft_size)
        .with_context(|| format!("building spectrogram for {}", wav.display()))?;

    let report = InfoReport {
        file: wav.display().to_string(),
        sample_rate: recording.sample_rate(),
        duration_seconds: recording.duration(),
        frequency_bins: spec.frequencies().len(),
        time_frames: spec.times().len(),
        bin_spacing_hz: recording.sample_rate() / fft_size as f64,
    };
    emit_report(&report, None)?;

    Ok(ExitCode::from(0))
}

fn emit_report<T: Serialize>(report: &T, output: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
