//! Audio file I/O for Splicer
//!
//! Loads and saves mono 16-bit signed PCM WAV files with hound. Anything
//! else (stereo, 8/24/32-bit, float) is rejected on load rather than
//! converted.
//!
//! Saving writes to a temporary file beside the destination and renames it
//! into place, so the destination is either the complete new file or
//! untouched.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::engine::buffer::SampleBuffer;
use crate::error::{Result, SplicerError};

/// Channel count of every supported file
pub const CHANNELS: u16 = 1;

/// Bit depth of every supported file
pub const BITS_PER_SAMPLE: u16 = 16;

/// Load a mono 16-bit PCM WAV file
///
/// # Arguments
/// * `path` - Path to the WAV file
///
/// # Errors
/// * `Io` - If the file cannot be opened
/// * `Decode` - If the header is malformed or truncated, the file is not mono
///   16-bit integer PCM, or the sample data is truncated
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<SampleBuffer> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = WavReader::new(BufReader::new(file))
        .map_err(|e| decode_error(path, "malformed WAV header", Some(e)))?;

    let spec = reader.spec();
    if spec.channels != CHANNELS {
        return Err(decode_error(
            path,
            &format!("expected mono, found {} channels", spec.channels),
            None,
        ));
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(decode_error(
            path,
            &format!(
                "expected 16-bit integer samples, found {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            ),
            None,
        ));
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, _>>()
        .map_err(|e| decode_error(path, "failed to read sample data", Some(e)))?;

    info!(
        "Loaded {} ({} samples at {} Hz)",
        path.display(),
        samples.len(),
        spec.sample_rate
    );

    Ok(SampleBuffer::new(samples, spec.sample_rate))
}

/// Save samples as a mono 16-bit PCM WAV file
///
/// The samples go to a uniquely named temporary file in the destination
/// directory, which is then renamed over `path`. Concurrent saves to the
/// same path each leave a complete file; the last rename wins.
///
/// # Arguments
/// * `path` - Destination path; replaced atomically if it exists
/// * `samples` - Samples to write
/// * `sample_rate` - Sample rate written to the header
///
/// # Errors
/// * `AudioWrite` - If the destination directory cannot hold the file or the
///   write fails
/// * `Io` - If the finished file cannot be moved into place
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[i16], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    let write_error = |e: hound::Error| SplicerError::AudioWrite {
        path: path.display().to_string(),
        source: e,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| write_error(hound::Error::IoError(e)))?;

    write_wav(tmp.as_file_mut(), samples, sample_rate).map_err(write_error)?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| write_error(hound::Error::IoError(e)))?;
    debug!("Wrote {} samples to {}", samples.len(), tmp.path().display());

    tmp.persist(path).map_err(|e| SplicerError::Io(e.error))?;

    info!(
        "Saved {} ({} samples at {} Hz)",
        path.display(),
        samples.len(),
        sample_rate
    );
    Ok(())
}

/// Save a [`SampleBuffer`]
pub fn save_buffer<P: AsRef<Path>>(path: P, buffer: &SampleBuffer) -> Result<()> {
    save_wav(path, &buffer.samples, buffer.sample_rate)
}

// ============================================================================
// Internal helper functions
// ============================================================================

fn write_wav(file: &mut File, samples: &[i16], sample_rate: u32) -> hound::Result<()> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::new(BufWriter::new(file), spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

fn decode_error(path: &Path, reason: &str, source: Option<hound::Error>) -> SplicerError {
    SplicerError::Decode {
        path: path.display().to_string(),
        reason: reason.to_string(),
        source,
    }
}

// ============================================================================
// Tests
// ============================================================================
