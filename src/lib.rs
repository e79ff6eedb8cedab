//! # wavedraw
//!
//! Compact waveform summaries and frequency transforms for 16-bit PCM WAV files.
//!
//! ## Features
//!
//! - **Header parsing**: canonical 44-byte RIFF/WAVE header with derived duration
//! - **Time ranges**: `HH:MM:SS` or `START`/`END` resolved to byte offsets
//! - **Column statistics**: per-pixel-column peak, RMS and mean, split by sign
//! - **DFT**: naive discrete Fourier transform of any real sequence
//! - **Plot layout**: stroke list for an external image encoder
//!
//! ## Quick Start
//!
//! ```no_run
//! use wavedraw::{summarize_wave, SampleOptions};
//!
//! let columns = summarize_wave("song.wav", &SampleOptions::new(1200))?;
//! for (x, column) in columns.iter().enumerate().take(4) {
//!     println!("{}: max {:?} rms {:?}", x, column.pos_max, column.pos_rms);
//! }
//! # Ok::<(), wavedraw::WaveError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! header → offset resolution → column windows → aggregation → (renderer)
//! ```
//!
//! The DFT in [`features::dft`] stands alone.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod render;

// Re-export main types
pub use analysis::offset::{resolve_offset, Timestamp};
pub use analysis::statistics::{ColumnAccumulator, ColumnStatistics};
pub use analysis::window::{compute_window, OffsetWindow};
pub use config::{DrawOptions, MetricColors, Metrics, SampleOptions};
pub use error::WaveError;
pub use features::dft::{compute_dft, compute_dft_parallel, inverse_dft, ComplexSample};
pub use io::header::{read_header, ClockTime, WaveHeader, DATA_START};
pub use io::wave_file::WaveFile;
pub use render::{WavePlot, Stroke};

/// Summarize a WAV file into `options.width` columns
///
/// Parses the header once and aggregates the requested range.
///
/// # Errors
///
/// - `WaveError::Configuration` for an empty path or zero width, before any I/O
/// - `WaveError::Io` if the file cannot be opened or is shorter than a header
/// - `WaveError::Format` for non-RIFF/WAVE files or bit depths other than 16
/// - `WaveError::Range` if a timestamp lies past the end of the audio
///
/// # Example
///
/// ```no_run
/// use wavedraw::{summarize_wave, Metrics, SampleOptions, Timestamp};
///
/// let options = SampleOptions {
///     width: 800,
///     start: "00:00:30".parse()?,
///     end: Timestamp::End,
///     metrics: Metrics { maximums: true, ..Metrics::default() },
/// };
/// let columns = summarize_wave("song.wav", &options)?;
/// assert_eq!(columns.len(), 800);
/// # Ok::<(), wavedraw::WaveError>(())
/// ```
pub fn summarize_wave(
    path: impl AsRef<std::path::Path>,
    options: &SampleOptions,
) -> Result<Vec<ColumnStatistics>, WaveError> {
    use std::time::Instant;
    let start_time = Instant::now();

    let wave = WaveFile::new(path)?;
    if options.width == 0 {
        return Err(WaveError::Configuration(
            "samples() required parameter: width".to_string(),
        ));
    }

    let header = wave.header()?;
    let columns = wave.samples(&header, options)?;

    log::debug!(
        "Summarized {} into {} columns in {:.2} ms",
        wave.path().display(),
        columns.len(),
        start_time.elapsed().as_secs_f32() * 1000.0
    );
    Ok(columns)
}
