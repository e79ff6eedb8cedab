//! File-backed entry point
//!
//! A [`WaveFile`] only holds a validated path. Every operation opens its own read-only
//! handle and drops it before returning, on success and on error alike.

use crate::analysis::statistics::{aggregate_columns, ColumnStatistics};
use crate::analysis::window::compute_window;
use crate::config::{DrawOptions, SampleOptions};
use crate::error::WaveError;
use crate::io::header::{read_header, WaveHeader};
use crate::render::{plot_columns, validate_draw_options, WavePlot};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

/// Only 16-bit signed PCM is supported
pub const SUPPORTED_BITS_PER_SAMPLE: u16 = 16;

/// Handle to a WAV file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveFile {
    path: PathBuf,
}

impl WaveFile {
    /// Create a handle for `path`
    ///
    /// No I/O happens here.
    ///
    /// # Errors
    ///
    /// `WaveError::Configuration` if the path is empty.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, WaveError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(WaveError::Configuration(
                "path to wave file must be included in constructor".to_string(),
            ));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path this handle reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<BufReader<File>, WaveError> {
        let file = File::open(&self.path).map_err(|e| {
            WaveError::Io(format!("Cannot open file of path {}: {}", self.path.display(), e))
        })?;
        Ok(BufReader::new(file))
    }

    /// Read and parse the 44-byte header
    ///
    /// The result is a plain value; parse once and pass it to [`WaveFile::samples`]
    /// instead of re-reading for every request.
    pub fn header(&self) -> Result<WaveHeader, WaveError> {
        let mut reader = self.open()?;
        read_header(&mut reader)
    }

    /// Aggregate `options.width` columns of statistics
    ///
    /// # Errors
    ///
    /// Configuration (zero width), Format (not 16-bit), Range (bad timestamps) and Io
    /// errors; there is no partial result.
    pub fn samples(
        &self,
        header: &WaveHeader,
        options: &SampleOptions,
    ) -> Result<Vec<ColumnStatistics>, WaveError> {
        self.samples_with_cancel(header, options, None)
    }

    /// [`WaveFile::samples`] with a cancellation flag checked before every column
    pub fn samples_with_cancel(
        &self,
        header: &WaveHeader,
        options: &SampleOptions,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<ColumnStatistics>, WaveError> {
        if options.width == 0 {
            return Err(WaveError::Configuration(
                "samples() required parameter: width".to_string(),
            ));
        }
        ensure_supported(header)?;

        let window = compute_window(header, &options.start, &options.end, options.width)?;

        log::debug!(
            "Aggregating {} columns from {} ({:?})",
            options.width,
            self.path.display(),
            options.metrics
        );

        let mut reader = self.open()?;
        aggregate_columns(
            &mut reader,
            header.block_align,
            &window,
            options.width,
            &options.metrics,
            cancel,
        )
    }

    /// Validate drawing options, aggregate, and lay out the strokes of a waveform image
    ///
    /// Painting the returned [`WavePlot`] is left to an image library.
    ///
    /// # Errors
    ///
    /// `WaveError::Configuration` with `"drawWave() required parameters: width, height,
    /// ceiling"` before any I/O when a dimension is missing, then the errors of
    /// [`WaveFile::header`] and [`WaveFile::samples`].
    pub fn draw_wave(&self, options: &DrawOptions) -> Result<WavePlot, WaveError> {
        let geometry = validate_draw_options(options)?;
        let header = self.header()?;
        if header.bits_per_sample != SUPPORTED_BITS_PER_SAMPLE {
            return Err(WaveError::Format(
                "drawWave() currently only supports 16 bit audio files!".to_string(),
            ));
        }

        let sample_options = SampleOptions {
            width: geometry.width as usize,
            start: options.start,
            end: options.end,
            metrics: options.metrics,
        };
        let columns = self.samples(&header, &sample_options)?;

        Ok(plot_columns(&geometry, &columns, options))
    }
}

fn ensure_supported(header: &WaveHeader) -> Result<(), WaveError> {
    if header.bits_per_sample != SUPPORTED_BITS_PER_SAMPLE {
        return Err(WaveError::Format(format!(
            "Only 16 bit PCM is supported, file has {} bits per sample",
            header.bits_per_sample
        )));
    }
    Ok(())
}
