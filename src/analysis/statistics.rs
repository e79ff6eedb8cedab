//! Per-column amplitude statistics
//!
//! Each column's bytes are read as 16-bit signed little-endian samples, one per
//! `block_align` bytes (the first channel of each frame). Samples are folded into a
//! [`ColumnAccumulator`] that keeps separate positive (`>= 0`) and negative (`< 0`)
//! buckets, then finished into a [`ColumnStatistics`] record holding only the
//! requested metrics.
//!
//! Empty buckets report `0` for every statistic. Negative samples feed `neg_rms`,
//! which is reported as a negative number.

use super::window::OffsetWindow;
use crate::config::Metrics;
use crate::error::WaveError;
use serde::{Deserialize, Serialize};
use std::io::{Read, Seek, SeekFrom};
use std::sync::atomic::{AtomicBool, Ordering};

/// Samples are clamped to this magnitude before accumulation
pub const SAMPLE_CLAMP: i32 = 100_000;

/// Statistics for one output column
///
/// Fields are `None` unless the corresponding metric was requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStatistics {
    /// Largest sample, at least 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_max: Option<f64>,
    /// Smallest sample, at most 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neg_max: Option<f64>,
    /// RMS of the positive bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_rms: Option<f64>,
    /// Negated RMS of the negative bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neg_rms: Option<f64>,
    /// Mean of the positive bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_avg: Option<f64>,
    /// Mean of the negative bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neg_avg: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Bucket {
    count: u64,
    sum: i64,
    sum_squares: u64,
    extreme: i32,
}

impl Bucket {
    fn push(&mut self, sample: i32, is_more_extreme: impl Fn(i32, i32) -> bool) {
        self.count += 1;
        self.sum += i64::from(sample);
        self.sum_squares += u64::from(sample.unsigned_abs()).pow(2);
        if is_more_extreme(sample, self.extreme) {
            self.extreme = sample;
        }
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum as f64 / self.count as f64
    }

    fn rms(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum_squares as f64 / self.count as f64).sqrt()
    }
}

/// Running sums for one column, split by sample sign
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnAccumulator {
    positive: Bucket,
    negative: Bucket,
}

impl ColumnAccumulator {
    /// Empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample
    pub fn push(&mut self, sample: i16) {
        let sample = i32::from(sample).clamp(-SAMPLE_CLAMP, SAMPLE_CLAMP);
        if sample < 0 {
            self.negative.push(sample, |s, min| s < min);
        } else {
            self.positive.push(sample, |s, max| s > max);
        }
    }

    /// Number of samples seen
    pub fn len(&self) -> u64 {
        self.positive.count + self.negative.count
    }

    /// True when no sample has been pushed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produce the requested statistics
    pub fn finish(&self, metrics: &Metrics) -> ColumnStatistics {
        let mut stats = ColumnStatistics::default();

        if metrics.maximums {
            stats.pos_max = Some(f64::from(self.positive.extreme));
            stats.neg_max = Some(f64::from(self.negative.extreme));
        }
        if metrics.average {
            stats.pos_avg = Some(self.positive.mean());
            stats.neg_avg = Some(self.negative.mean());
        }
        if metrics.rms {
            stats.pos_rms = Some(self.positive.rms());
            stats.neg_rms = Some(if self.negative.count == 0 {
                0.0
            } else {
                -self.negative.rms()
            });
        }

        stats
    }
}

fn check_block_align(block_align: usize) -> Result<(), WaveError> {
    if block_align < 2 {
        return Err(WaveError::Format(format!(
            "Block align {} cannot hold a 16-bit sample",
            block_align
        )));
    }
    Ok(())
}

/// Fold one column's raw bytes into statistics
///
/// Reads the first two bytes of every `block_align`-sized frame; a trailing partial
/// frame is ignored.
///
/// # Errors
///
/// `WaveError::Format` if `block_align` is too small to hold a 16-bit sample.
pub fn column_statistics(
    chunk: &[u8],
    block_align: usize,
    metrics: &Metrics,
) -> Result<ColumnStatistics, WaveError> {
    check_block_align(block_align)?;
    let stats = chunk
        .chunks_exact(block_align)
        .map(|frame| i16::from_le_bytes([frame[0], frame[1]]))
        .fold(ColumnAccumulator::new(), |mut acc, sample| {
            acc.push(sample);
            acc
        })
        .finish(metrics);
    Ok(stats)
}

/// Read `width` columns from `source` and aggregate each one
///
/// Columns are read in order `0..width`, each `window.chunk_size` bytes starting at
/// [`OffsetWindow::column_position`]. A short read at end of input truncates that
/// column. When `cancel` is set before a column is read, aggregation stops with
/// `WaveError::Cancelled` and no partial result is returned.
///
/// # Errors
///
/// - `WaveError::Format` if `block_align` is too small to hold a 16-bit sample
/// - `WaveError::Io` on seek or read failure
/// - `WaveError::Cancelled` when the cancel flag is raised
pub fn aggregate_columns<R: Read + Seek>(
    source: &mut R,
    block_align: u16,
    window: &OffsetWindow,
    width: usize,
    metrics: &Metrics,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<ColumnStatistics>, WaveError> {
    check_block_align(usize::from(block_align))?;

    let chunk_len = usize::try_from(window.chunk_size)
        .map_err(|_| WaveError::Range(format!("Column size {} is too large", window.chunk_size)))?;
    // read_to_end grows the buffer to what the file actually holds
    let mut buffer = Vec::new();
    let mut columns = Vec::with_capacity(width);

    for x in 0..width {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            log::debug!("Aggregation cancelled at column {}/{}", x, width);
            return Err(WaveError::Cancelled);
        }

        buffer.clear();
        if chunk_len > 0 {
            source.seek(SeekFrom::Start(window.column_position(x)))?;
            source
                .by_ref()
                .take(window.chunk_size)
                .read_to_end(&mut buffer)?;
        }

        columns.push(column_statistics(&buffer, usize::from(block_align), metrics)?);
    }

    Ok(columns)
}
