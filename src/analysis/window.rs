//! Partitioning a requested time range into fixed-width column windows

use super::offset::{resolve_offset, Timestamp};
use crate::error::WaveError;
use crate::io::header::{WaveHeader, DATA_START};
use serde::{Deserialize, Serialize};

/// Byte range of a request and the per-column read size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetWindow {
    /// First byte read, as a file offset
    pub start_pos: u64,
    /// End of the requested range
    pub end_pos: u64,
    /// Sample frames per column
    pub block_size: u64,
    /// Bytes per column, always `block_size * block_align`
    pub chunk_size: u64,
}

impl OffsetWindow {
    /// File offset of column `x`
    pub fn column_position(&self, x: usize) -> u64 {
        self.start_pos + x as u64 * self.chunk_size
    }
}

fn start_position(header: &WaveHeader, start: &Timestamp) -> Result<u64, WaveError> {
    match start {
        Timestamp::Start => Ok(DATA_START),
        Timestamp::End => Ok(u64::from(header.sub_chunk2_size)),
        Timestamp::Clock(time) => resolve_offset(header, time)?
            .checked_add(DATA_START)
            .ok_or_else(|| WaveError::Range(format!("Offset for {} overflows", start))),
    }
}

fn end_position(header: &WaveHeader, end: &Timestamp) -> Result<u64, WaveError> {
    match end {
        Timestamp::Start => Ok(DATA_START),
        Timestamp::End => Ok(u64::from(header.sub_chunk2_size)),
        Timestamp::Clock(time) => resolve_offset(header, time),
    }
}

/// Compute the column layout for `width` columns between `start` and `end`
///
/// `block_size = floor(floor((end_pos - start_pos) / block_align) / width)`. When the
/// range holds fewer frames than `width`, `block_size` is zero and every column is
/// empty.
///
/// # Errors
///
/// - `WaveError::Configuration` if `width` is zero
/// - `WaveError::Format` if the header has a zero `block_align`
/// - `WaveError::Range` if either bound lies past the file length, or start is after end
pub fn compute_window(
    header: &WaveHeader,
    start: &Timestamp,
    end: &Timestamp,
    width: usize,
) -> Result<OffsetWindow, WaveError> {
    if width == 0 {
        return Err(WaveError::Configuration(
            "samples() required parameter: width".to_string(),
        ));
    }

    if header.block_align == 0 {
        return Err(WaveError::Format("Block align must be non-zero".to_string()));
    }

    let start_pos = start_position(header, start)?;
    let end_pos = end_position(header, end)?;

    if end_pos < start_pos {
        return Err(WaveError::Range(format!(
            "Start ({}) is after end ({})",
            start, end
        )));
    }

    let block_align = u64::from(header.block_align);
    let block_size = (end_pos - start_pos) / block_align / width as u64;
    let chunk_size = block_size * block_align;

    log::debug!(
        "Offset window {}..{}: {} frames ({} bytes) per column over {} columns",
        start_pos,
        end_pos,
        block_size,
        chunk_size,
        width
    );
    if block_size == 0 {
        log::warn!(
            "Requested range {}..{} is narrower than {} columns; columns will be empty",
            start_pos,
            end_pos,
            width
        );
    }

    Ok(OffsetWindow {
        start_pos,
        end_pos,
        block_size,
        chunk_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::header::{file_length, ClockTime};

    fn stereo_header(sample_rate: u32, frames: u32) -> WaveHeader {
        let block_align = 4;
        let sub_chunk2_size = frames * u32::from(block_align);
        WaveHeader {
            chunk_id: *b"RIFF",
            chunk_size: 36 + sub_chunk2_size,
            format: *b"WAVE",
            sub_chunk1_id: *b"fmt ",
            sub_chunk1_size: 16,
            audio_format: 1,
            num_channels: 2,
            sample_rate,
            byte_rate: sample_rate * u32::from(block_align),
            block_align,
            bits_per_sample: 16,
            sub_chunk2_id: *b"data",
            sub_chunk2_size,
            length: file_length(sub_chunk2_size, block_align, sample_rate),
        }
    }

    #[test]
    fn test_whole_file_window() {
        let header = stereo_header(1000, 10_000); // 10 s
        let window = compute_window(&header, &Timestamp::Start, &Timestamp::End, 100).unwrap();

        assert_eq!(window.start_pos, DATA_START);
        assert_eq!(window.end_pos, 40_000);
        assert_eq!(window.block_size, (40_000 - 44) / 4 / 100);
        assert_eq!(window.chunk_size, window.block_size * 4);
        assert_eq!(window.column_position(3), DATA_START + 3 * window.chunk_size);
    }

    #[test]
    fn test_clock_window() {
        let header = stereo_header(1000, 10_000);
        let start = Timestamp::Clock(ClockTime::new(0, 0, 2));
        let end = Timestamp::Clock(ClockTime::new(0, 0, 6));
        let window = compute_window(&header, &start, &end, 40).unwrap();

        assert_eq!(window.start_pos, 2 * 1000 * 4 + DATA_START);
        assert_eq!(window.end_pos, 6 * 1000 * 4);
        assert_eq!(window.block_size, (24_000 - 8_044) / 4 / 40);
        assert_eq!(window.chunk_size % 4, 0);
    }

    #[test]
    fn test_narrow_range_yields_zero_block() {
        let header = stereo_header(1000, 50);
        let window = compute_window(&header, &Timestamp::Start, &Timestamp::End, 800).unwrap();
        assert_eq!(window.block_size, 0);
        assert_eq!(window.chunk_size, 0);
    }

    #[test]
    fn test_zero_width_is_configuration_error() {
        let header = stereo_header(1000, 10_000);
        let err = compute_window(&header, &Timestamp::Start, &Timestamp::End, 0).unwrap_err();
        assert!(matches!(err, WaveError::Configuration(_)));
    }

    #[test]
    fn test_inverted_range_is_range_error() {
        let header = stereo_header(1000, 10_000);
        let start = Timestamp::Clock(ClockTime::new(0, 0, 8));
        let end = Timestamp::Clock(ClockTime::new(0, 0, 2));
        let err = compute_window(&header, &start, &end, 10).unwrap_err();
        assert!(matches!(err, WaveError::Range(_)));
    }

    #[test]
    fn test_huge_start_is_range_error() {
        let header = stereo_header(1000, 200_000); // 00:03:20
        let start: Timestamp = "00:01:18446744073709551615".parse().unwrap();
        let err = compute_window(&header, &start, &Timestamp::End, 10).unwrap_err();
        assert!(matches!(err, WaveError::Range(_)), "got {:?}", err);
    }

    #[test]
    fn test_end_sentinel_as_start() {
        let header = stereo_header(1000, 10_000);
        let window = compute_window(&header, &Timestamp::End, &Timestamp::End, 25).unwrap();

        assert_eq!(window.start_pos, 40_000);
        assert_eq!(window.end_pos, 40_000);
        assert_eq!(window.block_size, 0);
        assert_eq!(window.chunk_size, 0);
    }

    #[test]
    fn test_start_sentinel_as_end() {
        let header = stereo_header(1000, 10_000);
        let window = compute_window(&header, &Timestamp::Start, &Timestamp::Start, 5).unwrap();
        assert_eq!(window.start_pos, DATA_START);
        assert_eq!(window.end_pos, DATA_START);
        assert_eq!(window.block_size, 0);

        let start = Timestamp::Clock(ClockTime::new(0, 0, 1));
        let err = compute_window(&header, &start, &Timestamp::Start, 5).unwrap_err();
        assert!(matches!(err, WaveError::Range(_)), "got {:?}", err);
    }

    #[test]
    fn test_out_of_range_bound_propagates() {
        let header = stereo_header(1000, 10_000);
        let start = Timestamp::Clock(ClockTime::new(0, 1, 0));
        let err = compute_window(&header, &start, &Timestamp::End, 10).unwrap_err();
        assert_eq!(err, WaveError::Range("Length in minutes is too long".to_string()));
    }
}
