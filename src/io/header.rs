//! Canonical 44-byte RIFF/WAVE header parsing
//!
//! The header is read once into an immutable [`WaveHeader`] value. Callers that need it
//! for several operations parse it once and pass it along explicitly.
//!
//! # Layout
//!
//! ```text
//! offset  len  field
//!      0    4  chunkId        ("RIFF")
//!      4    4  chunkSize
//!      8    4  format         ("WAVE")
//!     12    4  subChunk1ID
//!     16    4  subChunk1Size
//!     20    2  audioFormat
//!     22    2  numChannels
//!     24    4  sampleRate
//!     28    4  byteRate
//!     32    2  blockAlign
//!     34    2  bitsPerSample
//!     36    4  subChunk2ID
//!     40    4  subChunk2Size
//! ```
//!
//! All numeric fields are little-endian; the four tags are raw bytes.

use crate::error::WaveError;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::io::{ErrorKind, Read};

/// Size of the canonical header in bytes
pub const HEADER_LEN: usize = 44;

/// Byte offset of the first PCM sample in the file
pub const DATA_START: u64 = HEADER_LEN as u64;

const RIFF_ID: [u8; 4] = *b"RIFF";
const WAVE_FORMAT_ID: [u8; 4] = *b"WAVE";

/// Wall-clock position or duration, split into hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockTime {
    /// Whole hours
    pub hours: u64,
    /// Minutes, `0..60` when derived from a second count
    pub minutes: u64,
    /// Seconds, `0..60` when derived from a second count
    pub seconds: u64,
}

impl ClockTime {
    /// Build a clock time from its components
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Decompose a second count into hours, minutes and seconds
    ///
    /// ```
    /// use wavedraw::io::header::ClockTime;
    ///
    /// assert_eq!(ClockTime::from_seconds(3725), ClockTime::new(1, 2, 5));
    /// ```
    pub fn from_seconds(total: u64) -> Self {
        let minutes = total / 60;
        Self {
            hours: minutes / 60,
            minutes: minutes % 60,
            seconds: total % 60,
        }
    }

    /// Total elapsed seconds, `None` if it does not fit in a `u64`
    pub fn total_seconds(&self) -> Option<u64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }
}

/// Parsed canonical WAV header
///
/// Never mutated after [`parse_header`] returns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveHeader {
    /// RIFF tag, always `RIFF` once validated
    #[serde(serialize_with = "serialize_tag")]
    pub chunk_id: [u8; 4],
    /// Size of the RIFF payload
    pub chunk_size: u32,
    /// Format tag, always `WAVE` once validated
    #[serde(serialize_with = "serialize_tag")]
    pub format: [u8; 4],
    /// First sub-chunk tag (normally `fmt `)
    #[serde(rename = "subChunk1ID", serialize_with = "serialize_tag")]
    pub sub_chunk1_id: [u8; 4],
    /// Size of the `fmt ` sub-chunk
    pub sub_chunk1_size: u32,
    /// Audio format code (1 = PCM)
    pub audio_format: u16,
    /// Interleaved channel count
    pub num_channels: u16,
    /// Sample frames per second
    pub sample_rate: u32,
    /// Bytes per second
    pub byte_rate: u32,
    /// Bytes per sample frame across all channels
    pub block_align: u16,
    /// Bits per single-channel sample
    pub bits_per_sample: u16,
    /// Second sub-chunk tag (normally `data`)
    #[serde(rename = "subChunk2ID", serialize_with = "serialize_tag")]
    pub sub_chunk2_id: [u8; 4],
    /// Size of the PCM data region in bytes
    pub sub_chunk2_size: u32,
    /// Playable duration derived from the data size
    pub length: ClockTime,
}

impl WaveHeader {
    /// RIFF tag as text
    pub fn chunk_id_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.chunk_id)
    }

    /// Format tag as text
    pub fn format_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.format)
    }

    /// First sub-chunk tag as text
    pub fn sub_chunk1_id_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sub_chunk1_id)
    }

    /// Second sub-chunk tag as text
    pub fn sub_chunk2_id_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sub_chunk2_id)
    }

    /// Number of whole sample frames in the data region
    pub fn num_samples(&self) -> u64 {
        u64::from(self.sub_chunk2_size)
            .checked_div(u64::from(self.block_align))
            .unwrap_or(0)
    }
}

fn serialize_tag<S: Serializer>(tag: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(tag))
}

fn tag_at(bytes: &[u8; HEADER_LEN], offset: usize) -> [u8; 4] {
    [
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]
}

fn u32_at(bytes: &[u8; HEADER_LEN], offset: usize) -> u32 {
    u32::from_le_bytes(tag_at(bytes, offset))
}

fn u16_at(bytes: &[u8; HEADER_LEN], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Derive the playable duration from data size, block alignment and sample rate
///
/// `floor(floor(sub_chunk2_size / block_align) / sample_rate)` seconds, decomposed
/// into a [`ClockTime`]. A zero `block_align` or `sample_rate` yields a zero length.
pub fn file_length(sub_chunk2_size: u32, block_align: u16, sample_rate: u32) -> ClockTime {
    let seconds = u64::from(sub_chunk2_size)
        .checked_div(u64::from(block_align))
        .and_then(|samples| samples.checked_div(u64::from(sample_rate)))
        .unwrap_or(0);
    ClockTime::from_seconds(seconds)
}

/// Parse the fixed header layout
///
/// # Errors
///
/// `WaveError::Format` when the `RIFF`/`WAVE` tags are missing, or when `block_align`
/// or `sample_rate` is zero (the duration would be undefined).
pub fn parse_header(bytes: &[u8; HEADER_LEN]) -> Result<WaveHeader, WaveError> {
    let chunk_id = tag_at(bytes, 0);
    let format = tag_at(bytes, 8);

    if chunk_id != RIFF_ID {
        return Err(WaveError::Format(format!(
            "Not a RIFF file (chunk id {:?})",
            String::from_utf8_lossy(&chunk_id)
        )));
    }
    if format != WAVE_FORMAT_ID {
        return Err(WaveError::Format(format!(
            "Not a WAVE file (format {:?})",
            String::from_utf8_lossy(&format)
        )));
    }

    let block_align = u16_at(bytes, 32);
    let sample_rate = u32_at(bytes, 24);
    if block_align == 0 {
        return Err(WaveError::Format("Block align must be non-zero".to_string()));
    }
    if sample_rate == 0 {
        return Err(WaveError::Format("Sample rate must be non-zero".to_string()));
    }

    let sub_chunk2_size = u32_at(bytes, 40);

    Ok(WaveHeader {
        chunk_id,
        chunk_size: u32_at(bytes, 4),
        format,
        sub_chunk1_id: tag_at(bytes, 12),
        sub_chunk1_size: u32_at(bytes, 16),
        audio_format: u16_at(bytes, 20),
        num_channels: u16_at(bytes, 22),
        sample_rate,
        byte_rate: u32_at(bytes, 28),
        block_align,
        bits_per_sample: u16_at(bytes, 34),
        sub_chunk2_id: tag_at(bytes, 36),
        sub_chunk2_size,
        length: file_length(sub_chunk2_size, block_align, sample_rate),
    })
}

/// Read and parse the header from the start of `reader`
///
/// # Errors
///
/// `WaveError::Io` when fewer than 44 bytes are available or the read fails, plus the
/// format errors of [`parse_header`].
pub fn read_header<R: Read>(reader: &mut R) -> Result<WaveHeader, WaveError> {
    let mut bytes = [0u8; HEADER_LEN];
    reader.read_exact(&mut bytes).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => WaveError::Io(format!(
            "Wave header truncated: expected {} bytes",
            HEADER_LEN
        )),
        _ => WaveError::from(e),
    })?;

    let header = parse_header(&bytes)?;
    log::debug!(
        "Parsed wave header: {} ch, {} Hz, {} bits, {} data bytes, length {:?}",
        header.num_channels,
        header.sample_rate,
        header.bits_per_sample,
        header.sub_chunk2_size,
        header.length
    );
    Ok(header)
}
