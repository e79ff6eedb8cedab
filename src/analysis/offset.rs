//! Timestamp parsing and time-to-byte-offset resolution
//!
//! Timestamps are `H:M:S` clock times (integers, no fixed width) or one of the
//! case-sensitive sentinels `START` / `END`.
//!
//! # Example
//!
//! ```
//! use wavedraw::analysis::offset::Timestamp;
//! use wavedraw::io::header::ClockTime;
//!
//! let ts: Timestamp = "00:01:30".parse()?;
//! assert_eq!(ts, Timestamp::Clock(ClockTime::new(0, 1, 30)));
//! assert_eq!("END".parse::<Timestamp>()?, Timestamp::End);
//! # Ok::<(), wavedraw::WaveError>(())
//! ```

use crate::error::WaveError;
use crate::io::header::{ClockTime, WaveHeader};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position in the file: a data-region bound or an elapsed clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timestamp {
    /// First byte of the data region
    Start,
    /// `subChunk2Size`
    End,
    /// Elapsed time from the start of the audio
    Clock(ClockTime),
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Start
    }
}

impl FromStr for Timestamp {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "START" => return Ok(Timestamp::Start),
            "END" => return Ok(Timestamp::End),
            _ => {}
        }

        let malformed =
            || WaveError::Configuration(format!("Malformed timestamp {:?}: expected HH:MM:SS", s));

        let parts = s
            .split(':')
            .map(|unit| unit.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| malformed())?;

        match parts.as_slice() {
            [hours, minutes, seconds] => {
                Ok(Timestamp::Clock(ClockTime::new(*hours, *minutes, *seconds)))
            }
            _ => Err(malformed()),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Start => write!(f, "START"),
            Timestamp::End => write!(f, "END"),
            Timestamp::Clock(t) => write!(f, "{:02}:{:02}:{:02}", t.hours, t.minutes, t.seconds),
        }
    }
}

/// Convert a clock time into a byte offset relative to the data region
///
/// The bounds check compares each component against the header length in turn:
/// hours first, then minutes, and seconds only when the minutes already equal the
/// file's minutes. Anything that passes resolves to
/// `(h * 3600 + m * 60 + s) * sample_rate * block_align`.
///
/// # Errors
///
/// `WaveError::Range` with the message naming the component that overflowed.
pub fn resolve_offset(header: &WaveHeader, time: &ClockTime) -> Result<u64, WaveError> {
    let length = &header.length;

    if time.hours > length.hours {
        return Err(WaveError::Range("Length in hours is too long".to_string()));
    }
    if time.minutes > length.minutes {
        return Err(WaveError::Range("Length in minutes is too long".to_string()));
    }
    if time.seconds > length.seconds && time.minutes == length.minutes {
        return Err(WaveError::Range("Length in seconds is too long".to_string()));
    }

    let offset = time
        .total_seconds()
        .and_then(|v| v.checked_mul(u64::from(header.sample_rate)))
        .and_then(|v| v.checked_mul(u64::from(header.block_align)))
        .ok_or_else(|| WaveError::Range(format!("Offset for {:?} overflows", time)))?;

    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::header::file_length;

    /// Header for a mono 16-bit file of the given duration in seconds
    fn test_header(sample_rate: u32, seconds: u32) -> WaveHeader {
        let block_align = 2;
        let sub_chunk2_size = seconds * sample_rate * u32::from(block_align);
        WaveHeader {
            chunk_id: *b"RIFF",
            chunk_size: 36 + sub_chunk2_size,
            format: *b"WAVE",
            sub_chunk1_id: *b"fmt ",
            sub_chunk1_size: 16,
            audio_format: 1,
            num_channels: 1,
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
    fn test_parse_timestamps() {
        assert_eq!("START".parse::<Timestamp>().unwrap(), Timestamp::Start);
        assert_eq!("END".parse::<Timestamp>().unwrap(), Timestamp::End);
        assert_eq!(
            "1:2:3".parse::<Timestamp>().unwrap(),
            Timestamp::Clock(ClockTime::new(1, 2, 3))
        );
        assert_eq!(
            "00:06:42".parse::<Timestamp>().unwrap(),
            Timestamp::Clock(ClockTime::new(0, 6, 42))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["start", "end", "", "1:2", "1:2:3:4", "a:b:c", "-1:00:00", "00:01:xx"] {
            let result = bad.parse::<Timestamp>();
            assert!(
                matches!(result, Err(WaveError::Configuration(_))),
                "{:?} should be rejected, got {:?}",
                bad,
                result
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let ts = Timestamp::Clock(ClockTime::new(0, 6, 42));
        assert_eq!(ts.to_string(), "00:06:42");
        assert_eq!(ts.to_string().parse::<Timestamp>().unwrap(), ts);
    }

    #[test]
    fn test_offset_formula() {
        let header = test_header(44100, 400); // 00:06:40
        let offset = resolve_offset(&header, &ClockTime::new(0, 1, 30)).unwrap();
        assert_eq!(offset, 90 * 44100 * 2);
        assert_eq!(resolve_offset(&header, &ClockTime::default()).unwrap(), 0);
    }

    #[test]
    fn test_minutes_too_long() {
        let header = test_header(8000, 401); // 00:06:41
        let err = resolve_offset(&header, &ClockTime::new(0, 7, 0)).unwrap_err();
        assert_eq!(err, WaveError::Range("Length in minutes is too long".to_string()));
    }

    #[test]
    fn test_seconds_too_long() {
        let header = test_header(8000, 401);
        let err = resolve_offset(&header, &ClockTime::new(0, 6, 42)).unwrap_err();
        assert_eq!(err, WaveError::Range("Length in seconds is too long".to_string()));
    }

    #[test]
    fn test_hours_too_long() {
        let header = test_header(8000, 401);
        let err = resolve_offset(&header, &ClockTime::new(1, 0, 0)).unwrap_err();
        assert_eq!(err, WaveError::Range("Length in hours is too long".to_string()));
    }

    #[test]
    fn test_seconds_only_checked_at_max_minutes() {
        // 00:06:41 long: 00:05:59 passes even though 59 > 41
        let header = test_header(8000, 401);
        assert!(resolve_offset(&header, &ClockTime::new(0, 5, 59)).is_ok());
        assert!(resolve_offset(&header, &ClockTime::new(0, 6, 41)).is_ok());
    }

    #[test]
    fn test_fails_exactly_on_tie_break() {
        let header = test_header(100, 2 * 60 + 30); // 00:02:30
        let length = header.length;
        for h in 0..2u64 {
            for m in 0..4u64 {
                for s in 0..62u64 {
                    let time = ClockTime::new(h, m, s);
                    let should_fail = h > length.hours
                        || m > length.minutes
                        || (s > length.seconds && m == length.minutes);
                    assert_eq!(
                        resolve_offset(&header, &time).is_err(),
                        should_fail,
                        "{:?}",
                        time
                    );
                }
            }
        }
    }

    #[test]
    fn test_huge_seconds_is_range_error() {
        // 00:03:20 long; seconds are unbounded while minutes are below the maximum
        let header = test_header(100, 200);
        let ts: Timestamp = "00:01:18446744073709551615".parse().unwrap();
        let time = match ts {
            Timestamp::Clock(time) => time,
            other => panic!("expected clock time, got {:?}", other),
        };
        assert!(matches!(resolve_offset(&header, &time), Err(WaveError::Range(_))));

        // Fits in total seconds but not once scaled to bytes
        let time = ClockTime::new(0, 1, u64::MAX / 100);
        assert!(matches!(resolve_offset(&header, &time), Err(WaveError::Range(_))));
    }

    #[test]
    fn test_offset_monotonic() {
        let header = test_header(100, 3 * 60 + 10);
        let mut previous = 0;
        for total in 0..=(3 * 60 + 10) {
            let time = ClockTime::from_seconds(total);
            let offset = resolve_offset(&header, &time).unwrap();
            assert!(offset >= previous, "offset decreased at {}s", total);
            previous = offset;
        }
    }
}
