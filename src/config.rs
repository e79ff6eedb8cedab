//! Option structs for column sampling and waveform drawing

use crate::analysis::offset::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which per-column statistics to compute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Peak positive and negative sample (`posMax`/`negMax`)
    pub maximums: bool,
    /// Root-mean-square of each sign bucket (`posRms`/`negRms`)
    pub rms: bool,
    /// Mean of each sign bucket (`posAvg`/`negAvg`)
    pub average: bool,
}

impl Metrics {
    /// Request every statistic
    pub fn all() -> Self {
        Self {
            maximums: true,
            rms: true,
            average: true,
        }
    }

    /// True when no statistic is requested
    pub fn is_empty(&self) -> bool {
        !(self.maximums || self.rms || self.average)
    }
}

/// Parameters for [`crate::WaveFile::samples`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleOptions {
    /// Number of output columns (required, must be non-zero)
    pub width: usize,

    /// Start of the requested range (default: data start)
    pub start: Timestamp,

    /// End of the requested range (default: data end)
    pub end: Timestamp,

    /// Statistics to compute per column
    pub metrics: Metrics,
}

impl SampleOptions {
    /// Whole-file options for `width` columns with every statistic enabled
    pub fn new(width: usize) -> Self {
        Self {
            width,
            metrics: Metrics::all(),
            ..Self::default()
        }
    }
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            width: 0,
            start: Timestamp::Start,
            end: Timestamp::End,
            metrics: Metrics::default(),
        }
    }
}

/// Stroke colors per metric, as CSS-style color strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricColors {
    /// Background fill; `None` leaves the canvas untouched
    pub background: Option<String>,
    /// Color of the maximum strokes (default: `#0000ff`)
    pub maximums: String,
    /// Color of the RMS strokes (default: `#659df7`)
    pub rms: String,
    /// Color of the average strokes (default: `#4a6ea8`)
    pub average: String,
}

impl Default for MetricColors {
    fn default() -> Self {
        Self {
            background: None,
            maximums: "#0000ff".to_string(),
            rms: "#659df7".to_string(),
            average: "#4a6ea8".to_string(),
        }
    }
}

/// Parameters for [`crate::WaveFile::draw_wave`]
///
/// `width`, `height` and `ceiling` are required; `ceiling` is the amplitude that maps
/// to the top (and, negated, the bottom) edge of the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Image width in pixels, one column per pixel
    pub width: Option<u32>,
    /// Image height in pixels
    pub height: Option<u32>,
    /// Amplitude reference for the vertical scale
    pub ceiling: Option<f64>,
    /// Statistics to draw
    pub metrics: Metrics,
    /// Stroke and background colors
    pub colors: MetricColors,
    /// Start of the drawn range
    pub start: Timestamp,
    /// End of the drawn range
    pub end: Timestamp,
    /// Output path handed to the image encoder (default: `wave.png`)
    pub filename: PathBuf,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            ceiling: None,
            metrics: Metrics::default(),
            colors: MetricColors::default(),
            start: Timestamp::Start,
            end: Timestamp::End,
            filename: PathBuf::from("wave.png"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_options_defaults() {
        let options = SampleOptions::default();
        assert_eq!(options.width, 0);
        assert_eq!(options.start, Timestamp::Start);
        assert_eq!(options.end, Timestamp::End);
        assert!(options.metrics.is_empty());

        let options = SampleOptions::new(800);
        assert_eq!(options.width, 800);
        assert_eq!(options.metrics, Metrics::all());
    }

    #[test]
    fn test_draw_options_defaults() {
        let options = DrawOptions::default();
        assert!(options.width.is_none() && options.height.is_none() && options.ceiling.is_none());
        assert_eq!(options.colors.maximums, "#0000ff");
        assert_eq!(options.colors.rms, "#659df7");
        assert_eq!(options.colors.average, "#4a6ea8");
        assert_eq!(options.filename, PathBuf::from("wave.png"));
    }
}
