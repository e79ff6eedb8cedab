//! Waveform layout for an external image renderer
//!
//! Turns column statistics into vertical strokes. Each column `x` gets one stroke per
//! requested metric and sign, running from the vertical center to
//! `y = height / 2 - (height / 2 / ceiling) * v`, truncated toward zero. Strokes are
//! emitted in paint order: maximums, then RMS, then average, positive before negative.
//!
//! # Example
//!
//! ```
//! use wavedraw::render::pixel_y;
//!
//! // A full-ceiling peak reaches the top edge
//! assert_eq!(pixel_y(400, 32767.0, 32767.0), 0);
//! assert_eq!(pixel_y(400, 32767.0, 0.0), 200);
//! assert_eq!(pixel_y(400, 32767.0, -32767.0), 400);
//! ```

use crate::analysis::statistics::ColumnStatistics;
use crate::config::DrawOptions;
use crate::error::WaveError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Validated image dimensions and vertical scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotGeometry {
    /// Width in pixels (one column each)
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Amplitude at the top edge
    pub ceiling: f64,
}

/// Statistic a stroke depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// `posMax` / `negMax`
    Maximums,
    /// `posRms` / `negRms`
    Rms,
    /// `posAvg` / `negAvg`
    Average,
}

/// One vertical line segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    /// Column index
    pub x: u32,
    /// Vertical center of the image
    pub y_start: i64,
    /// Mapped amplitude
    pub y_end: i64,
    /// Statistic drawn
    pub metric: Metric,
    /// Stroke color
    pub color: String,
}

/// Everything an image encoder needs to paint the waveform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WavePlot {
    /// Image width
    pub width: u32,
    /// Image height
    pub height: u32,
    /// Background fill, if any
    pub background: Option<String>,
    /// Strokes in paint order
    pub strokes: Vec<Stroke>,
    /// Destination path
    pub output: PathBuf,
}

/// Check that `width`, `height` and `ceiling` are present and non-zero
///
/// # Errors
///
/// `WaveError::Configuration("drawWave() required parameters: width, height, ceiling")`
pub fn validate_draw_options(options: &DrawOptions) -> Result<PlotGeometry, WaveError> {
    match (options.width, options.height, options.ceiling) {
        (Some(width), Some(height), Some(ceiling))
            if width > 0 && height > 0 && ceiling.is_finite() && ceiling != 0.0 =>
        {
            Ok(PlotGeometry {
                width,
                height,
                ceiling,
            })
        }
        _ => Err(WaveError::Configuration(
            "drawWave() required parameters: width, height, ceiling".to_string(),
        )),
    }
}

/// Map an amplitude to a pixel row
pub fn pixel_y(height: u32, ceiling: f64, value: f64) -> i64 {
    let half = f64::from(height) / 2.0;
    (half - (half / ceiling) * value).trunc() as i64
}

/// Lay out strokes for every column
///
/// Statistics missing from a column (metric not computed) produce no stroke.
pub fn plot_columns(
    geometry: &PlotGeometry,
    columns: &[ColumnStatistics],
    options: &DrawOptions,
) -> WavePlot {
    let center = i64::from(geometry.height / 2);
    let colors = &options.colors;
    let layers = [
        (Metric::Maximums, options.metrics.maximums, &colors.maximums),
        (Metric::Rms, options.metrics.rms, &colors.rms),
        (Metric::Average, options.metrics.average, &colors.average),
    ];

    let mut strokes = Vec::new();
    for (x, column) in columns.iter().enumerate().take(geometry.width as usize) {
        for (metric, enabled, color) in layers.iter() {
            if !enabled {
                continue;
            }
            let (positive, negative) = match metric {
                Metric::Maximums => (column.pos_max, column.neg_max),
                Metric::Rms => (column.pos_rms, column.neg_rms),
                Metric::Average => (column.pos_avg, column.neg_avg),
            };
            for value in [positive, negative].into_iter().flatten() {
                strokes.push(Stroke {
                    x: x as u32,
                    y_start: center,
                    y_end: pixel_y(geometry.height, geometry.ceiling, value),
                    metric: *metric,
                    color: (*color).clone(),
                });
            }
        }
    }

    log::debug!(
        "Laid out {} strokes for {}x{} plot",
        strokes.len(),
        geometry.width,
        geometry.height
    );

    WavePlot {
        width: geometry.width,
        height: geometry.height,
        background: colors.background.clone(),
        strokes,
        output: options.filename.clone(),
    }
}
