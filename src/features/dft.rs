//! Naive discrete Fourier transform
//!
//! For a real signal `x` of length `N`, output bin `i` is
//!
//! ```text
//! real[i] = sum_j x[j] * cos(2*pi*i*j / N)
//! imag[i] = sum_j x[j] * sin(2*pi*i*j / N)
//! ```
//!
//! No normalization, windowing or shifting is applied. Note the positive sign on the
//! sine term: `imag` is the negation of what an `e^{-i...}` FFT reports.
//!
//! O(N^2) time. [`compute_dft_parallel`] spreads output bins over the rayon pool and
//! returns bit-identical results.
//!
//! # Example
//!
//! ```
//! use wavedraw::features::dft::{compute_dft, inverse_dft};
//!
//! let signal = vec![1.0, 0.0, -1.0, 0.0];
//! let spectrum = compute_dft(&signal);
//! assert!((spectrum[1].real - 2.0).abs() < 1e-12);
//!
//! let restored = inverse_dft(&spectrum);
//! assert!(restored.iter().zip(&signal).all(|(a, b)| (a - b).abs() < 1e-12));
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One frequency bin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexSample {
    /// Cosine component
    pub real: f64,
    /// Sine component
    pub imag: f64,
}

impl ComplexSample {
    /// Build a sample from its parts
    pub fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    /// Euclidean magnitude
    pub fn magnitude(&self) -> f64 {
        self.real.hypot(self.imag)
    }

    /// Complex conjugate
    pub fn conj(&self) -> Self {
        Self::new(self.real, -self.imag)
    }
}

fn dft_bin(signal: &[f64], i: usize) -> ComplexSample {
    let n = signal.len() as f64;
    signal
        .iter()
        .enumerate()
        .fold(ComplexSample::default(), |mut acc, (j, &x)| {
            let angle = 2.0 * PI * (i * j) as f64 / n;
            acc.real += x * angle.cos();
            acc.imag += x * angle.sin();
            acc
        })
}

/// Transform `signal` into `signal.len()` frequency bins
pub fn compute_dft(signal: &[f64]) -> Vec<ComplexSample> {
    (0..signal.len()).map(|i| dft_bin(signal, i)).collect()
}

/// [`compute_dft`] with output bins evaluated in parallel
pub fn compute_dft_parallel(signal: &[f64]) -> Vec<ComplexSample> {
    log::debug!("Computing {}-point DFT in parallel", signal.len());
    (0..signal.len())
        .into_par_iter()
        .map(|i| dft_bin(signal, i))
        .collect()
}

/// Reconstruct a real signal from [`compute_dft`] output
///
/// Applies the conjugate transform and scales by `1 / N`; the imaginary residue is
/// discarded.
pub fn inverse_dft(spectrum: &[ComplexSample]) -> Vec<f64> {
    let n = spectrum.len();
    (0..n)
        .map(|j| {
            let sum: f64 = spectrum
                .iter()
                .enumerate()
                .map(|(i, bin)| {
                    let angle = 2.0 * PI * (i * j) as f64 / n as f64;
                    bin.real * angle.cos() + bin.imag * angle.sin()
                })
                .sum();
            sum / n as f64
        })
        .collect()
}
