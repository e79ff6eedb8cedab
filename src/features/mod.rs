//! Numeric feature extraction
//!
//! Independent of the WAV pipeline; works on any finite real sequence.

pub mod dft;
