//! WAV file access
//!
//! Header parsing and the file-backed [`wave_file::WaveFile`] handle.

pub mod header;
pub mod wave_file;
