//! Error types for header parsing, offset resolution and aggregation

use std::fmt;

/// Errors that can occur while summarizing a wave file
#[derive(Debug, Clone, PartialEq)]
pub enum WaveError {
    /// Missing or invalid caller-supplied parameter, raised before any I/O
    Configuration(String),

    /// File could not be opened or read
    Io(String),

    /// File is not a supported RIFF/WAVE layout
    Format(String),

    /// Requested time lies outside the file duration
    Range(String),

    /// Aggregation was cancelled between columns
    Cancelled,
}

impl fmt::Display for WaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            WaveError::Io(msg) => write!(f, "I/O error: {}", msg),
            WaveError::Format(msg) => write!(f, "Format error: {}", msg),
            WaveError::Range(msg) => write!(f, "Range error: {}", msg),
            WaveError::Cancelled => write!(f, "Aggregation cancelled"),
        }
    }
}

impl std::error::Error for WaveError {}

impl From<std::io::Error> for WaveError {
    fn from(err: std::io::Error) -> Self {
        WaveError::Io(err.to_string())
    }
}

impl WaveError {
    /// Message carried by the error, without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            WaveError::Configuration(msg)
            | WaveError::Io(msg)
            | WaveError::Format(msg)
            | WaveError::Range(msg) => msg,
            WaveError::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_kind() {
        let err = WaveError::Range("Length in hours is too long".to_string());
        assert_eq!(err.to_string(), "Range error: Length in hours is too long");
        assert_eq!(err.message(), "Length in hours is too long");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.wav");
        let err: WaveError = io.into();
        assert!(matches!(err, WaveError::Io(ref msg) if msg.contains("missing.wav")));
    }
}
