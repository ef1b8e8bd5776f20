use thiserror::Error;

/// Errors raised by the fallible surfaces around the joint stabilizer
///
/// The filter core itself never fails; these cover buffer decoding,
/// settings persistence and sample replay.
#[derive(Debug, Error)]
pub enum StabilizerError {
    /// Native hand buffer has the wrong number of floats
    #[error("Hand data buffer has {found} values, expected {expected}")]
    FrameLength { expected: usize, found: usize },

    /// Settings file could not be parsed
    #[error("Failed to parse settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    /// A replay line is not a valid sample record
    #[error("Invalid sample record on line {line}: {source}")]
    Replay {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Filtered record could not be encoded
    #[error("Failed to encode filtered record: {0}")]
    Encode(#[from] serde_json::Error),

    /// File or stream operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for stabilizer operations
pub type Result<T> = std::result::Result<T, StabilizerError>;
