/// Error types for number conversion and locale loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The requested locale has no table
    UnknownLocale {
        requested: String,
        available: Vec<String>,
    },
    /// A locale record failed validation
    InvalidLocale(String),
    /// A locale file or directory could not be read or parsed
    LoadError(String),
    /// Converter options are unusable
    InvalidOptions(String),
    /// Input to `from_number`, or a phrase of `to_number`, is malformed
    InvalidNumber(String),
    /// A segment or phrase could not be encoded or decoded
    InvalidSegment(String),
    /// The number needs a scale word the locale does not define
    UnsupportedMagnitude { magnitude: usize, max: usize },
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::UnknownLocale {
                requested,
                available,
            } => write!(
                f,
                "Unknown locale '{}': locale must be one of {}",
                requested,
                available.join(", ")
            ),
            ConvertError::InvalidLocale(msg) => write!(f, "Invalid locale table: {}", msg),
            ConvertError::LoadError(msg) => write!(f, "Locale load error: {}", msg),
            ConvertError::InvalidOptions(msg) => write!(f, "Invalid options: {}", msg),
            ConvertError::InvalidNumber(msg) => write!(f, "Invalid number: {}", msg),
            ConvertError::InvalidSegment(msg) => write!(f, "Invalid segment: {}", msg),
            ConvertError::UnsupportedMagnitude { magnitude, max } => write!(
                f,
                "Number needs a scale word for 1000^{} but the locale stops at 1000^{}",
                magnitude, max
            ),
        }
    }
}

impl std::error::Error for ConvertError {}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;
