use thiserror::Error;

/// Settings-file errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read settings file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Reasons a configuration document fails to parse.
///
/// Every variant carries the 1-based line number plus the byte offset and
/// length of the offending line so the CLI can point at it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("line {line}: option found before any [section] header")]
    MissingSectionHeader {
        line: usize,
        offset: usize,
        len: usize,
    },

    #[error("line {line}: section [{section}] already exists")]
    DuplicateSection {
        section: String,
        line: usize,
        offset: usize,
        len: usize,
    },

    #[error("line {line}: option '{option}' already exists in [{section}]")]
    DuplicateOption {
        section: String,
        option: String,
        line: usize,
        offset: usize,
        len: usize,
    },

    #[error("line {line}: expected 'key = value'")]
    MissingDelimiter {
        line: usize,
        offset: usize,
        len: usize,
    },

    #[error("line {line}: option name is empty")]
    EmptyOption {
        line: usize,
        offset: usize,
        len: usize,
    },

    #[error("document is not valid UTF-8")]
    Encoding,
}

impl DocumentError {
    /// Byte offset and length of the offending region, when known.
    #[must_use]
    pub fn span(&self) -> Option<(usize, usize)> {
        match self {
            Self::MissingSectionHeader { offset, len, .. }
            | Self::DuplicateSection { offset, len, .. }
            | Self::DuplicateOption { offset, len, .. }
            | Self::MissingDelimiter { offset, len, .. }
            | Self::EmptyOption { offset, len, .. } => Some((*offset, *len)),
            Self::Encoding => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("malformed document: {0}")]
    MalformedDocument(#[from] DocumentError),

    #[error("encrypted document found but '{program}' is not available")]
    DecryptionUnavailable { program: String },

    #[error("encryption error: {0}")]
    Encryption(String),

    #[error("undetermined mnemonics: no free accelerator for '{word}' in {words:?}")]
    MnemonicCollision { word: String, words: Vec<String> },

    #[error("invalid number '{input}': {reason}")]
    InvalidNumber { input: String, reason: String },

    #[error("value too large to decode: {reason}")]
    ResourceExhausted { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status used when this error terminates the binary.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidNumber { .. } => 2,
            Self::MnemonicCollision { .. } => 3,
            Self::DecryptionUnavailable { .. } => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
