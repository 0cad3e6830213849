use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown fusion policy: {name:?}")]
    InvalidPolicy { name: String },
    #[error("{context}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("labeler failed while {context}: {message}")]
    Labeler {
        context: &'static str,
        message: String,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl SegmentationError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_policy(name: impl Into<String>) -> Self {
        Self::InvalidPolicy { name: name.into() }
    }

    pub(crate) fn length_mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            context,
            expected,
            actual,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
