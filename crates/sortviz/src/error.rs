use thiserror::Error;

use sortviz_core::ParseAlgorithmError;

pub type Result<T> = std::result::Result<T, SortvizError>;

#[derive(Debug, Error)]
pub enum SortvizError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownAlgorithm(#[from] ParseAlgorithmError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("logging already initialized: {message}")]
    Logging { message: String },

    #[error("{message}")]
    Exit { code: i32, message: String },
}

impl SortvizError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exit { code, .. } => *code,
            Self::UnknownAlgorithm(_) | Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn exit(code: i32, message: impl Into<String>) -> Self {
        Self::Exit {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SortvizError;

    #[test]
    fn exit_constructor_preserves_code_and_message() {
        let error = SortvizError::exit(42, "boom");
        assert_eq!(error.exit_code(), 42);
        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(SortvizError::invalid("size").exit_code(), 2);
        let parse = "shell-sort"
            .parse::<sortviz_core::Algorithm>()
            .unwrap_err();
        let error = SortvizError::from(parse);
        assert_eq!(error.exit_code(), 2);
        assert!(error.to_string().contains("shell-sort"));
    }

    #[test]
    fn io_errors_exit_with_one() {
        let error = SortvizError::from(std::io::Error::other("pipe closed"));
        assert_eq!(error.exit_code(), 1);
        assert!(error.to_string().starts_with("I/O error"));
    }
}
