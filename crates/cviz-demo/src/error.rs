use std::path::PathBuf;

use cviz_tools::ToolError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("could not read payload {path}: {source}")]
    Payload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::Tool(_) => 2,
            _ => 1,
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
    use super::DemoError;
    use cviz_tools::ToolError;

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(DemoError::invalid("bad key").exit_code(), 2);
        assert_eq!(DemoError::from(ToolError::unknown("x")).exit_code(), 2);
    }

    #[test]
    fn io_errors_exit_with_one() {
        let error = DemoError::from(std::io::Error::other("disk"));
        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), "I/O error: disk");
    }
}
