use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolError>;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("invalid {tool} payload: {source}")]
    Payload {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ToolError {
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Name of the tool the error belongs to, when known.
    pub fn tool(&self) -> Option<&str> {
        match self {
            Self::UnknownTool { name } => Some(name),
            Self::Payload { tool, .. } => Some(tool),
            Self::Serialize(_) => None,
        }
    }
}
