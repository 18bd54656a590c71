#[derive(Debug, thiserror::Error)]
pub enum ScenePathError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Unresolvable parent segment in pattern: {0}")]
    UnresolvableParent(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScenePathError>;

impl From<serde_json::Error> for ScenePathError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
