use thiserror::Error;

#[derive(Debug, Error)]
pub enum TankError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Capacitor '{name}' listed in {group} is not defined in the rating file")]
    UnknownComponent { name: String, group: String },

    #[error("Group '{0}' needs at least one member")]
    EmptyGroup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TankError>;
