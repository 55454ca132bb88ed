use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldStateError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("FieldStateError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for FieldStateError {
    fn from(error: std::io::Error) -> Self {
        FieldStateError::Io(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, FieldStateError>;
