use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Invalid JSON pointer {0:?}: must be empty or start with '/'")]
    InvalidPointer(String),

    #[error("Invalid escape sequence in JSON pointer token {0:?}")]
    InvalidEscape(String),
}
