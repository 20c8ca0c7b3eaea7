use crate::model::board::BoardError;
use thiserror::Error;

/// Reasons a move is rejected. Only the first broken rule is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("not enough tiles to fill the word")]
    InsufficientTiles,
    #[error("tiles must be placed in a single row or column")]
    InvalidArrangement,
    #[error("the first word must cover the center square")]
    NoCenterIntersection,
    #[error("the word must connect to tiles already on the board")]
    NoIntersection,
    #[error("the word skips an empty square")]
    UnfilledSquare,
    #[error("'{0}' is not a word")]
    UndefinedWord(String),
    #[error("{0}")]
    Message(String),
}

impl ValidationError {
    pub fn message(text: impl Into<String>) -> Self {
        ValidationError::Message(text.into())
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            ValidationError::InsufficientTiles => "InsufficientTiles",
            ValidationError::InvalidArrangement => "InvalidArrangement",
            ValidationError::NoCenterIntersection => "NoCenterIntersection",
            ValidationError::NoIntersection => "NoIntersection",
            ValidationError::UnfilledSquare => "UnfilledSquare",
            ValidationError::UndefinedWord(_) => "UndefinedWord",
            ValidationError::Message(_) => "Message",
        }
    }
}

impl From<BoardError> for ValidationError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfBounds(_) | BoardError::Occupied(_) => {
                ValidationError::InvalidArrangement
            }
            BoardError::InvalidSize(_) => ValidationError::Message(err.to_string()),
        }
    }
}
