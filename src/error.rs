pub type BlitlineResult<T> = Result<T, BlitlineError>;

#[derive(thiserror::Error, Debug)]
pub enum BlitlineError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("compose error: {0}")]
    Compose(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlitlineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn compose(msg: impl Into<String>) -> Self {
        Self::Compose(msg.into())
    }
}
