use thiserror::Error;

/// Input rejected before any request is made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid UID")]
    InvalidUid,

    #[error("Please select a team")]
    NoTeamSelected,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with a non-success status.
    #[error("{0}")]
    Server(String),

    /// The request never produced a usable answer.
    #[error("transport failure: {0}")]
    Transport(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ClientError::Transport(err.to_string())
    }
}
