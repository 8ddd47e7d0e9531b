use roster_client::ClientError;

/// Errors surfaced by screen operations.
///
/// By the time a caller sees one of these the screen has already logged
/// it and, where the screen alerts, shown the alert.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The operation needs data the screen has not loaded.
    #[error("Nothing loaded yet")]
    NotLoaded,

    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

pub type ScreenResult<T> = Result<T, ScreenError>;
