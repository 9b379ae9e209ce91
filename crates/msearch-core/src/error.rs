use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// The server answered with a non-success status. `message` is the
    /// server-supplied text, shown to the user as is.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Connection error: {0}")]
    Connection(#[source] anyhow::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SettingsError {
    /// Text for the inline error region of the editor.
    pub fn display_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
