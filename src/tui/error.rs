use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("IO/Terminal error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),

    #[error("Render error: {0}")]
    RenderError(String),
}
