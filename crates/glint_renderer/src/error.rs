use thiserror::Error;

/// Errors that can occur while rendering or writing pixels.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Render cancelled after {completed_rows} scanlines")]
    Cancelled { completed_rows: u32 },
}

pub type RenderResult<T> = Result<T, RenderError>;
