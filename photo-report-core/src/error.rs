use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("A report holds at most {0} photos")]
    Capacity(usize),

    #[error("Photo {0} is too large (max. 10MB)")]
    PhotoTooLarge(String),

    #[error("Field \"{0}\" is required")]
    MissingField(&'static str),

    #[error("Add at least one photo to the report")]
    NoPhotos,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
