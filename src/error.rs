use thiserror::Error;

#[derive(Debug, Error)]
pub enum CbzError {
    #[error("no files selected")]
    NoFiles,

    #[error("not a valid archive: {0}")]
    NotAnArchive(String),

    #[error("corrupt entry: {0}")]
    CorruptEntry(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid page list: {0}")]
    InvalidPages(String),
}

pub type CbzResult<T> = Result<T, CbzError>;
