use thiserror::Error;

/// Failures reported by a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Driver or connection failure.
    #[error("{0}")]
    Backend(String),

    /// A document could not be converted to or from the store's format.
    #[error("Document encoding error: {0}")]
    Encoding(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(error: mongodb::error::Error) -> Self {
        StoreError::Backend(error.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(error: mongodb::bson::ser::Error) -> Self {
        StoreError::Encoding(error.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
