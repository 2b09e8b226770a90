use recall_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Category not found: {0}")]
    UnknownCategory(String),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}
