use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteGenError {
    #[error("{0}")] Validation(String),
    #[error("upstream error: {0}")] Upstream(String),
    #[error("parse error: {0}")] Parse(serde_json::Error),
    #[error("schema error: {0}")] Schema(String),
}

impl SiteGenError {
    /// Client-side mistakes are answered with 400; everything else is a 500.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SiteGenError::Validation(_))
    }
}
