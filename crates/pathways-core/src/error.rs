use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid support level: {0}")]
    InvalidSupportLevel(String),

    #[error("invalid insurance type: {0}")]
    InvalidInsuranceType(String),
}
