use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FundError {
    #[error("Invalid amount: {amount} ({reason})")]
    InvalidAmount { amount: Decimal, reason: String },

    #[error("Invalid duration: {years} years ({reason})")]
    InvalidDuration { years: u32, reason: String },

    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Decimal overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FundError {
    fn from(e: serde_json::Error) -> Self {
        FundError::SerializationError(e.to_string())
    }
}
