pub mod config;
pub mod error;
pub mod types;

#[cfg(feature = "fees")]
pub mod fees;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "compliance")]
pub mod compliance;

#[cfg(feature = "risk")]
pub mod risk;

pub use config::FundPolicy;
pub use error::FundError;
pub use types::*;

/// Standard result type for all fund-engine operations
pub type FundResult<T> = Result<T, FundError>;
