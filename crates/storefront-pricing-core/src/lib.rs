pub mod error;
pub mod format;
pub mod pricing;
pub mod rounding;
pub mod types;

#[cfg(feature = "cart")]
pub mod cart;

#[cfg(feature = "feed")]
pub mod feed;

pub use error::PricingError;
pub use types::*;

/// Standard result type for all storefront pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
