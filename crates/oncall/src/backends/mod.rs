//! Backend implementations of the shared [`Provider`] interface.

pub mod fake;
pub mod pagerduty;
mod traits;

pub use traits::{Provider, ProviderError};
