//! Typed PagerDuty client for on-call operations.
//!
//! This crate wraps the PagerDuty REST API behind one [`Provider`] trait
//! with two implementations: a real HTTP backend and a deterministic fake
//! that returns canned data for offline testing. List operations hide the
//! API's offset/limit pagination and always return the fully aggregated
//! collection; every operation validates its inputs before touching the
//! network, identically on both backends.
//!
//! # Example
//!
//! ```rust,ignore
//! use oncall::{provider_from_config, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), oncall::ProviderError> {
//!     let provider = provider_from_config(&Config::from_env())?;
//!
//!     let tags = provider.list_tags(Default::default()).await?;
//!     for tag in tags {
//!         println!("{}: {}", tag.id, tag.label);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backends;
pub mod config;
mod pagination;
mod text;
pub mod types;
mod validate;

pub use backends::fake::FakeProvider;
pub use backends::pagerduty::PagerDuty;
pub use backends::{Provider, ProviderError};
pub use config::{provider_from_config, Config};
pub use types::{
    CreateIncidentRequest, EscalationPolicy, EscalationRule, Incident, ListOnCallsOptions,
    ListTagsOptions, ListUsersOptions, OnCall, OnCallPage, Override, Reference, Schedule,
    ScheduleMatch, Tag, UpdateEscalationPolicyRequest, User,
};
