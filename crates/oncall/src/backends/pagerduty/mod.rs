//! Real backend speaking to the PagerDuty REST API.

mod client;
pub mod models;

pub use client::PagerDuty;
