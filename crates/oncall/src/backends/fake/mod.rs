//! Fake backend returning canned data for offline use.

mod client;
pub mod data;

pub use client::FakeProvider;
