//! Provider trait and error type shared by the real and fake backends.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{
    CreateIncidentRequest, EscalationPolicy, Incident, ListOnCallsOptions, ListTagsOptions,
    ListUsersOptions, OnCall, OnCallPage, Override, Reference, ScheduleMatch, Tag,
    UpdateEscalationPolicyRequest, User,
};

/// Errors that can occur during provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Caller-supplied parameter failed validation. Raised before any
    /// backend call is attempted.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// The full operation surface both backends implement.
///
/// Callers obtain an instance through [`crate::provider_from_config`] and
/// stay agnostic to whether the real or the fake backend is active. Every
/// operation validates its inputs the same way on both backends, issues its
/// backend call(s) sequentially, and returns the fully aggregated result.
#[async_trait]
pub trait Provider: Send + Sync {
    /// List every on-call assignment for the given schedules, across all
    /// pages.
    async fn get_oncalls_by_schedule_ids(
        &self,
        schedule_ids: &[String],
    ) -> Result<Vec<OnCall>, ProviderError>;

    /// List on-calls with caller-controlled filters. Single page; the
    /// caller owns pagination.
    async fn get_oncalls(&self, options: ListOnCallsOptions)
        -> Result<OnCallPage, ProviderError>;

    /// Find a schedule by name (case-insensitive, matched against the
    /// organizational title prefix). `None` when nothing matches.
    async fn get_schedule_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ScheduleMatch>, ProviderError>;

    /// Find a user id by display name within the fixed team scope.
    /// Accented characters in stored names are ignored. `None` when
    /// nothing matches.
    async fn get_user_id_by_name(&self, name: &str) -> Result<Option<String>, ProviderError>;

    /// Resolve user ids for the given display names. Stops at the first
    /// name that resolves.
    async fn get_user_ids_by_names(&self, names: &[String])
        -> Result<Vec<String>, ProviderError>;

    /// Fetch a user by id. An unknown id is a backend error.
    async fn get_user(&self, id: &str) -> Result<User, ProviderError>;

    /// List all users matching the options, across all pages.
    async fn list_users(&self, options: ListUsersOptions) -> Result<Vec<User>, ProviderError>;

    /// List overrides on a schedule within `[since, until]`. With
    /// `include_overflow`, entries spanning the bounds are returned whole
    /// instead of truncated at the bounds.
    async fn list_overrides(
        &self,
        schedule_id: &str,
        since: &str,
        until: &str,
        include_overflow: bool,
    ) -> Result<Vec<Override>, ProviderError>;

    /// Create an override assigning `user_id` to the schedule for
    /// `[start, end]`.
    async fn create_override(
        &self,
        schedule_id: &str,
        user_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Override, ProviderError>;

    /// Delete an override.
    async fn remove_override(
        &self,
        schedule_id: &str,
        override_id: &str,
    ) -> Result<(), ProviderError>;

    /// List incidents handled by the given escalation policy, starting
    /// `window_minutes` from now (negative looks back).
    async fn get_incidents_by_escalation_policy(
        &self,
        escalation_policy_id: &str,
        window_minutes: i64,
    ) -> Result<Vec<Incident>, ProviderError>;

    /// List incidents reachable from a tag: the tag's escalation policies
    /// are resolved first, then incidents are collected per policy.
    async fn get_incidents_by_tag(
        &self,
        tag_name: &str,
        window_minutes: i64,
    ) -> Result<Vec<Incident>, ProviderError>;

    /// Create an incident.
    async fn create_incident(
        &self,
        request: CreateIncidentRequest,
    ) -> Result<Incident, ProviderError>;

    /// List incidents whose service summary contains `service_query`.
    async fn search_incidents(
        &self,
        service_query: &str,
        window_minutes: i64,
    ) -> Result<Vec<Incident>, ProviderError>;

    /// Return the summary of the first log entry of the given type on an
    /// incident, or `None` if the log is exhausted without a match.
    async fn search_incident_logs(
        &self,
        incident_id: &str,
        log_type: &str,
    ) -> Result<Option<String>, ProviderError>;

    /// List all tags matching the options, across all pages.
    async fn list_tags(&self, options: ListTagsOptions) -> Result<Vec<Tag>, ProviderError>;

    /// List the escalation policies carrying the given tag.
    async fn get_escalation_policies_by_tag(
        &self,
        tag_id: &str,
    ) -> Result<Vec<Reference>, ProviderError>;

    /// Rewrite an escalation policy with the fixed two-tier rule set:
    /// tier 1 pages the given user, tier 2 pages the supplied targets.
    async fn update_escalation_policy(
        &self,
        request: UpdateEscalationPolicyRequest,
    ) -> Result<EscalationPolicy, ProviderError>;
}
