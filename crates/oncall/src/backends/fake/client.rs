//! Deterministic fake backend.
//!
//! Mirrors the real backend's interface and validation rules exactly, but
//! short-circuits all network interaction and returns the canned data from
//! [`super::data`]. Used for offline testing and local development without
//! credentials.

use async_trait::async_trait;

use super::data;
use crate::backends::traits::{Provider, ProviderError};
use crate::types::{
    CreateIncidentRequest, EscalationPolicy, EscalationRule, Incident, ListOnCallsOptions,
    ListTagsOptions, ListUsersOptions, OnCall, OnCallPage, Override, Reference, ScheduleMatch,
    Tag, UpdateEscalationPolicyRequest, User,
};
use crate::validate;

/// Backend returning fixed sample data instead of calling PagerDuty.
#[derive(Debug, Clone, Default)]
pub struct FakeProvider;

impl FakeProvider {
    /// Create a new fake backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for FakeProvider {
    async fn get_oncalls_by_schedule_ids(
        &self,
        schedule_ids: &[String],
    ) -> Result<Vec<OnCall>, ProviderError> {
        validate::require_all("scheduleIDs", schedule_ids)?;

        Ok(data::oncall_page().oncalls)
    }

    async fn get_oncalls(
        &self,
        _options: ListOnCallsOptions,
    ) -> Result<OnCallPage, ProviderError> {
        Ok(data::oncall_page())
    }

    async fn get_schedule_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ScheduleMatch>, ProviderError> {
        validate::require("name", name)?;

        Ok(Some(ScheduleMatch {
            id: data::EXISTING_SCHEDULE_ID.to_string(),
            time_zone: data::EXISTING_SCHEDULE_TIME_ZONE.to_string(),
        }))
    }

    async fn get_user_id_by_name(&self, name: &str) -> Result<Option<String>, ProviderError> {
        validate::require("name", name)?;

        Ok(Some(data::EXISTING_USER_ID.to_string()))
    }

    async fn get_user_ids_by_names(
        &self,
        names: &[String],
    ) -> Result<Vec<String>, ProviderError> {
        validate::require_all("names", names)?;

        Ok(names
            .iter()
            .map(|_| data::EXISTING_USER_ID.to_string())
            .collect())
    }

    async fn get_user(&self, id: &str) -> Result<User, ProviderError> {
        validate::require("id", id)?;

        Ok(data::user())
    }

    async fn list_users(&self, _options: ListUsersOptions) -> Result<Vec<User>, ProviderError> {
        Ok(vec![data::user(), data::user(), data::user()])
    }

    async fn list_overrides(
        &self,
        schedule_id: &str,
        since: &str,
        until: &str,
        _include_overflow: bool,
    ) -> Result<Vec<Override>, ProviderError> {
        validate::require("scheduleID", schedule_id)?;
        validate::require("since", since)?;
        validate::require("until", until)?;

        Ok(data::overrides())
    }

    async fn create_override(
        &self,
        schedule_id: &str,
        user_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Override, ProviderError> {
        validate::require("scheduleID", schedule_id)?;
        validate::require("userID", user_id)?;
        validate::require("start", start)?;
        validate::require("end", end)?;

        Ok(Override {
            id: "TEST".to_string(),
            start: start.to_string(),
            end: end.to_string(),
            user: Reference::new(user_id, "user"),
        })
    }

    async fn remove_override(
        &self,
        schedule_id: &str,
        override_id: &str,
    ) -> Result<(), ProviderError> {
        validate::require("scheduleID", schedule_id)?;
        validate::require("overrideID", override_id)?;

        Ok(())
    }

    async fn get_incidents_by_escalation_policy(
        &self,
        escalation_policy_id: &str,
        _window_minutes: i64,
    ) -> Result<Vec<Incident>, ProviderError> {
        validate::require("escalationPolicyID", escalation_policy_id)?;

        Ok(data::incidents())
    }

    async fn get_incidents_by_tag(
        &self,
        tag_name: &str,
        _window_minutes: i64,
    ) -> Result<Vec<Incident>, ProviderError> {
        validate::require("tagName", tag_name)?;

        Ok(data::incidents())
    }

    async fn create_incident(
        &self,
        request: CreateIncidentRequest,
    ) -> Result<Incident, ProviderError> {
        validate::require("title", &request.title)?;
        validate::require("serviceID", &request.service_id)?;

        Ok(Incident {
            title: request.title,
            service: Reference {
                id: request.service_id,
                ..Reference::default()
            },
            urgency: request.urgency.unwrap_or_default(),
            escalation_policy: Reference {
                id: request.escalation_policy_id.unwrap_or_default(),
                ..Reference::default()
            },
            ..Incident::default()
        })
    }

    async fn search_incidents(
        &self,
        service_query: &str,
        _window_minutes: i64,
    ) -> Result<Vec<Incident>, ProviderError> {
        if service_query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(data::incidents())
    }

    async fn search_incident_logs(
        &self,
        incident_id: &str,
        log_type: &str,
    ) -> Result<Option<String>, ProviderError> {
        validate::require("incidentID", incident_id)?;
        validate::require("logType", log_type)?;

        let summary = match log_type {
            "resolve_log_entry" => "Resolved through the API.",
            "assign_log_entry" => "Assigned to Timur Kalandarov.",
            "trigger_log_entry" => "Triggered through the API.",
            _ => return Ok(None),
        };
        Ok(Some(summary.to_string()))
    }

    async fn list_tags(&self, _options: ListTagsOptions) -> Result<Vec<Tag>, ProviderError> {
        Ok(data::tags())
    }

    async fn get_escalation_policies_by_tag(
        &self,
        tag_id: &str,
    ) -> Result<Vec<Reference>, ProviderError> {
        validate::require("tagID", tag_id)?;

        Ok(data::tagged_policies())
    }

    async fn update_escalation_policy(
        &self,
        request: UpdateEscalationPolicyRequest,
    ) -> Result<EscalationPolicy, ProviderError> {
        validate::require("id", &request.id)?;
        validate::require("userID", &request.user_id)?;

        let services = match request.service_id.as_deref() {
            Some(id) if !id.is_empty() => vec![Reference::new(id, "service_reference")],
            _ => Vec::new(),
        };
        let teams = match request.team_id.as_deref() {
            Some(id) if !id.is_empty() => vec![Reference::new(id, "team_reference")],
            _ => Vec::new(),
        };

        Ok(EscalationPolicy {
            id: request.id,
            escalation_rules: EscalationRule::two_tier(&request.user_id, &request.escalation),
            services,
            teams,
            ..EscalationPolicy::default()
        })
    }
}
