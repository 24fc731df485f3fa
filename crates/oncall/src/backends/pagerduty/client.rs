//! PagerDuty REST API v2 client implementation.
//!
//! API documentation: <https://developer.pagerduty.com/api-reference/>

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use urlencoding::encode;

use super::models::{
    CreateIncidentBody, CreateOverrideBody, EscalationPolicyEnvelope, EscalationPolicyPayload,
    IncidentBodyPayload, IncidentEnvelope, IncidentPayload, ListEscalationPoliciesResponse,
    ListIncidentsResponse, ListLogEntriesResponse, ListOverridesResponse, ListSchedulesResponse,
    ListTagsResponse, ListUsersResponse, OverrideEnvelope, OverridePayload,
    UpdateEscalationPolicyBody, UserEnvelope,
};
use crate::backends::traits::{Provider, ProviderError};
use crate::pagination::{self, PAGE_LIMIT};
use crate::text;
use crate::types::{
    CreateIncidentRequest, EscalationPolicy, EscalationRule, Incident, ListOnCallsOptions,
    ListTagsOptions, ListUsersOptions, OnCall, OnCallPage, Override, Reference, Schedule,
    ScheduleMatch, Tag, UpdateEscalationPolicyRequest, User,
};
use crate::validate;

/// Base URL for the PagerDuty REST API.
const API_BASE_URL: &str = "https://api.pagerduty.com";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Organizational label prefixed to every managed schedule's title.
const SCHEDULE_TITLE_PREFIX: &str = "GSOC";

/// Team whose members are searched by user-name lookups.
const ONCALL_TEAM_ID: &str = "P83EOFI";

/// Sender address required by the incident-creation endpoint.
const INCIDENT_FROM_EMAIL: &str = "nobody@justin.tv";

/// PagerDuty REST API backend.
#[derive(Clone)]
pub struct PagerDuty {
    /// HTTP client.
    client: Client,
    /// API token for authentication.
    api_token: String,
    /// API base URL.
    base_url: String,
}

impl PagerDuty {
    /// Create a new PagerDuty backend.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api_token: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_base_url(api_token, API_BASE_URL)
    }

    /// Create a backend against a custom base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_base_url(
        api_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_token: api_token.into(),
            base_url: base_url.into(),
        })
    }

    /// Make an authenticated GET request.
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "GET request");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token token={}", self.api_token))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request.
    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "POST request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Token token={}", self.api_token))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request with the `From` sender header
    /// required by the incident endpoints.
    async fn post_as_sender<T, B>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "POST request (as sender)");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Token token={}", self.api_token))
            .header("Content-Type", "application/json")
            .header("From", INCIDENT_FROM_EMAIL)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated PUT request.
    async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "PUT request");

        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("Token token={}", self.api_token))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated DELETE request.
    async fn delete(&self, path: &str) -> Result<(), ProviderError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "DELETE request");

        let response = self
            .client
            .delete(&url)
            .header("Authorization", format!("Token token={}", self.api_token))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            if status == StatusCode::NOT_FOUND {
                return Err(ProviderError::NotFound(text));
            }
            Err(ProviderError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    /// Handle API response, parsing JSON or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, body = %text, "Failed to parse response");
                ProviderError::Serialization(e)
            })
        } else if status == StatusCode::NOT_FOUND {
            Err(ProviderError::NotFound(text))
        } else {
            Err(ProviderError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    /// Build the query string for the options-driven on-call listing.
    /// Zero-valued paging params are left off so the backend applies its
    /// own default page size.
    fn oncalls_query(options: &ListOnCallsOptions) -> String {
        let mut params = Vec::new();
        if options.limit > 0 {
            params.push(format!("limit={}", options.limit));
        }
        if options.offset > 0 {
            params.push(format!("offset={}", options.offset));
        }

        if let Some(time_zone) = &options.time_zone {
            params.push(format!("time_zone={}", encode(time_zone)));
        }
        for id in &options.schedule_ids {
            params.push(format!("schedule_ids[]={id}"));
        }
        for id in &options.user_ids {
            params.push(format!("user_ids[]={id}"));
        }
        for id in &options.escalation_policy_ids {
            params.push(format!("escalation_policy_ids[]={id}"));
        }
        if let Some(since) = &options.since {
            params.push(format!("since={}", encode(since)));
        }
        if let Some(until) = &options.until {
            params.push(format!("until={}", encode(until)));
        }
        if options.earliest {
            params.push("earliest=true".to_string());
        }
        if options.include_total {
            params.push("total=true".to_string());
        }

        params.join("&")
    }

    /// The `since` timestamp `window_minutes` away from now, in UTC.
    fn since_cursor(window_minutes: i64) -> String {
        (Utc::now() + chrono::Duration::minutes(window_minutes))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }

    /// Fetch one page of on-calls filtered by schedule ids.
    async fn oncalls_page(
        &self,
        schedule_ids: &[String],
        offset: u32,
    ) -> Result<Vec<OnCall>, ProviderError> {
        let mut params = vec![
            format!("limit={PAGE_LIMIT}"),
            format!("offset={offset}"),
            "time_zone=UTC".to_string(),
            "total=true".to_string(),
        ];
        for id in schedule_ids {
            params.push(format!("schedule_ids[]={id}"));
        }

        let page: OnCallPage = self.get(&format!("/oncalls?{}", params.join("&"))).await?;
        Ok(page.oncalls)
    }

    /// Fetch one page of all schedules.
    async fn schedules_page(&self, offset: u32) -> Result<Vec<Schedule>, ProviderError> {
        let response: ListSchedulesResponse = self
            .get(&format!("/schedules?limit={PAGE_LIMIT}&offset={offset}&query="))
            .await?;
        Ok(response.schedules)
    }

    /// Fetch one page of users matching the options.
    async fn users_page(
        &self,
        options: &ListUsersOptions,
        offset: u32,
    ) -> Result<Vec<User>, ProviderError> {
        let mut params = vec![format!("limit={PAGE_LIMIT}"), format!("offset={offset}")];
        if let Some(query) = &options.query {
            params.push(format!("query={}", encode(query)));
        }
        for id in &options.team_ids {
            params.push(format!("team_ids[]={id}"));
        }

        let response: ListUsersResponse =
            self.get(&format!("/users?{}", params.join("&"))).await?;
        Ok(response.users)
    }

    /// Fetch one page of incidents created after `since`.
    async fn incidents_page(
        &self,
        since: &str,
        offset: u32,
    ) -> Result<Vec<Incident>, ProviderError> {
        let response: ListIncidentsResponse = self
            .get(&format!(
                "/incidents?limit={PAGE_LIMIT}&offset={offset}&since={}&time_zone=UTC",
                encode(since)
            ))
            .await?;
        Ok(response.incidents)
    }

    /// Fetch one page of an incident's log entries.
    async fn log_entries_page(
        &self,
        incident_id: &str,
        offset: u32,
    ) -> Result<Vec<super::models::LogEntry>, ProviderError> {
        let response: ListLogEntriesResponse = self
            .get(&format!(
                "/incidents/{incident_id}/log_entries?limit={PAGE_LIMIT}&offset={offset}&is_overview=false"
            ))
            .await?;
        Ok(response.log_entries)
    }

    /// Fetch one page of tags matching the options.
    async fn tags_page(
        &self,
        options: &ListTagsOptions,
        offset: u32,
    ) -> Result<Vec<Tag>, ProviderError> {
        let mut params = vec![format!("limit={PAGE_LIMIT}"), format!("offset={offset}")];
        if let Some(query) = &options.query {
            params.push(format!("query={}", encode(query)));
        }

        let response: ListTagsResponse = self.get(&format!("/tags?{}", params.join("&"))).await?;
        Ok(response.tags)
    }

    /// Scan incident pages starting `window_minutes` from now, keeping the
    /// incidents `keep` accepts.
    ///
    /// The `since` value trails the last scanned incident's creation time
    /// while the offset does the actual paging. This is a continuation
    /// heuristic, not a strict cursor: incidents near page boundaries can
    /// be skipped or revisited.
    async fn scan_incidents<F>(
        &self,
        window_minutes: i64,
        keep: F,
    ) -> Result<Vec<Incident>, ProviderError>
    where
        F: Fn(&Incident) -> bool,
    {
        let mut since = Self::since_cursor(window_minutes);
        let mut results = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.incidents_page(&since, offset).await?;
            if page.is_empty() {
                break;
            }
            for incident in page {
                since.clone_from(&incident.created_at);
                if keep(&incident) {
                    results.push(incident);
                }
            }
            offset += PAGE_LIMIT;
        }
        Ok(results)
    }
}

#[async_trait]
impl Provider for PagerDuty {
    async fn get_oncalls_by_schedule_ids(
        &self,
        schedule_ids: &[String],
    ) -> Result<Vec<OnCall>, ProviderError> {
        validate::require_all("scheduleIDs", schedule_ids)?;

        pagination::fetch_all(|offset| self.oncalls_page(schedule_ids, offset)).await
    }

    async fn get_oncalls(
        &self,
        options: ListOnCallsOptions,
    ) -> Result<OnCallPage, ProviderError> {
        self.get(&format!("/oncalls?{}", Self::oncalls_query(&options)))
            .await
    }

    async fn get_schedule_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ScheduleMatch>, ProviderError> {
        validate::require("name", name)?;

        let wanted = format!("{SCHEDULE_TITLE_PREFIX} {name}");
        pagination::find_first(
            |offset| self.schedules_page(offset),
            |schedule| {
                text::eq_fold(&schedule.name, &wanted).then(|| ScheduleMatch {
                    id: schedule.id.clone(),
                    time_zone: schedule.time_zone.clone(),
                })
            },
        )
        .await
    }

    async fn get_user_id_by_name(&self, name: &str) -> Result<Option<String>, ProviderError> {
        validate::require("name", name)?;

        let options = ListUsersOptions {
            team_ids: vec![ONCALL_TEAM_ID.to_string()],
            ..ListUsersOptions::default()
        };
        pagination::find_first(
            |offset| self.users_page(&options, offset),
            |user| text::user_name_matches(&user.name, name).then(|| user.id.clone()),
        )
        .await
    }

    async fn get_user_ids_by_names(
        &self,
        names: &[String],
    ) -> Result<Vec<String>, ProviderError> {
        validate::require_all("names", names)?;

        let mut ids = Vec::new();
        for name in names {
            let users = self
                .list_users(ListUsersOptions {
                    query: Some(name.clone()),
                    ..ListUsersOptions::default()
                })
                .await?;

            if let Some(user) = users.iter().find(|u| text::eq_fold(&u.name, name)) {
                ids.push(user.id.clone());
            }
            // Resolution stops at the first name that matched.
            if !ids.is_empty() {
                break;
            }
        }
        Ok(ids)
    }

    async fn get_user(&self, id: &str) -> Result<User, ProviderError> {
        validate::require("id", id)?;

        let envelope: UserEnvelope = self.get(&format!("/users/{id}")).await?;
        Ok(envelope.user)
    }

    async fn list_users(&self, options: ListUsersOptions) -> Result<Vec<User>, ProviderError> {
        pagination::fetch_all(|offset| self.users_page(&options, offset)).await
    }

    async fn list_overrides(
        &self,
        schedule_id: &str,
        since: &str,
        until: &str,
        include_overflow: bool,
    ) -> Result<Vec<Override>, ProviderError> {
        validate::require("scheduleID", schedule_id)?;
        validate::require("since", since)?;
        validate::require("until", until)?;

        // Unless overflow is set, entries that pass the range bounds are
        // truncated at the bounds.
        let response: ListOverridesResponse = self
            .get(&format!(
                "/schedules/{schedule_id}/overrides?since={}&until={}&overflow={include_overflow}",
                encode(since),
                encode(until)
            ))
            .await?;
        Ok(response.overrides)
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

        info!(schedule_id = %schedule_id, user_id = %user_id, "Creating override");

        let body = CreateOverrideBody {
            item: OverridePayload {
                start: start.to_string(),
                end: end.to_string(),
                user: Reference::new(user_id, "user"),
            },
        };
        let envelope: OverrideEnvelope = self
            .post(&format!("/schedules/{schedule_id}/overrides"), &body)
            .await?;
        Ok(envelope.item)
    }

    async fn remove_override(
        &self,
        schedule_id: &str,
        override_id: &str,
    ) -> Result<(), ProviderError> {
        validate::require("scheduleID", schedule_id)?;
        validate::require("overrideID", override_id)?;

        info!(schedule_id = %schedule_id, override_id = %override_id, "Removing override");

        self.delete(&format!("/schedules/{schedule_id}/overrides/{override_id}"))
            .await
    }

    async fn get_incidents_by_escalation_policy(
        &self,
        escalation_policy_id: &str,
        window_minutes: i64,
    ) -> Result<Vec<Incident>, ProviderError> {
        validate::require("escalationPolicyID", escalation_policy_id)?;

        self.scan_incidents(window_minutes, |incident| {
            incident.escalation_policy.id == escalation_policy_id
        })
        .await
    }

    async fn get_incidents_by_tag(
        &self,
        tag_name: &str,
        window_minutes: i64,
    ) -> Result<Vec<Incident>, ProviderError> {
        validate::require("tagName", tag_name)?;

        let tags = self
            .list_tags(ListTagsOptions {
                query: Some(tag_name.to_string()),
            })
            .await?;
        // Only the first matching tag is considered.
        let Some(tag) = tags.first() else {
            return Ok(Vec::new());
        };

        let policies = self.get_escalation_policies_by_tag(&tag.id).await?;

        let mut incidents = Vec::new();
        for policy in &policies {
            let found = self
                .get_incidents_by_escalation_policy(&policy.id, window_minutes)
                .await?;
            incidents.extend(found);
        }
        Ok(incidents)
    }

    async fn create_incident(
        &self,
        request: CreateIncidentRequest,
    ) -> Result<Incident, ProviderError> {
        validate::require("title", &request.title)?;
        validate::require("serviceID", &request.service_id)?;

        info!(title = %request.title, service_id = %request.service_id, "Creating incident");

        let body = CreateIncidentBody {
            incident: IncidentPayload {
                payload_type: "incident".to_string(),
                title: request.title,
                service: Reference::new(request.service_id, "service_reference"),
                urgency: request.urgency.filter(|u| !u.is_empty()),
                body: request
                    .details
                    .filter(|d| !d.is_empty())
                    .map(|details| IncidentBodyPayload {
                        payload_type: "incident_body".to_string(),
                        details,
                    }),
                escalation_policy: request
                    .escalation_policy_id
                    .filter(|id| !id.is_empty())
                    .map(|id| Reference::new(id, "escalation_policy_reference")),
            },
        };

        let envelope: IncidentEnvelope = self.post_as_sender("/incidents", &body).await?;
        Ok(envelope.incident)
    }

    async fn search_incidents(
        &self,
        service_query: &str,
        window_minutes: i64,
    ) -> Result<Vec<Incident>, ProviderError> {
        self.scan_incidents(window_minutes, |incident| {
            incident
                .service
                .summary
                .as_deref()
                .unwrap_or_default()
                .contains(service_query)
        })
        .await
    }

    async fn search_incident_logs(
        &self,
        incident_id: &str,
        log_type: &str,
    ) -> Result<Option<String>, ProviderError> {
        validate::require("incidentID", incident_id)?;
        validate::require("logType", log_type)?;

        // Terminates only when a match is found or the backend reports an
        // empty page; a backend that keeps returning non-empty pages keeps
        // this walking.
        pagination::find_first(
            |offset| self.log_entries_page(incident_id, offset),
            |entry| (entry.entry_type == log_type).then(|| entry.summary.clone()),
        )
        .await
    }

    async fn list_tags(&self, options: ListTagsOptions) -> Result<Vec<Tag>, ProviderError> {
        pagination::fetch_all(|offset| self.tags_page(&options, offset)).await
    }

    async fn get_escalation_policies_by_tag(
        &self,
        tag_id: &str,
    ) -> Result<Vec<Reference>, ProviderError> {
        validate::require("tagID", tag_id)?;

        let response: ListEscalationPoliciesResponse = self
            .get(&format!("/tags/{tag_id}/escalation_policies"))
            .await?;
        Ok(response.escalation_policies)
    }

    async fn update_escalation_policy(
        &self,
        request: UpdateEscalationPolicyRequest,
    ) -> Result<EscalationPolicy, ProviderError> {
        validate::require("id", &request.id)?;
        validate::require("userID", &request.user_id)?;

        info!(policy_id = %request.id, user_id = %request.user_id, "Updating escalation policy");

        let services = match request.service_id.as_deref() {
            Some(id) if !id.is_empty() => vec![Reference::new(id, "service_reference")],
            _ => Vec::new(),
        };
        let teams = match request.team_id.as_deref() {
            Some(id) if !id.is_empty() => vec![Reference::new(id, "team_reference")],
            _ => Vec::new(),
        };

        let body = UpdateEscalationPolicyBody {
            escalation_policy: EscalationPolicyPayload {
                escalation_rules: EscalationRule::two_tier(&request.user_id, &request.escalation),
                services,
                teams,
            },
        };

        let envelope: EscalationPolicyEnvelope = self
            .put(&format!("/escalation_policies/{}", request.id), &body)
            .await?;
        Ok(envelope.escalation_policy)
    }
}
