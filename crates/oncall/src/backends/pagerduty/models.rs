//! PagerDuty REST API v2 request and response envelopes.
//!
//! Every resource rides inside a named wrapper object on the wire; these
//! types peel the wrappers off so the client can hand back the plain
//! domain types.

use serde::{Deserialize, Serialize};

use crate::types::{
    EscalationPolicy, EscalationRule, Incident, Override, Reference, Schedule, Tag, User,
};

/// Response wrapper for `GET /schedules`.
#[derive(Debug, Deserialize)]
pub struct ListSchedulesResponse {
    /// Schedules in this page.
    pub schedules: Vec<Schedule>,
}

/// Response wrapper for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct ListUsersResponse {
    /// Users in this page.
    pub users: Vec<User>,
}

/// Response wrapper for `GET /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    /// The requested user.
    pub user: User,
}

/// Response wrapper for `GET /schedules/{id}/overrides`.
#[derive(Debug, Deserialize)]
pub struct ListOverridesResponse {
    /// Overrides in the requested window.
    pub overrides: Vec<Override>,
}

/// Request body for `POST /schedules/{id}/overrides`.
#[derive(Debug, Serialize)]
pub struct CreateOverrideBody {
    /// The override to create.
    #[serde(rename = "override")]
    pub item: OverridePayload,
}

/// Override payload: window plus the replacement user reference.
#[derive(Debug, Serialize)]
pub struct OverridePayload {
    /// Window start.
    pub start: String,
    /// Window end.
    pub end: String,
    /// The user taking the shift (`type` is always `user`).
    pub user: Reference,
}

/// Response wrapper carrying a single override.
#[derive(Debug, Deserialize)]
pub struct OverrideEnvelope {
    /// The created override.
    #[serde(rename = "override")]
    pub item: Override,
}

/// Response wrapper for `GET /incidents`.
#[derive(Debug, Deserialize)]
pub struct ListIncidentsResponse {
    /// Incidents in this page.
    pub incidents: Vec<Incident>,
}

/// Request body for `POST /incidents`.
#[derive(Debug, Serialize)]
pub struct CreateIncidentBody {
    /// The incident to create.
    pub incident: IncidentPayload,
}

/// Incident payload. Optional members are omitted from the wire entirely
/// rather than sent as empty strings.
#[derive(Debug, Serialize)]
pub struct IncidentPayload {
    /// Always `incident`.
    #[serde(rename = "type")]
    pub payload_type: String,
    /// Incident title.
    pub title: String,
    /// Service reference.
    pub service: Reference,
    /// Urgency, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    /// Incident body, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<IncidentBodyPayload>,
    /// Escalation policy reference, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_policy: Option<Reference>,
}

/// Free-text body attached to a created incident.
#[derive(Debug, Serialize)]
pub struct IncidentBodyPayload {
    /// Always `incident_body`.
    #[serde(rename = "type")]
    pub payload_type: String,
    /// Details text.
    pub details: String,
}

/// Response wrapper carrying a single incident.
#[derive(Debug, Deserialize)]
pub struct IncidentEnvelope {
    /// The created incident.
    pub incident: Incident,
}

/// One entry of an incident's log.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    /// Entry identifier.
    pub id: String,
    /// Entry type (e.g. `resolve_log_entry`, `trigger_log_entry`).
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Human-readable summary.
    pub summary: String,
}

/// Response wrapper for `GET /incidents/{id}/log_entries`.
#[derive(Debug, Deserialize)]
pub struct ListLogEntriesResponse {
    /// Log entries in this page.
    pub log_entries: Vec<LogEntry>,
}

/// Response wrapper for `GET /tags`.
#[derive(Debug, Deserialize)]
pub struct ListTagsResponse {
    /// Tags in this page.
    pub tags: Vec<Tag>,
}

/// Response wrapper for `GET /tags/{id}/escalation_policies`.
#[derive(Debug, Deserialize)]
pub struct ListEscalationPoliciesResponse {
    /// References to the tagged policies.
    pub escalation_policies: Vec<Reference>,
}

/// Request body for `PUT /escalation_policies/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateEscalationPolicyBody {
    /// The replacement policy definition.
    pub escalation_policy: EscalationPolicyPayload,
}

/// Escalation policy payload: the synthesized rule set plus optional
/// associations.
#[derive(Debug, Serialize)]
pub struct EscalationPolicyPayload {
    /// Ordered escalation tiers.
    pub escalation_rules: Vec<EscalationRule>,
    /// Service associations, when given.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Reference>,
    /// Team associations, when given.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Reference>,
}

/// Response wrapper carrying a single escalation policy.
#[derive(Debug, Deserialize)]
pub struct EscalationPolicyEnvelope {
    /// The updated policy.
    pub escalation_policy: EscalationPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oncall_page_parses_captured_payload() {
        let body = r#"{
            "oncalls": [{
                "user": {"id": "PJ6XOVE", "name": "Timur Kalandarov"},
                "schedule": {"id": "PUHMCXV", "name": "Secondary"},
                "escalation_policy": {"id": "PXYKJ4K", "type": "escalation_policy_reference"},
                "escalation_level": 1,
                "start": "2021-07-21T14:54:39Z",
                "end": "2022-12-30T14:04:11Z"
            }],
            "limit": 100,
            "offset": 0,
            "more": false,
            "total": 1
        }"#;
        let page: crate::types::OnCallPage =
            serde_json::from_str(body).expect("page should parse");
        assert_eq!(page.oncalls.len(), 1);
        assert_eq!(page.oncalls[0].escalation_level, 1);
        assert_eq!(page.total, Some(1));
    }

    #[test]
    fn override_envelope_unwraps_the_keyword_field() {
        let body = r#"{"override": {"id": "Q3WU06FHSCYOHG",
            "start": "2022-08-31T14:00:00-06:00",
            "end": "2022-09-01T00:00:00-06:00",
            "user": {"id": "PJ6XOVE", "type": "user_reference"}}}"#;
        let envelope: OverrideEnvelope = serde_json::from_str(body).expect("should parse");
        assert_eq!(envelope.item.id, "Q3WU06FHSCYOHG");
        assert_eq!(envelope.item.user.id, "PJ6XOVE");
    }

    #[test]
    fn incident_payload_omits_absent_optionals() {
        let payload = CreateIncidentBody {
            incident: IncidentPayload {
                payload_type: "incident".to_string(),
                title: "The server is on fire".to_string(),
                service: Reference::new("P03NRF0", "service_reference"),
                urgency: None,
                body: None,
                escalation_policy: None,
            },
        };
        let json = serde_json::to_value(&payload).expect("should serialize");
        let incident = &json["incident"];
        assert!(incident.get("urgency").is_none());
        assert!(incident.get("body").is_none());
        assert!(incident.get("escalation_policy").is_none());
        assert_eq!(incident["service"]["type"], "service_reference");
    }

    #[test]
    fn log_entries_parse_with_type_field() {
        let body = r#"{"log_entries": [
            {"id": "Q1", "type": "trigger_log_entry", "summary": "Triggered through the API."},
            {"id": "Q2", "type": "resolve_log_entry", "summary": "Resolved through the API."}
        ]}"#;
        let response: ListLogEntriesResponse = serde_json::from_str(body).expect("should parse");
        assert_eq!(response.log_entries[1].entry_type, "resolve_log_entry");
    }
}
