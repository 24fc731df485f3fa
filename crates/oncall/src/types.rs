//! Domain types shared by every backend.
//!
//! All of these are immutable value snapshots of what the PagerDuty API
//! returns; the client never mutates them after deserialization. Missing
//! fields deserialize to their default values, mirroring the API's habit
//! of omitting empty members.

use serde::{Deserialize, Serialize};

/// Escalation delay for the primary (user) tier, in minutes.
pub const PRIMARY_ESCALATION_DELAY_MINUTES: u32 = 5;

/// Escalation delay for the secondary (target list) tier, in minutes.
pub const SECONDARY_ESCALATION_DELAY_MINUTES: u32 = 15;

/// Reference to another API resource (user, service, team, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    /// Resource identifier.
    pub id: String,
    /// Resource type (e.g. `user_reference`, `service_reference`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
    /// Human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Reference {
    /// Build a reference of the given type.
    #[must_use]
    pub fn new(id: impl Into<String>, ref_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ref_type: Some(ref_type.into()),
            summary: None,
        }
    }
}

/// A PagerDuty user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// User identifier.
    pub id: String,
    /// Full display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// IANA timezone name.
    pub time_zone: String,
    /// Account role (e.g. `user`, `admin`).
    pub role: String,
    /// Teams the user belongs to.
    pub teams: Vec<Reference>,
}

/// An on-call schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    /// Schedule identifier.
    pub id: String,
    /// Schedule name.
    pub name: String,
    /// IANA timezone name.
    pub time_zone: String,
}

/// A temporary replacement of the scheduled on-call user for a time window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Override {
    /// Override identifier.
    pub id: String,
    /// Window start timestamp.
    pub start: String,
    /// Window end timestamp.
    pub end: String,
    /// The user taking the shift.
    pub user: Reference,
}

/// Who is on call, from which schedule, at which escalation tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OnCall {
    /// The user on call.
    pub user: User,
    /// The schedule that produced the assignment.
    pub schedule: Schedule,
    /// The escalation policy the assignment belongs to.
    pub escalation_policy: Reference,
    /// Escalation tier (1 is paged first).
    pub escalation_level: u32,
    /// Assignment window start.
    pub start: String,
    /// Assignment window end.
    pub end: String,
}

/// One tier of an escalation policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationRule {
    /// Rule identifier (absent on rules we synthesize).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Minutes to wait before escalating past this tier.
    #[serde(rename = "escalation_delay_in_minutes")]
    pub delay_minutes: u32,
    /// Notification targets for this tier.
    pub targets: Vec<Reference>,
}

impl EscalationRule {
    /// The fixed two-tier rule set used when updating a policy: the given
    /// user is paged first, the supplied targets after a longer delay.
    #[must_use]
    pub fn two_tier(user_id: &str, escalation: &[Reference]) -> Vec<Self> {
        vec![
            Self {
                id: String::new(),
                delay_minutes: PRIMARY_ESCALATION_DELAY_MINUTES,
                targets: vec![Reference::new(user_id, "user_reference")],
            },
            Self {
                id: String::new(),
                delay_minutes: SECONDARY_ESCALATION_DELAY_MINUTES,
                targets: escalation.to_vec(),
            },
        ]
    }
}

/// An ordered set of escalation rules plus its associations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicy {
    /// Policy identifier.
    pub id: String,
    /// Policy name.
    pub name: String,
    /// Ordered escalation tiers.
    pub escalation_rules: Vec<EscalationRule>,
    /// Services using this policy.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Reference>,
    /// Teams associated with this policy.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Reference>,
}

/// A PagerDuty incident.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Incident {
    /// Incident identifier.
    pub id: String,
    /// Sequential incident number.
    pub incident_number: u64,
    /// Incident title.
    pub title: String,
    /// Incident description.
    pub description: String,
    /// Creation timestamp (as reported by the API).
    pub created_at: String,
    /// Lifecycle status (`triggered`, `acknowledged`, `resolved`).
    pub status: String,
    /// Urgency (`high` or `low`).
    pub urgency: String,
    /// The escalation policy handling the incident.
    pub escalation_policy: Reference,
    /// The service the incident was raised against.
    pub service: Reference,
}

/// A label attachable to escalation policies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Tag identifier.
    pub id: String,
    /// Tag label.
    pub label: String,
    /// Human-readable summary.
    pub summary: String,
}

/// Schedule lookup result: identifier plus its timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleMatch {
    /// Schedule identifier.
    pub id: String,
    /// IANA timezone name.
    pub time_zone: String,
}

/// One page of on-call assignments, with the backend's pagination metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OnCallPage {
    /// Assignments in this page.
    pub oncalls: Vec<OnCall>,
    /// Page size the backend applied.
    pub limit: u32,
    /// Starting position of this page.
    pub offset: u32,
    /// Whether further pages exist.
    pub more: bool,
    /// Total matching records, when requested.
    pub total: Option<u64>,
}

/// Filters for the options-driven on-call listing.
#[derive(Debug, Clone, Default)]
pub struct ListOnCallsOptions {
    /// Timezone applied to rendered timestamps.
    pub time_zone: Option<String>,
    /// Restrict to these schedules.
    pub schedule_ids: Vec<String>,
    /// Restrict to these users.
    pub user_ids: Vec<String>,
    /// Restrict to these escalation policies.
    pub escalation_policy_ids: Vec<String>,
    /// Window start.
    pub since: Option<String>,
    /// Window end.
    pub until: Option<String>,
    /// Return only the earliest on-call per combination.
    pub earliest: bool,
    /// Ask the backend for a total count.
    pub include_total: bool,
    /// Page size.
    pub limit: u32,
    /// Page start.
    pub offset: u32,
}

/// Filters for user listings.
#[derive(Debug, Clone, Default)]
pub struct ListUsersOptions {
    /// Free-text filter on name and email.
    pub query: Option<String>,
    /// Restrict to members of these teams.
    pub team_ids: Vec<String>,
}

/// Filters for tag listings.
#[derive(Debug, Clone, Default)]
pub struct ListTagsOptions {
    /// Free-text filter on the tag label.
    pub query: Option<String>,
}

/// Request to create an incident. Only `title` and `service_id` are
/// required; optional members are left off the wire entirely when absent.
#[derive(Debug, Clone, Default)]
pub struct CreateIncidentRequest {
    /// Incident title.
    pub title: String,
    /// Service to raise the incident against.
    pub service_id: String,
    /// Urgency (`high` or `low`).
    pub urgency: Option<String>,
    /// Free-text incident body.
    pub details: Option<String>,
    /// Escalation policy to page instead of the service default.
    pub escalation_policy_id: Option<String>,
}

/// Request to rewrite an escalation policy with the fixed two-tier layout.
#[derive(Debug, Clone, Default)]
pub struct UpdateEscalationPolicyRequest {
    /// Policy to update.
    pub id: String,
    /// User paged at the first tier.
    pub user_id: String,
    /// Service association to attach, when given.
    pub service_id: Option<String>,
    /// Team association to attach, when given.
    pub team_id: Option<String>,
    /// Targets paged at the second tier.
    pub escalation: Vec<Reference>,
}
