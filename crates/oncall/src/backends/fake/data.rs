//! Canned sample data returned by the fake backend.

use crate::types::{Incident, OnCall, OnCallPage, Override, Reference, Schedule, Tag, User};

/// Id of the canonical sample user.
pub const EXISTING_USER_ID: &str = "PJ6XOVE";

/// Name of the canonical sample user.
pub const EXISTING_USER_NAME: &str = "Timur Kalandarov";

/// Id of the canonical sample schedule.
pub const EXISTING_SCHEDULE_ID: &str = "PUHMCXV";

/// Timezone reported for schedule lookups.
pub const EXISTING_SCHEDULE_TIME_ZONE: &str = "America/Denver";

/// The canonical sample user.
pub(crate) fn user() -> User {
    User {
        id: EXISTING_USER_ID.to_string(),
        name: EXISTING_USER_NAME.to_string(),
        email: "tikaland@justin.tv".to_string(),
        time_zone: "America/New_York".to_string(),
        role: "user".to_string(),
        teams: vec![Reference {
            id: "P83EOFI".to_string(),
            ref_type: Some("team_reference".to_string()),
            summary: Some("GSOC".to_string()),
        }],
    }
}

/// One on-call assignment for the canonical user and schedule.
pub(crate) fn oncall_page() -> OnCallPage {
    OnCallPage {
        oncalls: vec![OnCall {
            user: user(),
            schedule: Schedule {
                id: EXISTING_SCHEDULE_ID.to_string(),
                ..Schedule::default()
            },
            escalation_policy: Reference::default(),
            escalation_level: 1,
            start: "2021-07-21T14:54:39Z".to_string(),
            end: "2022-12-30T14:04:11Z".to_string(),
        }],
        limit: 100,
        offset: 0,
        more: false,
        total: Some(0),
    }
}

/// Three overrides on the canonical schedule.
pub(crate) fn overrides() -> Vec<Override> {
    let user = Reference {
        id: EXISTING_USER_ID.to_string(),
        ref_type: None,
        summary: None,
    };
    vec![
        Override {
            id: "Q3WU06FHSCYOHG".to_string(),
            start: "2022-08-31T14:00:00-06:00".to_string(),
            end: "2022-09-01T00:00:00-06:00".to_string(),
            user: user.clone(),
        },
        Override {
            id: "Q1NF06I8X9HJAK".to_string(),
            start: "2022-09-01T14:00:00-06:00".to_string(),
            end: "2022-09-02T00:00:00-06:00".to_string(),
            user: user.clone(),
        },
        Override {
            id: "Q3BMMAACX0LQDM".to_string(),
            start: "2022-09-03T14:00:00-06:00".to_string(),
            end: "2022-09-04T00:00:00-06:00".to_string(),
            user,
        },
    ]
}

/// The four organizational tags.
pub(crate) fn tags() -> Vec<Tag> {
    [
        ("PRXFVK3", "ETS"),
        ("P74RRGF", "GSOC"),
        ("PMRPRRZ", "VIDOPS"),
        ("P3V3R4S", "VOR"),
    ]
    .into_iter()
    .map(|(id, label)| Tag {
        id: id.to_string(),
        label: label.to_string(),
        summary: label.to_string(),
    })
    .collect()
}

/// Three resolved sample incidents.
pub(crate) fn incidents() -> Vec<Incident> {
    vec![
        Incident {
            id: "Q3XZW6AK6GZ3TZ".to_string(),
            incident_number: 2_024_046,
            title: "Twilight Automation Test Failure".to_string(),
            description: "Twilight Automation Test Failure".to_string(),
            created_at: "2022-09-06T03:00:15Z".to_string(),
            status: "resolved".to_string(),
            urgency: "low".to_string(),
            ..Incident::default()
        },
        Incident {
            id: "Q0FDXK79NN127I".to_string(),
            incident_number: 2_024_049,
            title: "Input Errors > 1000 over 1M".to_string(),
            description:
                "cr01.sin04 tengige0/0/0/2/0 COLO:tm:cr01.bkk01:te0/0/0/1/0:US021-161:10G:::"
                    .to_string(),
            created_at: "2022-09-06T03:04:51Z".to_string(),
            status: "resolved".to_string(),
            urgency: "low".to_string(),
            ..Incident::default()
        },
        Incident {
            id: "Q0HV1FERSUO36A".to_string(),
            incident_number: 2_024_046,
            title: "BatchGetCheckoutPrice primary p99 Latency > 0.8s".to_string(),
            description: "BatchGetCheckoutPrice primary p99 Latency > 0.8s".to_string(),
            created_at: "2022-09-06T03:18:04Z".to_string(),
            status: "resolved".to_string(),
            urgency: "low".to_string(),
            ..Incident::default()
        },
    ]
}

/// The three escalation policies returned for any tag.
pub(crate) fn tagged_policies() -> Vec<Reference> {
    [
        ("PP2PMMD", "Ad Server Escalation"),
        ("PKR3E6F", "App code validation"),
        ("PGPQHZF", "Browser Grid"),
    ]
    .into_iter()
    .map(|(id, name)| Reference {
        id: id.to_string(),
        ref_type: None,
        summary: Some(name.to_string()),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_carry_the_four_fixed_labels() {
        let tags = tags();
        let labels: Vec<&str> = tags.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["ETS", "GSOC", "VIDOPS", "VOR"]);
    }

    #[test]
    fn incidents_are_all_resolved_snapshots() {
        assert!(incidents().iter().all(|i| i.status == "resolved"));
        assert_eq!(incidents().len(), 3);
    }
}
