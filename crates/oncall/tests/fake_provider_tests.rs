//! Contract tests for the fake backend, run through the shared interface.

use std::sync::Arc;

use oncall::backends::fake::data;
use oncall::{
    provider_from_config, Config, CreateIncidentRequest, Provider, ProviderError, Reference,
    UpdateEscalationPolicyRequest,
};

fn fake() -> Arc<dyn Provider> {
    let config = Config {
        api_token: String::new(),
        use_fake: true,
    };
    provider_from_config(&config).expect("fake backend should always build")
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn oncalls_require_well_formed_schedule_ids() {
    let provider = fake();

    let oncalls = provider
        .get_oncalls_by_schedule_ids(&ids(&["PUY4P9O", "P10QVCS"]))
        .await
        .expect("valid ids should succeed");
    assert_eq!(oncalls.len(), 1);
    assert_eq!(oncalls[0].user.id, data::EXISTING_USER_ID);

    assert!(matches!(
        provider.get_oncalls_by_schedule_ids(&[]).await,
        Err(ProviderError::InvalidParameter { .. })
    ));
    assert!(matches!(
        provider
            .get_oncalls_by_schedule_ids(&ids(&["P10QVCS", ""]))
            .await,
        Err(ProviderError::InvalidParameter { .. })
    ));
}

#[tokio::test]
async fn blank_required_strings_are_rejected_everywhere() {
    let provider = fake();

    for blank in ["", "   ", "\t"] {
        assert!(provider.get_schedule_by_name(blank).await.is_err());
        assert!(provider.get_user_id_by_name(blank).await.is_err());
        assert!(provider.get_user(blank).await.is_err());
        assert!(provider.list_overrides(blank, "a", "b", false).await.is_err());
        assert!(provider.list_overrides("PUHMCXV", blank, "b", false).await.is_err());
        assert!(provider.create_override(blank, "u", "s", "e").await.is_err());
        assert!(provider.create_override("s", blank, "s", "e").await.is_err());
        assert!(provider.remove_override("s", blank).await.is_err());
        assert!(provider.get_incidents_by_escalation_policy(blank, -30).await.is_err());
        assert!(provider.get_incidents_by_tag(blank, -30).await.is_err());
        assert!(provider.search_incident_logs(blank, "t").await.is_err());
        assert!(provider.search_incident_logs("i", blank).await.is_err());
        assert!(provider.get_escalation_policies_by_tag(blank).await.is_err());
    }
}

#[tokio::test]
async fn options_driven_oncall_listing_returns_the_canned_page() {
    let provider = fake();

    let page = provider
        .get_oncalls(Default::default())
        .await
        .expect("listing should succeed");
    assert_eq!(page.oncalls.len(), 1);
    assert_eq!(page.oncalls[0].user.id, data::EXISTING_USER_ID);
    assert_eq!(page.oncalls[0].schedule.id, data::EXISTING_SCHEDULE_ID);
    assert!(!page.more);
}

#[tokio::test]
async fn schedule_lookup_returns_the_canonical_schedule() {
    let provider = fake();

    let found = provider
        .get_schedule_by_name("Caleb Young TESTING")
        .await
        .expect("lookup should succeed")
        .expect("fake always matches");
    assert_eq!(found.id, data::EXISTING_SCHEDULE_ID);
    assert_eq!(found.time_zone, data::EXISTING_SCHEDULE_TIME_ZONE);
}

#[tokio::test]
async fn user_lookups_resolve_to_the_canonical_user() {
    let provider = fake();

    let id = provider
        .get_user_id_by_name(data::EXISTING_USER_NAME)
        .await
        .expect("lookup should succeed");
    assert_eq!(id.as_deref(), Some(data::EXISTING_USER_ID));

    let user = provider
        .get_user(data::EXISTING_USER_ID)
        .await
        .expect("get should succeed");
    assert_eq!(user.name, data::EXISTING_USER_NAME);

    let users = provider
        .list_users(Default::default())
        .await
        .expect("list should succeed");
    assert_eq!(users.len(), 3);
}

#[tokio::test]
async fn user_ids_by_names_returns_one_id_per_name() {
    let provider = fake();

    let names = ids(&["Timur Kalandarov", "Caleb Young"]);
    let resolved = provider
        .get_user_ids_by_names(&names)
        .await
        .expect("resolution should succeed");
    assert_eq!(resolved.len(), names.len());

    assert!(provider.get_user_ids_by_names(&[]).await.is_err());
    assert!(provider
        .get_user_ids_by_names(&ids(&["Timur Kalandarov", "   "]))
        .await
        .is_err());
}

#[tokio::test]
async fn override_listing_and_creation_echo_the_window() {
    let provider = fake();

    let overrides = provider
        .list_overrides("P10QVCS", "2022-08-31T00:00:00Z", "2022-09-05T00:00:00Z", false)
        .await
        .expect("listing should succeed");
    assert_eq!(overrides.len(), 3);
    assert_eq!(overrides[0].id, "Q3WU06FHSCYOHG");

    let created = provider
        .create_override("P10QVCS", "PJ6XOVE", "2022-09-10T14:00:00Z", "2022-09-11T00:00:00Z")
        .await
        .expect("creation should succeed");
    assert_eq!(created.start, "2022-09-10T14:00:00Z");
    assert_eq!(created.end, "2022-09-11T00:00:00Z");
    assert_eq!(created.user.id, "PJ6XOVE");
    assert_eq!(created.user.ref_type.as_deref(), Some("user"));

    provider
        .remove_override("P10QVCS", &created.id)
        .await
        .expect("removal should succeed");
}

#[tokio::test]
async fn tag_listing_returns_the_four_fixed_tags() {
    let provider = fake();

    let tags = provider
        .list_tags(Default::default())
        .await
        .expect("listing should succeed");
    let labels: Vec<&str> = tags.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["ETS", "GSOC", "VIDOPS", "VOR"]);
}

#[tokio::test]
async fn gsoc_tag_resolves_to_three_policies() {
    let provider = fake();

    let policies = provider
        .get_escalation_policies_by_tag("P74RRGF")
        .await
        .expect("lookup should succeed");
    let names: Vec<&str> = policies
        .iter()
        .filter_map(|p| p.summary.as_deref())
        .collect();
    assert_eq!(
        names,
        vec!["Ad Server Escalation", "App code validation", "Browser Grid"]
    );
}

#[tokio::test]
async fn incident_listings_return_the_canned_incidents() {
    let provider = fake();

    let by_policy = provider
        .get_incidents_by_escalation_policy("PXYKJ4K", -30)
        .await
        .expect("listing should succeed");
    assert_eq!(by_policy.len(), 3);

    let by_tag = provider
        .get_incidents_by_tag("GSOC", -30)
        .await
        .expect("listing should succeed");
    assert_eq!(by_tag.len(), 3);
}

#[tokio::test]
async fn incident_creation_echoes_the_request() {
    let provider = fake();

    let incident = provider
        .create_incident(CreateIncidentRequest {
            title: "The server is on fire".to_string(),
            service_id: "P03NRF0".to_string(),
            urgency: Some("high".to_string()),
            details: Some("Someone call firefighters!".to_string()),
            escalation_policy_id: Some("PXYKJ4K".to_string()),
        })
        .await
        .expect("creation should succeed");
    assert_eq!(incident.title, "The server is on fire");
    assert_eq!(incident.service.id, "P03NRF0");
    assert_eq!(incident.urgency, "high");

    // Only title and serviceID are required.
    assert!(provider
        .create_incident(CreateIncidentRequest {
            title: "Title only".to_string(),
            service_id: "P03NRF0".to_string(),
            ..CreateIncidentRequest::default()
        })
        .await
        .is_ok());
    assert!(provider
        .create_incident(CreateIncidentRequest {
            service_id: "P03NRF0".to_string(),
            ..CreateIncidentRequest::default()
        })
        .await
        .is_err());
}

#[tokio::test]
async fn incident_search_requires_a_query() {
    let provider = fake();

    let none = provider
        .search_incidents("", -30)
        .await
        .expect("empty query should succeed");
    assert!(none.is_empty());

    let some = provider
        .search_incidents("checkout", -30)
        .await
        .expect("search should succeed");
    assert_eq!(some.len(), 3);
}

#[tokio::test]
async fn log_search_maps_known_types_to_fixed_summaries() {
    let provider = fake();

    let resolved = provider
        .search_incident_logs("Q3XZW6AK6GZ3TZ", "resolve_log_entry")
        .await
        .expect("search should succeed");
    assert_eq!(resolved.as_deref(), Some("Resolved through the API."));

    let assigned = provider
        .search_incident_logs("Q3XZW6AK6GZ3TZ", "assign_log_entry")
        .await
        .expect("search should succeed");
    assert_eq!(assigned.as_deref(), Some("Assigned to Timur Kalandarov."));

    let triggered = provider
        .search_incident_logs("Q3XZW6AK6GZ3TZ", "trigger_log_entry")
        .await
        .expect("search should succeed");
    assert_eq!(triggered.as_deref(), Some("Triggered through the API."));

    let unknown = provider
        .search_incident_logs("Q3XZW6AK6GZ3TZ", "annotate_log_entry")
        .await
        .expect("search should succeed");
    assert_eq!(unknown, None);
}

#[tokio::test]
async fn policy_update_echoes_the_id_and_synthesizes_two_tiers() {
    let provider = fake();

    let targets = vec![Reference::new("PUHMCXV", "schedule_reference")];
    let policy = provider
        .update_escalation_policy(UpdateEscalationPolicyRequest {
            id: "PXYKJ4K".to_string(),
            user_id: "PJ6XOVE".to_string(),
            service_id: Some("P03NRF0".to_string()),
            team_id: Some("P83EOFI".to_string()),
            escalation: targets.clone(),
        })
        .await
        .expect("update should succeed");

    assert_eq!(policy.id, "PXYKJ4K");
    assert_eq!(policy.escalation_rules.len(), 2);
    assert_eq!(policy.escalation_rules[0].delay_minutes, 5);
    assert_eq!(
        policy.escalation_rules[0].targets,
        vec![Reference::new("PJ6XOVE", "user_reference")]
    );
    assert_eq!(policy.escalation_rules[1].delay_minutes, 15);
    assert_eq!(policy.escalation_rules[1].targets, targets);
    assert_eq!(policy.services[0].id, "P03NRF0");
    assert_eq!(policy.teams[0].id, "P83EOFI");

    assert!(provider
        .update_escalation_policy(UpdateEscalationPolicyRequest {
            id: String::new(),
            user_id: "PJ6XOVE".to_string(),
            ..UpdateEscalationPolicyRequest::default()
        })
        .await
        .is_err());
}
