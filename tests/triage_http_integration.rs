//! Integration tests for triage HTTP endpoints.
//!
//! These tests drive the assembled application through `tower::ServiceExt`:
//! 1. Stateless routing and vocabulary endpoints
//! 2. The full session flow from routing to export
//! 3. Error status mapping for bad input and missing resources

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use clinic_router::adapters::{build_app, InMemoryTriageSessionRepository, TriageAppState};
use clinic_router::config::ServerConfig;
use clinic_router::domain::routing::{ClinicRouter, FlagPolicy};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_with_policy(flag_policy: FlagPolicy) -> Router {
    let state = TriageAppState::new(
        ClinicRouter::default(),
        flag_policy,
        Arc::new(InMemoryTriageSessionRepository::new()),
    );
    build_app(state, &ServerConfig::default())
}

fn app() -> Router {
    app_with_policy(FlagPolicy::Strict)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, bytes) = send_raw(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/triage/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

async fn route_in_session(app: &Router, session_id: &str, request: Value) -> (String, Value) {
    let uri = format!("/api/triage/sessions/{}/route", session_id);
    let (status, body) = send(app, "POST", &uri, Some(request)).await;
    assert_eq!(status, StatusCode::CREATED);
    (body["attempt_id"].as_str().unwrap().to_string(), body)
}

// =============================================================================
// Vocabulary and stateless routing
// =============================================================================

#[tokio::test]
async fn catalog_lists_every_vocabulary() {
    let (status, body) = send(&app(), "GET", "/api/triage/catalog", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clinics"].as_array().unwrap().len(), 3);
    assert_eq!(body["concerns"].as_array().unwrap().len(), 12);
    assert_eq!(body["flags"].as_array().unwrap().len(), 27);
    assert_eq!(body["flags"][0]["id"], "suicidal_ideation");
    assert!(body["corrected_destinations"]
        .as_array()
        .unwrap()
        .contains(&json!("Needs triage call")));
}

#[tokio::test]
async fn rules_are_listed_in_cascade_order() {
    let (status, body) = send(&app(), "GET", "/api/triage/rules", None).await;

    assert_eq!(status, StatusCode::OK);
    let rules = body["rules"].as_array().unwrap();
    assert_eq!(rules[0]["id"], "safety_override");
    assert_eq!(rules[1]["id"], "neurologic_screen");
    assert!(rules.iter().all(|r| r["description"].as_str().is_some()));
}

#[tokio::test]
async fn safety_indicator_routes_to_psychiatry() {
    let request = json!({
        "age_years": 8.0,
        "primary_concern": "Autism Spectrum",
        "flags": ["suicidal_ideation", "iep"]
    });
    let (status, body) = send(&app(), "POST", "/api/triage/route", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"]["clinic"], "PPC");
    assert_eq!(body["decision"]["confidence"], "High");
    assert_eq!(body["decision"]["reasoning"][0]["rule"], "safety_override");
}

#[tokio::test]
async fn neurologic_indicator_routes_to_neurology() {
    let request = json!({
        "age_years": 12.0,
        "primary_concern": "Neurologic Follow-up Only",
        "flags": ["seizures"]
    });
    let (status, body) = send(&app(), "POST", "/api/triage/route", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"]["clinic"], "CAN");
    assert_eq!(body["decision"]["confidence"], "High");
}

#[tokio::test]
async fn strict_policy_rejects_unknown_indicator() {
    let request = json!({
        "age_years": 8.0,
        "primary_concern": "Autism Spectrum",
        "flags": ["telepathy"]
    });
    let (status, body) = send(&app(), "POST", "/api/triage/route", Some(request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "UNKNOWN_VALUE");
}

#[tokio::test]
async fn lenient_policy_reports_unknown_indicator() {
    let request = json!({
        "age_years": 8.0,
        "primary_concern": "Autism Spectrum",
        "flags": ["telepathy"]
    });
    let app = app_with_policy(FlagPolicy::Lenient);
    let (status, body) = send(&app, "POST", "/api/triage/route", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unrecognized_flags"], json!(["telepathy"]));
    let reasoning = body["decision"]["reasoning"].as_array().unwrap();
    assert_eq!(reasoning.last().unwrap()["rule"], "unrecognized_indicators");
}

#[tokio::test]
async fn negative_age_is_rejected() {
    let request = json!({ "age_years": -3.0, "primary_concern": "Autism Spectrum" });
    let (status, body) = send(&app(), "POST", "/api/triage/route", Some(request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_FORMAT");
}

// =============================================================================
// Session flow
// =============================================================================

#[tokio::test]
async fn full_session_flow_tracks_agreement_and_exports() {
    let app = app();
    let session_id = create_session(&app).await;

    let (first, _) = route_in_session(
        &app,
        &session_id,
        json!({ "age_years": 9.0, "primary_concern": "Isolated Anxiety (No Developmental Concerns)" }),
    )
    .await;
    let (second, routed) = route_in_session(
        &app,
        &session_id,
        json!({ "age_years": 4.0, "primary_concern": "Developmental Delay", "flags": ["speech_therapy"] }),
    )
    .await;
    assert_eq!(routed["decision"]["clinic"], "DBP");

    // Nothing finalized yet
    let summary_uri = format!("/api/triage/sessions/{}/summary", session_id);
    let (_, summary) = send(&app, "GET", &summary_uri, None).await;
    assert_eq!(summary["routed"], 2);
    assert_eq!(summary["pending"], 2);
    assert_eq!(summary["total_tests"], 0);

    // Confirm the first attempt
    let confirm_uri = format!(
        "/api/triage/sessions/{}/attempts/{}/confirm",
        session_id, first
    );
    let (status, record) = send(&app, "POST", &confirm_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["match_type"], "Match");
    assert_eq!(record["corrected_destination"], "PPC");

    // A second verdict on the same attempt conflicts
    let (status, body) = send(&app, "POST", &confirm_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "ATTEMPT_ALREADY_FINALIZED");

    // Disagree with the second attempt
    let feedback_uri = format!(
        "/api/triage/sessions/{}/attempts/{}/feedback",
        session_id, second
    );
    let (status, body) = send(
        &app,
        "POST",
        &feedback_uri,
        Some(json!({
            "corrected_destination": "match",
            "match_type": "Match"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "UNKNOWN_VALUE");

    let (status, body) = send(
        &app,
        "POST",
        &feedback_uri,
        Some(json!({
            "corrected_destination": "PPC",
            "match_type": "Match"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_MATCH_TYPE");

    let (status, record) = send(
        &app,
        "POST",
        &feedback_uri,
        Some(json!({
            "corrected_destination": "Needs dual assessment",
            "corrected_reasoning": "Speech delay with emerging anxiety",
            "match_type": "Disagree"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["routed_clinic"], "DBP");
    assert_eq!(record["corrected_destination"], "Needs dual assessment");

    let (_, summary) = send(&app, "GET", &summary_uri, None).await;
    assert_eq!(summary["total_tests"], 2);
    assert_eq!(summary["matches"], 1);
    assert_eq!(summary["agreement_rate_percent"], 50.0);
    assert_eq!(summary["pending"], 0);

    let disagreements_uri = format!("/api/triage/sessions/{}/disagreements", session_id);
    let (status, body) = send(&app, "GET", &disagreements_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let disagreements = body["disagreements"].as_array().unwrap();
    assert_eq!(disagreements.len(), 1);
    assert_eq!(disagreements[0]["attempt_id"], second.as_str());

    // Edge cases: blank descriptions are ignored
    let edge_uri = format!("/api/triage/sessions/{}/edge-cases", session_id);
    let (status, body) = send(
        &app,
        "POST",
        &edge_uri,
        Some(json!({ "description": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recorded"], false);

    let (status, body) = send(
        &app,
        "POST",
        &edge_uri,
        Some(json!({
            "description": "Toddler with seizures and autism features",
            "challenge": "Neuro and developmental needs compete",
            "decision": "CAN first, DBP follow-up"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["recorded"], true);
    assert!(body["edge_case_id"].as_str().is_some());

    // JSON export
    let export_uri = format!("/api/triage/sessions/{}/export", session_id);
    let (status, headers, bytes) = send_raw(&app, "GET", &export_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("routing_session_"));
    assert!(disposition.ends_with(".json\""));

    let snapshot: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(snapshot["routing_tests"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["edge_cases"].as_array().unwrap().len(), 1);
    assert_eq!(snapshot["summary"]["total_tests"], 2);
    assert_eq!(snapshot["summary"]["agreement_rate_percent"], 50.0);

    // YAML export
    let (status, headers, bytes) =
        send_raw(&app, "GET", &format!("{}?format=yaml", export_uri), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/yaml");
    let yaml = String::from_utf8(bytes).unwrap();
    assert!(yaml.contains("routing_tests:"));
    assert!(yaml.contains("edge_cases:"));
}

#[tokio::test]
async fn empty_session_reports_zero_agreement() {
    let app = app();
    let session_id = create_session(&app).await;

    let uri = format!("/api/triage/sessions/{}/summary", session_id);
    let (status, summary) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_tests"], 0);
    assert_eq!(summary["agreement_rate_percent"], 0.0);
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn unknown_session_returns_404() {
    let uri = "/api/triage/sessions/550e8400-e29b-41d4-a716-446655440000/summary";
    let (status, body) = send(&app(), "GET", uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn malformed_session_id_returns_400() {
    let (status, body) = send(&app(), "GET", "/api/triage/sessions/not-a-uuid/summary", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn unknown_attempt_returns_404() {
    let app = app();
    let session_id = create_session(&app).await;

    let uri = format!(
        "/api/triage/sessions/{}/attempts/550e8400-e29b-41d4-a716-446655440000/confirm",
        session_id
    );
    let (status, body) = send(&app, "POST", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "ATTEMPT_NOT_FOUND");
}

#[tokio::test]
async fn deleted_session_is_no_longer_found() {
    let app = app();
    let session_id = create_session(&app).await;
    let uri = format!("/api/triage/sessions/{}", session_id);

    let (status, _, body) = send_raw(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "SESSION_NOT_FOUND");

    let summary_uri = format!("{}/summary", uri);
    let (status, _) = send(&app, "GET", &summary_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_session_routes_are_all_recorded() {
    let app = app();
    let session_id = create_session(&app).await;

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let app = app.clone();
            let session_id = session_id.clone();
            tokio::spawn(async move {
                route_in_session(
                    &app,
                    &session_id,
                    json!({ "age_years": 9.0, "primary_concern": "Autism Spectrum" }),
                )
                .await
                .0
            })
        })
        .collect();

    let mut acknowledged = Vec::new();
    for task in tasks {
        acknowledged.push(task.await.unwrap());
    }

    let summary_uri = format!("/api/triage/sessions/{}/summary", session_id);
    let (_, summary) = send(&app, "GET", &summary_uri, None).await;
    assert_eq!(summary["routed"], acknowledged.len());

    for attempt_id in acknowledged {
        let uri = format!(
            "/api/triage/sessions/{}/attempts/{}/confirm",
            session_id, attempt_id
        );
        let (status, _) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn unsupported_export_format_returns_400() {
    let app = app();
    let session_id = create_session(&app).await;

    let uri = format!("/api/triage/sessions/{}/export?format=xml", session_id);
    let (status, body) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "UNKNOWN_VALUE");
}
