//! Integration tests for coordinator payment decisions and assignments.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, login, post_empty, post_json, COORDINATOR_EMAIL, STUDENT_EMAIL};
use serde_json::json;

#[tokio::test]
async fn verifying_a_pending_payment() {
    let app = common::build_test_app();
    login(&app, COORDINATOR_EMAIL).await;

    let response = post_empty(app.clone(), "/api/v1/coordinator/payments/student2/verify").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["id"], "student2");
    assert_eq!(data["payment_status"], "verified");

    let summary = body_json(get(app.clone(), "/api/v1/coordinator/dashboard").await).await;
    assert_eq!(summary["data"]["payments"]["verified"], 2);
    assert_eq!(summary["data"]["verified_pct"], 100);

    let response = post_empty(app, "/api/v1/coordinator/payments/student2/reject").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn rejecting_a_pending_payment() {
    let app = common::build_test_app();
    login(&app, COORDINATOR_EMAIL).await;

    let response = post_empty(app, "/api/v1/coordinator/payments/student2/reject").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["payment_status"], "rejected");
}

#[tokio::test]
async fn payment_decision_for_non_student_is_404() {
    let app = common::build_test_app();
    login(&app, COORDINATOR_EMAIL).await;

    let response = post_empty(app.clone(), "/api/v1/coordinator/payments/supervisor1/verify").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_empty(app, "/api/v1/coordinator/payments/ghost/verify").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn students_cannot_decide_payments() {
    let app = common::build_test_app();
    login(&app, STUDENT_EMAIL).await;

    let response = post_empty(app, "/api/v1/coordinator/payments/student2/verify").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn assignment_links_supervisor_and_student() {
    let app = common::build_test_app();
    login(&app, COORDINATOR_EMAIL).await;

    let body = json!({ "supervisor_id": "supervisor1", "student_id": "student2" });
    let response = post_json(app.clone(), "/api/v1/coordinator/assignments", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["supervisor_id"], "supervisor1");
    assert_eq!(data["student_id"], "student2");

    let body = json!({ "supervisor_id": "student1", "student_id": "student2" });
    let response = post_json(app, "/api/v1/coordinator/assignments", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn organizations_are_listed() {
    let app = common::build_test_app();
    login(&app, COORDINATOR_EMAIL).await;

    let json = body_json(get(app, "/api/v1/coordinator/organizations").await).await;
    let organizations = json["data"].as_array().unwrap();
    assert_eq!(organizations.len(), 2);
    assert_eq!(organizations[0]["name"], "Tech Solutions Ltd");
}
