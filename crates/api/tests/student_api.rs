//! Integration tests for student reports, payment and the SIWES letter.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, login, post_json, PENDING_STUDENT_EMAIL, STUDENT_EMAIL};
use serde_json::json;

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submitted_report_is_pending_and_listed() {
    let app = common::build_test_app();
    login(&app, STUDENT_EMAIL).await;

    let body = json!({
        "title": "Building the API",
        "description": "Wrote REST endpoints for the inventory service.",
        "week": 3,
    });
    let response = post_json(app.clone(), "/api/v1/student/reports", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["status"], "pending");
    assert_eq!(report["student_id"], "student1");
    assert!(report["feedback"].is_null());

    let json = body_json(get(app.clone(), "/api/v1/student/reports").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let data = body_json(get(app, "/api/v1/student/dashboard").await).await["data"].clone();
    assert_eq!(data["total"], 3);
    assert_eq!(data["pending"], 2);
}

#[tokio::test]
async fn report_without_title_is_rejected() {
    let app = common::build_test_app();
    login(&app, STUDENT_EMAIL).await;

    let body = json!({ "title": "  ", "description": "No title", "week": 3 });
    let response = post_json(app, "/api/v1/student/reports", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Payment and letter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn online_payment_releases_the_letter() {
    let app = common::build_test_app();
    login(&app, PENDING_STUDENT_EMAIL).await;

    let response = get(app.clone(), "/api/v1/student/letter").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        app.clone(),
        "/api/v1/student/payment",
        json!({ "method": "online" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["payment_status"], "verified");
    assert_eq!(data["fee_naira"], 7000);

    let session = body_json(get(app.clone(), "/api/v1/session").await).await;
    assert_eq!(session["data"]["identity"]["payment_status"], "verified");

    let response = get(app, "/api/v1/student/letter").await;
    assert_eq!(response.status(), StatusCode::OK);
    let letter = body_json(response).await["data"].clone();
    assert_eq!(letter["student_name"], "Jane Smith");
    assert_eq!(letter["organization"], "Global Systems Inc");
}

#[tokio::test]
async fn evidence_upload_stays_pending() {
    let app = common::build_test_app();
    login(&app, PENDING_STUDENT_EMAIL).await;

    let response = post_json(
        app.clone(),
        "/api/v1/student/payment",
        json!({ "method": "evidence", "reference": "receipt-0042.pdf" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["payment_status"], "pending");

    let response = post_json(
        app,
        "/api/v1/student/payment",
        json!({ "method": "evidence", "reference": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verified_students_cannot_pay_twice() {
    let app = common::build_test_app();
    login(&app, STUDENT_EMAIL).await;

    let response = post_json(app, "/api/v1/student/payment", json!({ "method": "online" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
