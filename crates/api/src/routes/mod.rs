pub mod auth;
pub mod coordinator;
pub mod health;
pub mod messages;
pub mod navigation;
pub mod student;
pub mod supervisor;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/signup                                     student sign-up (provider mode)
/// /auth/logout                                     logout (idempotent)
///
/// /session                                         current session
/// /navigation                                      sidebar links for the role
/// /navigation/authorize?path=                      guard decision for a page
///
/// /student/dashboard                               student summary
/// /student/reports                                 list, submit
/// /student/payment                                 pay online / upload evidence
/// /student/letter                                  SIWES letter (verified only)
///
/// /supervisor/dashboard                            supervisor summary
/// /supervisor/reports/{id}/review                  review an assigned report
///
/// /coordinator/dashboard                           coordinator summary
/// /coordinator/organizations                       organization list
/// /coordinator/payments/{student_id}/verify        verify payment
/// /coordinator/payments/{student_id}/reject        reject payment
/// /coordinator/assignments                         assign student to supervisor
///
/// /messages                                        list, send
/// /messages/{id}/read                              mark read
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(navigation::router())
        .nest("/student", student::router())
        .nest("/supervisor", supervisor::router())
        .nest("/coordinator", coordinator::router())
        .merge(messages::router())
}
