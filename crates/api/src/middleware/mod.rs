//! Session-based authorization extractors.
//!
//! - [`auth::AuthUser`] -- The signed-in user (any portal role).
//! - [`rbac::RequireStudent`] -- Requires the `student` role.
//! - [`rbac::RequireSupervisor`] -- Requires the `supervisor` role.
//! - [`rbac::RequireCoordinator`] -- Requires the `coordinator` role.

pub mod auth;
pub mod rbac;
