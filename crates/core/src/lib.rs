//! Domain core of the SIWES portal.
//!
//! Pure types and logic with no I/O: identities and roles, the route guard,
//! the navigation surface, report and payment rules, and the per-role
//! dashboard aggregators. Everything here operates on data passed in by the
//! caller.

pub mod assignment;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod identity;
pub mod message;
pub mod navigation;
pub mod organization;
pub mod payment;
pub mod report;
pub mod roles;
pub mod session;
pub mod types;
