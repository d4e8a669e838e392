//! Per-role dashboard aggregators.
//!
//! Each aggregator is a pure function over borrowed snapshots of identities,
//! reports and organizations. They never mutate their inputs and never fail:
//! empty inputs produce zero-valued summaries.

pub mod coordinator;
pub mod grouping;
pub mod student;
pub mod supervisor;

pub use coordinator::{coordinator_summary, CoordinatorSummary};
pub use grouping::{group_by_organization, OrganizationGroup, UNASSIGNED_GROUP};
pub use student::{student_summary, StudentSummary};
pub use supervisor::{supervisor_summary, SupervisorSummary};

/// `numerator / denominator`, or `0.0` when the denominator is zero.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// Whole-number percentage of `ratio`, clamped to `0..=100`.
pub fn percentage(ratio: f64) -> u8 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}
