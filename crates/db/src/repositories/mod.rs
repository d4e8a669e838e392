//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DataStore` as the first argument. Reads take the store's read
//! lock, writes its write lock, so each call sees a consistent snapshot.

pub mod assignment_repo;
pub mod dashboard_repo;
pub mod identity_repo;
pub mod message_repo;
pub mod organization_repo;
pub mod report_repo;

pub use assignment_repo::AssignmentRepo;
pub use dashboard_repo::DashboardRepo;
pub use identity_repo::IdentityRepo;
pub use message_repo::MessageRepo;
pub use organization_repo::OrganizationRepo;
pub use report_repo::ReportRepo;

#[cfg(test)]
pub(crate) fn demo_store() -> crate::DataStore {
    crate::create_store(crate::seed::demo_dataset())
}
