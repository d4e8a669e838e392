pub mod auth;
pub mod coordinator;
pub mod messages;
pub mod session;
pub mod student;
pub mod supervisor;
