//! The portal's session store.
//!
//! One [`SessionStore`] exists per running portal. It owns the current
//! [`Session`](siwes_core::session::Session), persists it to a snapshot file
//! and fences asynchronous sign-ins with a generation counter so that a
//! logout always wins over a sign-in that was still in flight.

pub mod error;
pub mod listener;
pub mod snapshot;
pub mod store;

pub use error::SessionError;
pub use listener::{publish_sign_in, SessionListener};
pub use snapshot::{PersistError, SnapshotFile};
pub use store::{SessionState, SessionStore};
