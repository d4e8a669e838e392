//! On-disk session snapshot.
//!
//! The snapshot is a small JSON document:
//!
//! ```json
//! { "name": "auth-storage", "version": 1,
//!   "state": { "identity": { ... }, "authenticated": true } }
//! ```
//!
//! Writes go to a sibling temp file which is then renamed over the target,
//! so readers never see a half-written document.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use siwes_core::identity::Identity;
use siwes_core::session::Session;

pub const SNAPSHOT_NAME: &str = "auth-storage";
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Session snapshot I/O failed for {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Session snapshot {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Session snapshot has name '{0}', expected 'auth-storage'")]
    NameMismatch(String),

    #[error("Session snapshot version {0} is not supported")]
    UnsupportedVersion(u32),

    #[error("Failed to serialize session snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    name: String,
    version: u32,
    state: PersistedSession,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(default)]
    identity: Option<Identity>,
    #[serde(default)]
    authenticated: bool,
}

/// Location of the session snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }

    /// Read the stored session. `Ok(None)` when no snapshot exists yet.
    ///
    /// A snapshot that claims to be authenticated but carries no identity
    /// loads as anonymous.
    pub fn load(&self) -> Result<Option<Session>, PersistError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.display(),
                    source,
                })
            }
        };

        let document: SnapshotDocument =
            serde_json::from_str(&raw).map_err(|source| PersistError::Parse {
                path: self.display(),
                source,
            })?;
        if document.name != SNAPSHOT_NAME {
            return Err(PersistError::NameMismatch(document.name));
        }
        if document.version != SNAPSHOT_VERSION {
            return Err(PersistError::UnsupportedVersion(document.version));
        }

        let session = match document.state {
            PersistedSession {
                identity: Some(identity),
                authenticated: true,
            } => Session::authenticated(identity.normalized()),
            _ => Session::anonymous(),
        };
        Ok(Some(session))
    }

    /// Atomically replace the snapshot with `session`.
    pub fn save(&self, session: &Session) -> Result<(), PersistError> {
        let document = SnapshotDocument {
            name: SNAPSHOT_NAME.to_string(),
            version: SNAPSHOT_VERSION,
            state: PersistedSession {
                identity: session.current().cloned(),
                authenticated: !session.is_anonymous(),
            },
        };
        let json = serde_json::to_vec_pretty(&document)?;

        let io_err = |source| PersistError::Io {
            path: self.display(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use siwes_core::roles::Role;

    use super::*;

    fn snapshot_in(dir: &tempfile::TempDir) -> SnapshotFile {
        SnapshotFile::new(dir.path().join("auth-storage.json"))
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(snapshot_in(&dir).load(), Ok(None));
    }

    #[test]
    fn saved_session_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_in(&dir);
        let identity = Identity::new("supervisor1", "Dr. A", "s@x", Role::Supervisor);

        snapshot.save(&Session::authenticated(identity.clone())).unwrap();
        let loaded = snapshot.load().unwrap().unwrap();

        assert_eq!(loaded, Session::authenticated(identity));
        assert!(!snapshot.temp_path().exists());
    }

    #[test]
    fn document_layout_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_in(&dir);
        snapshot.save(&Session::anonymous()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(snapshot.path()).unwrap()).unwrap();
        assert_eq!(raw["name"], "auth-storage");
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["state"]["authenticated"], false);
        assert!(raw["state"]["identity"].is_null());
    }

    #[test]
    fn authenticated_without_identity_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_in(&dir);
        std::fs::write(
            snapshot.path(),
            r#"{"name":"auth-storage","version":1,"state":{"identity":null,"authenticated":true}}"#,
        )
        .unwrap();

        assert_eq!(snapshot.load().unwrap(), Some(Session::anonymous()));
    }

    #[test]
    fn wrong_version_or_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_in(&dir);

        std::fs::write(
            snapshot.path(),
            r#"{"name":"auth-storage","version":2,"state":{}}"#,
        )
        .unwrap();
        assert_matches!(snapshot.load(), Err(PersistError::UnsupportedVersion(2)));

        std::fs::write(snapshot.path(), r#"{"name":"other","version":1,"state":{}}"#).unwrap();
        assert_matches!(snapshot.load(), Err(PersistError::NameMismatch(name)) if name == "other");
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_in(&dir);
        std::fs::write(snapshot.path(), "{not json").unwrap();
        assert_matches!(snapshot.load(), Err(PersistError::Parse { .. }));
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("nested/state/auth.json"));
        snapshot.save(&Session::anonymous()).unwrap();
        assert!(snapshot.path().exists());
    }
}
