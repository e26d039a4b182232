// ── File-backed session store ──
//
// The durable counterpart of the in-memory credential store: the
// token/user pair as a JSON file in the platform data dir. An absent
// file means logged out.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use fourpaws_core::{CoreError, CredentialStore, PersistedSession};

pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The session file at its conventional platform location.
    pub fn default_location() -> Self {
        Self::new(crate::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for SessionFile {
    fn load(&self) -> Result<Option<PersistedSession>, CoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_error("read", &self.path, &err)),
        };
        let session = serde_json::from_slice(&bytes).map_err(|err| CoreError::Storage {
            message: format!("corrupt session file {}: {err}", self.path.display()),
        })?;
        Ok(Some(session))
    }

    fn save(&self, session: &PersistedSession) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| storage_error("create directory for", &self.path, &err))?;
        }
        let json = serde_json::to_vec_pretty(session).map_err(|err| CoreError::Storage {
            message: format!("could not encode session: {err}"),
        })?;
        fs::write(&self.path, json).map_err(|err| storage_error("write", &self.path, &err))?;
        restrict_permissions(&self.path)?;
        debug!("session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error("remove", &self.path, &err)),
        }
    }
}

fn storage_error(action: &str, path: &Path, err: &io::Error) -> CoreError {
    CoreError::Storage {
        message: format!("could not {action} {}: {err}", path.display()),
    }
}

// The file holds a bearer token; keep it owner-readable only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), CoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|err| storage_error("set permissions on", path, &err))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), CoreError> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fourpaws_core::{User, UserId};

    fn session() -> PersistedSession {
        PersistedSession {
            token: "jwt-token".into(),
            user: User {
                id: UserId::new("u1"),
                username: "maria".into(),
                role: Some("user".into()),
            },
        }
    }

    #[test]
    fn absent_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionFile::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionFile::new(dir.path().join("nested").join("session.json"));

        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), session());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing an already-cleared store is fine.
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = SessionFile::new(path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, CoreError::Storage { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_readable_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionFile::new(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
