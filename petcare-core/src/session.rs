//! Login session lifecycle.
//!
//! A [`Session`] is restored once at startup, handed to the API client, and
//! torn down on logout. It is the only place the auth token lives.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::PetcareConfig;
use crate::error::{PetcareError, PetcareResult};
use crate::models::{AuthResponse, User};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionData {
    user: User,
    token: String,
}

#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    current: Option<SessionData>,
}

impl Session {
    /// Restore the session saved in the configured data directory.
    pub fn restore(config: &PetcareConfig) -> PetcareResult<Self> {
        Self::restore_from(config.data_path()?.join(SESSION_FILE))
    }

    /// A missing or unreadable session file means logged out.
    pub fn restore_from(path: PathBuf) -> PetcareResult<Self> {
        let current = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<SessionData>(&content) {
                Ok(data) => Some(data),
                Err(e) => {
                    log::warn!("Ignoring corrupt session file {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Session { path, current })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn require_user(&self) -> PetcareResult<&User> {
        self.user().ok_or(PetcareError::NotLoggedIn)
    }

    /// Store a successful login and persist it.
    pub fn login(&mut self, auth: AuthResponse) -> PetcareResult<()> {
        let data = SessionData {
            user: auth.user,
            token: auth.token,
        };
        self.save(&data)?;
        log::debug!("Logged in as {}", data.user.email);
        self.current = Some(data);
        Ok(())
    }

    /// Forget the current user and delete the session file.
    pub fn logout(&mut self) -> PetcareResult<()> {
        self.current = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PetcareError::Session(format!(
                "Could not remove {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, data: &SessionData) -> PetcareResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, serde_json::to_string_pretty(data)?)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
