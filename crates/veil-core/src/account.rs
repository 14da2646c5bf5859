use crate::error::{Result, VeilError};
use crate::io::atomic_write;
use crate::paths;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub user_id: String,
    /// Stored lowercase; lookups are case-insensitive.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub password_salt: String,
    pub password_digest: String,
}

// ---------------------------------------------------------------------------
// Accounts registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Accounts {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Accounts {
    /// Load the registry, or an empty one if none exists yet.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::accounts_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let accounts: Accounts = serde_yaml::from_str(&data)?;
        Ok(accounts)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::accounts_path(root);
        let data = serde_yaml::to_string(self)?;
        atomic_write(&path, data.as_bytes())
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Account> {
        let needle = normalize_email(email);
        self.accounts.iter().find(|a| a.email == needle)
    }

    pub fn find_by_id(&self, user_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.user_id == user_id)
    }

    /// Register a new account. The caller persists the registry and
    /// creates the matching profile document.
    pub fn sign_up(
        &mut self,
        email: &str,
        display_name: Option<String>,
        password: &str,
    ) -> Result<Account> {
        let email = normalize_email(email);
        paths::validate_email(&email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(VeilError::WeakPassword);
        }
        if self.find_by_email(&email).is_some() {
            return Err(VeilError::EmailTaken);
        }

        let salt = new_salt();
        let now = Utc::now();
        let account = Account {
            user_id: Uuid::new_v4().to_string(),
            email,
            display_name,
            created_at: now,
            last_login: now,
            password_digest: digest(&salt, password),
            password_salt: BASE64.encode(salt),
        };
        self.accounts.push(account.clone());
        Ok(account)
    }

    /// Check credentials and stamp the login time.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<Account> {
        let needle = normalize_email(email);
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.email == needle)
            .ok_or(VeilError::UnknownEmail)?;

        let salt = BASE64
            .decode(&account.password_salt)
            .map_err(|_| VeilError::WrongPassword)?;
        if digest(&salt, password) != account.password_digest {
            return Err(VeilError::WrongPassword);
        }

        account.last_login = Utc::now();
        Ok(account.clone())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn new_salt() -> [u8; 16] {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    BASE64.encode(hasher.finalize())
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The signed-in user, one per root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
}

impl Session {
    pub fn current(root: &Path) -> Result<Option<Session>> {
        let path = paths::session_path(root);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        let session: Session = serde_yaml::from_str(&data)?;
        Ok(Some(session))
    }

    pub fn set(root: &Path, user_id: &str) -> Result<()> {
        let session = Session {
            user_id: user_id.to_string(),
        };
        let data = serde_yaml::to_string(&session)?;
        atomic_write(&paths::session_path(root), data.as_bytes())
    }

    pub fn clear(root: &Path) -> Result<()> {
        let path = paths::session_path(root);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Resolve the signed-in account, failing when no session exists or the
/// session points at a removed account.
pub fn require_current(root: &Path) -> Result<Account> {
    let session = Session::current(root)?.ok_or(VeilError::NotSignedIn)?;
    let accounts = Accounts::load(root)?;
    accounts
        .find_by_id(&session.user_id)
        .cloned()
        .ok_or(VeilError::NotSignedIn)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sign_up_and_sign_in() {
        let mut accounts = Accounts::default();
        let created = accounts
            .sign_up("Keeper@Example.org", Some("Keeper".to_string()), "hushhush")
            .unwrap();
        assert_eq!(created.email, "keeper@example.org");

        let signed_in = accounts.sign_in("keeper@example.org", "hushhush").unwrap();
        assert_eq!(signed_in.user_id, created.user_id);
    }

    #[test]
    fn sign_in_is_case_insensitive_on_email() {
        let mut accounts = Accounts::default();
        accounts.sign_up("a@b.co", None, "hushhush").unwrap();
        assert!(accounts.sign_in("A@B.CO", "hushhush").is_ok());
    }

    #[test]
    fn wrong_password() {
        let mut accounts = Accounts::default();
        accounts.sign_up("a@b.co", None, "hushhush").unwrap();
        let err = accounts.sign_in("a@b.co", "wrong-one").unwrap_err();
        assert!(matches!(err, VeilError::WrongPassword));
        assert_eq!(err.to_string(), "Incorrect password.");
    }

    #[test]
    fn unknown_email() {
        let mut accounts = Accounts::default();
        let err = accounts.sign_in("nobody@b.co", "hushhush").unwrap_err();
        assert!(matches!(err, VeilError::UnknownEmail));
        assert_eq!(err.to_string(), "No account found with this email.");
    }

    #[test]
    fn duplicate_email_rejected() {
        let mut accounts = Accounts::default();
        accounts.sign_up("a@b.co", None, "hushhush").unwrap();
        let err = accounts.sign_up("A@b.co", None, "otherpass").unwrap_err();
        assert!(matches!(err, VeilError::EmailTaken));
        assert_eq!(
            err.to_string(),
            "An account with this email already exists."
        );
    }

    #[test]
    fn short_password_rejected() {
        let mut accounts = Accounts::default();
        let err = accounts.sign_up("a@b.co", None, "tiny").unwrap_err();
        assert!(matches!(err, VeilError::WeakPassword));
        assert_eq!(
            err.to_string(),
            "Password should be at least 6 characters."
        );
    }

    #[test]
    fn malformed_email_rejected() {
        let mut accounts = Accounts::default();
        let err = accounts.sign_up("not-an-email", None, "hushhush").unwrap_err();
        assert!(matches!(err, VeilError::InvalidEmail));
        assert_eq!(err.to_string(), "Invalid email address.");
    }

    #[test]
    fn sign_in_updates_last_login() {
        let mut accounts = Accounts::default();
        let created = accounts.sign_up("a@b.co", None, "hushhush").unwrap();
        let signed_in = accounts.sign_in("a@b.co", "hushhush").unwrap();
        assert!(signed_in.last_login >= created.last_login);
    }

    #[test]
    fn registry_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut accounts = Accounts::default();
        accounts.sign_up("a@b.co", None, "hushhush").unwrap();
        accounts.save(dir.path()).unwrap();

        let mut loaded = Accounts::load(dir.path()).unwrap();
        assert_eq!(loaded.accounts.len(), 1);
        assert!(loaded.sign_in("a@b.co", "hushhush").is_ok());
    }

    #[test]
    fn session_roundtrip() {
        let dir = TempDir::new().unwrap();
        assert!(Session::current(dir.path()).unwrap().is_none());

        Session::set(dir.path(), "u-1").unwrap();
        let session = Session::current(dir.path()).unwrap().unwrap();
        assert_eq!(session.user_id, "u-1");

        Session::clear(dir.path()).unwrap();
        assert!(Session::current(dir.path()).unwrap().is_none());
    }

    #[test]
    fn require_current_without_session() {
        let dir = TempDir::new().unwrap();
        let err = require_current(dir.path()).unwrap_err();
        assert!(matches!(err, VeilError::NotSignedIn));
    }

    #[test]
    fn require_current_resolves_account() {
        let dir = TempDir::new().unwrap();
        let mut accounts = Accounts::default();
        let account = accounts.sign_up("a@b.co", None, "hushhush").unwrap();
        accounts.save(dir.path()).unwrap();
        Session::set(dir.path(), &account.user_id).unwrap();

        let current = require_current(dir.path()).unwrap();
        assert_eq!(current.email, "a@b.co");
    }

    #[test]
    fn dangling_session_is_not_signed_in() {
        let dir = TempDir::new().unwrap();
        Session::set(dir.path(), "gone").unwrap();
        let err = require_current(dir.path()).unwrap_err();
        assert!(matches!(err, VeilError::NotSignedIn));
    }
}
