use crate::error::{Result, VeilError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const VEIL_DIR: &str = ".veil";
pub const PROFILES_DIR: &str = ".veil/profiles";

pub const ACCOUNTS_FILE: &str = ".veil/accounts.yaml";
pub const SESSION_FILE: &str = ".veil/session.yaml";
pub const CATALOG_FILE: &str = ".veil/catalog.yaml";
pub const MISSIONS_FILE: &str = ".veil/missions.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn veil_dir(root: &Path) -> PathBuf {
    root.join(VEIL_DIR)
}

pub fn profiles_dir(root: &Path) -> PathBuf {
    root.join(PROFILES_DIR)
}

pub fn profile_path(root: &Path, user_id: &str) -> PathBuf {
    profiles_dir(root).join(format!("{user_id}.yaml"))
}

pub fn accounts_path(root: &Path) -> PathBuf {
    root.join(ACCOUNTS_FILE)
}

pub fn session_path(root: &Path) -> PathBuf {
    root.join(SESSION_FILE)
}

pub fn catalog_path(root: &Path) -> PathBuf {
    root.join(CATALOG_FILE)
}

pub fn missions_path(root: &Path) -> PathBuf {
    root.join(MISSIONS_FILE)
}

/// Data-bearing commands require an initialized tree.
pub fn require_initialized(root: &Path) -> Result<()> {
    if !veil_dir(root).is_dir() {
        return Err(VeilError::NotInitialized);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Slug validation (mission and tier identifiers)
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(VeilError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Email validation
// ---------------------------------------------------------------------------

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() || email.len() > 254 || !email_re().is_match(email) {
        return Err(VeilError::InvalidEmail);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        for slug in ["quiet-week", "a", "keeper-of-names", "x1"] {
            validate_slug(slug).unwrap_or_else(|_| panic!("expected valid: {slug}"));
        }
    }

    #[test]
    fn invalid_slugs() {
        for slug in [
            "",
            "-starts-with-dash",
            "ends-with-dash-",
            "has spaces",
            "UPPER",
            "a_b",
        ] {
            assert!(validate_slug(slug).is_err(), "expected invalid: {slug}");
        }
    }

    #[test]
    fn valid_emails() {
        for email in ["a@b.co", "first.last@example.org", "x+tag@host.io"] {
            validate_email(email).unwrap_or_else(|_| panic!("expected valid: {email}"));
        }
    }

    #[test]
    fn invalid_emails() {
        for email in ["", "plain", "no@dot", "two@@at.com", "sp ace@x.io", "@host.io"] {
            assert!(validate_email(email).is_err(), "expected invalid: {email}");
        }
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/home");
        assert_eq!(
            accounts_path(root),
            PathBuf::from("/tmp/home/.veil/accounts.yaml")
        );
        assert_eq!(
            profile_path(root, "u-1"),
            PathBuf::from("/tmp/home/.veil/profiles/u-1.yaml")
        );
        assert_eq!(
            catalog_path(root),
            PathBuf::from("/tmp/home/.veil/catalog.yaml")
        );
    }
}
