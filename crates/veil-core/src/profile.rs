use crate::error::{Result, VeilError};
use crate::paths;
use crate::record::ProgressRecord;
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-user document: identity metadata, the progress record, and
/// preferences. Replaced wholesale on every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    #[serde(default)]
    pub record: ProgressRecord,
    #[serde(default)]
    pub settings: Settings,
}

impl Profile {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        display_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            email: email.into(),
            display_name,
            created_at: now,
            last_login: now,
            record: ProgressRecord::new(),
            settings: Settings::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn create(
        root: &Path,
        user_id: impl Into<String>,
        email: impl Into<String>,
        display_name: Option<String>,
    ) -> Result<Self> {
        let user_id = user_id.into();
        paths::validate_slug(&user_id)?;

        let path = paths::profile_path(root, &user_id);
        if path.exists() {
            return Err(VeilError::ProfileExists(user_id));
        }

        let profile = Self::new(user_id, email, display_name);
        profile.save(root)?;
        Ok(profile)
    }

    pub fn load(root: &Path, user_id: &str) -> Result<Self> {
        let path = paths::profile_path(root, user_id);
        if !path.exists() {
            return Err(VeilError::ProfileNotFound(user_id.to_string()));
        }
        let data = std::fs::read_to_string(&path)?;
        let profile: Profile = serde_yaml::from_str(&data)?;
        Ok(profile)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::profile_path(root, &self.user_id);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let dir = paths::profiles_dir(root);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut profiles = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let Some(user_id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Self::load(root, user_id) {
                Ok(p) => profiles.push(p),
                Err(VeilError::ProfileNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(profiles)
    }

    pub fn touch_login(&mut self) {
        self.last_login = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
